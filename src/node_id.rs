use uuid::Uuid;

/// Allocates stable node ids from two identifying inputs.
///
/// Implementations must be deterministic: the same inputs always produce
/// the same id.
pub trait NodeIdAllocator: Send + Sync {
    fn create(&self, scope: &str, key: &str) -> String;
}

/// Name-based UUIDv5 ids under a fixed namespace
#[derive(Debug, Clone, Copy)]
pub struct UuidNodeIds {
    namespace: Uuid,
}

impl UuidNodeIds {
    pub const NAMESPACE: Uuid = Uuid::from_u128(0x5d4c_9a3e_1f7b_4c2a_9e61_0b8d_2f3a_7c15);

    pub fn new() -> Self {
        Self {
            namespace: Self::NAMESPACE,
        }
    }

    pub fn with_namespace(namespace: Uuid) -> Self {
        Self { namespace }
    }
}

impl Default for UuidNodeIds {
    fn default() -> Self {
        Self::new()
    }
}

impl NodeIdAllocator for UuidNodeIds {
    fn create(&self, scope: &str, key: &str) -> String {
        // Length prefix keeps ("ab", "c") and ("a", "bc") apart
        let name = format!("{}:{}{}", scope.len(), scope, key);
        Uuid::new_v5(&self.namespace, name.as_bytes()).to_string()
    }
}
