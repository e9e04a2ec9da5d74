use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::capabilities::Capabilities;
use crate::descriptor::{ColumnData, FileDescriptor, IdentityContext};
use crate::error::Result;
use crate::materializer::AssetMaterializer;
use crate::record::{Transformed, ValueShape};

/// One column value to transform, as delivered by the CMS layer
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
pub struct TransformInput {
    #[serde(flatten)]
    pub identity: IdentityContext,
    /// Raw column value, passed through untouched
    #[serde(default)]
    pub value: Value,
}

/// A transform step for one kind of CMS column
#[async_trait]
pub trait ColumnTransformer: Send + Sync {
    /// Whether this transformer takes care of values in `column`
    fn handles(&self, column: &ColumnData) -> bool;

    async fn transform(&self, input: TransformInput) -> Result<Transformed>;
}

/// Turns single-file columns into cached image nodes
pub struct ImageTransformer {
    materializer: AssetMaterializer,
    capabilities: Capabilities,
}

impl ImageTransformer {
    pub fn new(materializer: AssetMaterializer, capabilities: Capabilities) -> Self {
        Self {
            materializer,
            capabilities,
        }
    }

    pub fn materializer(&self) -> &AssetMaterializer {
        &self.materializer
    }

    pub fn capabilities(&self) -> Capabilities {
        self.capabilities
    }
}

#[async_trait]
impl ColumnTransformer for ImageTransformer {
    fn handles(&self, column: &ColumnData) -> bool {
        column.is_single_file()
    }

    async fn transform(&self, input: TransformInput) -> Result<Transformed> {
        let descriptor = FileDescriptor::from_value(&input.value);
        let node = self
            .materializer
            .materialize(descriptor.as_ref(), &input.identity)
            .await?;

        Ok(Transformed {
            node,
            shape: ValueShape::Complex,
            value: input.value,
        })
    }
}
