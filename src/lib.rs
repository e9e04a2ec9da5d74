//! Materializes Directus file assets into a local build cache.
//!
//! Given a single-file column value from the CMS, the [`ImageTransformer`]
//! makes sure the file exists under `<program>/.cache/directus` (downloading
//! it when the cached copy is empty) and returns an [`AssetRecord`] node
//! stamped with a SHA-256 content digest.

pub mod capabilities;
pub mod descriptor;
pub mod digest;
pub mod error;
pub mod fetch;
pub mod logging;
pub mod materializer;
pub mod node_id;
pub mod paths;
pub mod record;
pub mod transformer;

pub use capabilities::Capabilities;
pub use descriptor::{ColumnData, FileDescriptor, IdentityContext};
pub use error::{AssetError, Result};
pub use fetch::{Fetcher, HttpFetcher};
pub use materializer::AssetMaterializer;
pub use node_id::{NodeIdAllocator, UuidNodeIds};
pub use record::{AssetRecord, Internal, Transformed, ValueShape};
pub use transformer::{ColumnTransformer, ImageTransformer, TransformInput};

pub use config::BuildContext;
