/// Service layer for the image resizer
///
/// - storage: object store seam (S3)
/// - metadata: metadata table seam (DynamoDB)
/// - thumbnail: image processing and the handler workflow
pub mod metadata;
pub mod storage;
pub mod thumbnail;

pub use metadata::{DynamoMetadataStore, MetadataStore};
pub use storage::ObjectStore;
pub use thumbnail::{ThumbnailService, ThumbnailServiceConfig};
