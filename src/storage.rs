use async_trait::async_trait;

use crate::entities::Upload;
use crate::error::Error;

/// Blob storage that hands back a public URL for every stored object.
#[async_trait]
pub trait BlobStore {
    /// Stores `files` under `prefix` and returns their URLs in input order.
    async fn upload(&self, prefix: &str, files: &[Upload]) -> Result<Vec<String>, Error>;
}

pub type DynBlobStore = dyn BlobStore + Send + Sync;
