// Implement the ObjectStore trait for the s3::Client
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use crate::common::{
    FailedDeletion,
    ObjectPage,
    ObjectStore,
};
use super::client::Client;
use tracing::debug;

#[async_trait]
impl ObjectStore for Client {
    /// Return a page of objects from ListObjectsV2, restricted to our prefix.
    async fn list_objects(
        &self,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage> {
        let page = self.list_objects_v2(continuation_token).await?;

        debug!(
            "list_objects: {} objects, more: {}",
            page.objects.len(),
            page.continuation_token.is_some(),
        );

        Ok(page)
    }

    /// Delete `keys` from our bucket with DeleteObjects.
    async fn delete_objects(
        &self,
        keys: Vec<String>,
    ) -> Result<Vec<FailedDeletion>> {
        self.delete_keys(keys).await
    }
}
