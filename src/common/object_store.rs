// ObjectStore trait
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use anyhow::Result;
use async_trait::async_trait;
use super::ObjectPage;

/// An object the store refused to delete.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct FailedDeletion {
    /// Key of the object that wasn't deleted.
    pub key: String,

    /// Reason given by the store.
    pub message: String,
}

/// `ObjectStore` represents the required methods to page through a bucket
/// listing and delete objects from it.
///
/// The bucket and prefix are fixed when the implementing `Client` is created.
#[async_trait]
pub trait ObjectStore {
    /// Returns one page of objects, starting from `continuation_token` or
    /// from the beginning of the listing if it is `None`.
    async fn list_objects(
        &self,
        continuation_token: Option<String>,
    ) -> Result<ObjectPage>;

    /// Deletes `keys` in a single request, returning any objects that
    /// couldn't be deleted.
    async fn delete_objects(
        &self,
        keys: Vec<String>,
    ) -> Result<Vec<FailedDeletion>>;
}
