// Provider independent view of listed objects
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use chrono::{
    DateTime,
    Utc,
};

/// Format used when printing `last_modified`.
const LAST_MODIFIED_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// A single object as returned by a bucket listing.
#[derive(Clone, Debug, PartialEq)]
pub struct ObjectRecord {
    /// The object key.
    pub key: String,

    /// Size of the object in bytes.
    pub size: u64,

    /// When the object was last modified.
    pub last_modified: DateTime<Utc>,

    /// Storage class label, eg. `STANDARD`. Empty if the provider didn't
    /// return one.
    pub storage_class: String,
}

impl ObjectRecord {
    /// Returns `last_modified` as `YYYY-MM-DD HH:MM:SS`.
    pub fn last_modified_string(&self) -> String {
        self.last_modified.format(LAST_MODIFIED_FORMAT).to_string()
    }
}

/// One page of a bucket listing.
#[derive(Debug, Default)]
pub struct ObjectPage {
    /// Objects in this page, in listing order.
    pub objects: Vec<ObjectRecord>,

    /// Token to request the next page with. `None` on the final page.
    pub continuation_token: Option<String>,
}
