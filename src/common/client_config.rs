// ClientConfig
#![forbid(unsafe_code)]
#![deny(missing_docs)]
use super::{
    ClientMode,
    ObjectFilter,
    Region,
};

/// Client configuration.
///
/// Built once from the command line and never modified afterwards.
#[derive(Clone, Debug, Default)]
pub struct ClientConfig {
    /// The bucket whose objects are listed.
    pub bucket_name: String,

    /// Only objects under this key prefix are listed.
    pub prefix: Option<String>,

    /// Filter applied to listed objects. Ignored in `ClientMode::Delete`.
    pub filter: ObjectFilter,

    /// Print keys as `s3://bucket/key` instead of the bare key.
    pub full_path: bool,

    /// Whether objects are printed or deleted.
    pub mode: ClientMode,

    /// The region that our AWS client should initially be created in.
    ///
    /// The client is recreated in the bucket's own region once that has
    /// been looked up.
    pub region: Region,

    /// Custom endpoint for S3 compatible stores.
    pub endpoint: Option<String>,
}

impl ClientConfig {
    /// Returns how `key` should be printed, taking `full_path` into account.
    pub fn display_key(&self, key: &str) -> String {
        if self.full_path {
            format!("s3://{}/{}", self.bucket_name, key)
        }
        else {
            key.to_string()
        }
    }
}
