// ClientMode
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// What `s3ls` does with the objects it lists.
#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum ClientMode {
    /// Print matching objects.
    #[default]
    List,

    /// Delete every listed object.
    Delete,
}

impl ClientMode {
    /// Returns the mode selected by the `--delete` flag.
    pub fn from_delete_flag(delete: bool) -> Self {
        if delete {
            Self::Delete
        }
        else {
            Self::List
        }
    }
}
