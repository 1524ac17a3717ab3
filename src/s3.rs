// Imports all of the components needed for s3::client
#![forbid(unsafe_code)]
#![deny(missing_docs)]

/// S3 `Client`.
mod client;

/// Implementation of the `ObjectStore` trait for our S3 `Client`.
mod object_store;

/// Canned response clients for tests.
#[cfg(test)]
mod mock;

pub use client::*;
