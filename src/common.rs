// Common traits and types
#![forbid(unsafe_code)]
#![deny(missing_docs)]

mod client_config;
mod client_mode;
mod color;
mod human_size;
mod object_filter;
mod object_record;
mod object_store;
mod region;
mod size_unit;

pub use client_config::*;
pub use client_mode::*;
pub use color::*;
pub use human_size::*;
pub use object_filter::*;
pub use object_record::*;
pub use object_store::*;
pub use region::*;
pub use size_unit::*;
