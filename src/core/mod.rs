//! Core history types.
//!
//! This module contains the value types and the backend contract:
//! - `Location` snapshots
//! - The `Source` trait every backend implements
//! - `MemorySource`, the in-memory backend
//!
//! Nothing here knows about listeners or transitions; that layer lives in
//! `crate::history`.

mod error;
mod location;
mod memory;
mod source;

pub use error::WriteError;
pub use location::Location;
pub use memory::MemorySource;
pub use source::{RawListener, Source, WriteMode};
