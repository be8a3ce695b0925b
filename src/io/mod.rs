//! Input/output helpers.
//!
//! - CSV ingest + validation (`ingest`)
//! - segment exports to CSV (`export`)
//! - chart snapshot JSON read/write (`snapshot`)

pub mod export;
pub mod ingest;
pub mod snapshot;

pub use export::*;
pub use ingest::*;
pub use snapshot::*;
