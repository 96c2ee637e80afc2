//! Purpose: Define the stable public Rust API boundary for roster.
//! Exports: Core types and operations needed by the CLI and tests.
//! Role: Public, additive-only surface; hides internal storage modules.
//! Invariants: This module is the only public path to storage primitives.
//! Invariants: Domain outcomes ("already exists", "not found") are payloads, not errors.

#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::dispatch::{DEFAULT_FILE_NAME, Request, perform};
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::record::Record;
pub use crate::core::store::RecordStore;
