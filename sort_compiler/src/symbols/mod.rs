//! Externally supplied symbol data
//!
//! The only state the compiler consults besides its fixed tables is the set
//! of valid resistance names, injected by the caller as a read-only snapshot.

pub mod resist_set;

pub use resist_set::{ResistNameSet, STANDARD_RESISTS};
