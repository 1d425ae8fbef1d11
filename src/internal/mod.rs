//! Internal Implementation Details
//!
//! This module contains implementation details that are not part of the public API.
//!
//! # Contents
//!
//! - [`constants`]: Sizing constants and magic numbers
//! - [`bits`]: Command element and descriptor flag bit fields
//! - [`volatile`]: Volatile cell for hardware-written memory

pub(crate) mod bits;
pub(crate) mod constants;
pub(crate) mod volatile;
