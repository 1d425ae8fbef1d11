//! BAM command script building.
//!
//! The crypto engine is configured only through register writes, and those
//! writes travel over the same BAM pipe as the bulk data. This module stages
//! them as BAM command elements:
//!
//! - [`CommandElement`]: One 16-byte register command in bus layout
//! - [`Transaction`]: Fixed-capacity element buffer plus the segment table
//!   describing it as a scatter list

mod element;
mod transaction;

pub use element::{CommandElement, CommandKind};
pub use transaction::{Transaction, TransactionDefault};
