//! Type definitions for keysword
//!
//! This module contains the main data structures passed between retrieval steps.

pub mod internal;
pub mod response;
pub mod serde_helpers;
pub mod target;

pub use internal::{KeyId, RecoveryKey, SessionToken, Stage};
pub use response::ComputerRecord;
pub use target::{ComputerId, Target};
