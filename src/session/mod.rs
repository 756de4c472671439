//! Console session handling for key retrieval
//!
//! This module covers name resolution through the REST API, the
//! cookie-bound web console session, markup scraping, and the
//! [`KeyRetriever`] that sequences them.

pub mod client;
pub mod directory;
pub mod manager;
pub mod scrape;

pub use client::ConsoleSession;
pub use directory::{ComputerDirectory, JssDirectory};
pub use manager::{KeyRetriever, KeyRetrieverGeneric};
