//! Configuration management for keysword
//!
//! This module handles loading the JSS location, service credentials and
//! console variant from a config file and the environment.

pub mod loader;
pub mod settings;

pub use loader::ConfigLoader;
pub use settings::{ConsoleView, Settings};
