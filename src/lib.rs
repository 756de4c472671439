//! Keysword - FileVault 2 key retrieval for Jamf Pro
//!
//! Retrieves the escrowed FileVault 2 individual recovery key of a managed
//! Mac from a Jamf Pro (JSS) server. The key is only exposed through the
//! web console, so keysword signs in the way a browser does and replays the
//! console's "show key" ajax call.
//!
//! # Usage
//!
//! ```bash
//! export JAMF_HOST=https://example.jamfcloud.com
//! export JAMF_USERNAME=svc-keysword
//! export JAMF_PASSWORD=...
//!
//! keysword -name "mbp-alice"
//! keysword -id 42
//! ```
//!
//! # Examples
//!
//! ```rust,no_run
//! use keysword::{KeyRetriever, Settings, types::Target};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let settings = Settings::from_env()?;
//! settings.validate()?;
//!
//! let retriever = KeyRetriever::new(settings)?;
//! let key = retriever.retrieve(&Target::Id("42".parse()?)).await?;
//! println!("{}", key.expose());
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod error;
pub mod session;
pub mod types;
pub mod utils;

pub use config::Settings;
pub use error::{Error, Result};
pub use session::KeyRetriever;
pub use types::{ComputerId, RecoveryKey, Target};
