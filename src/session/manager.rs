//! # Key Retrieval
//!
//! [`KeyRetriever`] walks the console the way a browser would to reveal a
//! FileVault 2 individual key:
//!
//! 1. Resolve the target to a computer ID (REST API, names only)
//! 2. Log in through the failover page and scrape the session token
//! 3. Scrape the key identifier from the inventory page (if required)
//! 4. Replay the "show key" ajax call and read the key from the XML reply
//!
//! Each step runs only after the previous one succeeded. There are no
//! retries; the first failure is returned as-is.
//!
//! ## Examples
//!
//! ```rust,no_run
//! use keysword::{KeyRetriever, Settings, types::Target};
//!
//! # async fn example() -> keysword::Result<()> {
//! let settings = Settings::from_env()?;
//! settings.validate()?;
//!
//! let retriever = KeyRetriever::new(settings)?;
//! let key = retriever
//!     .retrieve(&Target::Name("mbp-alice".to_string()))
//!     .await?;
//! println!("{}", key.expose());
//! # Ok(())
//! # }
//! ```

use crate::{
    Result,
    config::Settings,
    session::{
        client::ConsoleSession,
        directory::{ComputerDirectory, JssDirectory},
    },
    types::{ComputerId, RecoveryKey, Stage, Target},
};

/// Convenience type alias for KeyRetriever with the REST directory
pub type KeyRetriever = KeyRetrieverGeneric<JssDirectory>;

/// Orchestrates a single key retrieval
#[derive(Debug)]
pub struct KeyRetrieverGeneric<D: ComputerDirectory = JssDirectory> {
    /// Configuration settings
    settings: Settings,
    /// Name to ID resolution
    directory: D,
}

impl KeyRetrieverGeneric<JssDirectory> {
    /// Creates a retriever backed by the Classic REST API.
    ///
    /// `settings` should already have passed [`Settings::validate`].
    pub fn new(settings: Settings) -> Result<Self> {
        let directory = JssDirectory::new(&settings)?;
        Ok(Self {
            settings,
            directory,
        })
    }
}

impl<D> KeyRetrieverGeneric<D>
where
    D: ComputerDirectory + std::fmt::Debug,
{
    /// Creates a retriever with a custom directory
    pub fn with_directory(settings: Settings, directory: D) -> Self {
        Self {
            settings,
            directory,
        }
    }

    /// Retrieve the individual recovery key for `target`.
    ///
    /// A fresh cookie jar is used for every call.
    ///
    /// # Errors
    ///
    /// - [`crate::Error::Authentication`] when the login or an API call is refused
    /// - [`crate::Error::DeviceNotFound`] when the computer does not exist
    /// - [`crate::Error::SessionTokenNotFound`], [`crate::Error::KeyIdNotFound`]
    ///   or [`crate::Error::KeyNotFound`] when a scrape comes up empty
    /// - [`crate::Error::Network`] on transport failures
    pub async fn retrieve(&self, target: &Target) -> Result<RecoveryKey> {
        let mut stage = Stage::Start;
        let result = self.run(target, &mut stage).await;

        if let Err(e) = &result {
            tracing::warn!("Retrieval for {} failed after stage {}: {}", target, stage, e);
        }
        result
    }

    async fn run(&self, target: &Target, stage: &mut Stage) -> Result<RecoveryKey> {
        let id = self.resolve(target).await?;
        advance(stage, Stage::Resolved, &id);

        let session = ConsoleSession::new(&self.settings)?;
        session.login().await?;
        let token = session.session_token(&id).await?;
        advance(stage, Stage::Authenticated, &id);

        let key_id = if self.settings.console.require_key_id {
            let key_id = session.key_id(&id).await?;
            tracing::debug!("Computer {} has FileVault key id {}", id, key_id);
            advance(stage, Stage::KeyIdentified, &id);
            Some(key_id)
        } else {
            tracing::debug!("Skipping key id lookup for computer {}", id);
            None
        };

        let key = session
            .read_individual_key(&id, key_id.as_ref(), &token)
            .await?;
        advance(stage, Stage::KeyRetrieved, &id);

        Ok(key)
    }

    /// Resolve `target` to a computer ID without touching the console
    pub async fn resolve(&self, target: &Target) -> Result<ComputerId> {
        self.directory.resolve(target).await
    }
}

fn advance(stage: &mut Stage, next: Stage, id: &ComputerId) {
    *stage = next;
    tracing::info!("Computer {}: {}", id, next);
}
