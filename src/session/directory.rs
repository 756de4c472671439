//! Computer name resolution through the Classic REST API
//!
//! The console pages are keyed by numeric computer ID, so a name given on
//! the command line is first resolved with
//! `GET /JSSResource/computers/name/{name}`.

use async_trait::async_trait;
use reqwest::{Client, StatusCode, header::ACCEPT};
use secrecy::{ExposeSecret, SecretString};
use url::Url;

use crate::{
    Error, Result,
    config::Settings,
    types::{ComputerId, ComputerRecord, Target},
};

/// Source of computer IDs by name
#[async_trait]
pub trait ComputerDirectory: Send + Sync {
    /// Look up the ID of the computer called `name`
    async fn computer_id(&self, name: &str) -> Result<ComputerId>;

    /// Turn a [`Target`] into a computer ID, querying only for names
    async fn resolve(&self, target: &Target) -> Result<ComputerId> {
        match target {
            Target::Id(id) => Ok(id.clone()),
            Target::Name(name) => self.computer_id(name).await,
        }
    }
}

/// Classic API client authenticated with HTTP basic auth
#[derive(Debug)]
pub struct JssDirectory {
    client: Client,
    base_url: Url,
    username: String,
    password: SecretString,
}

impl JssDirectory {
    /// Create a directory client from validated settings
    pub fn new(settings: &Settings) -> Result<Self> {
        let client = Client::builder().timeout(settings.timeout()).build()?;

        Ok(Self {
            client,
            base_url: settings.base_url()?,
            username: settings.jamf.username.clone(),
            password: SecretString::from(settings.jamf.password.expose_secret().to_string()),
        })
    }

    fn lookup_url(&self, name: &str) -> Result<Url> {
        super::client::endpoint(&self.base_url, &["JSSResource", "computers", "name", name])
    }
}

#[async_trait]
impl ComputerDirectory for JssDirectory {
    async fn computer_id(&self, name: &str) -> Result<ComputerId> {
        let url = self.lookup_url(name)?;
        tracing::debug!("Resolving computer name via {}", url);

        let response = self
            .client
            .get(url)
            .basic_auth(&self.username, Some(self.password.expose_secret()))
            .header(ACCEPT, "application/json")
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::authentication(format!(
                    "REST API rejected credentials for {}",
                    self.username
                )));
            }
            StatusCode::NOT_FOUND => {
                return Err(Error::device_not_found(format!("computer named {:?}", name)));
            }
            status => {
                return Err(Error::unexpected_status("JSSResource/computers/name", status));
            }
        }

        let body = response.bytes().await?;
        let record: ComputerRecord = serde_json::from_slice(&body)
            .map_err(|e| Error::malformed(format!("computer lookup for {:?}: {}", name, e)))?;

        tracing::info!("Resolved computer {:?} to id {}", name, record.id());
        Ok(record.id().clone())
    }
}
