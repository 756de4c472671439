//! Cookie-bound client for the JSS web console
//!
//! Every request made while bootstrapping a session goes through the same
//! [`reqwest::cookie::Jar`], so the login cookie set by the failover page is
//! presented to the legacy inventory page and to `computers.ajax`.

use reqwest::{
    Client, StatusCode,
    cookie::Jar,
    header::{ACCEPT, ACCEPT_LANGUAGE, CONTENT_TYPE, ORIGIN, REFERER, USER_AGENT},
};
use secrecy::{ExposeSecret, SecretString};
use std::sync::Arc;
use url::{Url, form_urlencoded};

use super::scrape;
use crate::{
    Error, Result,
    config::{Settings, settings::ConsoleSettings},
    types::{ComputerId, KeyId, RecoveryKey, SessionToken},
};

const FORM_CONTENT_TYPE: &str = "application/x-www-form-urlencoded; charset=UTF-8";
const BROWSER_ACCEPT_LANGUAGE: &str = "en-US,en;q=0.9";
const READ_KEY_ACTION: &str = "AJAX_ACTION_READ_FILE_VAULT_2_KEY";
const INDIVIDUAL_KEY_FIELD: &str = "FIELD_FILEVAULT2_INDIVIDUAL_KEY";

/// Append `segments` to the path of `base`, dropping any query or fragment.
///
/// Each segment is percent-encoded on its own, so a `/` inside a segment
/// does not start a new one.
pub fn endpoint(base: &Url, segments: &[&str]) -> Result<Url> {
    let mut url = base.clone();
    url.set_query(None);
    url.set_fragment(None);
    url.path_segments_mut()
        .map_err(|_| Error::config(format!("{} cannot be used as a base URL", base)))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

/// Browser-like session against the legacy console
#[derive(Debug)]
pub struct ConsoleSession {
    client: Client,
    cookies: Arc<Jar>,
    base_url: Url,
    username: String,
    password: SecretString,
    console: ConsoleSettings,
}

impl ConsoleSession {
    /// Create a session with a fresh cookie jar
    pub fn new(settings: &Settings) -> Result<Self> {
        Self::with_cookies(settings, Arc::new(Jar::default()))
    }

    /// Create a session that reads and writes `cookies`
    pub fn with_cookies(settings: &Settings, cookies: Arc<Jar>) -> Result<Self> {
        let client = Client::builder()
            .cookie_provider(Arc::clone(&cookies))
            .user_agent(settings.console.user_agent.clone())
            .timeout(settings.timeout())
            .build()?;

        Ok(Self {
            client,
            cookies,
            base_url: settings.base_url()?,
            username: settings.jamf.username.clone(),
            password: SecretString::from(settings.jamf.password.expose_secret().to_string()),
            console: settings.console.clone(),
        })
    }

    /// Cookie store shared by every request of this session
    pub fn cookies(&self) -> &Arc<Jar> {
        &self.cookies
    }

    /// Submit the login form on the failover page.
    ///
    /// Anything other than a final 200 is treated as rejected credentials.
    pub async fn login(&self) -> Result<()> {
        let mut url = endpoint(&self.base_url, &[""])?;
        url.set_query(Some("failover"));
        tracing::debug!("Submitting login form to {}", url);

        let response = self
            .client
            .post(url)
            .form(&[
                ("username", self.username.as_str()),
                ("password", self.password.expose_secret()),
                ("resetUsername", ""),
            ])
            .send()
            .await?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(Error::authentication(format!(
                "login for {} returned {}",
                self.username, status
            )));
        }

        Ok(())
    }

    /// Fetch `legacy/computers.html` for `id` in the configured view.
    ///
    /// The body is decoded as UTF-8 (lossily) whatever charset the
    /// response declares.
    pub async fn inventory_page(&self, id: &ComputerId) -> Result<String> {
        let mut url = endpoint(&self.base_url, &["legacy", "computers.html"])?;
        url.query_pairs_mut()
            .append_pair("id", id.as_str())
            .append_pair("o", "r")
            .append_pair("v", self.console.view.as_query());
        tracing::debug!("Fetching inventory page {}", url);

        let response = self.client.get(url).send().await?;
        match response.status() {
            status if status.is_success() => {
                Ok(String::from_utf8_lossy(&response.bytes().await?).into_owned())
            }
            StatusCode::NOT_FOUND => Err(Error::device_not_found(format!("computer id {}", id))),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => Err(Error::authentication(
                format!("inventory page for computer {} was refused", id),
            )),
            status => Err(Error::unexpected_status("legacy/computers.html", status)),
        }
    }

    /// Scrape the anti-forgery token from the inventory page
    pub async fn session_token(&self, id: &ComputerId) -> Result<SessionToken> {
        let page = self.inventory_page(id).await?;
        scrape::extract_session_token(&page)
    }

    /// Scrape the FileVault key identifier from the inventory page
    pub async fn key_id(&self, id: &ComputerId) -> Result<KeyId> {
        let page = self.inventory_page(id).await?;
        scrape::extract_key_id(&page)
    }

    /// Replay the console's "show key" ajax call and read the key from
    /// the XML reply.
    pub async fn read_individual_key(
        &self,
        id: &ComputerId,
        key_id: Option<&KeyId>,
        token: &SessionToken,
    ) -> Result<RecoveryKey> {
        let mut url = endpoint(&self.base_url, &["computers.ajax"])?;
        url.query_pairs_mut()
            .append_pair("id", id.as_str())
            .append_pair("o", "r");

        let mut referer = endpoint(&self.base_url, &["legacy", "computers.html"])?;
        referer
            .query_pairs_mut()
            .append_pair("id", id.as_str())
            .append_pair("o", "r");

        let body = read_key_form(key_id, token);
        tracing::debug!("Requesting individual key via {}", url);

        let response = self
            .client
            .post(url)
            .header("X-Requested-With", "XMLHttpRequest")
            .header(ORIGIN, self.base_url.origin().ascii_serialization())
            .header(CONTENT_TYPE, FORM_CONTENT_TYPE)
            .header(ACCEPT, "*/*")
            .header(ACCEPT_LANGUAGE, BROWSER_ACCEPT_LANGUAGE)
            .header(USER_AGENT, self.console.user_agent.as_str())
            .header(REFERER, referer.as_str())
            .body(body)
            .send()
            .await?;

        match response.status() {
            status if status.is_success() => {}
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                return Err(Error::authentication("key read was refused by the console"));
            }
            status => return Err(Error::unexpected_status("computers.ajax", status)),
        }

        let xml = response.bytes().await?;
        scrape::extract_individual_key(&String::from_utf8_lossy(&xml))
    }
}

/// Form body of the "read FileVault 2 key" ajax action
fn read_key_form(key_id: Option<&KeyId>, token: &SessionToken) -> String {
    let mut form = form_urlencoded::Serializer::new(String::new());
    if let Some(key_id) = key_id {
        form.append_pair("fileVaultKeyId", key_id.as_str());
    }
    form.append_pair("fileVaultKeyType", "individualKey")
        .append_pair("identifier", INDIVIDUAL_KEY_FIELD)
        .append_pair("ajaxAction", READ_KEY_ACTION)
        .append_pair("session-token", token.as_str());
    form.finish()
}
