// Admin API HTTP client
//
// Wraps `reqwest::Client` with admin-ng URL construction, status
// checking, and body decoding. Endpoint groups (themes, events, acls,
// ...) are implemented as inherent methods in separate files to keep
// this module focused on transport mechanics.

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

use crate::error::Error;
use crate::transport::TransportConfig;

/// Raw HTTP client for the Opencast admin-ng REST API.
///
/// Session state lives in the cookie jar of the underlying
/// `reqwest::Client`; after [`login`](Self::login) every request is
/// authenticated automatically.
#[derive(Clone)]
pub struct AdminClient {
    http: reqwest::Client,
    base_url: Url,
}

impl AdminClient {
    /// Create a new admin client with its own session cookie jar.
    pub fn new(base_url: Url, transport: &TransportConfig) -> Result<Self, Error> {
        let http = transport.build_client()?;
        Ok(Self { http, base_url })
    }

    /// Create an admin client with a pre-built `reqwest::Client`.
    pub fn with_client(http: reqwest::Client, base_url: Url) -> Self {
        Self { http, base_url }
    }

    /// Convenience constructor for tests and tools: parse `base` and use
    /// the given client as-is.
    pub fn from_reqwest(base: &str, http: reqwest::Client) -> Result<Self, Error> {
        let base_url = Url::parse(base)?;
        Ok(Self::with_client(http, base_url))
    }

    /// The underlying HTTP client (for auth flows that need direct access).
    pub fn http(&self) -> &reqwest::Client {
        &self.http
    }

    /// The server base URL.
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    // ── URL builders ─────────────────────────────────────────────────

    /// Resolve an absolute server path (e.g. `/admin-ng/themes`) against
    /// the base URL.
    pub(crate) fn url(&self, path: &str) -> Result<Url, Error> {
        Ok(self.base_url.join(path)?)
    }

    // ── Request helpers ──────────────────────────────────────────────

    /// Send a GET request with query parameters and decode the JSON body.
    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        url: Url,
        query: &(impl Serialize + ?Sized),
    ) -> Result<T, Error> {
        debug!("GET {}", url);

        let resp = self.http.get(url).query(query).send().await?;
        let body = Self::checked_body(resp).await?;
        decode(&body)
    }

    /// Send a form-encoded POST request, discarding the response body.
    pub(crate) async fn post_form(
        &self,
        url: Url,
        form: &(impl Serialize + ?Sized),
    ) -> Result<(), Error> {
        debug!("POST {} (form)", url);

        let resp = self.http.post(url).form(form).send().await?;
        Self::checked_body(resp).await.map(drop)
    }

    /// Send a JSON POST request, discarding the response body.
    pub(crate) async fn post_json(
        &self,
        url: Url,
        body: &(impl Serialize + ?Sized),
    ) -> Result<(), Error> {
        debug!("POST {} (json)", url);

        let resp = self.http.post(url).json(body).send().await?;
        Self::checked_body(resp).await.map(drop)
    }

    /// Send a DELETE request, discarding the response body.
    pub(crate) async fn delete(&self, url: Url) -> Result<(), Error> {
        debug!("DELETE {}", url);

        let resp = self.http.delete(url).send().await?;
        Self::checked_body(resp).await.map(drop)
    }

    /// Read the body of a response, mapping non-success statuses to errors.
    async fn checked_body(resp: reqwest::Response) -> Result<String, Error> {
        let status = resp.status();

        if status == reqwest::StatusCode::UNAUTHORIZED {
            return Err(Error::SessionExpired);
        }

        let body = resp.text().await?;

        if !status.is_success() {
            return Err(Error::Http {
                status: status.as_u16(),
                message: if body.is_empty() {
                    status.canonical_reason().unwrap_or("request failed").to_owned()
                } else {
                    body
                },
            });
        }

        Ok(body)
    }
}

/// Decode a JSON body, keeping the raw text on failure.
pub(crate) fn decode<T: DeserializeOwned>(body: &str) -> Result<T, Error> {
    serde_json::from_str(body).map_err(|e| Error::Deserialization {
        message: e.to_string(),
        body: body.to_owned(),
    })
}
