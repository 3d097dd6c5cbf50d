// Session authentication
//
// Form-based login against the Spring Security endpoint. The server sets
// a session cookie in the client's jar; subsequent requests use that
// cookie automatically.

use secrecy::{ExposeSecret, SecretString};
use tracing::debug;

use crate::client::AdminClient;
use crate::error::Error;

const LOGIN_PATH: &str = "/admin-ng/j_spring_security_check";
const LOGOUT_PATH: &str = "/j_spring_security_logout";

impl AdminClient {
    /// Authenticate with username/password.
    ///
    /// `POST /admin-ng/j_spring_security_check` with `j_username` and
    /// `j_password`. A failed login redirects to the login page with an
    /// `error` query parameter, so the final URL is checked as well as the
    /// status.
    pub async fn login(&self, username: &str, password: &SecretString) -> Result<(), Error> {
        let url = self.url(LOGIN_PATH)?;
        debug!("logging in at {}", url);

        let form = [
            ("j_username", username),
            ("j_password", password.expose_secret()),
            ("_spring_security_remember_me", "on"),
        ];

        let resp = self.http().post(url).form(&form).send().await?;

        let status = resp.status();
        let rejected = resp.url().query_pairs().any(|(k, _)| k == "error");
        if !status.is_success() || rejected {
            let body = resp.text().await.unwrap_or_default();
            return Err(Error::Authentication {
                message: format!("login failed (HTTP {status}): {body}"),
            });
        }

        debug!("login successful");
        Ok(())
    }

    /// End the current session.
    pub async fn logout(&self) -> Result<(), Error> {
        let url = self.url(LOGOUT_PATH)?;
        debug!("logging out at {}", url);

        let _resp = self.http().get(url).send().await?;

        debug!("logout complete");
        Ok(())
    }
}
