// Current-user information

use crate::client::AdminClient;
use crate::error::Error;
use crate::models::UserInfoResponse;

impl AdminClient {
    /// Identity, organization, and roles of the authenticated user.
    ///
    /// `GET /info/me.json`
    pub async fn me(&self) -> Result<UserInfoResponse, Error> {
        let url = self.url("/info/me.json")?;
        self.get_json(url, &[] as &[(&str, &str)]).await
    }
}
