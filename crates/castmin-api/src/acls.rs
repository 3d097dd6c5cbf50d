// ACL endpoints

use tracing::debug;

use crate::client::AdminClient;
use crate::error::Error;
use crate::models::{AclDetailsResponse, AclRow, ListParams, Page};

impl AdminClient {
    /// List access-control lists.
    ///
    /// `GET /admin-ng/acl/acls.json?limit&offset&filter&sort`
    pub async fn list_acls(&self, params: &ListParams) -> Result<Page<AclRow>, Error> {
        let url = self.url("/admin-ng/acl/acls.json")?;
        debug!(?params, "listing acls");
        self.get_json(url, params).await
    }

    /// Fetch one ACL with its entries.
    ///
    /// `GET /admin-ng/acl/{id}`
    pub async fn get_acl(&self, id: i64) -> Result<AclDetailsResponse, Error> {
        let url = self.url(&format!("/admin-ng/acl/{id}"))?;
        self.get_json(url, &[] as &[(&str, &str)]).await
    }

    /// Delete an ACL.
    ///
    /// `DELETE /admin-ng/acl/{id}`
    pub async fn delete_acl(&self, id: i64) -> Result<(), Error> {
        let url = self.url(&format!("/admin-ng/acl/{id}"))?;
        debug!(id, "deleting acl");
        self.delete(url).await
    }
}
