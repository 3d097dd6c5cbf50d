// Series endpoints

use tracing::debug;

use crate::client::AdminClient;
use crate::error::Error;
use crate::models::{ListParams, Page, SeriesRow};

impl AdminClient {
    /// List series.
    ///
    /// `GET /admin-ng/series/series.json?limit&offset&filter&sort`
    pub async fn list_series(&self, params: &ListParams) -> Result<Page<SeriesRow>, Error> {
        let url = self.url("/admin-ng/series/series.json")?;
        debug!(?params, "listing series");
        self.get_json(url, params).await
    }
}
