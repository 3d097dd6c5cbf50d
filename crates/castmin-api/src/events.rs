// Event endpoints

use tracing::debug;

use crate::client::AdminClient;
use crate::error::Error;
use crate::models::{EventRow, ListParams, MetadataCatalog, Page};

impl AdminClient {
    /// List events.
    ///
    /// `GET /admin-ng/event/events.json?limit&offset&filter&sort`
    pub async fn list_events(&self, params: &ListParams) -> Result<Page<EventRow>, Error> {
        let url = self.url("/admin-ng/event/events.json")?;
        debug!(?params, "listing events");
        self.get_json(url, params).await
    }

    /// Delete several events at once.
    ///
    /// `POST /admin-ng/event/deleteEvents` with a JSON array of ids.
    pub async fn delete_events(&self, ids: &[String]) -> Result<(), Error> {
        let url = self.url("/admin-ng/event/deleteEvents")?;
        debug!(count = ids.len(), "deleting events");
        self.post_json(url, ids).await
    }

    /// Metadata catalogs (with field definitions) for the new-event wizard.
    ///
    /// `GET /admin-ng/event/new/metadata`
    pub async fn new_event_metadata(&self) -> Result<Vec<MetadataCatalog>, Error> {
        let url = self.url("/admin-ng/event/new/metadata")?;
        self.get_json(url, &[] as &[(&str, &str)]).await
    }
}
