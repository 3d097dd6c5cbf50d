// Resource listing endpoints: table filters, dashboard stats, and
// upload options. Stats and upload options are served as maps whose
// values are themselves JSON documents encoded as strings.

use std::collections::BTreeMap;

use tracing::{debug, warn};

use crate::client::{AdminClient, decode};
use crate::error::Error;
use crate::models::{AssetUploadOption, FilterDefinitions, StatDefinition};

const NO_QUERY: &[(&str, &str)] = &[];

impl AdminClient {
    /// Filter definitions for a resource table (`events`, `series`,
    /// `themes`, `acls`, ...).
    ///
    /// `GET /admin-ng/resources/{resource}/filters.json`
    pub async fn list_filters(&self, resource: &str) -> Result<FilterDefinitions, Error> {
        let url = self.url(&format!("/admin-ng/resources/{resource}/filters.json"))?;
        debug!(resource, "listing filters");
        self.get_json(url, NO_QUERY).await
    }

    /// Dashboard counter definitions, keyed by name and sorted by `order`.
    ///
    /// `GET /admin-ng/resources/STATS.json`
    pub async fn list_stat_definitions(&self) -> Result<Vec<(String, StatDefinition)>, Error> {
        let url = self.url("/admin-ng/resources/STATS.json")?;
        let raw: BTreeMap<String, String> = self.get_json(url, NO_QUERY).await?;

        let mut stats = raw
            .into_iter()
            .map(|(name, encoded)| decode::<StatDefinition>(&encoded).map(|def| (name, def)))
            .collect::<Result<Vec<_>, _>>()?;
        stats.sort_by_key(|(_, def)| def.order);
        Ok(stats)
    }

    /// Upload options offered by the new-event wizard.
    ///
    /// `GET /admin-ng/resources/eventUploadAssetOptions.json`. Entries
    /// that do not decode as an option (workflow hints and the like) are
    /// skipped.
    pub async fn list_asset_upload_options(&self) -> Result<Vec<AssetUploadOption>, Error> {
        let url = self.url("/admin-ng/resources/eventUploadAssetOptions.json")?;
        let raw: BTreeMap<String, String> = self.get_json(url, NO_QUERY).await?;

        let mut options: Vec<AssetUploadOption> = raw
            .into_iter()
            .filter_map(|(key, encoded)| match decode::<AssetUploadOption>(&encoded) {
                Ok(mut option) => {
                    if option.title.is_none() {
                        option.title = Some(key);
                    }
                    Some(option)
                }
                Err(e) => {
                    warn!(%key, error = %e, "skipping upload option");
                    None
                }
            })
            .collect();
        options.sort_by_key(|o| o.display_order.unwrap_or(i32::MAX));
        Ok(options)
    }
}
