// ── Backend seam ──
//
// Everything the store layer needs from the server, as a trait object.
// `AdminClient` is the production implementation; tests substitute a
// recording fake.

use async_trait::async_trait;
use futures_util::future::BoxFuture;

use castmin_api::{AdminClient, ListParams, NewTheme};

use crate::convert::{filter_field, stat};
use crate::error::CoreError;
use crate::model::{
    Acl, AclDetails, Collection, Event, FilterField, MetadataCatalog, ResourceKind, Series, Stat,
    Theme, ThemeDetails, UploadOption, UserInfo,
};
use crate::store::SliceRecord;

#[async_trait]
pub trait AdminBackend: Send + Sync {
    async fn me(&self) -> Result<UserInfo, CoreError>;

    // ── Themes ───────────────────────────────────────────────────────
    async fn list_themes(&self, params: &ListParams) -> Result<Collection<Theme>, CoreError>;
    async fn get_theme(&self, id: i64) -> Result<ThemeDetails, CoreError>;
    async fn create_theme(&self, theme: &NewTheme) -> Result<(), CoreError>;
    async fn delete_theme(&self, id: i64) -> Result<(), CoreError>;

    // ── Events ───────────────────────────────────────────────────────
    async fn list_events(&self, params: &ListParams) -> Result<Collection<Event>, CoreError>;
    async fn delete_events(&self, ids: &[String]) -> Result<(), CoreError>;
    async fn new_event_metadata(&self) -> Result<Vec<MetadataCatalog>, CoreError>;
    async fn list_asset_upload_options(&self) -> Result<Vec<UploadOption>, CoreError>;

    // ── Series ───────────────────────────────────────────────────────
    async fn list_series(&self, params: &ListParams) -> Result<Collection<Series>, CoreError>;

    // ── ACLs ─────────────────────────────────────────────────────────
    async fn list_acls(&self, params: &ListParams) -> Result<Collection<Acl>, CoreError>;
    async fn get_acl(&self, id: i64) -> Result<AclDetails, CoreError>;
    async fn delete_acl(&self, id: i64) -> Result<(), CoreError>;

    // ── Table resources ──────────────────────────────────────────────
    async fn list_filters(&self, resource: ResourceKind) -> Result<Vec<FilterField>, CoreError>;
    /// Counter definitions ordered for display, counts still zero.
    async fn list_stat_definitions(&self) -> Result<Vec<Stat>, CoreError>;

    async fn logout(&self) -> Result<(), CoreError> {
        Ok(())
    }
}

#[async_trait]
impl AdminBackend for AdminClient {
    async fn me(&self) -> Result<UserInfo, CoreError> {
        Ok(AdminClient::me(self).await?.into())
    }

    async fn list_themes(&self, params: &ListParams) -> Result<Collection<Theme>, CoreError> {
        Ok(AdminClient::list_themes(self, params).await?.into())
    }

    async fn get_theme(&self, id: i64) -> Result<ThemeDetails, CoreError> {
        Ok(AdminClient::get_theme(self, id).await?.into())
    }

    async fn create_theme(&self, theme: &NewTheme) -> Result<(), CoreError> {
        Ok(AdminClient::create_theme(self, theme).await?)
    }

    async fn delete_theme(&self, id: i64) -> Result<(), CoreError> {
        Ok(AdminClient::delete_theme(self, id).await?)
    }

    async fn list_events(&self, params: &ListParams) -> Result<Collection<Event>, CoreError> {
        Ok(AdminClient::list_events(self, params).await?.into())
    }

    async fn delete_events(&self, ids: &[String]) -> Result<(), CoreError> {
        Ok(AdminClient::delete_events(self, ids).await?)
    }

    async fn new_event_metadata(&self) -> Result<Vec<MetadataCatalog>, CoreError> {
        let catalogs = AdminClient::new_event_metadata(self).await?;
        Ok(catalogs.into_iter().map(MetadataCatalog::from).collect())
    }

    async fn list_asset_upload_options(&self) -> Result<Vec<UploadOption>, CoreError> {
        let options = AdminClient::list_asset_upload_options(self).await?;
        Ok(options.into_iter().map(UploadOption::from).collect())
    }

    async fn list_series(&self, params: &ListParams) -> Result<Collection<Series>, CoreError> {
        Ok(AdminClient::list_series(self, params).await?.into())
    }

    async fn list_acls(&self, params: &ListParams) -> Result<Collection<Acl>, CoreError> {
        Ok(AdminClient::list_acls(self, params).await?.into())
    }

    async fn get_acl(&self, id: i64) -> Result<AclDetails, CoreError> {
        Ok(AdminClient::get_acl(self, id).await?.into())
    }

    async fn delete_acl(&self, id: i64) -> Result<(), CoreError> {
        Ok(AdminClient::delete_acl(self, id).await?)
    }

    async fn list_filters(&self, resource: ResourceKind) -> Result<Vec<FilterField>, CoreError> {
        let defs = AdminClient::list_filters(self, resource.as_str()).await?;
        Ok(defs
            .into_iter()
            .map(|(name, def)| filter_field(name, &def))
            .collect())
    }

    async fn list_stat_definitions(&self) -> Result<Vec<Stat>, CoreError> {
        let defs = AdminClient::list_stat_definitions(self).await?;
        Ok(defs.into_iter().map(|(name, def)| stat(name, def)).collect())
    }

    async fn logout(&self) -> Result<(), CoreError> {
        Ok(AdminClient::logout(self).await?)
    }
}

/// A slice record the backend can list.
pub trait Listable: SliceRecord {
    fn list<'a>(
        backend: &'a dyn AdminBackend,
        params: &'a ListParams,
    ) -> BoxFuture<'a, Result<Collection<Self>, CoreError>>;
}

impl Listable for Theme {
    fn list<'a>(
        backend: &'a dyn AdminBackend,
        params: &'a ListParams,
    ) -> BoxFuture<'a, Result<Collection<Self>, CoreError>> {
        backend.list_themes(params)
    }
}

impl Listable for Event {
    fn list<'a>(
        backend: &'a dyn AdminBackend,
        params: &'a ListParams,
    ) -> BoxFuture<'a, Result<Collection<Self>, CoreError>> {
        backend.list_events(params)
    }
}

impl Listable for Series {
    fn list<'a>(
        backend: &'a dyn AdminBackend,
        params: &'a ListParams,
    ) -> BoxFuture<'a, Result<Collection<Self>, CoreError>> {
        backend.list_series(params)
    }
}

impl Listable for Acl {
    fn list<'a>(
        backend: &'a dyn AdminBackend,
        params: &'a ListParams,
    ) -> BoxFuture<'a, Result<Collection<Self>, CoreError>> {
        backend.list_acls(params)
    }
}
