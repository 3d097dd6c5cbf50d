// Admin API wire types
//
// Serde mirrors of the admin-ng JSON payloads. Field names follow the
// server exactly (a mix of camelCase and snake_case); unknown fields are
// ignored and optional ones default so that partial rows still decode.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

// ── Paging ──────────────────────────────────────────────────────────

/// Paged list envelope returned by every `*.json` list endpoint.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct Page<T> {
    #[serde(default)]
    pub total: usize,
    #[serde(default)]
    pub count: usize,
    #[serde(default)]
    pub offset: usize,
    #[serde(default)]
    pub limit: usize,
    #[serde(default = "Vec::new")]
    pub results: Vec<T>,
}

/// Query parameters shared by all list endpoints.
///
/// `filter` is a comma-separated list of `name:value` pairs and `sort` is
/// `field:ASC` or `field:DESC`. Empty values are omitted from the query.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ListParams {
    pub limit: usize,
    pub offset: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub filter: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sort: Option<String>,
}

// ── Themes ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeRow {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub usage: Option<u64>,
}

/// Full theme record from `GET /admin-ng/themes/{id}.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ThemeDetailsResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub creator: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub default: bool,
    #[serde(default)]
    pub bumper_active: bool,
    #[serde(default)]
    pub trailer_active: bool,
    #[serde(default)]
    pub title_slide_active: bool,
    #[serde(default)]
    pub license_slide_active: bool,
    #[serde(default)]
    pub watermark_active: bool,
    #[serde(default)]
    pub watermark_position: Option<String>,
}

// ── Events ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeriesRef {
    pub id: String,
    #[serde(default)]
    pub title: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct EventRow {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub presenters: Vec<String>,
    #[serde(default)]
    pub series: Option<SeriesRef>,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub end_date: Option<String>,
    #[serde(default)]
    pub technical_start: Option<String>,
    #[serde(default)]
    pub technical_end: Option<String>,
    #[serde(default)]
    pub event_status: Option<String>,
    #[serde(default)]
    pub displayable_status: Option<String>,
    #[serde(default)]
    pub has_comments: bool,
    #[serde(default)]
    pub has_open_comments: bool,
    #[serde(default)]
    pub needs_cutting: bool,
}

// ── Series ──────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeriesRow {
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub organizers: Vec<String>,
    #[serde(default)]
    pub contributors: Vec<String>,
    #[serde(default, rename = "createdBy")]
    pub created_by: Option<String>,
    #[serde(default)]
    pub creation_date: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub license: Option<String>,
}

// ── ACLs ────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AclRow {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct AceEntry {
    pub role: String,
    pub action: String,
    #[serde(default)]
    pub allow: bool,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct AccessControlList {
    #[serde(default)]
    pub ace: Vec<AceEntry>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AclDetailsResponse {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub organization_id: Option<String>,
    #[serde(default)]
    pub acl: AccessControlList,
}

// ── Resources: filters, stats, upload options ───────────────────────

/// One filter definition from `/admin-ng/resources/{resource}/filters.json`.
///
/// `options` is left as raw JSON: depending on the filter it is a map of
/// value → label, a list, or absent (free-form filters).
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct FilterDefinition {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub label: String,
    #[serde(default)]
    pub options: Option<serde_json::Value>,
    #[serde(default)]
    pub translatable: bool,
}

/// Filters keyed by name.
pub type FilterDefinitions = BTreeMap<String, FilterDefinition>;

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatFilter {
    pub name: String,
    #[serde(default)]
    pub filter: String,
    pub value: String,
}

/// A dashboard counter definition. The server ships these as
/// JSON-encoded strings inside `STATS.json`.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct StatDefinition {
    #[serde(default)]
    pub filters: Vec<StatFilter>,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub order: i32,
}

/// A single upload option for new events, decoded from the
/// JSON-encoded values of `eventUploadAssetOptions.json`.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AssetUploadOption {
    #[serde(default)]
    pub id: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub flavor_type: Option<String>,
    #[serde(default)]
    pub flavor_subtype: Option<String>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub display_order: Option<i32>,
    #[serde(default)]
    pub accept: Option<String>,
    #[serde(default)]
    pub multiple: bool,
}

// ── Event metadata ──────────────────────────────────────────────────

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MetadataField {
    pub id: String,
    #[serde(default)]
    pub label: String,
    #[serde(default, rename = "type")]
    pub kind: String,
    #[serde(default)]
    pub read_only: bool,
    #[serde(default)]
    pub required: bool,
    #[serde(default)]
    pub value: serde_json::Value,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct MetadataCatalog {
    pub flavor: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub fields: Vec<MetadataField>,
}

// ── Current user ────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct UserRecord {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub provider: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct OrganizationRecord {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
}

/// `GET /info/me.json`
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserInfoResponse {
    #[serde(default)]
    pub user: UserRecord,
    #[serde(default)]
    pub org: OrganizationRecord,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub user_role: Option<String>,
}
