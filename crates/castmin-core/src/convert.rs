// ── API-to-domain type conversions ──
//
// Bridges raw `castmin_api` response types into canonical
// `castmin_core::model` types. Dates are parsed into `DateTime<Utc>`
// where possible; unparseable values are dropped rather than failing
// the whole page.

use chrono::{DateTime, Utc};
use serde_json::Value;

use castmin_api::models::{
    AclDetailsResponse, AclRow, AssetUploadOption, EventRow, FilterDefinition, Page, SeriesRow,
    StatDefinition, ThemeDetailsResponse, ThemeRow, UserInfoResponse,
};
use castmin_api::models::{
    MetadataCatalog as ApiMetadataCatalog, MetadataField as ApiMetadataField,
};

use crate::model::{
    Acl, AclDetails, AclEntry, Collection, Event, FilterField, MetadataCatalog, MetadataField,
    ResourceId, Series, Stat, Theme, ThemeDetails, UploadOption, UserInfo,
};

// ── Helpers ────────────────────────────────────────────────────────

/// Parse an RFC 3339 timestamp as returned by the list endpoints.
fn parse_datetime(raw: Option<&str>) -> Option<DateTime<Utc>> {
    raw.and_then(|s| DateTime::parse_from_rfc3339(s).ok())
        .map(|dt| dt.with_timezone(&Utc))
}

/// Flatten filter options into `(value, label)` pairs.
///
/// Objects map value to label, arrays list values that double as labels.
fn filter_options(raw: Option<&Value>) -> Vec<(String, String)> {
    fn text(v: &Value) -> String {
        match v {
            Value::String(s) => s.clone(),
            other => other.to_string(),
        }
    }

    match raw {
        Some(Value::Object(map)) => map.iter().map(|(k, v)| (k.clone(), text(v))).collect(),
        Some(Value::Array(items)) => items
            .iter()
            .map(|v| {
                let t = text(v);
                (t.clone(), t)
            })
            .collect(),
        _ => Vec::new(),
    }
}

// ── Pages ──────────────────────────────────────────────────────────

impl<T, U: From<T>> From<Page<T>> for Collection<U> {
    fn from(page: Page<T>) -> Self {
        Collection {
            total: page.total,
            count: page.count,
            offset: page.offset,
            limit: page.limit,
            results: page.results.into_iter().map(U::from).collect(),
        }
    }
}

// ── Rows ───────────────────────────────────────────────────────────

impl From<ThemeRow> for Theme {
    fn from(row: ThemeRow) -> Self {
        Self {
            id: ResourceId::Numeric(row.id),
            creation_date: parse_datetime(row.creation_date.as_deref()),
            name: row.name,
            description: row.description.filter(|d| !d.is_empty()),
            creator: row.creator,
            default: row.default,
            usage: row.usage,
        }
    }
}

impl From<ThemeDetailsResponse> for ThemeDetails {
    fn from(resp: ThemeDetailsResponse) -> Self {
        Self {
            id: ResourceId::Numeric(resp.id),
            name: resp.name,
            description: resp.description.filter(|d| !d.is_empty()),
            creator: resp.creator,
            default: resp.default,
            bumper_active: resp.bumper_active,
            trailer_active: resp.trailer_active,
            title_slide_active: resp.title_slide_active,
            license_slide_active: resp.license_slide_active,
            watermark_active: resp.watermark_active,
            watermark_position: resp.watermark_position,
        }
    }
}

impl From<EventRow> for Event {
    fn from(row: EventRow) -> Self {
        let (series_id, series_name) = match row.series {
            Some(s) => (Some(s.id), s.title),
            None => (None, None),
        };

        Self {
            id: ResourceId::Text(row.id),
            title: row.title,
            presenters: row.presenters,
            series_id,
            series_name,
            location: row.location.filter(|l| !l.is_empty()),
            start: parse_datetime(row.start_date.as_deref()),
            end: parse_datetime(row.end_date.as_deref()),
            technical_start: parse_datetime(row.technical_start.as_deref()),
            technical_end: parse_datetime(row.technical_end.as_deref()),
            status: row.event_status,
            displayable_status: row.displayable_status,
            has_comments: row.has_comments,
            has_open_comments: row.has_open_comments,
            needs_cutting: row.needs_cutting,
        }
    }
}

impl From<SeriesRow> for Series {
    fn from(row: SeriesRow) -> Self {
        Self {
            id: ResourceId::Text(row.id),
            creation_date: parse_datetime(row.creation_date.as_deref()),
            title: row.title,
            organizers: row.organizers,
            contributors: row.contributors,
            created_by: row.created_by,
            language: row.language,
            license: row.license,
        }
    }
}

impl From<AclRow> for Acl {
    fn from(row: AclRow) -> Self {
        Self {
            id: ResourceId::Numeric(row.id),
            name: row.name,
        }
    }
}

impl From<AclDetailsResponse> for AclDetails {
    fn from(resp: AclDetailsResponse) -> Self {
        Self {
            id: ResourceId::Numeric(resp.id),
            name: resp.name,
            organization: resp.organization_id,
            entries: resp
                .acl
                .ace
                .into_iter()
                .map(|ace| AclEntry {
                    role: ace.role,
                    action: ace.action,
                    allow: ace.allow,
                })
                .collect(),
        }
    }
}

// ── Supporting resources ───────────────────────────────────────────

impl From<UserInfoResponse> for UserInfo {
    fn from(resp: UserInfoResponse) -> Self {
        Self {
            username: resp.user.username,
            name: resp.user.name.filter(|n| !n.is_empty()),
            organization: resp.org.name.or(Some(resp.org.id)).filter(|o| !o.is_empty()),
            roles: resp.roles.into_iter().collect(),
        }
    }
}

/// Build a filter field from its name and server definition.
pub(crate) fn filter_field(name: String, def: &FilterDefinition) -> FilterField {
    FilterField {
        label: if def.label.is_empty() {
            name.clone()
        } else {
            def.label.clone()
        },
        name,
        kind: def.kind.clone(),
        options: filter_options(def.options.as_ref()),
        value: None,
    }
}

/// Build a stat counter (count still zero) from its definition.
pub(crate) fn stat(name: String, def: StatDefinition) -> Stat {
    Stat {
        name,
        description: def.description,
        filters: def
            .filters
            .into_iter()
            .map(|f| (f.name, f.value))
            .collect(),
        count: 0,
        order: def.order,
    }
}

impl From<ApiMetadataField> for MetadataField {
    fn from(f: ApiMetadataField) -> Self {
        Self {
            id: f.id,
            label: f.label,
            kind: f.kind,
            read_only: f.read_only,
            required: f.required,
            value: f.value,
        }
    }
}

impl From<ApiMetadataCatalog> for MetadataCatalog {
    fn from(c: ApiMetadataCatalog) -> Self {
        Self {
            flavor: c.flavor,
            title: c.title,
            fields: c.fields.into_iter().map(MetadataField::from).collect(),
        }
    }
}

impl From<AssetUploadOption> for UploadOption {
    fn from(o: AssetUploadOption) -> Self {
        let flavor = match (o.flavor_type, o.flavor_subtype) {
            (Some(t), Some(s)) => Some(format!("{t}/{s}")),
            (Some(t), None) => Some(t),
            _ => None,
        };
        Self {
            title: o.title.unwrap_or_else(|| o.id.clone()),
            id: o.id,
            kind: o.kind,
            flavor,
            accept: o.accept,
            multiple: o.multiple,
            display_order: o.display_order.unwrap_or(i32::MAX),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use crate::model::TableRecord;
    use pretty_assertions::assert_eq;

    #[test]
    fn event_row_converts_series_and_dates() {
        let row: EventRow = serde_json::from_value(serde_json::json!({
            "id": "e-1",
            "title": "Intro lecture",
            "presenters": ["Ada", "Grace"],
            "series": {"id": "s-1", "title": "CS101"},
            "technical_start": "2024-03-01T09:15:00Z",
            "technical_end": "2024-03-01T10:45:00Z",
            "event_status": "EVENTS.EVENTS.STATUS.PROCESSED"
        }))
        .unwrap();

        let event = Event::from(row);
        assert_eq!(event.id, ResourceId::Text("e-1".into()));
        assert_eq!(event.cell("presenter"), "Ada, Grace");
        assert_eq!(event.cell("series_name"), "CS101");
        assert_eq!(event.cell("technical_date"), "2024-03-01");
        assert_eq!(event.cell("technical_start"), "09:15");
        assert_eq!(event.cell("technical_end"), "10:45");
        assert_eq!(event.cell("event_status"), "PROCESSED");
    }

    #[test]
    fn bad_dates_are_dropped() {
        let row: ThemeRow = serde_json::from_value(serde_json::json!({
            "id": 4, "name": "Plain", "creationDate": "yesterday"
        }))
        .unwrap();
        let theme = Theme::from(row);
        assert!(theme.creation_date.is_none());
        assert_eq!(theme.id.as_numeric(), Some(4));
    }

    #[test]
    fn filter_options_accept_maps_and_lists() {
        let def: FilterDefinition = serde_json::from_value(serde_json::json!({
            "type": "select",
            "label": "FILTERS.EVENTS.STATUS.LABEL",
            "options": {"EVENTS.EVENTS.STATUS.SCHEDULED": "Scheduled"}
        }))
        .unwrap();
        let field = filter_field("status".into(), &def);
        assert_eq!(
            field.options,
            vec![("EVENTS.EVENTS.STATUS.SCHEDULED".to_owned(), "Scheduled".to_owned())]
        );

        let listed = filter_options(Some(&serde_json::json!(["a", "b"])));
        assert_eq!(listed[1], ("b".to_owned(), "b".to_owned()));
    }

    #[test]
    fn page_counters_survive_conversion() {
        let page = Page {
            total: 25,
            count: 1,
            offset: 10,
            limit: 10,
            results: vec![AclRow { id: 1, name: "public".into() }],
        };
        let collection: Collection<Acl> = page.into();
        assert_eq!(collection.total, 25);
        assert_eq!(collection.results[0].name, "public");
    }
}
