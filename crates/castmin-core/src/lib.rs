// castmin-core: state store, resource slices and page orchestration.
//
// `castmin-api` speaks HTTP; this crate turns responses into typed slice
// state, exposes selectors and permission checks, and drives the pages the
// TUI renders.

pub mod backend;
pub mod config;
pub mod controller;
pub mod convert;
pub mod error;
pub mod model;
pub mod notification;
pub mod page;
pub mod params;
pub mod permission;
pub mod pointer;
pub mod poll;
pub mod selectors;
pub mod store;
pub mod table_config;

// ── Primary re-exports ──────────────────────────────────────────
pub use backend::{AdminBackend, Listable};
pub use config::{AuthCredentials, ServerConfig, TlsVerification};
pub use controller::Controller;
pub use error::{CoreError, SliceError};
pub use notification::{Notification, Severity};
pub use page::{EventsPage, ListPage};
pub use pointer::{ListenerHandle, Point, PointerHub, Region};
pub use poll::RepeatingTask;
pub use store::{AppState, FetchStatus, ResourceState, Store, Transition};
pub use table_config::Column;

// Request types callers build themselves.
pub use castmin_api::{ListParams, NewTheme};

// ── Model re-exports ────────────────────────────────────────────
pub use model::{
    Acl, AclDetails, AclEntry, Collection, Event, FilterField, MetadataCatalog, MetadataField,
    ResourceId, ResourceKind, Series, Stat, TableRecord, Theme, ThemeDetails, UploadOption,
    UserInfo,
};
