//! Reusable widgets shared by the screens.

pub mod modal;
pub mod resource_table;
pub mod toasts;
