//! Screen implementations. Each screen is a top-level Component wrapping
//! one core page.

mod common;
mod events;
mod list;

use castmin_core::page::{AclRowActions, ThemeRowActions};
use castmin_core::{Controller, EventsPage, ListPage, PointerHub};

use crate::component::Component;
use crate::screen::ScreenId;

use events::EventsScreen;
use list::ListScreen;

/// Build every screen over one shared controller.
pub fn create_screens(
    controller: &Controller,
    pointer: &PointerHub,
    new_event_key: char,
) -> Vec<(ScreenId, Box<dyn Component>)> {
    vec![
        (
            ScreenId::Events,
            Box::new(EventsScreen::new(
                EventsPage::new(controller.clone(), pointer.clone()),
                new_event_key,
            )),
        ),
        (
            ScreenId::Themes,
            Box::new(ListScreen::new(
                ScreenId::Themes,
                ListPage::new(ScreenId::Themes.resource(), controller.clone()),
                ThemeRowActions,
            )),
        ),
        (
            ScreenId::Acls,
            Box::new(ListScreen::new(
                ScreenId::Acls,
                ListPage::new(ScreenId::Acls.resource(), controller.clone()),
                AclRowActions,
            )),
        ),
    ]
}
