//! # Command Layer
//!
//! The copy/paste workflows. Each submodule holds plain functions over a [`BufferStore`],
//! the [`BufferConfig`] and, for pastes, the [`Collaborators`]. The [`crate::api::ItemBuffer`]
//! facade just threads its own state through them.
//!
//! - [`copy`]: build and store [`WidgetItem`](crate::payload::WidgetItem) /
//!   [`WidgetReference`](crate::payload::WidgetReference) payloads
//! - [`paste`]: read a payload back and insert the widget into a dashboard
//! - [`eligibility`]: what the buffer currently offers
//!
//! ## Testing Strategy
//!
//! This is where most tests live. They run against [`InMemoryStore`](crate::store::memory::InMemoryStore)
//! with [`SequentialIds`](crate::ids::SequentialIds) so ids are predictable.
//!
//! [`BufferStore`]: crate::store::BufferStore
//! [`BufferConfig`]: crate::config::BufferConfig

use crate::dashboard::{DashboardValidator, DefaultValidator, GridPlacement, LayoutPlacement};
use crate::ids::{IdGenerator, UuidIds};
use crate::model::{Dashboard, LayoutId, Widget};
use crate::payload::WidgetPosition;

pub mod copy;
pub mod eligibility;
pub mod paste;

/// Notification fired once after a paste changed the dashboard's entity aliases.
pub type AliasesChanged<'a> = Box<dyn FnOnce() + 'a>;

/// The external services a paste relies on.
#[derive(Debug, Default, Clone)]
pub struct Collaborators<G = UuidIds, V = DefaultValidator, P = GridPlacement> {
    pub ids: G,
    pub validator: V,
    pub placement: P,
}

impl<G: IdGenerator, V: DashboardValidator, P: LayoutPlacement> Collaborators<G, V, P> {
    pub fn new(ids: G, validator: V, placement: P) -> Self {
        Self {
            ids,
            validator,
            placement,
        }
    }
}

/// Where a paste should land.
#[derive(Debug, Clone, Copy)]
pub struct PasteTarget<'a> {
    pub state: &'a str,
    pub layout: LayoutId,
    /// `None` auto-places the widget
    pub position: Option<WidgetPosition>,
}

impl<'a> PasteTarget<'a> {
    pub fn new(state: &'a str, layout: LayoutId) -> Self {
        Self {
            state,
            layout,
            position: None,
        }
    }

    pub fn at(mut self, position: WidgetPosition) -> Self {
        self.position = Some(position);
        self
    }
}

/// Outcome of a paste: the updated dashboard and the widget as it now lives in it.
#[derive(Debug, Clone)]
pub struct Pasted {
    pub dashboard: Dashboard,
    pub widget: Widget,
    /// Whether the dashboard's entity aliases were replaced
    pub aliases_changed: bool,
}
