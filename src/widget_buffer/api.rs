//! # API Facade
//!
//! [`ItemBuffer`] is the single entry point for buffer operations, whatever the UI. It owns
//! the store, the configuration and the paste [`Collaborators`], and forwards each call to
//! the command layer.
//!
//! ## What the API Does NOT Do
//!
//! - **Business logic**: that belongs in `commands/*.rs`
//! - **I/O beyond the store**: no stdout, stderr or dashboard files
//!
//! ## Generic Over BufferStore
//!
//! - Production: `ItemBuffer<FileStore>`
//! - Testing: `ItemBuffer<InMemoryStore, SequentialIds>`
//!
//! ## Testing Strategy
//!
//! API tests check that each method reaches the right command with the facade's own
//! config and collaborators. Command behavior is tested in the command modules.

use crate::commands::{self, AliasesChanged, Collaborators, PasteTarget, Pasted};
use crate::config::BufferConfig;
use crate::dashboard::{DashboardValidator, DefaultValidator, GridPlacement, LayoutPlacement};
use crate::error::Result;
use crate::ids::{IdGenerator, UuidIds};
use crate::model::{Dashboard, LayoutId, Widget};
use crate::payload::WidgetItem;
use crate::store::{clear_payload, BufferSlot, BufferStore};

pub use crate::commands::paste::Insertion;

pub struct ItemBuffer<S, G = UuidIds, V = DefaultValidator, P = GridPlacement>
where
    S: BufferStore,
{
    store: S,
    config: BufferConfig,
    tools: Collaborators<G, V, P>,
}

impl<S: BufferStore> ItemBuffer<S> {
    /// A buffer over `store` with the default configuration and collaborators.
    pub fn new(store: S) -> Self {
        Self {
            store,
            config: BufferConfig::default(),
            tools: Collaborators::default(),
        }
    }
}

impl<S, G, V, P> ItemBuffer<S, G, V, P>
where
    S: BufferStore,
    G: IdGenerator,
    V: DashboardValidator,
    P: LayoutPlacement,
{
    pub fn with_config(mut self, config: BufferConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_ids<G2: IdGenerator>(self, ids: G2) -> ItemBuffer<S, G2, V, P> {
        ItemBuffer {
            store: self.store,
            config: self.config,
            tools: Collaborators::new(ids, self.tools.validator, self.tools.placement),
        }
    }

    pub fn with_validator<V2: DashboardValidator>(self, validator: V2) -> ItemBuffer<S, G, V2, P> {
        ItemBuffer {
            store: self.store,
            config: self.config,
            tools: Collaborators::new(self.tools.ids, validator, self.tools.placement),
        }
    }

    pub fn with_placement<P2: LayoutPlacement>(self, placement: P2) -> ItemBuffer<S, G, V, P2> {
        ItemBuffer {
            store: self.store,
            config: self.config,
            tools: Collaborators::new(self.tools.ids, self.tools.validator, placement),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn config(&self) -> &BufferConfig {
        &self.config
    }

    pub fn prepare_widget_item(
        &self,
        dashboard: &Dashboard,
        source_state: &str,
        source_layout: LayoutId,
        widget: &Widget,
    ) -> Result<WidgetItem> {
        commands::copy::prepare_widget_item(dashboard, source_state, source_layout, widget)
    }

    pub fn copy_widget(
        &mut self,
        dashboard: &Dashboard,
        source_state: &str,
        source_layout: LayoutId,
        widget: &Widget,
    ) -> Result<()> {
        commands::copy::copy_widget(
            &mut self.store,
            &self.config,
            dashboard,
            source_state,
            source_layout,
            widget,
        )
    }

    pub fn copy_widget_reference(
        &mut self,
        dashboard: &Dashboard,
        source_state: &str,
        source_layout: LayoutId,
        widget: &Widget,
    ) -> Result<()> {
        commands::copy::copy_widget_reference(
            &mut self.store,
            &self.config,
            dashboard,
            source_state,
            source_layout,
            widget,
        )
    }

    pub fn has_widget(&self) -> Result<bool> {
        commands::eligibility::has_widget(&self.store, &self.config)
    }

    pub fn has_widget_reference(&self) -> Result<bool> {
        commands::eligibility::has_widget_reference(&self.store, &self.config)
    }

    pub fn can_paste_widget_reference(
        &mut self,
        dashboard: &Dashboard,
        state: &str,
        layout: LayoutId,
    ) -> Result<bool> {
        commands::eligibility::can_paste_widget_reference(
            &mut self.store,
            &self.config,
            dashboard,
            state,
            layout,
        )
    }

    pub fn paste_widget(
        &mut self,
        dashboard: Dashboard,
        target: PasteTarget<'_>,
        on_aliases_changed: Option<AliasesChanged<'_>>,
    ) -> Result<Pasted> {
        commands::paste::paste_widget(
            &mut self.store,
            &self.config,
            &mut self.tools,
            dashboard,
            target,
            on_aliases_changed,
        )
    }

    pub fn paste_widget_reference(
        &mut self,
        dashboard: Dashboard,
        target: PasteTarget<'_>,
    ) -> Result<Pasted> {
        commands::paste::paste_widget_reference(
            &mut self.store,
            &self.config,
            &mut self.tools,
            dashboard,
            target,
        )
    }

    pub fn add_widget_to_dashboard(
        &mut self,
        dashboard: Dashboard,
        widget: Widget,
        insertion: Insertion<'_>,
        on_aliases_changed: Option<AliasesChanged<'_>>,
    ) -> Result<Pasted> {
        commands::paste::add_widget_to_dashboard(
            &mut self.tools,
            dashboard,
            widget,
            insertion,
            on_aliases_changed,
        )
    }

    pub fn clear(&mut self, slot: BufferSlot) -> Result<()> {
        clear_payload(&mut self.store, &self.config, slot)
    }
}
