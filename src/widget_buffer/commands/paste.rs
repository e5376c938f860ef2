use super::{AliasesChanged, Collaborators, PasteTarget, Pasted};
use crate::aliases::reconcile_aliases;
use crate::config::BufferConfig;
use crate::dashboard::{DashboardValidator, LayoutPlacement, PlacementRequest};
use crate::equality::aliases_equal;
use crate::error::{BufferError, Result};
use crate::ids::IdGenerator;
use crate::model::{Dashboard, Widget};
use crate::payload::{AliasesInfo, WidgetItem, WidgetReference, WidgetSize};
use crate::store::{read_payload, BufferSlot, BufferStore};

/// What a widget brings along into [`add_widget_to_dashboard`].
#[derive(Debug, Clone, Copy)]
pub struct Insertion<'a> {
    pub target: PasteTarget<'a>,
    /// Aliases to reconcile; `None` leaves the dashboard's aliases alone
    pub aliases_info: Option<&'a AliasesInfo>,
    pub original_columns: u32,
    pub original_size: WidgetSize,
}

/// Pastes the copied widget into `dashboard` under a fresh id.
pub fn paste_widget<S, G, V, P>(
    store: &mut S,
    config: &BufferConfig,
    tools: &mut Collaborators<G, V, P>,
    dashboard: Dashboard,
    target: PasteTarget<'_>,
    on_aliases_changed: Option<AliasesChanged<'_>>,
) -> Result<Pasted>
where
    S: BufferStore,
    G: IdGenerator,
    V: DashboardValidator,
    P: LayoutPlacement,
{
    let WidgetItem {
        mut widget,
        aliases_info,
        original_size,
        original_columns,
    } = read_payload::<S, WidgetItem>(store, config)?
        .ok_or(BufferError::EmptyBuffer(BufferSlot::WidgetItem))?;

    let copied_id = std::mem::replace(&mut widget.id, tools.ids.new_id());
    tracing::debug!(from = %copied_id, to = %widget.id, "Assigned new widget id");

    let insertion = Insertion {
        target,
        aliases_info: Some(&aliases_info),
        original_columns,
        original_size,
    };
    add_widget_to_dashboard(tools, dashboard, widget, insertion, on_aliases_changed)
}

/// Places the referenced widget, looked up in `dashboard`, at `target`. The widget keeps its id.
pub fn paste_widget_reference<S, G, V, P>(
    store: &mut S,
    config: &BufferConfig,
    tools: &mut Collaborators<G, V, P>,
    dashboard: Dashboard,
    target: PasteTarget<'_>,
) -> Result<Pasted>
where
    S: BufferStore,
    G: IdGenerator,
    V: DashboardValidator,
    P: LayoutPlacement,
{
    let reference: WidgetReference = read_payload(store, config)?
        .ok_or(BufferError::EmptyBuffer(BufferSlot::WidgetReference))?;

    let widget = dashboard
        .widget(&reference.widget_id)
        .cloned()
        .ok_or_else(|| BufferError::DanglingReference(reference.widget_id.clone()))?;

    let insertion = Insertion {
        target,
        aliases_info: None,
        original_columns: reference.original_columns,
        original_size: reference.original_size,
    };
    add_widget_to_dashboard(tools, dashboard, widget, insertion, None)
}

/// Validates `dashboard`, reconciles the widget's aliases into it and places the widget.
///
/// `on_aliases_changed` runs once, after placement succeeded, and only when the dashboard
/// ended up with a different alias collection.
pub fn add_widget_to_dashboard<G, V, P>(
    tools: &mut Collaborators<G, V, P>,
    dashboard: Dashboard,
    mut widget: Widget,
    insertion: Insertion<'_>,
    on_aliases_changed: Option<AliasesChanged<'_>>,
) -> Result<Pasted>
where
    G: IdGenerator,
    V: DashboardValidator,
    P: LayoutPlacement,
{
    let mut dashboard = tools.validator.ensure_valid(dashboard);

    let mut aliases_changed = false;
    if let Some(info) = insertion.aliases_info {
        let current = &dashboard.configuration.entity_aliases;
        let (aliases, reconciled) = reconcile_aliases(current, info, widget, &mut tools.ids);
        widget = reconciled;
        if !aliases_equal(&aliases, current) {
            dashboard.configuration.entity_aliases = aliases;
            aliases_changed = true;
        }
    }

    let request = PlacementRequest {
        state: insertion.target.state,
        layout: insertion.target.layout,
        original_columns: insertion.original_columns,
        original_size: insertion.original_size,
        position: insertion.target.position,
    };
    tools.placement.place(&mut dashboard, &widget, &request)?;

    if aliases_changed {
        if let Some(notify) = on_aliases_changed {
            notify();
        }
    }

    tracing::info!(
        widget = %widget.id,
        state = insertion.target.state,
        layout = %insertion.target.layout,
        aliases_changed,
        "Pasted widget"
    );
    Ok(Pasted {
        dashboard,
        widget,
        aliases_changed,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::copy::{copy_widget, copy_widget_reference};
    use crate::dashboard::{DefaultValidator, GridPlacement};
    use crate::fixtures::{
        alias, device_filter, entity_datasource, function_datasource, size, widget,
        widget_with_targets, DashboardFixture,
    };
    use crate::ids::SequentialIds;
    use crate::model::{LayoutId, DEFAULT_STATE_ID};
    use crate::payload::{Payload, WidgetPosition};
    use crate::store::memory::InMemoryStore;
    use std::cell::Cell;

    type TestTools = Collaborators<SequentialIds, DefaultValidator, GridPlacement>;

    fn tools() -> TestTools {
        Collaborators::new(SequentialIds::new("id"), DefaultValidator, GridPlacement)
    }

    fn main_target() -> PasteTarget<'static> {
        PasteTarget::new(DEFAULT_STATE_ID, LayoutId::Main)
    }

    /// `D1` holding `W`, whose only datasource uses alias `A1 {temp, F1}`.
    fn copied_from_d1() -> (InMemoryStore, BufferConfig) {
        let w = widget("w-1", vec![entity_datasource("a-1")]);
        let d1 = DashboardFixture::new("d-1")
            .with_alias(alias("a-1", "temp", device_filter("F1")))
            .with_widget(DEFAULT_STATE_ID, LayoutId::Main, w.clone(), size(6, 4))
            .build();
        let mut store = InMemoryStore::new();
        let config = BufferConfig::default();
        copy_widget(&mut store, &config, &d1, DEFAULT_STATE_ID, LayoutId::Main, &w).unwrap();
        (store, config)
    }

    #[test]
    fn name_clash_with_different_filter_creates_suffixed_alias() {
        let (mut store, config) = copied_from_d1();
        let d2 = DashboardFixture::new("d-2")
            .with_alias(alias("a-2", "temp", device_filter("F2")))
            .build();
        let calls = Cell::new(0);

        let pasted = paste_widget(
            &mut store,
            &config,
            &mut tools(),
            d2,
            main_target(),
            Some(Box::new(|| calls.set(calls.get() + 1))),
        )
        .unwrap();

        assert_eq!(pasted.widget.id, "id-1");
        let aliases = &pasted.dashboard.configuration.entity_aliases;
        assert_eq!(aliases.len(), 2);
        let created = &aliases["id-2"];
        assert_eq!(created.alias, "temp1");
        assert_eq!(created.filter, device_filter("F1"));
        assert_eq!(
            pasted.widget.config.datasources()[0].entity_alias(),
            Some("id-2")
        );
        assert!(pasted.aliases_changed);
        assert_eq!(calls.get(), 1);
    }

    #[test]
    fn matching_filter_reuses_alias_without_notification() {
        let (mut store, config) = copied_from_d1();
        let d2 = DashboardFixture::new("d-2")
            .with_alias(alias("a-2", "anything", device_filter("F1")))
            .build();
        let before = d2.configuration.entity_aliases.clone();
        let calls = Cell::new(0);

        let pasted = paste_widget(
            &mut store,
            &config,
            &mut tools(),
            d2,
            main_target(),
            Some(Box::new(|| calls.set(calls.get() + 1))),
        )
        .unwrap();

        assert_eq!(
            pasted.widget.config.datasources()[0].entity_alias(),
            Some("a-2")
        );
        assert_eq!(pasted.dashboard.configuration.entity_aliases, before);
        assert!(!pasted.aliases_changed);
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn paste_into_the_source_dashboard_adds_a_second_widget() {
        let (mut store, config) = copied_from_d1();
        let d1 = DashboardFixture::new("d-1")
            .with_alias(alias("a-1", "temp", device_filter("F1")))
            .with_widget(
                DEFAULT_STATE_ID,
                LayoutId::Main,
                widget("w-1", vec![entity_datasource("a-1")]),
                size(6, 4),
            )
            .build();

        let pasted =
            paste_widget(&mut store, &config, &mut tools(), d1, main_target(), None).unwrap();

        assert_eq!(pasted.dashboard.configuration.widgets.len(), 2);
        assert_eq!(pasted.dashboard.configuration.entity_aliases.len(), 1);
        let layout = &pasted.dashboard.state(DEFAULT_STATE_ID).unwrap().layouts[&LayoutId::Main];
        let entry = &layout.widgets["id-1"];
        assert_eq!((entry.row, entry.col), (Some(4), Some(0)));
    }

    #[test]
    fn target_device_aliases_are_reconciled_too() {
        let w = widget_with_targets("w-1", vec![function_datasource()], &[None, Some("a-1")]);
        let d1 = DashboardFixture::new("d-1")
            .with_alias(alias("a-1", "devices", device_filter("F1")))
            .with_widget(DEFAULT_STATE_ID, LayoutId::Main, w.clone(), size(4, 4))
            .build();
        let mut store = InMemoryStore::new();
        let config = BufferConfig::default();
        copy_widget(&mut store, &config, &d1, DEFAULT_STATE_ID, LayoutId::Main, &w).unwrap();

        let pasted = paste_widget(
            &mut store,
            &config,
            &mut tools(),
            DashboardFixture::new("d-2").build(),
            main_target(),
            None,
        )
        .unwrap();

        let targets = pasted.widget.config.target_device_alias_ids();
        assert_eq!(targets[0], None);
        assert_eq!(targets[1].as_deref(), Some("id-2"));
        assert_eq!(pasted.dashboard.configuration.entity_aliases["id-2"].alias, "devices");
    }

    #[test]
    fn explicit_position_is_passed_to_placement() {
        let (mut store, config) = copied_from_d1();
        let target = main_target().at(WidgetPosition::new(2, 10));

        let pasted = paste_widget(
            &mut store,
            &config,
            &mut tools(),
            DashboardFixture::new("d-2").build(),
            target,
            None,
        )
        .unwrap();

        let layout = &pasted.dashboard.state(DEFAULT_STATE_ID).unwrap().layouts[&LayoutId::Main];
        let entry = &layout.widgets[pasted.widget.id.as_str()];
        assert_eq!((entry.row, entry.col), (Some(2), Some(10)));
        assert_eq!((entry.size_x, entry.size_y), (6, 4));
    }

    #[test]
    fn bare_dashboard_is_validated_before_placement() {
        let (mut store, config) = copied_from_d1();

        let pasted = paste_widget(
            &mut store,
            &config,
            &mut tools(),
            Dashboard::default(),
            main_target(),
            None,
        )
        .unwrap();

        assert!(pasted.dashboard.widget("id-1").is_some());
        assert!(pasted.aliases_changed);
    }

    #[test]
    fn widget_without_aliases_leaves_aliases_alone_and_does_not_notify() {
        let w = widget("w-1", vec![function_datasource()]);
        let d1 = DashboardFixture::new("d-1")
            .with_alias(alias("a-1", "temp", device_filter("F1")))
            .with_widget(DEFAULT_STATE_ID, LayoutId::Main, w.clone(), size(6, 4))
            .build();
        let mut store = InMemoryStore::new();
        let config = BufferConfig::default();
        copy_widget(&mut store, &config, &d1, DEFAULT_STATE_ID, LayoutId::Main, &w).unwrap();

        let d2 = DashboardFixture::new("d-2")
            .with_alias(alias("a-2", "humidity", device_filter("F2")))
            .build();
        let before = d2.configuration.entity_aliases.clone();
        let calls = Cell::new(0);

        let pasted = paste_widget(
            &mut store,
            &config,
            &mut tools(),
            d2,
            main_target(),
            Some(Box::new(|| calls.set(calls.get() + 1))),
        )
        .unwrap();

        assert!(!pasted.aliases_changed);
        assert_eq!(calls.get(), 0);
        assert_eq!(pasted.dashboard.configuration.entity_aliases, before);
        assert!(pasted.dashboard.widget("id-1").is_some());
    }

    #[test]
    fn empty_buffer_is_an_error() {
        let mut store = InMemoryStore::new();
        let result = paste_widget(
            &mut store,
            &BufferConfig::default(),
            &mut tools(),
            DashboardFixture::new("d-2").build(),
            main_target(),
            None,
        );
        assert!(matches!(
            result,
            Err(BufferError::EmptyBuffer(BufferSlot::WidgetItem))
        ));
    }

    #[test]
    fn corrupt_item_is_cleared_and_reported_empty() {
        let mut store = InMemoryStore::new();
        let config = BufferConfig::default();
        store.put(&config.key(WidgetItem::SLOT), "{\"widget\": 42").unwrap();

        let result = paste_widget(
            &mut store,
            &config,
            &mut tools(),
            DashboardFixture::new("d-2").build(),
            main_target(),
            None,
        );

        assert!(matches!(result, Err(BufferError::EmptyBuffer(_))));
        assert!(store.is_empty());
    }

    #[test]
    fn failed_placement_does_not_notify() {
        let (mut store, config) = copied_from_d1();
        let calls = Cell::new(0);

        let result = paste_widget(
            &mut store,
            &config,
            &mut tools(),
            DashboardFixture::new("d-2").build(),
            PasteTarget::new(DEFAULT_STATE_ID, LayoutId::Right),
            Some(Box::new(|| calls.set(calls.get() + 1))),
        );

        assert!(matches!(result, Err(BufferError::LayoutNotFound { .. })));
        assert_eq!(calls.get(), 0);
    }

    #[test]
    fn reference_paste_places_the_same_widget_in_another_layout() {
        let w = widget("w-1", vec![entity_datasource("a-1")]);
        let d1 = DashboardFixture::new("d-1")
            .with_alias(alias("a-1", "temp", device_filter("F1")))
            .with_layout(DEFAULT_STATE_ID, LayoutId::Right, 24)
            .with_widget(DEFAULT_STATE_ID, LayoutId::Main, w.clone(), size(6, 4))
            .build();
        let mut store = InMemoryStore::new();
        let config = BufferConfig::default();
        copy_widget_reference(&mut store, &config, &d1, DEFAULT_STATE_ID, LayoutId::Main, &w)
            .unwrap();

        let pasted = paste_widget_reference(
            &mut store,
            &config,
            &mut tools(),
            d1,
            PasteTarget::new(DEFAULT_STATE_ID, LayoutId::Right),
        )
        .unwrap();

        assert_eq!(pasted.widget.id, "w-1");
        assert!(!pasted.aliases_changed);
        assert_eq!(pasted.dashboard.configuration.widgets.len(), 1);
        let state = pasted.dashboard.state(DEFAULT_STATE_ID).unwrap();
        assert!(state.layouts[&LayoutId::Main].widgets.contains_key("w-1"));
        assert_eq!(state.layouts[&LayoutId::Right].widgets["w-1"].size_x, 6);
    }

    #[test]
    fn reference_to_a_missing_widget_is_dangling() {
        let w = widget("w-1", vec![]);
        let d1 = DashboardFixture::new("d-1")
            .with_widget(DEFAULT_STATE_ID, LayoutId::Main, w.clone(), size(6, 4))
            .build();
        let mut store = InMemoryStore::new();
        let config = BufferConfig::default();
        copy_widget_reference(&mut store, &config, &d1, DEFAULT_STATE_ID, LayoutId::Main, &w)
            .unwrap();

        let result = paste_widget_reference(
            &mut store,
            &config,
            &mut tools(),
            DashboardFixture::new("d-2").build(),
            main_target(),
        );
        assert!(matches!(result, Err(BufferError::DanglingReference(id)) if id == "w-1"));
    }
}
