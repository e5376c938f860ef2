use crate::aliases::extract_aliases;
use crate::config::BufferConfig;
use crate::error::{BufferError, Result};
use crate::model::{Dashboard, LayoutId, Widget, DEFAULT_COLUMNS};
use crate::payload::{WidgetItem, WidgetReference, WidgetSize};
use crate::store::{write_payload, BufferStore};

/// Snapshot `widget` together with the aliases it uses and its footprint in the source layout.
pub fn prepare_widget_item(
    dashboard: &Dashboard,
    source_state: &str,
    source_layout: LayoutId,
    widget: &Widget,
) -> Result<WidgetItem> {
    let original_size = original_size(dashboard, source_state, source_layout, &widget.id)?;
    Ok(WidgetItem {
        widget: widget.clone(),
        aliases_info: extract_aliases(dashboard, widget),
        original_size,
        original_columns: original_columns(dashboard, source_state, source_layout),
    })
}

pub fn prepare_widget_reference(
    dashboard: &Dashboard,
    source_state: &str,
    source_layout: LayoutId,
    widget: &Widget,
) -> Result<WidgetReference> {
    let dashboard_id = dashboard.id().ok_or_else(|| {
        BufferError::Api("Cannot reference a widget of a dashboard without an id".to_string())
    })?;
    Ok(WidgetReference {
        dashboard_id: dashboard_id.to_string(),
        source_state: source_state.to_string(),
        source_layout,
        widget_id: widget.id.clone(),
        original_size: original_size(dashboard, source_state, source_layout, &widget.id)?,
        original_columns: original_columns(dashboard, source_state, source_layout),
    })
}

pub fn copy_widget<S: BufferStore>(
    store: &mut S,
    config: &BufferConfig,
    dashboard: &Dashboard,
    source_state: &str,
    source_layout: LayoutId,
    widget: &Widget,
) -> Result<()> {
    let item = prepare_widget_item(dashboard, source_state, source_layout, widget)?;
    write_payload(store, config, &item)?;
    tracing::info!(widget = %widget.id, state = source_state, layout = %source_layout, "Copied widget");
    Ok(())
}

pub fn copy_widget_reference<S: BufferStore>(
    store: &mut S,
    config: &BufferConfig,
    dashboard: &Dashboard,
    source_state: &str,
    source_layout: LayoutId,
    widget: &Widget,
) -> Result<()> {
    let reference = prepare_widget_reference(dashboard, source_state, source_layout, widget)?;
    write_payload(store, config, &reference)?;
    tracing::info!(
        widget = %widget.id,
        dashboard = %reference.dashboard_id,
        state = source_state,
        layout = %source_layout,
        "Copied widget reference"
    );
    Ok(())
}

/// Columns of the source layout times the number of layouts in its state.
pub fn original_columns(dashboard: &Dashboard, source_state: &str, source_layout: LayoutId) -> u32 {
    dashboard
        .state(source_state)
        .map(|state| state.combined_columns(source_layout))
        .unwrap_or(DEFAULT_COLUMNS)
}

/// The widget's size as recorded in the source layout.
pub fn original_size(
    dashboard: &Dashboard,
    source_state: &str,
    source_layout: LayoutId,
    widget_id: &str,
) -> Result<WidgetSize> {
    dashboard
        .state(source_state)
        .and_then(|state| state.layouts.get(&source_layout))
        .and_then(|layout| layout.widgets.get(widget_id))
        .map(|entry| WidgetSize {
            size_x: entry.size_x,
            size_y: entry.size_y,
        })
        .ok_or_else(|| BufferError::WidgetNotInLayout {
            widget: widget_id.to_string(),
            state: source_state.to_string(),
            layout: source_layout,
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fixtures::{alias, device_filter, entity_datasource, size, widget, DashboardFixture};
    use crate::model::DEFAULT_STATE_ID;
    use crate::payload::Payload;
    use crate::store::memory::InMemoryStore;
    use crate::store::read_payload;

    fn source() -> (Dashboard, Widget) {
        let w = widget("w-1", vec![entity_datasource("a-1")]);
        let dashboard = DashboardFixture::new("d-1")
            .with_alias(alias("a-1", "temp", device_filter("F1")))
            .with_layout(DEFAULT_STATE_ID, LayoutId::Right, 24)
            .with_widget(DEFAULT_STATE_ID, LayoutId::Right, w.clone(), size(6, 4))
            .build();
        (dashboard, w)
    }

    #[test]
    fn item_captures_aliases_size_and_combined_columns() {
        let (dashboard, w) = source();
        let item = prepare_widget_item(&dashboard, DEFAULT_STATE_ID, LayoutId::Right, &w).unwrap();

        assert_eq!(item.widget, w);
        assert_eq!(item.original_size, size(6, 4));
        assert_eq!(item.original_columns, 48);
        assert_eq!(item.aliases_info.datasource_aliases[&0].alias, "temp");
    }

    #[test]
    fn unset_grid_columns_default_to_24() {
        let (mut dashboard, _) = source();
        let state = dashboard.configuration.states.get_mut(DEFAULT_STATE_ID).unwrap();
        state.layouts.shift_remove(&LayoutId::Main);
        state.layouts.get_mut(&LayoutId::Right).unwrap().grid_settings = None;

        assert_eq!(original_columns(&dashboard, DEFAULT_STATE_ID, LayoutId::Right), 24);
    }

    #[test]
    fn widget_missing_from_layout_is_reported() {
        let (dashboard, w) = source();
        let err = prepare_widget_item(&dashboard, DEFAULT_STATE_ID, LayoutId::Main, &w).unwrap_err();
        assert!(matches!(err, BufferError::WidgetNotInLayout { .. }));
    }

    #[test]
    fn copy_overwrites_previous_item() {
        let (dashboard, w) = source();
        let mut store = InMemoryStore::new();
        let config = BufferConfig::default();

        copy_widget(&mut store, &config, &dashboard, DEFAULT_STATE_ID, LayoutId::Right, &w).unwrap();
        let mut renamed = w.clone();
        renamed.extra.insert("title".to_string(), "second".into());
        let dashboard = DashboardFixture::new("d-1")
            .with_widget(DEFAULT_STATE_ID, LayoutId::Main, renamed.clone(), size(2, 2))
            .build();
        copy_widget(&mut store, &config, &dashboard, DEFAULT_STATE_ID, LayoutId::Main, &renamed)
            .unwrap();

        let item: WidgetItem = read_payload(&mut store, &config).unwrap().unwrap();
        assert_eq!(item.widget, renamed);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn reference_and_item_use_separate_slots() {
        let (dashboard, w) = source();
        let mut store = InMemoryStore::new();
        let config = BufferConfig::default();

        copy_widget(&mut store, &config, &dashboard, DEFAULT_STATE_ID, LayoutId::Right, &w).unwrap();
        copy_widget_reference(&mut store, &config, &dashboard, DEFAULT_STATE_ID, LayoutId::Right, &w)
            .unwrap();

        assert!(store.has(&config.key(WidgetItem::SLOT)).unwrap());
        let reference: WidgetReference = read_payload(&mut store, &config).unwrap().unwrap();
        assert_eq!(reference.dashboard_id, "d-1");
        assert_eq!(reference.widget_id, "w-1");
        assert_eq!(reference.source_layout, LayoutId::Right);
        assert_eq!(reference.original_columns, 48);
    }

    #[test]
    fn reference_needs_a_dashboard_id() {
        let (mut dashboard, w) = source();
        dashboard.id = None;
        let result = prepare_widget_reference(&dashboard, DEFAULT_STATE_ID, LayoutId::Right, &w);
        assert!(matches!(result, Err(BufferError::Api(_))));
    }

    #[test]
    fn store_failure_propagates() {
        let (dashboard, w) = source();
        let mut store = InMemoryStore::new();
        store.set_simulate_write_error(true);
        let result = copy_widget(
            &mut store,
            &BufferConfig::default(),
            &dashboard,
            DEFAULT_STATE_ID,
            LayoutId::Right,
            &w,
        );
        assert!(matches!(result, Err(BufferError::Store(_))));
    }
}
