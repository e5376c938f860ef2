use crate::config::BufferConfig;
use crate::error::Result;
use crate::model::{Dashboard, LayoutId};
use crate::payload::WidgetReference;
use crate::store::{has_payload, read_payload, BufferSlot, BufferStore};

/// Whether the value slot holds anything. Raw presence: contents are not parsed.
pub fn has_widget<S: BufferStore>(store: &S, config: &BufferConfig) -> Result<bool> {
    has_payload(store, config, BufferSlot::WidgetItem)
}

pub fn has_widget_reference<S: BufferStore>(store: &S, config: &BufferConfig) -> Result<bool> {
    has_payload(store, config, BufferSlot::WidgetReference)
}

/// Whether the stored reference makes sense to paste into `state`/`layout` of `dashboard`.
///
/// True only for a reference taken from this very dashboard, to a widget it still has, and
/// from a different state or layout. Reading a corrupt reference clears it.
pub fn can_paste_widget_reference<S: BufferStore>(
    store: &mut S,
    config: &BufferConfig,
    dashboard: &Dashboard,
    state: &str,
    layout: LayoutId,
) -> Result<bool> {
    let Some(reference) = read_payload::<S, WidgetReference>(store, config)? else {
        return Ok(false);
    };

    let same_dashboard = dashboard.id() == Some(reference.dashboard_id.as_str());
    let same_location = reference.source_state == state && reference.source_layout == layout;
    let widget_exists = dashboard.widget(&reference.widget_id).is_some();
    Ok(same_dashboard && !same_location && widget_exists)
}
