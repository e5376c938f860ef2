use crate::model::{
    Dashboard, DashboardState, GridSettings, LayoutId, DEFAULT_COLUMNS, DEFAULT_STATE_ID,
};

pub trait DashboardValidator {
    /// Returns a structurally complete dashboard. Must be idempotent.
    fn ensure_valid(&self, dashboard: Dashboard) -> Dashboard;
}

/// Fills in the structure a paste needs:
///
/// - at least one state (a root `default` state when there are none), exactly one root
///   when none is marked
/// - a `main` layout in every state
/// - grid settings with a column count on every layout
/// - no layout entries for widgets missing from the dashboard's widget map
#[derive(Debug, Default, Clone, Copy)]
pub struct DefaultValidator;

impl DashboardValidator for DefaultValidator {
    fn ensure_valid(&self, mut dashboard: Dashboard) -> Dashboard {
        let config = &mut dashboard.configuration;

        if config.states.is_empty() {
            let name = dashboard
                .title
                .clone()
                .unwrap_or_else(|| DEFAULT_STATE_ID.to_string());
            config.states.insert(
                DEFAULT_STATE_ID.to_string(),
                DashboardState {
                    name,
                    root: true,
                    ..Default::default()
                },
            );
        }

        if !config.states.values().any(|state| state.root) {
            if let Some(first) = config.states.values_mut().next() {
                first.root = true;
            }
        }

        let widgets = &config.widgets;
        for state in config.states.values_mut() {
            state.layouts.entry(LayoutId::Main).or_default();
            for layout in state.layouts.values_mut() {
                let grid = layout
                    .grid_settings
                    .get_or_insert_with(GridSettings::default);
                if grid.columns.is_none() {
                    grid.columns = Some(DEFAULT_COLUMNS);
                }
                layout.widgets.retain(|id, _| widgets.contains_key(id));
            }
        }

        dashboard
    }
}
