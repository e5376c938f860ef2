//! Builders for dashboards, widgets and aliases used throughout the tests.

use crate::model::{
    Dashboard, DashboardId, DashboardLayout, DashboardState, Datasource, DatasourceType,
    EntityAlias, GridSettings, LayoutId, Widget, WidgetConfig, WidgetLayout, DEFAULT_STATE_ID,
};
use crate::payload::WidgetSize;
use serde_json::{json, Value};

/// A single-entity alias filter pointing at device `entity_id`.
pub fn device_filter(entity_id: &str) -> Value {
    json!({
        "type": "singleEntity",
        "resolveMultiple": false,
        "singleEntity": {"entityType": "DEVICE", "id": entity_id}
    })
}

pub fn alias(id: &str, name: &str, filter: Value) -> EntityAlias {
    EntityAlias {
        id: id.to_string(),
        alias: name.to_string(),
        filter,
        ..Default::default()
    }
}

pub fn entity_datasource(alias_id: &str) -> Datasource {
    Datasource {
        kind: Some(DatasourceType::Entity),
        entity_alias_id: Some(alias_id.to_string()),
        ..Default::default()
    }
}

pub fn function_datasource() -> Datasource {
    Datasource {
        kind: Some(DatasourceType::Function),
        ..Default::default()
    }
}

pub fn widget(id: &str, datasources: Vec<Datasource>) -> Widget {
    Widget {
        id: id.to_string(),
        config: WidgetConfig {
            datasources: Some(datasources),
            ..Default::default()
        },
        ..Default::default()
    }
}

pub fn widget_with_targets(
    id: &str,
    datasources: Vec<Datasource>,
    targets: &[Option<&str>],
) -> Widget {
    let mut widget = widget(id, datasources);
    widget.config.target_device_alias_ids =
        Some(targets.iter().map(|t| t.map(str::to_string)).collect());
    widget
}

pub fn size(size_x: u32, size_y: u32) -> WidgetSize {
    WidgetSize { size_x, size_y }
}

pub struct DashboardFixture {
    pub dashboard: Dashboard,
}

impl DashboardFixture {
    /// A dashboard with one root `default` state holding a 24-column `main` layout.
    pub fn new(id: &str) -> Self {
        let mut dashboard = Dashboard {
            id: Some(DashboardId {
                id: id.to_string(),
                ..Default::default()
            }),
            title: Some(format!("Dashboard {}", id)),
            ..Default::default()
        };
        dashboard.configuration.states.insert(
            DEFAULT_STATE_ID.to_string(),
            DashboardState {
                name: "Default".to_string(),
                root: true,
                ..Default::default()
            },
        );
        Self { dashboard }.with_layout(DEFAULT_STATE_ID, LayoutId::Main, 24)
    }

    pub fn with_alias(mut self, alias: EntityAlias) -> Self {
        self.dashboard
            .configuration
            .entity_aliases
            .insert(alias.id.clone(), alias);
        self
    }

    /// Adds (or resets the columns of) a layout, creating the state if needed.
    pub fn with_layout(mut self, state: &str, layout: LayoutId, columns: u32) -> Self {
        let state = self
            .dashboard
            .configuration
            .states
            .entry(state.to_string())
            .or_insert_with(|| DashboardState {
                name: state.to_string(),
                ..Default::default()
            });
        state.layouts.entry(layout).or_default().grid_settings = Some(GridSettings {
            columns: Some(columns),
            ..Default::default()
        });
        self
    }

    /// Adds a widget to the dashboard and places it at the bottom of `layout`.
    pub fn with_widget(
        mut self,
        state: &str,
        layout: LayoutId,
        widget: Widget,
        size: WidgetSize,
    ) -> Self {
        let target: &mut DashboardLayout = self
            .dashboard
            .configuration
            .states
            .entry(state.to_string())
            .or_default()
            .layouts
            .entry(layout)
            .or_default();
        let row = target
            .widgets
            .values()
            .map(|w| w.row.unwrap_or(0) + w.size_y)
            .max()
            .unwrap_or(0);
        target.widgets.insert(
            widget.id.clone(),
            WidgetLayout {
                size_x: size.size_x,
                size_y: size.size_y,
                row: Some(row),
                col: Some(0),
                ..Default::default()
            },
        );
        self.dashboard
            .configuration
            .widgets
            .insert(widget.id.clone(), widget);
        self
    }

    pub fn build(self) -> Dashboard {
        self.dashboard
    }
}
