//! Dashboard, widget and entity alias types.
//!
//! Only the fields this crate reads or rewrites are modelled. Every struct carries an
//! `extra` map flattened into it, so anything else found in a dashboard document survives
//! a load/save cycle untouched.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;
use std::str::FromStr;

/// Grid column count used when a layout does not configure one.
pub const DEFAULT_COLUMNS: u32 = 24;

/// Id of the state created for dashboards that have none.
pub const DEFAULT_STATE_ID: &str = "default";

/// Entity aliases of a dashboard, keyed by alias id, in document order.
pub type EntityAliases = IndexMap<String, EntityAlias>;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutId {
    Main,
    Right,
}

impl LayoutId {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutId::Main => "main",
            LayoutId::Right => "right",
        }
    }
}

impl fmt::Display for LayoutId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutId {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "main" => Ok(LayoutId::Main),
            "right" => Ok(LayoutId::Right),
            other => Err(format!(
                "Unknown layout '{}' (expected 'main' or 'right')",
                other
            )),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardId {
    pub id: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<DashboardId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default)]
    pub configuration: DashboardConfiguration,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Dashboard {
    pub fn id(&self) -> Option<&str> {
        self.id.as_ref().map(|id| id.id.as_str())
    }

    pub fn widget(&self, widget_id: &str) -> Option<&Widget> {
        self.configuration.widgets.get(widget_id)
    }

    pub fn state(&self, state_id: &str) -> Option<&DashboardState> {
        self.configuration.states.get(state_id)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardConfiguration {
    #[serde(default)]
    pub widgets: IndexMap<String, Widget>,
    #[serde(default)]
    pub states: IndexMap<String, DashboardState>,
    #[serde(default)]
    pub entity_aliases: EntityAliases,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardState {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub root: bool,
    #[serde(default)]
    pub layouts: IndexMap<LayoutId, DashboardLayout>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardState {
    /// Column count of `layout` multiplied by the number of layouts side by side in this state.
    ///
    /// A missing layout counts with the default column count.
    pub fn combined_columns(&self, layout: LayoutId) -> u32 {
        let columns = self
            .layouts
            .get(&layout)
            .map(DashboardLayout::columns)
            .unwrap_or(DEFAULT_COLUMNS);
        let layout_count = self.layouts.len().max(1) as u32;
        columns.saturating_mul(layout_count)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardLayout {
    #[serde(default)]
    pub widgets: IndexMap<String, WidgetLayout>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grid_settings: Option<GridSettings>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl DashboardLayout {
    pub fn columns(&self) -> u32 {
        self.grid_settings
            .as_ref()
            .and_then(|grid| grid.columns)
            .filter(|columns| *columns > 0)
            .unwrap_or(DEFAULT_COLUMNS)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GridSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub columns: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Per-widget placement metadata inside a layout.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetLayout {
    pub size_x: u32,
    pub size_y: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub row: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub col: Option<u32>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Widget {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub config: WidgetConfig,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub datasources: Option<Vec<Datasource>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_device_alias_ids: Option<Vec<Option<String>>>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl WidgetConfig {
    pub fn datasources(&self) -> &[Datasource] {
        self.datasources.as_deref().unwrap_or(&[])
    }

    pub fn target_device_alias_ids(&self) -> &[Option<String>] {
        self.target_device_alias_ids.as_deref().unwrap_or(&[])
    }

    /// Points datasource `index` at `alias_id`. Returns false if there is no such datasource.
    pub fn set_datasource_alias(&mut self, index: usize, alias_id: &str) -> bool {
        match self
            .datasources
            .as_mut()
            .and_then(|datasources| datasources.get_mut(index))
        {
            Some(datasource) => {
                datasource.entity_alias_id = Some(alias_id.to_string());
                true
            }
            None => false,
        }
    }

    /// Replaces target device alias `index`. Returns false if the list has no such entry.
    pub fn set_target_device_alias(&mut self, index: usize, alias_id: &str) -> bool {
        match self
            .target_device_alias_ids
            .as_mut()
            .and_then(|ids| ids.get_mut(index))
        {
            Some(slot) => {
                *slot = Some(alias_id.to_string());
                true
            }
            None => false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum DatasourceType {
    Entity,
    Function,
    Other(String),
}

impl From<String> for DatasourceType {
    fn from(value: String) -> Self {
        match value.as_str() {
            "entity" => DatasourceType::Entity,
            "function" => DatasourceType::Function,
            _ => DatasourceType::Other(value),
        }
    }
}

impl From<DatasourceType> for String {
    fn from(value: DatasourceType) -> Self {
        match value {
            DatasourceType::Entity => "entity".to_string(),
            DatasourceType::Function => "function".to_string(),
            DatasourceType::Other(other) => other,
        }
    }
}

impl Serialize for DatasourceType {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&String::from(self.clone()))
    }
}

impl<'de> Deserialize<'de> for DatasourceType {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        String::deserialize(deserializer).map(DatasourceType::from)
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datasource {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub kind: Option<DatasourceType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entity_alias_id: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Datasource {
    /// The alias id this datasource resolves through, if it is an entity datasource with one.
    pub fn entity_alias(&self) -> Option<&str> {
        match self.kind {
            Some(DatasourceType::Entity) => self
                .entity_alias_id
                .as_deref()
                .filter(|alias_id| !alias_id.is_empty()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct EntityAlias {
    pub id: String,
    pub alias: String,
    #[serde(default)]
    pub filter: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl EntityAlias {
    pub fn info(&self) -> EntityAliasInfo {
        EntityAliasInfo {
            alias: self.alias.clone(),
            filter: self.filter.clone(),
        }
    }
}

/// An alias detached from its dashboard: the name it had and the filter that defines it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntityAliasInfo {
    pub alias: String,
    #[serde(default)]
    pub filter: Value,
}
