//! # Buffer Payloads
//!
//! Two things can sit in the buffer:
//!
//! - [`WidgetItem`]: a full, self-contained snapshot of a widget plus the aliases it used in
//!   its source dashboard. Pasting it creates a new widget.
//! - [`WidgetReference`]: a pointer to a widget that stays in its dashboard. Pasting it adds
//!   the same widget to another state/layout of that dashboard.
//!
//! Both record the widget's size and the column count of the layout it came from, so the
//! placement step can rescale the footprint for a layout with a different column count.
//! Those two values are fixed at copy time.

use crate::model::{EntityAliasInfo, LayoutId, Widget};
use crate::store::BufferSlot;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetSize {
    pub size_x: u32,
    pub size_y: u32,
}

/// Target cell for a paste. A negative row or column means "let the layout decide".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WidgetPosition {
    pub row: i32,
    pub column: i32,
}

impl WidgetPosition {
    pub fn new(row: i32, column: i32) -> Self {
        Self { row, column }
    }

    /// The explicit `(row, column)` cell, or `None` when either coordinate is unspecified.
    pub fn cell(&self) -> Option<(u32, u32)> {
        match (u32::try_from(self.row), u32::try_from(self.column)) {
            (Ok(row), Ok(column)) => Some((row, column)),
            _ => None,
        }
    }
}

/// Aliases a widget depends on, keyed by the position of the entry that references them.
///
/// Sparse: an index is present only when that entry actually resolved to an alias.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AliasesInfo {
    #[serde(default)]
    pub datasource_aliases: BTreeMap<usize, EntityAliasInfo>,
    #[serde(default)]
    pub target_device_aliases: BTreeMap<usize, EntityAliasInfo>,
}

impl AliasesInfo {
    pub fn is_empty(&self) -> bool {
        self.datasource_aliases.is_empty() && self.target_device_aliases.is_empty()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetItem {
    pub widget: Widget,
    pub aliases_info: AliasesInfo,
    pub original_size: WidgetSize,
    pub original_columns: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WidgetReference {
    pub dashboard_id: String,
    pub source_state: String,
    pub source_layout: LayoutId,
    pub widget_id: String,
    pub original_size: WidgetSize,
    pub original_columns: u32,
}

/// A value that lives in one particular buffer slot.
pub trait Payload: Serialize + DeserializeOwned {
    const SLOT: BufferSlot;
}

impl Payload for WidgetItem {
    const SLOT: BufferSlot = BufferSlot::WidgetItem;
}

impl Payload for WidgetReference {
    const SLOT: BufferSlot = BufferSlot::WidgetReference;
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn aliases_info_uses_index_keys() {
        let mut info = AliasesInfo::default();
        info.target_device_aliases.insert(
            2,
            EntityAliasInfo {
                alias: "pump".to_string(),
                filter: json!({"type": "deviceType"}),
            },
        );

        let value = serde_json::to_value(&info).unwrap();
        assert_eq!(
            value,
            json!({
                "datasourceAliases": {},
                "targetDeviceAliases": {"2": {"alias": "pump", "filter": {"type": "deviceType"}}}
            })
        );

        let back: AliasesInfo = serde_json::from_value(value).unwrap();
        assert_eq!(back, info);
    }

    #[test]
    fn reference_wire_format() {
        let reference = WidgetReference {
            dashboard_id: "d-1".to_string(),
            source_state: "default".to_string(),
            source_layout: LayoutId::Right,
            widget_id: "w-1".to_string(),
            original_size: WidgetSize {
                size_x: 8,
                size_y: 5,
            },
            original_columns: 48,
        };
        assert_eq!(
            serde_json::to_value(&reference).unwrap(),
            json!({
                "dashboardId": "d-1",
                "sourceState": "default",
                "sourceLayout": "right",
                "widgetId": "w-1",
                "originalSize": {"sizeX": 8, "sizeY": 5},
                "originalColumns": 48
            })
        );
    }

    #[test]
    fn negative_coordinates_mean_unspecified() {
        assert_eq!(WidgetPosition::new(3, 4).cell(), Some((3, 4)));
        assert_eq!(WidgetPosition::new(-1, -1).cell(), None);
        assert_eq!(WidgetPosition::new(2, -1).cell(), None);
    }
}
