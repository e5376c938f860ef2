use crate::model::{Dashboard, Widget};
use crate::payload::AliasesInfo;

/// Collects the aliases `widget` depends on in `dashboard`.
///
/// Entity datasources and target-device entries whose alias id does not resolve in the
/// dashboard are left out; so is everything when the dashboard defines no aliases.
pub fn extract_aliases(dashboard: &Dashboard, widget: &Widget) -> AliasesInfo {
    let aliases = &dashboard.configuration.entity_aliases;
    let mut info = AliasesInfo::default();
    if aliases.is_empty() {
        return info;
    }

    for (index, datasource) in widget.config.datasources().iter().enumerate() {
        if let Some(alias) = datasource.entity_alias().and_then(|id| aliases.get(id)) {
            info.datasource_aliases.insert(index, alias.info());
        }
    }

    for (index, alias_id) in widget.config.target_device_alias_ids().iter().enumerate() {
        let alias = alias_id
            .as_deref()
            .filter(|id| !id.is_empty())
            .and_then(|id| aliases.get(id));
        if let Some(alias) = alias {
            info.target_device_aliases.insert(index, alias.info());
        }
    }

    tracing::debug!(
        widget = %widget.id,
        datasource_aliases = info.datasource_aliases.len(),
        target_device_aliases = info.target_device_aliases.len(),
        "Extracted widget aliases"
    );
    info
}
