use crate::equality::structurally_equal;
use crate::ids::IdGenerator;
use crate::model::{EntityAlias, EntityAliasInfo, EntityAliases, Widget};
use crate::payload::AliasesInfo;

/// Maps the aliases in `info` onto `destination` and rewrites `widget` to use them.
///
/// Works on a copy of `destination`; the returned collection is that copy, with any aliases
/// that had to be created. With an empty `info` it compares equal to `destination` and the
/// widget comes back as it went in.
///
/// An index in `info` with no matching entry in the widget is skipped without resolving it,
/// so it never adds an alias nobody points at.
pub fn reconcile_aliases<G: IdGenerator + ?Sized>(
    destination: &EntityAliases,
    info: &AliasesInfo,
    mut widget: Widget,
    ids: &mut G,
) -> (EntityAliases, Widget) {
    let mut aliases = destination.clone();

    for (&index, alias_info) in &info.datasource_aliases {
        if index >= widget.config.datasources().len() {
            tracing::warn!(widget = %widget.id, index, "No datasource at aliased index, skipping");
            continue;
        }
        let alias_id = resolve_alias_id(&mut aliases, alias_info, ids);
        widget.config.set_datasource_alias(index, &alias_id);
    }

    for (&index, alias_info) in &info.target_device_aliases {
        if index >= widget.config.target_device_alias_ids().len() {
            tracing::warn!(widget = %widget.id, index, "No target device entry at aliased index, skipping");
            continue;
        }
        let alias_id = resolve_alias_id(&mut aliases, alias_info, ids);
        widget.config.set_target_device_alias(index, &alias_id);
    }

    (aliases, widget)
}

/// Match-or-create: the id of the first alias whose filter equals `info.filter`, or the id of
/// a new alias inserted under a name not yet taken in `aliases`.
pub fn resolve_alias_id<G: IdGenerator + ?Sized>(
    aliases: &mut EntityAliases,
    info: &EntityAliasInfo,
    ids: &mut G,
) -> String {
    if let Some(existing) = aliases
        .values()
        .find(|alias| structurally_equal(&alias.filter, &info.filter))
    {
        tracing::debug!(alias = %existing.alias, id = %existing.id, "Reusing matching alias");
        return existing.id.clone();
    }

    let id = ids.new_id();
    let name = unique_alias_name(aliases, &info.alias);
    tracing::info!(alias = %name, id = %id, "Creating entity alias");
    aliases.insert(
        id.clone(),
        EntityAlias {
            id: id.clone(),
            alias: name,
            filter: info.filter.clone(),
            ..Default::default()
        },
    );
    id
}

/// `base` if no alias in `aliases` is called that, else `base` followed by the smallest
/// positive number that makes it unique.
pub fn unique_alias_name(aliases: &EntityAliases, base: &str) -> String {
    let taken = |name: &str| aliases.values().any(|alias| alias.alias == name);

    let mut candidate = base.to_string();
    let mut suffix = 0;
    while taken(&candidate) {
        suffix += 1;
        candidate = format!("{}{}", base, suffix);
    }
    candidate
}
