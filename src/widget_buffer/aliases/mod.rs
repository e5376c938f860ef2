//! # Entity Aliases
//!
//! A widget's datasources and target-device list refer to aliases by id, and alias ids only
//! mean something inside the dashboard that defines them. This module carries those
//! references across dashboards:
//!
//! - [`extract`]: at copy time, capture the aliases a widget uses as detached
//!   [`EntityAliasInfo`](crate::model::EntityAliasInfo) descriptors, keyed by the index of the
//!   entry that uses them.
//! - [`reconcile`]: at paste time, map every descriptor onto the destination dashboard,
//!   reusing an alias with an identical filter or creating a uniquely named one, and rewrite
//!   the widget's alias ids accordingly.
//!
//! Alias identity is the filter. Names are for humans: two aliases called differently but
//! selecting the same entities are the same alias, and two aliases with the same name but
//! different filters are not.

pub mod extract;
pub mod reconcile;

pub use extract::extract_aliases;
pub use reconcile::{reconcile_aliases, resolve_alias_id, unique_alias_name};
