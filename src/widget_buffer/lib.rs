//! # Widget Buffer Architecture
//!
//! widget-buffer is a **UI-agnostic clipboard for dashboard widgets**. A widget can be copied
//! by value (a full snapshot) or by reference (a pointer to a widget that keeps living in its
//! dashboard) and pasted into another state/layout, or into another dashboard entirely.
//!
//! The interesting part is what happens to **entity aliases** on the way. A widget never names
//! its data sources directly; its datasources point at alias ids, and those aliases are owned by
//! the dashboard. When a widget lands in a different dashboard, every alias it uses is matched
//! against the destination's aliases by filter content, and only created when nothing
//! equivalent exists.
//!
//! ## Layers
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (main.rs, args.rs)                               │
//! │  - Reads/writes dashboard JSON files, prints results        │
//! │  - The ONLY place that knows about stdout/stderr/exit codes │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - ItemBuffer facade, owns the store and collaborators      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs, aliases/*.rs)                │
//! │  - Copy, paste, eligibility, alias extraction/reconciling   │
//! │  - Operates on Rust types, returns Rust types               │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - Abstract BufferStore trait                               │
//! │  - FileStore (CLI), InMemoryStore (tests, embedding)        │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Dashboard validation, layout placement and id generation are collaborators behind traits
//! ([`dashboard::DashboardValidator`], [`dashboard::LayoutPlacement`], [`ids::IdGenerator`]).
//! Each has a default implementation so the crate works end to end out of the box.
//!
//! ## Copy-on-write
//!
//! Nothing in the core mutates a dashboard it only borrowed. Alias reconciliation works on a
//! clone of the destination collection, and paste operations take the target dashboard by
//! value and hand back the updated one. That keeps the "did the aliases change" comparison
//! sound and leaves the caller's copy intact when a paste fails.
//!
//! ## Module Overview
//!
//! - [`api`]: The [`api::ItemBuffer`] facade, entry point for all operations
//! - [`commands`]: Copy, paste and eligibility logic
//! - [`aliases`]: Alias extraction and reconciliation
//! - [`payload`]: The two buffer payload shapes
//! - [`model`]: Dashboard, widget and alias types
//! - [`equality`]: Structural equality over JSON values
//! - [`store`]: Buffer storage abstraction and implementations
//! - [`dashboard`]: Validation and layout placement collaborators
//! - [`ids`]: Identifier generation
//! - [`config`]: Buffer configuration
//! - [`error`]: Error types

pub mod aliases;
pub mod api;
pub mod commands;
pub mod config;
pub mod dashboard;
pub mod equality;
pub mod error;
pub mod ids;
pub mod model;
pub mod payload;
pub mod store;

#[cfg(any(test, feature = "test_utils"))]
pub mod fixtures;
