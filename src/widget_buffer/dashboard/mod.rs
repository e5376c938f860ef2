//! Dashboard collaborators the paste flow delegates to.
//!
//! - [`DashboardValidator`]: bring a dashboard into a shape the paste can rely on
//! - [`LayoutPlacement`]: put a widget into a state/layout and size it for that layout
//!
//! Both are traits so an editor with its own layout engine can plug it in. The defaults
//! ([`DefaultValidator`], [`GridPlacement`]) are what the CLI uses.

pub mod placement;
pub mod validate;

pub use placement::{GridPlacement, LayoutPlacement, PlacementRequest};
pub use validate::{DashboardValidator, DefaultValidator};
