//! Theme styling module for the TUI UI layer.
//!
//! Two palettes ship: a light one for handset and web layouts and a dark,
//! high-contrast one for the TV grid. Prefer the semantic roles and helper
//! builders over hard-coded colors.

pub mod roles;
pub mod showroom;
pub mod theme_helpers;

pub use roles::{Theme, ThemeRoles};
pub use showroom::{HandsetTheme, TvTheme, for_platform};
