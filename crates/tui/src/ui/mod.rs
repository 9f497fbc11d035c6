//! Terminal UI: the runtime loop, the top-level view, components, theming
//! and layout helpers.

pub mod components;
pub mod main_component;
pub mod runtime;
pub mod theme;
pub mod utils;
