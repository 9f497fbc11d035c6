//! # Showroom utilities
//!
//! Pure helpers shared by the catalog, the TUI and the binary:
//! - `slug`: the slugification used for use-case links and link resolution
//! - `deep_link`: parsing inbound showroom links and building outbound ones
//! - `config`: the JSON-backed configuration file and environment overrides

pub mod config;
pub mod deep_link;
pub mod slug;

pub use config::{ConfigError, ShowroomConfig, default_config_path, default_log_path};
pub use deep_link::{DeepLinkError, parse_deep_link, section_link, use_case_link};
pub use slug::slugify;
