//! Registry crate for the showroom demo catalog.
//!
//! This crate owns the catalog built from registration data (embedded or
//! loaded from disk) and the resolver translating name-based addresses into
//! structural `(section, item)` addresses.

pub mod catalog;
pub mod resolver;

pub use catalog::{CatalogError, DemoCatalog};
pub use resolver::AddressResolver;
pub use showroom_types::{DeepLinkParams, NameAddress, Section, StructuralAddress, UseCase};
