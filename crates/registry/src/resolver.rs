//! Translation between name-based and structural catalog addresses.
//!
//! Resolution is total: inbound names come from untrusted link text, so a
//! miss never panics. An unknown section resolves to `None`; an unknown use
//! case degrades to the section header (`item_index == 0`).

use showroom_types::{DeepLinkParams, NameAddress, StructuralAddress};
use showroom_util::slugify;
use tracing::debug;

use crate::catalog::DemoCatalog;

/// Resolves addresses against a borrowed catalog.
#[derive(Debug, Clone, Copy)]
pub struct AddressResolver<'a> {
    catalog: &'a DemoCatalog,
}

impl<'a> AddressResolver<'a> {
    pub fn new(catalog: &'a DemoCatalog) -> Self {
        Self { catalog }
    }

    /// Case-insensitive exact match against section names.
    ///
    /// Returns `None` when no section matches.
    pub fn resolve_section_index(&self, name: &str) -> Option<usize> {
        self.catalog.index_of_lowercase(&name.to_lowercase())
    }

    /// Returns `1 + position` of the first use case whose slug equals
    /// `use_case_slug`, or `0` (the section header) when nothing matches or
    /// `section_index` is out of range.
    pub fn resolve_item_index(&self, section_index: usize, use_case_slug: &str) -> usize {
        let Some(section) = self.catalog.section(section_index) else {
            debug!(section_index, "section out of range; falling back to header");
            return 0;
        };
        match section.items.iter().position(|item| slugify(&item.name) == use_case_slug) {
            Some(position) => position + 1,
            None => {
                debug!(section = %section.name, slug = use_case_slug, "no use case matches slug; falling back to header");
                0
            }
        }
    }

    /// Resolves a name address. The use-case name is slugified first, so both
    /// display names and slugs are accepted.
    pub fn resolve(&self, address: &NameAddress) -> Option<StructuralAddress> {
        let section_index = self.resolve_section_index(&address.section_name)?;
        let item_index = address
            .use_case_name
            .as_deref()
            .map(|name| self.resolve_item_index(section_index, &slugify(name)))
            .unwrap_or(0);
        Some(StructuralAddress::new(section_index, item_index))
    }

    /// Resolves a deep-link payload. `None` means "no navigation": both fields
    /// absent, no section named, or an unknown section.
    pub fn resolve_params(&self, params: &DeepLinkParams) -> Option<StructuralAddress> {
        let Some(section_name) = params.query_index.as_deref() else {
            if params.item_index.is_some() {
                debug!("deep link names a use case without a section; ignoring");
            }
            return None;
        };
        let section_index = self.resolve_section_index(section_name)?;
        let item_index = params
            .item_index
            .as_deref()
            .map(|slug| self.resolve_item_index(section_index, slug))
            .unwrap_or(0);
        Some(StructuralAddress::new(section_index, item_index))
    }
}

impl DemoCatalog {
    pub fn resolver(&self) -> AddressResolver<'_> {
        AddressResolver::new(self)
    }
}
