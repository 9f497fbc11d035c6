use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::{layout::Rect, widgets::ListState};
use showroom_registry::{DemoCatalog, StructuralAddress};
use showroom_types::Platform;
use showroom_util::{section_link, use_case_link};

/// How activating a menu entry navigates.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum MenuRenderer {
    /// Activation scrolls the section list directly.
    #[default]
    Native,
    /// Entries are links; activation goes through the deep-link path.
    Web,
}

impl MenuRenderer {
    pub fn for_platform(platform: Platform) -> Self {
        match platform {
            Platform::Web => Self::Web,
            Platform::Handset | Platform::Tv => Self::Native,
        }
    }
}

/// One row of the drawer menu: a section header or one of its use cases.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuEntry {
    pub address: StructuralAddress,
    pub label: String,
    /// Outbound link, `/showroom/{section}` or `/showroom/{section}/{slug}`.
    pub link: String,
}

impl MenuEntry {
    pub fn is_header(&self) -> bool {
        self.address.is_header()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MenuActivation {
    Scroll(StructuralAddress),
    FollowLink(String),
}

/// State for the drawer menu: flattened entries, the cursor and focus.
#[derive(Debug, Clone)]
pub struct DrawerMenuState {
    entries: Vec<MenuEntry>,
    renderer: MenuRenderer,
    list_state: ListState,
    /// Section currently at the top of the section list; rendered highlighted.
    pub current_section: Option<usize>,
    pub f_menu: FocusFlag,
    pub last_area: Rect,
}

impl DrawerMenuState {
    pub fn new(catalog: &DemoCatalog, renderer: MenuRenderer) -> Self {
        let mut entries = Vec::new();
        for (section_index, section) in catalog.sections().iter().enumerate() {
            entries.push(MenuEntry {
                address: StructuralAddress::header(section_index),
                label: section.name.clone(),
                link: section_link(&section.name),
            });
            entries.extend(section.items.iter().enumerate().map(|(position, use_case)| MenuEntry {
                address: StructuralAddress::new(section_index, position + 1),
                label: use_case.name.clone(),
                link: use_case_link(&section.name, &use_case.name),
            }));
        }
        let mut list_state = ListState::default();
        if !entries.is_empty() {
            list_state.select(Some(0));
        }
        Self {
            entries,
            renderer,
            list_state,
            current_section: None,
            f_menu: FocusFlag::named("showroom.menu"),
            last_area: Rect::default(),
        }
    }

    pub fn entries(&self) -> &[MenuEntry] {
        &self.entries
    }

    pub fn renderer(&self) -> MenuRenderer {
        self.renderer
    }

    pub fn list_state_mut(&mut self) -> &mut ListState {
        &mut self.list_state
    }

    pub fn selected_index(&self) -> Option<usize> {
        self.list_state.selected()
    }

    pub fn selected_entry(&self) -> Option<&MenuEntry> {
        self.selected_index().and_then(|index| self.entries.get(index))
    }

    pub fn select_index(&mut self, index: usize) {
        if self.entries.is_empty() {
            return;
        }
        self.list_state.select(Some(index.min(self.entries.len() - 1)));
    }

    pub fn select_next(&mut self) {
        let next = self.selected_index().map_or(0, |index| index + 1);
        self.select_index(next);
    }

    pub fn select_previous(&mut self) {
        let previous = self.selected_index().map_or(0, |index| index.saturating_sub(1));
        self.select_index(previous);
    }

    /// Jumps to the header of the next (`forward`) or previous section.
    pub fn select_adjacent_section(&mut self, forward: bool) {
        let Some(current) = self.selected_index() else {
            return;
        };
        let found = if forward {
            self.entries.iter().enumerate().skip(current + 1).find(|(_, entry)| entry.is_header())
        } else {
            self.entries.iter().enumerate().take(current).rev().find(|(_, entry)| entry.is_header())
        };
        if let Some((index, _)) = found {
            self.list_state.select(Some(index));
        }
    }

    /// Moves the cursor to a section header.
    pub fn select_section(&mut self, section_index: usize) {
        if let Some(index) = self.entries.iter().position(|entry| entry.address == StructuralAddress::header(section_index)) {
            self.list_state.select(Some(index));
        }
    }

    /// What activating the selected entry should do for this renderer.
    pub fn activate_selected(&self) -> Option<MenuActivation> {
        let entry = self.selected_entry()?;
        Some(match self.renderer {
            MenuRenderer::Native => MenuActivation::Scroll(entry.address),
            MenuRenderer::Web => MenuActivation::FollowLink(entry.link.clone()),
        })
    }

    /// Entry index under a terminal row, given the last rendered area.
    pub fn entry_at_row(&self, row: u16) -> Option<usize> {
        let inner_top = self.last_area.y.saturating_add(1);
        let inner_bottom = self.last_area.bottom().saturating_sub(1);
        if row < inner_top || row >= inner_bottom {
            return None;
        }
        let index = self.list_state.offset() + usize::from(row - inner_top);
        (index < self.entries.len()).then_some(index)
    }
}

impl HasFocus for DrawerMenuState {
    fn build(&self, builder: &mut FocusBuilder) {
        builder.leaf_widget(self);
    }

    fn focus(&self) -> FocusFlag {
        self.f_menu.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use showroom_registry::{Section, UseCase};

    fn catalog() -> DemoCatalog {
        DemoCatalog::from_sections(vec![
            Section::new("Buttons", "", vec![UseCase::new("Solid"), UseCase::new("Outline")]),
            Section::new("Toggles", "", vec![UseCase::new("Using `variant`")]),
        ])
        .unwrap()
    }

    #[test]
    fn entries_flatten_headers_and_use_cases() {
        let menu = DrawerMenuState::new(&catalog(), MenuRenderer::Native);
        let addresses: Vec<_> = menu.entries().iter().map(|entry| entry.address).collect();
        assert_eq!(
            addresses,
            vec![
                StructuralAddress::header(0),
                StructuralAddress::new(0, 1),
                StructuralAddress::new(0, 2),
                StructuralAddress::header(1),
                StructuralAddress::new(1, 1),
            ]
        );
        assert_eq!(menu.entries()[2].link, "/showroom/buttons/outline");
        assert_eq!(menu.entries()[3].link, "/showroom/toggles");
        assert_eq!(menu.entries()[4].link, "/showroom/toggles/using-variant");
    }

    #[test]
    fn native_activation_scrolls_and_web_activation_follows_links() {
        let catalog = catalog();
        let mut native = DrawerMenuState::new(&catalog, MenuRenderer::Native);
        native.select_index(2);
        assert_eq!(native.activate_selected(), Some(MenuActivation::Scroll(StructuralAddress::new(0, 2))));

        let mut web = DrawerMenuState::new(&catalog, MenuRenderer::Web);
        web.select_index(2);
        assert_eq!(web.activate_selected(), Some(MenuActivation::FollowLink("/showroom/buttons/outline".into())));
    }

    #[test]
    fn cursor_moves_within_bounds_and_between_sections() {
        let mut menu = DrawerMenuState::new(&catalog(), MenuRenderer::Native);
        menu.select_previous();
        assert_eq!(menu.selected_index(), Some(0));
        menu.select_adjacent_section(true);
        assert_eq!(menu.selected_index(), Some(3));
        menu.select_next();
        menu.select_next();
        assert_eq!(menu.selected_index(), Some(4));
        menu.select_adjacent_section(false);
        assert_eq!(menu.selected_index(), Some(3));
        menu.select_section(0);
        assert_eq!(menu.selected_entry().map(|entry| entry.label.as_str()), Some("Buttons"));
    }

    #[test]
    fn platform_picks_the_renderer() {
        assert_eq!(MenuRenderer::for_platform(Platform::Web), MenuRenderer::Web);
        assert_eq!(MenuRenderer::for_platform(Platform::Handset), MenuRenderer::Native);
    }
}
