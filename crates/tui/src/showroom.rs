//! The showroom screen: catalog presentation, navigation and their wiring.
//!
//! Handset and web platforms get a drawer menu beside the full section list.
//! TV-class platforms get a two-row card grid; pressing a card swaps it for a
//! detail list of that one section until the back signal clears the choice.
//! Both layouts route scrolling through a single [`ScrollCoordinator`].

use std::sync::Arc;

use rat_focus::{FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use showroom_registry::{DeepLinkParams, DemoCatalog, StructuralAddress};
use showroom_types::{Effect, Platform, SelectionState};
use showroom_util::parse_deep_link;
use tracing::{debug, info, warn};

use crate::{
    drawer::DrawerController,
    scroll::{ScrollCoordinator, ScrollOutcome, VirtualSectionList},
    tv::{BackHandling, BackSignalSource, BackSubscription, TvFocusController},
    ui::components::{
        card_grid::CardGridState,
        drawer_menu::{DrawerMenuState, MenuActivation, MenuRenderer},
    },
};

#[derive(Debug)]
pub struct DrawerLayout {
    pub drawer: DrawerController,
    pub menu: DrawerMenuState,
    pub list: VirtualSectionList,
    pub f_list: FocusFlag,
    pub list_area: Rect,
}

#[derive(Debug)]
pub struct TvLayout {
    pub controller: TvFocusController,
    pub grid: CardGridState,
    /// Present while a section is selected.
    pub detail: Option<VirtualSectionList>,
    pub f_detail: FocusFlag,
    pub detail_area: Rect,
    back_subscription: Option<BackSubscription>,
}

#[derive(Debug)]
pub enum ShowroomLayout {
    Drawer(DrawerLayout),
    Tv(TvLayout),
}

#[derive(Debug)]
pub struct DemoShowroomScreen {
    catalog: Arc<DemoCatalog>,
    platform: Platform,
    layout: ShowroomLayout,
    coordinator: ScrollCoordinator,
    status: Option<String>,
    mounted: bool,
    pub container_focus: FocusFlag,
    pub last_area: Rect,
}

impl DemoShowroomScreen {
    /// Mounts the screen. On TV platforms this subscribes the back handler.
    pub fn new(catalog: Arc<DemoCatalog>, platform: Platform, coordinator: ScrollCoordinator, back_signals: &BackSignalSource) -> Self {
        let layout = if platform.is_tv() {
            let controller = TvFocusController::new();
            let back_subscription = Some(controller.register_back_handler(back_signals));
            ShowroomLayout::Tv(TvLayout {
                controller,
                grid: CardGridState::new(catalog.len(), catalog.midpoint()),
                detail: None,
                f_detail: FocusFlag::named("showroom.detail"),
                detail_area: Rect::default(),
                back_subscription,
            })
        } else {
            ShowroomLayout::Drawer(DrawerLayout {
                drawer: DrawerController::default(),
                menu: DrawerMenuState::new(&catalog, MenuRenderer::for_platform(platform)),
                list: VirtualSectionList::for_catalog(Arc::clone(&catalog)),
                f_list: FocusFlag::named("showroom.list"),
                list_area: Rect::default(),
            })
        };
        debug!(%platform, sections = catalog.len(), "showroom mounted");
        Self {
            catalog,
            platform,
            layout,
            coordinator,
            status: None,
            mounted: true,
            container_focus: FocusFlag::named("showroom"),
            last_area: Rect::default(),
        }
    }

    pub fn catalog(&self) -> &DemoCatalog {
        &self.catalog
    }

    pub fn platform(&self) -> Platform {
        self.platform
    }

    pub fn layout(&self) -> &ShowroomLayout {
        &self.layout
    }

    pub fn layout_mut(&mut self) -> &mut ShowroomLayout {
        &mut self.layout
    }

    pub fn coordinator(&self) -> &ScrollCoordinator {
        &self.coordinator
    }

    pub fn status(&self) -> Option<&str> {
        self.status.as_deref()
    }

    pub fn clear_status(&mut self) {
        self.status = None;
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    pub fn is_drawer_open(&self) -> bool {
        matches!(&self.layout, ShowroomLayout::Drawer(layout) if layout.drawer.is_open())
    }

    pub fn selection(&self) -> SelectionState {
        match &self.layout {
            ShowroomLayout::Tv(layout) => layout.controller.selection(),
            ShowroomLayout::Drawer(_) => SelectionState::None,
        }
    }

    /// The list scroll requests currently target, if one is shown.
    pub fn active_list(&self) -> Option<&VirtualSectionList> {
        match &self.layout {
            ShowroomLayout::Drawer(layout) => Some(&layout.list),
            ShowroomLayout::Tv(layout) => layout.detail.as_ref(),
        }
    }

    pub fn active_list_mut(&mut self) -> Option<&mut VirtualSectionList> {
        match &mut self.layout {
            ShowroomLayout::Drawer(layout) => Some(&mut layout.list),
            ShowroomLayout::Tv(layout) => layout.detail.as_mut(),
        }
    }

    /// Scrolls the active list to `address`. In the drawer layout the drawer
    /// closes afterwards, whether or not the scroll had to be deferred.
    pub fn handle_scroll(&mut self, address: StructuralAddress) -> Option<ScrollOutcome> {
        match &mut self.layout {
            ShowroomLayout::Drawer(layout) => {
                let outcome = self.coordinator.scroll_to(&mut layout.list, address);
                layout.drawer.close();
                Some(outcome)
            }
            ShowroomLayout::Tv(layout) => {
                let Some(detail) = layout.detail.as_mut() else {
                    debug!(%address, "no section selected; ignoring scroll");
                    return None;
                };
                Some(self.coordinator.scroll_to(detail, address))
            }
        }
    }

    /// Routes an external navigation event. Returns whether it navigated.
    ///
    /// Empty or unresolvable params leave the screen untouched.
    pub fn navigate(&mut self, params: &DeepLinkParams) -> bool {
        if params.is_empty() {
            return false;
        }
        let Some(address) = self.catalog.resolver().resolve_params(params) else {
            let name = params.query_index.as_deref().unwrap_or_default();
            warn!(section = name, "deep link names no known section");
            self.status = Some(format!("No demo section named '{name}'"));
            return false;
        };
        info!(%address, "navigating to deep link");
        self.status = None;
        if self.platform.is_tv() {
            self.select_section(address.section_index);
            // The detail list holds a single section.
            self.handle_scroll(StructuralAddress::new(0, address.item_index));
        } else {
            self.handle_scroll(address);
        }
        true
    }

    /// Parses link text and navigates. Malformed links only update the status.
    pub fn follow_link(&mut self, link: &str) -> bool {
        match parse_deep_link(link) {
            Ok(params) => self.navigate(&params),
            Err(error) => {
                warn!(%error, link, "ignoring malformed deep link");
                self.status = Some(error.to_string());
                false
            }
        }
    }

    /// Applies a fired scroll retry to the active list.
    pub fn handle_retry(&mut self, address: StructuralAddress, ticket: u64) {
        let list = match &mut self.layout {
            ShowroomLayout::Drawer(layout) => Some(&mut layout.list),
            ShowroomLayout::Tv(layout) => layout.detail.as_mut(),
        };
        let Some(list) = list else {
            self.coordinator.cancel_pending();
            return;
        };
        if self.coordinator.handle_retry(list, address, ticket) == Some(ScrollOutcome::Abandoned) {
            self.status = Some(format!("Could not scroll to {address}"));
        }
    }

    /// Activates the selected menu entry. Web menus hand the entry's link to
    /// the navigation path instead of scrolling directly.
    pub fn activate_menu_entry(&mut self) -> Option<Effect> {
        let ShowroomLayout::Drawer(layout) = &self.layout else {
            return None;
        };
        match layout.menu.activate_selected()? {
            MenuActivation::Scroll(address) => {
                self.handle_scroll(address);
                None
            }
            MenuActivation::FollowLink(link) => match parse_deep_link(&link) {
                Ok(params) => Some(Effect::Navigate(params)),
                Err(error) => {
                    warn!(%error, link, "menu link does not parse");
                    None
                }
            },
        }
    }

    pub fn toggle_drawer(&mut self) {
        if let ShowroomLayout::Drawer(layout) = &mut self.layout {
            layout.drawer.toggle();
            if layout.drawer.is_open() {
                layout.menu.current_section = layout.list.section_at_top();
                if let Some(section) = layout.menu.current_section {
                    layout.menu.select_section(section);
                }
            }
        }
    }

    pub fn close_drawer(&mut self) {
        if let ShowroomLayout::Drawer(layout) = &mut self.layout {
            layout.drawer.close();
        }
    }

    /// Activates a card: selects its section and shows the detail list.
    pub fn press_card(&mut self, index: usize) {
        self.select_section(index);
    }

    fn select_section(&mut self, section_index: usize) {
        let ShowroomLayout::Tv(layout) = &mut self.layout else {
            return;
        };
        if section_index >= self.catalog.len() {
            return;
        }
        self.coordinator.cancel_pending();
        layout.controller.press(section_index);
        layout.grid.focus_index(section_index);
        layout.detail = Some(VirtualSectionList::for_section(Arc::clone(&self.catalog), section_index));
    }

    /// Offers a back signal to the subscribers and reconciles the layout with
    /// the resulting selection.
    pub fn on_back(&mut self, back_signals: &BackSignalSource) -> BackHandling {
        let handling = back_signals.dispatch();
        self.sync_selection();
        handling
    }

    /// Drops or rebuilds the detail list to match the controller's selection.
    pub fn sync_selection(&mut self) {
        let ShowroomLayout::Tv(layout) = &mut self.layout else {
            return;
        };
        match layout.controller.selection() {
            SelectionState::None => {
                if layout.detail.take().is_some() {
                    self.coordinator.cancel_pending();
                }
            }
            SelectionState::Selected(index) => {
                let shown = layout.detail.as_ref().and_then(|detail| detail.catalog_section(0));
                if shown != Some(index) {
                    layout.detail = Some(VirtualSectionList::for_section(Arc::clone(&self.catalog), index));
                }
            }
        }
    }

    /// Advances scroll animation. Returns whether a redraw is needed.
    pub fn tick(&mut self) -> bool {
        self.active_list_mut().is_some_and(VirtualSectionList::tick)
    }

    pub fn is_animating(&self) -> bool {
        self.active_list().is_some_and(VirtualSectionList::is_animating)
    }

    /// The leaf that should hold focus for the current layout state.
    pub fn default_focus_flag(&self) -> Option<FocusFlag> {
        match &self.layout {
            ShowroomLayout::Drawer(layout) if layout.drawer.is_open() => Some(layout.menu.f_menu.clone()),
            ShowroomLayout::Drawer(layout) => Some(layout.f_list.clone()),
            ShowroomLayout::Tv(layout) if layout.detail.is_some() => Some(layout.f_detail.clone()),
            ShowroomLayout::Tv(layout) => layout.grid.focused_flag(),
        }
    }

    /// Cancels the pending scroll retry and releases the back subscription.
    pub fn unmount(&mut self) {
        if !self.mounted {
            return;
        }
        self.mounted = false;
        self.coordinator.cancel_pending();
        if let ShowroomLayout::Tv(layout) = &mut self.layout {
            layout.back_subscription = None;
        }
        debug!("showroom unmounted");
    }
}

impl Drop for DemoShowroomScreen {
    fn drop(&mut self) {
        self.unmount();
    }
}

impl HasFocus for DemoShowroomScreen {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        match &self.layout {
            ShowroomLayout::Drawer(layout) => {
                if layout.drawer.is_open() {
                    builder.widget(&layout.menu);
                }
                builder.leaf_widget(&layout.f_list);
            }
            ShowroomLayout::Tv(layout) => {
                if layout.detail.is_some() {
                    builder.leaf_widget(&layout.f_detail);
                } else {
                    builder.widget(&layout.grid);
                }
            }
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.last_area
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;
    use crate::{drawer::DrawerState, scroll::SectionListHandle};
    use showroom_registry::{Section, UseCase};
    use showroom_types::Msg;
    use tokio::sync::mpsc;

    fn catalog() -> Arc<DemoCatalog> {
        let sections = ["Button", "Card", "Header", "Text", "Toggle"]
            .iter()
            .map(|name| {
                let items = ["Presets", "Passing Content", "Styling", "Outline"]
                    .iter()
                    .map(|item| UseCase::new(*item).with_description("Shows the component in a realistic arrangement."))
                    .collect();
                Section::new(*name, "A component of the kit.", items)
            })
            .collect();
        Arc::new(DemoCatalog::from_sections(sections).unwrap())
    }

    fn screen(platform: Platform) -> (DemoShowroomScreen, BackSignalSource, mpsc::UnboundedReceiver<Msg>) {
        let (sender, receiver) = mpsc::unbounded_channel();
        let back_signals = BackSignalSource::new();
        let coordinator = ScrollCoordinator::new(sender, Duration::from_millis(50), false);
        let screen = DemoShowroomScreen::new(catalog(), platform, coordinator, &back_signals);
        (screen, back_signals, receiver)
    }

    fn drawer(screen: &DemoShowroomScreen) -> &DrawerLayout {
        match screen.layout() {
            ShowroomLayout::Drawer(layout) => layout,
            ShowroomLayout::Tv(_) => panic!("expected the drawer layout"),
        }
    }

    fn layout_active_list(screen: &mut DemoShowroomScreen) {
        if let Some(list) = screen.active_list_mut() {
            list.layout(60, 12);
        }
    }

    #[tokio::test(start_paused = true)]
    async fn deep_link_scrolls_and_closes_the_open_drawer() {
        let (mut screen, _back, _receiver) = screen(Platform::Handset);
        layout_active_list(&mut screen);
        screen.toggle_drawer();
        assert!(screen.is_drawer_open());

        assert!(screen.navigate(&DeepLinkParams::new("button", Some("passing-content"))));
        assert_eq!(drawer(&screen).drawer.state(), DrawerState::Closed);
        let top = drawer(&screen).list.top_frame();
        assert_eq!(top, Some(crate::scroll::FrameKind::UseCase { section: 0, item: 1 }));
    }

    #[tokio::test(start_paused = true)]
    async fn unknown_section_leaves_the_screen_untouched() {
        let (mut screen, _back, mut receiver) = screen(Platform::Handset);
        layout_active_list(&mut screen);
        screen.toggle_drawer();
        let offset = drawer(&screen).list.metrics().offset();

        assert!(!screen.navigate(&DeepLinkParams::new("nonexistent", None)));
        assert!(screen.is_drawer_open());
        assert_eq!(drawer(&screen).list.metrics().offset(), offset);
        assert!(!screen.coordinator().has_pending_retry());
        assert!(screen.status().is_some_and(|status| status.contains("nonexistent")));

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(receiver.try_recv().is_err());
    }

    #[tokio::test(start_paused = true)]
    async fn empty_params_do_nothing() {
        let (mut screen, _back, _receiver) = screen(Platform::Handset);
        assert!(!screen.navigate(&DeepLinkParams::default()));
        assert!(screen.status().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn far_targets_recover_through_the_retry_path() {
        let (mut screen, _back, mut receiver) = screen(Platform::Handset);
        layout_active_list(&mut screen);

        assert!(screen.navigate(&DeepLinkParams::new("header", Some("outline"))));
        assert!(screen.coordinator().has_pending_retry());
        assert!(!screen.is_drawer_open());

        let Some(Msg::RetryScroll { address, ticket }) = receiver.recv().await else {
            panic!("expected a scroll retry");
        };
        // Header is section 2; each section has 6 frames.
        assert_eq!(address, StructuralAddress::new(0, 2 * 6 + 4));
        layout_active_list(&mut screen);
        screen.handle_retry(address, ticket);
        assert_eq!(drawer(&screen).list.top_frame(), Some(crate::scroll::FrameKind::UseCase { section: 2, item: 3 }));
        assert!(screen.status().is_none());
    }

    #[tokio::test(start_paused = true)]
    async fn malformed_links_only_update_the_status() {
        let (mut screen, _back, _receiver) = screen(Platform::Handset);
        assert!(!screen.follow_link("/elsewhere/button"));
        assert!(screen.status().is_some());
        assert!(screen.follow_link("/showroom/button/styling"));
    }

    #[tokio::test(start_paused = true)]
    async fn web_menu_entries_route_through_navigation() {
        let (mut screen, _back, _receiver) = screen(Platform::Web);
        if let ShowroomLayout::Drawer(layout) = screen.layout_mut() {
            layout.menu.select_index(2);
        }
        let effect = screen.activate_menu_entry();
        assert_eq!(effect, Some(Effect::Navigate(DeepLinkParams::new("button", Some("passing-content")))));
    }

    #[tokio::test(start_paused = true)]
    async fn native_menu_entries_scroll_and_close_the_drawer() {
        let (mut screen, _back, _receiver) = screen(Platform::Handset);
        layout_active_list(&mut screen);
        screen.toggle_drawer();
        if let ShowroomLayout::Drawer(layout) = screen.layout_mut() {
            layout.menu.select_index(1);
        }
        assert_eq!(screen.activate_menu_entry(), None);
        assert!(!screen.is_drawer_open());
        assert_eq!(drawer(&screen).list.top_frame(), Some(crate::scroll::FrameKind::UseCase { section: 0, item: 0 }));
    }

    #[tokio::test(start_paused = true)]
    async fn tv_press_and_back_round_trip() {
        let (mut screen, back, _receiver) = screen(Platform::Tv);
        assert_eq!(back.listener_count(), 1);
        let ShowroomLayout::Tv(layout) = screen.layout() else {
            panic!("tv uses the card grid layout");
        };
        assert_eq!(layout.grid.row_range(1), 3..5);

        screen.press_card(2);
        assert_eq!(screen.selection(), SelectionState::Selected(2));
        assert_eq!(screen.active_list().and_then(|list| list.catalog_section(0)), Some(2));

        assert_eq!(screen.on_back(&back), BackHandling::Consumed);
        assert_eq!(screen.selection(), SelectionState::None);
        assert!(screen.active_list().is_none());

        assert_eq!(screen.on_back(&back), BackHandling::Propagate);
    }

    #[tokio::test(start_paused = true)]
    async fn tv_deep_link_opens_the_section_detail() {
        let (mut screen, _back, _receiver) = screen(Platform::Tv);
        assert!(screen.navigate(&DeepLinkParams::new("header", Some("styling"))));
        assert_eq!(screen.selection(), SelectionState::Selected(2));
        // A fresh detail list has not been measured yet.
        assert!(screen.coordinator().has_pending_retry());
    }

    #[tokio::test(start_paused = true)]
    async fn unmount_cancels_retries_and_unsubscribes() {
        let (mut screen, back, mut receiver) = screen(Platform::Tv);
        screen.press_card(1);
        if let Some(list) = screen.active_list_mut() {
            list.scroll_to_end();
        }
        screen.handle_scroll(StructuralAddress::new(0, 3));
        screen.unmount();
        assert!(!screen.is_mounted());
        assert_eq!(back.listener_count(), 0);
        assert!(!screen.coordinator().has_pending_retry());

        tokio::time::sleep(Duration::from_millis(200)).await;
        assert!(receiver.try_recv().is_err());
        drop(screen);
        assert_eq!(back.dispatch(), BackHandling::Propagate);
    }
}
