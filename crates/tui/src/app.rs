//! Application state shared by every component.

use std::sync::Arc;

use rat_focus::{Focus, FocusBuilder, FocusFlag, HasFocus};
use ratatui::layout::Rect;
use showroom_registry::DemoCatalog;
use showroom_types::{Effect, Msg, Platform};
use tokio::sync::mpsc::UnboundedSender;
use tracing::trace;

use crate::{
    RunOptions,
    scroll::ScrollCoordinator,
    showroom::DemoShowroomScreen,
    tv::BackSignalSource,
    ui::{
        components::link_prompt::LinkPromptState,
        theme::{self, Theme},
    },
};

/// Read-mostly context handed to components.
#[derive(Debug)]
pub struct SharedCtx {
    pub catalog: Arc<DemoCatalog>,
    pub theme: Box<dyn Theme>,
    pub platform: Platform,
}

pub struct App {
    pub ctx: SharedCtx,
    pub back_signals: BackSignalSource,
    pub showroom: DemoShowroomScreen,
    pub link_prompt: LinkPromptState,
    pub focus: Focus,
    pub container_focus: FocusFlag,
}

impl App {
    pub fn new(catalog: Arc<DemoCatalog>, options: &RunOptions, sender: UnboundedSender<Msg>) -> Self {
        let back_signals = BackSignalSource::new();
        let coordinator = ScrollCoordinator::new(sender, options.retry_delay, options.animate);
        let showroom = DemoShowroomScreen::new(Arc::clone(&catalog), options.platform, coordinator, &back_signals);
        let mut app = Self {
            ctx: SharedCtx {
                catalog,
                theme: theme::for_platform(options.platform),
                platform: options.platform,
            },
            back_signals,
            showroom,
            link_prompt: LinkPromptState::default(),
            focus: Focus::default(),
            container_focus: FocusFlag::named("app"),
        };
        app.focus_default();
        app
    }

    /// Applies a message to application state.
    pub fn update(&mut self, msg: &Msg) -> Vec<Effect> {
        match msg {
            Msg::Tick => {
                self.showroom.tick();
            }
            Msg::Resize(width, height) => trace!(width, height, "terminal resized"),
            Msg::Navigate(params) => {
                self.showroom.navigate(params);
                self.focus_default();
            }
            Msg::RetryScroll { address, ticket } => self.showroom.handle_retry(*address, *ticket),
        }
        Vec::new()
    }

    pub fn is_animating(&self) -> bool {
        self.showroom.is_animating()
    }

    /// Rebuilds the focus tree and focuses the leaf matching the current
    /// layout state. Call after structural changes.
    pub fn focus_default(&mut self) {
        self.rebuild_focus();
        let flag = if self.link_prompt.is_open() {
            Some(self.link_prompt.f_input.clone())
        } else {
            self.showroom.default_focus_flag()
        };
        if let Some(flag) = flag {
            self.focus.focus(&flag);
        }
    }

    pub fn rebuild_focus(&mut self) {
        let old_focus = std::mem::take(&mut self.focus);
        self.focus = FocusBuilder::rebuild_for(&*self, Some(old_focus));
    }
}

impl HasFocus for App {
    fn build(&self, builder: &mut FocusBuilder) {
        let tag = builder.start(self);
        if self.link_prompt.is_open() {
            builder.leaf_widget(&self.link_prompt.f_input);
        } else {
            builder.widget(&self.showroom);
        }
        builder.end(tag);
    }

    fn focus(&self) -> FocusFlag {
        self.container_focus.clone()
    }

    fn area(&self) -> Rect {
        self.showroom.last_area
    }
}
