//! Focus-driven section selection for TV-class platforms, plus the
//! system back signal it listens to.
//!
//! Back handlers form a stack: the newest subscriber is asked first and the
//! first one to answer [`BackHandling::Consumed`] stops the dispatch. When
//! nobody consumes the signal the host falls back to its default back
//! navigation.

use std::{
    cell::{Cell, RefCell},
    fmt,
    rc::{Rc, Weak},
};

use showroom_types::SelectionState;
use tracing::debug;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BackHandling {
    /// The handler acted on the signal; default back navigation is suppressed.
    Consumed,
    /// Not handled here.
    Propagate,
}

type BackHandler = Box<dyn FnMut() -> BackHandling>;

#[derive(Default)]
struct BackRegistry {
    next_id: u64,
    handlers: Vec<(u64, BackHandler)>,
}

/// Source of back-navigation signals (Esc/Backspace in the terminal).
///
/// Handlers run while the registry is borrowed, so they must not subscribe
/// or drop subscriptions themselves.
#[derive(Clone, Default)]
pub struct BackSignalSource {
    registry: Rc<RefCell<BackRegistry>>,
}

impl fmt::Debug for BackSignalSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BackSignalSource").field("listeners", &self.listener_count()).finish()
    }
}

impl BackSignalSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a handler; it stays registered until the returned
    /// subscription is dropped.
    #[must_use = "dropping the subscription unregisters the handler"]
    pub fn subscribe(&self, handler: impl FnMut() -> BackHandling + 'static) -> BackSubscription {
        let mut registry = self.registry.borrow_mut();
        registry.next_id += 1;
        let id = registry.next_id;
        registry.handlers.push((id, Box::new(handler)));
        BackSubscription {
            id,
            registry: Rc::downgrade(&self.registry),
        }
    }

    /// Offers a back signal to the handlers, newest first.
    pub fn dispatch(&self) -> BackHandling {
        let mut registry = self.registry.borrow_mut();
        for (id, handler) in registry.handlers.iter_mut().rev() {
            if handler() == BackHandling::Consumed {
                debug!(handler = *id, "back signal consumed");
                return BackHandling::Consumed;
            }
        }
        BackHandling::Propagate
    }

    pub fn listener_count(&self) -> usize {
        self.registry.borrow().handlers.len()
    }
}

/// Keeps a back handler registered. Dropping it unsubscribes.
#[derive(Debug)]
pub struct BackSubscription {
    id: u64,
    registry: Weak<RefCell<BackRegistry>>,
}

impl BackSubscription {
    pub fn unsubscribe(self) {}
}

impl Drop for BackSubscription {
    fn drop(&mut self) {
        if let Some(registry) = self.registry.upgrade() {
            registry.borrow_mut().handlers.retain(|(id, _)| *id != self.id);
        }
    }
}

/// Section selection shared between the screen and its back handler.
#[derive(Debug, Clone, Default)]
pub struct TvFocusController {
    selection: Rc<Cell<SelectionState>>,
}

impl TvFocusController {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn selection(&self) -> SelectionState {
        self.selection.get()
    }

    /// Activating a card selects its section.
    pub fn press(&self, section_index: usize) {
        debug!(section_index, "section selected");
        self.selection.set(SelectionState::Selected(section_index));
    }

    /// Clears a selection and consumes the signal; with nothing selected the
    /// signal propagates.
    pub fn handle_back(&self) -> BackHandling {
        clear_selection(&self.selection)
    }

    /// Subscribes [`Self::handle_back`] to `source`.
    pub fn register_back_handler(&self, source: &BackSignalSource) -> BackSubscription {
        let selection = Rc::clone(&self.selection);
        source.subscribe(move || clear_selection(&selection))
    }
}

fn clear_selection(selection: &Cell<SelectionState>) -> BackHandling {
    match selection.get() {
        SelectionState::Selected(_) => {
            selection.set(SelectionState::None);
            BackHandling::Consumed
        }
        SelectionState::None => BackHandling::Propagate,
    }
}
