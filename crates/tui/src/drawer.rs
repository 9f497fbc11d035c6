//! Open/closed state of the navigation drawer.

use tracing::trace;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DrawerState {
    Open,
    #[default]
    Closed,
}

/// Two-state drawer machine. Starts closed.
#[derive(Debug, Clone, Default)]
pub struct DrawerController {
    state: DrawerState,
}

impl DrawerController {
    pub fn state(&self) -> DrawerState {
        self.state
    }

    pub fn is_open(&self) -> bool {
        self.state == DrawerState::Open
    }

    pub fn open(&mut self) {
        self.transition(DrawerState::Open);
    }

    pub fn close(&mut self) {
        self.transition(DrawerState::Closed);
    }

    pub fn toggle(&mut self) {
        let next = match self.state {
            DrawerState::Open => DrawerState::Closed,
            DrawerState::Closed => DrawerState::Open,
        };
        self.transition(next);
    }

    fn transition(&mut self, next: DrawerState) {
        if self.state != next {
            trace!(from = ?self.state, to = ?next, "drawer transition");
        }
        self.state = next;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_closed_and_toggles() {
        let mut drawer = DrawerController::default();
        assert_eq!(drawer.state(), DrawerState::Closed);
        drawer.toggle();
        assert!(drawer.is_open());
        drawer.toggle();
        assert!(!drawer.is_open());
    }

    #[test]
    fn open_and_close_are_idempotent() {
        let mut drawer = DrawerController::default();
        drawer.open();
        drawer.open();
        assert_eq!(drawer.state(), DrawerState::Open);
        drawer.close();
        drawer.close();
        assert_eq!(drawer.state(), DrawerState::Closed);
    }
}
