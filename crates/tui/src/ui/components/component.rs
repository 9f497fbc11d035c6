//! Component system for the showroom TUI.
//!
//! Components are self-contained UI elements. They keep only local UI state,
//! operate on the shared [`App`] and report side effects back to the runtime
//! as [`Effect`]s instead of performing them directly.

use crossterm::event::{KeyEvent, MouseEvent};
use ratatui::{Frame, layout::Rect};
use showroom_types::{Effect, Msg};

use crate::app::App;

/// A UI component with its own event handling and rendering.
///
/// Event handlers default to doing nothing so a component only implements
/// what it reacts to. `render` receives `&mut App` because rendering lays out
/// (and measures) the virtualized lists.
pub(crate) trait Component {
    /// Handle an application message the component cares about.
    fn handle_message(&mut self, _app: &mut App, _msg: Msg) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_key_events(&mut self, _app: &mut App, _key: KeyEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn handle_mouse_events(&mut self, _app: &mut App, _mouse: MouseEvent) -> Vec<Effect> {
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App);
}
