use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::Rect,
    style::Modifier,
    text::{Line, Span},
    widgets::{List, ListItem},
};
use showroom_types::Effect;

use super::state::{DrawerMenuState, MenuRenderer};
use crate::{
    app::App,
    showroom::ShowroomLayout,
    ui::{components::component::Component, theme::theme_helpers},
};

/// Section and use-case index shown inside the open drawer.
#[derive(Debug, Default)]
pub struct DrawerMenuComponent;

impl DrawerMenuComponent {
    fn menu(app: &mut App) -> Option<&mut DrawerMenuState> {
        match app.showroom.layout_mut() {
            ShowroomLayout::Drawer(layout) => Some(&mut layout.menu),
            ShowroomLayout::Tv(_) => None,
        }
    }

    fn activate(app: &mut App) -> Vec<Effect> {
        let effects = app.showroom.activate_menu_entry().into_iter().collect();
        app.focus_default();
        effects
    }
}

impl Component for DrawerMenuComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(menu) = Self::menu(app) else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => menu.select_previous(),
            KeyCode::Down | KeyCode::Char('j') => menu.select_next(),
            KeyCode::PageUp | KeyCode::Left => menu.select_adjacent_section(false),
            KeyCode::PageDown | KeyCode::Right => menu.select_adjacent_section(true),
            KeyCode::Home => menu.select_index(0),
            KeyCode::End => menu.select_index(usize::MAX),
            KeyCode::Enter | KeyCode::Char(' ') => return Self::activate(app),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let Some(menu) = Self::menu(app) else {
            return Vec::new();
        };
        match mouse.kind {
            MouseEventKind::ScrollUp => menu.select_previous(),
            MouseEventKind::ScrollDown => menu.select_next(),
            MouseEventKind::Down(MouseButton::Left) => {
                if let Some(index) = menu.entry_at_row(mouse.row) {
                    menu.select_index(index);
                    return Self::activate(app);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let ShowroomLayout::Drawer(layout) = app.showroom.layout_mut() else {
            return;
        };
        let menu = &mut layout.menu;
        menu.last_area = rect;
        let focused = menu.f_menu.get();
        let title = match menu.renderer() {
            MenuRenderer::Native => "Demos",
            MenuRenderer::Web => "Demos (links)",
        };

        let current_section = menu.current_section;
        let items: Vec<ListItem> = menu
            .entries()
            .iter()
            .map(|entry| {
                if entry.is_header() {
                    let mut style = theme.text_secondary_style().add_modifier(Modifier::BOLD);
                    if current_section == Some(entry.address.section_index) {
                        style = theme.accent_emphasis_style();
                    }
                    return ListItem::new(Line::from(Span::styled(entry.label.clone(), style)));
                }
                let mut spans = vec![Span::styled(format!("  › {}", entry.label), theme.text_primary_style())];
                if menu.renderer() == MenuRenderer::Web {
                    spans.push(Span::styled(format!("  {}", entry.link), theme.text_muted_style()));
                }
                ListItem::new(Line::from(spans))
            })
            .collect();

        let list = List::new(items)
            .block(theme_helpers::block(theme, Some(title), focused))
            .highlight_style(theme.selection_style())
            .highlight_symbol(if focused { "▌" } else { " " });
        frame.render_stateful_widget(list, rect, menu.list_state_mut());
    }
}
