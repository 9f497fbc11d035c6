use crossterm::event::{KeyCode, KeyEvent, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    style::Modifier,
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
};
use showroom_types::Effect;

use super::state::{CardGridState, GridMove};
use crate::{
    app::App,
    showroom::ShowroomLayout,
    ui::{components::component::Component, theme::theme_helpers},
};

const CARD_WIDTH: u16 = 26;
const CARD_HEIGHT: u16 = 7;
const CARD_GAP: u16 = 2;

/// Section cards for TV-class platforms, in two horizontally scrolling rows.
#[derive(Debug, Default)]
pub struct CardGridComponent;

impl CardGridComponent {
    fn grid(app: &mut App) -> Option<&mut CardGridState> {
        match app.showroom.layout_mut() {
            ShowroomLayout::Tv(layout) if layout.detail.is_none() => Some(&mut layout.grid),
            _ => None,
        }
    }

    fn press(app: &mut App, index: usize) {
        app.showroom.press_card(index);
        app.focus_default();
    }
}

impl Component for CardGridComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(grid) = Self::grid(app) else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Left | KeyCode::Char('h') => grid.move_focus(GridMove::Left),
            KeyCode::Right | KeyCode::Char('l') => grid.move_focus(GridMove::Right),
            KeyCode::Up | KeyCode::Char('k') => grid.move_focus(GridMove::Up),
            KeyCode::Down | KeyCode::Char('j') => grid.move_focus(GridMove::Down),
            KeyCode::Enter | KeyCode::Char(' ') => {
                if let Some(index) = grid.focused_index() {
                    Self::press(app, index);
                }
            }
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        let Some(grid) = Self::grid(app) else {
            return Vec::new();
        };
        if mouse.kind == MouseEventKind::Down(MouseButton::Left)
            && let Some(index) = grid.card_at(mouse.column, mouse.row)
        {
            Self::press(app, index);
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let catalog = app.ctx.catalog.clone();
        let ShowroomLayout::Tv(layout) = app.showroom.layout_mut() else {
            return;
        };
        let grid = &mut layout.grid;
        grid.last_area = rect;
        grid.card_areas.clear();

        let [top_row, bottom_row] =
            Layout::vertical([Constraint::Length(CARD_HEIGHT + 1), Constraint::Length(CARD_HEIGHT + 1)]).areas(rect);
        let columns = usize::from((rect.width / (CARD_WIDTH + CARD_GAP)).max(1));

        for (row, row_area) in [top_row, bottom_row].into_iter().enumerate() {
            let row_start = grid.row_range(row).start;
            let visible = grid.visible_columns(row, columns);
            for (slot, column) in visible.enumerate() {
                let index = row_start + column;
                let Some(section) = catalog.section(index) else {
                    continue;
                };
                let x = row_area.x + slot as u16 * (CARD_WIDTH + CARD_GAP);
                let area = Rect::new(x, row_area.y, CARD_WIDTH.min(row_area.right().saturating_sub(x)), CARD_HEIGHT)
                    .intersection(row_area);
                if area.is_empty() {
                    continue;
                }
                let focused = grid.is_focused(index);
                let mut title_style = theme.text_primary_style().add_modifier(Modifier::BOLD);
                if focused {
                    title_style = title_style.add_modifier(Modifier::UNDERLINED);
                }
                let body = Paragraph::new(vec![
                    Line::from(Span::styled(section.name.clone(), title_style)),
                    Line::from(Span::styled(section.description.clone(), theme.text_muted_style())),
                ])
                .wrap(Wrap { trim: true })
                .block(theme_helpers::card_block(theme, focused));
                frame.render_widget(body, area);
                grid.card_areas.push((index, area));
            }
        }
    }
}
