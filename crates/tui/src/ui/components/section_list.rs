//! Renders whichever virtualized list is active: the full catalog in the
//! drawer layout, or the selected section's detail view on TV.

use crossterm::event::{KeyCode, KeyEvent, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Margin, Rect},
    style::{Modifier, Style},
    text::{Line, Span},
    widgets::Paragraph,
};
use showroom_types::Effect;

use crate::{
    app::App,
    scroll::{LineRole, SectionListHandle, VirtualSectionList},
    showroom::ShowroomLayout,
    ui::{
        components::component::Component,
        theme::{Theme, theme_helpers},
    },
};

const WHEEL_STEP: isize = 3;

#[derive(Debug, Default)]
pub struct SectionListComponent;

fn line_style(theme: &dyn Theme, role: LineRole) -> Style {
    match role {
        LineRole::ListHeading => theme.accent_emphasis_style(),
        LineRole::SectionTitle => theme.text_secondary_style().add_modifier(Modifier::BOLD),
        LineRole::SectionDescription | LineRole::UseCaseBody => theme.text_muted_style(),
        LineRole::UseCaseTitle => theme.accent_primary_style(),
        LineRole::Spacer => Style::default(),
    }
}

impl Component for SectionListComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let Some(list) = app.showroom.active_list_mut() else {
            return Vec::new();
        };
        match key.code {
            KeyCode::Up | KeyCode::Char('k') => list.scroll_lines(-1),
            KeyCode::Down | KeyCode::Char('j') => list.scroll_lines(1),
            KeyCode::PageUp => list.scroll_pages(-1),
            KeyCode::PageDown | KeyCode::Char(' ') => list.scroll_pages(1),
            KeyCode::Home | KeyCode::Char('g') => list.scroll_to_top(),
            KeyCode::End | KeyCode::Char('G') => list.scroll_to_end(),
            _ => {}
        }
        Vec::new()
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if let Some(list) = app.showroom.active_list_mut() {
            match mouse.kind {
                MouseEventKind::ScrollUp => list.scroll_lines(-WHEEL_STEP),
                MouseEventKind::ScrollDown => list.scroll_lines(WHEEL_STEP),
                _ => {}
            }
        }
        Vec::new()
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let (list, focused, area_slot) = match app.showroom.layout_mut() {
            ShowroomLayout::Drawer(layout) => (Some(&mut layout.list), layout.f_list.get(), &mut layout.list_area),
            ShowroomLayout::Tv(layout) => (layout.detail.as_mut(), layout.f_detail.get(), &mut layout.detail_area),
        };
        *area_slot = rect;
        let Some(list) = list else {
            return;
        };

        let block = theme_helpers::block(theme, None, focused);
        let inner = block.inner(rect).inner(Margin::new(1, 0));
        frame.render_widget(block, rect);
        render_list(frame, inner, theme, list);
    }
}

fn render_list(frame: &mut Frame, area: Rect, theme: &dyn Theme, list: &mut VirtualSectionList) {
    // Keep one column free for the scrollbar.
    list.layout(area.width.saturating_sub(1), area.height);
    let window = list.visible_window();
    let lines: Vec<Line> = window
        .lines
        .into_iter()
        .map(|line| Line::from(Span::styled(line.text, line_style(theme, line.role))))
        .collect();
    let skip = u16::try_from(window.skip).unwrap_or(u16::MAX);
    frame.render_widget(Paragraph::new(lines).scroll((skip, 0)), area);

    let metrics = list.metrics();
    theme_helpers::render_vertical_scrollbar(
        frame,
        area,
        theme,
        metrics.content_height(),
        metrics.offset(),
        metrics.viewport_height(),
    );
}
