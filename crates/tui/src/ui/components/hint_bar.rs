//! Single-line strip with the status message (if any) and the key bindings
//! that apply to the current layout state.

use ratatui::{Frame, layout::Rect, text::Line, text::Span, widgets::Paragraph};

use crate::{
    app::App,
    showroom::ShowroomLayout,
    ui::{components::component::Component, theme::theme_helpers::build_hint_spans},
};

#[derive(Debug, Default)]
pub struct HintBarComponent;

impl HintBarComponent {
    fn hints(app: &App) -> &'static [(&'static str, &'static str)] {
        if app.link_prompt.is_open() {
            return &[("Enter", "open"), ("Esc", "cancel")];
        }
        match app.showroom.layout() {
            ShowroomLayout::Drawer(layout) if layout.drawer.is_open() => &[
                ("↑/↓", "select"),
                ("←/→", "section"),
                ("Enter", "go"),
                ("Tab", "focus"),
                ("Esc", "close"),
                (":", "link"),
                ("q", "quit"),
            ],
            ShowroomLayout::Drawer(_) => &[("↑/↓", "scroll"), ("PgUp/PgDn", "page"), ("m", "menu"), (":", "link"), ("q", "quit")],
            ShowroomLayout::Tv(layout) if layout.detail.is_some() => &[("↑/↓", "scroll"), ("Esc", "back"), (":", "link"), ("q", "quit")],
            ShowroomLayout::Tv(_) => &[("←/→/↑/↓", "move"), ("Enter", "open"), ("Esc", "exit"), (":", "link")],
        }
    }
}

impl Component for HintBarComponent {
    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let mut spans = Vec::new();
        if let Some(status) = app.showroom.status() {
            spans.push(Span::styled(format!("{status}  "), theme.status_error()));
        }
        spans.extend(build_hint_spans(theme, Self::hints(app)));
        frame.render_widget(Paragraph::new(Line::from(spans)).style(theme.text_muted_style()), rect);
    }
}
