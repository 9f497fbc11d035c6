use ratatui::{
    Frame,
    layout::Rect,
    style::{Modifier, Style},
    text::Span,
    widgets::{Block, BorderType, Borders, Scrollbar, ScrollbarOrientation, ScrollbarState},
};

use super::roles::{Theme, ThemeRoles};

/// Build a standard Block with theme surfaces and borders.
pub fn block<'a, T: Theme + ?Sized>(theme: &'a T, title: Option<&'a str>, focused: bool) -> Block<'a> {
    let mut block = Block::default()
        .borders(Borders::ALL)
        .border_type(BorderType::Plain)
        .border_style(theme.border_style(focused))
        .style(panel_style(theme));
    if let Some(t) = title {
        block = block.title(Span::styled(t, theme.text_secondary_style().add_modifier(Modifier::BOLD)));
    }
    block
}

/// Style for panel-like containers (set background on widget using `.style`).
pub fn panel_style<T: Theme + ?Sized>(theme: &T) -> Style {
    let ThemeRoles { surface, text, .. } = *theme.roles();
    Style::default().bg(surface).fg(text)
}

/// Card fill; the focused card gets a thick accent border instead of the
/// plain one.
pub fn card_block<'a, T: Theme + ?Sized>(theme: &T, focused: bool) -> Block<'a> {
    let ThemeRoles {
        card, card_focus, border, text, ..
    } = *theme.roles();
    let (border_type, border_color) = if focused {
        (BorderType::Thick, card_focus)
    } else {
        (BorderType::Rounded, border)
    };
    Block::default()
        .borders(Borders::ALL)
        .border_type(border_type)
        .border_style(Style::default().fg(border_color))
        .style(Style::default().bg(card).fg(text))
}

/// Style for input fields; caller sets the block border based on focus.
pub fn input_style<T: Theme + ?Sized>(theme: &T, valid: bool, focused: bool) -> Style {
    let ThemeRoles { surface, text, error, .. } = *theme.roles();
    let mut style = Style::default().bg(surface).fg(text);
    if !valid {
        style = style.fg(error);
    }
    if focused {
        style = style.add_modifier(Modifier::BOLD);
    }
    style
}

/// Key/description pairs rendered as `key desc  key desc`.
pub fn build_hint_spans<T: Theme + ?Sized>(theme: &T, hints: &[(&str, &str)]) -> Vec<Span<'static>> {
    let mut spans = Vec::with_capacity(hints.len() * 2);
    for (key, description) in hints {
        spans.push(Span::styled(key.to_string(), theme.accent_emphasis_style()));
        spans.push(Span::styled(format!(" {description}  "), theme.text_muted_style()));
    }
    spans
}

/// Renders a themed vertical scrollbar on the right edge of `area`.
pub fn render_vertical_scrollbar<T: Theme + ?Sized>(
    frame: &mut Frame,
    area: Rect,
    theme: &T,
    content_length: usize,
    position: usize,
    viewport_length: usize,
) {
    if viewport_length == 0 || content_length <= viewport_length {
        return;
    }
    let mut state = ScrollbarState::new(content_length.saturating_sub(viewport_length))
        .position(position)
        .viewport_content_length(viewport_length);
    let scrollbar = Scrollbar::new(ScrollbarOrientation::VerticalRight)
        .begin_symbol(None)
        .end_symbol(None)
        .thumb_style(Style::default().fg(theme.roles().scrollbar_thumb))
        .track_style(Style::default().fg(theme.roles().scrollbar_track));
    frame.render_stateful_widget(scrollbar, area, &mut state);
}
