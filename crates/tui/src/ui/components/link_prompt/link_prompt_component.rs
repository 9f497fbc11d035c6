//! Overlay prompt that accepts a deep link and routes it through the same
//! navigation path as links passed on the command line.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Rect},
    text::{Line, Span},
    widgets::{Clear, Paragraph},
};
use showroom_types::Effect;
use showroom_util::parse_deep_link;
use tracing::debug;

use crate::{
    app::App,
    ui::{
        components::component::Component,
        theme::theme_helpers::{self, build_hint_spans},
        utils::centered_rect_with_height,
    },
};

const PROMPT_HEIGHT: u16 = 5;

#[derive(Debug, Default)]
pub struct LinkPromptComponent;

impl Component for LinkPromptComponent {
    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        let prompt = &mut app.link_prompt;
        match key.code {
            KeyCode::Esc => vec![Effect::CloseLinkPrompt],
            KeyCode::Enter => match parse_deep_link(prompt.input()) {
                Ok(params) => {
                    debug!(link = prompt.input(), "link prompt submitted");
                    vec![Effect::CloseLinkPrompt, Effect::Navigate(params)]
                }
                Err(error) => {
                    prompt.set_error(error.to_string());
                    Vec::new()
                }
            },
            KeyCode::Backspace => {
                prompt.pop();
                Vec::new()
            }
            KeyCode::Char('u') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.open();
                Vec::new()
            }
            KeyCode::Char(character) if !key.modifiers.contains(KeyModifiers::CONTROL) => {
                prompt.push(character);
                Vec::new()
            }
            _ => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, rect: Rect, app: &mut App) {
        let theme = &*app.ctx.theme;
        let area = centered_rect_with_height(70, PROMPT_HEIGHT, rect);
        frame.render_widget(Clear, area);

        let focused = app.link_prompt.f_input.get();
        let block = theme_helpers::block(theme, Some("Open link"), focused);
        let inner = block.inner(area);
        frame.render_widget(block, area);

        let [input_area, _, footer_area] =
            Layout::vertical([Constraint::Length(1), Constraint::Length(1), Constraint::Length(1)]).areas(inner);

        let prompt = &app.link_prompt;
        let valid = prompt.error().is_none();
        let input = Line::from(vec![
            Span::styled("› ", theme.accent_emphasis_style()),
            Span::styled(prompt.input().to_string(), theme_helpers::input_style(theme, valid, focused)),
        ]);
        frame.render_widget(Paragraph::new(input), input_area);

        let footer = match prompt.error() {
            Some(error) => Line::from(Span::styled(error.to_string(), theme.status_error())),
            None => Line::from(build_hint_spans(theme, &[("Enter", "open"), ("Esc", "cancel")])),
        };
        frame.render_widget(Paragraph::new(footer), footer_area);

        let cursor_x = input_area.x + 2 + unicode_width::UnicodeWidthStr::width(prompt.input()) as u16;
        frame.set_cursor_position((cursor_x.min(input_area.right().saturating_sub(1)), input_area.y));
    }
}
