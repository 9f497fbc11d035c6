//! Top-level view: title bar, the platform body, the hint bar and the link
//! prompt overlay. Routes input to whichever component owns focus.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers, MouseButton, MouseEvent, MouseEventKind};
use ratatui::{
    Frame,
    layout::{Constraint, Layout, Position, Rect},
    style::{Style, Stylize},
    text::{Line, Span},
    widgets::{Block, Paragraph},
};
use showroom_types::{Effect, Msg};

use crate::{
    app::App,
    showroom::ShowroomLayout,
    tv::BackHandling,
    ui::components::{
        CardGridComponent, DrawerMenuComponent, HintBarComponent, LinkPromptComponent, SectionListComponent, component::Component,
    },
};

const MENU_GLYPH: &str = "☰";
const DRAWER_WIDTH: u16 = 32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum MouseTarget {
    Menu,
    List,
    Grid,
}

impl MouseTarget {
    fn at(app: &App, position: Position) -> Option<Self> {
        match app.showroom.layout() {
            ShowroomLayout::Drawer(layout) if layout.drawer.is_open() && layout.menu.last_area.contains(position) => Some(Self::Menu),
            ShowroomLayout::Drawer(layout) if layout.list_area.contains(position) => Some(Self::List),
            ShowroomLayout::Tv(layout) if layout.detail.is_some() => layout.detail_area.contains(position).then_some(Self::List),
            ShowroomLayout::Tv(_) => Some(Self::Grid),
            _ => None,
        }
    }
}

#[derive(Debug, Default)]
pub struct MainView {
    section_list: SectionListComponent,
    drawer_menu: DrawerMenuComponent,
    card_grid: CardGridComponent,
    link_prompt: LinkPromptComponent,
    hint_bar: HintBarComponent,
    title_area: Rect,
}

impl MainView {
    pub fn new() -> Self {
        Self::default()
    }

    fn menu_focused(app: &App) -> bool {
        match app.showroom.layout() {
            ShowroomLayout::Drawer(layout) => layout.drawer.is_open() && layout.menu.f_menu.get(),
            ShowroomLayout::Tv(_) => false,
        }
    }

    fn handle_tv_keys(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if matches!(key.code, KeyCode::Esc | KeyCode::Backspace) {
            return match app.showroom.on_back(&app.back_signals) {
                BackHandling::Consumed => {
                    app.focus_default();
                    Vec::new()
                }
                BackHandling::Propagate => vec![Effect::Quit],
            };
        }
        if app.showroom.active_list().is_some() {
            self.section_list.handle_key_events(app, key)
        } else {
            self.card_grid.handle_key_events(app, key)
        }
    }

    fn handle_drawer_keys(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        match key.code {
            KeyCode::Char('m') => {
                app.showroom.toggle_drawer();
                app.focus_default();
                return Vec::new();
            }
            KeyCode::Esc if app.showroom.is_drawer_open() => {
                app.showroom.close_drawer();
                app.focus_default();
                return Vec::new();
            }
            KeyCode::Tab if app.showroom.is_drawer_open() => {
                app.focus.next();
                return Vec::new();
            }
            KeyCode::BackTab if app.showroom.is_drawer_open() => {
                app.focus.prev();
                return Vec::new();
            }
            _ => {}
        }
        if Self::menu_focused(app) {
            self.drawer_menu.handle_key_events(app, key)
        } else {
            self.section_list.handle_key_events(app, key)
        }
    }

    fn body_areas(app: &App, body: Rect) -> (Option<Rect>, Rect) {
        if !app.showroom.is_drawer_open() {
            return (None, body);
        }
        let [menu, list] = Layout::horizontal([Constraint::Length(DRAWER_WIDTH), Constraint::Min(1)]).areas(body);
        (Some(menu), list)
    }
}

impl Component for MainView {
    fn handle_message(&mut self, app: &mut App, msg: Msg) -> Vec<Effect> {
        app.update(&msg)
    }

    fn handle_key_events(&mut self, app: &mut App, key: KeyEvent) -> Vec<Effect> {
        if app.link_prompt.is_open() {
            return self.link_prompt.handle_key_events(app, key);
        }
        app.showroom.clear_status();

        if key.modifiers.contains(KeyModifiers::CONTROL) {
            return Vec::new();
        }
        match key.code {
            KeyCode::Char('q') => return vec![Effect::Quit],
            KeyCode::Char(':') => return vec![Effect::OpenLinkPrompt],
            _ => {}
        }

        if app.ctx.platform.is_tv() {
            self.handle_tv_keys(app, key)
        } else {
            self.handle_drawer_keys(app, key)
        }
    }

    fn handle_mouse_events(&mut self, app: &mut App, mouse: MouseEvent) -> Vec<Effect> {
        if app.link_prompt.is_open() {
            return Vec::new();
        }
        let position = Position::new(mouse.column, mouse.row);

        if self.title_area.contains(position) {
            let on_glyph = mouse.column < self.title_area.x + 3;
            if mouse.kind == MouseEventKind::Down(MouseButton::Left) && on_glyph && !app.ctx.platform.is_tv() {
                app.showroom.toggle_drawer();
                app.focus_default();
            }
            return Vec::new();
        }

        match MouseTarget::at(app, position) {
            Some(MouseTarget::Menu) => self.drawer_menu.handle_mouse_events(app, mouse),
            Some(MouseTarget::List) => self.section_list.handle_mouse_events(app, mouse),
            Some(MouseTarget::Grid) => self.card_grid.handle_mouse_events(app, mouse),
            None => Vec::new(),
        }
    }

    fn render(&mut self, frame: &mut Frame, area: Rect, app: &mut App) {
        let background = Paragraph::new("").style(Style::default().bg(app.ctx.theme.roles().background));
        frame.render_widget(background, area);
        app.showroom.last_area = area;

        let [title, body, hints] = Layout::vertical([Constraint::Length(1), Constraint::Min(1), Constraint::Length(1)]).areas(area);
        self.title_area = title;
        render_title(frame, title, app);

        if app.ctx.platform.is_tv() {
            if app.showroom.active_list().is_some() {
                self.section_list.render(frame, body, app);
            } else {
                self.card_grid.render(frame, body, app);
            }
        } else {
            let (menu, list) = Self::body_areas(app, body);
            if let Some(menu) = menu {
                self.drawer_menu.render(frame, menu, app);
            }
            self.section_list.render(frame, list, app);
        }

        self.hint_bar.render(frame, hints, app);

        if app.link_prompt.is_open() {
            render_overlay(frame, app);
            self.link_prompt.render(frame, area, app);
        }
    }
}

fn render_title(frame: &mut Frame, area: Rect, app: &App) {
    let theme = &*app.ctx.theme;
    let mut spans = Vec::new();
    if !app.ctx.platform.is_tv() {
        spans.push(Span::styled(format!(" {MENU_GLYPH} "), theme.accent_primary_style()));
    } else {
        spans.push(Span::raw(" "));
    }
    spans.push(Span::styled("Showroom", theme.accent_emphasis_style()));
    spans.push(Span::styled(format!(" · {}", app.ctx.platform.as_str()), theme.text_muted_style()));
    let title = Paragraph::new(Line::from(spans)).style(Style::default().bg(theme.roles().surface));
    frame.render_widget(title, area);
}

/// Dims everything behind a modal.
fn render_overlay(frame: &mut Frame, app: &App) {
    frame.render_widget(Block::default().style(Style::default().bg(app.ctx.theme.roles().surface_muted)).dim(), frame.area());
}
