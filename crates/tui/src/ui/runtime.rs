//! Runtime: terminal lifecycle and the single event loop.
//!
//! - A dedicated thread blocks on `crossterm::event::read()` and forwards
//!   events over a channel.
//! - Scroll retries and deep links arrive as [`Msg`]s on an unbounded
//!   channel that the scroll coordinator's timer also feeds.
//! - Ticking is fast only while a scroll animation runs and slow otherwise.
//! - Components return [`Effect`]s; the loop applies them in order.
use std::{collections::VecDeque, sync::Arc, time::Duration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, prelude::*};
use showroom_registry::DemoCatalog;
use showroom_types::{Effect, Msg};
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};
use tracing::{debug, info, warn};

use crate::{
    RunOptions,
    app::App,
    ui::{components::component::Component, main_component::MainView},
};

const FAST_TICK: Duration = Duration::from_millis(16);
const IDLE_TICK: Duration = Duration::from_millis(1000);

type Backend = CrosstermBackend<std::io::Stdout>;

/// Spawn a dedicated input thread that blocks on terminal input and forwards
/// `crossterm` events over a Tokio channel.
fn spawn_input_thread() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);
    std::thread::spawn(move || {
        loop {
            match event::read() {
                Ok(event) => {
                    if sender.blocking_send(event).is_err() {
                        break;
                    }
                }
                Err(error) => {
                    warn!(%error, "failed to read terminal event");
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<Terminal<Backend>> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    Ok(Terminal::new(CrosstermBackend::new(stdout))?)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut Terminal<Backend>) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render<B: ratatui::backend::Backend>(terminal: &mut Terminal<B>, app: &mut App, main_view: &mut MainView) -> Result<()> {
    // Rebuild focus just before rendering so structure changes are reflected.
    app.rebuild_focus();
    if app.focus.focused().is_none() {
        app.focus_default();
    }
    terminal
        .draw(|frame| main_view.render(frame, frame.area(), app))
        .map_err(|error| anyhow::anyhow!("draw failed: {error}"))?;
    Ok(())
}

fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, Msg::Resize(width, height)),
        Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

/// Applies effects until the queue drains. Returns `false` once a quit was
/// requested.
fn process_effects(app: &mut App, main_view: &mut MainView, effects: Vec<Effect>) -> bool {
    let mut queue: VecDeque<Effect> = effects.into();
    while let Some(effect) = queue.pop_front() {
        match effect {
            Effect::Quit => return false,
            Effect::OpenLinkPrompt => {
                app.link_prompt.open();
                app.focus_default();
            }
            Effect::CloseLinkPrompt => {
                app.link_prompt.close();
                app.focus_default();
            }
            Effect::Navigate(params) => queue.extend(main_view.handle_message(app, Msg::Navigate(params))),
        }
    }
    true
}

/// Drives the app until quit, input shutdown or Ctrl+C.
async fn event_loop<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
    msg_receiver: &mut mpsc::UnboundedReceiver<Msg>,
) -> Result<()> {
    let mut current_interval = IDLE_TICK;
    let mut ticker = time::interval(current_interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

    render(terminal, app, main_view)?;

    loop {
        let target_interval = if app.is_animating() { FAST_TICK } else { IDLE_TICK };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = time::interval(current_interval);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
        }

        let effects = tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    debug!("input channel closed");
                    break;
                };
                if let Event::Key(key_event) = event
                    && key_event.code == KeyCode::Char('c')
                    && key_event.modifiers.contains(KeyModifiers::CONTROL)
                {
                    break;
                }
                handle_input_event(app, main_view, event)
            }
            Some(msg) = msg_receiver.recv() => main_view.handle_message(app, msg),
            _ = ticker.tick() => main_view.handle_message(app, Msg::Tick),
            _ = signal::ctrl_c() => break,
        };

        if !process_effects(app, main_view, effects) {
            break;
        }
        render(terminal, app, main_view)?;
    }
    Ok(())
}

/// Entry point for the TUI runtime: sets up the terminal, runs the event
/// loop and restores the terminal on the way out, even when the loop failed.
pub async fn run_app(catalog: Arc<DemoCatalog>, options: RunOptions) -> Result<()> {
    let (msg_sender, mut msg_receiver) = mpsc::unbounded_channel();
    if let Some(params) = options.initial_link.clone() {
        info!(section = ?params.query_index, item = ?params.item_index, "opening initial deep link");
        if msg_sender.send(Msg::Navigate(params)).is_err() {
            warn!("could not queue the initial deep link");
        }
    }

    let mut app = App::new(catalog, &options, msg_sender);
    let mut main_view = MainView::new();
    let mut input_receiver = spawn_input_thread();
    let mut terminal = setup_terminal()?;

    let outcome = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver, &mut msg_receiver).await;

    app.showroom.unmount();
    cleanup_terminal(&mut terminal)?;
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use ratatui::backend::TestBackend;
    use showroom_types::{DeepLinkParams, Platform, StructuralAddress};

    use crate::{scroll::FrameKind, showroom::ShowroomLayout};

    fn app(platform: Platform) -> App {
        let catalog = Arc::new(DemoCatalog::from_embedded().expect("embedded catalog"));
        let options = RunOptions {
            platform,
            initial_link: None,
            retry_delay: Duration::from_millis(50),
            animate: false,
        };
        let (sender, _receiver) = mpsc::unbounded_channel();
        App::new(catalog, &options, sender)
    }

    fn screen_text(terminal: &Terminal<TestBackend>) -> String {
        let buffer = terminal.backend().buffer();
        buffer.content().iter().map(|cell| cell.symbol()).collect()
    }

    #[tokio::test]
    async fn renders_the_list_heading_on_handsets() {
        let mut app = app(Platform::Handset);
        let mut main_view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        render(&mut terminal, &mut app, &mut main_view).unwrap();

        let text = screen_text(&terminal);
        assert!(text.contains("Showroom"));
        assert!(text.contains("Components to jump start your project!"));
    }

    #[tokio::test]
    async fn quit_stops_effect_processing() {
        let mut app = app(Platform::Handset);
        let mut main_view = MainView::new();
        let keep_running = process_effects(&mut app, &mut main_view, vec![Effect::Quit, Effect::OpenLinkPrompt]);
        assert!(!keep_running);
        assert!(!app.link_prompt.is_open());
    }

    #[tokio::test]
    async fn prompt_effects_toggle_the_prompt() {
        let mut app = app(Platform::Web);
        let mut main_view = MainView::new();
        assert!(process_effects(&mut app, &mut main_view, vec![Effect::OpenLinkPrompt]));
        assert!(app.link_prompt.is_open());
        assert!(process_effects(&mut app, &mut main_view, vec![Effect::CloseLinkPrompt]));
        assert!(!app.link_prompt.is_open());
    }

    #[tokio::test]
    async fn menu_tap_lands_on_the_use_case_after_the_drawer_closes() {
        let mut app = app(Platform::Handset);
        let mut main_view = MainView::new();
        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        app.showroom.toggle_drawer();
        render(&mut terminal, &mut app, &mut main_view).unwrap();

        let disabling = StructuralAddress::new(1, 4);
        let ShowroomLayout::Drawer(layout) = app.showroom.layout_mut() else {
            panic!("handsets use the drawer layout");
        };
        let entry = layout.menu.entries().iter().position(|entry| entry.address == disabling).unwrap();
        layout.menu.select_index(entry);
        assert_eq!(app.showroom.activate_menu_entry(), None);
        assert!(!app.showroom.is_drawer_open());

        render(&mut terminal, &mut app, &mut main_view).unwrap();
        let list = app.showroom.active_list().unwrap();
        assert_eq!(list.top_frame(), Some(FrameKind::UseCase { section: 1, item: 3 }));
        assert!(screen_text(&terminal).contains("Disabling"));
    }

    #[tokio::test]
    async fn navigate_effect_reaches_the_tv_layout() {
        let mut app = app(Platform::Tv);
        let mut main_view = MainView::new();
        let section = app.ctx.catalog.sections()[1].name.to_lowercase();
        let effects = vec![Effect::Navigate(DeepLinkParams::new(section, None))];
        assert!(process_effects(&mut app, &mut main_view, effects));
        assert_eq!(app.showroom.selection().selected_index(), Some(1));

        let mut terminal = Terminal::new(TestBackend::new(100, 30)).unwrap();
        render(&mut terminal, &mut app, &mut main_view).unwrap();
        assert!(screen_text(&terminal).contains(&app.ctx.catalog.sections()[1].name));
    }
}
