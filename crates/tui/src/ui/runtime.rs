//! Runtime: event loop and input routing for the shell.
//!
//! Responsibilities
//! - Own the terminal lifecycle (enter/leave alternate screen, raw mode,
//!   mouse capture). The terminal is restored even when the loop fails.
//! - Drive a single event loop over terminal input, ticks and finished
//!   collaborator tasks.
//! - Route input to [`MainView`] and execute the returned `Effect`s.
//!
//! Ticking
//! - Fast interval (16 ms) while a panel transition or the startup gauge is
//!   animating, long interval otherwise. Each tick advances the transition
//!   controller and expires stale status messages.
use std::time::{Duration, Instant};

use anyhow::Result;
use contextflow_types::{Effect, Msg};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event, KeyEventKind, MouseEventKind},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use futures_util::{StreamExt, stream::FuturesUnordered};
use ratatui::{Terminal, prelude::*};
use tokio::task::JoinHandle;
use tokio::{
    signal,
    sync::mpsc,
    time::{self, MissedTickBehavior},
};

use crate::app::App;
use crate::cmd;
use crate::ui::components::Component;
use crate::ui::main_component::MainView;

type CrosstermTerminal = Terminal<CrosstermBackend<std::io::Stdout>>;

const FAST_INTERVAL: Duration = Duration::from_millis(16);
const IDLE_INTERVAL: Duration = Duration::from_millis(1000);

/// Spawn a task that polls terminal input and forwards `crossterm` events
/// over a Tokio channel.
fn spawn_input_task() -> mpsc::Receiver<Event> {
    let (sender, receiver) = mpsc::channel(500);

    tokio::spawn(async move {
        let mut last_mouse_move = Instant::now();
        loop {
            match event::poll(FAST_INTERVAL) {
                Ok(false) => continue,
                Ok(true) => {}
                Err(e) => {
                    tracing::warn!("Failed to poll terminal input: {}", e);
                    break;
                }
            }
            match event::read() {
                Ok(event) => {
                    // Throttle mouse moves to once per frame.
                    let is_mouse_move = event.as_mouse_event().is_some_and(|e| e.kind == MouseEventKind::Moved);
                    if is_mouse_move {
                        if last_mouse_move.elapsed() < FAST_INTERVAL {
                            continue;
                        }
                        last_mouse_move = Instant::now();
                    }
                    if let Err(e) = sender.send(event).await {
                        tracing::warn!("Failed to send event: {}", e);
                        break;
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to read event: {}", e);
                    break;
                }
            }
        }
    });
    receiver
}

/// Put the terminal into raw mode and enter the alternate screen.
fn setup_terminal() -> Result<CrosstermTerminal> {
    enable_raw_mode()?;
    let mut stdout = std::io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    let terminal = Terminal::new(backend)?;
    Ok(terminal)
}

/// Restore terminal settings and leave the alternate screen.
fn cleanup_terminal(terminal: &mut CrosstermTerminal) -> Result<()> {
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen, DisableMouseCapture)?;
    terminal.show_cursor()?;
    Ok(())
}

fn render(terminal: &mut CrosstermTerminal, app: &mut App, main_view: &mut MainView) -> Result<()> {
    app.now = Instant::now();
    terminal.draw(|frame| {
        let area = frame.area();
        main_view.render(frame, area, app);
    })?;
    Ok(())
}

/// Handle raw crossterm input events and update `App`/components.
fn handle_input_event(app: &mut App, main_view: &mut MainView, input_event: Event) -> Vec<Effect> {
    match input_event {
        Event::Key(key_event) if key_event.kind != KeyEventKind::Release => main_view.handle_key_events(app, key_event),
        Event::Mouse(mouse_event) => main_view.handle_mouse_events(app, mouse_event),
        Event::Resize(width, height) => main_view.handle_message(app, &Msg::Resize(width, height)),
        Event::Key(_) | Event::FocusGained | Event::FocusLost | Event::Paste(_) => Vec::new(),
    }
}

fn ticker_for(interval: Duration) -> time::Interval {
    let mut ticker = time::interval(interval);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker
}

/// Entry point for the runtime: sets up the terminal, runs the event loop
/// and restores the terminal on exit.
pub async fn run_app(mut app: App) -> Result<()> {
    let mut input_receiver = spawn_input_task();
    let mut main_view = MainView::new();
    let mut terminal = setup_terminal()?;

    let outcome = event_loop(&mut terminal, &mut app, &mut main_view, &mut input_receiver).await;
    let cleanup = cleanup_terminal(&mut terminal);
    outcome.and(cleanup)
}

async fn event_loop(
    terminal: &mut CrosstermTerminal,
    app: &mut App,
    main_view: &mut MainView,
    input_receiver: &mut mpsc::Receiver<Event>,
) -> Result<()> {
    let mut pending: FuturesUnordered<JoinHandle<Msg>> = FuturesUnordered::new();
    let mut effects: Vec<Effect> = Vec::with_capacity(5);

    let mut current_interval = IDLE_INTERVAL;
    let mut ticker = ticker_for(current_interval);

    render(terminal, app, main_view)?;

    while !app.should_quit {
        let target_interval = if app.is_animating() {
            FAST_INTERVAL
        } else {
            IDLE_INTERVAL
        };
        if target_interval != current_interval {
            current_interval = target_interval;
            ticker = ticker_for(current_interval);
        }

        tokio::select! {
            maybe_event = input_receiver.recv() => {
                let Some(event) = maybe_event else {
                    // Input channel closed; shut down cleanly.
                    break;
                };
                app.now = Instant::now();
                effects.extend(handle_input_event(app, main_view, event));
            }

            _ = ticker.tick() => {
                app.now = Instant::now();
                effects.extend(main_view.handle_message(app, &Msg::Tick));
            }

            Some(joined) = pending.next(), if !pending.is_empty() => {
                app.now = Instant::now();
                match joined {
                    Ok(msg) => effects.extend(main_view.handle_message(app, &msg)),
                    Err(error) => {
                        tracing::warn!(error = %error, "Collaborator task failed");
                        app.set_status(format!("Background task failed: {error}"));
                    }
                }
            }

            _ = signal::ctrl_c() => { break; }
        }

        drain_effects(app, main_view, &mut effects, &mut pending);
        render(terminal, app, main_view)?;
    }
    Ok(())
}

/// Executes queued effects until no new ones are produced.
fn drain_effects(
    app: &mut App,
    main_view: &mut MainView,
    effects: &mut Vec<Effect>,
    pending: &mut FuturesUnordered<JoinHandle<Msg>>,
) {
    while !effects.is_empty() {
        // move effects out of their Vec to avoid processing new effects while processing current ones
        let mut effects_to_process = std::mem::take(effects);
        handle_navigation_effects(app, &mut effects_to_process);
        process_effects(app, main_view, effects_to_process, pending, effects);
    }
}

/// Applies panel selections directly to the app and removes them from
/// `effects`.
pub(crate) fn handle_navigation_effects(app: &mut App, effects: &mut Vec<Effect>) {
    let navigation_effects = effects
        .extract_if(.., |effect| matches!(effect, Effect::SelectPanel(_)))
        .collect::<Vec<Effect>>();

    for effect in navigation_effects {
        if let Effect::SelectPanel(panel) = effect {
            app.select_panel(panel);
        }
    }
}

fn process_effects(
    app: &mut App,
    main_view: &mut MainView,
    effects: Vec<Effect>,
    pending: &mut FuturesUnordered<JoinHandle<Msg>>,
    effects_out: &mut Vec<Effect>,
) {
    if effects.is_empty() {
        return;
    }

    let command_batch = cmd::run_from_effects(app, effects);
    pending.extend(command_batch.pending);
    for msg in command_batch.immediate {
        effects_out.extend(main_view.handle_message(app, &msg));
    }
}
