pub mod app;
pub mod event;
pub mod theme;
pub mod ui;

pub use app::App;
pub use theme::ThemeColors;

use std::time::Duration;

use crate::api::{ApiClient, ApiError};
use crate::dashboard::Action;
use crate::players::{ModelType, PlayerStatRecord};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};
use tokio::task::JoinHandle;
use tokio::time::error::Elapsed;
use tracing::warn;

const FETCH_TIMEOUT: Duration = Duration::from_secs(20);

type FetchResult = (ModelType, Result<Result<Vec<PlayerStatRecord>, ApiError>, Elapsed>);

fn spawn_fetch(client: ApiClient, model: ModelType) -> JoinHandle<FetchResult> {
    tokio::spawn(async move {
        let result = tokio::time::timeout(FETCH_TIMEOUT, crate::fetch::fetch_player_records(&client, model)).await;
        (model, result)
    })
}

pub async fn run_tui(mut app: App, client: ApiClient) -> anyhow::Result<()> {
    // Buffer log output while the TUI is active to prevent it corrupting the display
    crate::logging::activate_buffer();

    // Init terminal (sets up panic hooks automatically)
    let mut terminal = ratatui::init();

    let mut events = EventHandler::new(250);
    let mut pending_fetch: Option<JoinHandle<FetchResult>> = None;

    let result = loop {
        // Spawn a fetch if one was requested and none is running. A model
        // switch during a fetch is picked up once that fetch finishes.
        if app.needs_fetch && pending_fetch.is_none() {
            app.needs_fetch = false;
            let fetch_client = if app.force_refresh {
                app.force_refresh = false;
                client.refreshing()
            } else {
                client.clone()
            };
            pending_fetch = Some(spawn_fetch(fetch_client, app.state.model));
            app.dispatch(Action::LoadStarted);
        }

        if let Err(e) = terminal.draw(|frame| ui::draw(frame, &mut app)) {
            break Err(e.into());
        }

        match events.next().await {
            Event::Key(key) => handle_key_event(&mut app, key),
            Event::Tick => {
                app.update_flash();
                app.advance_spinner();
            }
            Event::Resize => {}
        }

        // Check if background fetch has completed
        if let Some(handle) = pending_fetch.take_if(|h| h.is_finished()) {
            match handle.await {
                Ok((model, Ok(Ok(records)))) => app.data_loaded(model, records),
                Ok((model, Ok(Err(e)))) => {
                    if model == app.state.model {
                        app.load_failed(e.to_string());
                    } else {
                        warn!(model = model.slug(), error = %e, "discarding failed fetch for previous model");
                    }
                }
                Ok((model, Err(_elapsed))) => {
                    if model == app.state.model {
                        app.load_failed(format!("timed out after {}s", FETCH_TIMEOUT.as_secs()));
                    }
                }
                Err(e) => app.load_failed(format!("fetch task panicked: {}", e)),
            }
        }

        if app.should_quit {
            break Ok(());
        }
    };

    // Restore terminal
    ratatui::restore();

    // Flush buffered log lines now that the terminal is restored
    crate::logging::flush_buffer();

    result
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') => app.should_quit = true,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => app.should_quit = true,

            // Navigation
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            KeyCode::Char('n') | KeyCode::Right => app.next_page(),
            KeyCode::Char('p') | KeyCode::Left => app.previous_page(),

            // Filters
            KeyCode::Char('/') => app.start_search(),
            KeyCode::Char('P') => app.cycle_position(),
            KeyCode::Char('T') => app.cycle_team(),
            KeyCode::Char('c') => app.clear_filters(),

            // Model and view
            KeyCode::Char('m') => app.select_model(app.state.model.next()),
            KeyCode::Char('M') => app.select_model(app.state.model.previous()),
            KeyCode::Char('s') => app.cycle_page_size(),
            KeyCode::Char('v') => app.toggle_view_mode(),

            // Weights and breakdown
            KeyCode::Char('w') => app.open_weight_editor(),
            KeyCode::Char('b') => app.show_score_breakdown(),

            // Refresh (manual = force fresh data)
            KeyCode::Char('r') => app.request_refresh(),

            KeyCode::Char('?') => app.show_help(),
            _ => {}
        },
        app::InputMode::Search => match key.code {
            KeyCode::Enter => app.finish_search(),
            KeyCode::Esc => app.cancel_search(),
            KeyCode::Backspace => app.pop_search_char(),
            KeyCode::Char(c) => app.push_search_char(c),
            _ => {}
        },
        app::InputMode::WeightEditor => match key.code {
            KeyCode::Esc | KeyCode::Char('w') | KeyCode::Char('q') => app.close_weight_editor(),
            KeyCode::Char('j') | KeyCode::Down => app.next_weight(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_weight(),
            KeyCode::Enter => app.start_weight_input(),
            KeyCode::Char('p') => app.cycle_preset(),
            KeyCode::Char('R') => app.reset_weights(),
            _ => {}
        },
        app::InputMode::WeightInput => match key.code {
            KeyCode::Enter => app.confirm_weight_input(),
            KeyCode::Esc => app.cancel_weight_input(),
            KeyCode::Backspace => {
                app.weight_input.pop();
            }
            KeyCode::Char(c) if c.is_ascii_digit() || c == '.' || c == '-' => app.weight_input.push(c),
            // Ignore all other keys (don't propagate to the editor)
            _ => {}
        },
        app::InputMode::ScoreBreakdown => match key.code {
            KeyCode::Esc | KeyCode::Char('b') => app.dismiss_score_breakdown(),
            KeyCode::Char('j') | KeyCode::Down => app.next_row(),
            KeyCode::Char('k') | KeyCode::Up => app.previous_row(),
            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
