mod config;

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use clap::Parser;
use parking_lot::Mutex;
use tracing::warn;

use alarmscope_bus::{BusDecoder, Decoder, EventFilter, EventTopic, InMemoryEventBus};
use alarmscope_intake::{EventTable, IntakeQueue, IntakeRunner};
use alarmscope_panel::PanelConnection;
use alarmscope_tui::{
    Action, AppState, ConfirmDialog, ConfirmDialogView, Event, EventLogScreen, EventPump,
    HelpOverlay, KeyBindings, KeyContext, KeypadInput, KeypadMap, PendingAction, Tui,
};
use alarmscope_types::FlashCategory;

use crate::config::AppConfig;

/// Alarmscope - a terminal UI for monitoring security alarm panel events
#[derive(Parser, Debug)]
#[command(name = "alarmscope")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Panel gateway address (host:port, overrides the config file)
    #[arg(value_name = "ADDRESS")]
    panel: Option<String>,

    /// Path to a TOML config file
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Maximum rows kept in the event table
    #[arg(long)]
    buffer_size: Option<usize>,

    /// Rows per table page
    #[arg(long)]
    page_size: Option<usize>,
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Args::parse();

    // The terminal belongs to the TUI; diagnostics go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::WARN.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let result = run_app(args).await;

    if let Err(e) = &result {
        eprintln!("Error: {:#}", e);
    }

    result
}

async fn run_app(args: Args) -> Result<()> {
    let config = AppConfig::load(args.config.as_deref())?;
    let panel_addr = args.panel.unwrap_or_else(|| config.panel_addr());
    let buffer_size = args.buffer_size.unwrap_or(config.ui.buffer_size);
    let page_size = args.page_size.unwrap_or(config.ui.page_size);

    // Event bus, display sink, and the intake queue between them
    let bus = Arc::new(InMemoryEventBus::new());
    let table = EventTable::new(buffer_size, page_size);
    let queue = Arc::new(Mutex::new(IntakeQueue::new(table.clone())));

    // Subscribed once for the process lifetime
    let mut runner = IntakeRunner::start(
        queue.clone(),
        bus.subscribe(EventFilter::topic(EventTopic::Message)),
    );

    // Panel gateway connection
    let mut panel = PanelConnection::new();
    panel.start(panel_addr.clone(), bus.clone());

    let decoder = BusDecoder::new(bus.clone());
    decoder.init();

    // Terminal and input
    let mut tui = Tui::enter()?;
    let mut events = EventPump::new(Duration::from_millis(config.ui.tick_ms));
    let keybindings = KeyBindings::new();
    let keypad = KeypadMap::new();
    let mut state = AppState::new(panel_addr);

    // Initial render
    sync_intake_view(&mut state, &queue);
    render(&mut tui, &state, &table)?;

    // Main event loop
    while let Some(event) = events.next().await {
        match event {
            Event::Key(key) => {
                let action = if state.confirm.is_some() {
                    keybindings.get_action(KeyContext::ConfirmDialog, &key)
                } else if let Some(action) = keybindings.get_action(KeyContext::EventLog, &key) {
                    Some(action)
                } else {
                    // Unbound keys reach the simulated keypad.
                    keypad.lookup(&key).map(|input| match input {
                        KeypadInput::Key(k) => Action::Keypad(k),
                        KeypadInput::Emergency(kind) => Action::RequestEmergency(kind),
                    })
                };

                if let Some(action) = action {
                    handle_action(&mut state, &queue, &table, &decoder, action);
                }
            }
            Event::Tick => {
                state.flash.expire();
            }
            Event::Resize(_, _) => {}
            Event::Error(e) => {
                state.flash.push(e, FlashCategory::Error);
            }
        }

        if state.should_quit {
            break;
        }

        sync_intake_view(&mut state, &queue);
        render(&mut tui, &state, &table)?;
    }

    // Cleanup
    panel.stop();
    runner.stop();
    events.shutdown();
    tui.restore()?;

    Ok(())
}

fn handle_action(
    state: &mut AppState,
    queue: &Arc<Mutex<IntakeQueue<EventTable>>>,
    table: &EventTable,
    decoder: &BusDecoder,
    action: Action,
) {
    match action {
        Action::Quit => state.should_quit = true,
        Action::ToggleHelp => state.toggle_help(),

        Action::TogglePause => {
            queue.lock().toggle_pause();
        }
        Action::RequestClearLog => state.open_confirm(ConfirmDialog::clear_log()),
        Action::RequestEmergency(kind) => state.open_confirm(ConfirmDialog::emergency(kind)),

        Action::Confirm => {
            if let Some(dialog) = state.take_confirm() {
                match dialog.action {
                    PendingAction::ClearLog => {
                        if let Err(e) = queue.lock().clear() {
                            warn!(error = %e, "clearing the event log failed");
                            state
                                .flash
                                .push("Failed to clear the event log.", FlashCategory::Error);
                        }
                    }
                    PendingAction::Emergency(kind) => {
                        decoder.emit(kind.keypress());
                        state.flash.push(kind.flash_text(), FlashCategory::Error);
                    }
                }
            }
        }
        Action::Cancel => {
            state.take_confirm();
        }

        Action::NextPage => table.next_page(),
        Action::PrevPage => table.prev_page(),
        Action::FirstPage => table.first_page(),
        Action::LastPage => table.last_page(),

        Action::DismissFlash => state.flash.dismiss_oldest(),

        Action::Keypad(key) => decoder.emit(key),

        Action::Render => {}
    }
}

/// Refresh the UI-facing mirrors of the intake queue before rendering
fn sync_intake_view(state: &mut AppState, queue: &Arc<Mutex<IntakeQueue<EventTable>>>) {
    let queue = queue.lock();
    state.paused = queue.is_paused();
    state.backlog_len = queue.backlog_len();
    state.pause_label = queue.pause_label();
}

fn render(tui: &mut Tui, state: &AppState, table: &EventTable) -> Result<()> {
    tui.draw(|frame| {
        EventLogScreen::render(frame, state, table);
        if let Some(dialog) = &state.confirm {
            ConfirmDialogView::render(frame, dialog);
        }
        if state.help_visible {
            HelpOverlay::render(frame);
        }
    })?;
    Ok(())
}
