//! Typeahead demo entry point
//!
//! Attaches an autocomplete controller to one field of an in-memory record
//! and drives it from the terminal. On exit the record is printed as JSON.
//!
//! # Usage
//!
//! ```bash
//! # Built-in list of European capitals
//! typeahead
//!
//! # Own word list, forced choice, slow backend
//! typeahead --items cities.txt --field city --forced-choice --latency-ms 400
//!
//! # JSON items copied into the whole record on selection
//! typeahead --items airports.json --field name --update-record --log-file typeahead.log
//! ```
//!
//! # Keys
//!
//! - typing edits the field; Up/Down/Enter/Esc drive the overlay
//! - Ctrl+Space opens the overlay for the current value
//! - Tab or a click outside moves focus away (blur), Tab again returns
//! - Enter or Esc with no overlay open, or Ctrl+C, exits

use crossterm::event::{
    self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
    KeyModifiers, MouseButton, MouseEvent, MouseEventKind,
};
use crossterm::execute;
use crossterm::terminal::{
    EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode,
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Position, Rect},
    widgets::Paragraph,
};
use std::collections::BTreeSet;
use std::io::{self, Stdout};
use std::path::Path;
use std::time::Duration;
use tracing::{debug, info};
use typeahead::binding::ITEM_NOT_EXIST;
use typeahead::cli::Cli;
use typeahead::output;
use typeahead::view::{self, FieldInput, OverlayList, Theme};
use typeahead::{
    AutocompleteEvent, BoundField, FormBinding, FormRecord, InputController, KeyResponse,
    OverlayKey, StaticSource, TypeaheadError,
};

type Result<T> = std::result::Result<T, TypeaheadError>;
type Controller = InputController<BoundField, StaticSource>;

/// Redraw interval while nothing happens
const FRAME: Duration = Duration::from_millis(16);

/// Maximum width of the field box
const FIELD_WIDTH: u16 = 48;

const HELP: &str = "type to search | ↑↓ Enter Esc | Ctrl+Space: open | Tab: blur | Ctrl+C: quit";

/// What the host does after an input event
enum Flow {
    Continue,
    Exit,
}

/// Host-side UI state around the controller
struct Host {
    theme: Theme,
    focused: bool,
    overlay_rect: Option<Rect>,
    field_rect: Rect,
    log: Vec<AutocompleteEvent>,
}

fn setup_tracing(log_file: Option<&Path>) {
    use std::fs::OpenOptions;
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::prelude::*;

    // The terminal belongs to the UI; without a log file nothing is logged
    let Some(path) = log_file else {
        return;
    };

    match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => {
            let filter =
                EnvFilter::try_from_env("TYPEAHEAD_LOG").unwrap_or_else(|_| EnvFilter::new("info"));

            let file_layer = tracing_subscriber::fmt::layer()
                .with_writer(file)
                .with_ansi(false)
                .with_target(true);

            tracing_subscriber::registry()
                .with(filter)
                .with(file_layer)
                .init();

            info!(path = ?path, "tracing initialized");
        }
        Err(e) => eprintln!("Cannot open log file {}: {e}", path.display()),
    }
}

/// Setup terminal for TUI
fn setup_terminal() -> Result<Terminal<CrosstermBackend<Stdout>>> {
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
    let backend = CrosstermBackend::new(stdout);
    Terminal::new(backend).map_err(Into::into)
}

/// Cleanup terminal after TUI
fn cleanup_terminal() -> Result<()> {
    disable_raw_mode()?;
    execute!(io::stdout(), LeaveAlternateScreen, DisableMouseCapture)?;
    Ok(())
}

/// Record with the bound field plus every field the items carry
fn build_record(field: &str, items: &[typeahead::Item]) -> FormRecord {
    let mut names = BTreeSet::from([field.to_string()]);
    for item in items {
        names.extend(item.fields().map(|(name, _)| name.clone()));
    }
    FormRecord::with_fields(names)
}

fn draw(frame: &mut Frame, controller: &Controller, host: &mut Host) {
    let [field_row, _, help_row] = Layout::vertical([
        Constraint::Length(3),
        Constraint::Min(0),
        Constraint::Length(1),
    ])
    .areas(frame.area());
    let field_rect = Rect {
        width: field_row.width.min(FIELD_WIDTH),
        ..field_row
    };

    let binding = controller.binding();
    let value = binding.value();
    frame.render_widget(
        FieldInput::new(binding.field_name(), &value, &host.theme)
            .error(binding.error(ITEM_NOT_EXIST))
            .focused(host.focused),
        field_rect,
    );
    frame.render_widget(Paragraph::new(HELP).style(host.theme.dimmed_style()), help_row);

    host.field_rect = field_rect;
    host.overlay_rect = controller.overlay_view().map(|overlay| {
        let area = view::overlay_area(field_rect, &overlay, frame.area());
        frame.render_widget(OverlayList::new(&overlay, &host.theme), area);
        area
    });
}

fn edit(controller: &mut Controller, change: impl FnOnce(&mut String)) {
    let mut value = controller.binding().value();
    change(&mut value);
    controller.binding_mut().input(value.clone());
    controller.on_value_change(&value);
}

fn blur(controller: &mut Controller, host: &mut Host) {
    if host.focused {
        host.focused = false;
        controller.on_blur();
    }
}

fn handle_key(controller: &mut Controller, host: &mut Host, key: KeyEvent) -> Flow {
    if key.modifiers.contains(KeyModifiers::CONTROL) {
        match key.code {
            KeyCode::Char('c') => return Flow::Exit,
            KeyCode::Char(' ') if host.focused => controller.force_load(),
            _ => {}
        }
        return Flow::Continue;
    }

    if key.code == KeyCode::Tab {
        if host.focused {
            blur(controller, host);
        } else {
            host.focused = true;
        }
        return Flow::Continue;
    }

    if let Some(overlay_key) = OverlayKey::from_key_event(&key) {
        let response = if host.focused {
            controller.on_key(overlay_key)
        } else {
            KeyResponse::PassThrough
        };
        let submits = matches!(overlay_key, OverlayKey::Enter | OverlayKey::Escape);
        return if response == KeyResponse::PassThrough && submits {
            Flow::Exit
        } else {
            Flow::Continue
        };
    }

    if !host.focused {
        return Flow::Continue;
    }
    match key.code {
        KeyCode::Char(c) => edit(controller, |value| value.push(c)),
        KeyCode::Backspace => edit(controller, |value| {
            value.pop();
        }),
        _ => {}
    }
    Flow::Continue
}

fn handle_mouse(controller: &mut Controller, host: &mut Host, mouse: MouseEvent) {
    if mouse.kind != MouseEventKind::Down(MouseButton::Left) {
        return;
    }
    let at = Position::new(mouse.column, mouse.row);

    if host.field_rect.contains(at) {
        host.focused = true;
        return;
    }

    // Pressing outside the field blurs it before the click lands
    blur(controller, host);

    let index = controller.overlay_view().zip(host.overlay_rect).and_then(|(overlay, area)| {
        view::item_at(&overlay, area, mouse.column, mouse.row)
    });
    if let Some(index) = index {
        controller.pointer_select(index);
    }
}

async fn run(
    terminal: &mut Terminal<CrosstermBackend<Stdout>>,
    controller: &mut Controller,
    host: &mut Host,
) -> Result<()> {
    loop {
        terminal.draw(|frame| draw(frame, controller, host))?;

        tokio::select! {
            wake = controller.tick() => debug!(?wake, "controller woke"),
            () = tokio::time::sleep(FRAME) => {}
        }

        while event::poll(Duration::ZERO)? {
            let flow = match event::read()? {
                Event::Key(key) if key.kind != KeyEventKind::Release => {
                    handle_key(controller, host, key)
                }
                Event::Mouse(mouse) => {
                    handle_mouse(controller, host, mouse);
                    Flow::Continue
                }
                _ => Flow::Continue,
            };
            if matches!(flow, Flow::Exit) {
                return Ok(());
            }
        }

        for event in controller.drain_events() {
            if matches!(event, AutocompleteEvent::Selection(_)) {
                // Reconciliation returns focus to the field
                host.focused = true;
            }
            host.log.push(event);
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    let cli = Cli::parse_args();
    setup_tracing(cli.log_file.as_deref());

    let config = cli.autocomplete_config()?;
    let items = cli.load_items()?;
    info!(count = items.len(), field = %cli.field, "loaded suggestion items");

    let record = build_record(&cli.field, &items);
    let source = StaticSource::new(items, config.resolve_source_field(&cli.field))
        .with_latency(cli.latency());
    let field = BoundField::new(record, cli.field.as_str())?;
    let mut controller = InputController::attach(config, field, source);

    let mut host = Host {
        theme: Theme::default(),
        focused: true,
        overlay_rect: None,
        field_rect: Rect::default(),
        log: Vec::new(),
    };

    let mut terminal = setup_terminal()?;
    let outcome = run(&mut terminal, &mut controller, &mut host).await;
    cleanup_terminal()?;
    outcome?;

    controller.detach();
    host.log.extend(controller.drain_events());

    for event in host
        .log
        .iter()
        .filter(|e| matches!(e, AutocompleteEvent::Selection(_)))
    {
        println!("{}", output::event_line(event, controller.source_field()));
    }

    let record = controller.binding().record();
    for line in output::error_lines(record, &cli.field) {
        eprintln!("{line}");
    }
    println!("{}", output::record_json(record)?);

    Ok(())
}
