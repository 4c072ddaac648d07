pub mod app;
pub mod event;
pub mod series;
pub mod theme;
pub mod ui;

pub use app::App;
pub use series::{scatter_points, ChartKind, PlotData};
pub use theme::{resolve_theme, Theme, ThemeColors};

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use event::{Event, EventHandler};

/// Run the interactive chart viewer until the user quits.
pub async fn run_charts(mut app: App) -> anyhow::Result<()> {
    // Buffer log output while the viewer owns the terminal
    crate::stderr_buffer::activate();

    let result = run_loop(&mut app).await;

    ratatui::restore();

    // Flush buffered log lines now that the terminal is restored
    for msg in crate::stderr_buffer::drain() {
        eprint!("{}", msg);
    }

    result
}

async fn run_loop(app: &mut App) -> anyhow::Result<()> {
    let mut terminal = ratatui::try_init()?;
    let mut events = EventHandler::new(250);

    loop {
        terminal.draw(|frame| ui::draw(frame, app))?;

        match events.next().await {
            Event::Key(key) => handle_key_event(app, key),
            Event::Tick => {}
        }

        if app.should_quit {
            break;
        }
    }

    Ok(())
}

fn handle_key_event(app: &mut App, key: KeyEvent) {
    if key.code == KeyCode::Char('c') && key.modifiers.contains(KeyModifiers::CONTROL) {
        app.should_quit = true;
        return;
    }

    match app.input_mode {
        app::InputMode::Normal => match key.code {
            // Quit
            KeyCode::Char('q') | KeyCode::Esc => app.should_quit = true,

            // Chart switching
            KeyCode::Tab | KeyCode::Right | KeyCode::Char('l') => app.next_chart(),
            KeyCode::BackTab | KeyCode::Left | KeyCode::Char('h') => app.previous_chart(),
            KeyCode::Char(c @ '1'..='4') => {
                let index = c as usize - '1' as usize;
                if let Some(kind) = ChartKind::from_index(index) {
                    app.select(kind);
                }
            }

            // Help
            KeyCode::Char('?') => app.show_help(),

            _ => {}
        },
        app::InputMode::Help => {
            // Any key exits help
            app.dismiss_help();
        }
    }
}
