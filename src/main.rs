use crossterm::{
    event::{self, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use notepages::{
    app::App, clipboard::SystemClipboard, config::AppConfig, logging, storage::FileStore, ui,
};
use ratatui::prelude::*;
use std::time::Duration;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load(&AppConfig::default_path())?;
    logging::init(&AppConfig::log_path())?;

    let store = FileStore::open(config.storage_path())?;
    tracing::info!(path = %store.path().display(), "using storage file");
    let mut app = App::new(config, Box::new(store), Box::new(SystemClipboard::new()))?;

    enable_raw_mode()?;
    execute!(std::io::stdout(), EnterAlternateScreen)?;
    let mut terminal = Terminal::new(CrosstermBackend::new(std::io::stdout()))?;

    let result = run(&mut terminal, &mut app);

    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    if let Err(ref err) = result {
        tracing::error!(?err, "event loop failed");
    }
    result
}

fn run(
    terminal: &mut Terminal<CrosstermBackend<std::io::Stdout>>,
    app: &mut App,
) -> Result<(), Box<dyn std::error::Error>> {
    while !app.should_quit {
        terminal.draw(|f| ui::draw(f, app))?;

        // Poll so toasts expire without a key press
        if event::poll(Duration::from_millis(250))? {
            if let Event::Key(key) = event::read()? {
                app.handle_key(key);
            }
        }
        app.expire_toast(chrono::Utc::now());
    }
    Ok(())
}
