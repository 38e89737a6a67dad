use clap::{error::ErrorKind, CommandFactory, Parser};
use crossterm::{
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
    tty::IsTty,
};
use ratatui::{backend::CrosstermBackend, Terminal};
use std::{
    error::Error,
    io::{self, stdin},
    time::Duration,
};

use vokab::api::ApiClient;
use vokab::app::App;
use vokab::auth::FileCredentialsStore;
use vokab::config::{ConfigStore, FileConfigStore};
use vokab::runtime::{CrosstermEventSource, FixedTicker, Runner};
use vokab::session::GameKind;
use vokab::{ui, TICK_RATE_MS};

/// terminal vocabulary trainer against a remote word service
#[derive(Parser, Debug, Clone)]
#[clap(
    version,
    about,
    long_about = "A terminal vocabulary trainer: browse word lists, play the audio-call and sprint quiz games, and report per-word progress to your account on the remote word service."
)]
pub struct Cli {
    /// jump straight into a game instead of the menu
    #[clap(short, long, value_enum)]
    game: Option<GameKind>,

    /// difficulty group to preselect (1-6)
    #[clap(short = 'u', long, value_parser = clap::value_parser!(u8).range(1..=6))]
    group: Option<u8>,

    /// sprint countdown length in seconds
    #[clap(short, long)]
    secs: Option<u64>,

    /// base URL of the word service
    #[clap(long)]
    server: Option<String>,
}

fn main() -> Result<(), Box<dyn Error>> {
    let cli = Cli::parse();

    if !stdin().is_tty() {
        let mut cmd = Cli::command();
        cmd.error(ErrorKind::Io, "stdin must be a tty").exit();
    }

    let config_store = FileConfigStore::new();
    let server = cli
        .server
        .clone()
        .unwrap_or_else(|| config_store.load().server);
    let api = ApiClient::new(server);

    let mut app = App::new(
        api,
        Box::new(config_store),
        Box::new(FileCredentialsStore::new()),
    );
    app.refresh_greeting();

    if let Some(group) = cli.group {
        app.menu.group = group - 1;
    }
    if let Some(secs) = cli.secs {
        app.sprint_secs = secs as f64;
    }
    if let Some(game) = cli.game {
        app.menu.game = game;
        app.start_selected_game();
    }

    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(stdout, EnterAlternateScreen)?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    let result = run(&mut terminal, &mut app);

    app.persist_config();
    disable_raw_mode()?;
    execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
    terminal.show_cursor()?;

    result
}

fn run<B: ratatui::backend::Backend>(
    terminal: &mut Terminal<B>,
    app: &mut App,
) -> Result<(), Box<dyn Error>> {
    let mut runner = Runner::new(
        CrosstermEventSource::new(),
        FixedTicker::new(Duration::from_millis(TICK_RATE_MS)),
    );

    loop {
        terminal.draw(|f| ui::draw(app, f))?;
        app.handle_event(runner.step());
        if app.should_quit {
            return Ok(());
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_defaults() {
        let cli = Cli::parse_from(["vokab"]);
        assert!(cli.game.is_none());
        assert!(cli.group.is_none());
        assert!(cli.secs.is_none());
        assert!(cli.server.is_none());
    }

    #[test]
    fn cli_game_value_enum() {
        let cli = Cli::parse_from(["vokab", "-g", "audio-call"]);
        assert_eq!(cli.game, Some(GameKind::AudioCall));

        let cli = Cli::parse_from(["vokab", "--game", "sprint"]);
        assert_eq!(cli.game, Some(GameKind::Sprint));
    }

    #[test]
    fn cli_group_range() {
        let cli = Cli::parse_from(["vokab", "-u", "6"]);
        assert_eq!(cli.group, Some(6));

        assert!(Cli::try_parse_from(["vokab", "-u", "0"]).is_err());
        assert!(Cli::try_parse_from(["vokab", "-u", "7"]).is_err());
    }

    #[test]
    fn cli_secs_and_server() {
        let cli = Cli::parse_from(["vokab", "-s", "30", "--server", "http://localhost:3000"]);
        assert_eq!(cli.secs, Some(30));
        assert_eq!(cli.server.as_deref(), Some("http://localhost:3000"));
    }
}
