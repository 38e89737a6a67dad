use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};
use rand::Rng;

use crate::api::words::PAGE_COUNT;
use crate::api::ApiClient;
use crate::audiocall::AudioCallGame;
use crate::auth::{Credentials, CredentialsStore};
use crate::browse::BrowsePager;
use crate::config::{Config, ConfigStore};
use crate::history::{self, PlayRow};
use crate::progress::{ApiProgressStore, ProgressReporter};
use crate::runtime::AppEvent;
use crate::session::{AnswerLog, GameKind, GameSummary, Outcome};
use crate::sprint::{Claim, SprintGame};

const HISTORY_LIMIT: usize = 20;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Menu,
    Login,
    Browse,
    History,
    AudioCall,
    Sprint,
    Results,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoginField {
    Email,
    Password,
}

#[derive(Debug)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
    pub field: LoginField,
    pub error: Option<String>,
}

impl Default for LoginForm {
    fn default() -> Self {
        Self {
            email: String::new(),
            password: String::new(),
            field: LoginField::Email,
            error: None,
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct MenuState {
    pub group: u8,
    pub game: GameKind,
}

/// Top-level state machine over screens. One session value at a time:
/// starting a game replaces it wholesale, leaving a screen drops it.
pub struct App {
    api: ApiClient,
    pub config: Config,
    config_store: Box<dyn ConfigStore>,
    credentials_store: Box<dyn CredentialsStore>,
    pub credentials: Option<Credentials>,
    reporter: Option<ProgressReporter>,
    pub screen: Screen,
    pub menu: MenuState,
    pub login: LoginForm,
    pub browse: BrowsePager,
    pub history_rows: Vec<PlayRow>,
    pub audiocall: Option<AudioCallGame>,
    pub sprint: Option<SprintGame>,
    pub results: Option<GameSummary>,
    pub results_log: Option<AnswerLog>,
    /// Settings of the last started session, for play-again.
    last_game: Option<(GameKind, u8, Option<u8>)>,
    /// Sprint countdown length; the CLI can shorten it.
    pub sprint_secs: f64,
    pub status: Option<String>,
    pub should_quit: bool,
}

impl App {
    pub fn new(
        api: ApiClient,
        config_store: Box<dyn ConfigStore>,
        credentials_store: Box<dyn CredentialsStore>,
    ) -> Self {
        let config = config_store.load();
        let credentials = credentials_store.load();
        let reporter = credentials
            .clone()
            .map(|creds| ProgressReporter::new(ApiProgressStore::new(api.clone(), creds)));
        let browse = BrowsePager::new(config.group, config.page);
        let menu = MenuState {
            group: config.group,
            game: GameKind::AudioCall,
        };
        Self {
            api,
            config,
            config_store,
            credentials_store,
            credentials,
            reporter,
            screen: Screen::Menu,
            menu,
            login: LoginForm::default(),
            browse,
            history_rows: Vec::new(),
            audiocall: None,
            sprint: None,
            results: None,
            results_log: None,
            last_game: None,
            sprint_secs: crate::sprint::SPRINT_SECS,
            status: None,
            should_quit: false,
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn signed_in(&self) -> bool {
        self.credentials.is_some()
    }

    /// Refresh the greeting name for stored credentials. Best effort:
    /// stale names are kept on any failure.
    pub fn refresh_greeting(&mut self) {
        let Some(creds) = self.credentials.clone() else {
            return;
        };
        match self.api.get_user(&creds.token, &creds.user_id) {
            Ok(user) => {
                let updated = Credentials {
                    name: user.name,
                    ..creds
                };
                if let Err(e) = self.credentials_store.save(&updated) {
                    log::warn!("credentials refresh not persisted: {e}");
                }
                self.credentials = Some(updated);
            }
            Err(e) => log::debug!("greeting refresh skipped: {e}"),
        }
    }

    pub fn persist_config(&mut self) {
        self.config.group = self.menu.group;
        if let Err(e) = self.config_store.save(&self.config) {
            log::warn!("config not persisted: {e}");
        }
    }

    pub fn handle_event(&mut self, ev: AppEvent) {
        match ev {
            AppEvent::Tick => self.on_tick(),
            AppEvent::Resize => {}
            AppEvent::Key(key) => self.handle_key(key),
        }
    }

    fn on_tick(&mut self) {
        if self.screen == Screen::Sprint {
            if let Some(game) = self.sprint.as_mut() {
                game.on_tick();
            }
            self.finish_sprint_if_done();
        }
    }

    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            self.should_quit = true;
            return;
        }
        match self.screen {
            Screen::Menu => self.menu_key(key),
            Screen::Login => self.login_key(key),
            Screen::Browse => self.browse_key(key),
            Screen::History => self.history_key(key),
            Screen::AudioCall => self.audiocall_key(key),
            Screen::Sprint => self.sprint_key(key),
            Screen::Results => self.results_key(key),
        }
    }

    // --- menu ---

    fn menu_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.should_quit = true,
            KeyCode::Char(c @ '1'..='6') => {
                self.menu.group = c as u8 - b'1';
            }
            KeyCode::Tab => {
                self.menu.game = match self.menu.game {
                    GameKind::AudioCall => GameKind::Sprint,
                    GameKind::Sprint => GameKind::AudioCall,
                };
            }
            KeyCode::Enter => self.start_selected_game(),
            KeyCode::Char('b') => self.enter_browse(),
            KeyCode::Char('h') => self.enter_history(),
            KeyCode::Char('l') => {
                self.login = LoginForm::default();
                self.screen = Screen::Login;
            }
            KeyCode::Char('x') => self.sign_out(),
            _ => {}
        }
    }

    /// Start whichever game the menu has selected.
    pub fn start_selected_game(&mut self) {
        match self.menu.game {
            GameKind::AudioCall => self.start_audiocall(self.menu.group, None),
            GameKind::Sprint => self.start_sprint(self.menu.group),
        }
    }

    fn sign_out(&mut self) {
        if let Err(e) = self.credentials_store.clear() {
            log::warn!("credentials not cleared: {e}");
        }
        self.credentials = None;
        self.reporter = None;
        self.status = Some("Signed out".to_string());
    }

    // --- login ---

    fn login_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => self.screen = Screen::Menu,
            KeyCode::Tab => {
                self.login.field = match self.login.field {
                    LoginField::Email => LoginField::Password,
                    LoginField::Password => LoginField::Email,
                };
            }
            KeyCode::Enter => self.submit_login(),
            KeyCode::Backspace => {
                match self.login.field {
                    LoginField::Email => self.login.email.pop(),
                    LoginField::Password => self.login.password.pop(),
                };
            }
            KeyCode::Char(c) => match self.login.field {
                LoginField::Email => self.login.email.push(c),
                LoginField::Password => self.login.password.push(c),
            },
            _ => {}
        }
    }

    fn submit_login(&mut self) {
        match self.api.sign_in(&self.login.email, &self.login.password) {
            Ok(resp) => {
                let creds = Credentials {
                    user_id: resp.user_id,
                    token: resp.token,
                    name: resp.name,
                };
                if let Err(e) = self.credentials_store.save(&creds) {
                    log::warn!("credentials not persisted: {e}");
                }
                self.reporter = Some(ProgressReporter::new(ApiProgressStore::new(
                    self.api.clone(),
                    creds.clone(),
                )));
                self.status = Some(format!("Welcome, {}", creds.name));
                self.credentials = Some(creds);
                self.screen = Screen::Menu;
            }
            Err(e) => {
                // inline hint; the form stays open with its state intact
                self.login.error = Some(format!("Sign-in failed: {e}"));
            }
        }
    }

    // --- browse ---

    fn enter_browse(&mut self) {
        if self.fetch_browse_page() {
            self.screen = Screen::Browse;
        }
    }

    /// Returns false when the fetch failed; the status line explains.
    fn fetch_browse_page(&mut self) -> bool {
        match self.api.get_words(self.browse.group, self.browse.page) {
            Ok(words) => {
                self.browse.words = words;
                self.config.group = self.browse.group;
                self.config.page = self.browse.page;
                if let Err(e) = self.config_store.save(&self.config) {
                    log::warn!("config not persisted: {e}");
                }
                self.status = None;
                true
            }
            Err(e) => {
                self.status = Some(format!("Word fetch failed: {e}"));
                false
            }
        }
    }

    fn browse_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.screen = Screen::Menu;
                return;
            }
            KeyCode::Char('a') => {
                // launch on exactly the displayed group/page
                self.start_audiocall(self.browse.group, Some(self.browse.page));
                return;
            }
            KeyCode::Char('s') => {
                self.start_sprint(self.browse.group);
                return;
            }
            _ => {}
        }
        let before = (self.browse.group, self.browse.page);
        let moved = match key.code {
            KeyCode::Left => self.browse.prev_page(),
            KeyCode::Right => self.browse.next_page(),
            KeyCode::Char(c @ '1'..='6') => self.browse.set_group(c as u8 - b'1'),
            _ => false,
        };
        // a failed fetch rolls the cursor back to the page still shown
        if moved && !self.fetch_browse_page() {
            self.browse.group = before.0;
            self.browse.page = before.1;
        }
    }

    // --- history ---

    fn enter_history(&mut self) {
        match history::HistoryDb::new().and_then(|db| db.recent_plays(HISTORY_LIMIT)) {
            Ok(rows) => {
                self.history_rows = rows;
                self.screen = Screen::History;
            }
            Err(e) => self.status = Some(format!("History unavailable: {e}")),
        }
    }

    fn history_key(&mut self, key: KeyEvent) {
        if key.code == KeyCode::Esc {
            self.screen = Screen::Menu;
        }
    }

    // --- audio-call game ---

    fn start_audiocall(&mut self, group: u8, page: Option<u8>) {
        let resolved = page
            .unwrap_or_else(|| rand::thread_rng().gen_range(0..PAGE_COUNT))
            .min(PAGE_COUNT - 1);
        match self.api.get_words(group, resolved) {
            Ok(words) => {
                self.install_audiocall(AudioCallGame::new(words, group, resolved), page);
            }
            Err(e) => {
                // the session must not start against missing data
                self.status = Some(format!("Word fetch failed: {e}"));
            }
        }
    }

    /// Install a fetched session and move to its screen. Split out so
    /// tests can drive the machine with canned word lists.
    ///
    /// `pinned_page` is what play-again reuses: `Some` for sessions
    /// launched off the book page, `None` for menu launches, which
    /// replay on a fresh random page.
    pub fn install_audiocall(&mut self, game: AudioCallGame, pinned_page: Option<u8>) {
        self.last_game = Some((GameKind::AudioCall, game.group, pinned_page));
        self.sprint = None;
        self.audiocall = Some(game);
        self.status = None;
        self.screen = Screen::AudioCall;
        self.play_active_audio();
    }

    fn audiocall_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.audiocall = None;
                self.screen = Screen::Menu;
            }
            KeyCode::Char(c @ '1'..='5') => {
                let slot = (c as u8 - b'1') as usize;
                let judged = self.audiocall.as_mut().and_then(|game| {
                    let word_id = game.active_word().map(|w| w.id.clone());
                    game.choose(slot).zip(word_id)
                });
                if let Some((outcome, word_id)) = judged {
                    self.report_outcome(&word_id, outcome);
                }
            }
            KeyCode::Char(' ') => self.play_active_audio(),
            KeyCode::Enter => {
                let judged = self.audiocall.as_mut().and_then(|game| {
                    let word_id = game.active_word().map(|w| w.id.clone());
                    // Enter on an open question is the skip transition
                    match game.skip() {
                        Some(outcome) => Some(outcome).zip(word_id),
                        None => {
                            game.advance();
                            None
                        }
                    }
                });
                if let Some((outcome, word_id)) = judged.as_ref() {
                    self.report_outcome(word_id, *outcome);
                }
                self.finish_audiocall_if_done();
                if self.screen == Screen::AudioCall && judged.is_none() {
                    // advancing revealed a fresh question
                    self.play_active_audio();
                }
            }
            _ => {}
        }
    }

    /// Open the pronunciation audio URL externally, best effort.
    fn play_active_audio(&self) {
        let Some(game) = &self.audiocall else { return };
        let Some(word) = game.active_word() else {
            return;
        };
        if word.audio.is_empty() {
            return;
        }
        let url = self.api.media_url(&word.audio);
        if let Err(e) = webbrowser::open(&url) {
            log::debug!("audio open failed: {e}");
        }
    }

    fn finish_audiocall_if_done(&mut self) {
        if self.audiocall.as_ref().is_some_and(|g| g.is_finished()) {
            if let Some(game) = self.audiocall.take() {
                let summary = game.summary();
                self.present_results(summary, game.log);
            }
        }
    }

    // --- sprint game ---

    fn start_sprint(&mut self, group: u8) {
        match self.api.get_words_oversampled(group) {
            Ok(words) => {
                self.install_sprint(SprintGame::with_secs(words, group, self.sprint_secs))
            }
            Err(e) => self.status = Some(format!("Word fetch failed: {e}")),
        }
    }

    pub fn install_sprint(&mut self, game: SprintGame) {
        self.last_game = Some((GameKind::Sprint, game.group, None));
        self.audiocall = None;
        self.sprint = Some(game);
        self.status = None;
        self.screen = Screen::Sprint;
    }

    fn sprint_key(&mut self, key: KeyEvent) {
        let claim = match key.code {
            KeyCode::Esc => {
                self.sprint = None;
                self.screen = Screen::Menu;
                return;
            }
            KeyCode::Left => Claim::NoMatch,
            KeyCode::Right => Claim::Match,
            _ => return,
        };
        let judged = self.sprint.as_mut().and_then(|game| {
            let word_id = game.current.as_ref().map(|p| p.word.id.clone());
            game.claim(claim).zip(word_id)
        });
        if let Some((outcome, word_id)) = judged {
            self.report_outcome(&word_id, outcome);
        }
        self.finish_sprint_if_done();
    }

    fn finish_sprint_if_done(&mut self) {
        if self.sprint.as_ref().is_some_and(|g| g.is_finished()) {
            if let Some(game) = self.sprint.take() {
                let summary = game.summary();
                self.present_results(summary, game.log);
            }
        }
    }

    fn present_results(&mut self, summary: GameSummary, log: AnswerLog) {
        history::record_summary(&summary);
        self.results = Some(summary);
        self.results_log = Some(log);
        self.screen = Screen::Results;
    }

    // --- results ---

    fn results_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Esc => {
                self.results = None;
                self.results_log = None;
                self.screen = Screen::Menu;
            }
            KeyCode::Char('r') => match self.last_game {
                Some((GameKind::AudioCall, group, page)) => self.start_audiocall(group, page),
                Some((GameKind::Sprint, group, _)) => self.start_sprint(group),
                None => self.screen = Screen::Menu,
            },
            _ => {}
        }
    }

    // --- progress side channel ---

    fn report_outcome(&self, word_id: &str, outcome: Outcome) {
        // signed-out play skips reporting entirely
        if let Some(reporter) = &self.reporter {
            reporter.report(word_id, outcome);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::words::WordItem;

    struct NullConfigStore;

    impl ConfigStore for NullConfigStore {
        fn load(&self) -> Config {
            Config::default()
        }
        fn save(&self, _cfg: &Config) -> std::io::Result<()> {
            Ok(())
        }
    }

    struct NullCredentialsStore;

    impl CredentialsStore for NullCredentialsStore {
        fn load(&self) -> Option<Credentials> {
            None
        }
        fn save(&self, _creds: &Credentials) -> std::io::Result<()> {
            Ok(())
        }
        fn clear(&self) -> std::io::Result<()> {
            Ok(())
        }
    }

    fn app() -> App {
        // unroutable server: these tests never touch the network
        App::new(
            ApiClient::new("http://127.0.0.1:1"),
            Box::new(NullConfigStore),
            Box::new(NullCredentialsStore),
        )
    }

    fn key(code: KeyCode) -> KeyEvent {
        KeyEvent::new(code, KeyModifiers::NONE)
    }

    fn words(n: usize) -> Vec<WordItem> {
        (0..n)
            .map(|i| WordItem {
                id: format!("id-{i}"),
                word: format!("word-{i}"),
                word_translate: format!("слово-{i}"),
                image: String::new(),
                audio: String::new(),
            })
            .collect()
    }

    #[test]
    fn menu_digit_selects_group_and_tab_toggles_game() {
        let mut app = app();
        assert_eq!(app.menu.game, GameKind::AudioCall);

        app.handle_key(key(KeyCode::Char('4')));
        assert_eq!(app.menu.group, 3);

        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.menu.game, GameKind::Sprint);
        app.handle_key(key(KeyCode::Tab));
        assert_eq!(app.menu.game, GameKind::AudioCall);
    }

    #[test]
    fn esc_on_menu_quits() {
        let mut app = app();
        app.handle_key(key(KeyCode::Esc));
        assert!(app.should_quit);
    }

    #[test]
    fn ctrl_c_quits_from_any_screen() {
        let mut app = app();
        app.install_sprint(SprintGame::new(words(60), 0));
        app.handle_key(KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL));
        assert!(app.should_quit);
    }

    #[test]
    fn login_form_edits_and_switches_fields() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('l')));
        assert_eq!(app.screen, Screen::Login);

        for c in "a@b.c".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Tab));
        for c in "secret".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Backspace));

        assert_eq!(app.login.email, "a@b.c");
        assert_eq!(app.login.password, "secre");

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn failed_sign_in_shows_inline_hint_and_keeps_form() {
        let mut app = app();
        app.handle_key(key(KeyCode::Char('l')));
        for c in "a@b.c".chars() {
            app.handle_key(key(KeyCode::Char(c)));
        }
        app.handle_key(key(KeyCode::Enter));

        assert_eq!(app.screen, Screen::Login);
        assert!(app.login.error.is_some());
        assert_eq!(app.login.email, "a@b.c");
        assert!(!app.signed_in());
    }

    #[test]
    fn failed_page_flip_keeps_the_view() {
        let mut app = app();
        app.screen = Screen::Browse;
        app.browse.page = 3;
        app.browse.words = words(20);

        app.handle_key(key(KeyCode::Right));

        // the cursor rolls back to the page whose words are shown
        assert_eq!(app.browse.page, 3);
        assert_eq!(app.browse.words.len(), 20);
        assert!(app.status.as_deref().unwrap_or("").contains("Word fetch failed"));
    }

    #[test]
    fn failed_group_switch_keeps_group_and_page() {
        let mut app = app();
        app.screen = Screen::Browse;
        app.browse.group = 1;
        app.browse.page = 7;

        app.handle_key(key(KeyCode::Char('4')));

        assert_eq!(app.browse.group, 1);
        assert_eq!(app.browse.page, 7);
        assert!(app.status.is_some());
    }

    #[test]
    fn replay_pins_the_page_only_for_book_launches() {
        let mut app = app();

        // menu launch: play-again rolls a fresh random page
        app.install_audiocall(AudioCallGame::new(words(20), 2, 7), None);
        assert_eq!(app.last_game, Some((GameKind::AudioCall, 2, None)));

        // book launch: play-again reuses the displayed page
        app.install_audiocall(AudioCallGame::new(words(20), 2, 7), Some(7));
        assert_eq!(app.last_game, Some((GameKind::AudioCall, 2, Some(7))));
    }

    #[test]
    fn session_does_not_start_when_fetch_fails() {
        let mut app = app();
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.audiocall.is_none());
        assert!(app.status.as_deref().unwrap_or("").contains("Word fetch failed"));
    }

    #[test]
    fn audiocall_keys_drive_a_full_session() {
        let mut app = app();
        app.install_audiocall(AudioCallGame::new(words(20), 0, 5), Some(5));
        assert_eq!(app.screen, Screen::AudioCall);

        for _ in 0..20 {
            app.handle_key(key(KeyCode::Char('1')));
            app.handle_key(key(KeyCode::Enter));
        }

        assert_eq!(app.screen, Screen::Results);
        assert!(app.audiocall.is_none());
        let summary = app.results.as_ref().unwrap();
        assert_eq!(summary.total, 20);
        assert_eq!(summary.game, GameKind::AudioCall);
    }

    #[test]
    fn audiocall_enter_first_skips_then_advances() {
        let mut app = app();
        app.install_audiocall(AudioCallGame::new(words(20), 0, 0), None);

        // first Enter is the skip transition, forced incorrect
        app.handle_key(key(KeyCode::Enter));
        let game = app.audiocall.as_ref().unwrap();
        assert_eq!(game.log.incorrect.len(), 1);
        assert_eq!(game.log.correct.len(), 0);

        // second Enter advances to the next question
        app.handle_key(key(KeyCode::Enter));
        assert_eq!(app.audiocall.as_ref().unwrap().active_index(), 1);
    }

    #[test]
    fn sprint_ticks_out_to_results_with_score_zero() {
        let mut app = app();
        app.install_sprint(SprintGame::with_secs(words(60), 2, 0.5));

        for _ in 0..10 {
            app.handle_event(AppEvent::Tick);
        }

        assert_eq!(app.screen, Screen::Results);
        assert!(app.sprint.is_none());
        let summary = app.results.as_ref().unwrap();
        assert_eq!(summary.score, 0);
        assert_eq!(summary.total, 0);
        assert_eq!(summary.game, GameKind::Sprint);
    }

    #[test]
    fn leaving_sprint_drops_the_countdown() {
        let mut app = app();
        app.install_sprint(SprintGame::new(words(60), 0));
        app.handle_key(key(KeyCode::Esc));

        assert_eq!(app.screen, Screen::Menu);
        assert!(app.sprint.is_none());
        // later ticks are inert
        app.handle_event(AppEvent::Tick);
        assert_eq!(app.screen, Screen::Menu);
    }

    #[test]
    fn starting_a_game_replaces_any_previous_session() {
        let mut app = app();
        app.install_sprint(SprintGame::new(words(60), 0));
        app.install_audiocall(AudioCallGame::new(words(20), 1, 0), None);
        assert!(app.sprint.is_none());
        assert!(app.audiocall.is_some());

        app.install_sprint(SprintGame::new(words(60), 1));
        assert!(app.audiocall.is_none());
        assert!(app.sprint.is_some());
    }

    #[test]
    fn results_esc_returns_to_menu() {
        let mut app = app();
        app.install_sprint(SprintGame::with_secs(words(10), 0, 0.1));
        app.handle_event(AppEvent::Tick);
        app.handle_event(AppEvent::Tick);
        assert_eq!(app.screen, Screen::Results);

        app.handle_key(key(KeyCode::Esc));
        assert_eq!(app.screen, Screen::Menu);
        assert!(app.results.is_none());
    }
}
