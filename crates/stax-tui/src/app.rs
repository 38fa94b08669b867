//! App — component event loop wired to the browse session.
//!
//! Architecture:
//! - `App` owns the components and `AppState` (shared read-only data).
//! - A `tokio::mpsc` channel carries `AppMessage` events in from background
//!   tasks: terminal input and resolved fetches.
//! - The event loop draws a frame, then awaits the next message.
//! - Components return `Vec<Action>`; App dispatches each Action.
//! - Fetches are spawned tasks tagged with the `FetchKey` captured at
//!   dispatch time; the session discards results whose key no longer matches
//!   the live cursor.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use ratatui::crossterm::{
    event::{
        self, DisableMouseCapture, EnableMouseCapture, Event, KeyCode, KeyEvent, KeyEventKind,
        KeyModifiers, MouseEvent, MouseEventKind,
    },
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Layout, Position, Rect},
    Frame, Terminal,
};
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use stax_proto::browse::{BrowseSession, FetchKey};
use stax_proto::cursor::Level;
use stax_proto::folder::ListingPage;
use stax_proto::location::SessionLocation;
use stax_proto::source::{FolderSource, SourceError};

use crate::action::{Action, ComponentId};
use crate::app_state::AppState;
use crate::component::Component;
use crate::components::{browser::Browser, header::Header, letter_bar::LetterBar};
use crate::widgets::banner::BannerManager;

// ── Internal event bus ────────────────────────────────────────────────────────

enum AppMessage {
    Event(Event),
    AuthLoaded(Result<String, SourceError>),
    ListingLoaded(FetchKey, Result<ListingPage, SourceError>),
}

/// Last-drawn layout rects — used for mouse hit-testing.
#[derive(Default, Clone, Copy)]
struct PaneAreas {
    header: Rect,
    letter_bar: Rect,
    browser: Rect,
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    // Shared state (passed read-only to components).
    state: AppState,

    // Components.
    header: Header,
    letter_bar: LetterBar,
    browser: Browser,
    focus: ComponentId,

    // Session bookkeeping.
    location: SessionLocation,
    source: Arc<dyn FolderSource>,
    msg_tx: Option<mpsc::Sender<AppMessage>>,
    banner: BannerManager,
    pane_areas: PaneAreas,
    should_quit: bool,
}

impl App {
    pub fn new(source: Arc<dyn FolderSource>, location: SessionLocation) -> Self {
        // The persisted location seeds the Artist-level pagination; it is read
        // exactly once, here at mount.
        let session = BrowseSession::new(location.seed_pagination());
        Self {
            state: AppState::new(session),
            header: Header::new(),
            letter_bar: LetterBar::new(),
            browser: Browser::new(),
            focus: ComponentId::Browser,
            location,
            source,
            msg_tx: None,
            banner: BannerManager::new(),
            pane_areas: PaneAreas::default(),
            should_quit: false,
        }
    }

    pub async fn run(mut self) -> Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let (tx, mut rx) = mpsc::channel::<AppMessage>(256);
        self.msg_tx = Some(tx.clone());

        // ── Background task: keyboard/mouse events ────────────────────────────
        let event_tx = tx.clone();
        tokio::task::spawn_blocking(move || loop {
            match event::read() {
                Ok(ev) => {
                    if event_tx.blocking_send(AppMessage::Event(ev)).is_err() {
                        break;
                    }
                }
                Err(_) => break,
            }
        });

        // Session token — display-only, a failure never blocks browsing.
        self.spawn_auth();
        // Initial listing for the seeded root position.
        self.spawn_fetch(self.state.session.current_key());

        // Banner expiry check.
        let mut banner_tick = tokio::time::interval(Duration::from_millis(100));
        banner_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        // ── Main loop ─────────────────────────────────────────────────────────
        let mut needs_redraw = true;
        loop {
            if needs_redraw {
                terminal.draw(|f| self.draw(f))?;
            }
            needs_redraw = false;

            if self.should_quit {
                break;
            }

            tokio::select! {
                Some(msg) = rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                }
                _ = banner_tick.tick() => {
                    if !self.banner.is_empty() {
                        self.banner.tick();
                        needs_redraw = true;
                    }
                }
            }

            if self.should_quit {
                break;
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(
            terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )?;
        terminal.show_cursor()?;
        Ok(())
    }

    // ── Message handling ──────────────────────────────────────────────────────

    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) => {
                let actions = self.route_key(key);
                self.dispatch_all(actions);
                true
            }
            AppMessage::Event(Event::Mouse(mouse)) => {
                let actions = self.route_mouse(mouse);
                self.dispatch_all(actions);
                true
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::AuthLoaded(Ok(sid)) => {
                info!("session established");
                self.state.sid = sid;
                self.banner.info("session established");
                true
            }
            AppMessage::AuthLoaded(Err(e)) => {
                // Display-only: the error text takes the token's place in the
                // header and browsing continues.
                warn!("auth failed: {e}");
                self.state.sid = e.to_string();
                self.banner.error("session unavailable");
                true
            }
            AppMessage::ListingLoaded(key, Ok(page)) => self.state.session.commit(&key, page),
            AppMessage::ListingLoaded(key, Err(e)) => {
                // Silent degradation: the listing stays empty, the log has
                // the details, and no notice interrupts browsing.
                warn!("listing fetch failed: {e}");
                self.state.session.fail(&key)
            }
        }
    }

    fn route_key(&mut self, key: KeyEvent) -> Vec<Action> {
        if key.kind != KeyEventKind::Press {
            return Vec::new();
        }
        match (key.code, key.modifiers) {
            (KeyCode::Char('q'), KeyModifiers::NONE) => return vec![Action::Quit],
            (KeyCode::Char('c'), KeyModifiers::CONTROL) => return vec![Action::Quit],
            (KeyCode::Tab, _) => return vec![Action::FocusNext],
            _ => {}
        }
        match self.focus {
            ComponentId::LetterBar => self.letter_bar.handle_key(key, &self.state),
            ComponentId::Browser => self.browser.handle_key(key, &self.state),
        }
    }

    fn route_mouse(&mut self, mouse: MouseEvent) -> Vec<Action> {
        let pos = Position::new(mouse.column, mouse.row);
        let click = matches!(mouse.kind, MouseEventKind::Down(_));
        let mut actions = Vec::new();
        if self.pane_areas.header.contains(pos) {
            // Clicking the breadcrumb line walks one level up; at the root
            // this falls through to the go_back no-op.
            let breadcrumb_row = self.pane_areas.header.y + 1;
            if click && mouse.row == breadcrumb_row {
                actions.push(Action::Back);
            }
        } else if self.pane_areas.letter_bar.contains(pos) {
            if click {
                actions.push(Action::FocusPane(ComponentId::LetterBar));
            }
            actions.extend(self.letter_bar.handle_mouse(
                mouse,
                self.pane_areas.letter_bar,
                &self.state,
            ));
        } else if self.pane_areas.browser.contains(pos) {
            if click {
                actions.push(Action::FocusPane(ComponentId::Browser));
            }
            actions.extend(
                self.browser
                    .handle_mouse(mouse, self.pane_areas.browser, &self.state),
            );
        }
        actions
    }

    // ── Action dispatch ───────────────────────────────────────────────────────

    fn dispatch_all(&mut self, actions: Vec<Action>) {
        for action in actions {
            self.dispatch(action);
        }
    }

    fn dispatch(&mut self, action: Action) {
        match &action {
            Action::Open(folder) => {
                let key = match self.state.session.level() {
                    Level::Artist => self.state.session.select_artist(folder.clone()),
                    Level::Album => self.state.session.select_album(folder.clone()),
                    // Tracks are leaves; opening one is a silent no-op.
                    Level::Track => None,
                };
                self.after_transition(key);
                return;
            }
            Action::Back => {
                let key = self.state.session.go_back();
                self.after_transition(key);
                return;
            }
            Action::NextPage => {
                if self.state.session.next_page() {
                    self.sync_location();
                }
            }
            Action::PrevPage => {
                if self.state.session.prev_page() {
                    self.sync_location();
                }
            }
            Action::FirstPage => {
                if self.state.session.first_page() {
                    self.sync_location();
                }
            }
            Action::LastPage => {
                if self.state.session.last_page() {
                    self.sync_location();
                }
            }
            Action::CyclePageSize => {
                let next = self.state.session.pagination().size().cycle();
                if self.state.session.set_page_size(next) {
                    self.sync_location();
                }
            }
            Action::SetPageSize(size) => {
                if self.state.session.set_page_size(*size) {
                    self.sync_location();
                }
            }
            Action::FocusNext => {
                self.focus = match self.focus {
                    ComponentId::LetterBar => ComponentId::Browser,
                    ComponentId::Browser => ComponentId::LetterBar,
                };
                return;
            }
            Action::FocusPane(id) => {
                self.focus = *id;
                return;
            }
            Action::Quit => {
                self.should_quit = true;
                return;
            }
            _ => {}
        }

        // Let components observe the action (selection moves, bucket filter).
        let mut follow = Vec::new();
        follow.extend(self.letter_bar.on_action(&action, &self.state));
        follow.extend(self.browser.on_action(&action, &self.state));
        self.dispatch_all(follow);
    }

    /// Finish a hierarchy transition: reset the view components and issue the
    /// fetch. `None` means the transition was invalid at the current level and
    /// the click is swallowed. The location path is never rewritten here —
    /// hierarchy navigation is in-memory only.
    fn after_transition(&mut self, key: Option<FetchKey>) {
        let Some(key) = key else { return };
        self.letter_bar.reset();
        self.browser.reset_view();
        self.spawn_fetch(key);
    }

    /// Persist page/size into the location path — Artist level only; the
    /// other levels leave the path untouched.
    fn sync_location(&mut self) {
        if self.state.session.level() == Level::Artist {
            let pagination = self.state.session.pagination();
            self.location.replace(pagination.page(), pagination.size());
        }
    }

    // ── Background fetches ────────────────────────────────────────────────────

    fn spawn_auth(&self) {
        let Some(tx) = self.msg_tx.clone() else { return };
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            let result = source.auth().await;
            let _ = tx.send(AppMessage::AuthLoaded(result)).await;
        });
    }

    fn spawn_fetch(&self, key: FetchKey) {
        let Some(tx) = self.msg_tx.clone() else { return };
        let source = Arc::clone(&self.source);
        tokio::spawn(async move {
            debug!(?key, "fetching listing");
            let result = source.listing(key.dir_id.as_deref()).await;
            let _ = tx.send(AppMessage::ListingLoaded(key, result)).await;
        });
    }

    // ── Render ────────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let [header_area, letter_area, browser_area] = Layout::vertical([
            Constraint::Length(2),
            Constraint::Length(3),
            Constraint::Fill(1),
        ])
        .areas(frame.area());

        self.header.draw(frame, header_area, &self.state);
        self.letter_bar.draw(
            frame,
            letter_area,
            self.focus == ComponentId::LetterBar,
            &self.state,
        );
        self.browser.draw(
            frame,
            browser_area,
            self.focus == ComponentId::Browser,
            &self.state,
        );
        self.pane_areas = PaneAreas {
            header: header_area,
            letter_bar: letter_area,
            browser: browser_area,
        };
        self.banner.draw(frame, frame.area());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    struct NullSource;

    #[async_trait::async_trait]
    impl FolderSource for NullSource {
        async fn auth(&self) -> Result<String, SourceError> {
            Ok(String::new())
        }

        async fn listing(&self, _dir_id: Option<&str>) -> Result<ListingPage, SourceError> {
            Ok(ListingPage::default())
        }
    }

    fn app() -> App {
        let location = SessionLocation::load(std::env::temp_dir().join("stax-app-test-absent.json"));
        App::new(Arc::new(NullSource), location)
    }

    #[test]
    fn quit_requires_a_bare_q() {
        let mut app = app();

        let bare = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::NONE);
        assert!(matches!(app.route_key(bare).as_slice(), [Action::Quit]));

        // A modified q belongs to whoever bound it, not the global quit.
        let alt = KeyEvent::new(KeyCode::Char('q'), KeyModifiers::ALT);
        assert!(app.route_key(alt).is_empty());

        let ctrl_c = KeyEvent::new(KeyCode::Char('c'), KeyModifiers::CONTROL);
        assert!(matches!(app.route_key(ctrl_c).as_slice(), [Action::Quit]));
    }
}
