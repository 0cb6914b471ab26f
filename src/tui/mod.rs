//! # TUI Adapter
//!
//! The ratatui-specific layer and the rendering collaborator of the core.
//! Handles terminal I/O, renders the visible entry, and translates keyboard
//! events into `core::Action` values.
//!
//! This is the only module that knows about ratatui and crossterm.
//!
//! ## Redraw Strategy
//!
//! The loop never guesses whether state changed. It subscribes to the
//! controller and the splash machine; every notification sets a shared
//! `needs_redraw` flag, as does any terminal event. Idle, the loop sleeps
//! in `poll` for up to 250ms and draws nothing.
//!
//! ## Timer
//!
//! The splash timer is a tokio task that sleeps for the configured duration
//! and sends `Action::SplashTimeout` back through a channel, so the state is
//! still only mutated on the loop's thread.

mod event;
mod ui;

use std::cell::Cell;
use std::io::{self, stdout};
use std::rc::Rc;
use std::sync::mpsc;
use std::time::Duration;

use chrono::{Local, NaiveDate};
use crossterm::cursor::{Hide, Show};
use crossterm::execute;
use log::{debug, error, info, warn};
use ratatui::DefaultTerminal;

use crate::core::action::{Action, Effect, update};
use crate::core::config::ResolvedConfig;
use crate::core::controller::NavEvent;
use crate::core::error::NavError;
use crate::core::location::{CameraTarget, MapCollaborator};
use crate::core::session;
use crate::core::state::App;
use crate::core::tabs::{SlideDirection, Tab};
use crate::graphs::SampleGraph;
use crate::tui::event::{TuiEvent, poll_event_immediate, poll_event_timeout};

const IDLE_POLL: Duration = Duration::from_millis(250);

/// TUI-specific presentation state (not part of core navigation state)
pub struct TuiState {
    /// Highlighted row of the visible list.
    pub cursor: usize,
    /// Day under the cursor on the calendar.
    pub calendar_day: NaiveDate,
    /// Last centring instruction received as the map collaborator.
    pub camera: Option<CameraTarget>,
    /// Direction of the last tab slide, written by the nav observer.
    pub slide: Rc<Cell<Option<SlideDirection>>>,
    pub needs_redraw: Rc<Cell<bool>>,
}

impl TuiState {
    pub fn new() -> Self {
        Self {
            cursor: 0,
            calendar_day: Local::now().date_naive(),
            camera: None,
            slide: Rc::new(Cell::new(None)),
            needs_redraw: Rc::new(Cell::new(true)),
        }
    }

    /// Registers as an observer of `app`'s controller and splash machine.
    pub fn watch<G: SampleGraph>(&self, app: &mut App<G>) {
        let redraw = self.needs_redraw.clone();
        let slide = self.slide.clone();
        app.nav.subscribe(move |event: &NavEvent<G::Tab>| {
            debug!("Nav event: {:?}", event);
            if let NavEvent::TabSelected { change, .. } = event
                && !change.reselected
            {
                slide.set(Some(change.direction()));
            }
            redraw.set(true);
        });
        let redraw = self.needs_redraw.clone();
        app.splash.subscribe(move |_| redraw.set(true));
    }
}

impl Default for TuiState {
    fn default() -> Self {
        Self::new()
    }
}

impl MapCollaborator for TuiState {
    fn center_on(&mut self, target: &CameraTarget) {
        info!(
            "Map centred on {} at zoom {} ({})",
            target.coordinate,
            target.zoom,
            target.marker_title()
        );
        self.camera = Some(*target);
        self.needs_redraw.set(true);
    }
}

struct TerminalModeGuard;

impl TerminalModeGuard {
    fn new() -> io::Result<Self> {
        execute!(stdout(), Hide)?;
        Ok(Self)
    }
}

impl Drop for TerminalModeGuard {
    fn drop(&mut self) {
        let _ = execute!(stdout(), Show);
    }
}

/// Spawns the splash timer: one `SplashTimeout` after `duration`.
pub fn spawn_splash_timer<T: Send + 'static>(
    duration: Duration,
    tx: mpsc::Sender<Action<T>>,
) -> tokio::task::JoinHandle<()> {
    debug!("Splash timer armed for {}ms", duration.as_millis());
    tokio::spawn(async move {
        tokio::time::sleep(duration).await;
        if tx.send(Action::SplashTimeout).is_err() {
            warn!("Failed to deliver splash timeout: receiver dropped");
        }
    })
}

fn nav_failure(e: NavError) -> io::Error {
    error!("Navigation contract violated: {}", e);
    io::Error::new(io::ErrorKind::InvalidInput, e)
}

pub fn run<G: SampleGraph>(config: ResolvedConfig) -> io::Result<()> {
    let mut app = session::restore_or_fresh::<G>(&config).map_err(nav_failure)?;
    let mut tui = TuiState::new();
    tui.watch(&mut app);

    // Channel for actions from background tasks
    let (tx, rx) = mpsc::channel();
    let timer = if app.splash.is_completed() {
        if app.map_visible() {
            tui.center_on(&app.camera_target());
        }
        None
    } else {
        Some(spawn_splash_timer(config.splash_duration, tx))
    };

    let mut terminal = ratatui::init();
    let _terminal_mode_guard = TerminalModeGuard::new();

    let result = event_loop(&mut terminal, &mut app, &mut tui, &rx);

    if let Some(timer) = timer {
        timer.abort();
    }
    session::save_current_session(&app);
    ratatui::restore();
    result
}

fn event_loop<G: SampleGraph>(
    terminal: &mut DefaultTerminal,
    app: &mut App<G>,
    tui: &mut TuiState,
    rx: &mpsc::Receiver<Action<G::Tab>>,
) -> io::Result<()> {
    loop {
        // Only draw when something changed
        if tui.needs_redraw.replace(false) {
            terminal.draw(|f| ui::draw_ui(f, app, tui))?;
        }

        let first_event = poll_event_timeout(IDLE_POLL);
        if first_event.is_some() {
            tui.needs_redraw.set(true);
        }

        // Process first event + drain ALL pending events before next draw
        for event in first_event
            .into_iter()
            .chain(std::iter::from_fn(poll_event_immediate))
        {
            if let Some(action) = action_for(event, app, tui)
                && apply(app, tui, action)?
            {
                return Ok(());
            }
        }

        // Timer actions
        while let Ok(action) = rx.try_recv() {
            tui.needs_redraw.set(true);
            debug!("Event loop received: {:?}", action);
            if apply(app, tui, action)? {
                return Ok(());
            }
        }
    }
}

/// Runs one action through the reducer and carries out its effect.
/// Returns `true` when the loop should stop.
fn apply<G: SampleGraph>(
    app: &mut App<G>,
    tui: &mut TuiState,
    action: Action<G::Tab>,
) -> io::Result<bool> {
    match update(app, action).map_err(nav_failure)? {
        Effect::Quit | Effect::BackAtRoot => return Ok(true),
        Effect::CenterMap(target) => tui.center_on(&target),
        Effect::SaveSession => session::save_current_session(app),
        Effect::None => {}
    }
    clamp_cursor(app, tui);
    Ok(false)
}

fn clamp_cursor<G: SampleGraph>(app: &App<G>, tui: &mut TuiState) {
    let len = app.visible_catalog().len();
    tui.cursor = tui.cursor.min(len.saturating_sub(1));
}

fn on_calendar<G: SampleGraph>(app: &App<G>) -> bool {
    G::CALENDAR_ROUTE == Some(app.nav.current_entry().route())
}

/// Maps a key to an action, given what is on screen. Cursor movement is
/// presentation only and handled here without an action.
fn action_for<G: SampleGraph>(
    event: TuiEvent,
    app: &App<G>,
    tui: &mut TuiState,
) -> Option<Action<G::Tab>> {
    let tabs = G::Tab::ALL;
    let selected = app.nav.selected_tab();
    match event {
        TuiEvent::ForceQuit => Some(Action::Quit),
        TuiEvent::Resize => None,
        // Nothing but quitting while the splash is up
        _ if !app.splash.is_completed() => None,
        TuiEvent::Escape => Some(Action::Back),
        TuiEvent::TabPrev | TuiEvent::TabNext if app.nav.is_on_tab_host() => {
            let current = selected.map(<G::Tab as Tab>::ordinal).unwrap_or(0);
            let next = if event == TuiEvent::TabNext {
                (current + 1) % tabs.len()
            } else {
                (current + tabs.len() - 1) % tabs.len()
            };
            tui.cursor = 0;
            Some(Action::SelectTab(tabs[next]))
        }
        TuiEvent::SelectTab(index) if app.nav.is_on_tab_host() => {
            let tab = *tabs.get(index)?;
            tui.cursor = 0;
            Some(Action::SelectTab(tab))
        }
        TuiEvent::CursorUp if on_calendar(app) => {
            tui.calendar_day = tui.calendar_day.pred_opt()?;
            None
        }
        TuiEvent::CursorDown if on_calendar(app) => {
            tui.calendar_day = tui.calendar_day.succ_opt()?;
            None
        }
        TuiEvent::CursorUp => {
            tui.cursor = tui.cursor.saturating_sub(1);
            None
        }
        TuiEvent::CursorDown => {
            if tui.cursor + 1 < app.visible_catalog().len() {
                tui.cursor += 1;
            }
            None
        }
        TuiEvent::Submit if on_calendar(app) => Some(Action::SelectDate(tui.calendar_day)),
        TuiEvent::Submit if !app.visible_catalog().is_empty() => Some(Action::OpenItem {
            from: app.nav.current_entry().id(),
            index: tui.cursor,
        }),
        TuiEvent::InputChar('c') => Some(Action::OpenCalendar),
        TuiEvent::InputChar('t') => Some(Action::TransitionFinished),
        TuiEvent::InputChar('+') if G::CALENDAR_ROUTE.is_some() => Some(Action::ChangePeople(1)),
        TuiEvent::InputChar('-') if G::CALENDAR_ROUTE.is_some() => Some(Action::ChangePeople(-1)),
        _ => None,
    }
}
