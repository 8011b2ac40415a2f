//! App — terminal event loop around a [`SearchController`].
//!
//! - Keystrokes edit the search field; every change is published on the
//!   input broadcast channel the controller listens to.
//! - The controller answers through [`TuiSurface`] and [`ToastNotifier`],
//!   which post `AppMessage`s back into this loop.
//! - The loop draws a frame, then awaits the next message or tick.

use std::io;
use std::sync::Arc;
use std::time::Duration;

use country_proto::{NoticeKind, SearchController, SearchOptions};
use ratatui::crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span},
    widgets::{Paragraph, Wrap},
    Frame, Terminal,
};
use tokio::sync::{broadcast, mpsc};
use tracing::{debug, info};

use crate::surface::{Region, TuiSurface, ToastNotifier};
use crate::theme::{style_default, style_label, style_muted, C_SECONDARY};
use crate::widgets::{
    pane_chrome::{pane_chrome, Badge},
    search_input::{InputAction, SearchInput},
    status_bar,
    toast::ToastManager,
};

const DELAY_STEP: Duration = Duration::from_millis(50);
const PAGE: u16 = 10;

// ── Internal event bus ────────────────────────────────────────────────────────

pub enum AppMessage {
    Event(Event),
    /// New content for an output pane; empty clears it.
    Region(Region, String),
    Notice(NoticeKind, String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Focus {
    List,
    Detail,
}

/// Text content of one output pane plus its scroll offset.
#[derive(Default)]
struct Pane {
    content: String,
    scroll: u16,
}

impl Pane {
    fn set(&mut self, content: String) {
        self.content = content;
        self.scroll = 0;
    }

    fn line_count(&self) -> usize {
        self.content.lines().count()
    }

    fn scroll_by(&mut self, delta: i32) {
        let max = self.line_count().saturating_sub(1) as i32;
        self.scroll = (self.scroll as i32 + delta).clamp(0, max.max(0)) as u16;
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

pub struct App {
    controller: SearchController,
    input: SearchInput,
    input_tx: broadcast::Sender<String>,
    list: Pane,
    detail: Pane,
    focus: Focus,
    toast: ToastManager,
    tx: mpsc::Sender<AppMessage>,
    rx: mpsc::Receiver<AppMessage>,
    should_quit: bool,
}

impl App {
    /// Wire a controller to the terminal surface. The notifier is always the
    /// toast notifier; every other option is taken from `options`.
    pub fn new(base_url: &str, options: SearchOptions) -> anyhow::Result<Self> {
        let (tx, rx) = mpsc::channel::<AppMessage>(1024);
        let (input_tx, _) = broadcast::channel::<String>(64);

        let surface = Arc::new(TuiSurface::new(input_tx.clone(), tx.clone()));
        let options = SearchOptions {
            notifier: Some(Arc::new(ToastNotifier::new(tx.clone()))),
            ..options
        };
        let controller = SearchController::new(base_url, options, surface)?;

        Ok(Self {
            controller,
            input: SearchInput::default(),
            input_tx,
            list: Pane::default(),
            detail: Pane::default(),
            focus: Focus::List,
            toast: ToastManager::new(),
            tx,
            rx,
            should_quit: false,
        })
    }

    // ── Main run loop ─────────────────────────────────────────────────────────

    pub async fn run(mut self) -> anyhow::Result<()> {
        debug!("run(): enabling raw mode");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;
        debug!("run(): terminal created, size={:?}", terminal.size());

        // ── Background task: keyboard events ─────────────────────────────────
        let event_tx = self.tx.clone();
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

        // Toast expiry check
        let mut toast_tick = tokio::time::interval(Duration::from_millis(250));
        toast_tick.set_missed_tick_behavior(tokio::time::MissedTickBehavior::Skip);

        info!("countries ready");

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
                Some(msg) = self.rx.recv() => {
                    needs_redraw = self.handle_message(msg);
                    while let Ok(next) = self.rx.try_recv() {
                        needs_redraw |= self.handle_message(next);
                    }
                }

                _ = toast_tick.tick() => {
                    needs_redraw = self.toast.tick();
                }
            }
        }

        // ── Teardown ──────────────────────────────────────────────────────────
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;
        info!("countries exiting");

        Ok(())
    }

    /// Apply one message. Returns whether a redraw is needed.
    fn handle_message(&mut self, msg: AppMessage) -> bool {
        match msg {
            AppMessage::Event(Event::Key(key)) if key.kind == KeyEventKind::Press => {
                self.handle_key(key);
                true
            }
            AppMessage::Event(Event::Resize(..)) => true,
            AppMessage::Event(_) => false,
            AppMessage::Region(region, content) => {
                match region {
                    Region::List => self.list.set(content),
                    Region::Detail => self.detail.set(content),
                }
                // Follow the content: a single result lives in the detail pane
                if !self.detail.content.is_empty() {
                    self.focus = Focus::Detail;
                } else if !self.list.content.is_empty() {
                    self.focus = Focus::List;
                }
                true
            }
            AppMessage::Notice(kind, message) => {
                self.toast.notice(kind, message);
                true
            }
        }
    }

    fn handle_key(&mut self, key: KeyEvent) {
        let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
        match key.code {
            KeyCode::Char('c') if ctrl => self.should_quit = true,
            KeyCode::Up if ctrl => self.adjust_delay(true),
            KeyCode::Down if ctrl => self.adjust_delay(false),
            KeyCode::Up => self.focused_pane().scroll_by(-1),
            KeyCode::Down => self.focused_pane().scroll_by(1),
            KeyCode::PageUp => self.focused_pane().scroll_by(-(PAGE as i32)),
            KeyCode::PageDown => self.focused_pane().scroll_by(PAGE as i32),
            KeyCode::Tab | KeyCode::BackTab => {
                self.focus = match self.focus {
                    Focus::List => Focus::Detail,
                    Focus::Detail => Focus::List,
                };
            }
            _ => match self.input.handle_key(key) {
                InputAction::Changed(value) => {
                    // No receivers only means no listener is attached
                    let _ = self.input_tx.send(value);
                }
                InputAction::Cancelled => self.should_quit = true,
                InputAction::None => {}
            },
        }
    }

    fn adjust_delay(&mut self, longer: bool) {
        let current = self.controller.debounce_delay();
        let next = if longer {
            current + DELAY_STEP
        } else {
            current.saturating_sub(DELAY_STEP)
        };
        self.controller.set_debounce_delay(next);
        self.toast.notice(
            NoticeKind::Info,
            format!("Search delay {}ms", next.as_millis()),
        );
    }

    fn focused_pane(&mut self) -> &mut Pane {
        match self.focus {
            Focus::List => &mut self.list,
            Focus::Detail => &mut self.detail,
        }
    }

    // ── Drawing ───────────────────────────────────────────────────────────────

    fn draw(&mut self, frame: &mut Frame) {
        let area = frame.area();
        let rows = Layout::default()
            .direction(Direction::Vertical)
            .constraints([
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Length(1),
                Constraint::Min(3),
                Constraint::Length(1),
            ])
            .split(area);

        let header = Line::from(vec![
            Span::styled(" countries ", style_label()),
            Span::styled(self.controller.config().base_url.as_str(), style_muted()),
        ]);
        frame.render_widget(Paragraph::new(header), rows[0]);

        self.input.draw(frame, rows[1]);
        status_bar::draw_separator(frame, rows[2]);

        let body = Layout::default()
            .direction(Direction::Horizontal)
            .constraints([Constraint::Percentage(35), Constraint::Percentage(65)])
            .split(rows[3]);
        self.draw_pane(frame, body[0], Focus::List);
        self.draw_pane(frame, body[1], Focus::Detail);

        status_bar::draw_keys_bar(
            frame,
            rows[4],
            self.controller.debounce_delay(),
            self.controller.config().list_limit,
        );

        self.toast.draw(frame, area);
    }

    fn draw_pane(&self, frame: &mut Frame, area: Rect, which: Focus) {
        let (title, pane) = match which {
            Focus::List => ("Matches", &self.list),
            Focus::Detail => ("Country", &self.detail),
        };
        let badge = (which == Focus::List && !pane.content.is_empty()).then(|| Badge {
            text: pane.line_count().to_string(),
            color: C_SECONDARY,
        });
        let block = pane_chrome(title, self.focus == which, badge);
        let paragraph = Paragraph::new(pane.content.as_str())
            .style(style_default())
            .block(block)
            .wrap(Wrap { trim: false })
            .scroll((pane.scroll, 0));
        frame.render_widget(paragraph, area);
    }
}
