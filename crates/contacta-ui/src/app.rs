//! Main application state and TUI event loop for the Contacta dashboard.
//!
//! [`App`] owns the theme, the active page, the area picker and the
//! [`DashboardSession`]. Every selection change re-runs the session's
//! cache lookup → filter → aggregations before the next frame is drawn.

use std::io;
use std::time::Duration;

use crossterm::{
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    text::{Line, Span, Text},
    widgets::{Block, Borders, Paragraph, Wrap},
    Frame, Terminal,
};

use contacta_runtime::dashboard::{ContractsSnapshot, DashboardSession, InterviewsSnapshot};

use crate::components::area_picker::AreaPicker;
use crate::components::header::Header;
use crate::dashboard_view;
use crate::interviews_view;
use crate::themes::Theme;

// ── Page ──────────────────────────────────────────────────────────────────────

/// Which page the TUI is currently rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page {
    /// Contract charts with the area picker.
    Dashboard,
    /// Interview charts.
    Interviews,
}

impl Page {
    /// Tab titles, in [`Page::index`] order.
    pub const TITLES: [&'static str; 2] = ["Dashboard Geral", "Entrevistas"];

    pub fn index(self) -> usize {
        match self {
            Page::Dashboard => 0,
            Page::Interviews => 1,
        }
    }

    pub fn next(self) -> Self {
        match self {
            Page::Dashboard => Page::Interviews,
            Page::Interviews => Page::Dashboard,
        }
    }

    /// Page for a `--view` value; anything but `interviews` opens the dashboard.
    pub fn from_view(view: &str) -> Self {
        if view == "interviews" {
            Page::Interviews
        } else {
            Page::Dashboard
        }
    }
}

// ── App ───────────────────────────────────────────────────────────────────────

/// Root application state for the dashboard TUI.
pub struct App {
    pub theme: Theme,
    pub page: Page,
    pub picker: AreaPicker,
    /// Set to `true` to break out of the event loop on the next iteration.
    pub should_quit: bool,
    session: DashboardSession,
    /// Latest contracts snapshot, or the fatal error that prevented it.
    contracts: Result<ContractsSnapshot, String>,
    interviews: Result<InterviewsSnapshot, String>,
}

impl App {
    /// Build the app and load both datasets once.
    pub fn new(session: DashboardSession, theme_name: &str, page: Page) -> Self {
        let mut app = Self {
            theme: Theme::from_name(theme_name),
            page,
            picker: AreaPicker::default(),
            should_quit: false,
            session,
            contracts: Err(String::new()),
            interviews: Err(String::new()),
        };
        app.reload();
        app
    }

    pub fn contracts(&self) -> Result<&ContractsSnapshot, &str> {
        self.contracts.as_ref().map_err(String::as_str)
    }

    pub fn interviews(&self) -> Result<&InterviewsSnapshot, &str> {
        self.interviews.as_ref().map_err(String::as_str)
    }

    // ── Public event loop ─────────────────────────────────────────────────────

    /// Run the TUI until `q`, `Q` or `Ctrl+C`.
    pub fn run(mut self) -> io::Result<()> {
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen)?;
        let backend = CrosstermBackend::new(stdout);
        let mut terminal = Terminal::new(backend)?;

        let tick_rate = Duration::from_millis(250);

        let result = loop {
            if let Err(e) = terminal.draw(|frame| self.render(frame)) {
                break Err(e);
            }

            match event::poll(tick_rate) {
                Ok(true) => match event::read() {
                    Ok(Event::Key(key)) if key.kind == KeyEventKind::Press => self.handle_key(key),
                    Ok(_) => {}
                    Err(e) => break Err(e),
                },
                Ok(false) => {}
                Err(e) => break Err(e),
            }

            if self.should_quit {
                break Ok(());
            }
        };

        // Restore terminal state unconditionally.
        disable_raw_mode()?;
        execute!(terminal.backend_mut(), LeaveAlternateScreen)?;
        terminal.show_cursor()?;

        result
    }

    // ── Input ─────────────────────────────────────────────────────────────────

    /// Apply one key press.
    pub fn handle_key(&mut self, key: KeyEvent) {
        match key.code {
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                self.should_quit = true;
            }
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Tab | KeyCode::BackTab => self.page = self.page.next(),
            KeyCode::Char('r') => {
                self.session.invalidate();
                self.reload();
            }
            _ if self.page == Page::Dashboard && self.contracts.is_ok() => {
                self.handle_picker_key(key.code)
            }
            _ => {}
        }
    }

    fn handle_picker_key(&mut self, code: KeyCode) {
        match code {
            KeyCode::Up | KeyCode::Char('k') => self.picker.move_up(),
            KeyCode::Down | KeyCode::Char('j') => self.picker.move_down(),
            KeyCode::Char(' ') | KeyCode::Enter => {
                self.picker.toggle();
                self.refresh_contracts();
            }
            KeyCode::Char('a') => {
                self.picker.select_all();
                self.refresh_contracts();
            }
            KeyCode::Char('n') => {
                self.picker.clear();
                self.refresh_contracts();
            }
            _ => {}
        }
    }

    // ── Data ──────────────────────────────────────────────────────────────────

    /// Re-read both datasets (through the cache) and refresh the picker.
    pub fn reload(&mut self) {
        match self.session.available_areas() {
            Ok(areas) => {
                self.picker.set_options(areas);
                self.refresh_contracts();
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to load contracts");
                self.contracts = Err(e.to_string());
            }
        }

        self.interviews = self.session.interviews_snapshot().map_err(|e| {
            tracing::error!(error = %e, "failed to load interviews");
            e.to_string()
        });
    }

    fn refresh_contracts(&mut self) {
        let mut snapshot = self.session.contracts_snapshot(self.picker.selected());

        // The file may have changed since the picker was filled.
        if let Ok(snap) = &snapshot {
            if snap.areas != self.picker.options() {
                self.picker.set_options(snap.areas.clone());
                snapshot = self.session.contracts_snapshot(self.picker.selected());
            }
        }

        self.contracts = snapshot.map_err(|e| {
            tracing::error!(error = %e, "failed to build contracts snapshot");
            e.to_string()
        });
    }

    // ── Rendering ─────────────────────────────────────────────────────────────

    /// Render the current application state into `frame`.
    pub fn render(&self, frame: &mut Frame) {
        let chunks = Layout::default()
            .direction(Direction::Vertical)
            .constraints([Constraint::Length(4), Constraint::Min(0)])
            .split(frame.area());

        let header = Header::new(&Page::TITLES, self.page.index(), &self.theme);
        frame.render_widget(Paragraph::new(Text::from(header.to_lines())), chunks[0]);

        match self.page {
            Page::Dashboard => match &self.contracts {
                Ok(snapshot) => dashboard_view::render_dashboard_view(
                    frame,
                    chunks[1],
                    snapshot,
                    &self.picker,
                    &self.theme,
                ),
                Err(message) => render_error(frame, chunks[1], message, &self.theme),
            },
            Page::Interviews => match &self.interviews {
                Ok(snapshot) => {
                    interviews_view::render_interviews_view(frame, chunks[1], snapshot, &self.theme)
                }
                Err(message) => render_error(frame, chunks[1], message, &self.theme),
            },
        }
    }
}

/// Blocking message shown in place of a page whose dataset failed to load.
pub fn render_error(frame: &mut Frame, area: Rect, message: &str, theme: &Theme) {
    let text = vec![
        Line::from(""),
        Line::from(Span::styled("Não foi possível carregar os dados", theme.error)),
        Line::from(""),
        Line::from(Span::styled(message.to_string(), theme.text)),
        Line::from(""),
        Line::from(Span::styled(
            "Corrija o arquivo e pressione 'r' para recarregar, ou 'q' para sair.",
            theme.dim,
        )),
    ];
    let paragraph = Paragraph::new(Text::from(text))
        .wrap(Wrap { trim: false })
        .block(
            Block::default()
                .borders(Borders::ALL)
                .border_style(theme.error)
                .title(" Erro "),
        );
    frame.render_widget(paragraph, area);
}

// ── Tests ──────────────────────────────────────────────────────────────────────
