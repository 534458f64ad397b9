use std::io;
use std::time::Instant;

use anyhow::{Context, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};

use crate::config::Config;
use crate::session::ViewId;

use super::app::{App, Screen};
use super::widgets;

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
}

impl Dashboard {
    /// Create new dashboard instance
    pub fn new(demo: bool) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let config = Config::load().unwrap_or_default();
        let app = App::new(config, demo);

        Ok(Self { terminal, app })
    }

    /// Run the dashboard event loop
    pub fn run(&mut self) -> Result<()> {
        loop {
            self.app.on_frame(Instant::now());

            let app = &self.app;
            self.terminal.draw(|f| ui(f, app))?;

            if event::poll(std::time::Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        self.app.handle_key(key.code, Instant::now());
                    }
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    match app.screen {
        Screen::Landing => {
            widgets::render_landing(size, f.buffer_mut());
        }
        Screen::Onboarding => {
            widgets::render_onboarding(size, f.buffer_mut(), &app.flow.session.onboarding);
        }
        Screen::Main => {
            render_main(f, app);
        }
    }

    // Toasts stack in the top-right corner of every screen
    widgets::render_toasts(size, f.buffer_mut(), &app.toasts);

    if app.show_help {
        let help_area = centered_rect(60, 70, size);
        widgets::render_help_overlay(help_area, f.buffer_mut());
    }
}

fn render_main(f: &mut Frame, app: &App) {
    let size = f.area();

    // Main layout: header + nav + body + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),
            Constraint::Length(1),
            Constraint::Min(0),
            Constraint::Length(1),
        ])
        .split(size);

    widgets::render_header(main_chunks[0], f.buffer_mut(), &app.flow);
    widgets::render_nav(main_chunks[1], f.buffer_mut(), &app.flow.session);

    let body = main_chunks[2];
    match app.flow.session.current_view {
        ViewId::Dashboard => widgets::render_dashboard(body, f.buffer_mut(), &app.flow),
        ViewId::Exercises => widgets::render_exercises(
            body,
            f.buffer_mut(),
            app.flow.catalog.exercises(),
            app.selected_index,
        ),
        ViewId::Progress => widgets::render_progress(body, f.buffer_mut(), &app.flow),
        ViewId::Achievements => widgets::render_achievements(body, f.buffer_mut(), &app.flow),
        ViewId::Patients => widgets::render_patients(
            body,
            f.buffer_mut(),
            app.flow.catalog.patients(),
            app.selected_index,
        ),
        ViewId::Support => widgets::render_support(
            body,
            f.buffer_mut(),
            app.flow.catalog.faqs(),
            app.flow.catalog.therapists(),
        ),
        ViewId::About => widgets::render_about(body, f.buffer_mut()),
    }

    widgets::render_status_bar(main_chunks[3], f.buffer_mut(), app);

    // Session overlay while an exercise is in progress
    if let Some(session) = app.flow.active_session() {
        let overlay = centered_rect(70, 60, size);
        widgets::render_session_overlay(
            overlay,
            f.buffer_mut(),
            session,
            &app.feedback_log,
            app.last_form_score,
            app.last_range_of_motion,
        );
    }

    if app.assistant_open {
        let overlay = centered_rect(60, 70, size);
        widgets::render_assistant_panel(
            overlay,
            f.buffer_mut(),
            &app.assistant,
            &app.chat_input,
        );
    }
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
