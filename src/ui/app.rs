use std::collections::VecDeque;
use std::time::Instant;

use crossterm::event::KeyCode;

use crate::assistant::{Assistant, REPLY_DELAY};
use crate::config::Config;
use crate::notify::{NotificationSink, Toast};
use crate::platform::{LoggingSpeech, SpeechOutput, CAMERA_GRANT_DELAY};
use crate::session::onboarding::{CONDITION_OPTIONS, GOAL_OPTIONS};
use crate::session::{
    ActivityLevel, EffectChannel, EffectEvent, Role, SessionFlow, SessionStatus, ViewId,
    WizardAdvance,
};

/// How many feedback lines the session panel keeps
const FEEDBACK_LINES: usize = 3;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Screen {
    Landing,
    Onboarding,
    Main,
}

/// Toast queued for display until its expiry
pub struct ActiveToast {
    pub toast: Toast,
    pub expires_at: Instant,
}

/// Application state for the interactive dashboard.
///
/// All session-flow mutations funnel through here, one key event or timer
/// event at a time.
pub struct App {
    pub flow: SessionFlow,
    pub assistant: Assistant,
    pub config: Config,
    pub screen: Screen,
    pub should_quit: bool,
    pub show_help: bool,
    pub assistant_open: bool,
    pub selected_index: usize,
    pub toasts: VecDeque<ActiveToast>,
    pub chat_input: String,
    pub feedback_log: VecDeque<String>,
    pub last_form_score: Option<u32>,
    pub last_range_of_motion: Option<u32>,
    effects: EffectChannel,
    pending_reply: Option<(String, Instant)>,
    pending_camera: Option<(String, Instant)>,
    speech: LoggingSpeech,
}

impl App {
    pub fn new(config: Config, demo: bool) -> Self {
        let mut app = Self {
            flow: SessionFlow::new(),
            assistant: Assistant::new(),
            config,
            screen: Screen::Landing,
            should_quit: false,
            show_help: false,
            assistant_open: false,
            selected_index: 0,
            toasts: VecDeque::new(),
            chat_input: String::new(),
            feedback_log: VecDeque::new(),
            last_form_score: None,
            last_range_of_motion: None,
            effects: EffectChannel::new(),
            pending_reply: None,
            pending_camera: None,
            speech: LoggingSpeech,
        };

        if demo {
            app.flow.demo_login();
            app.enter_app();
        }

        app
    }

    /// Per-frame housekeeping: apply queued effect events, deliver due
    /// simulated responses, expire toasts.
    pub fn on_frame(&mut self, now: Instant) {
        while let Some(event) = self.effects.try_next() {
            self.apply_effect(event);
        }

        if let Some((reply, due)) = self.pending_reply.take() {
            if now >= due {
                self.assistant.record_reply(reply);
            } else {
                self.pending_reply = Some((reply, due));
            }
        }

        if let Some((exercise_id, due)) = self.pending_camera.take() {
            if now >= due {
                self.flow.set_camera_granted(true);
                self.notify(Toast::success("Camera access granted!"));
                self.start_session(&exercise_id);
            } else {
                self.pending_camera = Some((exercise_id, due));
            }
        }

        while self
            .toasts
            .front()
            .map_or(false, |toast| now >= toast.expires_at)
        {
            self.toasts.pop_front();
        }
    }

    fn apply_effect(&mut self, event: EffectEvent) {
        match event {
            EffectEvent::Tick => {
                self.flow.on_tick();
            }
            EffectEvent::Rep => {
                if let Some(update) = self.flow.on_rep() {
                    self.last_form_score = Some(update.form_score);
                    self.last_range_of_motion = Some(update.range_of_motion);
                    self.feedback_log.push_back(update.encouragement.to_string());
                    while self.feedback_log.len() > FEEDBACK_LINES {
                        self.feedback_log.pop_front();
                    }
                    if self.config.voice.enabled {
                        self.speech.say(update.encouragement);
                    }
                    if update.target_reached {
                        self.notify(Toast::info("Target reached! Press 'c' to complete."));
                    }
                }
            }
        }
    }

    /// Handle keyboard input
    pub fn handle_key(&mut self, key: KeyCode, now: Instant) {
        // Help overlay takes precedence
        if self.show_help {
            match key {
                KeyCode::Char('?') | KeyCode::Esc => self.show_help = false,
                _ => {}
            }
            return;
        }

        if self.assistant_open {
            self.handle_assistant_key(key, now);
            return;
        }

        match self.screen {
            Screen::Landing => self.handle_landing_key(key),
            Screen::Onboarding => self.handle_onboarding_key(key),
            Screen::Main => self.handle_main_key(key, now),
        }
    }

    fn handle_landing_key(&mut self, key: KeyCode) {
        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('p') | KeyCode::Char('P') => {
                self.notify(Toast::info("Authenticating..."));
                self.flow
                    .sign_in(Role::Patient, "Alex Morgan", "alex.morgan@email.com");
                self.screen = Screen::Onboarding;
            }
            KeyCode::Char('t') | KeyCode::Char('T') => {
                self.notify(Toast::info("Authenticating..."));
                self.flow.sign_in(
                    Role::Therapist,
                    "Dr. Jennifer Walsh",
                    "dr.walsh@rehabconnect.com",
                );
                self.enter_app();
            }
            KeyCode::Char('d') | KeyCode::Char('D') => {
                self.notify(Toast::info("Loading demo account..."));
                self.flow.demo_login();
                self.enter_app();
            }
            _ => {}
        }
    }

    fn handle_onboarding_key(&mut self, key: KeyCode) {
        let wizard = &mut self.flow.session.onboarding;

        match (wizard.step(), key) {
            // Step 1: condition via c, pain via digits
            (1, KeyCode::Char('c')) => {
                let next = match &wizard.answers.condition {
                    None => 0,
                    Some(current) => {
                        let idx = CONDITION_OPTIONS
                            .iter()
                            .position(|c| *c == current.as_str())
                            .unwrap_or(0);
                        (idx + 1) % CONDITION_OPTIONS.len()
                    }
                };
                wizard.set_condition(CONDITION_OPTIONS[next]);
            }
            (1, KeyCode::Char(digit)) if digit.is_ascii_digit() => {
                let level = digit as u8 - b'0';
                wizard.set_pain_level(level).ok();
            }
            // Step 2: activity level 1-4
            (2, KeyCode::Char(digit)) if ('1'..='4').contains(&digit) => {
                let idx = digit as usize - '1' as usize;
                wizard.set_activity_level(ActivityLevel::ALL[idx]);
            }
            // Step 3: toggle goals 1-5
            (3, KeyCode::Char(digit)) if ('1'..='5').contains(&digit) => {
                let idx = digit as usize - '1' as usize;
                wizard.toggle_goal(GOAL_OPTIONS[idx]);
            }
            (_, KeyCode::Char('n')) | (_, KeyCode::Enter) => match wizard.next() {
                Ok(WizardAdvance::Completed) => {
                    self.notify(Toast::success(
                        "Onboarding complete! Setting up your personalized dashboard...",
                    ));
                    self.enter_app();
                }
                Ok(WizardAdvance::Step(_)) => {}
                Err(err) => {
                    let message = err.to_string();
                    self.notify(Toast::warning(message));
                }
            },
            (_, KeyCode::Char('p')) => {
                wizard.prev().ok();
            }
            (_, KeyCode::Char('q')) => self.should_quit = true,
            _ => {}
        }
    }

    fn handle_main_key(&mut self, key: KeyCode, now: Instant) {
        // Session controls win while a session exists
        if self.flow.active_session().is_some() {
            match key {
                KeyCode::Char('p') | KeyCode::Char(' ') => self.toggle_pause(),
                KeyCode::Char('c') => self.complete_session(),
                KeyCode::Char('x') | KeyCode::Esc => self.stop_session(),
                _ => {}
            }
            return;
        }

        match key {
            KeyCode::Char('q') | KeyCode::Char('Q') => self.should_quit = true,
            KeyCode::Char('?') => self.show_help = true,
            KeyCode::Char('a') | KeyCode::Char('A') => self.assistant_open = true,
            KeyCode::Char('l') | KeyCode::Char('L') => self.logout(),
            KeyCode::Char(digit) if digit.is_ascii_digit() => {
                let views = ViewId::for_role(self.flow.session.role);
                let idx = digit as usize - '1' as usize;
                if let Some(view) = views.get(idx) {
                    self.flow.navigate(*view);
                    self.selected_index = 0;
                }
            }
            KeyCode::Tab => self.next_view(),
            KeyCode::Up | KeyCode::Char('k') => self.move_selection_up(),
            KeyCode::Down | KeyCode::Char('j') => self.move_selection_down(),
            KeyCode::Enter | KeyCode::Char('s') => match self.flow.session.current_view {
                ViewId::Exercises => self.begin_selected_exercise(now),
                ViewId::Patients => self.view_selected_patient(),
                _ => {}
            },
            KeyCode::Char('v') | KeyCode::Char('V') => self.preview_selected_exercise(),
            KeyCode::Char('m') | KeyCode::Char('M') => self.message_selected_patient(),
            _ => {}
        }
    }

    fn handle_assistant_key(&mut self, key: KeyCode, now: Instant) {
        match key {
            KeyCode::Esc => self.assistant_open = false,
            KeyCode::Enter => {
                let message = self.chat_input.trim().to_string();
                if !message.is_empty() {
                    let reply = self.assistant.record_user(message);
                    self.pending_reply = Some((reply, now + REPLY_DELAY));
                }
                self.chat_input.clear();
            }
            KeyCode::Backspace => {
                self.chat_input.pop();
            }
            KeyCode::Char(c) => self.chat_input.push(c),
            _ => {}
        }
    }

    // --- navigation ---

    fn next_view(&mut self) {
        let views = ViewId::for_role(self.flow.session.role);
        let current = views
            .iter()
            .position(|v| *v == self.flow.session.current_view)
            .unwrap_or(0);
        let next = views[(current + 1) % views.len()];
        self.flow.navigate(next);
        self.selected_index = 0;
    }

    fn move_selection_up(&mut self) {
        if self.selected_index > 0 {
            self.selected_index -= 1;
        }
    }

    fn move_selection_down(&mut self) {
        let len = match self.flow.session.current_view {
            ViewId::Exercises => self.flow.catalog.exercises().len(),
            ViewId::Patients => self.flow.catalog.patients().len(),
            _ => 0,
        };
        if self.selected_index < len.saturating_sub(1) {
            self.selected_index += 1;
        }
    }

    /// Preview notice for the selected exercise
    fn preview_selected_exercise(&mut self) {
        if self.flow.session.current_view != ViewId::Exercises {
            return;
        }
        if let Some(exercise) = self.flow.catalog.exercises().get(self.selected_index) {
            let message = format!("Previewing {}", exercise.name);
            self.notify(Toast::info(message));
        }
    }

    // Therapist quick actions surface as info toasts only

    fn view_selected_patient(&mut self) {
        if let Some(patient) = self.flow.catalog.patients().get(self.selected_index) {
            let message = format!("Viewing details for patient {}", patient.id);
            self.notify(Toast::info(message));
        }
    }

    fn message_selected_patient(&mut self) {
        if self.flow.session.current_view != ViewId::Patients {
            return;
        }
        if let Some(patient) = self.flow.catalog.patients().get(self.selected_index) {
            let message = format!("Opening message for patient {}", patient.id);
            self.notify(Toast::info(message));
        }
    }

    // --- session lifecycle ---

    /// Start the selected exercise, requesting camera access first when
    /// configured and not yet granted
    fn begin_selected_exercise(&mut self, now: Instant) {
        if self.flow.session.current_view != ViewId::Exercises {
            return;
        }
        let Some(exercise) = self.flow.catalog.exercises().get(self.selected_index) else {
            return;
        };
        let exercise_id = exercise.id.clone();

        if self.config.session.request_camera && !self.flow.camera_granted {
            self.notify(Toast::info("Requesting camera access..."));
            self.pending_camera = Some((exercise_id, now + CAMERA_GRANT_DELAY));
            return;
        }

        self.start_session(&exercise_id);
    }

    fn start_session(&mut self, exercise_id: &str) {
        match self.flow.start_exercise(exercise_id) {
            Ok(()) => {
                let handles = self.effects.spawn_effects();
                self.flow.attach_effects(handles);
                self.feedback_log.clear();
                self.last_form_score = None;
                self.last_range_of_motion = None;
            }
            // Missing targets are skipped; invalid transitions are no-ops
            Err(err) => tracing::debug!("start_exercise skipped: {}", err),
        }
    }

    fn toggle_pause(&mut self) {
        match self.flow.session_status() {
            Some(SessionStatus::Running) => {
                if self.flow.pause_exercise().is_ok() {
                    self.effects.drain();
                }
            }
            Some(SessionStatus::Paused) => {
                if self.flow.resume_exercise().is_ok() {
                    let handles = self.effects.spawn_effects();
                    self.flow.attach_effects(handles);
                }
            }
            _ => {}
        }
    }

    fn complete_session(&mut self) {
        match self.flow.complete_exercise() {
            Ok(summary) => {
                self.effects.drain();
                let mut announcements = vec![format!(
                    "Exercise completed! +{} points earned! 🏆",
                    summary.points_awarded
                )];
                for name in &summary.new_badges {
                    let icon = self
                        .flow
                        .catalog
                        .badge(name)
                        .map(|b| b.icon.clone())
                        .unwrap_or_else(|| "🏆".to_string());
                    announcements.push(format!("Achievement Unlocked: {}! {}", name, icon));
                }
                for message in announcements {
                    self.notify(Toast::success(message));
                }
            }
            Err(err) => tracing::debug!("complete_exercise rejected: {}", err),
        }
    }

    fn stop_session(&mut self) {
        if self.flow.stop_exercise().is_ok() {
            self.effects.drain();
        }
    }

    fn logout(&mut self) {
        self.stop_session();
        self.flow.logout();
        self.assistant = Assistant::new();
        self.screen = Screen::Landing;
        self.assistant_open = false;
        self.selected_index = 0;
    }

    fn enter_app(&mut self) {
        self.screen = Screen::Main;
        let welcome = self.flow.welcome_message();
        if self.config.voice.enabled {
            self.speech.say(welcome);
        }
        self.notify(Toast::success(welcome));
    }
}

impl NotificationSink for App {
    fn notify(&mut self, toast: Toast) {
        if !self.config.ui.show_toasts {
            return;
        }
        let expires_at = Instant::now() + toast.duration;
        self.toasts.push_back(ActiveToast { toast, expires_at });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn demo_app() -> App {
        App::new(Config::default(), true)
    }

    #[tokio::test]
    async fn test_demo_app_enters_main_screen() {
        let app = demo_app();
        assert_eq!(app.screen, Screen::Main);
        assert!(app.flow.session.authenticated);
        assert!(!app.toasts.is_empty());
    }

    #[tokio::test]
    async fn test_patient_login_goes_through_onboarding() {
        let mut app = App::new(Config::default(), false);
        assert_eq!(app.screen, Screen::Landing);

        app.handle_key(KeyCode::Char('p'), Instant::now());
        assert_eq!(app.screen, Screen::Onboarding);

        // Blocked next keeps the wizard on step 1
        app.handle_key(KeyCode::Char('n'), Instant::now());
        assert_eq!(app.flow.session.onboarding.step(), 1);
    }

    #[tokio::test]
    async fn test_onboarding_completes_to_main() {
        let mut app = App::new(Config::default(), false);
        let now = Instant::now();
        app.handle_key(KeyCode::Char('p'), now);

        // Step 1: condition + pain
        app.handle_key(KeyCode::Char('c'), now);
        app.handle_key(KeyCode::Char('3'), now);
        app.handle_key(KeyCode::Char('n'), now);
        // Step 2: activity
        app.handle_key(KeyCode::Char('2'), now);
        app.handle_key(KeyCode::Char('n'), now);
        // Step 3: goals
        app.handle_key(KeyCode::Char('1'), now);
        app.handle_key(KeyCode::Char('n'), now);
        // Step 4: summary
        app.handle_key(KeyCode::Char('n'), now);

        assert_eq!(app.screen, Screen::Main);
        assert!(app.flow.session.onboarding.is_completed());
    }

    #[tokio::test]
    async fn test_view_navigation_by_number() {
        let mut app = demo_app();
        app.handle_key(KeyCode::Char('2'), Instant::now());
        assert_eq!(app.flow.session.current_view, ViewId::Exercises);
        app.handle_key(KeyCode::Char('5'), Instant::now());
        assert_eq!(app.flow.session.current_view, ViewId::Support);
    }

    #[tokio::test]
    async fn test_assistant_reply_is_delayed() {
        let mut app = demo_app();
        let now = Instant::now();

        app.handle_key(KeyCode::Char('a'), now);
        assert!(app.assistant_open);

        for c in "hello".chars() {
            app.handle_key(KeyCode::Char(c), now);
        }
        app.handle_key(KeyCode::Enter, now);

        assert_eq!(app.assistant.transcript().len(), 1);

        // Not yet due
        app.on_frame(now);
        assert_eq!(app.assistant.transcript().len(), 1);

        // Due after the fixed delay
        app.on_frame(now + REPLY_DELAY);
        assert_eq!(app.assistant.transcript().len(), 2);
    }

    #[tokio::test]
    async fn test_camera_request_precedes_session() {
        let mut app = demo_app();
        let now = Instant::now();

        app.handle_key(KeyCode::Char('2'), now);
        app.handle_key(KeyCode::Enter, now);

        // Session has not started yet; the grant is pending
        assert!(app.flow.active_session().is_none());

        app.on_frame(now + CAMERA_GRANT_DELAY);
        assert!(app.flow.camera_granted);
        assert!(app.flow.active_session().is_some());
    }

    #[tokio::test]
    async fn test_stop_discards_session() {
        let mut app = demo_app();
        let now = Instant::now();
        app.config.session.request_camera = false;

        app.handle_key(KeyCode::Char('2'), now);
        app.handle_key(KeyCode::Enter, now);
        assert!(app.flow.active_session().is_some());

        app.handle_key(KeyCode::Char('x'), now);
        assert!(app.flow.active_session().is_none());
    }
}
