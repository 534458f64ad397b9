// Session flow controller: auth/role state, view navigation, the
// onboarding wizard, the simulated exercise session, and achievement
// announcements. Single logical actor; every mutation happens on a
// discrete callback.

pub mod achievements;
pub mod error;
pub mod exercise;
pub mod feedback;
pub mod onboarding;
pub mod runner;
pub mod state;

pub use error::FlowError;
pub use exercise::{format_elapsed, ExerciseSession, RepUpdate, SessionStatus};
pub use feedback::{FeedbackEngine, ENCOURAGEMENTS};
pub use onboarding::{ActivityLevel, OnboardingWizard, WizardAdvance};
pub use runner::{EffectChannel, EffectEvent, EffectHandles, REP_PERIOD, TICK_PERIOD};
pub use state::{Role, Session, ViewId};

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::catalog::Catalog;
use crate::models::UserProgress;

pub const WELCOME_MESSAGES: [&str; 3] = [
    "Welcome back! Ready to continue your recovery journey?",
    "Great to see you again! Your progress has been amazing.",
    "Hello! Let's make today another successful day in your rehabilitation.",
];

/// Result of completing an exercise session
#[derive(Debug, Clone)]
pub struct CompletionSummary {
    pub exercise_name: String,
    pub points_awarded: u32,
    pub total_points: u32,
    pub completed_sessions: u32,
    pub new_badges: Vec<String>,
}

/// The one mutable context behind the whole app. Handlers receive this
/// explicitly; there are no ambient globals.
pub struct SessionFlow {
    pub session: Session,
    pub progress: UserProgress,
    pub catalog: Catalog,
    pub camera_granted: bool,
    active: Option<ExerciseSession>,
    feedback: FeedbackEngine,
    rng: StdRng,
}

impl SessionFlow {
    pub fn new() -> Self {
        Self::with_catalog(Catalog::demo())
    }

    pub fn with_catalog(catalog: Catalog) -> Self {
        Self {
            session: Session::new(),
            progress: UserProgress::new(),
            catalog,
            camera_granted: false,
            active: None,
            feedback: FeedbackEngine::new(),
            rng: StdRng::from_entropy(),
        }
    }

    /// Deterministic flow for tests
    pub fn seeded(seed: u64) -> Self {
        let mut flow = Self::new();
        flow.feedback = FeedbackEngine::seeded(seed);
        flow.rng = StdRng::seed_from_u64(seed);
        flow
    }

    // --- auth ---

    /// Simulated sign-in; no credentials are ever checked
    pub fn sign_in(&mut self, role: Role, name: impl Into<String>, email: impl Into<String>) {
        self.session.authenticated = true;
        self.session.role = role;
        self.session.user_name = name.into();
        self.session.user_email = email.into();
        tracing::info!("signed in as {} ({})", self.session.user_name, role);
    }

    /// Demo-account shortcut: signs in as the fixture patient with their
    /// accumulated progress
    pub fn demo_login(&mut self) {
        let profile = self.catalog.demo_profile().clone();
        self.sign_in(Role::Patient, profile.name, profile.email);
        self.progress = UserProgress {
            total_points: profile.total_points,
            completed_sessions: profile.completed_sessions,
            streak_days: profile.streak_days,
            earned_badges: profile.badges.into_iter().collect(),
        };
    }

    /// Reset everything to initial values
    pub fn logout(&mut self) {
        if let Some(mut session) = self.active.take() {
            session.cancel_effects();
        }
        self.session.reset();
        self.progress = UserProgress::new();
        self.camera_granted = false;
    }

    pub fn welcome_message(&mut self) -> &'static str {
        WELCOME_MESSAGES[self.rng.gen_range(0..WELCOME_MESSAGES.len())]
    }

    // --- navigation ---

    pub fn navigate(&mut self, view: ViewId) {
        self.session.navigate(view);
    }

    // --- exercise session lifecycle ---

    pub fn active_session(&self) -> Option<&ExerciseSession> {
        self.active.as_ref()
    }

    pub fn session_status(&self) -> Option<SessionStatus> {
        self.active.as_ref().map(|s| s.status())
    }

    /// Start a session for a catalog exercise. An unknown id is skipped
    /// (`MissingTarget`); a second concurrent session is an invalid
    /// transition.
    pub fn start_exercise(&mut self, exercise_id: &str) -> Result<(), FlowError> {
        if self.active.is_some() {
            return Err(FlowError::invalid(
                "start an exercise",
                "another session is active",
            ));
        }
        let exercise = self
            .catalog
            .exercise(exercise_id)
            .ok_or_else(|| FlowError::MissingTarget(exercise_id.to_string()))?;
        tracing::info!("starting exercise session for {}", exercise.name);
        self.active = Some(ExerciseSession::begin(exercise));
        Ok(())
    }

    /// Install freshly spawned effect handles on the active session
    pub fn attach_effects(&mut self, handles: EffectHandles) {
        if let Some(session) = self.active.as_mut() {
            session.effects = handles;
        }
    }

    /// Apply one elapsed second; returns the new elapsed count
    pub fn on_tick(&mut self) -> Option<u32> {
        let session = self.active.as_mut()?;
        session.on_tick().then(|| session.elapsed_seconds)
    }

    /// Apply one simulated repetition
    pub fn on_rep(&mut self) -> Option<RepUpdate> {
        let session = self.active.as_mut()?;
        session.on_rep(&mut self.feedback)
    }

    pub fn pause_exercise(&mut self) -> Result<(), FlowError> {
        self.active
            .as_mut()
            .ok_or_else(|| FlowError::invalid("pause", "idle"))?
            .pause()
    }

    /// Re-enter `Running`; the caller re-creates the periodic effects and
    /// attaches them.
    pub fn resume_exercise(&mut self) -> Result<(), FlowError> {
        self.active
            .as_mut()
            .ok_or_else(|| FlowError::invalid("resume", "idle"))?
            .resume()
    }

    /// Finish the active session: awards points, bumps the completion
    /// count, discards the session, and reports any newly earned badges
    /// (each announced only once per run).
    pub fn complete_exercise(&mut self) -> Result<CompletionSummary, FlowError> {
        let mut session = self
            .active
            .take()
            .ok_or_else(|| FlowError::invalid("complete", "idle"))?;
        if let Err(err) = session.complete() {
            self.active = Some(session);
            return Err(err);
        }

        let points = session.exercise.points;
        self.progress.record_completion(points);

        let new_badges: Vec<String> = achievements::newly_earned(&self.progress)
            .into_iter()
            .filter(|name| self.progress.award_badge(name))
            .map(String::from)
            .collect();

        tracing::info!(
            "completed {} (+{} pts, {} total)",
            session.exercise.name,
            points,
            self.progress.total_points
        );

        Ok(CompletionSummary {
            exercise_name: session.exercise.name,
            points_awarded: points,
            total_points: self.progress.total_points,
            completed_sessions: self.progress.completed_sessions,
            new_badges,
        })
    }

    /// Abandon the active session without awarding anything
    pub fn stop_exercise(&mut self) -> Result<(), FlowError> {
        let mut session = self
            .active
            .take()
            .ok_or_else(|| FlowError::invalid("stop", "idle"))?;
        session.cancel_effects();
        tracing::info!("stopped exercise session for {}", session.exercise.name);
        Ok(())
    }

    // --- camera ---

    /// Record the outcome of a camera request. Only a boolean ever comes
    /// back; frames are never received.
    pub fn set_camera_granted(&mut self, granted: bool) {
        self.camera_granted = granted;
    }
}

impl Default for SessionFlow {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn signed_in_flow() -> SessionFlow {
        let mut flow = SessionFlow::seeded(11);
        flow.sign_in(Role::Patient, "Test Patient", "test@example.com");
        flow
    }

    #[test]
    fn test_start_unknown_exercise_is_missing_target() {
        let mut flow = signed_in_flow();
        assert_eq!(
            flow.start_exercise("exercise_999"),
            Err(FlowError::MissingTarget("exercise_999".to_string()))
        );
        assert!(flow.active_session().is_none());
    }

    #[test]
    fn test_single_active_session_invariant() {
        let mut flow = signed_in_flow();
        flow.start_exercise("exercise_001").unwrap();
        assert!(matches!(
            flow.start_exercise("exercise_002"),
            Err(FlowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_full_session_awards_points_once() {
        let mut flow = signed_in_flow();
        flow.start_exercise("exercise_001").unwrap();

        // 10 rep ticks reach the target of the knee flexion exercise
        for _ in 0..10 {
            flow.on_rep().unwrap();
        }
        assert!(flow.on_rep().is_none());

        let summary = flow.complete_exercise().unwrap();
        assert_eq!(summary.points_awarded, 15);
        assert_eq!(summary.total_points, 15);
        assert_eq!(summary.completed_sessions, 1);
        assert_eq!(summary.new_badges, vec!["First Steps".to_string()]);

        // Post-discard the controller is idle again
        assert!(flow.active_session().is_none());
        assert!(matches!(
            flow.complete_exercise(),
            Err(FlowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_stop_awards_nothing() {
        let mut flow = signed_in_flow();
        flow.start_exercise("exercise_001").unwrap();
        flow.on_rep().unwrap();

        flow.stop_exercise().unwrap();
        assert!(flow.active_session().is_none());
        assert_eq!(flow.progress.total_points, 0);
        assert_eq!(flow.progress.completed_sessions, 0);

        assert!(matches!(
            flow.stop_exercise(),
            Err(FlowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_badges_not_reannounced() {
        let mut flow = signed_in_flow();
        flow.progress.streak_days = 12;

        for exercise in ["exercise_001", "exercise_002"] {
            flow.start_exercise(exercise).unwrap();
            while flow.on_rep().is_some() {}
            let summary = flow.complete_exercise().unwrap();
            if flow.progress.completed_sessions == 1 {
                assert_eq!(
                    summary.new_badges,
                    vec!["First Steps".to_string(), "Week Warrior".to_string()]
                );
            } else {
                assert!(summary.new_badges.is_empty());
            }
        }
    }

    #[test]
    fn test_logout_resets_everything() {
        let mut flow = signed_in_flow();
        flow.start_exercise("exercise_001").unwrap();
        flow.set_camera_granted(true);
        flow.navigate(ViewId::Progress);

        flow.logout();
        assert!(!flow.session.authenticated);
        assert!(flow.active_session().is_none());
        assert!(!flow.camera_granted);
        assert_eq!(flow.session.current_view, ViewId::Dashboard);
        assert_eq!(flow.progress.total_points, 0);
    }

    #[test]
    fn test_demo_login_loads_profile() {
        let mut flow = SessionFlow::seeded(5);
        flow.demo_login();
        assert!(flow.session.authenticated);
        assert_eq!(flow.session.user_name, "Sarah Martinez");
        assert_eq!(flow.progress.total_points, 1850);
        assert_eq!(flow.progress.level(), 4);
        assert!(flow.progress.has_badge("Week Warrior"));
    }

    #[test]
    fn test_welcome_message_from_pool() {
        let mut flow = SessionFlow::seeded(5);
        assert!(WELCOME_MESSAGES.contains(&flow.welcome_message()));
    }
}
