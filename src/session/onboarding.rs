use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::FlowError;

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 4;

/// Conditions offered on step 1
pub const CONDITION_OPTIONS: [&str; 5] = [
    "ACL Recovery",
    "Shoulder Impingement Recovery",
    "Hip Replacement Recovery",
    "Lower Back Strain",
    "Ankle Sprain Recovery",
];

/// Recovery goals offered on step 3
pub const GOAL_OPTIONS: [&str; 5] = [
    "Reduce pain",
    "Restore range of motion",
    "Rebuild strength",
    "Improve balance",
    "Return to sport",
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActivityLevel {
    Sedentary,
    LightlyActive,
    ModeratelyActive,
    VeryActive,
}

/// Intake answers collected across the wizard steps
#[derive(Debug, Clone, Default)]
pub struct OnboardingAnswers {
    pub condition: Option<String>,
    pub pain_level: Option<u8>,
    pub activity_level: Option<ActivityLevel>,
    pub goals: BTreeSet<String>,
}

/// Result of a successful `next`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WizardAdvance {
    Step(u8),
    Completed,
}

/// Fixed 4-step intake flow.
///
/// Step 1 collects condition + pain level, step 2 the activity level,
/// step 3 at least one goal, step 4 is the ungated summary. Completing
/// step 4 is terminal; the wizard cannot be re-entered in the same run.
#[derive(Debug, Clone)]
pub struct OnboardingWizard {
    step: u8,
    completed: bool,
    pub answers: OnboardingAnswers,
}

impl OnboardingWizard {
    pub fn new() -> Self {
        Self {
            step: FIRST_STEP,
            completed: false,
            answers: OnboardingAnswers::default(),
        }
    }

    pub fn step(&self) -> u8 {
        self.step
    }

    pub fn is_completed(&self) -> bool {
        self.completed
    }

    pub fn progress_percent(&self) -> u8 {
        (self.step * 100) / LAST_STEP
    }

    pub fn set_condition(&mut self, condition: impl Into<String>) {
        self.answers.condition = Some(condition.into());
    }

    /// Pain is reported on a 0-10 scale
    pub fn set_pain_level(&mut self, level: u8) -> Result<(), FlowError> {
        if level > 10 {
            return Err(FlowError::ValidationFailure);
        }
        self.answers.pain_level = Some(level);
        Ok(())
    }

    pub fn set_activity_level(&mut self, level: ActivityLevel) {
        self.answers.activity_level = Some(level);
    }

    /// Select or deselect a recovery goal
    pub fn toggle_goal(&mut self, goal: impl Into<String>) {
        let goal = goal.into();
        if !self.answers.goals.remove(&goal) {
            self.answers.goals.insert(goal);
        }
    }

    /// Whether the current step's required fields are present
    pub fn current_step_valid(&self) -> bool {
        match self.step {
            1 => self.answers.condition.is_some() && self.answers.pain_level.is_some(),
            2 => self.answers.activity_level.is_some(),
            3 => !self.answers.goals.is_empty(),
            _ => true,
        }
    }

    /// Advance one step. Blocked when the current step's gate is unmet
    /// (state unchanged); the final advance from step 4 completes the
    /// wizard for good.
    pub fn next(&mut self) -> Result<WizardAdvance, FlowError> {
        if self.completed {
            return Err(FlowError::invalid("advance onboarding", "completed"));
        }
        if !self.current_step_valid() {
            return Err(FlowError::ValidationFailure);
        }
        if self.step < LAST_STEP {
            self.step += 1;
            Ok(WizardAdvance::Step(self.step))
        } else {
            self.completed = true;
            Ok(WizardAdvance::Completed)
        }
    }

    /// Go back one step. Never validates; a no-op failure at step 1.
    pub fn prev(&mut self) -> Result<u8, FlowError> {
        if self.completed {
            return Err(FlowError::invalid("revisit onboarding", "completed"));
        }
        if self.step <= FIRST_STEP {
            return Err(FlowError::invalid("go back", "on the first step"));
        }
        self.step -= 1;
        Ok(self.step)
    }
}

impl Default for OnboardingWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl ActivityLevel {
    pub const ALL: [ActivityLevel; 4] = [
        ActivityLevel::Sedentary,
        ActivityLevel::LightlyActive,
        ActivityLevel::ModeratelyActive,
        ActivityLevel::VeryActive,
    ];
}

impl std::fmt::Display for ActivityLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ActivityLevel::Sedentary => write!(f, "Sedentary"),
            ActivityLevel::LightlyActive => write!(f, "Lightly Active"),
            ActivityLevel::ModeratelyActive => write!(f, "Moderately Active"),
            ActivityLevel::VeryActive => write!(f, "Very Active"),
        }
    }
}

impl std::str::FromStr for ActivityLevel {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().replace([' ', '-'], "").as_str() {
            "sedentary" => Ok(ActivityLevel::Sedentary),
            "lightlyactive" | "light" => Ok(ActivityLevel::LightlyActive),
            "moderatelyactive" | "moderate" => Ok(ActivityLevel::ModeratelyActive),
            "veryactive" | "active" => Ok(ActivityLevel::VeryActive),
            _ => Err(anyhow::anyhow!("Invalid activity level: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn filled_wizard() -> OnboardingWizard {
        let mut wizard = OnboardingWizard::new();
        wizard.set_condition("ACL Recovery");
        wizard.set_pain_level(4).unwrap();
        wizard.set_activity_level(ActivityLevel::LightlyActive);
        wizard.toggle_goal("Reduce pain");
        wizard
    }

    #[test]
    fn test_step1_gate() {
        let mut wizard = OnboardingWizard::new();
        assert_eq!(wizard.next(), Err(FlowError::ValidationFailure));
        assert_eq!(wizard.step(), 1);

        wizard.set_condition("ACL Recovery");
        assert_eq!(wizard.next(), Err(FlowError::ValidationFailure));

        wizard.set_pain_level(4).unwrap();
        assert_eq!(wizard.next(), Ok(WizardAdvance::Step(2)));
    }

    #[test]
    fn test_step_gates_in_order() {
        let mut wizard = filled_wizard();
        assert_eq!(wizard.next(), Ok(WizardAdvance::Step(2)));
        assert_eq!(wizard.next(), Ok(WizardAdvance::Step(3)));
        assert_eq!(wizard.next(), Ok(WizardAdvance::Step(4)));
        assert_eq!(wizard.next(), Ok(WizardAdvance::Completed));
        assert!(wizard.is_completed());
    }

    #[test]
    fn test_goal_gate_blocks_step3() {
        let mut wizard = filled_wizard();
        wizard.toggle_goal("Reduce pain"); // deselect the only goal
        wizard.next().unwrap();
        wizard.next().unwrap();
        assert_eq!(wizard.step(), 3);
        assert_eq!(wizard.next(), Err(FlowError::ValidationFailure));
        assert_eq!(wizard.step(), 3);
    }

    #[test]
    fn test_prev_never_validates() {
        let mut wizard = filled_wizard();
        wizard.next().unwrap();
        wizard.next().unwrap();

        // Clearing goals does not block going back
        wizard.toggle_goal("Reduce pain");
        assert_eq!(wizard.prev(), Ok(2));
        assert_eq!(wizard.prev(), Ok(1));
    }

    #[test]
    fn test_prev_at_first_step_is_rejected() {
        let mut wizard = OnboardingWizard::new();
        assert!(matches!(
            wizard.prev(),
            Err(FlowError::InvalidTransition { .. })
        ));
        assert_eq!(wizard.step(), 1);
    }

    #[test]
    fn test_completed_wizard_is_terminal() {
        let mut wizard = filled_wizard();
        while !wizard.is_completed() {
            wizard.next().unwrap();
        }
        assert!(matches!(
            wizard.next(),
            Err(FlowError::InvalidTransition { .. })
        ));
        assert!(matches!(
            wizard.prev(),
            Err(FlowError::InvalidTransition { .. })
        ));
    }

    #[test]
    fn test_pain_level_bounds() {
        let mut wizard = OnboardingWizard::new();
        assert!(wizard.set_pain_level(10).is_ok());
        assert_eq!(wizard.set_pain_level(11), Err(FlowError::ValidationFailure));
    }
}
