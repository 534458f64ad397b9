use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::models::ExerciseDefinition;

use super::error::FlowError;
use super::feedback::FeedbackEngine;
use super::runner::EffectHandles;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Running,
    Paused,
    Completed,
}

impl SessionStatus {
    fn name(&self) -> &'static str {
        match self {
            SessionStatus::Running => "running",
            SessionStatus::Paused => "paused",
            SessionStatus::Completed => "completed",
        }
    }
}

/// What one simulated repetition produced
#[derive(Debug, Clone)]
pub struct RepUpdate {
    pub completed_reps: u32,
    pub target: u32,
    pub encouragement: &'static str,
    pub form_score: u32,
    pub range_of_motion: u32,
    /// The rep effect has stopped and completion is now unlocked
    pub target_reached: bool,
}

/// One timed, simulated exercise attempt.
///
/// Owned exclusively by the session flow; at most one exists at a time.
/// The periodic effect handles live on the session so every transition
/// away from `Running` can cancel them before returning.
#[derive(Debug)]
pub struct ExerciseSession {
    pub id: String,
    pub exercise: ExerciseDefinition,
    pub target: u32,
    pub elapsed_seconds: u32,
    pub completed_reps: u32,
    pub started_at: DateTime<Utc>,
    pub effects: EffectHandles,
    status: SessionStatus,
    completion_unlocked: bool,
}

impl ExerciseSession {
    /// Start a session for an exercise, immediately `Running`
    pub fn begin(exercise: &ExerciseDefinition) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            target: exercise.target(),
            exercise: exercise.clone(),
            elapsed_seconds: 0,
            completed_reps: 0,
            started_at: Utc::now(),
            effects: EffectHandles::default(),
            status: SessionStatus::Running,
            completion_unlocked: false,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn completion_unlocked(&self) -> bool {
        self.completion_unlocked
    }

    /// One elapsed second. Ignored unless running, so a stale timer event
    /// can never advance a paused or completed session.
    pub fn on_tick(&mut self) -> bool {
        if self.status != SessionStatus::Running {
            return false;
        }
        self.elapsed_seconds += 1;
        true
    }

    /// One simulated repetition with synthetic feedback. Ignored unless
    /// running; the counter never exceeds the target. Reaching the target
    /// cancels the rep effect and unlocks completion without triggering
    /// it.
    pub fn on_rep(&mut self, feedback: &mut FeedbackEngine) -> Option<RepUpdate> {
        if self.status != SessionStatus::Running || self.completed_reps >= self.target {
            return None;
        }

        self.completed_reps += 1;
        let target_reached = self.completed_reps == self.target;
        if target_reached {
            self.completion_unlocked = true;
            self.effects.cancel_rep();
        }

        Some(RepUpdate {
            completed_reps: self.completed_reps,
            target: self.target,
            encouragement: feedback.encouragement(),
            form_score: feedback.form_score(),
            range_of_motion: feedback.range_of_motion(),
            target_reached,
        })
    }

    /// Suspend both periodic effects without resetting counters
    pub fn pause(&mut self) -> Result<(), FlowError> {
        if self.status != SessionStatus::Running {
            return Err(FlowError::invalid("pause", self.status.name()));
        }
        self.effects.cancel_all();
        self.status = SessionStatus::Paused;
        Ok(())
    }

    /// Back to running; the caller re-creates the periodic effects
    pub fn resume(&mut self) -> Result<(), FlowError> {
        if self.status != SessionStatus::Paused {
            return Err(FlowError::invalid("resume", self.status.name()));
        }
        self.status = SessionStatus::Running;
        Ok(())
    }

    /// Finish the session. Only valid once the target has been reached.
    pub fn complete(&mut self) -> Result<(), FlowError> {
        if self.status == SessionStatus::Completed {
            return Err(FlowError::invalid("complete", self.status.name()));
        }
        if !self.completion_unlocked {
            return Err(FlowError::invalid("complete", "short of the target"));
        }
        self.effects.cancel_all();
        self.status = SessionStatus::Completed;
        Ok(())
    }

    /// Cancel all outstanding effects, ahead of discarding the session
    pub fn cancel_effects(&mut self) {
        self.effects.cancel_all();
    }

    /// Elapsed time as mm:ss
    pub fn formatted_elapsed(&self) -> String {
        format_elapsed(self.elapsed_seconds)
    }
}

pub fn format_elapsed(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}
