use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

/// Points per display level
const POINTS_PER_LEVEL: u32 = 500;

/// Aggregate progress for the signed-in user.
///
/// Mutated only by completing an exercise session; everything resets when
/// the process exits.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProgress {
    pub total_points: u32,
    pub completed_sessions: u32,
    pub streak_days: u32,
    /// Badges already announced to the user, so a rule that keeps firing
    /// (e.g. a long streak) is only celebrated once.
    pub earned_badges: BTreeSet<String>,
}

impl UserProgress {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed session and its point award
    pub fn record_completion(&mut self, points: u32) {
        self.total_points += points;
        self.completed_sessions += 1;
    }

    /// Display level derived from accumulated points
    pub fn level(&self) -> u32 {
        self.total_points / POINTS_PER_LEVEL + 1
    }

    pub fn has_badge(&self, name: &str) -> bool {
        self.earned_badges.contains(name)
    }

    /// Mark a badge as announced. Returns false if it was already owned.
    pub fn award_badge(&mut self, name: &str) -> bool {
        self.earned_badges.insert(name.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_completion() {
        let mut progress = UserProgress::new();
        progress.record_completion(15);
        assert_eq!(progress.total_points, 15);
        assert_eq!(progress.completed_sessions, 1);

        progress.record_completion(20);
        assert_eq!(progress.total_points, 35);
        assert_eq!(progress.completed_sessions, 2);
    }

    #[test]
    fn test_level_from_points() {
        let mut progress = UserProgress::new();
        assert_eq!(progress.level(), 1);

        progress.total_points = 1850;
        assert_eq!(progress.level(), 4);

        progress.total_points = 1420;
        assert_eq!(progress.level(), 3);
    }

    #[test]
    fn test_award_badge_once() {
        let mut progress = UserProgress::new();
        assert!(progress.award_badge("Week Warrior"));
        assert!(!progress.award_badge("Week Warrior"));
        assert!(progress.has_badge("Week Warrior"));
    }
}
