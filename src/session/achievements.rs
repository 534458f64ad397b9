use crate::models::UserProgress;

/// Badge names earned by the current progress totals.
///
/// Pure rule table, evaluated after each completed session. Idempotent by
/// the names returned; the caller filters out badges already owned before
/// announcing.
pub fn newly_earned(progress: &UserProgress) -> Vec<&'static str> {
    let mut earned = Vec::new();

    if progress.completed_sessions == 1 {
        earned.push("First Steps");
    }

    if progress.streak_days >= 7 {
        earned.push("Week Warrior");
    }

    earned
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_session_earns_first_steps() {
        let mut progress = UserProgress::new();
        progress.record_completion(15);
        assert_eq!(newly_earned(&progress), vec!["First Steps"]);
    }

    #[test]
    fn test_second_session_earns_nothing() {
        let mut progress = UserProgress::new();
        progress.record_completion(15);
        progress.record_completion(20);
        assert!(newly_earned(&progress).is_empty());
    }

    #[test]
    fn test_week_streak_earns_week_warrior() {
        let mut progress = UserProgress::new();
        progress.streak_days = 7;
        progress.record_completion(15);
        assert_eq!(newly_earned(&progress), vec!["First Steps", "Week Warrior"]);
    }

    #[test]
    fn test_evaluator_is_idempotent() {
        let mut progress = UserProgress::new();
        progress.streak_days = 12;
        progress.completed_sessions = 5;
        assert_eq!(newly_earned(&progress), newly_earned(&progress));
    }
}
