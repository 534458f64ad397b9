use serde::{Deserialize, Serialize};

/// Rep/time target used when an exercise defines neither.
pub const FALLBACK_TARGET: u32 = 10;

/// Prescribed exercise from the program catalog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExerciseDefinition {
    pub id: String,
    pub name: String,
    pub category: Category,
    pub difficulty: Difficulty,
    pub duration_seconds: u32,
    pub target_reps: Option<u32>,
    pub target_time_seconds: Option<u32>,
    pub hold_time_seconds: Option<u32>,
    pub points: u32,
    pub description: String,
    pub instructions: Vec<String>,
    pub target_muscles: Vec<String>,
    pub precautions: Vec<String>,
    pub required_equipment: Vec<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Category {
    Flexibility,
    Strength,
    Balance,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl ExerciseDefinition {
    /// Session target: reps if prescribed, otherwise hold time, otherwise
    /// the fallback constant.
    pub fn target(&self) -> u32 {
        self.target_reps
            .or(self.target_time_seconds)
            .unwrap_or(FALLBACK_TARGET)
    }

    /// Whether the target counts repetitions (as opposed to seconds held)
    pub fn is_rep_based(&self) -> bool {
        self.target_reps.is_some() || self.target_time_seconds.is_none()
    }

    pub fn duration_minutes(&self) -> u32 {
        self.duration_seconds / 60
    }
}

impl std::fmt::Display for Category {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Category::Flexibility => write!(f, "Flexibility"),
            Category::Strength => write!(f, "Strength"),
            Category::Balance => write!(f, "Balance"),
        }
    }
}

impl std::str::FromStr for Category {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "flexibility" => Ok(Category::Flexibility),
            "strength" => Ok(Category::Strength),
            "balance" => Ok(Category::Balance),
            _ => Err(anyhow::anyhow!("Invalid exercise category: {}", s)),
        }
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Difficulty::Beginner => write!(f, "Beginner"),
            Difficulty::Intermediate => write!(f, "Intermediate"),
            Difficulty::Advanced => write!(f, "Advanced"),
        }
    }
}

impl std::str::FromStr for Difficulty {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "beginner" => Ok(Difficulty::Beginner),
            "intermediate" => Ok(Difficulty::Intermediate),
            "advanced" => Ok(Difficulty::Advanced),
            _ => Err(anyhow::anyhow!("Invalid difficulty: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bare_exercise() -> ExerciseDefinition {
        ExerciseDefinition {
            id: "exercise_test".to_string(),
            name: "Test Exercise".to_string(),
            category: Category::Strength,
            difficulty: Difficulty::Beginner,
            duration_seconds: 120,
            target_reps: None,
            target_time_seconds: None,
            hold_time_seconds: None,
            points: 10,
            description: String::new(),
            instructions: vec![],
            target_muscles: vec![],
            precautions: vec![],
            required_equipment: vec![],
        }
    }

    #[test]
    fn test_target_prefers_reps() {
        let mut ex = bare_exercise();
        ex.target_reps = Some(15);
        ex.target_time_seconds = Some(30);
        assert_eq!(ex.target(), 15);
        assert!(ex.is_rep_based());
    }

    #[test]
    fn test_target_falls_back_to_time() {
        let mut ex = bare_exercise();
        ex.target_time_seconds = Some(30);
        assert_eq!(ex.target(), 30);
        assert!(!ex.is_rep_based());
    }

    #[test]
    fn test_target_fallback_constant() {
        let ex = bare_exercise();
        assert_eq!(ex.target(), FALLBACK_TARGET);
    }

    #[test]
    fn test_category_round_trip() {
        let cat: Category = "balance".parse().unwrap();
        assert_eq!(cat, Category::Balance);
        assert_eq!(cat.to_string(), "Balance");
        assert!("cardio".parse::<Category>().is_err());
    }
}
