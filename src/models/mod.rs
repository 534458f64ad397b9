pub mod achievement;
pub mod exercise;
pub mod faq;
pub mod patient;
pub mod progress;

pub use achievement::{Badge, BadgeCategory, Rarity};
pub use exercise::{Category, Difficulty, ExerciseDefinition, FALLBACK_TARGET};
pub use faq::FaqEntry;
pub use patient::{Patient, ProgressMetrics, RiskLevel, Therapist};
pub use progress::UserProgress;
