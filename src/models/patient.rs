use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Patient record as seen on the therapist roster
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Patient {
    pub id: String,
    pub name: String,
    pub age: u32,
    pub condition: String,
    pub therapist_id: String,
    pub start_date: NaiveDate,
    pub status: String,
    pub risk_level: RiskLevel,
    pub adherence_rate: u32,
    pub total_sessions: u32,
    pub completed_sessions: u32,
    pub current_streak: u32,
    pub longest_streak: u32,
    pub total_points: u32,
    pub level: u32,
    pub badges: Vec<String>,
    pub next_appointment: Option<DateTime<Utc>>,
    pub last_activity: Option<DateTime<Utc>>,
    pub progress_metrics: ProgressMetrics,
}

/// Percentage scores per recovery dimension
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct ProgressMetrics {
    pub range_of_motion: u32,
    pub strength: u32,
    pub balance: u32,
    pub endurance: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RiskLevel {
    Low,
    Medium,
    High,
}

/// Care-team member
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Therapist {
    pub id: String,
    pub name: String,
    pub title: String,
    pub credentials: Vec<String>,
    pub specializations: Vec<String>,
    pub experience: String,
    pub rating: f32,
    pub total_patients: u32,
    pub active_patients: u32,
    pub phone: String,
    pub email: String,
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RiskLevel::Low => write!(f, "low"),
            RiskLevel::Medium => write!(f, "medium"),
            RiskLevel::High => write!(f, "high"),
        }
    }
}
