// In-memory demo catalog. This is the entire data universe of the app:
// nothing here is persisted and everything resets on restart.

use chrono::NaiveDate;

use crate::models::{
    Badge, BadgeCategory, Category, Difficulty, ExerciseDefinition, FaqEntry, Patient,
    ProgressMetrics, Rarity, RiskLevel, Therapist,
};

/// Demo profile loaded by the demo-login shortcut
#[derive(Debug, Clone)]
pub struct DemoProfile {
    pub id: String,
    pub name: String,
    pub email: String,
    pub condition: String,
    pub streak_days: u32,
    pub total_points: u32,
    pub completed_sessions: u32,
    pub adherence_rate: u32,
    pub badges: Vec<String>,
}

/// Static fixture series for the progress view
#[derive(Debug, Clone)]
pub struct ProgressSeries {
    pub weekly_adherence: [u64; 7],
    pub range_of_motion: [u64; 4],
    pub strength: [u64; 4],
    pub balance: [u64; 4],
    pub endurance: [u64; 4],
    pub exercise_accuracy: Vec<(String, u32, String)>,
}

pub struct Catalog {
    exercises: Vec<ExerciseDefinition>,
    achievements: Vec<Badge>,
    patients: Vec<Patient>,
    therapists: Vec<Therapist>,
    faqs: Vec<FaqEntry>,
    demo_profile: DemoProfile,
    progress_series: ProgressSeries,
}

impl Catalog {
    /// Build the demo catalog
    pub fn demo() -> Self {
        Self {
            exercises: demo_exercises(),
            achievements: demo_achievements(),
            patients: demo_patients(),
            therapists: demo_therapists(),
            faqs: demo_faqs(),
            demo_profile: demo_profile(),
            progress_series: demo_progress_series(),
        }
    }

    pub fn exercises(&self) -> &[ExerciseDefinition] {
        &self.exercises
    }

    pub fn exercise(&self, id: &str) -> Option<&ExerciseDefinition> {
        self.exercises.iter().find(|ex| ex.id == id)
    }

    /// Exercises matching the optional category/difficulty filters
    pub fn filter_exercises(
        &self,
        category: Option<Category>,
        difficulty: Option<Difficulty>,
    ) -> Vec<&ExerciseDefinition> {
        self.exercises
            .iter()
            .filter(|ex| category.map_or(true, |c| ex.category == c))
            .filter(|ex| difficulty.map_or(true, |d| ex.difficulty == d))
            .collect()
    }

    pub fn achievements(&self) -> &[Badge] {
        &self.achievements
    }

    pub fn badge(&self, name: &str) -> Option<&Badge> {
        self.achievements.iter().find(|b| b.name == name)
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn patient(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id == id)
    }

    pub fn therapists(&self) -> &[Therapist] {
        &self.therapists
    }

    pub fn faqs(&self) -> &[FaqEntry] {
        &self.faqs
    }

    pub fn demo_profile(&self) -> &DemoProfile {
        &self.demo_profile
    }

    pub fn progress_series(&self) -> &ProgressSeries {
        &self.progress_series
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::demo()
    }
}

fn demo_exercises() -> Vec<ExerciseDefinition> {
    vec![
        ExerciseDefinition {
            id: "exercise_001".to_string(),
            name: "Knee Flexion Stretch".to_string(),
            category: Category::Flexibility,
            difficulty: Difficulty::Beginner,
            duration_seconds: 180,
            target_reps: Some(10),
            target_time_seconds: None,
            hold_time_seconds: Some(15),
            points: 15,
            description: "Gentle knee bending exercise to improve flexibility and range of motion"
                .to_string(),
            instructions: vec![
                "Sit on edge of chair with feet flat on floor".to_string(),
                "Slowly bend affected knee, bringing heel toward buttocks".to_string(),
                "Hold stretch for 15 seconds".to_string(),
                "Return to starting position".to_string(),
                "Repeat 10 times".to_string(),
            ],
            target_muscles: vec!["Quadriceps".to_string(), "Knee Joint".to_string()],
            precautions: vec![
                "Stop if pain increases".to_string(),
                "Move slowly and controlled".to_string(),
            ],
            required_equipment: vec!["Chair".to_string()],
        },
        ExerciseDefinition {
            id: "exercise_002".to_string(),
            name: "Wall Push-Ups".to_string(),
            category: Category::Strength,
            difficulty: Difficulty::Beginner,
            duration_seconds: 120,
            target_reps: Some(15),
            target_time_seconds: None,
            hold_time_seconds: None,
            points: 20,
            description: "Upper body strengthening exercise for shoulder rehabilitation"
                .to_string(),
            instructions: vec![
                "Stand arm's length from wall".to_string(),
                "Place palms flat against wall at shoulder height".to_string(),
                "Lean forward and push back slowly".to_string(),
                "Keep body straight throughout movement".to_string(),
                "Complete 15 repetitions".to_string(),
            ],
            target_muscles: vec![
                "Chest".to_string(),
                "Shoulders".to_string(),
                "Triceps".to_string(),
            ],
            precautions: vec![
                "Avoid if shoulder pain occurs".to_string(),
                "Maintain proper form".to_string(),
            ],
            required_equipment: vec!["Wall".to_string()],
        },
        ExerciseDefinition {
            id: "exercise_003".to_string(),
            name: "Single Leg Balance".to_string(),
            category: Category::Balance,
            difficulty: Difficulty::Intermediate,
            duration_seconds: 300,
            target_reps: None,
            target_time_seconds: Some(30),
            hold_time_seconds: None,
            points: 25,
            description: "Balance training exercise to improve proprioception and stability"
                .to_string(),
            instructions: vec![
                "Stand near wall or chair for support if needed".to_string(),
                "Lift one foot off ground".to_string(),
                "Balance on standing leg for 30 seconds".to_string(),
                "Keep eyes focused straight ahead".to_string(),
                "Switch legs and repeat".to_string(),
            ],
            target_muscles: vec![
                "Core".to_string(),
                "Ankles".to_string(),
                "Legs".to_string(),
            ],
            precautions: vec![
                "Use support if balance is poor".to_string(),
                "Stop if dizziness occurs".to_string(),
            ],
            required_equipment: vec!["Optional: Chair for support".to_string()],
        },
    ]
}

fn demo_achievements() -> Vec<Badge> {
    vec![
        Badge {
            id: "badge_001".to_string(),
            name: "First Steps".to_string(),
            description: "Complete your first exercise session".to_string(),
            icon: "🏁".to_string(),
            category: BadgeCategory::Milestone,
            points: 50,
            rarity: Rarity::Common,
        },
        Badge {
            id: "badge_002".to_string(),
            name: "Week Warrior".to_string(),
            description: "Complete exercises 7 days in a row".to_string(),
            icon: "🔥".to_string(),
            category: BadgeCategory::Consistency,
            points: 100,
            rarity: Rarity::Uncommon,
        },
        Badge {
            id: "badge_003".to_string(),
            name: "Form Master".to_string(),
            description: "Achieve 90%+ form accuracy in 10 sessions".to_string(),
            icon: "🎯".to_string(),
            category: BadgeCategory::Precision,
            points: 150,
            rarity: Rarity::Rare,
        },
        Badge {
            id: "badge_004".to_string(),
            name: "Consistency Champion".to_string(),
            description: "Maintain 80%+ adherence for 30 days".to_string(),
            icon: "👑".to_string(),
            category: BadgeCategory::Adherence,
            points: 200,
            rarity: Rarity::Epic,
        },
    ]
}

fn demo_patients() -> Vec<Patient> {
    vec![
        Patient {
            id: "patient_001".to_string(),
            name: "Sarah Martinez".to_string(),
            age: 28,
            condition: "ACL Reconstruction Recovery".to_string(),
            therapist_id: "therapist_001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 8, 15).unwrap_or_default(),
            status: "active".to_string(),
            risk_level: RiskLevel::Low,
            adherence_rate: 87,
            total_sessions: 28,
            completed_sessions: 24,
            current_streak: 12,
            longest_streak: 18,
            total_points: 1850,
            level: 4,
            badges: vec![
                "Consistency Champion".to_string(),
                "Form Master".to_string(),
                "Week Warrior".to_string(),
            ],
            next_appointment: "2025-09-06T14:00:00Z".parse().ok(),
            last_activity: "2025-09-04T09:30:00Z".parse().ok(),
            progress_metrics: ProgressMetrics {
                range_of_motion: 85,
                strength: 72,
                balance: 89,
                endurance: 78,
            },
        },
        Patient {
            id: "patient_002".to_string(),
            name: "Michael Chen".to_string(),
            age: 45,
            condition: "Shoulder Impingement Recovery".to_string(),
            therapist_id: "therapist_001".to_string(),
            start_date: NaiveDate::from_ymd_opt(2024, 7, 20).unwrap_or_default(),
            status: "active".to_string(),
            risk_level: RiskLevel::Medium,
            adherence_rate: 72,
            total_sessions: 35,
            completed_sessions: 25,
            current_streak: 3,
            longest_streak: 14,
            total_points: 1420,
            level: 3,
            badges: vec![
                "Beginner's Luck".to_string(),
                "Progress Pioneer".to_string(),
            ],
            next_appointment: "2025-09-05T16:30:00Z".parse().ok(),
            last_activity: "2025-09-02T11:15:00Z".parse().ok(),
            progress_metrics: ProgressMetrics {
                range_of_motion: 68,
                strength: 65,
                balance: 82,
                endurance: 71,
            },
        },
    ]
}

fn demo_therapists() -> Vec<Therapist> {
    vec![Therapist {
        id: "therapist_001".to_string(),
        name: "Dr. Jennifer Walsh".to_string(),
        title: "Licensed Physical Therapist".to_string(),
        credentials: vec!["DPT".to_string(), "OCS".to_string(), "CSCS".to_string()],
        specializations: vec![
            "Sports Rehabilitation".to_string(),
            "Orthopedic Recovery".to_string(),
            "Post-Surgical Care".to_string(),
        ],
        experience: "8 years".to_string(),
        rating: 4.9,
        total_patients: 15,
        active_patients: 12,
        phone: "+1-555-0123".to_string(),
        email: "dr.walsh@rehabconnect.com".to_string(),
    }]
}

fn demo_faqs() -> Vec<FaqEntry> {
    let entries = [
        (
            "How does motion tracking work?",
            "Our platform uses advanced computer vision technology to analyze your movements \
             through your device's camera. It provides real-time feedback on exercise form and \
             tracks your progress over time.",
        ),
        (
            "Is my health data secure?",
            "Yes, we use enterprise-grade encryption and follow HIPAA compliance standards to \
             protect your health information. Your data is never shared without your explicit \
             consent.",
        ),
        (
            "What equipment do I need?",
            "Most exercises require minimal equipment - just a chair, wall, or open space. \
             Specific equipment needs are listed for each exercise. A webcam or smartphone \
             camera is needed for motion tracking.",
        ),
        (
            "Can I do exercises without internet?",
            "Yes! You can download exercise videos for offline viewing. Progress will sync when \
             you reconnect to the internet.",
        ),
        (
            "How often should I exercise?",
            "Your therapist will create a personalized schedule based on your condition and \
             recovery goals. Generally, consistency is more important than intensity.",
        ),
    ];

    entries
        .iter()
        .map(|(q, a)| FaqEntry {
            question: q.to_string(),
            answer: a.to_string(),
        })
        .collect()
}

fn demo_profile() -> DemoProfile {
    DemoProfile {
        id: "patient_001".to_string(),
        name: "Sarah Martinez".to_string(),
        email: "sarah.martinez@email.com".to_string(),
        condition: "ACL Recovery".to_string(),
        streak_days: 12,
        total_points: 1850,
        completed_sessions: 28,
        adherence_rate: 87,
        badges: vec![
            "Consistency Champion".to_string(),
            "Form Master".to_string(),
            "Week Warrior".to_string(),
        ],
    }
}

fn demo_progress_series() -> ProgressSeries {
    ProgressSeries {
        weekly_adherence: [85, 92, 78, 89, 94, 87, 91],
        range_of_motion: [65, 72, 78, 85],
        strength: [58, 64, 69, 72],
        balance: [75, 82, 86, 89],
        endurance: [62, 68, 74, 78],
        exercise_accuracy: vec![
            ("Knee Flexion".to_string(), 92, "improving".to_string()),
            ("Wall Push-ups".to_string(), 86, "stable".to_string()),
            ("Balance".to_string(), 89, "improving".to_string()),
        ],
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_catalog_lookup() {
        let catalog = Catalog::demo();
        assert_eq!(catalog.exercises().len(), 3);

        let knee = catalog.exercise("exercise_001").unwrap();
        assert_eq!(knee.name, "Knee Flexion Stretch");
        assert_eq!(knee.points, 15);
        assert_eq!(knee.target(), 10);

        assert!(catalog.exercise("exercise_999").is_none());
    }

    #[test]
    fn test_filter_exercises() {
        let catalog = Catalog::demo();

        let beginner = catalog.filter_exercises(None, Some(Difficulty::Beginner));
        assert_eq!(beginner.len(), 2);

        let balance = catalog.filter_exercises(Some(Category::Balance), None);
        assert_eq!(balance.len(), 1);
        assert_eq!(balance[0].id, "exercise_003");

        let none = catalog.filter_exercises(Some(Category::Balance), Some(Difficulty::Beginner));
        assert!(none.is_empty());
    }

    #[test]
    fn test_patient_and_badge_lookup() {
        let catalog = Catalog::demo();

        let sarah = catalog.patient("patient_001").unwrap();
        assert_eq!(sarah.condition, "ACL Reconstruction Recovery");
        assert!(catalog.patient("patient_999").is_none());

        let badge = catalog.badge("First Steps").unwrap();
        assert_eq!(badge.points, 50);
    }

    #[test]
    fn test_balance_exercise_is_time_based() {
        let catalog = Catalog::demo();
        let balance = catalog.exercise("exercise_003").unwrap();
        assert!(!balance.is_rep_based());
        assert_eq!(balance.target(), 30);
    }
}
