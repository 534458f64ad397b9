use serde::{Deserialize, Serialize};

use super::onboarding::OnboardingWizard;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Patient,
    Therapist,
}

/// Top-level screens the user can navigate to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewId {
    Dashboard,
    Exercises,
    Progress,
    Achievements,
    Patients,
    Support,
    About,
}

impl ViewId {
    pub fn title(&self) -> &'static str {
        match self {
            ViewId::Dashboard => "Dashboard",
            ViewId::Exercises => "Exercises",
            ViewId::Progress => "Progress",
            ViewId::Achievements => "Achievements",
            ViewId::Patients => "Patients",
            ViewId::Support => "Support",
            ViewId::About => "About",
        }
    }

    /// Navigation entries shown for a role
    pub fn for_role(role: Role) -> &'static [ViewId] {
        match role {
            Role::Patient => &[
                ViewId::Dashboard,
                ViewId::Exercises,
                ViewId::Progress,
                ViewId::Achievements,
                ViewId::Support,
                ViewId::About,
            ],
            Role::Therapist => &[
                ViewId::Dashboard,
                ViewId::Patients,
                ViewId::Support,
                ViewId::About,
            ],
        }
    }
}

/// Process-wide session: who is signed in and where they are.
///
/// Created at app start, mutated by auth and onboarding operations, and
/// reset to initial values on logout.
#[derive(Debug, Clone)]
pub struct Session {
    pub authenticated: bool,
    pub role: Role,
    pub current_view: ViewId,
    pub onboarding: OnboardingWizard,
    pub user_name: String,
    pub user_email: String,
}

impl Session {
    pub fn new() -> Self {
        Self {
            authenticated: false,
            role: Role::Patient,
            current_view: ViewId::Dashboard,
            onboarding: OnboardingWizard::new(),
            user_name: String::new(),
            user_email: String::new(),
        }
    }

    /// Tear the session down to its initial values
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    pub fn navigate(&mut self, view: ViewId) {
        self.current_view = view;
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Role::Patient => write!(f, "Patient"),
            Role::Therapist => write!(f, "Therapist"),
        }
    }
}

impl std::str::FromStr for Role {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "patient" => Ok(Role::Patient),
            "therapist" => Ok(Role::Therapist),
            _ => Err(anyhow::anyhow!("Invalid role: {}", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_session_reset() {
        let mut session = Session::new();
        session.authenticated = true;
        session.role = Role::Therapist;
        session.navigate(ViewId::Patients);

        session.reset();
        assert!(!session.authenticated);
        assert_eq!(session.role, Role::Patient);
        assert_eq!(session.current_view, ViewId::Dashboard);
    }

    #[test]
    fn test_views_per_role() {
        assert!(ViewId::for_role(Role::Patient).contains(&ViewId::Exercises));
        assert!(!ViewId::for_role(Role::Patient).contains(&ViewId::Patients));
        assert!(ViewId::for_role(Role::Therapist).contains(&ViewId::Patients));
    }
}
