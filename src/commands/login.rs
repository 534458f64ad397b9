use std::time::Duration;

use anyhow::Result;
use clap::Args;
use dialoguer::{Input, MultiSelect, Password, Select};
use indicatif::{ProgressBar, ProgressStyle};

use crate::notify::{NotificationSink, TerminalSink, Toast};
use crate::session::onboarding::{CONDITION_OPTIONS, GOAL_OPTIONS};
use crate::session::{Role, SessionFlow, WizardAdvance};

const AUTH_DELAY: Duration = Duration::from_millis(1500);

#[derive(Args)]
pub struct LoginCommand {
    /// Sign in with the demo patient account
    #[arg(long)]
    demo: bool,

    /// Role to sign in as (patient, therapist)
    #[arg(long)]
    role: Option<String>,
}

impl LoginCommand {
    pub async fn execute(self) -> Result<()> {
        println!("RehabConnect - Sign In");
        println!();

        let mut sink = TerminalSink;
        let mut flow = SessionFlow::new();

        if self.demo {
            sink.notify(Toast::info("Loading demo account..."));
            spin("Signing in", Duration::from_secs(1)).await;
            flow.demo_login();
        } else {
            let role: Role = match self.role {
                Some(ref r) => r.parse()?,
                None => {
                    let choice = Select::new()
                        .with_prompt("Sign in as")
                        .items(&["Patient", "Therapist"])
                        .default(0)
                        .interact()?;
                    if choice == 0 {
                        Role::Patient
                    } else {
                        Role::Therapist
                    }
                }
            };

            let name: String = Input::new().with_prompt("Name").interact_text()?;
            let email: String = Input::new().with_prompt("Email").interact_text()?;
            // Accepted but never checked; there is no server to check against
            let _password = Password::new().with_prompt("Password").interact()?;

            sink.notify(Toast::info("Authenticating..."));
            spin("Signing in", AUTH_DELAY).await;
            flow.sign_in(role, name, email);

            if role == Role::Patient {
                run_onboarding(&mut flow, &mut sink)?;
            }
        }

        println!();
        println!("✓ Welcome, {}!", flow.session.user_name);
        println!("  Role: {}", flow.session.role);
        println!(
            "  Level {} · {} points · {}-day streak",
            flow.progress.level(),
            flow.progress.total_points,
            flow.progress.streak_days
        );
        println!();
        println!("Nothing is stored between runs; launch `rehabconnect dashboard`");
        println!("for the full interactive experience.");

        Ok(())
    }
}

/// Drive the 4-step intake wizard through terminal prompts
fn run_onboarding(flow: &mut SessionFlow, sink: &mut dyn NotificationSink) -> Result<()> {
    println!();
    println!("Let's personalize your recovery plan.");

    loop {
        let wizard = &mut flow.session.onboarding;
        println!();
        println!("Step {} of 4", wizard.step());

        match wizard.step() {
            1 => {
                let condition = Select::new()
                    .with_prompt("Primary condition")
                    .items(&CONDITION_OPTIONS)
                    .default(0)
                    .interact()?;
                wizard.set_condition(CONDITION_OPTIONS[condition]);

                let pain: u8 = Input::new()
                    .with_prompt("Current pain level (0-10)")
                    .validate_with(|input: &u8| {
                        if *input <= 10 {
                            Ok(())
                        } else {
                            Err("Pain level must be between 0 and 10")
                        }
                    })
                    .interact_text()?;
                wizard.set_pain_level(pain).ok();
            }
            2 => {
                let levels = crate::session::ActivityLevel::ALL;
                let labels: Vec<String> = levels.iter().map(|l| l.to_string()).collect();
                let choice = Select::new()
                    .with_prompt("Activity level before your injury")
                    .items(&labels)
                    .default(1)
                    .interact()?;
                wizard.set_activity_level(levels[choice]);
            }
            3 => {
                let selected = MultiSelect::new()
                    .with_prompt("Recovery goals (space to select)")
                    .items(&GOAL_OPTIONS)
                    .interact()?;
                for idx in selected {
                    wizard.toggle_goal(GOAL_OPTIONS[idx]);
                }
            }
            _ => {
                let answers = &wizard.answers;
                println!("Review your plan:");
                if let Some(condition) = &answers.condition {
                    println!("  Condition: {}", condition);
                }
                if let Some(pain) = answers.pain_level {
                    println!("  Pain level: {}/10", pain);
                }
                if let Some(activity) = answers.activity_level {
                    println!("  Activity level: {}", activity);
                }
                if !answers.goals.is_empty() {
                    let goals: Vec<&str> = answers.goals.iter().map(String::as_str).collect();
                    println!("  Goals: {}", goals.join(", "));
                }
            }
        }

        match flow.session.onboarding.next() {
            Ok(WizardAdvance::Completed) => {
                sink.notify(Toast::success(
                    "Onboarding complete! Setting up your personalized dashboard...",
                ));
                return Ok(());
            }
            Ok(WizardAdvance::Step(_)) => {}
            Err(err) => {
                sink.notify(Toast::warning(err.to_string()));
            }
        }
    }
}

async fn spin(message: &str, duration: Duration) {
    let bar = ProgressBar::new_spinner();
    if let Ok(style) = ProgressStyle::with_template("{spinner} {msg}") {
        bar.set_style(style);
    }
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(80));
    tokio::time::sleep(duration).await;
    bar.finish_and_clear();
}
