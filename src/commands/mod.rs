mod achievements;
mod chat;
mod config_cmd;
mod dashboard;
mod exercises;
mod login;
mod patients;
mod progress;
mod support;

use anyhow::Result;
use clap::{Parser, Subcommand};

pub use chat::ChatCommand;
pub use dashboard::DashboardCommand;
pub use login::LoginCommand;
pub use progress::ProgressCommand;

#[derive(Parser)]
#[command(name = "rehabconnect")]
#[command(about = "Terminal-based gamified remote rehabilitation companion", long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to configuration file
    #[arg(long, global = true, env = "REHABCONNECT_CONFIG")]
    config: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Sign in and run the intake wizard
    Login(LoginCommand),

    /// Browse and run exercises
    #[command(subcommand)]
    Exercises(ExerciseSubcommands),

    /// Show recovery progress and streaks
    Progress(ProgressCommand),

    /// Show earned and available achievements
    Achievements,

    /// Show the patient roster (therapist view)
    Patients,

    /// FAQs and care-team contact details
    Support,

    /// Talk to the assistant
    Chat(ChatCommand),

    /// Launch the interactive dashboard
    Dashboard(DashboardCommand),

    /// Manage configuration
    #[command(subcommand)]
    Config(ConfigSubcommands),

    /// Generate shell completions
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

#[derive(Subcommand)]
enum ExerciseSubcommands {
    /// List exercises in the program
    List {
        /// Filter by category (flexibility, strength, balance)
        #[arg(short, long)]
        category: Option<String>,

        /// Filter by difficulty (beginner, intermediate, advanced)
        #[arg(short, long)]
        difficulty: Option<String>,
    },

    /// Show exercise details
    Show {
        /// Exercise ID
        id: String,

        /// Print the exercise as JSON
        #[arg(long)]
        json: bool,
    },

    /// Run a guided exercise session
    Start {
        /// Exercise ID
        id: String,

        /// Skip the camera permission step
        #[arg(long)]
        no_camera: bool,
    },
}

#[derive(Subcommand)]
enum ConfigSubcommands {
    /// Show current configuration
    Show,

    /// Edit configuration file
    Edit,

    /// Initialize configuration with defaults
    Init {
        /// Overwrite existing config
        #[arg(short, long)]
        force: bool,
    },
}

impl Cli {
    pub async fn execute(self) -> Result<()> {
        if self.verbose {
            tracing::info!("Verbose mode enabled");
        }

        match self.command {
            Commands::Login(cmd) => cmd.execute().await,
            Commands::Exercises(subcmd) => match subcmd {
                ExerciseSubcommands::List {
                    category,
                    difficulty,
                } => exercises::list_exercises(category, difficulty).await,
                ExerciseSubcommands::Show { id, json } => exercises::show_exercise(&id, json).await,
                ExerciseSubcommands::Start { id, no_camera } => {
                    exercises::start_exercise(&id, no_camera).await
                }
            },
            Commands::Progress(cmd) => cmd.execute().await,
            Commands::Achievements => achievements::show_achievements().await,
            Commands::Patients => patients::list_patients().await,
            Commands::Support => support::show_support().await,
            Commands::Chat(cmd) => cmd.execute().await,
            Commands::Dashboard(cmd) => cmd.execute().await,
            Commands::Config(subcmd) => match subcmd {
                ConfigSubcommands::Show => config_cmd::show_config().await,
                ConfigSubcommands::Edit => config_cmd::edit_config().await,
                ConfigSubcommands::Init { force } => config_cmd::init_config(force).await,
            },
            Commands::Completions { shell } => {
                generate_completions(shell);
                Ok(())
            }
        }
    }
}

fn generate_completions(shell: clap_complete::Shell) {
    use clap::CommandFactory;
    use clap_complete::generate;
    use std::io;

    let mut cmd = Cli::command();
    let name = cmd.get_name().to_string();
    generate(shell, &mut cmd, name, &mut io::stdout());
}
