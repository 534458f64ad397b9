use anyhow::Result;
use clap::Args;
use colored::Colorize;

use crate::session::SessionFlow;

#[derive(Args)]
pub struct ProgressCommand {
    /// Show the weekly adherence breakdown
    #[arg(long)]
    week: bool,

    /// Print progress totals as JSON
    #[arg(long)]
    json: bool,
}

impl ProgressCommand {
    pub async fn execute(self) -> Result<()> {
        let mut flow = SessionFlow::new();
        flow.demo_login();

        if self.json {
            println!("{}", serde_json::to_string_pretty(&flow.progress)?);
            return Ok(());
        }

        println!("Recovery Progress for {}", flow.session.user_name.bold());
        println!();
        println!(
            "  Level {}  ·  {} points  ·  {}-day streak  ·  {} sessions",
            flow.progress.level(),
            flow.progress.total_points,
            flow.progress.streak_days,
            flow.progress.completed_sessions
        );

        let series = flow.catalog.progress_series();

        println!();
        println!("Monthly trends (weeks 1-4):");
        print_series("Range of motion", &series.range_of_motion);
        print_series("Strength", &series.strength);
        print_series("Balance", &series.balance);
        print_series("Endurance", &series.endurance);

        if self.week {
            println!();
            println!("Weekly adherence:");
            let days = ["Mon", "Tue", "Wed", "Thu", "Fri", "Sat", "Sun"];
            for (day, value) in days.iter().zip(series.weekly_adherence.iter()) {
                println!("  {}  {:>3}%  {}", day, value, meter(*value));
            }
        }

        println!();
        println!("Exercise accuracy:");
        for (name, accuracy, trend) in &series.exercise_accuracy {
            println!("  {:<16} {:>3}%  ({})", name, accuracy, trend.dimmed());
        }

        Ok(())
    }
}

fn print_series(label: &str, values: &[u64]) {
    let rendered: Vec<String> = values.iter().map(|v| format!("{:>3}", v)).collect();
    println!("  {:<16} {}", label, rendered.join(" → "));
}

fn meter(percent: u64) -> String {
    let filled = (percent as usize * 20) / 100;
    format!("{}{}", "█".repeat(filled), "░".repeat(20 - filled))
}
