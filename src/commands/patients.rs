use anyhow::Result;
use colored::Colorize;

use crate::catalog::Catalog;

pub async fn list_patients() -> Result<()> {
    let catalog = Catalog::demo();

    println!("Patient Roster");
    println!();

    for patient in catalog.patients() {
        println!(
            "{}  {} ({})",
            patient.id.bold(),
            patient.name.cyan(),
            patient.age
        );
        println!("    {}", patient.condition);
        println!(
            "    {} risk · {}% adherence · {}-day streak · level {}",
            patient.risk_level, patient.adherence_rate, patient.current_streak, patient.level
        );
        println!(
            "    ROM {}% · strength {}% · balance {}% · endurance {}%",
            patient.progress_metrics.range_of_motion,
            patient.progress_metrics.strength,
            patient.progress_metrics.balance,
            patient.progress_metrics.endurance
        );
        if !patient.badges.is_empty() {
            println!("    Badges: {}", patient.badges.join(", ").dimmed());
        }
        println!();
    }

    Ok(())
}
