use anyhow::Result;
use colored::Colorize;

use crate::session::SessionFlow;

pub async fn show_achievements() -> Result<()> {
    let mut flow = SessionFlow::new();
    flow.demo_login();

    println!("Achievements");
    println!();

    for badge in flow.catalog.achievements() {
        let earned = flow.progress.has_badge(&badge.name);
        let marker = if earned {
            "✓".green().to_string()
        } else {
            "·".dimmed().to_string()
        };

        println!(
            "{} {}  {}  {} pts · {}",
            marker,
            badge.icon,
            if earned {
                badge.name.bold().to_string()
            } else {
                badge.name.dimmed().to_string()
            },
            badge.points,
            badge.rarity
        );
        println!("      {}", badge.description.dimmed());
    }

    let earned_count = flow
        .catalog
        .achievements()
        .iter()
        .filter(|b| flow.progress.has_badge(&b.name))
        .count();

    println!();
    println!(
        "{} of {} earned",
        earned_count,
        flow.catalog.achievements().len()
    );

    Ok(())
}
