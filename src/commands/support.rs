use anyhow::Result;
use colored::Colorize;

use crate::catalog::Catalog;

pub async fn show_support() -> Result<()> {
    let catalog = Catalog::demo();

    println!("Support");
    println!();

    for therapist in catalog.therapists() {
        println!(
            "Your therapist: {} ({})",
            therapist.name.bold(),
            therapist.credentials.join(", ")
        );
        println!("  {}", therapist.title);
        println!("  {} · {}", therapist.phone, therapist.email);
        println!(
            "  Specializations: {}",
            therapist.specializations.join(", ")
        );
        println!();
    }

    println!("Frequently Asked Questions");
    println!();

    for faq in catalog.faqs() {
        println!("{}", faq.question.cyan().bold());
        println!("  {}", faq.answer);
        println!();
    }

    Ok(())
}
