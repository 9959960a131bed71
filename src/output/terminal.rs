// Colored terminal output for recommendations and score tables.

use colored::Colorize;

use crate::analysis::decision::Recommendation;
use crate::analysis::scores::ScoreTable;
use crate::specialty::registry::Specialty;

/// Print the recommendation sentence with the specialty highlighted.
pub fn display_recommendation(recommendation: &Recommendation) {
    println!(
        "\n{} {}",
        "Specialty:".dimmed(),
        recommendation.specialty.name().bold().green()
    );
    println!("{}", recommendation.message);
}

/// Print every specialty's score in registry order, marking the decision.
pub fn display_scores(table: &ScoreTable, decided: Specialty, fallback_threshold: f64) {
    println!("\n{}", "=== Specialty Scores ===".bold());
    println!("  {:<20} {:>8}", "Specialty".dimmed(), "Score".dimmed());
    println!("  {}", "-".repeat(30).dimmed());

    for (specialty, score) in table.iter() {
        let line = format!("  {:<20} {:>8.3}", specialty.name(), score);
        if specialty == decided {
            println!("{}  {}", line.bold(), "<".green());
        } else if score == 0.0 {
            println!("{}", line.dimmed());
        } else {
            println!("{line}");
        }
    }

    if table.max() < fallback_threshold {
        println!(
            "\n  {}",
            format!("No score reached {fallback_threshold:.1}; falling back to {decided}.")
                .yellow()
        );
    }
}
