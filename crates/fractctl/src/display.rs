//! Terminal output formatting.

use console::style;
use owo_colors::OwoColorize;

use fracture_common::api::HealthResponse;
use fracture_common::state::{Notification, NotificationKind};
use fracture_common::types::AnalysisRecord;

use crate::analyze::AnalysisOutcome;

/// Print a full analysis outcome.
pub fn print_outcome(outcome: &AnalysisOutcome) {
    let result = &outcome.result;

    println!("{}", style("Fracture Analysis Results").bold().underlined());
    println!();

    let verdict = if result.fracture_detected {
        format!("{}", "Fracture Detected: YES".red().bold())
    } else {
        format!("{}", "Fracture Detected: NO".green().bold())
    };
    println!("  {}", verdict);
    println!("  Bone Type:  {}", result.bone_type);
    println!("  Confidence: {}%", result.confidence);
    println!("  Location:   {}", result.location);
    if let Some(accuracy) = outcome.accuracy {
        println!("  Model Accuracy: {}%", accuracy);
    }
    println!();

    println!("{}", style("Medical Recommendations").bold());
    for (i, rec) in result.recommendations.iter().enumerate() {
        println!("  {}. {}", i + 1, rec);
    }

    if let Some(reference) = &outcome.reference_case {
        println!();
        println!("{}", style("Reference Case").bold());
        println!("  {} - {} ({})", reference.id, reference.desc, reference.source);
    }

    if !outcome.experimental_features.is_empty() {
        println!();
        println!("{}", style("Applied Features").bold());
        for feature in &outcome.experimental_features {
            println!("  - {}", feature);
        }
    }
}

/// Print the notification feed, newest first.
pub fn print_notifications(items: &[Notification]) {
    for notification in items {
        let tag = match notification.kind {
            NotificationKind::Info => format!("{}", "info".blue()),
            NotificationKind::Success => format!("{}", "ok".green()),
            NotificationKind::Error => format!("{}", "error".red()),
        };
        println!(
            "[{}] {} {}",
            notification.time.format("%H:%M:%S"),
            tag,
            notification.message
        );
    }
}

/// Print the daemon's history page.
pub fn print_history(records: &[AnalysisRecord]) {
    if records.is_empty() {
        println!("No analysis history available");
        println!("Complete an analysis to see history");
        return;
    }

    for record in records {
        let status = if record.fracture_detected {
            format!("{}", "Fracture".red())
        } else {
            format!("{}", "Normal".green())
        };
        println!(
            "{}  {:<10} {:<8} {}% confidence  {}",
            record.uploaded_at.format("%Y-%m-%d %H:%M"),
            record.bone_type.to_string(),
            status,
            record.confidence,
            record.image_name
        );
    }
}

/// Print daemon health.
pub fn print_health(health: &HealthResponse) {
    println!(
        "fractd {} is {} (up {}s)",
        health.version,
        style(&health.status).green(),
        health.uptime_seconds
    );
}
