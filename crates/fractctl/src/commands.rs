//! Command execution.

use anyhow::Result;
use chrono::Utc;
use indicatif::{ProgressBar, ProgressStyle};
use std::path::{Path, PathBuf};
use std::time::Duration;

use fracture_common::report;
use fracture_common::state::{
    NotificationFeed, NotificationKind, RecentAnalyses, Session, UserType,
};

use crate::analyze;
use crate::client::DaemonClient;
use crate::display;

fn spinner(message: &str) -> ProgressBar {
    let bar = ProgressBar::new_spinner();
    bar.set_style(
        ProgressStyle::with_template("{spinner} {msg}").unwrap_or_else(|_| ProgressStyle::default_spinner()),
    );
    bar.set_message(message.to_string());
    bar.enable_steady_tick(Duration::from_millis(100));
    bar
}

/// `fractctl analyze <image>`
pub async fn analyze_command(
    client: &DaemonClient,
    image: &Path,
    user: &str,
    user_type: &str,
    report_path: Option<PathBuf>,
    json: bool,
) -> Result<()> {
    let mut feed = NotificationFeed::new();
    let mut recent = RecentAnalyses::new();

    let user_type: UserType = user_type.parse()?;
    let session = Session {
        name: user.to_string(),
        email: String::new(),
        user_type,
    };

    // Validation failures surface as a notification and abort the run.
    let upload = match analyze::load_upload(image) {
        Ok(upload) => upload,
        Err(e) => {
            feed.push(e.to_string(), NotificationKind::Error);
            display::print_notifications(feed.items());
            return Ok(());
        }
    };
    feed.push("Image uploaded successfully", NotificationKind::Success);

    let bar = spinner("Analyzing fracture patterns...");
    let outcome = analyze::run_analysis(client, &upload, &session, &mut feed, &mut recent).await;
    bar.finish_and_clear();

    if json {
        println!("{}", serde_json::to_string_pretty(&outcome.result)?);
    } else {
        display::print_notifications(feed.items());
        println!();
        display::print_outcome(&outcome);
    }

    if let Some(path) = report_path {
        let generated_at = Utc::now();
        let document = report::analysis_report(&session, &outcome.result, generated_at);
        let path = if path.as_os_str().is_empty() {
            PathBuf::from(report::report_file_name(generated_at))
        } else {
            path
        };
        document.write_to(&path)?;
        println!();
        println!("Report written to {}", path.display());
    }

    Ok(())
}

/// `fractctl history`
pub async fn history_command(client: &DaemonClient, json: bool) -> Result<()> {
    let records = client.history().await?;
    if json {
        println!("{}", serde_json::to_string_pretty(&records)?);
    } else {
        display::print_history(&records);
    }
    Ok(())
}

/// `fractctl chat <message>`
pub async fn chat_command(client: &DaemonClient, message: &str) -> Result<()> {
    match client.chat(message).await {
        Ok(response) => println!("{}", response),
        Err(_) => {
            println!("I'm having trouble connecting. Please check if the backend is running.");
        }
    }
    Ok(())
}

/// `fractctl status`
pub async fn status_command(client: &DaemonClient) -> Result<()> {
    let health = client.health().await?;
    display::print_health(&health);
    Ok(())
}
