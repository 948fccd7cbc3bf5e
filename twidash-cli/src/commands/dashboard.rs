//! Dashboard commands.

use anyhow::Result;
use colored::Colorize;

use crate::config::{build_dashboard, CredentialOverrides};
use crate::handlers::dashboard::{self as handler, DashboardInfo, PostInfo};
use crate::output::{print_heading, print_json, print_table, OutputFormat, PlainPrint};

/// Fetch and render the whole dashboard.
pub async fn show(overrides: &CredentialOverrides, format: OutputFormat) -> Result<()> {
    let dashboard = build_dashboard(overrides)?;
    let info = handler::refresh(&dashboard).await?;

    render(&info, format);
    Ok(())
}

/// Post a status, then show where it landed.
pub async fn post(overrides: &CredentialOverrides, text: &str, format: OutputFormat) -> Result<()> {
    let dashboard = build_dashboard(overrides)?;
    // Load the view first so the new status lands in it.
    dashboard.refresh().await?;
    let info = handler::post_status(&dashboard, text).await?;

    render_post(&info, format);
    Ok(())
}

fn render(info: &DashboardInfo, format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        print_json(info);
        return;
    }

    print_heading("Account");
    info.account.plain_print();

    print_heading("Following");
    print_table(&info.friends, format);

    print_heading("Recent statuses");
    print_table(&info.tweets, format);

    print_heading("Messages");
    print_table(&info.messages, format);
    match &info.chat_buddy {
        Some(buddy) => {
            print!("{} ", "Chatting with".dimmed());
            buddy.plain_print();
        }
        None => println!("{}", "No conversation partner".dimmed()),
    }
}

fn render_post(info: &PostInfo, format: OutputFormat) {
    if matches!(format, OutputFormat::Json) {
        print_json(info);
        return;
    }

    println!("{} {}", "Posted".green(), format!("[ID: {}]", info.tweet.id).dimmed());
    if let Some(dashboard) = &info.dashboard {
        print_heading("Recent statuses");
        print_table(&dashboard.tweets, format);
    }
}
