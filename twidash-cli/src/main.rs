//! twidash CLI and MCP Server.

mod commands;
mod config;
mod handlers;
mod mcp;
mod output;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use colored::Colorize;
use commands::dashboard;
use config::CredentialOverrides;

/// Personal dashboard CLI and MCP Server
#[derive(Parser)]
#[command(name = "twidash")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Output format
    #[arg(short, long, global = true, default_value = "plain")]
    format: output::OutputFormat,

    /// Show verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(flatten)]
    credentials: CredentialArgs,

    #[command(subcommand)]
    command: Option<Commands>,

    /// Run as MCP Server
    #[arg(long)]
    mcp: bool,
}

/// Credential overrides, taking precedence over the config file.
#[derive(Args)]
struct CredentialArgs {
    /// Consumer key
    #[arg(long, global = true, env = "TWIDASH_CONSUMER_KEY", hide_env_values = true)]
    consumer_key: Option<String>,

    /// Consumer secret
    #[arg(long, global = true, env = "TWIDASH_CONSUMER_SECRET", hide_env_values = true)]
    consumer_secret: Option<String>,

    /// Access token
    #[arg(long, global = true, env = "TWIDASH_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Access token secret
    #[arg(long, global = true, env = "TWIDASH_ACCESS_TOKEN_SECRET", hide_env_values = true)]
    access_token_secret: Option<String>,
}

impl From<CredentialArgs> for CredentialOverrides {
    fn from(a: CredentialArgs) -> Self {
        CredentialOverrides {
            consumer_key: a.consumer_key,
            consumer_secret: a.consumer_secret,
            access_token: a.access_token,
            access_token_secret: a.access_token_secret,
        }
    }
}

#[derive(Subcommand)]
enum Commands {
    /// Manage authentication
    Auth {
        #[command(subcommand)]
        action: AuthAction,
    },

    /// Show the dashboard
    #[command(alias = "s")]
    Show,

    /// Post a status
    #[command(alias = "p")]
    Post {
        /// Status text
        text: String,
    },

    /// Show current configuration
    Config,
}

#[derive(Subcommand)]
enum AuthAction {
    /// Store credentials
    Login {
        /// Consumer key
        #[arg(long)]
        consumer_key: String,
        /// Consumer secret
        #[arg(long)]
        consumer_secret: String,
        /// Access token
        #[arg(long)]
        access_token: String,
        /// Access token secret
        #[arg(long)]
        access_token_secret: String,
    },
    /// Forget stored credentials
    Logout,
    /// Show current auth status
    Status,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let level = if cli.verbose {
        tracing::Level::DEBUG
    } else if cli.mcp {
        tracing::Level::INFO
    } else {
        tracing::Level::WARN
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(cli).await {
        report(&e);
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let overrides: CredentialOverrides = cli.credentials.into();

    if cli.mcp {
        return mcp::run_server(overrides).await;
    }

    match require_command(cli.command)? {
        Commands::Auth { action } => handle_auth(action).await,
        Commands::Show => dashboard::show(&overrides, cli.format).await,
        Commands::Post { text } => dashboard::post(&overrides, &text, cli.format).await,
        Commands::Config => {
            let cfg = config::load_config()?;
            println!("Config file: {}", config::config_path()?.display());
            println!("Authenticated: {}", cfg.credentials.is_some());
            if let Some(uid) = cfg
                .credentials
                .map(twidash::Credentials::from)
                .and_then(|c| c.token_user_id().map(str::to_string))
            {
                println!("User ID: {}", uid);
            }
            if let Some(url) = &cfg.base_url {
                println!("Base URL: {}", url);
            }
            let display = &cfg.display;
            println!(
                "Display: {} friends, {} statuses, {} messages",
                display.friends, display.posts, display.messages
            );
            Ok(())
        }
    }
}

fn require_command(command: Option<Commands>) -> twidash::Result<Commands> {
    command.ok_or_else(|| {
        twidash::Error::NotFound("no command given, run 'twidash --help' for usage".into())
    })
}

/// Print an error chain, with the user-facing summary when one applies.
fn report(e: &anyhow::Error) {
    if let Some(info) = e
        .chain()
        .find_map(|cause| cause.downcast_ref::<twidash::Error>())
        .and_then(twidash::Error::info)
    {
        eprintln!("{} {}", "error:".red().bold(), info);
        eprintln!("  {}", format!("{:#}", e).dimmed());
    } else {
        eprintln!("{} {:#}", "error:".red().bold(), e);
    }
}

async fn handle_auth(action: AuthAction) -> Result<()> {
    match action {
        AuthAction::Login {
            consumer_key,
            consumer_secret,
            access_token,
            access_token_secret,
        } => {
            let mut cfg = config::load_config()?;
            let creds = config::CredentialsConfig {
                consumer_key,
                consumer_secret,
                access_token,
                access_token_secret,
            };
            let uid = twidash::Credentials::from(creds.clone())
                .token_user_id()
                .map(str::to_string);
            cfg.credentials = Some(creds);
            config::save_config(&cfg)?;
            match uid {
                Some(uid) => println!("Logged in as {}", uid),
                None => println!("Credentials saved"),
            }
            Ok(())
        }
        AuthAction::Logout => {
            let mut cfg = config::load_config()?;
            cfg.credentials = None;
            config::save_config(&cfg)?;
            println!("Logged out");
            Ok(())
        }
        AuthAction::Status => {
            let cfg = config::load_config()?;
            match cfg.credentials {
                Some(creds) => {
                    let creds = twidash::Credentials::from(creds);
                    println!(
                        "Logged in as {}",
                        creds.token_user_id().unwrap_or("(unknown user)")
                    );
                }
                None => println!("Not logged in"),
            }
            Ok(())
        }
    }
}
