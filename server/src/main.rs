mod config;
mod graphql;
mod http;

use std::{fs, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Args, Parser, Subcommand};
use platform_obs::{ObsConfig, init_tracing, shutdown_tracing};
use products_hr::{HrModule, Processor, ReportFilters, ReportKind};
use serde_json::json;
use tracing::info;

use crate::{
    config::AppConfig,
    http::{AppState, ServeConfig},
};

#[derive(Parser, Debug)]
#[command(name = "hr-dashboard", version, about = "HR dashboard core")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Start the HTTP + GraphQL server.
    Serve(ServeCommand),
    /// Write one report to disk.
    Report(ReportCommand),
    /// Print the headline metrics as JSON.
    Summary,
    /// Print the GraphQL schema snapshot.
    #[command(name = "schema:print")]
    SchemaPrint {
        #[arg(long, value_name = "FILE", help = "Destination file path")]
        output: Option<PathBuf>,
    },
}

#[derive(Args, Debug)]
struct ServeCommand {
    #[arg(long, default_value = "0.0.0.0")]
    host: std::net::IpAddr,
    #[arg(long, default_value_t = 8080)]
    port: u16,
}

impl From<ServeCommand> for ServeConfig {
    fn from(value: ServeCommand) -> Self {
        ServeConfig::new(value.host, value.port)
    }
}

#[derive(Args, Debug)]
struct ReportCommand {
    /// payroll, tax, benefits, training, notifications, or <dataset>-export.
    kind: String,
    #[arg(long, value_name = "DIR", help = "Output directory (defaults to REPORTS_DIR)")]
    output: Option<PathBuf>,
    #[arg(long)]
    search: Option<String>,
    #[arg(long)]
    department: Option<String>,
    #[arg(long)]
    status: Option<String>,
    #[arg(long)]
    category: Option<String>,
    #[arg(long)]
    priority: Option<String>,
    #[arg(long)]
    read: Option<String>,
}

impl ReportCommand {
    fn filters(&self) -> ReportFilters {
        ReportFilters {
            search: self.search.clone(),
            department: self.department.clone(),
            status: self.status.clone(),
            category: self.category.clone(),
            priority: self.priority.clone(),
            read: self.read.clone(),
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_tracing(ObsConfig::default())?;
    let cli = Cli::parse();
    let app_config = Arc::new(AppConfig::load()?);
    let result = match cli.command {
        Command::Serve(cmd) => run_server(cmd, app_config).await,
        Command::Report(cmd) => write_report(cmd, &app_config).await,
        Command::Summary => print_summary(&app_config).await,
        Command::SchemaPrint { output } => schema_print(output, &app_config),
    };
    shutdown_tracing();
    result
}

fn build_module(config: &AppConfig) -> HrModule {
    let processor = Processor::new(config.processing_delay_scale);
    if config.seed_fixtures {
        HrModule::seeded(config.fixture_seed, processor)
    } else {
        HrModule::empty(processor)
    }
}

async fn run_server(cmd: ServeCommand, config: Arc<AppConfig>) -> Result<()> {
    let hr = build_module(&config);
    let state = AppState {
        schema: graphql::build_schema(hr.clone()),
        hr,
        config,
    };
    http::serve(cmd.into(), state).await
}

async fn write_report(cmd: ReportCommand, config: &AppConfig) -> Result<()> {
    let kind = ReportKind::parse(&cmd.kind)?;
    let hr = build_module(config);
    let report = hr
        .report(kind, &cmd.filters(), Utc::now().date_naive())
        .await?;
    let dir = cmd.output.unwrap_or_else(|| config.reports_dir.clone());
    fs::create_dir_all(&dir).with_context(|| format!("failed to create {}", dir.display()))?;
    let path = dir.join(&report.filename);
    fs::write(&path, &report.body).with_context(|| format!("failed to write {}", path.display()))?;
    info!(path = %path.display(), "report written");
    println!("{}", path.display());
    Ok(())
}

async fn print_summary(config: &AppConfig) -> Result<()> {
    let hr = build_module(config);
    let summary = json!({
        "overview": hr.overview().await,
        "payroll": hr.payroll_summary().await,
        "recruitment": hr.recruitment_summary().await,
        "training": hr.training_summary().await,
        "notifications": hr.notification_summary().await,
    });
    println!("{}", serde_json::to_string_pretty(&summary)?);
    Ok(())
}

fn schema_print(path: Option<PathBuf>, config: &AppConfig) -> Result<()> {
    let sdl = graphql::build_schema(build_module(config)).sdl();
    match path {
        Some(target) => {
            fs::write(&target, sdl)
                .with_context(|| format!("failed to write {}", target.display()))?;
            info!(path = %target.display(), "schema snapshot written");
        }
        None => println!("{sdl}"),
    }
    Ok(())
}
