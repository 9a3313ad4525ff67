use std::path::PathBuf;

use chrono::Local;
use clap::{Parser, Subcommand};
use timesheet_tools::Result;
use timesheet_tools::config::{DEFAULT_HOURS_PER_ENTRY, Settings};
use timesheet_tools::io::jira;
use timesheet_tools::model::ReportingWindow;
use timesheet_tools::report;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    if let Err(error) = run(cli) {
        eprintln!("error: {error}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    match cli.command {
        Command::Pull(args) => execute_pull(args),
        Command::Convert(args) => execute_convert(args),
        Command::Whoami(args) => execute_whoami(args),
    }
}

fn execute_pull(args: PullArgs) -> Result<()> {
    let settings = Settings::load(&args.config)?;
    let output = args
        .output
        .unwrap_or_else(|| settings.report.output_file.clone());
    let window = ReportingWindow::previous_month(Local::now().date_naive());
    let rows = report::pull_to_excel(&settings, &window, &output)?;
    report_outcome(rows, &output);
    Ok(())
}

fn execute_convert(args: ConvertArgs) -> Result<()> {
    let rows = report::rss_to_excel(&args.input, &args.output, &args.domain, args.hours)?;
    report_outcome(rows, &args.output);
    Ok(())
}

fn execute_whoami(args: WhoamiArgs) -> Result<()> {
    let settings = Settings::load(&args.config)?;
    let account_id = jira::fetch_account_id(&settings.tracker)?;
    println!("{account_id}");
    Ok(())
}

fn report_outcome(rows: usize, output: &std::path::Path) {
    if rows > 0 {
        println!("Saved timesheet to {}", output.display());
    } else {
        println!("No work entries found; nothing was written.");
    }
}

#[derive(Parser)]
#[command(
    author,
    version,
    about = "Pull tracker activity into an Excel timesheet."
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch last month's assigned issues from the tracker and write the timesheet.
    Pull(PullArgs),
    /// Convert an exported RSS/XML feed into a timesheet.
    Convert(ConvertArgs),
    /// Print the tracker account id for the configured credentials.
    Whoami(WhoamiArgs),
}

#[derive(clap::Args)]
struct PullArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "timesheet.toml")]
    config: PathBuf,

    /// Output file path, overriding the configured one.
    #[arg(long)]
    output: Option<PathBuf>,
}

#[derive(clap::Args)]
struct ConvertArgs {
    /// Input feed file path.
    #[arg(long)]
    input: PathBuf,

    /// Output file path.
    #[arg(long)]
    output: PathBuf,

    /// Tracker subdomain used to derive issue hyperlinks.
    #[arg(long)]
    domain: String,

    /// Hours booked per derived entry.
    #[arg(long, default_value_t = DEFAULT_HOURS_PER_ENTRY)]
    hours: f64,
}

#[derive(clap::Args)]
struct WhoamiArgs {
    /// Path to the TOML configuration file.
    #[arg(long, default_value = "timesheet.toml")]
    config: PathBuf,
}
