use std::path::PathBuf;

use clap::{Parser, Subcommand};
use jiff::Timestamp;
use jiff::tz::TimeZone;
use solace_cli::commands;
use tracing_subscriber::EnvFilter;

/// Run and score standardized mental-health screening instruments.
#[derive(Parser, Debug)]
#[command(name = "solace", version, about)]
struct Cli {
    /// Directory of custom assessment definitions (*.json).
    #[arg(long, env = "SOLACE_DEFINITIONS_DIR", global = true)]
    definitions: Option<PathBuf>,

    /// Emit logs as JSON.
    #[arg(long, global = true)]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List available assessment types.
    Instruments,
    /// Print an assessment type as a definition file.
    Show { name: String },
    /// Check a definition file.
    Validate { file: PathBuf },
    /// Score a complete set of answers.
    Take {
        name: String,
        /// Comma-separated answers in question order, e.g. `0,1,3,2`.
        #[arg(long)]
        answers: String,
        #[arg(long, default_value = "anonymous")]
        respondent: String,
    },
    /// Summarize a JSON history of completed assessments.
    Summarize {
        history: PathBuf,
        /// IANA time zone deciding "this month"; defaults to the system zone.
        #[arg(long)]
        tz: Option<String>,
    },
}

fn main() -> eyre::Result<()> {
    color_eyre::install()?;
    let cli = Cli::parse();

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr);
    if cli.log_json {
        subscriber.json().init();
    } else {
        subscriber.init();
    }

    match cli.command {
        Command::Instruments => {
            let catalog = commands::catalog(cli.definitions.as_deref())?;
            println!("{}", commands::list(&catalog));
        }
        Command::Show { name } => {
            let catalog = commands::catalog(cli.definitions.as_deref())?;
            println!("{}", commands::show(&catalog, &name)?);
        }
        Command::Validate { file } => {
            println!("{}", commands::validate(&file)?);
        }
        Command::Take {
            name,
            answers,
            respondent,
        } => {
            let catalog = commands::catalog(cli.definitions.as_deref())?;
            let completed =
                commands::take(&catalog, &name, &answers, &respondent, Timestamp::now())?;
            println!("{}", serde_json::to_string_pretty(&completed)?);
        }
        Command::Summarize { history, tz } => {
            let tz = match tz {
                Some(name) => TimeZone::get(&name)?,
                None => TimeZone::system(),
            };
            let report = commands::summarize_file(&history, tz)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
        }
    }

    Ok(())
}
