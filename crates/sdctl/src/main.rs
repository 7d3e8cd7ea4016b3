use camino::Utf8PathBuf;
use clap::{Parser, Subcommand};
use sd_types::{
    config::{Config, LogConfig, LogFormat},
    source::SourceKind,
};
use tracing_subscriber::{
    fmt::format::Format, prelude::__tracing_subscriber_SubscriberExt, util::SubscriberInitExt,
    EnvFilter,
};

pub mod command;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");

fn init_tracing(log: &LogConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let sub = tracing_subscriber::registry().with(filter);

    // stdout is reserved for command output
    match log.format {
        LogFormat::Plaintext => {
            sub.with(
                tracing_subscriber::fmt::layer()
                    .event_format(Format::default().without_time())
                    .with_ansi(log.colors)
                    .with_writer(std::io::stderr),
            )
            .init();
        }
        LogFormat::Json => {
            sub.with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(std::io::stderr),
            )
            .init();
        }
    }
}

fn main() -> eyre::Result<()> {
    let cli: Cli = Cli::parse();

    let config = Config::load(cli.config_path.as_str())?;
    init_tracing(&config.log);

    match cli.command {
        Command::Check => command::check::run(&config)?,
        Command::Show { kind, id } => command::show::run(&config, kind, id.as_deref())?,
        Command::Scrape {
            kind,
            id,
            reveal_secrets,
        } => command::scrape::run(&config, kind, &id, reveal_secrets)?,
        Command::Set { kind, id, options } => command::set::run(&config, kind, &id, &options)?,
    }

    Ok(())
}

#[derive(Parser)]
#[command(version = VERSION)]
struct Cli {
    /// Set the config file path
    #[arg(long = "config", short, global = true, default_value = "sdctl.toml")]
    config_path: Utf8PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Validate every configured discovery source
    Check,

    /// Print discovery sources with secrets redacted
    Show {
        kind: Option<SourceKind>,
        id: Option<String>,
    },

    /// Print the scrape configuration for a discovery source
    Scrape {
        kind: SourceKind,
        id: String,
        /// Print tokens and passwords as-is, for handing to the scraper
        #[arg(long)]
        reveal_secrets: bool,
    },

    /// Apply a JSON object of overrides to a source and print the result.
    /// Nothing is written back to the config file.
    Set {
        kind: SourceKind,
        id: String,
        options: String,
    },
}
