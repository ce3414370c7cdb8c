//! The `browser-console` command line tool.
//!
//! Writes `<script>console.<level>(...)</script>` tags to standard output, e.g. for splicing
//! diagnostics into HTML generated by shell scripts.

#![forbid(unsafe_code)]

use std::io::{self, Write};

use browser_console::{BrowserConsole, Config, Context, ENABLED_ENV_VAR, Logger, Value, parse_flag};
use camino::Utf8PathBuf;
use clap::Parser;
use eyre::WrapErr;
use tracing_subscriber::EnvFilter;
use tracing_subscriber::filter::LevelFilter;

/// Emit server-side messages as browser console script tags.
#[derive(Debug, Parser)]
#[command(name = "browser-console", version)]
struct Cli {
    /// Whether to write anything, overriding the configuration file.
    #[arg(long, env = ENABLED_ENV_VAR, value_parser = parse_flag)]
    enabled: Option<bool>,

    /// TOML configuration file.
    #[arg(long, env = "BROWSER_CONSOLE_CONFIG")]
    config: Option<Utf8PathBuf>,

    /// Subcommand to execute.
    #[command(subcommand)]
    command: Command,
}

/// List of supported subcommands.
#[derive(Debug, clap::Subcommand)]
enum Command {
    /// Dump a value with `console.log`.
    Show {
        /// Prefix text messages with the current local time.
        #[arg(long)]
        date: bool,

        /// Parse the message as JSON so objects and arrays keep their shape.
        #[arg(long)]
        json: bool,

        #[command(flatten)]
        context: ContextArgs,

        /// The message or, with `--json`, the JSON document.
        message: String,
    },

    /// Log a message at a severity level.
    Log {
        /// Console level; unknown levels are logged as `info`.
        #[arg(short, long, default_value = "info")]
        level: String,

        #[command(flatten)]
        context: ContextArgs,

        /// The message, with optional `{key}` placeholders.
        message: String,
    },
}

#[derive(Debug, clap::Args)]
struct ContextArgs {
    /// Placeholder value as `key=value`, may be repeated.
    #[arg(short, long = "context", value_name = "KEY=VALUE", value_parser = parse_context_entry)]
    context: Vec<(String, String)>,
}

impl ContextArgs {
    fn to_context(&self) -> Context {
        self.context.iter().cloned().collect()
    }
}

fn parse_context_entry(entry: &str) -> Result<(String, String), String> {
    let Some((key, value)) = entry.split_once('=') else {
        return Err(format!("expected `key=value`, found {entry:?}"));
    };
    Ok((key.to_owned(), value.to_owned()))
}

impl Cli {
    fn config(&self) -> eyre::Result<Config> {
        let mut config = match &self.config {
            Some(path) => {
                let source = fs_err::read_to_string(path)?;
                Config::from_toml(&source).wrap_err_with(|| format!("failed to load {path}"))?
            }
            None => Config::default(),
        };

        if let Some(enabled) = self.enabled {
            config.enabled = enabled;
        }

        Ok(config)
    }

    fn run(self, output: impl Write) -> eyre::Result<()> {
        let config = self.config()?;
        tracing::debug!(?config, "loaded configuration");

        let mut console = BrowserConsole::with_output(config.enabled, output);

        match self.command {
            Command::Show {
                date,
                json,
                context,
                message,
            } => {
                let value = if json {
                    serde_json::from_str::<serde_json::Value>(&message)
                        .wrap_err("message is not valid JSON")?
                        .into()
                } else {
                    Value::from(message)
                };
                console.show(value, &context.to_context(), date)?;
            }
            Command::Log {
                level,
                context,
                message,
            } => {
                console.log(&level, &message, &context.to_context())?;
            }
        }

        Ok(())
    }
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();

    tracing::subscriber::set_global_default(
        tracing_subscriber::fmt()
            .with_env_filter(
                EnvFilter::builder()
                    .with_default_directive(LevelFilter::WARN.into())
                    .with_env_var("BROWSER_CONSOLE_LOG")
                    .from_env()?,
            )
            .with_writer(io::stderr)
            .compact()
            .finish(),
    )?;

    cli.run(io::stdout().lock())
}
