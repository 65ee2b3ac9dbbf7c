use std::path::{Path, PathBuf};

mod parse;
mod render;
mod resolve;
mod terminal;

use catalog::Config;
use clap::ArgAction;
use parse::Parse;
use render::Render;
use resolve::Resolve;

#[derive(Debug, clap::Parser)]
#[command(version, about)]
pub struct Cli {
    /// Verbosity (-v, -vv, -vvv)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    /// The path to the configuration file
    #[arg(short, long, default_value = "catalog.toml", global = true)]
    config: PathBuf,

    #[command(subcommand)]
    command: Command,
}

impl Cli {
    pub fn run(self) -> anyhow::Result<()> {
        Self::setup_logging(self.verbose);

        let config = load_config(&self.config)?;
        self.command.run(&config)
    }

    fn setup_logging(verbosity: u8) {
        use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

        let level = match verbosity {
            0 => tracing::Level::WARN,
            1 => tracing::Level::INFO,
            2 => tracing::Level::DEBUG,
            _ => tracing::Level::TRACE,
        };

        let filter = tracing_subscriber::EnvFilter::from_default_env().add_directive(level.into());

        let fmt_layer = tracing_subscriber::fmt::layer()
            .with_writer(std::io::stderr)
            .with_target(false)
            .with_thread_names(false)
            .with_line_number(false);

        tracing_subscriber::registry()
            .with(filter)
            .with(fmt_layer)
            .init();
    }
}

/// Loads the configuration file, falling back to defaults when it is absent.
fn load_config(path: &Path) -> anyhow::Result<Config> {
    if !path.exists() {
        tracing::debug!("No config at {}, using defaults", path.display());
        return Ok(Config::default());
    }
    Config::load(path).map_err(anyhow::Error::msg)
}

#[derive(Debug, clap::Parser)]
pub enum Command {
    /// Parse scraped requisite tables into normalized requisites
    Parse(Parse),

    /// Render stored requisites as text or markdown
    Render(Render),

    /// Look up the code for a subject name
    Resolve(Resolve),
}

impl Command {
    fn run(self, config: &Config) -> anyhow::Result<()> {
        match self {
            Self::Parse(command) => command.run(config)?,
            Self::Render(command) => command.run(config)?,
            Self::Resolve(command) => command.run()?,
        }
        Ok(())
    }
}
