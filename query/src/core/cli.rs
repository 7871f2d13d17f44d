use clap::{Args, Parser, Subcommand};

use std::path::PathBuf;

use super::constants::{APP_NAME, ENV_CONFIG, ENV_PARAMS};

#[derive(Parser)]
#[command(name = APP_NAME)]
#[command(
    version,
    about = "Compile loghouse filter conditions into ClickHouse predicates",
    long_about = None
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Path to config file
    #[arg(long, short = 'c', global = true, env = ENV_CONFIG)]
    pub config: Option<PathBuf>,
}

/// Where condition JSON is read from
#[derive(Args, Clone, Debug, Default)]
pub struct InputArgs {
    /// Condition JSON, a single object or an array (reads stdin when omitted)
    pub condition: Option<String>,

    /// Read condition JSON from a file
    #[arg(long, short = 'f', conflicts_with = "condition")]
    pub file: Option<PathBuf>,
}

#[derive(Subcommand, Clone, Debug)]
pub enum Commands {
    /// Compile conditions into predicate fragments, one per line
    Compile {
        #[command(flatten)]
        input: InputArgs,

        /// Emit `?` placeholders and print bind values as JSON
        #[arg(long, env = ENV_PARAMS)]
        params: bool,
    },
    /// Print the resolved key, operator and value of each condition
    Resolve {
        #[command(flatten)]
        input: InputArgs,
    },
    /// List the kubernetes attributes in effect
    Attributes,
}

/// Configuration derived from CLI arguments
#[derive(Debug, Clone, Default)]
pub struct CliConfig {
    pub config: Option<PathBuf>,
    /// Set only when requested on the command line, so the config file can
    /// supply the default
    pub parameterized: Option<bool>,
}

impl From<&Cli> for CliConfig {
    fn from(cli: &Cli) -> Self {
        let parameterized = match cli.command {
            Commands::Compile { params: true, .. } => Some(true),
            _ => None,
        };
        Self {
            config: cli.config.clone(),
            parameterized,
        }
    }
}

/// Parse CLI arguments and return config with command
pub fn parse() -> (CliConfig, Commands) {
    let cli = Cli::parse();
    (CliConfig::from(&cli), cli.command)
}
