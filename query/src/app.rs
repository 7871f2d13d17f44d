//! Core application

use std::fs;
use std::io::{self, Read};

use anyhow::{Context, Result};

use crate::core::cli::{self, Commands, InputArgs};
use crate::core::config::AppConfig;
use crate::core::constants::{ENV_LOG, LOG_TARGET};
use crate::data::filters::{
    ResolvedCondition, compile, compile_parameterized, parse_conditions, resolve,
};
use crate::utils::file::expand_path;

pub struct QueryApp {
    pub config: AppConfig,
}

impl QueryApp {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    /// Run the application with CLI argument parsing
    pub fn run() -> Result<()> {
        dotenvy::dotenv().ok();
        Self::init_logging();

        tracing::debug!("Application starting");

        let (cli_config, command) = cli::parse();
        tracing::trace!(command = ?command, "Parsed command");

        let app = Self::new(AppConfig::load(&cli_config)?);

        match command {
            Commands::Compile { input, .. } => {
                let json = read_input(&input)?;
                for line in app.compile_json(&json)? {
                    println!("{}", line);
                }
            }
            Commands::Resolve { input } => {
                let json = read_input(&input)?;
                for line in app.resolve_json(&json)? {
                    println!("{}", line);
                }
            }
            Commands::Attributes => {
                for name in app.config.registry.iter() {
                    println!("{}", name);
                }
            }
        }

        Ok(())
    }

    /// Logs go to stderr; stdout carries only compiled output.
    fn init_logging() {
        let default_filter = format!("warn,{}=info", LOG_TARGET);

        let filter = std::env::var(ENV_LOG)
            .or_else(|_| std::env::var("RUST_LOG"))
            .unwrap_or(default_filter);

        tracing_subscriber::fmt()
            .with_writer(io::stderr)
            .with_target(false)
            .with_thread_ids(false)
            .with_level(true)
            .compact()
            .with_env_filter(filter)
            .init();
    }

    /// Compile every condition in `json`, one output line per condition.
    ///
    /// Inline mode yields the SQL fragment; parameterized mode yields a JSON
    /// object with `sql` and `params`.
    pub fn compile_json(&self, json: &str) -> Result<Vec<String>> {
        let conditions = parse_conditions(json).context("Failed to parse filter conditions")?;

        conditions
            .iter()
            .enumerate()
            .map(|(index, condition)| {
                self.compile_resolved(&resolve(condition))
                    .with_context(|| format!("Failed to compile condition #{}", index + 1))
            })
            .collect()
    }

    fn compile_resolved(&self, resolved: &ResolvedCondition) -> Result<String> {
        if self.config.parameterized {
            let predicate = compile_parameterized(resolved, &self.config.registry)?;
            serde_json::to_string(&predicate).context("Failed to serialize predicate")
        } else {
            Ok(compile(resolved, &self.config.registry)?)
        }
    }

    /// Resolve every condition in `json` into its JSON representation.
    pub fn resolve_json(&self, json: &str) -> Result<Vec<String>> {
        let conditions = parse_conditions(json).context("Failed to parse filter conditions")?;

        conditions
            .iter()
            .map(|condition| {
                serde_json::to_string(&resolve(condition))
                    .context("Failed to serialize resolved condition")
            })
            .collect()
    }
}

/// Read condition JSON from the inline argument, a file, or stdin.
fn read_input(input: &InputArgs) -> Result<String> {
    if let Some(condition) = &input.condition {
        return Ok(condition.clone());
    }

    if let Some(path) = &input.file {
        let path = expand_path(&path.to_string_lossy());
        tracing::debug!(path = %path.display(), "Reading conditions file");
        return fs::read_to_string(&path)
            .with_context(|| format!("Failed to read conditions file: {}", path.display()));
    }

    let mut buffer = String::new();
    io::stdin()
        .read_to_string(&mut buffer)
        .context("Failed to read conditions from stdin")?;
    Ok(buffer)
}
