use anyhow::Result;
use std::process::ExitCode;
use tickicon_convert::{Backend, Job, Report, dispatch, guidance};
use tracing::error;
use validator::Validate;

use super::ConvertArgs;
use crate::{
    cli::{failure_style, print_banner, print_summary},
    config::{Config, ConvertConfig},
};

impl ConvertArgs {
    /// Merge into the configured settings.
    pub fn apply(self, mut config: ConvertConfig) -> Result<ConvertConfig> {
        if let Some(input) = self.input {
            config.input = input;
        }
        if let Some(output) = self.output {
            config.output = output;
        }
        if let Some(size) = self.size {
            config.size = size;
        }
        if !self.backends.is_empty() {
            config.backends = self.backends;
        }
        self.tools.apply(&mut config);
        config.validate()?;
        Ok(config)
    }
}

/// Try the configured backends in order.
pub fn convert(settings: &ConvertConfig) -> Report {
    let tools = settings.tools();
    let backends: Vec<Backend> = settings
        .backends
        .iter()
        .map(|kind| Backend::new(*kind, &tools))
        .collect();

    let job = Job {
        input: settings.input.clone(),
        output: settings.output.clone(),
        size: settings.size,
    };
    dispatch(&backends, &job)
}

pub fn run(args: ConvertArgs, config: &Config) -> ExitCode {
    let settings = match args.apply(config.convert.clone()) {
        Ok(settings) => settings,
        Err(e) => {
            error!("Invalid options: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    print_banner("SVG to PNG converter");

    let report = convert(&settings);
    if let Some(kind) = report.converted() {
        println!("Converted with {}", kind.label());
        print_summary(&settings.output, settings.size);
        return ExitCode::SUCCESS;
    }

    println!();
    println!("{}", failure_style().apply_to("✗ Every backend failed"));
    for (kind, error) in report.failures() {
        println!("  {}: {}", kind.label(), error);
    }
    println!();
    println!("{}", guidance());
    ExitCode::FAILURE
}
