//! CLI entry point for the profile catalog generator.
//!
//! Parses the mode flags and optional path overrides, resolves default paths
//! from the project root, and hands off to the pipeline. Individual fragment
//! failures are rendered as diagnostics during the run; only the
//! zero-valid-fragments condition reaches the error path and exits 1.

use anyhow::{Result, anyhow};
use profilegen::{PipelineConfig, Report, RunMode, resolve_project_root, run_pipeline};
use std::env;
use std::ffi::OsString;
use std::path::PathBuf;

const BANNER_RULE_WIDTH: usize = 50;

fn main() {
    if let Err(err) = run() {
        eprintln!("[ERROR] {err:#}");
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = CliArgs::parse()?;

    let root = resolve_project_root();
    let mut config = PipelineConfig::from_root(&root);
    if let Some(source) = cli.source {
        config.source_dir = source;
    }
    if let Some(output) = cli.output {
        config.output_path = output;
    }

    println!("{}", "=".repeat(BANNER_RULE_WIDTH));
    println!("Profile Catalog Generator");
    println!("{}\n", "=".repeat(BANNER_RULE_WIDTH));

    let mut report = Report::console();
    run_pipeline(&config, cli.mode, &mut report)?;

    println!("\n{}", "=".repeat(BANNER_RULE_WIDTH));
    Ok(())
}

struct CliArgs {
    mode: RunMode,
    source: Option<PathBuf>,
    output: Option<PathBuf>,
}

impl CliArgs {
    fn parse() -> Result<Self> {
        let mut args = env::args_os().skip(1);
        let mut validate = false;
        let mut dry_run = false;
        let mut source = None;
        let mut output = None;

        while let Some(arg_os) = args.next() {
            let arg = arg_os
                .into_string()
                .map_err(|_| anyhow!("argument is not valid UTF-8"))?;
            match arg.as_str() {
                "--validate" => validate = true,
                "--dry-run" => dry_run = true,
                "--source" => source = Some(PathBuf::from(next_value(&mut args, "--source")?)),
                "--output" => output = Some(PathBuf::from(next_value(&mut args, "--output")?)),
                "--help" | "-h" => {
                    print_usage();
                    std::process::exit(0);
                }
                other => {
                    eprintln!("Unknown flag: {other}");
                    print_usage();
                    std::process::exit(1);
                }
            }
        }

        // Validate-only takes precedence when both mode flags are given.
        let mode = if validate {
            RunMode::ValidateOnly
        } else if dry_run {
            RunMode::DryRun
        } else {
            RunMode::Generate
        };

        Ok(Self {
            mode,
            source,
            output,
        })
    }
}

fn next_value(args: &mut impl Iterator<Item = OsString>, flag: &str) -> Result<String> {
    args.next()
        .map(|os| {
            os.into_string()
                .map_err(|_| anyhow!("value for {flag} is not valid UTF-8"))
        })
        .transpose()?
        .ok_or_else(|| anyhow!("missing value for {flag}"))
}

fn usage() -> &'static str {
    "Usage: profilegen [--validate | --dry-run] [--source DIR] [--output PATH]\n\
Merges profile template fragments into a single catalog file.\n\n\
Modes:\n  (default)    validate fragments, sort them, and write the catalog\n  --validate   validate fragments only, write nothing\n  --dry-run    compute the catalog in memory and print a preview, write nothing\n\n\
Paths default to template-source/ and templates/profile.json under the\n\
project root (current directory, or PROFILEGEN_ROOT when set).\n"
}

fn print_usage() {
    print!("{}", usage());
}
