use std::path::PathBuf;
use std::process;

use anyhow::Result;
use aptscope_context::{with_dependencies, Aptitude, ContextOptions};
use clap::Parser;
use log::{error, LevelFilter};

mod run;


use run::{collect_dependencies, run_user_command};

#[derive(Parser, Debug)]
#[command(name = "aptscope")]
#[command(
    about = "Run a command inside an ephemeral set of system packages",
    long_about = None
)]
struct Cli {
    /// A file specifying dependencies, one per line (multiple allowed)
    #[arg(long = "deps-def", value_name = "FILE")]
    deps_def: Vec<PathBuf>,
    /// A specific dependency (multiple allowed)
    #[arg(long = "dep", value_name = "NAME")]
    deps: Vec<String>,
    /// Keep any installed packages
    #[arg(long)]
    do_not_remove: bool,
    /// When removing packages, also remove those automatically installed
    /// as dependencies
    #[arg(long)]
    aggressively_remove: bool,
    /// Set log level (error, warn, info, debug, trace)
    #[arg(
        short = 'l',
        long = "log-level",
        value_name = "LEVEL",
        default_value = "info",
        value_parser = parse_log_level
    )]
    log_level: LevelFilter,
    /// Command to invoke in the context of the dependencies
    #[arg(
        value_name = "COMMAND",
        required = true,
        trailing_var_arg = true,
        allow_hyphen_values = true
    )]
    command: Vec<String>,
}

fn parse_log_level(value: &str) -> Result<LevelFilter, String> {
    value
        .parse::<LevelFilter>()
        .map_err(|_| format!("invalid log level: {value}"))
}

fn main() {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.log_level)
        .init();

    match run_cli(cli) {
        Ok(code) => process::exit(code),
        Err(err) => {
            error!("{err:#}");
            process::exit(1);
        }
    }
}

fn run_cli(cli: Cli) -> Result<i32> {
    let dependencies = collect_dependencies(&cli.deps_def, &cli.deps)?;
    let options = ContextOptions {
        aggressively_remove: cli.aggressively_remove,
        ..ContextOptions::default()
    };

    let mut engine = Aptitude;
    with_dependencies(&mut engine, &options, &dependencies, |to_remove| {
        if cli.do_not_remove {
            to_remove.clear();
        }
        run_user_command(&cli.command)
    })
}
