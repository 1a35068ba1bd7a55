use std::path::{Path, PathBuf};
use std::process::Command;

use anyhow::{anyhow, Context, Result};
use aptscope_core::read_spec_file;

/// Dependency spec files consulted when no --deps-def is given.
const DEFAULT_SPEC_FILES: [&str; 2] = ["system deps.txt", "build deps.txt"];

/// Gather the dependency list: spec files first (the defaults when none
/// were named), then individually requested packages, in argument order.
pub(crate) fn collect_dependencies(
    spec_files: &[PathBuf],
    extra: &[String],
) -> Result<Vec<String>> {
    let mut dependencies = Vec::new();

    if spec_files.is_empty() {
        for name in DEFAULT_SPEC_FILES {
            dependencies.extend(read_spec_file(Path::new(name))?);
        }
    } else {
        for path in spec_files {
            dependencies.extend(read_spec_file(path)?);
        }
    }

    dependencies.extend(extra.iter().cloned());
    Ok(dependencies)
}

/// Run the user command synchronously and report its exit code. A command
/// killed by a signal has no code and is treated as failure.
pub(crate) fn run_user_command(argv: &[String]) -> Result<i32> {
    let (program, args) = argv
        .split_first()
        .ok_or_else(|| anyhow!("no command given"))?;

    let status = Command::new(program)
        .args(args)
        .status()
        .with_context(|| format!("failed to run command: {program}"))?;
    Ok(status.code().unwrap_or(1))
}
