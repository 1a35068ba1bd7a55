use std::process::Command;

use anyhow::{anyhow, Context, Result};

/// Seam over the external package manager. `install` returns the combined
/// stdout/stderr text so callers can inspect what actually changed.
pub trait PackageEngine {
    fn install(&mut self, packages: &[String]) -> Result<String>;
    fn remove(&mut self, packages: &[String]) -> Result<()>;
}

/// Shells out to `sudo aptitude`. Commands run synchronously with no
/// timeout of their own; only lock acquisition is bounded.
#[derive(Debug, Default)]
pub struct Aptitude;

impl Aptitude {
    fn run(&self, action: &str, packages: &[String]) -> Result<String> {
        let mut command = Command::new("sudo");
        command.arg("aptitude").arg(action).arg("-y").args(packages);

        let output = command
            .output()
            .with_context(|| format!("aptitude {action}: command failed to start"))?;

        let mut text = String::from_utf8_lossy(&output.stdout).into_owned();
        text.push_str(&String::from_utf8_lossy(&output.stderr));

        if !output.status.success() {
            return Err(anyhow!(
                "aptitude {action}: status={} output='{}'",
                output.status,
                text.trim()
            ));
        }
        Ok(text)
    }
}

impl PackageEngine for Aptitude {
    fn install(&mut self, packages: &[String]) -> Result<String> {
        self.run("install", packages)
    }

    fn remove(&mut self, packages: &[String]) -> Result<()> {
        self.run("remove", packages).map(|_| ())
    }
}
