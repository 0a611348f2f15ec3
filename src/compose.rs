//! Compose stack operations through the `docker compose` CLI.

use std::path::PathBuf;
use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, info};

use crate::error::{Error, Result};

/// Which stack to operate on.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StackTarget {
    /// Project name as recorded in the compose project label.
    pub project: String,
    /// Restrict the operation to these services; empty means all.
    pub services: Vec<String>,
    /// Compose files of an already parsed definition, passed as `-f`.
    pub files: Vec<PathBuf>,
}

impl StackTarget {
    pub fn new(project: impl Into<String>) -> Self {
        Self {
            project: project.into(),
            ..Default::default()
        }
    }

    pub fn with_services(mut self, services: Vec<String>) -> Self {
        self.services = services;
        self
    }
}

/// Multi-service stack operations.
#[async_trait]
pub trait StackClient: Send + Sync {
    async fn stop(&self, target: &StackTarget, timeout: Duration) -> Result<()>;
    async fn start(&self, target: &StackTarget) -> Result<()>;
    /// Tear down the stack, removing orphans, volumes and images.
    async fn down(&self, target: &StackTarget) -> Result<()>;
}

/// Runs `docker compose` as a child process.
pub struct ComposeClient {
    program: String,
}

impl Default for ComposeClient {
    fn default() -> Self {
        Self { program: "docker".to_string() }
    }
}

impl ComposeClient {
    pub fn new(program: impl Into<String>) -> Self {
        Self { program: program.into() }
    }

    async fn run(&self, command: &'static str, target: &StackTarget, args: Vec<String>) -> Result<()> {
        let argv = compose_args(command, target, args);
        debug!(program = %self.program, args = ?argv, "running docker compose");

        let output = Command::new(&self.program)
            .args(&argv)
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(Error::ComposeSpawn)?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(Error::Compose {
                command,
                project: target.project.clone(),
                stderr,
            });
        }

        info!(project = %target.project, command, "docker compose finished");
        Ok(())
    }
}

#[async_trait]
impl StackClient for ComposeClient {
    async fn stop(&self, target: &StackTarget, timeout: Duration) -> Result<()> {
        let mut args = vec!["--timeout".to_string(), timeout.as_secs().to_string()];
        args.extend(target.services.iter().cloned());
        self.run("stop", target, args).await
    }

    async fn start(&self, target: &StackTarget) -> Result<()> {
        self.run("start", target, target.services.clone()).await
    }

    async fn down(&self, target: &StackTarget) -> Result<()> {
        let args = ["--remove-orphans", "--volumes", "--rmi", "all"]
            .iter()
            .map(|s| s.to_string())
            .collect();
        self.run("down", target, args).await
    }
}

/// Full argument vector: `compose [-f file]... -p <project> <command> <args>`.
fn compose_args(command: &str, target: &StackTarget, args: Vec<String>) -> Vec<String> {
    let mut argv = vec!["compose".to_string()];
    for file in &target.files {
        argv.push("-f".to_string());
        argv.push(file.display().to_string());
    }
    argv.push("-p".to_string());
    argv.push(target.project.clone());
    argv.push(command.to_string());
    argv.extend(args);
    argv
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn args_place_project_before_command() {
        let target = StackTarget::new("web").with_services(vec!["api".into(), "db".into()]);
        let argv = compose_args("start", &target, target.services.clone());
        assert_eq!(argv, vec!["compose", "-p", "web", "start", "api", "db"]);
    }

    #[test]
    fn files_become_f_flags() {
        let target = StackTarget {
            project: "web".into(),
            services: Vec::new(),
            files: vec![PathBuf::from("a.yml"), PathBuf::from("b.yml")],
        };
        let argv = compose_args("down", &target, vec!["--volumes".into()]);
        assert_eq!(
            argv,
            vec!["compose", "-f", "a.yml", "-f", "b.yml", "-p", "web", "down", "--volumes"]
        );
    }

    #[tokio::test]
    async fn missing_program_is_a_spawn_error() {
        let client = ComposeClient::new("/nonexistent/docker-binary");
        let err = client
            .start(&StackTarget::new("web"))
            .await
            .expect_err("spawn must fail");
        assert!(matches!(err, Error::ComposeSpawn(_)));
    }
}
