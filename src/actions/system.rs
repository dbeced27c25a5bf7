//! Executor backed by real OS processes

use std::process::Stdio;

use async_trait::async_trait;
use tokio::process::Command;
use tracing::{debug, warn};

use super::{CommandLine, Executor};
use crate::error::{Error, Result};

#[cfg(windows)]
const DETACHED_PROCESS: u32 = 0x0000_0008;

/// Runs commands with `tokio::process`, never through a shell
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemExecutor;

impl SystemExecutor {
    pub fn new() -> Self {
        SystemExecutor
    }

    fn build(command: &CommandLine) -> std::process::Command {
        let mut cmd = std::process::Command::new(&command.program);
        cmd.args(&command.args);

        if let Some(ref dir) = command.working_dir {
            cmd.current_dir(dir);
        }

        cmd
    }
}

#[async_trait]
impl Executor for SystemExecutor {
    async fn run(&self, command: &CommandLine) -> Result<()> {
        debug!(command = %command, "Running command");

        let output = Command::from(Self::build(command))
            .stdin(Stdio::null())
            .output()
            .await
            .map_err(|e| Error::Spawn(format!("{}: {}", command.program, e)))?;

        if output.status.success() {
            return Ok(());
        }

        let stderr = String::from_utf8_lossy(&output.stderr);
        warn!(
            command = %command,
            exit_code = output.status.code().unwrap_or(-1),
            stderr = %stderr.trim(),
            "Command exited unsuccessfully"
        );

        Err(Error::Command(format!("{} exited with {}", command.program, output.status)))
    }

    async fn spawn(&self, command: &CommandLine) -> Result<()> {
        let mut cmd = Self::build(command);
        cmd.stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());

        // Keep the child out of our process group so Ctrl-C on the gateway
        // doesn't take launched programs down with it.
        #[cfg(unix)]
        {
            use std::os::unix::process::CommandExt;
            cmd.process_group(0);
        }

        #[cfg(windows)]
        {
            use std::os::windows::process::CommandExt;
            cmd.creation_flags(DETACHED_PROCESS);
        }

        let mut child = Command::from(cmd)
            .spawn()
            .map_err(|e| Error::Spawn(format!("{}: {}", command.program, e)))?;

        let pid = child.id();
        debug!(command = %command, pid = ?pid, "Process started");

        // Reap the child when it exits
        let program = command.program.clone();
        tokio::spawn(async move {
            match child.wait().await {
                Ok(status) => debug!(program = %program, pid = ?pid, %status, "Launched process exited"),
                Err(e) => warn!(program = %program, pid = ?pid, error = %e, "Failed to wait for launched process"),
            }
        });

        Ok(())
    }
}
