// Companion process supervisor.
//
// Some deployments run a second server next to this one (the booking
// calendar frontend, for instance). When configured, it is started before
// the listener binds, its output is forwarded into our logs line by line,
// and it is killed when the server shuts down.

use std::process::Stdio;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tracing::{info, warn};

pub struct Companion {
    command: String,
    child: Child,
}

impl Companion {
    /// Spawn `command_line`, split on whitespace into program and args.
    pub fn spawn(command_line: &str) -> Result<Self> {
        let mut parts = command_line.split_whitespace();
        let Some(program) = parts.next() else {
            anyhow::bail!("Companion command is empty");
        };

        let mut child = Command::new(program)
            .args(parts)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .with_context(|| format!("Failed to start companion process: {command_line}"))?;

        if let Some(stdout) = child.stdout.take() {
            tokio::spawn(forward_lines(stdout, program.to_string(), false));
        }
        if let Some(stderr) = child.stderr.take() {
            tokio::spawn(forward_lines(stderr, program.to_string(), true));
        }

        info!(command = command_line, pid = child.id(), "Started companion process");

        Ok(Self {
            command: command_line.to_string(),
            child,
        })
    }

    /// OS process id, if the process is still running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }

    /// Kill the process (if still running) and wait for it to exit.
    pub async fn shutdown(mut self) -> Result<()> {
        if self.child.try_wait()?.is_none() {
            self.child
                .kill()
                .await
                .with_context(|| format!("Failed to stop companion process: {}", self.command))?;
        }
        info!(command = %self.command, "Companion process stopped");
        Ok(())
    }
}

async fn forward_lines<R>(reader: R, name: String, is_stderr: bool)
where
    R: AsyncRead + Unpin,
{
    let mut lines = BufReader::new(reader).lines();
    loop {
        match lines.next_line().await {
            Ok(Some(line)) if is_stderr => warn!(companion = %name, "{line}"),
            Ok(Some(line)) => info!(companion = %name, "{line}"),
            Ok(None) => break,
            Err(e) => {
                warn!(companion = %name, error = %e, "Companion output unreadable");
                break;
            }
        }
    }
}
