//! Bounded subprocess execution with captured output.

use std::path::Path;
use std::process::Stdio;
use std::time::Duration;

use rhelp_core::InterpreterError;
use tokio::process::Command;
use tokio::time::timeout;
use tracing::debug;

/// Run `program` with `args` and return its stdout.
///
/// The child is killed when `limit` elapses (the output future owns it and
/// `kill_on_drop` is set). A non-zero exit is reported with the captured
/// stderr.
pub async fn run_captured(
    program: &str,
    args: &[String],
    cwd: Option<&Path>,
    limit: Duration,
) -> Result<String, InterpreterError> {
    let command_line = display_command(program, args);
    debug!(command = %command_line, cwd = ?cwd, "Running interpreter command");

    let mut cmd = Command::new(program);
    cmd.args(args)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(true);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }

    let child = cmd.spawn().map_err(|e| InterpreterError::Spawn {
        command: command_line.clone(),
        reason: e.to_string(),
    })?;

    let output = match timeout(limit, child.wait_with_output()).await {
        Ok(result) => result.map_err(|e| InterpreterError::Io(e.to_string()))?,
        Err(_) => {
            return Err(InterpreterError::Timeout {
                command: command_line,
                seconds: limit.as_secs(),
            });
        }
    };

    if !output.status.success() {
        return Err(InterpreterError::Failed {
            command: command_line,
            status: output.status.to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        });
    }

    Ok(String::from_utf8_lossy(&output.stdout).into_owned())
}

/// Short human-readable form of a command line for logs and errors.
fn display_command(program: &str, args: &[String]) -> String {
    let mut display = program.to_string();
    for arg in args {
        display.push(' ');
        if arg.contains(' ') {
            display.push('"');
            display.push_str(arg);
            display.push('"');
        } else {
            display.push_str(arg);
        }
    }
    display
}
