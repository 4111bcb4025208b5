//! `InterpreterPort` implementation backed by the R executable.

mod command;
mod discovery;

use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use rhelp_core::config::DEFAULT_COMMAND_TIMEOUT;
use rhelp_core::{HelpOptions, InterpreterError, InterpreterPort};

pub use command::run_captured;
pub use discovery::discover_env;

/// Flags that keep R quiet and free of user/site profiles.
const QUIET_FLAGS: [&str; 3] = ["--vanilla", "--silent", "--no-echo"];

/// Calls R through short-lived subprocesses.
#[derive(Debug, Clone)]
pub struct RInterpreter {
    r_path: String,
    command_timeout: Duration,
}

impl RInterpreter {
    pub fn new(r_path: impl Into<String>) -> Self {
        Self {
            r_path: r_path.into(),
            command_timeout: DEFAULT_COMMAND_TIMEOUT,
        }
    }

    pub fn from_options(options: &HelpOptions) -> Self {
        Self::new(options.r_path.trim()).with_command_timeout(options.command_timeout)
    }

    #[must_use]
    pub const fn with_command_timeout(mut self, timeout: Duration) -> Self {
        self.command_timeout = timeout;
        self
    }

    pub fn r_path(&self) -> &str {
        &self.r_path
    }

    /// Evaluate R expressions with `R <quiet flags> -e <expr>...`.
    async fn eval(&self, cwd: Option<&Path>, exprs: &[String]) -> Result<String, InterpreterError> {
        let mut args: Vec<String> = QUIET_FLAGS.iter().map(|f| (*f).to_string()).collect();
        for expr in exprs {
            args.push("-e".to_string());
            args.push(expr.clone());
        }
        run_captured(&self.r_path, &args, cwd, self.command_timeout).await
    }
}

#[async_trait]
impl InterpreterPort for RInterpreter {
    async fn home_path(&self) -> Result<PathBuf, InterpreterError> {
        let out = self.eval(None, &["cat(R.home())".to_string()]).await?;
        Ok(PathBuf::from(out.trim()))
    }

    async fn lib_paths(&self) -> Result<Vec<PathBuf>, InterpreterError> {
        let out = self
            .eval(None, &["cat(paste(.libPaths(), collapse='\\n'))".to_string()])
            .await?;
        Ok(parse_lines(&out).map(PathBuf::from).collect())
    }

    async fn topic_markup(
        &self,
        help_dir: &Path,
        package: &str,
        topic: &str,
    ) -> Result<String, InterpreterError> {
        let exprs = [
            format!("invisible(lazyLoad('{}'))", escape_single_quoted(package)),
            format!(
                "cat(paste0(tools:::as.character.Rd(`{}`),collapse=''))",
                escape_backticked(topic)
            ),
        ];
        self.eval(Some(help_dir), &exprs).await
    }

    async fn rd_to_html(
        &self,
        help_dir: &Path,
        rd_file: &Path,
    ) -> Result<String, InterpreterError> {
        let args = vec![
            "CMD".to_string(),
            "Rdconv".to_string(),
            "--type=html".to_string(),
            rd_file.to_string_lossy().into_owned(),
        ];
        run_captured(&self.r_path, &args, Some(help_dir), self.command_timeout).await
    }
}

/// Non-empty lines with any trailing `\r` removed.
fn parse_lines(output: &str) -> impl Iterator<Item = &str> {
    output
        .split('\n')
        .map(|line| line.trim_end_matches('\r').trim())
        .filter(|line| !line.is_empty())
}

fn escape_single_quoted(value: &str) -> String {
    value.replace('\\', "\\\\").replace('\'', "\\'")
}

fn escape_backticked(value: &str) -> String {
    value.replace('\\', "\\\\").replace('`', "\\`")
}
