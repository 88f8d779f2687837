//! Subprocess runner shared by the command-backed collaborators.
//!
//! Model commands speak JSON Lines on stdout; tool commands print plain text.

use ck_protocol::config_models::CommandSettings;
use std::pin::Pin;
use std::process::Stdio;
use thiserror::Error;
use tokio::io::AsyncBufReadExt;
use tokio::io::AsyncReadExt;
use tokio::io::AsyncWriteExt;
use tokio::io::BufReader;
use tokio::process::Command;
use tokio_stream::Stream;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommandError {
    #[error("failed to spawn command '{program}': {reason}")]
    Spawn { program: String, reason: String },
    #[error("I/O error talking to '{program}': {reason}")]
    Io { program: String, reason: String },
    #[error("failed to parse JSON: {reason} (line: {line})")]
    Parse { line: String, reason: String },
    #[error("command '{program}' exited with status {code:?}: {stderr}")]
    ExitStatus {
        program: String,
        code: Option<i32>,
        stderr: String,
    },
}

/// Runs external programs configured through [`CommandSettings`].
pub struct CliExecutor;

impl CliExecutor {
    /// Whether the program can be found on `PATH` (or exists, if given as a
    /// path).
    pub fn is_available(settings: &CommandSettings) -> bool {
        which::which(&settings.program).is_ok()
    }

    /// Spawn the command, write `input` to its stdin and parse its stdout as
    /// JSON Lines.
    ///
    /// Empty lines are skipped. Lines that fail to parse yield
    /// [`CommandError::Parse`] without ending the stream. Once stdout closes,
    /// a non-zero exit yields [`CommandError::ExitStatus`] as the last item,
    /// so output printed before a crash never looks like a clean answer.
    pub fn execute_json_lines(
        settings: CommandSettings,
        input: String,
        envs: Vec<(String, String)>,
    ) -> Pin<Box<dyn Stream<Item = Result<serde_json::Value, CommandError>> + Send>> {
        let stream = async_stream::stream! {
            let program = settings.program.clone();
            let mut cmd = Command::new(&settings.program);
            cmd.args(&settings.args);
            cmd.envs(envs);
            cmd.stdin(Stdio::piped());
            cmd.stdout(Stdio::piped());
            cmd.stderr(Stdio::piped());
            cmd.kill_on_drop(true);

            let mut child = match cmd.spawn() {
                Ok(child) => child,
                Err(e) => {
                    yield Err(CommandError::Spawn { program, reason: e.to_string() });
                    return;
                }
            };

            if let Some(mut stdin) = child.stdin.take() {
                let written = async {
                    stdin.write_all(input.as_bytes()).await?;
                    stdin.write_all(b"\n").await?;
                    stdin.flush().await
                }
                .await;
                if let Err(e) = written {
                    yield Err(CommandError::Io { program, reason: e.to_string() });
                    return;
                }
                // Dropping stdin signals end of input.
            }

            let stdout = match child.stdout.take() {
                Some(stdout) => stdout,
                None => {
                    yield Err(CommandError::Io {
                        program,
                        reason: "failed to capture stdout".to_string(),
                    });
                    return;
                }
            };

            // Drained alongside stdout so a chatty command cannot fill the pipe.
            let stderr_task = child.stderr.take().map(|mut stderr| {
                tokio::spawn(async move {
                    let mut buf = String::new();
                    let _ = stderr.read_to_string(&mut buf).await;
                    buf
                })
            });

            let mut lines = BufReader::new(stdout).lines();
            loop {
                match lines.next_line().await {
                    Ok(Some(line)) => {
                        if line.trim().is_empty() {
                            continue;
                        }
                        match serde_json::from_str::<serde_json::Value>(&line) {
                            Ok(value) => yield Ok(value),
                            Err(e) => yield Err(CommandError::Parse { line, reason: e.to_string() }),
                        }
                    }
                    Ok(None) => break,
                    Err(e) => {
                        yield Err(CommandError::Io { program, reason: e.to_string() });
                        return;
                    }
                }
            }

            let status = match child.wait().await {
                Ok(status) => status,
                Err(e) => {
                    yield Err(CommandError::Io { program, reason: e.to_string() });
                    return;
                }
            };
            if !status.success() {
                let stderr = match stderr_task {
                    Some(task) => task.await.unwrap_or_default(),
                    None => String::new(),
                };
                yield Err(CommandError::ExitStatus {
                    program,
                    code: status.code(),
                    stderr: stderr.trim().to_string(),
                });
            }
        };

        Box::pin(stream)
    }

    /// Run the command with `extra_arg` appended and return its trimmed stdout.
    pub async fn execute_text(
        settings: &CommandSettings,
        extra_arg: &str,
        envs: Vec<(String, String)>,
    ) -> Result<String, CommandError> {
        let program = settings.program.clone();
        let child = Command::new(&settings.program)
            .args(&settings.args)
            .arg(extra_arg)
            .envs(envs)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| CommandError::Spawn {
                program: program.clone(),
                reason: e.to_string(),
            })?;

        // Both pipes are read concurrently until the child exits.
        let output = child
            .wait_with_output()
            .await
            .map_err(|e| CommandError::Io {
                program: program.clone(),
                reason: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(CommandError::ExitStatus {
                program,
                code: output.status.code(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(stdout.trim().to_string())
    }
}
