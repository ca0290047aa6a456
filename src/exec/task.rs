// src/exec/task.rs

//! A single external process invocation and its lifecycle.
//!
//! A [`Task`] is created idle, moved to running by an [`Executor`] and
//! ends in exactly one terminal [`TaskOutcome`]. The state machine is
//! guarded: `begin` is only legal from idle and `finish` only from running,
//! so a task can never spawn its process twice.
//!
//! [`Executor`]: crate::exec::Executor

use std::ffi::OsString;
use std::fmt;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;
use tracing::{debug, info, warn};

use crate::errors::{HighwayError, Result};
use crate::exec::resolver::ExecutableResolver;

/// What happens to the child's standard output.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CaptureMode {
    /// Connected to the null device.
    Discard,
    /// Buffered in full and readable once the task has finished.
    Capture,
}

/// Terminal result of a task's process.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskOutcome {
    Success,
    /// Exited with a non-zero code (`-1` when killed by a signal).
    Failed(i32),
    /// The process could not be spawned at all.
    LaunchFailed(String),
}

impl TaskOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, TaskOutcome::Success)
    }

    /// Exit code for `Failed`, `Some(0)` for `Success`.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            TaskOutcome::Success => Some(0),
            TaskOutcome::Failed(code) => Some(*code),
            TaskOutcome::LaunchFailed(_) => None,
        }
    }
}

impl fmt::Display for TaskOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskOutcome::Success => write!(f, "succeeded"),
            TaskOutcome::Failed(code) => write!(f, "exited with code {code}"),
            TaskOutcome::LaunchFailed(reason) => write!(f, "failed to launch: {reason}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskState {
    Idle,
    Running,
    Finished(TaskOutcome),
}

impl TaskState {
    pub fn is_finished(&self) -> bool {
        matches!(self, TaskState::Finished(_))
    }

    pub fn successfully_finished(&self) -> bool {
        matches!(self, TaskState::Finished(TaskOutcome::Success))
    }

    pub fn outcome(&self) -> Option<&TaskOutcome> {
        match self {
            TaskState::Finished(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl fmt::Display for TaskState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TaskState::Idle => write!(f, "idle"),
            TaskState::Running => write!(f, "running"),
            TaskState::Finished(outcome) => write!(f, "finished ({outcome})"),
        }
    }
}

/// Raw bytes a task wrote to standard output, in write order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CapturedOutput(Vec<u8>);

impl CapturedOutput {
    pub fn as_bytes(&self) -> &[u8] {
        &self.0
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

impl From<Vec<u8>> for CapturedOutput {
    fn from(bytes: Vec<u8>) -> Self {
        Self(bytes)
    }
}

/// One external process invocation.
///
/// Arguments are passed to the process as-is, without any shell
/// interpretation. The child starts with an empty environment apart from
/// the variables added through [`Task::env`] / [`Task::inherit_env`].
#[derive(Debug)]
pub struct Task {
    executable: PathBuf,
    arguments: Vec<String>,
    current_dir: PathBuf,
    env: Vec<(OsString, OsString)>,
    capture: CaptureMode,
    state: TaskState,
    output: CapturedOutput,
}

impl Task {
    /// Create an idle task.
    ///
    /// `executable` may be a bare command name (looked up by the resolver)
    /// or a path; either way it must resolve to an existing executable file,
    /// otherwise this fails with [`HighwayError::ExecutableNotFound`].
    pub fn new<I, S>(
        executable: impl AsRef<Path>,
        arguments: I,
        current_dir: impl AsRef<Path>,
        capture: CaptureMode,
        resolver: &dyn ExecutableResolver,
    ) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let current_dir = std::path::absolute(current_dir.as_ref())?;
        let executable = resolver.resolve(executable.as_ref(), &current_dir)?;

        Ok(Self {
            executable,
            arguments: arguments.into_iter().map(Into::into).collect(),
            current_dir,
            env: Vec::new(),
            capture,
            state: TaskState::Idle,
            output: CapturedOutput::default(),
        })
    }

    /// Set one environment variable for the child.
    pub fn env(mut self, key: impl Into<OsString>, value: impl Into<OsString>) -> Self {
        if self.state != TaskState::Idle {
            warn!(
                executable = %self.executable.display(),
                "ignoring environment change on a task that has already started"
            );
            return self;
        }
        self.env.push((key.into(), value.into()));
        self
    }

    /// Forward the named variables from this process, skipping unset ones.
    pub fn inherit_env<I, K>(self, keys: I) -> Self
    where
        I: IntoIterator<Item = K>,
        K: AsRef<str>,
    {
        keys.into_iter().fold(self, |task, key| {
            match std::env::var_os(key.as_ref()) {
                Some(value) => task.env(key.as_ref(), value),
                None => task,
            }
        })
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    pub fn arguments(&self) -> &[String] {
        &self.arguments
    }

    pub fn current_dir(&self) -> &Path {
        &self.current_dir
    }

    pub fn capture_mode(&self) -> CaptureMode {
        self.capture
    }

    pub fn state(&self) -> &TaskState {
        &self.state
    }

    /// Captured stdout, available only once the task has finished in
    /// [`CaptureMode::Capture`].
    pub fn output(&self) -> Option<&CapturedOutput> {
        match (&self.state, self.capture) {
            (TaskState::Finished(_), CaptureMode::Capture) => Some(&self.output),
            _ => None,
        }
    }

    pub fn into_output(self) -> Option<CapturedOutput> {
        match (&self.state, self.capture) {
            (TaskState::Finished(_), CaptureMode::Capture) => Some(self.output),
            _ => None,
        }
    }

    /// Move from idle to running. Fails with [`HighwayError::AlreadyRun`]
    /// for any other state.
    pub fn begin(&mut self) -> Result<()> {
        if self.state != TaskState::Idle {
            return Err(HighwayError::AlreadyRun(self.executable.clone()));
        }
        debug!(executable = %self.executable.display(), "task running");
        self.state = TaskState::Running;
        Ok(())
    }

    /// Record the terminal outcome of a running task.
    ///
    /// `stdout` is kept only in capture mode.
    pub fn finish(&mut self, outcome: TaskOutcome, stdout: Vec<u8>) -> Result<()> {
        if self.state != TaskState::Running {
            return Err(self.unexpected_state("running"));
        }
        if self.capture == CaptureMode::Capture {
            self.output = CapturedOutput(stdout);
        }
        debug!(
            executable = %self.executable.display(),
            outcome = %outcome,
            "task finished"
        );
        self.state = TaskState::Finished(outcome);
        Ok(())
    }

    /// Turn a non-successful terminal state into
    /// [`HighwayError::ExecutionFailed`].
    pub fn ensure_success(&self) -> Result<()> {
        match &self.state {
            TaskState::Finished(TaskOutcome::Success) => Ok(()),
            TaskState::Finished(outcome) => Err(HighwayError::ExecutionFailed {
                executable: self.executable.clone(),
                outcome: outcome.clone(),
            }),
            _ => Err(self.unexpected_state("finished")),
        }
    }

    fn unexpected_state(&self, expected: &'static str) -> HighwayError {
        HighwayError::UnexpectedState {
            executable: self.executable.clone(),
            state: self.state.to_string(),
            expected,
        }
    }

    fn display_name(&self) -> String {
        self.executable
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.executable.display().to_string())
    }

    /// Spawn the process and wait for it, draining stdout and stderr
    /// concurrently so neither pipe can fill up and stall the child.
    pub(crate) async fn spawn_and_wait(&self) -> (TaskOutcome, Vec<u8>) {
        let name = self.display_name();

        let mut cmd = Command::new(&self.executable);
        cmd.args(&self.arguments)
            .current_dir(&self.current_dir)
            .env_clear()
            .envs(self.env.iter().map(|(k, v)| (k, v)))
            .stdin(Stdio::null())
            .stdout(match self.capture {
                CaptureMode::Capture => Stdio::piped(),
                CaptureMode::Discard => Stdio::null(),
            })
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = match cmd.spawn() {
            Ok(child) => child,
            Err(err) => {
                warn!(task = %name, error = %err, "failed to launch process");
                return (TaskOutcome::LaunchFailed(err.to_string()), Vec::new());
            }
        };

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let read_stdout = async {
            let mut buf = Vec::new();
            if let Some(mut stdout) = stdout {
                stdout.read_to_end(&mut buf).await?;
            }
            Ok::<_, io::Error>(buf)
        };

        // Line-wise but byte-based, so non-UTF-8 noise never stops the drain.
        let drain_stderr = async {
            let Some(stderr) = stderr else { return };
            let mut reader = BufReader::new(stderr);
            let mut line = Vec::new();
            loop {
                line.clear();
                match reader.read_until(b'\n', &mut line).await {
                    Ok(0) => break,
                    Ok(_) => debug!(
                        task = %name,
                        "stderr: {}",
                        String::from_utf8_lossy(&line).trim_end()
                    ),
                    Err(err) => {
                        debug!(task = %name, error = %err, "stderr closed");
                        break;
                    }
                }
            }
        };

        let (stdout, (), status) = tokio::join!(read_stdout, drain_stderr, child.wait());

        if let Err(err) = &stdout {
            warn!(task = %name, error = %err, "reading stdout failed; output discarded");
        }
        let (outcome, bytes) = settle(status, stdout);

        info!(
            task = %name,
            outcome = %outcome,
            stdout_bytes = bytes.len(),
            "process exited"
        );

        (outcome, bytes)
    }
}

/// Terminal outcome of a process from its exit status and stdout read.
///
/// Output that could not be read in full is never reported as a success.
fn settle(
    status: io::Result<ExitStatus>,
    stdout: io::Result<Vec<u8>>,
) -> (TaskOutcome, Vec<u8>) {
    let status = match status {
        Ok(status) => status,
        Err(err) => {
            return (
                TaskOutcome::LaunchFailed(format!("waiting for process: {err}")),
                Vec::new(),
            );
        }
    };
    let bytes = match stdout {
        Ok(bytes) => bytes,
        Err(err) => {
            return (
                TaskOutcome::LaunchFailed(format!("reading stdout: {err}")),
                Vec::new(),
            );
        }
    };

    if status.success() {
        (TaskOutcome::Success, bytes)
    } else {
        (TaskOutcome::Failed(status.code().unwrap_or(-1)), bytes)
    }
}
