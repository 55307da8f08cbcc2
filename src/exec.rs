//! External command execution behind an injectable [`Executor`].
use anyhow::{Context as _, Result, bail};
use std::fmt;
use std::io::{self, Write as _};
use std::process::{Command, Output, Stdio};
use std::thread;

/// A fully built external command: program, arguments and optional stdin.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandLine {
    argv: Vec<String>,
    stdin: Option<Vec<u8>>,
}

impl CommandLine {
    /// Create a command line from a complete argv (`argv[0]` is the program).
    #[must_use]
    pub fn new<I, S>(argv: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            argv: argv.into_iter().map(Into::into).collect(),
            stdin: None,
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, arg: impl Into<String>) -> &mut Self {
        self.argv.push(arg.into());
        self
    }

    /// Feed `input` to the command's standard input.
    #[must_use]
    pub fn with_stdin(mut self, input: Vec<u8>) -> Self {
        self.stdin = Some(input);
        self
    }

    /// The complete argv, program first.
    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.argv
    }

    /// Bytes fed to standard input, if any.
    #[must_use]
    pub fn stdin(&self) -> Option<&[u8]> {
        self.stdin.as_deref()
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.argv.join(" "))
    }
}

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    /// Captured standard output.
    pub stdout: Vec<u8>,
    /// Captured standard error, lossily decoded.
    pub stderr: String,
    /// Whether the process exited successfully.
    pub success: bool,
    /// Exit code, if the process was not killed by a signal.
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: output.stdout,
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Capability for running external commands.
///
/// The applier never spawns processes itself; it hands fully built
/// [`CommandLine`]s to an implementation of this trait.  Production code
/// uses [`SystemExecutor`]; tests substitute a recording double.
pub trait Executor: fmt::Debug {
    /// Run `cmd` and return its standard output.
    ///
    /// `description` names the step for error messages and logs.
    ///
    /// # Errors
    ///
    /// Returns an error if the command cannot be spawned or exits non-zero.
    fn run_and_check(&self, cmd: &CommandLine, description: &str) -> Result<Vec<u8>>;

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// [`Executor`] that spawns real processes.
#[derive(Debug, Clone, Default)]
pub struct SystemExecutor {
    trailing_args: Vec<String>,
}

impl SystemExecutor {
    /// Create an executor that runs commands exactly as built.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            trailing_args: Vec::new(),
        }
    }

    /// Append `--context <name>` to every spawned command.
    #[must_use]
    pub fn with_cluster_context(mut self, context: Option<&str>) -> Self {
        if let Some(name) = context.filter(|c| !c.is_empty()) {
            self.trailing_args
                .extend(["--context".to_string(), name.to_string()]);
        }
        self
    }

    fn spawn(&self, cmd: &CommandLine, description: &str) -> Result<ExecResult> {
        let Some((program, args)) = cmd.args().split_first() else {
            bail!("{description}: empty command line");
        };

        let mut command = Command::new(program);
        command
            .args(args)
            .args(&self.trailing_args)
            .stdout(Stdio::piped())
            .stderr(Stdio::piped());
        if cmd.stdin().is_some() {
            command.stdin(Stdio::piped());
        }

        let mut child = command
            .spawn()
            .with_context(|| format!("failed to execute: {description}"))?;

        // Feed stdin from its own thread so a child that writes while still
        // reading can never block on a full stdout pipe.
        let stdin = child.stdin.take();
        let (output, written) = thread::scope(|scope| {
            let writer = scope.spawn(move || match (cmd.stdin(), stdin) {
                (Some(input), Some(mut pipe)) => pipe.write_all(input),
                _ => Ok(()),
            });
            let output = child.wait_with_output();
            (output, writer.join())
        });

        let result = ExecResult::from(
            output.with_context(|| format!("failed to wait for: {description}"))?,
        );
        match written {
            Err(_) => bail!("stdin writer panicked for: {description}"),
            // A failing child explains itself through its exit code and
            // stderr; a closed pipe on success means it did not need input.
            Ok(Err(e)) if result.success && e.kind() != io::ErrorKind::BrokenPipe => {
                Err(e).with_context(|| format!("failed to write stdin for: {description}"))
            }
            Ok(_) => Ok(result),
        }
    }
}

impl Executor for SystemExecutor {
    fn run_and_check(&self, cmd: &CommandLine, description: &str) -> Result<Vec<u8>> {
        let result = self.spawn(cmd, description)?;
        if !result.success {
            bail!(
                "{description} failed (exit {}): {}",
                result.code.unwrap_or(-1),
                result.stderr.trim()
            );
        }
        Ok(result.stdout)
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}
