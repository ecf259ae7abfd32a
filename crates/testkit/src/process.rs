//! Scripted process execution.

use async_trait::async_trait;
use casket_errors::{Error, PlatformError};
use casket_platform::{CommandOutput, PlatformCommand, PlatformContext, ProcessOperations};
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// A command as it reached the process layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedCommand {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
    pub env: Vec<(String, String)>,
}

impl RecordedCommand {
    /// Program followed by its arguments.
    pub fn argv(&self) -> Vec<String> {
        std::iter::once(self.program.clone())
            .chain(self.args.iter().cloned())
            .collect()
    }
}

/// Answers commands from a table keyed by argv.
///
/// Unscripted commands exit 127 with a message on stderr, so an unexpected
/// invocation surfaces as a command failure instead of hanging a test.
#[derive(Debug, Default)]
pub struct ScriptedProcess {
    responses: HashMap<Vec<String>, CommandOutput>,
    missing_programs: Vec<String>,
    calls: Mutex<Vec<RecordedCommand>>,
}

impl ScriptedProcess {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the full output for `argv`.
    pub fn respond(mut self, argv: &[&str], output: CommandOutput) -> Self {
        self.responses
            .insert(argv.iter().map(|s| (*s).to_string()).collect(), output);
        self
    }

    /// Script a successful run printing `stdout`.
    pub fn ok(self, argv: &[&str], stdout: &str) -> Self {
        self.respond(
            argv,
            CommandOutput {
                exit_code: Some(0),
                stdout: stdout.as_bytes().to_vec(),
                stderr: Vec::new(),
            },
        )
    }

    /// Script a failing run printing `stderr`.
    pub fn fail(self, argv: &[&str], stderr: &str, exit_code: i32) -> Self {
        self.respond(
            argv,
            CommandOutput {
                exit_code: Some(exit_code),
                stdout: Vec::new(),
                stderr: stderr.as_bytes().to_vec(),
            },
        )
    }

    /// Make every invocation of `program` fail to spawn.
    pub fn missing_program(mut self, program: &str) -> Self {
        self.missing_programs.push(program.to_string());
        self
    }

    /// Every command executed so far, in order.
    pub fn calls(&self) -> Vec<RecordedCommand> {
        self.calls.lock().unwrap().clone()
    }

    /// Commands executed for `program`, in order.
    pub fn calls_to(&self, program: &str) -> Vec<RecordedCommand> {
        self.calls()
            .into_iter()
            .filter(|call| call.program == program)
            .collect()
    }
}

#[async_trait]
impl ProcessOperations for ScriptedProcess {
    async fn execute_command(
        &self,
        _ctx: &PlatformContext,
        cmd: PlatformCommand,
    ) -> Result<CommandOutput, Error> {
        let recorded = RecordedCommand {
            program: cmd.program().to_string(),
            args: cmd.get_args().to_vec(),
            cwd: cmd.get_current_dir().cloned(),
            env: cmd.get_env_vars().to_vec(),
        };
        let argv = recorded.argv();
        self.calls.lock().unwrap().push(recorded);

        if self.missing_programs.iter().any(|p| p == cmd.program()) {
            return Err(PlatformError::CommandNotFound {
                command: cmd.program().to_string(),
            }
            .into());
        }

        Ok(self
            .responses
            .get(&argv)
            .cloned()
            .unwrap_or_else(|| CommandOutput {
                exit_code: Some(127),
                stdout: Vec::new(),
                stderr: format!("unscripted command: {}", argv.join(" ")).into_bytes(),
            }))
    }
}

/// Builds a [`ScriptedProcess`] answering the `git` calls of one audit run.
///
/// ```rust,ignore
/// let process = GitScript::new("/repo", "main..topic")
///     .modified_or_added(&["Casks/foo.rb"])
///     .added(&[])
///     .file_diff("Casks/foo.rb", "+  version \"2.0\"")
///     .build();
/// ```
#[derive(Debug)]
pub struct GitScript {
    root: String,
    range: String,
    process: ScriptedProcess,
}

impl GitScript {
    pub fn new(root: &str, range: &str) -> Self {
        let process = ScriptedProcess::new().ok(
            &["git", "rev-parse", "--show-toplevel"],
            &format!("{root}\n"),
        );
        Self {
            root: root.to_string(),
            range: range.to_string(),
            process,
        }
    }

    /// Pathspec the resolver passes for the default cask layout.
    pub fn cask_pathspec(&self) -> String {
        format!("{}/Casks/*.rb", self.root)
    }

    fn name_only(self, filter: &str, files: &[&str]) -> Self {
        let pathspec = self.cask_pathspec();
        let mut stdout = files.join("\n");
        if !stdout.is_empty() {
            stdout.push('\n');
        }
        let range = self.range.clone();
        Self {
            process: self.process.ok(
                &["git", "diff", "--name-only", filter, &range, "--", &pathspec],
                &stdout,
            ),
            ..self
        }
    }

    pub fn modified_or_added(self, files: &[&str]) -> Self {
        self.name_only("--diff-filter=AM", files)
    }

    pub fn added(self, files: &[&str]) -> Self {
        self.name_only("--diff-filter=A", files)
    }

    /// Script the per-file diff used for stanza classification.
    pub fn file_diff(self, file: &str, diff: &str) -> Self {
        let range = self.range.clone();
        Self {
            process: self.process.ok(&["git", "diff", &range, "--", file], diff),
            ..self
        }
    }

    /// Make the root lookup fail as it does outside a checkout.
    pub fn outside_checkout(self) -> Self {
        Self {
            process: self.process.fail(
                &["git", "rev-parse", "--show-toplevel"],
                "fatal: not a git repository (or any of the parent directories): .git\n",
                128,
            ),
            ..self
        }
    }

    /// Make listing fail as it does for an unknown revision.
    pub fn bad_range(self) -> Self {
        let pathspec = self.cask_pathspec();
        let range = self.range.clone();
        Self {
            process: self.process.fail(
                &[
                    "git",
                    "diff",
                    "--name-only",
                    "--diff-filter=AM",
                    &range,
                    "--",
                    &pathspec,
                ],
                &format!("fatal: ambiguous argument '{range}': unknown revision or path not in the working tree.\n"),
                128,
            ),
            ..self
        }
    }

    /// Add further scripted commands, such as auditor invocations.
    pub fn with(self, f: impl FnOnce(ScriptedProcess) -> ScriptedProcess) -> Self {
        Self {
            process: f(self.process),
            ..self
        }
    }

    pub fn build(self) -> ScriptedProcess {
        self.process
    }
}
