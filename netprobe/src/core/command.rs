//! Command lines and the shell commands derived from them
//!
//! A [`CommandLine`] is launched verbatim and later matched verbatim by
//! `pgrep`/`pkill`, so it must never be re-formatted after construction.

use std::fmt;

use crate::error::{ProbeError, ProbeResult};

/// An exact remote command line
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CommandLine(String);

impl CommandLine {
    /// Wrap an existing command string without touching its whitespace
    pub fn new(command: impl Into<String>) -> ProbeResult<Self> {
        let command = command.into();
        if command.trim().is_empty() {
            return Err(ProbeError::invalid_command("command line is empty"));
        }
        if command.contains('\n') || command.contains('\0') {
            return Err(ProbeError::invalid_command(format!(
                "command line `{}` spans multiple lines",
                command.escape_debug()
            )));
        }
        Ok(Self(command))
    }

    /// Start building a command from a program name
    pub fn builder(program: impl Into<String>) -> CommandLineBuilder {
        CommandLineBuilder {
            parts: vec![program.into()],
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// First word of the command line
    pub fn program(&self) -> &str {
        self.0.split_whitespace().next().unwrap_or_default()
    }

    /// Pattern used by the liveness probe and the kill command.
    ///
    /// Identical to the launched command.
    pub fn match_pattern(&self) -> &str {
        &self.0
    }

    /// `pgrep` invocation that prints the PIDs of this exact command line
    pub fn probe_command(&self) -> String {
        format!("pgrep -fx {}", shell_quote(self.match_pattern()))
    }

    /// `pkill` invocation that signals every process running this command line
    pub fn kill_command(&self) -> String {
        format!("pkill -fx {}", shell_quote(self.match_pattern()))
    }
}

impl fmt::Display for CommandLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Builds a command line joined by single spaces
#[derive(Debug, Clone)]
pub struct CommandLineBuilder {
    parts: Vec<String>,
}

impl CommandLineBuilder {
    /// Append a bare flag such as `--one-off`
    pub fn flag(mut self, flag: &str) -> Self {
        self.parts.push(flag.to_string());
        self
    }

    /// Append a flag followed by its value
    pub fn option(mut self, flag: &str, value: impl fmt::Display) -> Self {
        self.parts.push(flag.to_string());
        self.parts.push(value.to_string());
        self
    }

    /// Append a flag and value only when a value is present
    pub fn option_if<T: fmt::Display>(self, flag: &str, value: Option<T>) -> Self {
        match value {
            Some(value) => self.option(flag, value),
            None => self,
        }
    }

    pub fn build(self) -> ProbeResult<CommandLine> {
        if let Some(part) = self.parts.iter().find(|p| p.is_empty() || p.contains(char::is_whitespace)) {
            return Err(ProbeError::invalid_command(format!(
                "argument `{part}` is empty or contains whitespace"
            )));
        }
        CommandLine::new(self.parts.join(" "))
    }
}

/// Quote a string for a POSIX shell
pub fn shell_quote(raw: &str) -> String {
    format!("'{}'", raw.replace('\'', r"'\''"))
}
