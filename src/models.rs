// src/models.rs

use crate::system::executor::ExecutionError;
use std::fmt;
use std::process::ExitStatus;

// --- CONSOLE MODELS ---

/// The terminal colors used by the message printer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnsiColor {
    Blue,
    Cyan,
    Green,
    Yellow,
    Red,
}

/// The semantic category of a console message.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum MessageKind {
    /// A bordered, centered banner.
    Header,
    /// A unit of work that is about to start.
    Step,
    Success,
    Warning,
    Error,
}

/// The decoration applied to one category of message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Style {
    pub color: AnsiColor,
    pub bold: bool,
    pub underline: bool,
    /// Prefix printed before the text. Empty for headers.
    pub glyph: &'static str,
}

impl MessageKind {
    /// Returns the read-only style token for this category.
    pub fn style(self) -> Style {
        match self {
            Self::Header => Style {
                color: AnsiColor::Cyan,
                bold: true,
                underline: false,
                glyph: "",
            },
            Self::Step => Style {
                color: AnsiColor::Blue,
                bold: true,
                underline: false,
                glyph: "🔄 ",
            },
            Self::Success => Style {
                color: AnsiColor::Green,
                bold: false,
                underline: false,
                glyph: "✅ ",
            },
            Self::Warning => Style {
                color: AnsiColor::Yellow,
                bold: false,
                underline: false,
                glyph: "⚠️  ",
            },
            Self::Error => Style {
                color: AnsiColor::Red,
                bold: false,
                underline: false,
                glyph: "❌ ",
            },
        }
    }
}

/// A piece of text tagged with the category that decides how it is decorated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormattedMessage {
    pub kind: MessageKind,
    pub text: String,
}

impl FormattedMessage {
    pub fn new(kind: MessageKind, text: impl Into<String>) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }
}

// --- PROCESS MODELS ---

/// How to launch a subprocess: the program followed by its arguments.
///
/// An invocation always holds at least the program; the constructors
/// reject an empty sequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    parts: Vec<String>,
}

impl CommandInvocation {
    /// Creates an invocation of `program` with no arguments.
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            parts: vec![program.into()],
        }
    }

    /// Builds an invocation from an already split sequence.
    pub fn from_parts<I, S>(parts: I) -> Result<Self, ExecutionError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let parts: Vec<String> = parts.into_iter().map(Into::into).collect();
        if parts.is_empty() {
            return Err(ExecutionError::EmptyCommand);
        }
        Ok(Self { parts })
    }

    /// Splits a shell-style command line (`python -c "print(1)"`) into an invocation.
    pub fn parse(command_line: &str) -> Result<Self, ExecutionError> {
        let trimmed = command_line.trim();
        let parts = shlex::split(trimmed)
            .ok_or_else(|| ExecutionError::CommandParse(trimmed.to_string()))?;
        Self::from_parts(parts)
    }

    /// Appends one argument.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.parts.push(arg.into());
        self
    }

    /// Appends several arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.parts.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn program(&self) -> &str {
        self.parts.first().map(String::as_str).unwrap_or_default()
    }

    pub fn arguments(&self) -> &[String] {
        self.parts.get(1..).unwrap_or_default()
    }

    pub fn parts(&self) -> &[String] {
        &self.parts
    }

    pub fn len(&self) -> usize {
        self.parts.len()
    }

    /// Always `false`; present for API symmetry with `len`.
    pub fn is_empty(&self) -> bool {
        self.parts.is_empty()
    }

    pub fn into_parts(self) -> Vec<String> {
        self.parts
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match shlex::try_join(self.parts.iter().map(String::as_str)) {
            Ok(joined) => f.write_str(&joined),
            // Only fails on interior NUL bytes, which no real command carries.
            Err(_) => f.write_str(&self.parts.join(" ")),
        }
    }
}

/// The captured result of a child process that ran to completion.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub status: ExitStatus,
}

impl CommandOutput {
    /// The exit code, or `None` if the process was terminated by a signal.
    pub fn code(&self) -> Option<i32> {
        self.status.code()
    }

    pub fn success(&self) -> bool {
        self.status.success()
    }
}

/// The outcome of probing an external tool for availability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Available,
    Unavailable { reason: String },
}

impl ProbeOutcome {
    pub fn is_available(&self) -> bool {
        matches!(self, Self::Available)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_splits_quoted_arguments() {
        let invocation = CommandInvocation::parse(r#"python -c "print('hi')""#).unwrap();
        assert_eq!(invocation.program(), "python");
        assert_eq!(invocation.arguments(), ["-c", "print('hi')"]);
    }

    #[test]
    fn test_parse_rejects_empty_and_unbalanced_lines() {
        assert!(matches!(
            CommandInvocation::parse("   "),
            Err(ExecutionError::EmptyCommand)
        ));
        assert!(matches!(
            CommandInvocation::parse("echo \"unterminated"),
            Err(ExecutionError::CommandParse(_))
        ));
    }

    #[test]
    fn test_display_quotes_arguments_with_spaces() {
        let invocation = CommandInvocation::new("sh").arg("-c").arg("echo hello world");
        let rendered = invocation.to_string();
        assert!(rendered.starts_with("sh -c "));
        assert_eq!(shlex::split(&rendered).unwrap(), invocation.parts());
    }

    #[test]
    fn test_every_kind_has_a_glyph_except_header() {
        assert!(MessageKind::Header.style().glyph.is_empty());
        for kind in [
            MessageKind::Step,
            MessageKind::Success,
            MessageKind::Warning,
            MessageKind::Error,
        ] {
            assert!(!kind.style().glyph.is_empty(), "{kind:?} has no glyph");
        }
    }
}
