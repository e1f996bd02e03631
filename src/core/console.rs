// src/core/console.rs

//! Decorated status messages for setup scripts.
//!
//! Every category maps to a read-only [`Style`] token; [`render`] turns a message
//! into the exact bytes that reach the terminal, and the `print_*` helpers write
//! them to stdout. Rendered output always starts and ends with the reset sequence,
//! so a message never leaks its color into whatever is printed next.

use crate::constants::HEADER_WIDTH;
use crate::models::{AnsiColor, FormattedMessage, MessageKind, Style};
use std::io::{self, Write};

/// Clears every active attribute.
pub const RESET: &str = "\x1b[0m";
const BOLD: &str = "\x1b[1m";
const UNDERLINE: &str = "\x1b[4m";

/// Converts an `AnsiColor` enum into its raw ANSI escape code representation.
pub fn ansi_color_to_code(color: AnsiColor) -> &'static str {
    match color {
        AnsiColor::Blue => "\x1b[94m",
        AnsiColor::Cyan => "\x1b[96m",
        AnsiColor::Green => "\x1b[92m",
        AnsiColor::Yellow => "\x1b[93m",
        AnsiColor::Red => "\x1b[91m",
    }
}

/// Builds the escape sequence that switches a style on, preceded by a reset.
fn style_prefix(style: Style) -> String {
    let mut prefix = String::from(RESET);
    if style.bold {
        prefix.push_str(BOLD);
    }
    if style.underline {
        prefix.push_str(UNDERLINE);
    }
    prefix.push_str(ansi_color_to_code(style.color));
    prefix
}

/// Centers `text` in a field of `width` characters.
///
/// Text that is already as wide as the field is returned unchanged. When the
/// padding is odd the spare space goes to the right, unless the width is odd
/// as well, in which case it goes to the left.
pub fn center(text: &str, width: usize) -> String {
    let len = text.chars().count();
    if len >= width {
        return text.to_string();
    }
    let margin = width - len;
    let left = margin / 2 + (margin & width & 1);
    let right = margin - left;
    format!("{}{}{}", " ".repeat(left), text, " ".repeat(right))
}

/// Renders a message with its category decoration.
///
/// Headers span three lines (border, centered text, border); every other
/// category is a single glyph-prefixed line. No trailing newline is added.
pub fn render(kind: MessageKind, text: &str) -> String {
    let style = kind.style();
    let prefix = style_prefix(style);
    match kind {
        MessageKind::Header => {
            let border = "=".repeat(HEADER_WIDTH);
            format!(
                "{prefix}{border}\n{}\n{border}{RESET}",
                center(text, HEADER_WIDTH)
            )
        }
        _ => format!("{prefix}{}{text}{RESET}", style.glyph),
    }
}

/// Writes a rendered message to `out`, surrounding headers with blank lines.
pub fn write_message<W: Write>(out: &mut W, message: &FormattedMessage) -> io::Result<()> {
    let rendered = render(message.kind, &message.text);
    if message.kind == MessageKind::Header {
        writeln!(out)?;
        writeln!(out, "{rendered}")?;
        writeln!(out)
    } else {
        writeln!(out, "{rendered}")
    }
}

/// Prints a message to stdout.
///
/// Write failures (a closed pipe, for instance) are ignored: status output is
/// best-effort and must never abort the script that emits it.
pub fn print_message(message: &FormattedMessage) {
    let stdout = io::stdout();
    let mut handle = stdout.lock();
    if let Err(e) = write_message(&mut handle, message).and_then(|_| handle.flush()) {
        log::debug!("Could not write status message to stdout: {}", e);
    }
}

pub fn print_header(text: &str) {
    print_message(&FormattedMessage::new(MessageKind::Header, text));
}

pub fn print_step(text: &str) {
    print_message(&FormattedMessage::new(MessageKind::Step, text));
}

pub fn print_success(text: &str) {
    print_message(&FormattedMessage::new(MessageKind::Success, text));
}

pub fn print_warning(text: &str) {
    print_message(&FormattedMessage::new(MessageKind::Warning, text));
}

pub fn print_error(text: &str) {
    print_message(&FormattedMessage::new(MessageKind::Error, text));
}

#[cfg(test)]
mod tests {
    use super::*;

    const ALL_KINDS: [MessageKind; 5] = [
        MessageKind::Header,
        MessageKind::Step,
        MessageKind::Success,
        MessageKind::Warning,
        MessageKind::Error,
    ];

    #[test]
    fn test_render_always_starts_and_ends_with_reset() {
        for kind in ALL_KINDS {
            for text in ["", "Installing agents", "ünïcödé ✨"] {
                let rendered = render(kind, text);
                assert!(rendered.starts_with(RESET), "{kind:?} does not start with reset");
                assert!(rendered.ends_with(RESET), "{kind:?} does not end with reset");
            }
        }
    }

    #[test]
    fn test_header_borders_have_equal_length() {
        let rendered = render(MessageKind::Header, "Achira Setup");
        let body = rendered
            .trim_start_matches(RESET)
            .trim_end_matches(RESET)
            .to_string();
        let lines: Vec<&str> = body.lines().collect();
        assert_eq!(lines.len(), 3);

        let top = lines[0].trim_start_matches(|c: char| c != '=');
        let bottom = lines[2];
        assert_eq!(top, bottom);
        assert_eq!(bottom.chars().count(), HEADER_WIDTH);
        assert_eq!(lines[1].trim(), "Achira Setup");
        assert_eq!(lines[1].chars().count(), HEADER_WIDTH);
    }

    #[test]
    fn test_single_line_kinds_carry_color_and_glyph() {
        let rendered = render(MessageKind::Success, "done");
        assert_eq!(rendered, format!("{RESET}\x1b[92m✅ done{RESET}"));

        let rendered = render(MessageKind::Step, "working");
        assert_eq!(rendered, format!("{RESET}\x1b[1m\x1b[94m🔄 working{RESET}"));
        assert!(!rendered.contains('\n'));
    }

    #[test]
    fn test_center_matches_conventional_padding() {
        assert_eq!(center("ab", 5), "  ab ");
        assert_eq!(center("abc", 6), " abc  ");
        assert_eq!(center("abcd", 6), " abcd ");
        assert_eq!(center("too long", 3), "too long");
        assert_eq!(center("", 4), "    ");
    }

    #[test]
    fn test_write_message_surrounds_header_with_blank_lines() {
        let mut out = Vec::new();
        write_message(&mut out, &FormattedMessage::new(MessageKind::Header, "Title")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with('\n'));
        assert!(text.ends_with(&format!("{RESET}\n\n")));

        let mut out = Vec::new();
        write_message(&mut out, &FormattedMessage::new(MessageKind::Error, "boom")).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, format!("{}\n", render(MessageKind::Error, "boom")));
    }
}
