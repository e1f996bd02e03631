// src/cli/handlers/say.rs

use anyhow::Result;
use clap::Parser;

use crate::{
    core::console,
    models::{FormattedMessage, MessageKind},
};

#[derive(Parser, Debug)]
#[command(no_binary_name = true)]
struct SayArgs {
    /// The message category: header, step, success, warning or error.
    #[arg(value_enum)]
    kind: MessageKind,
    /// The message text. Multiple words are joined with spaces.
    #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
    text: Vec<String>,
}

/// The main handler for the `say` command.
pub fn handle(args: Vec<String>) -> Result<()> {
    let say_args = SayArgs::try_parse_from(&args)?;
    console::print_message(&FormattedMessage::new(say_args.kind, say_args.text.join(" ")));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_kind_and_joins_words() {
        let args = SayArgs::try_parse_from(["warning", "disk", "almost", "full"]).unwrap();
        assert_eq!(args.kind, MessageKind::Warning);
        assert_eq!(args.text.join(" "), "disk almost full");
    }

    #[test]
    fn test_rejects_unknown_kind() {
        assert!(SayArgs::try_parse_from(["shout", "hello"]).is_err());
    }
}
