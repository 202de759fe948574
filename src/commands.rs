use once_cell::sync::Lazy;
use regex::Regex;

use crate::events::{Control, KeyPress, Panel, UiEvent};

static COMMAND: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^/([a-z]+)(?: (.*))?$").expect("command pattern is valid")
});

pub const HELP: &str = "\
Type text to set the input. Commands:
  /translate        click Translate
  /go               Ctrl+Enter in the input
  /paste <text>     paste text at the end of the input
  /input <text>     set the input (for text starting with /)
  /src <code>       choose the source language (auto for detection)
  /tgt <code>       choose the target language
  /swap             swap languages and texts
  /copy             copy the translation
  /speak in|out     read a panel aloud
  /clear            clear both panels
  /langs            list language codes
  /help             this text
  /quit             exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Event(UiEvent),
    Help,
    Langs,
    Quit,
    /// A command the user got wrong; carries the message to show.
    Invalid(String),
}

pub fn parse_line(line: &str) -> Command {
    let line = line.trim_end_matches(['\r', '\n']);
    if !line.starts_with('/') {
        return Command::Event(UiEvent::Input(line.to_string()));
    }

    let caps = match COMMAND.captures(line) {
        Some(caps) => caps,
        None => return Command::Invalid(format!("Unknown command: {}", line)),
    };
    let name = caps.get(1).map(|m| m.as_str()).unwrap_or_default();
    let arg = caps.get(2).map(|m| m.as_str()).unwrap_or_default();

    let event = match name {
        "translate" | "t" => UiEvent::Click(Control::Translate),
        "go" => UiEvent::KeyDown(KeyPress::ctrl_enter()),
        "paste" => UiEvent::Paste(arg.to_string()),
        "input" => UiEvent::Input(arg.to_string()),
        "swap" => UiEvent::Click(Control::Swap),
        "copy" => UiEvent::Click(Control::Copy),
        "clear" => UiEvent::Click(Control::Clear),
        "src" | "source" => UiEvent::SelectSource(arg.to_string()),
        "tgt" | "target" => UiEvent::SelectTarget(arg.to_string()),
        "speak" => match Panel::parse(if arg.is_empty() { "output" } else { arg }) {
            Some(panel) => UiEvent::Click(Control::Speak(panel)),
            None => return Command::Invalid(format!("No such panel: {}", arg)),
        },
        "langs" => return Command::Langs,
        "help" => return Command::Help,
        "quit" | "exit" => return Command::Quit,
        _ => return Command::Invalid(format!("Unknown command: /{}", name)),
    };
    Command::Event(event)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_sets_input() {
        assert_eq!(
            parse_line("hello world\n"),
            Command::Event(UiEvent::Input("hello world".to_string()))
        );
    }

    #[test]
    fn go_is_ctrl_enter() {
        assert_eq!(
            parse_line("/go"),
            Command::Event(UiEvent::KeyDown(KeyPress::ctrl_enter()))
        );
    }

    #[test]
    fn commands_with_arguments() {
        assert_eq!(
            parse_line("/src fr"),
            Command::Event(UiEvent::SelectSource("fr".to_string()))
        );
        assert_eq!(
            parse_line("/paste some pasted text"),
            Command::Event(UiEvent::Paste("some pasted text".to_string()))
        );
        assert_eq!(
            parse_line("/input /not a command"),
            Command::Event(UiEvent::Input("/not a command".to_string()))
        );
        assert_eq!(
            parse_line("/speak in"),
            Command::Event(UiEvent::Click(Control::Speak(Panel::Input)))
        );
        assert_eq!(
            parse_line("/speak"),
            Command::Event(UiEvent::Click(Control::Speak(Panel::Output)))
        );
    }

    #[test]
    fn paste_keeps_argument_whitespace() {
        assert_eq!(
            parse_line("/paste   indented  text "),
            Command::Event(UiEvent::Paste("  indented  text ".to_string()))
        );
        assert_eq!(
            parse_line("/src  fr"),
            Command::Event(UiEvent::SelectSource(" fr".to_string()))
        );
    }

    #[test]
    fn bad_commands_are_reported() {
        assert!(matches!(parse_line("/fly"), Command::Invalid(_)));
        assert!(matches!(parse_line("/speak sideways"), Command::Invalid(_)));
        assert!(matches!(parse_line("/"), Command::Invalid(_)));
        assert_eq!(parse_line("/quit"), Command::Quit);
    }
}
