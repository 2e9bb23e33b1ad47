use std::io::{self, BufRead};
use std::sync::mpsc;
use std::thread;

use super::app::AppEvent;

#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    /// Replace the search box contents (debounced).
    Type(String),
    Submit,
    Clear,
    More,
    /// Scroll the simulated viewport by this many pixels.
    Scroll(f64),
    Retry,
    Help,
    Quit,
    Unknown(String),
}

pub const HELP: &str = "\
commands:
  <text>          type into the search box (commits after 300 ms)
  /go             commit the search box now
  /clear          clear the search
  /down [px]      scroll down (default one screen)
  /up [px]        scroll up
  /more           load the next page
  /retry          retry after a failure
  /quit           exit";

pub fn parse_command(line: &str) -> Command {
    let trimmed = line.trim();
    let Some(rest) = trimmed.strip_prefix('/') else {
        return Command::Type(line.trim_end_matches(['\r', '\n']).to_string());
    };
    let mut parts = rest.split_whitespace();
    let name = parts.next().unwrap_or_default();
    let amount = parts.next().and_then(|raw| raw.parse::<f64>().ok());
    match name {
        "go" => Command::Submit,
        "clear" => Command::Clear,
        "more" => Command::More,
        "down" => Command::Scroll(amount.unwrap_or(super::ui::viewport::VIEWPORT_HEIGHT)),
        "up" => Command::Scroll(-amount.unwrap_or(super::ui::viewport::VIEWPORT_HEIGHT)),
        "retry" => Command::Retry,
        "help" => Command::Help,
        "quit" | "q" => Command::Quit,
        _ => Command::Unknown(trimmed.to_string()),
    }
}

/// Forward stdin lines as commands; EOF quits.
pub fn spawn_reader(tx: mpsc::Sender<AppEvent>) {
    thread::spawn(move || {
        let stdin = io::stdin();
        for line in stdin.lock().lines() {
            let Ok(line) = line else { break };
            if tx.send(AppEvent::Command(parse_command(&line))).is_err() {
                return;
            }
        }
        let _ = tx.send(AppEvent::Command(Command::Quit));
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plain_text_is_typed_verbatim() {
        assert_eq!(parse_command("  Mock Post "), Command::Type("  Mock Post ".into()));
        assert_eq!(parse_command(""), Command::Type(String::new()));
    }

    #[test]
    fn slash_commands_are_recognized() {
        assert_eq!(parse_command("/go"), Command::Submit);
        assert_eq!(parse_command(" /clear "), Command::Clear);
        assert_eq!(parse_command("/more"), Command::More);
        assert_eq!(parse_command("/retry"), Command::Retry);
        assert_eq!(parse_command("/q"), Command::Quit);
    }

    #[test]
    fn scroll_amount_defaults_to_one_screen() {
        assert_eq!(parse_command("/down 250"), Command::Scroll(250.0));
        assert_eq!(parse_command("/up 100"), Command::Scroll(-100.0));
        assert_eq!(parse_command("/down"), Command::Scroll(800.0));
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(parse_command("/nope"), Command::Unknown("/nope".into()));
    }
}
