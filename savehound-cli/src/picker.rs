//! Interactive "which game did you mean?" prompt.

use std::io::{BufRead, Write};

use owo_colors::OwoColorize;
use owo_colors::Stream::Stdout;

use savehound_core::NameMatch;
use savehound_lib::MatchPicker;

/// Asks on the terminal which match to use.
pub(crate) struct TerminalPicker;

/// What the user typed at the prompt.
#[derive(Debug, PartialEq)]
enum Choice {
    Pick(usize),
    Quit,
    Invalid,
}

/// Parse a 1-based selection. Empty input or `q` quits.
fn parse_choice(input: &str, count: usize) -> Choice {
    let trimmed = input.trim();
    if trimmed.is_empty() || trimmed.eq_ignore_ascii_case("q") {
        return Choice::Quit;
    }
    match trimmed.parse::<usize>() {
        Ok(n) if (1..=count).contains(&n) => Choice::Pick(n - 1),
        _ => Choice::Invalid,
    }
}

impl MatchPicker for TerminalPicker {
    fn pick(&mut self, matches: &[NameMatch]) -> Option<usize> {
        if matches.len() == 1 {
            return Some(0);
        }

        log::info!(
            "{}",
            "Multiple games match:".if_supports_color(Stdout, |t| t.bold()),
        );
        for (i, m) in matches.iter().enumerate() {
            log::info!(
                "  {:>3}. {} {}",
                i + 1,
                m.name,
                format!("({})", m.app_id).if_supports_color(Stdout, |t| t.dimmed()),
            );
        }

        let stdin = std::io::stdin();
        loop {
            print!("Select a game [1-{}, q to quit]: ", matches.len());
            if std::io::stdout().flush().is_err() {
                return None;
            }

            let mut line = String::new();
            match stdin.lock().read_line(&mut line) {
                Ok(0) | Err(_) => return None,
                Ok(_) => {}
            }

            match parse_choice(&line, matches.len()) {
                Choice::Pick(i) => return Some(i),
                Choice::Quit => return None,
                Choice::Invalid => {
                    log::warn!("Enter a number between 1 and {}", matches.len());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_choice() {
        assert_eq!(parse_choice("1\n", 3), Choice::Pick(0));
        assert_eq!(parse_choice(" 3 ", 3), Choice::Pick(2));
        assert_eq!(parse_choice("4", 3), Choice::Invalid);
        assert_eq!(parse_choice("0", 3), Choice::Invalid);
        assert_eq!(parse_choice("two", 3), Choice::Invalid);
        assert_eq!(parse_choice("", 3), Choice::Quit);
        assert_eq!(parse_choice("Q\n", 3), Choice::Quit);
    }

    #[test]
    fn test_single_match_needs_no_prompt() {
        let m = NameMatch {
            app_id: 570,
            name: "Dota 2".into(),
            similarity: 1.0,
        };
        assert_eq!(TerminalPicker.pick(&[m]), Some(0));
    }
}
