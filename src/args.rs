//! Command-line arguments of the terminal front end.

use std::env;
use std::path::PathBuf;

use invaders::Difficulty;

#[derive(Debug)]
pub struct CliArgs {
    /// One or two players
    pub players: usize,
    /// Tier to start with; `None` shows the menu
    pub difficulty: Option<Difficulty>,
    /// JSON settings table replacing the built-in one
    pub settings_path: Option<PathBuf>,
    pub show_help: bool,
}

impl Default for CliArgs {
    fn default() -> Self {
        Self {
            players: 1,
            difficulty: None,
            settings_path: None,
            show_help: false,
        }
    }
}

impl CliArgs {
    pub fn parse() -> Self {
        Self::parse_from(env::args().skip(1))
    }

    fn parse_from<I: Iterator<Item = String>>(mut iter: I) -> Self {
        let mut args = Self::default();

        while let Some(arg) = iter.next() {
            let (flag, inline) = match arg.split_once('=') {
                Some((flag, value)) if flag.starts_with("--") => {
                    (flag.to_string(), Some(value.to_string()))
                }
                _ => (arg.clone(), None),
            };

            match flag.as_str() {
                "--help" | "-h" => args.show_help = true,
                "--players" | "-p" => match inline.or_else(|| iter.next()) {
                    Some(value) => match value.parse::<usize>() {
                        Ok(n @ 1..=2) => args.players = n,
                        _ => {
                            eprintln!("--players must be 1 or 2, got {}", value);
                            args.show_help = true;
                        }
                    },
                    None => {
                        eprintln!("--players requires an argument (1 or 2)");
                        args.show_help = true;
                    }
                },
                "--difficulty" | "-d" => match inline.or_else(|| iter.next()) {
                    Some(value) => match Difficulty::from_str(&value) {
                        Some(difficulty) => args.difficulty = Some(difficulty),
                        None => {
                            eprintln!("Unknown difficulty: {}", value);
                            args.show_help = true;
                        }
                    },
                    None => {
                        eprintln!("--difficulty requires an argument (easy, normal, hard)");
                        args.show_help = true;
                    }
                },
                "--settings" => match inline.or_else(|| iter.next()) {
                    Some(value) => args.settings_path = Some(PathBuf::from(value)),
                    None => {
                        eprintln!("--settings requires a file path");
                        args.show_help = true;
                    }
                },
                _ => {
                    eprintln!("Unknown argument: {}", arg);
                    args.show_help = true;
                }
            }
        }

        args
    }

    pub fn print_help() {
        eprintln!(
            "Usage:\n  invaders [--players <1|2>] [--difficulty <tier>] [--settings <file.json>]\n\n\
             Flags:\n\
             \x20 -p, --players <n>        Number of players (default 1)\n\
             \x20 -d, --difficulty <tier>  easy, normal or hard; skips the menu\n\
             \x20     --settings <file>    Load level settings from a JSON table\n\
             \x20 -h, --help               Show this help\n\n\
             Keys:\n\
             \x20 Player 1: A / D move, SPACE shoots\n\
             \x20 Player 2: LEFT / RIGHT move, / shoots\n\
             \x20 ESC pauses, R resumes, Q quits"
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(args: &[&str]) -> CliArgs {
        CliArgs::parse_from(args.iter().map(|s| s.to_string()))
    }

    #[test]
    fn defaults_to_single_player_with_menu() {
        let args = parse(&[]);
        assert_eq!(args.players, 1);
        assert_eq!(args.difficulty, None);
        assert!(!args.show_help);
    }

    #[test]
    fn accepts_separate_and_inline_values() {
        let args = parse(&["--players", "2", "--difficulty=hard", "--settings", "t.json"]);
        assert_eq!(args.players, 2);
        assert_eq!(args.difficulty, Some(Difficulty::Hard));
        assert_eq!(args.settings_path, Some(PathBuf::from("t.json")));
    }

    #[test]
    fn rejects_three_players() {
        let args = parse(&["-p", "3"]);
        assert_eq!(args.players, 1);
        assert!(args.show_help);
    }
}
