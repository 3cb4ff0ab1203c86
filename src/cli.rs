//! Command-line interface for emoji_tictactoe.

use clap::Parser;
use std::path::PathBuf;

/// Emoji Tic-Tac-Toe - play in the terminal against a friend or the AI
#[derive(Parser, Debug)]
#[command(name = "emoji_tictactoe")]
#[command(about = "Emoji tic-tac-toe for the terminal", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Path to the TOML config file (defaults apply if it does not exist)
    #[arg(short, long, default_value = "tictactoe.toml")]
    pub config: PathBuf,

    /// Seed for the AI's random choices (overrides the config file)
    #[arg(long)]
    pub seed: Option<u64>,

    /// Disable the terminal bell on moves
    #[arg(long)]
    pub mute: bool,

    /// File that receives the log output
    #[arg(long, default_value = "emoji_tictactoe.log")]
    pub log_file: PathBuf,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let cli = Cli::parse_from(["emoji_tictactoe"]);
        assert_eq!(cli.config, PathBuf::from("tictactoe.toml"));
        assert_eq!(cli.seed, None);
        assert!(!cli.mute);
        assert_eq!(cli.log_file, PathBuf::from("emoji_tictactoe.log"));
    }

    #[test]
    fn test_flags() {
        let cli = Cli::parse_from(["emoji_tictactoe", "--seed", "42", "--mute", "-c", "x.toml"]);
        assert_eq!(cli.seed, Some(42));
        assert!(cli.mute);
        assert_eq!(cli.config, PathBuf::from("x.toml"));
    }
}
