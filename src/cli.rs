use std::path::PathBuf;

use clap::{Parser, Subcommand};

#[derive(Parser, Debug)]
#[command(name = "mediscribe", version)]
#[command(about = "Medical transcription client for the MediScribe AI backend")]
pub struct Cli {
    /// Enable debug logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Override the backend base URL for this invocation
    #[arg(long, global = true, value_name = "URL")]
    pub api_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Upload an audio file for transcription and analysis
    Transcribe {
        /// Audio file (mp3, wav, m4a, webm, ogg, or flac)
        file: PathBuf,

        /// Print the raw JSON response instead of formatted output
        #[arg(long)]
        json: bool,

        /// Do not record this result in history
        #[arg(long)]
        no_history: bool,
    },

    /// Manage past transcription results
    History {
        #[command(subcommand)]
        command: HistoryCommands,
    },

    /// Check that the backend is reachable
    Health,

    /// Show or update client configuration
    Config {
        /// Print the current configuration
        #[arg(long)]
        show: bool,

        /// Set the backend base URL
        #[arg(long, value_name = "URL")]
        set_api_url: Option<String>,

        /// Set the directory holding the local database
        #[arg(long, value_name = "DIR")]
        set_data_dir: Option<String>,

        /// Flip the stored dark mode preference
        #[arg(long)]
        toggle_dark_mode: bool,
    },
}

#[derive(Subcommand, Debug)]
pub enum HistoryCommands {
    /// List stored transcriptions, most recent first
    List {
        /// Print entries as JSON
        #[arg(long)]
        json: bool,
    },

    /// Reload and display one stored transcription
    Show {
        /// Entry id, as printed by `history list`
        id: String,
    },

    /// Delete one stored transcription
    Delete {
        /// Entry id, as printed by `history list`
        id: String,
    },

    /// Delete all stored transcriptions
    Clear {
        /// Skip the confirmation prompt
        #[arg(long)]
        yes: bool,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_transcribe_with_flags() {
        let cli = Cli::try_parse_from(["mediscribe", "transcribe", "visit.mp3", "--no-history"])
            .expect("parse");
        match cli.command {
            Commands::Transcribe {
                file,
                json,
                no_history,
            } => {
                assert_eq!(file, PathBuf::from("visit.mp3"));
                assert!(!json);
                assert!(no_history);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn parses_history_subcommands() {
        let cli = Cli::try_parse_from(["mediscribe", "history", "delete", "123-abc"])
            .expect("parse");
        match cli.command {
            Commands::History {
                command: HistoryCommands::Delete { id },
            } => assert_eq!(id, "123-abc"),
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn global_api_url_override() {
        let cli = Cli::try_parse_from([
            "mediscribe",
            "health",
            "--api-url",
            "http://example.test:9000",
        ])
        .expect("parse");
        assert_eq!(cli.api_url.as_deref(), Some("http://example.test:9000"));
    }
}
