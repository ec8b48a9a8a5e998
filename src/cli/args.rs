//! CLI argument definitions.

use crate::cli::validators::{parse_input_size, parse_threshold};
use crate::config::OutputFormat;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Bird species identification from photos using ONNX image classifiers.
#[derive(Debug, Parser)]
#[command(name = "specid")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Image files or directories to identify.
    pub inputs: Vec<PathBuf>,

    /// Common options for identification.
    #[command(flatten)]
    pub analyze: AnalyzeArgs,

    /// Path to the configuration file.
    #[arg(long, global = true, env = "SPECID_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase verbosity (-v: debug, -vv: trace+ORT info, -vvv: trace everything).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Only log warnings and errors.
    #[arg(short, long, global = true, conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Available subcommands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Manage configuration.
    Config {
        /// Configuration action to perform.
        #[command(subcommand)]
        action: ConfigAction,
    },
    /// Manage models.
    Models {
        /// Models action to perform.
        #[command(subcommand)]
        action: ModelsAction,
    },
    /// Show information about the classifier and its training data.
    About,
    /// Show how to identify a bird photo.
    Instructions,
}

/// Config subcommand actions.
#[derive(Debug, Clone, Copy, Subcommand)]
pub enum ConfigAction {
    /// Create default configuration file.
    Init,
    /// Display current configuration.
    Show,
    /// Print configuration file path.
    Path,
}

/// Models subcommand actions.
#[derive(Debug, Subcommand)]
pub enum ModelsAction {
    /// List configured models.
    List,
    /// Add a new model to configuration.
    Add {
        /// Name for this model (e.g., "cub200").
        name: String,
        /// Path to the ONNX model file.
        #[arg(long)]
        path: PathBuf,
        /// Path to the labels file (one species per line).
        #[arg(long)]
        labels: PathBuf,
        /// Square input edge length expected by the model.
        #[arg(long, value_parser = parse_input_size)]
        input_size: Option<u32>,
        /// The model already outputs probabilities; skip softmax.
        #[arg(long)]
        no_softmax: bool,
        /// Set as the default model.
        #[arg(long)]
        default: bool,
    },
    /// Verify model files exist and are valid.
    Check,
}

/// Arguments for identifying images.
#[derive(Debug, Args)]
pub struct AnalyzeArgs {
    /// Model name from configuration.
    #[arg(short, long, env = "SPECID_MODEL")]
    pub model: Option<String>,

    /// Output format (text, json, csv).
    #[arg(short, long, env = "SPECID_FORMAT")]
    pub format: Option<OutputFormat>,

    /// Write results to a file instead of stdout.
    #[arg(short, long, env = "SPECID_OUTPUT")]
    pub output: Option<PathBuf>,

    /// Confidence a top guess must exceed to be shown alone (0.0-1.0).
    #[arg(long, value_parser = parse_threshold, env = "SPECID_THRESHOLD")]
    pub threshold: Option<f32>,

    /// Do not highlight species names in text output.
    #[arg(long)]
    pub no_bold: bool,

    /// Do not show a progress bar.
    #[arg(long)]
    pub no_progress: bool,

    /// Stop on first error.
    #[arg(long)]
    pub fail_fast: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp, clippy::panic)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parse_simple() {
        let cli = Cli::try_parse_from(["specid", "pelican.jpg"]).unwrap();
        assert_eq!(cli.inputs, vec![PathBuf::from("pelican.jpg")]);
        assert!(cli.command.is_none());
    }

    #[test]
    fn test_cli_parse_with_options() {
        let cli = Cli::try_parse_from([
            "specid",
            "birds/",
            "-m",
            "cub200",
            "-f",
            "json",
            "--threshold",
            "0.5",
            "--no-bold",
            "-vv",
        ])
        .unwrap();
        assert_eq!(cli.analyze.model, Some("cub200".to_string()));
        assert_eq!(cli.analyze.format, Some(OutputFormat::Json));
        assert_eq!(cli.analyze.threshold, Some(0.5));
        assert!(cli.analyze.no_bold);
        assert_eq!(cli.verbose, 2);
    }

    #[test]
    fn test_cli_rejects_bad_threshold() {
        assert!(Cli::try_parse_from(["specid", "a.jpg", "--threshold", "2"]).is_err());
    }

    #[test]
    fn test_cli_quiet_conflicts_with_verbose() {
        assert!(Cli::try_parse_from(["specid", "a.jpg", "-q", "-v"]).is_err());
    }

    #[test]
    fn test_cli_parse_config_subcommand() {
        let cli = Cli::try_parse_from(["specid", "config", "path", "--config", "/tmp/c.toml"])
            .unwrap();
        assert!(matches!(
            cli.command,
            Some(Command::Config {
                action: ConfigAction::Path
            })
        ));
        assert_eq!(cli.config, Some(PathBuf::from("/tmp/c.toml")));
    }

    #[test]
    fn test_cli_parse_models_add() {
        let cli = Cli::try_parse_from([
            "specid",
            "models",
            "add",
            "cub200",
            "--path",
            "model.onnx",
            "--labels",
            "labels.txt",
            "--input-size",
            "299",
            "--default",
        ])
        .unwrap();
        match cli.command {
            Some(Command::Models {
                action:
                    ModelsAction::Add {
                        name,
                        input_size,
                        no_softmax,
                        default,
                        ..
                    },
            }) => {
                assert_eq!(name, "cub200");
                assert_eq!(input_size, Some(299));
                assert!(!no_softmax);
                assert!(default);
            }
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn test_cli_parse_about() {
        let cli = Cli::try_parse_from(["specid", "about"]).unwrap();
        assert!(matches!(cli.command, Some(Command::About)));
    }
}
