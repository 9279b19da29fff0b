// Command-line arguments
use crate::infrastructure::config::DEFAULT_CONFIG_PATH;
use clap::Parser;
use std::path::PathBuf;

/// Soft sensor inference demo: synthetic data, RON prediction and audit trail
#[derive(Parser, Debug)]
#[command(name = "soft-sensor-demo")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Number of samples to generate
    #[arg(short = 'n', long = "samples", default_value_t = 100)]
    pub samples: usize,

    /// Output directory
    #[arg(short, long, default_value = "./output")]
    pub output: PathBuf,

    /// Verbose output (debug logs and sample predictions)
    #[arg(short, long)]
    pub verbose: bool,

    /// Only log errors
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,

    /// Settings file, extension optional
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: String,

    /// JSON model configuration (defaults to the baseline model)
    #[arg(short, long)]
    pub model: Option<PathBuf>,

    /// Seed for the data generator; overrides the settings file
    #[arg(long)]
    pub seed: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_defaults() {
        let cli = Cli::try_parse_from(["soft-sensor-demo"]).unwrap();
        assert_eq!(cli.samples, 100);
        assert_eq!(cli.output, PathBuf::from("./output"));
        assert!(!cli.verbose);
        assert_eq!(cli.config, "config/pipeline");
        assert_eq!(cli.model, None);
        assert_eq!(cli.seed, None);
    }

    #[test]
    fn test_short_flags() {
        let cli = Cli::try_parse_from([
            "soft-sensor-demo",
            "-n",
            "20",
            "-o",
            "/tmp/run",
            "-v",
            "--seed",
            "7",
        ])
        .unwrap();
        assert_eq!(cli.samples, 20);
        assert_eq!(cli.output, PathBuf::from("/tmp/run"));
        assert!(cli.verbose);
        assert_eq!(cli.seed, Some(7));
    }

    #[test]
    fn test_verbose_and_quiet_conflict() {
        assert!(Cli::try_parse_from(["soft-sensor-demo", "-v", "-q"]).is_err());
    }
}
