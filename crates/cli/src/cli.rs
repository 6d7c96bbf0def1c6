use crate::tracing::{LogLevel, TracingFormat};
use cicd_component::DEFAULT_DEFINITION_FILE;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "cicd")]
#[command(about = "Compile one pipeline definition into GitHub Actions and GitLab CI files")]
#[command(long_about = None)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(
        short = 'l',
        long,
        global = true,
        help = "Set logging level",
        default_value = "warn",
        value_enum
    )]
    pub log_level: LogLevel,

    #[arg(
        long,
        global = true,
        help = "Log output format",
        default_value = "compact",
        value_enum
    )]
    pub log_format: TracingFormat,

    #[arg(
        long,
        global = true,
        help = "Tracing filter directive, e.g. cicd_gitlab=trace (overrides --log-level and RUST_LOG)"
    )]
    pub log_filter: Option<String>,
}

#[derive(Subcommand, Debug, PartialEq, Eq)]
pub enum Commands {
    #[command(about = "Generate workflow files from the pipeline definition")]
    Compile {
        #[arg(long, short = 'c', help = "Pipeline definition file", default_value = DEFAULT_DEFINITION_FILE)]
        config: PathBuf,
        #[arg(long, short = 'o', help = "Repository root to write into", default_value = ".")]
        output: PathBuf,
        #[arg(long, help = "Report what would change without writing")]
        dry_run: bool,
    },
    #[command(about = "Fail if generated files are missing or out of date")]
    Check {
        #[arg(long, short = 'c', help = "Pipeline definition file", default_value = DEFAULT_DEFINITION_FILE)]
        config: PathBuf,
        #[arg(long, short = 'o', help = "Repository root to compare against", default_value = ".")]
        output: PathBuf,
    },
    #[command(about = "Validate the pipeline definition without writing")]
    Validate {
        #[arg(long, short = 'c', help = "Pipeline definition file", default_value = DEFAULT_DEFINITION_FILE)]
        config: PathBuf,
    },
}

pub fn parse() -> Cli {
    Cli::parse()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_default_values() {
        let cli = Cli::try_parse_from(["cicd", "validate"]).unwrap();

        assert_eq!(cli.log_level, LogLevel::Warn);
        assert_eq!(cli.log_format, TracingFormat::Compact);
        assert_eq!(cli.log_filter, None);
        assert_eq!(
            cli.command,
            Commands::Validate {
                config: PathBuf::from("cicd.yaml")
            }
        );
    }

    #[test]
    fn test_compile_flags() {
        let cli = Cli::try_parse_from([
            "cicd",
            "compile",
            "--config",
            "ci/pipeline.toml",
            "-o",
            "out",
            "--dry-run",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::Compile {
                config: PathBuf::from("ci/pipeline.toml"),
                output: PathBuf::from("out"),
                dry_run: true,
            }
        );
    }

    #[test]
    fn test_global_logging_flags_after_subcommand() {
        let cli =
            Cli::try_parse_from(["cicd", "check", "--log-level", "debug", "--log-format", "json"])
                .unwrap();
        assert_eq!(cli.log_level, LogLevel::Debug);
        assert_eq!(cli.log_format, TracingFormat::Json);
    }

    #[test]
    fn test_log_filter_flag() {
        let cli = Cli::try_parse_from(["cicd", "compile", "--log-filter", "cicd_gitlab=trace"])
            .unwrap();
        assert_eq!(cli.log_filter.as_deref(), Some("cicd_gitlab=trace"));
    }

    #[test]
    fn test_unknown_log_format_rejected() {
        assert!(Cli::try_parse_from(["cicd", "--log-format", "xml", "validate"]).is_err());
    }
}
