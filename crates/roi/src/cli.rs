//! Clap CLI definitions for the `roi` command.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

/// roi -- Automation ROI calculator.
///
/// Estimates hours saved, freed full-time-equivalents and efficiency gain
/// for automating business process steps.
#[derive(Parser, Debug)]
#[command(
    name = "roi",
    about = "Automation ROI calculator",
    long_about = "Estimates hours saved, freed full-time-equivalents (FTE) and efficiency gain for automating business process steps. Run without a subcommand to start the interactive shell.",
    version,
    propagate_version = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalArgs,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Global flags available to all subcommands.
#[derive(Args, Debug, Clone)]
pub struct GlobalArgs {
    /// Config file path (default: ./roi.yaml if present).
    #[arg(long, global = true, env = "ROI_CONFIG")]
    pub config: Option<PathBuf>,

    /// Output in JSON format.
    #[arg(long, global = true)]
    pub json: bool,

    /// Enable verbose/debug output.
    #[arg(short = 'v', long, global = true)]
    pub verbose: bool,

    /// Suppress non-essential output (errors only).
    #[arg(short = 'q', long, global = true)]
    pub quiet: bool,
}

/// All available subcommands.
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the interactive menu (default).
    Shell,

    /// Compute ROI for a single step.
    #[command(alias = "calculate")]
    Calc(CalcArgs),

    /// Compute a report for every step in a YAML or JSON file.
    Report(ReportArgs),

    /// Show or initialize configuration.
    Config(ConfigArgs),

    /// Generate shell completion scripts.
    Completion(CompletionArgs),

    /// Print version information.
    Version,
}

// ---------------------------------------------------------------------------
// Calc
// ---------------------------------------------------------------------------

/// Arguments for `roi calc`.
#[derive(Args, Debug)]
pub struct CalcArgs {
    /// Step name.
    pub name: String,

    /// Occurrences per week.
    #[arg(short = 'f', long, allow_negative_numbers = true)]
    pub frequency: f64,

    /// Manual minutes per occurrence before automation.
    #[arg(short = 'm', long, allow_negative_numbers = true)]
    pub manual: f64,

    /// Minutes to review a successful automated result.
    #[arg(short = 'r', long, default_value_t = 0.0, allow_negative_numbers = true)]
    pub review: f64,

    /// Automated results can fail and need a manual fix.
    #[arg(short = 'e', long)]
    pub error_path: bool,

    /// Accuracy percentage 0-100 (implies --error-path).
    #[arg(short = 'a', long, allow_negative_numbers = true)]
    pub accuracy: Option<f64>,

    /// Minutes to fix a failed automated result (implies --error-path).
    #[arg(long, allow_negative_numbers = true)]
    pub fix: Option<f64>,
}

// ---------------------------------------------------------------------------
// Report
// ---------------------------------------------------------------------------

/// Arguments for `roi report`.
#[derive(Args, Debug)]
pub struct ReportArgs {
    /// Steps file (YAML or JSON): a list of steps, or a map with a `steps` list.
    pub file: PathBuf,

    /// Also export the report as CSV to this path.
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Omit the UTF-8 byte order mark from the CSV export.
    #[arg(long)]
    pub no_bom: bool,
}

// ---------------------------------------------------------------------------
// Config
// ---------------------------------------------------------------------------

/// Arguments for `roi config`.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

/// Config subcommands.
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print the effective configuration as YAML.
    Show,

    /// Write a default config file.
    Init(ConfigInitArgs),
}

/// Arguments for `roi config init`.
#[derive(Args, Debug)]
pub struct ConfigInitArgs {
    /// Where to write the file (default: ./roi.yaml).
    #[arg(long)]
    pub path: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    pub force: bool,
}

// ---------------------------------------------------------------------------
// Completion
// ---------------------------------------------------------------------------

/// Arguments for `roi completion`.
#[derive(Args, Debug)]
pub struct CompletionArgs {
    #[command(subcommand)]
    pub command: CompletionCommands,
}

/// Completion subcommands.
#[derive(Subcommand, Debug)]
pub enum CompletionCommands {
    /// Generate Bash completions.
    Bash,
    /// Generate Zsh completions.
    Zsh,
    /// Generate Fish completions.
    Fish,
    /// Generate PowerShell completions.
    Powershell,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn calc_parses_error_path_flags() {
        let cli = Cli::try_parse_from([
            "roi", "calc", "Invoices", "-f", "100", "-m", "10", "-r", "2", "-a", "90", "--fix",
            "15",
        ])
        .unwrap();
        match cli.command {
            Some(Commands::Calc(args)) => {
                assert_eq!(args.name, "Invoices");
                assert_eq!(args.frequency, 100.0);
                assert_eq!(args.accuracy, Some(90.0));
                assert_eq!(args.fix, Some(15.0));
                assert!(!args.error_path);
            }
            other => panic!("expected calc, got {:?}", other),
        }
    }

    #[test]
    fn calc_accepts_negative_numbers() {
        let cli = Cli::try_parse_from(["roi", "calc", "x", "-f", "-1", "-m", "10"]).unwrap();
        match cli.command {
            Some(Commands::Calc(args)) => assert_eq!(args.frequency, -1.0),
            other => panic!("expected calc, got {:?}", other),
        }
    }
}
