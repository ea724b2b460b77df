//! domaudit CLI - audit HTML files and directories for accessibility
//! issues.

use clap::{Parser, Subcommand, ValueEnum};
use domaudit::report::{generate_report, OutputFormat};
use domaudit::scanner;
use domaudit::verdict::RuleId;
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

/// WCAG-style accessibility auditor for HTML documents
#[derive(Parser)]
#[command(name = "domaudit")]
#[command(version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Audit a single HTML file
    Check {
        /// File to audit
        file: PathBuf,

        /// Run only these rules (default: all)
        #[arg(long, value_delimiter = ',')]
        rule: Vec<RuleArg>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Audit every HTML file under a directory
    Scan {
        /// Directory to scan
        dir: PathBuf,

        /// Run only these rules (default: all)
        #[arg(long, value_delimiter = ',')]
        rule: Vec<RuleArg>,

        /// Output format
        #[arg(long, default_value = "text")]
        format: FormatArg,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },

    /// Generate a SARIF report for a directory
    Report {
        /// Directory to scan
        dir: PathBuf,

        /// Output file (stdout if not specified)
        #[arg(long)]
        output: Option<PathBuf>,

        /// Enable verbose logging
        #[arg(long, short)]
        verbose: bool,
    },
}

/// Rule selection CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum RuleArg {
    /// Image alternative text
    Images,
    /// Background-image alternative text
    BgImages,
    /// Table structure
    Tables,
    /// Focus visibility
    Focus,
    /// Skip-navigation links
    SkipNav,
    /// Document title
    PageTitle,
    /// Frame titles
    Frames,
    /// Heading inventory
    Headings,
    /// Page language
    PageLang,
    /// Announced popups
    UserRequest,
    /// Form labels
    InputLabels,
    /// ARIA widget patterns
    Widgets,
}

impl From<RuleArg> for RuleId {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::Images => RuleId::Images,
            RuleArg::BgImages => RuleId::BgImages,
            RuleArg::Tables => RuleId::Tables,
            RuleArg::Focus => RuleId::Focus,
            RuleArg::SkipNav => RuleId::SkipNav,
            RuleArg::PageTitle => RuleId::PageTitle,
            RuleArg::Frames => RuleId::Frames,
            RuleArg::Headings => RuleId::Headings,
            RuleArg::PageLang => RuleId::PageLang,
            RuleArg::UserRequest => RuleId::UserRequest,
            RuleArg::InputLabels => RuleId::InputLabels,
            RuleArg::Widgets => RuleId::Widgets,
        }
    }
}

/// Output format CLI argument
#[derive(Debug, Clone, Copy, ValueEnum)]
enum FormatArg {
    /// Human-readable text
    Text,
    /// Structured JSON
    Json,
    /// SARIF for IDE/CI
    Sarif,
}

impl From<FormatArg> for OutputFormat {
    fn from(arg: FormatArg) -> Self {
        match arg {
            FormatArg::Text => OutputFormat::Text,
            FormatArg::Json => OutputFormat::Json,
            FormatArg::Sarif => OutputFormat::Sarif,
        }
    }
}

fn init_logging(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("domaudit=debug")
    } else {
        EnvFilter::new("domaudit=warn")
    };

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .init();
}

fn selected_rules(rules: &[RuleArg]) -> Vec<RuleId> {
    if rules.is_empty() {
        RuleId::ALL.to_vec()
    } else {
        rules.iter().map(|r| RuleId::from(*r)).collect()
    }
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Check { file, rule, format, output, verbose } => {
            init_logging(verbose);
            let audit = scanner::scan_file(&file, &selected_rules(&rule))?;
            let report = generate_report(&audit, format.into());
            write_output(&report, output.as_deref())?;

            if audit.has_failures() {
                std::process::exit(1);
            }
        }

        Commands::Scan { dir, rule, format, output, verbose } => {
            init_logging(verbose);
            let audit = scanner::scan_directory(&dir, &selected_rules(&rule))?;
            let report = generate_report(&audit, format.into());
            write_output(&report, output.as_deref())?;

            if audit.has_failures() {
                std::process::exit(1);
            }
        }

        Commands::Report { dir, output, verbose } => {
            init_logging(verbose);
            let audit = scanner::scan_directory(&dir, RuleId::ALL)?;
            let report = generate_report(&audit, OutputFormat::Sarif);
            write_output(&report, output.as_deref())?;
        }
    }

    Ok(())
}

/// Write output to file or stdout
fn write_output(content: &str, path: Option<&std::path::Path>) -> anyhow::Result<()> {
    match path {
        Some(p) => {
            std::fs::write(p, content)?;
            eprintln!("Report written to {}", p.display());
        }
        None => {
            println!("{}", content);
        }
    }
    Ok(())
}
