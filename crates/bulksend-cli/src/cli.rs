//! CLI argument definitions.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

#[derive(Parser)]
#[command(
    name = "bulksend",
    version,
    about = "Prepare CSV contact lists for bulk template broadcasts",
    long_about = "Prepare CSV contact lists for bulk WhatsApp template broadcasts.\n\n\
                  Suggests a column mapping for a contacts file, turns mapped rows into\n\
                  a send-ready recipient payload, and previews template messages."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,

    /// Allow contact data (phone numbers, names) in trace logs.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// Suggest a column mapping for a contacts CSV.
    Map(MapArgs),

    /// Turn a contacts CSV into a broadcast recipient payload.
    Transform(TransformArgs),

    /// Render a template with sample parameter values.
    Preview(PreviewArgs),
}

#[derive(Args)]
pub struct MapArgs {
    /// Contacts CSV with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Template file; slot counts are read from its placeholders.
    #[arg(long = "template", value_name = "FILE", conflicts_with_all = ["header", "body", "button"])]
    pub template: Option<PathBuf>,

    /// Number of header parameters.
    #[arg(long = "header", value_name = "N", default_value_t = 0)]
    pub header: usize,

    /// Number of body parameters.
    #[arg(long = "body", value_name = "N", default_value_t = 0)]
    pub body: usize,

    /// Number of button parameters.
    #[arg(long = "button", value_name = "N", default_value_t = 0)]
    pub button: usize,

    /// Extra contact attribute to match, as KEY or KEY=LABEL (repeatable).
    #[arg(long = "custom", value_name = "KEY[=LABEL]")]
    pub custom: Vec<String>,

    /// Matches scoring below this are only suggested.
    #[arg(long = "min-confidence", value_name = "SCORE")]
    pub min_confidence: Option<f64>,

    /// Disable fuzzy (edit distance) matching.
    #[arg(long = "no-fuzzy")]
    pub no_fuzzy: bool,

    /// Match fields in the given order instead of required fields first.
    #[arg(long = "no-prioritize-required")]
    pub no_prioritize_required: bool,

    /// Only commit exact, normalized and alias matches.
    #[arg(long = "strict", conflicts_with = "relaxed")]
    pub strict: bool,

    /// Commit weaker fuzzy matches too.
    #[arg(long = "relaxed")]
    pub relaxed: bool,

    /// Output format for the result.
    #[arg(long = "format", value_enum, default_value = "table")]
    pub format: ReportFormatArg,

    /// Save the mapping as a profile usable with `transform --mapping`.
    #[arg(long = "save", value_name = "FILE")]
    pub save: Option<PathBuf>,
}

#[derive(Args)]
pub struct TransformArgs {
    /// Contacts CSV with a header row.
    #[arg(value_name = "CSV")]
    pub csv: PathBuf,

    /// Mapping profile JSON (as written by `map --save`).
    #[arg(long = "mapping", value_name = "FILE")]
    pub mapping: PathBuf,

    /// Template identifier to include in the payload.
    #[arg(long = "template-id", value_name = "ID")]
    pub template_id: Option<String>,

    /// Leave rows with errors out of the payload.
    #[arg(long = "skip-invalid")]
    pub skip_invalid: bool,

    /// Do not check phone numbers.
    #[arg(long = "no-validate-phone")]
    pub no_validate_phone: bool,

    /// Do not require body parameter values.
    #[arg(long = "no-validate-params")]
    pub no_validate_params: bool,

    /// Write the payload here instead of stdout.
    #[arg(long = "output", short = 'o', value_name = "FILE")]
    pub output: Option<PathBuf>,
}

#[derive(Args)]
pub struct PreviewArgs {
    /// Template file (JSON with `body`, optional `header` and `buttons`).
    #[arg(long = "template", value_name = "FILE")]
    pub template: PathBuf,

    /// Treat parameters as NAME=VALUE pairs for named placeholders.
    #[arg(long = "named")]
    pub named: bool,

    /// Parameter values in placeholder order (or NAME=VALUE with --named).
    #[arg(value_name = "PARAM")]
    pub params: Vec<String>,
}

#[derive(Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormatArg {
    Table,
    Json,
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}
