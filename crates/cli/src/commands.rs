use crate::output::OutputFormat;
use clap::Subcommand;
use std::path::PathBuf;

#[derive(Subcommand)]
pub enum Commands {
    /// List the available reports
    List,

    /// Run a report and print its result
    Run {
        #[arg(short, long, help = "Report name, as printed by `list`")]
        report: String,

        #[arg(
            short,
            long = "filter",
            value_name = "KEY=VALUE",
            help = "Filter to apply; repeatable. `(All)` or an empty value disables it"
        )]
        filters: Vec<String>,

        #[arg(long, value_enum, default_value_t = OutputFormat::Table)]
        output_format: OutputFormat,

        #[arg(
            long,
            help = "If specified, writes the result to this file instead of stdout"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_name = "SECS", help = "Per-query timeout in seconds")]
        timeout: Option<u64>,
    },

    /// Run a report and save it as CSV
    Export {
        #[arg(short, long, help = "Report name, as printed by `list`")]
        report: String,

        #[arg(short, long = "filter", value_name = "KEY=VALUE")]
        filters: Vec<String>,

        #[arg(
            long,
            help = "Target file; defaults to the report name in snake case with a .csv extension"
        )]
        output: Option<PathBuf>,

        #[arg(long, value_name = "SECS", help = "Per-query timeout in seconds")]
        timeout: Option<u64>,
    },

    /// List filter names, or the values available for one filter
    Filters {
        #[arg(short, long, help = "Filter name to list values for")]
        key: Option<String>,
    },

    /// Print the overview reports
    Dashboard,

    /// Test the configured connection
    TestConn,
}
