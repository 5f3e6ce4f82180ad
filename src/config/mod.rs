pub mod toml_config;

#[cfg(feature = "cli")]
use clap::{Parser, Subcommand};

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Parser)]
#[command(name = "psa-reporting")]
#[command(about = "Query the ConnectWise PSA Reporting API")]
pub struct CliConfig {
    #[arg(long, default_value = "psa-reporting.toml")]
    pub config: String,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, help = "Print records as single-line JSON")]
    pub compact: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[cfg(feature = "cli")]
#[derive(Debug, Clone, PartialEq, Subcommand)]
pub enum Command {
    /// List available reports
    Reports {
        #[arg(long, help = "Omit field metadata")]
        no_fields: bool,
    },
    /// List the fields of a report
    Fields { report: String },
    /// List reports visible on the customer portal
    PortalReports,
    /// Run a portal report
    PortalRun {
        #[arg(long, default_value = "")]
        report: String,
        #[arg(long, default_value_t = 100)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        skip: i64,
        #[arg(long, default_value = "")]
        conditions: String,
        #[arg(long, default_value = "")]
        order_by: String,
    },
    /// Count the rows a report would return
    Count {
        report: String,
        #[arg(long, default_value = "")]
        conditions: String,
    },
    /// Run a report query
    Query {
        report: String,
        #[arg(long, default_value_t = 100)]
        limit: i64,
        #[arg(long, default_value_t = 0)]
        skip: i64,
        #[arg(long, default_value = "")]
        conditions: String,
        #[arg(long, default_value = "")]
        order_by: String,
    },
}
