pub mod adapters;
pub mod app;
pub mod config;
pub mod core;
pub mod domain;
pub mod utils;

#[cfg(feature = "cli")]
pub use config::{CliConfig, Command};

pub use adapters::soap::SoapClient;
pub use config::toml_config::ReportingConfig;
pub use core::reporting::Reporting;
pub use domain::model::{PortalReportQuery, Record, ReportCount, ReportQuery, SoapFault};
pub use domain::params::{ParamValue, RequestParams};
pub use domain::ports::SoapTransport;
pub use utils::error::{ReportingError, Result};
