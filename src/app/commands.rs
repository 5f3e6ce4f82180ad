use crate::config::Command;
use crate::core::reporting::Reporting;
use crate::core::{Record, SoapTransport};
use crate::domain::model::{PortalReportQuery, ReportCount, ReportQuery};
use crate::utils::error::Result;

/// Runs one CLI subcommand against the Reporting API.
pub async fn execute<T: SoapTransport>(reporting: &Reporting<T>, command: &Command) -> Result<Vec<Record>> {
    tracing::debug!("Executing {:?}", command);

    let records = match command {
        Command::Reports { no_fields } => reporting.get_reports(!*no_fields).await?,
        Command::Fields { report } => reporting.get_report_fields(report).await?,
        Command::PortalReports => reporting.get_portal_reports().await?,
        Command::PortalRun {
            report,
            limit,
            skip,
            conditions,
            order_by,
        } => {
            let query = PortalReportQuery::new(report)
                .limit(*limit)
                .skip(*skip)
                .conditions(conditions)
                .order_by(order_by);
            reporting.run_portal_report(query).await?
        }
        Command::Count { report, conditions } => {
            reporting
                .run_report_count(ReportCount::new(report).conditions(conditions))
                .await?
        }
        Command::Query {
            report,
            limit,
            skip,
            conditions,
            order_by,
        } => {
            let query = ReportQuery::new(report)
                .limit(*limit)
                .skip(*skip)
                .conditions(conditions)
                .order_by(order_by);
            reporting.run_report_query(query).await?
        }
    };

    tracing::info!("✅ {} record(s) returned", records.len());
    Ok(records)
}
