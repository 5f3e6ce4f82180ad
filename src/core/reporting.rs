use crate::adapters::soap::{SoapClient, REPORTING_API};
use crate::config::toml_config::ReportingConfig;
use crate::core::normalize::{flatten_result_row, normalize, normalize_nested};
use crate::domain::model::{PortalReportQuery, Record, ReportCount, ReportQuery};
use crate::domain::params::{ParamValue, RequestParams};
use crate::domain::ports::SoapTransport;
use crate::utils::error::{ReportingError, Result};
use crate::utils::validation::{expect_bool, expect_numeric, expect_string, Validate};
use serde_json::Value;

const INCLUDE_FIELDS_NOT_BOOL: &str = "Include fields parameter must be boolean.";
const REPORT_NAME_NOT_STRING: &str = "Report name must be a string.";
const LIMIT_NOT_NUMERIC: &str = "Limit value must be numeric.";
const SKIP_NOT_NUMERIC: &str = "Skip value must be numeric.";
const CONDITIONS_NOT_STRING: &str = "Conditions value must be a string.";
const COUNT_CONDITIONS_NOT_STRING: &str = "Conditions must be a string.";
const ORDER_BY_NOT_STRING: &str = "Order by value must be a string.";

/// Client for the six operations of the remote Reporting API.
///
/// Every operation validates its arguments before anything is sent, builds a
/// fresh parameter bag, performs exactly one remote call and returns the
/// normalized records. Remote faults surface as [`ReportingError::ApiError`].
pub struct Reporting<T: SoapTransport> {
    transport: T,
}

impl Reporting<SoapClient> {
    pub fn connect(config: &ReportingConfig) -> Result<Self> {
        config.validate()?;
        let client = SoapClient::for_api(&config.connection, REPORTING_API)?;
        tracing::debug!(endpoint = client.endpoint(), "Reporting API client ready");
        Ok(Self::new(client))
    }
}

impl<T: SoapTransport> Reporting<T> {
    pub fn new(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Reports accessible through the customer portal.
    pub async fn get_portal_reports(&self) -> Result<Vec<Record>> {
        let response = self.dispatch("GetPortalReports", &RequestParams::new()).await?;
        Ok(normalize(&response, "GetPortalReportsResult"))
    }

    /// Fields of a single report.
    pub async fn get_report_fields(&self, report_name: impl Into<ParamValue>) -> Result<Vec<Record>> {
        let report_name = report_name.into();
        expect_string(&report_name, REPORT_NAME_NOT_STRING)?;

        let mut params = RequestParams::new();
        params.set("reportName", report_name);

        let response = self.dispatch("GetReportFields", &params).await?;
        Ok(normalize_nested(&response, "GetReportFieldsResult", "FieldInfo"))
    }

    /// Available reports, with or without their field metadata.
    pub async fn get_reports(&self, include_fields: impl Into<ParamValue>) -> Result<Vec<Record>> {
        let include_fields = include_fields.into();
        expect_bool(&include_fields, INCLUDE_FIELDS_NOT_BOOL)?;

        let mut params = RequestParams::new();
        params.set("includeFields", include_fields);

        let response = self.dispatch("GetReports", &params).await?;
        Ok(normalize_nested(&response, "GetReportsResult", "Report"))
    }

    /// [`get_reports`](Self::get_reports) including field metadata.
    pub async fn get_all_reports(&self) -> Result<Vec<Record>> {
        self.get_reports(true).await
    }

    pub async fn run_portal_report(&self, query: PortalReportQuery) -> Result<Vec<Record>> {
        expect_numeric(&query.limit, LIMIT_NOT_NUMERIC)?;
        expect_numeric(&query.skip, SKIP_NOT_NUMERIC)?;
        expect_string(&query.report_name, REPORT_NAME_NOT_STRING)?;
        expect_string(&query.conditions, CONDITIONS_NOT_STRING)?;
        expect_string(&query.order_by, ORDER_BY_NOT_STRING)?;

        let params = query_params(
            query.report_name,
            query.conditions,
            query.order_by,
            query.limit,
            query.skip,
        );

        let response = self.dispatch("RunPortalReport", &params).await?;
        Ok(result_rows(&response, "RunPortalReportResult"))
    }

    /// Number of rows the report would return for the given conditions.
    pub async fn run_report_count(&self, count: ReportCount) -> Result<Vec<Record>> {
        expect_string(&count.report_name, REPORT_NAME_NOT_STRING)?;
        expect_string(&count.conditions, COUNT_CONDITIONS_NOT_STRING)?;

        let mut params = RequestParams::new();
        params
            .set("reportName", count.report_name)
            .set("conditions", count.conditions);

        let response = self.dispatch("RunReportCount", &params).await?;
        let mut records = normalize(&response, "RunReportCountResult");

        // 數量以整數回傳
        for record in &mut records {
            if let Some(value) = record.data.get_mut("RunReportCountResult") {
                if let Some(parsed) = value.as_str().and_then(|s| s.trim().parse::<i64>().ok()) {
                    *value = Value::from(parsed);
                }
            }
        }
        Ok(records)
    }

    pub async fn run_report_query(&self, query: ReportQuery) -> Result<Vec<Record>> {
        expect_numeric(&query.limit, LIMIT_NOT_NUMERIC)?;
        expect_numeric(&query.skip, SKIP_NOT_NUMERIC)?;
        expect_string(&query.report_name, REPORT_NAME_NOT_STRING)?;
        expect_string(&query.conditions, CONDITIONS_NOT_STRING)?;
        expect_string(&query.order_by, ORDER_BY_NOT_STRING)?;

        let params = query_params(
            query.report_name,
            query.conditions,
            query.order_by,
            query.limit,
            query.skip,
        );

        let response = self.dispatch("RunReportQuery", &params).await?;
        Ok(result_rows(&response, "RunReportQueryResult"))
    }

    async fn dispatch(&self, method: &str, params: &RequestParams) -> Result<Value> {
        match self.transport.call(method, params).await {
            Ok(response) => Ok(response),
            Err(fault) => {
                tracing::warn!(method, code = ?fault.code, "SOAP call failed: {}", fault.message);
                Err(ReportingError::from(fault))
            }
        }
    }
}

fn query_params(
    report_name: ParamValue,
    conditions: ParamValue,
    order_by: ParamValue,
    limit: ParamValue,
    skip: ParamValue,
) -> RequestParams {
    let mut params = RequestParams::new();
    params
        .set("reportName", report_name)
        .set("conditions", conditions)
        .set("orderBy", order_by)
        .set("limit", as_wire_int(limit))
        .set("skip", as_wire_int(skip));
    params
}

// limit/skip 在服務端是 xsd:int
fn as_wire_int(value: ParamValue) -> ParamValue {
    value.to_wire_int().map(ParamValue::Integer).unwrap_or(value)
}

fn result_rows(response: &Value, container: &str) -> Vec<Record> {
    let rows: Vec<Record> = normalize_nested(response, container, "ResultRow")
        .into_iter()
        .map(flatten_result_row)
        .collect();
    tracing::debug!(container, rows = rows.len(), "Report rows normalized");
    rows
}
