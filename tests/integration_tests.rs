use httpmock::prelude::*;
use psa_reporting::{
    PortalReportQuery, ReportCount, ReportQuery, Reporting, ReportingConfig, ReportingError,
    SoapClient,
};
use serde_json::json;

fn config_for(base_url: &str) -> ReportingConfig {
    ReportingConfig::from_toml_str(&format!(
        r#"
[connection]
base_url = "{}"
company_id = "acme"
integrator_login_id = "integrator"
integrator_password = "s3cret"
timeout_seconds = 5
"#,
        base_url
    ))
    .unwrap()
}

fn connect(server: &MockServer) -> Reporting<SoapClient> {
    Reporting::connect(&config_for(&server.base_url())).unwrap()
}

fn envelope(body: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="utf-8"?>
<soap:Envelope xmlns:soap="http://schemas.xmlsoap.org/soap/envelope/" xmlns:xsi="http://www.w3.org/2001/XMLSchema-instance" xmlns:xsd="http://www.w3.org/2001/XMLSchema">
  <soap:Body>{}</soap:Body>
</soap:Envelope>"#,
        body
    )
}

fn fault(message: &str) -> String {
    envelope(&format!(
        "<soap:Fault><faultcode>soap:Server</faultcode><faultstring>{}</faultstring></soap:Fault>",
        message
    ))
}

#[tokio::test]
async fn test_get_reports_end_to_end() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ReportingApi.asmx")
            .header("Content-Type", "text/xml; charset=utf-8")
            .header("SOAPAction", "\"http://connectwise.com/GetReports\"")
            .body_contains("<CompanyId>acme</CompanyId>")
            .body_contains("<IntegratorPassword>s3cret</IntegratorPassword>")
            .body_contains("<includeFields>true</includeFields>");
        then.status(200)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(envelope(
                r#"<GetReportsResponse xmlns="http://connectwise.com">
                    <GetReportsResult>
                        <Report><Name>Service</Name><Fields /></Report>
                        <Report><Name>Activity</Name><Fields /></Report>
                    </GetReportsResult>
                </GetReportsResponse>"#,
            ));
    });

    let records = connect(&server).get_all_reports().await.unwrap();

    mock.assert();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("Name"), Some(&json!("Service")));
    assert_eq!(records[1].get("Name"), Some(&json!("Activity")));
}

#[tokio::test]
async fn test_get_report_fields_single_field() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ReportingApi.asmx")
            .header("SOAPAction", "\"http://connectwise.com/GetReportFields\"")
            .body_contains("<reportName>Service</reportName>");
        then.status(200).body(envelope(
            r#"<GetReportFieldsResponse xmlns="http://connectwise.com">
                <GetReportFieldsResult>
                    <FieldInfo><Name>TicketNbr</Name><Type>Int32</Type></FieldInfo>
                </GetReportFieldsResult>
            </GetReportFieldsResponse>"#,
        ));
    });

    let records = connect(&server).get_report_fields("Service").await.unwrap();

    mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("Name"), Some(&json!("TicketNbr")));
    assert_eq!(records[0].get("Type"), Some(&json!("Int32")));
}

#[tokio::test]
async fn test_get_portal_reports() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ReportingApi.asmx")
            .header("SOAPAction", "\"http://connectwise.com/GetPortalReports\"");
        then.status(200).body(envelope(
            r#"<GetPortalReportsResponse xmlns="http://connectwise.com">
                <GetPortalReportsResult>
                    <PortalReport><Name>Open Tickets</Name></PortalReport>
                </GetPortalReportsResult>
            </GetPortalReportsResponse>"#,
        ));
    });

    let records = connect(&server).get_portal_reports().await.unwrap();

    mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(
        records[0].get("PortalReport"),
        Some(&json!({"Name": "Open Tickets"}))
    );
}

#[tokio::test]
async fn test_run_report_query_rows() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ReportingApi.asmx")
            .header("SOAPAction", "\"http://connectwise.com/RunReportQuery\"")
            .body_contains("<reportName>Service</reportName>")
            .body_contains("<conditions>Board = &apos;Help&apos;</conditions>")
            .body_contains("<orderBy></orderBy>")
            .body_contains("<limit>100</limit>")
            .body_contains("<skip>0</skip>");
        then.status(200).body(envelope(
            r#"<RunReportQueryResponse xmlns="http://connectwise.com">
                <RunReportQueryResult>
                    <ResultRow Number="1">
                        <Value Name="TicketNbr" Type="Int32" IsNullable="false">1001</Value>
                        <Value Name="Summary" Type="String" IsNullable="true">Printer jam</Value>
                    </ResultRow>
                    <ResultRow Number="2">
                        <Value Name="TicketNbr" Type="Int32" IsNullable="false">1002</Value>
                        <Value Name="Summary" Type="String" IsNullable="true" xsi:nil="true" />
                    </ResultRow>
                </RunReportQueryResult>
            </RunReportQueryResponse>"#,
        ));
    });

    let records = connect(&server)
        .run_report_query(ReportQuery::new("Service").conditions("Board = 'Help'"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].get("TicketNbr"), Some(&json!("1001")));
    assert_eq!(records[0].get("Summary"), Some(&json!("Printer jam")));
    assert_eq!(records[1].get("TicketNbr"), Some(&json!("1002")));
    assert_eq!(records[1].get("Summary"), Some(&serde_json::Value::Null));
}

#[tokio::test]
async fn test_run_portal_report_empty_result() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ReportingApi.asmx")
            .header("SOAPAction", "\"http://connectwise.com/RunPortalReport\"")
            .body_contains("<limit>10</limit>")
            .body_contains("<skip>30</skip>");
        then.status(200).body(envelope(
            r#"<RunPortalReportResponse xmlns="http://connectwise.com">
                <RunPortalReportResult />
            </RunPortalReportResponse>"#,
        ));
    });

    let records = connect(&server)
        .run_portal_report(PortalReportQuery::new("Open Tickets").limit(10).skip(30))
        .await
        .unwrap();

    mock.assert();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_run_report_count() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ReportingApi.asmx")
            .header("SOAPAction", "\"http://connectwise.com/RunReportCount\"")
            .body_contains("<conditions></conditions>");
        then.status(200).body(envelope(
            r#"<RunReportCountResponse xmlns="http://connectwise.com">
                <RunReportCountResult>57</RunReportCountResult>
            </RunReportCountResponse>"#,
        ));
    });

    let records = connect(&server)
        .run_report_count(ReportCount::new("Service"))
        .await
        .unwrap();

    mock.assert();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].get("RunReportCountResult"), Some(&json!(57)));
}

#[tokio::test]
async fn test_soap_fault_is_wrapped() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST).path("/ReportingApi.asmx");
        then.status(500)
            .header("Content-Type", "text/xml; charset=utf-8")
            .body(fault("Report &apos;Nope&apos; was not found"));
    });

    let err = connect(&server)
        .run_report_query(ReportQuery::new("Nope"))
        .await
        .unwrap_err();

    mock.assert();
    assert!(matches!(err, ReportingError::ApiError { .. }));
    assert_eq!(err.fault_message(), Some("Report 'Nope' was not found"));
}

#[tokio::test]
async fn test_http_error_without_fault_body() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/ReportingApi.asmx");
        then.status(503).body("<html><body>Service Unavailable</body></html>");
    });

    let err = connect(&server).get_portal_reports().await.unwrap_err();

    assert_eq!(err.fault_message(), Some("HTTP 503 Service Unavailable"));
}

#[tokio::test]
async fn test_malformed_response_is_api_error() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method(POST).path("/ReportingApi.asmx");
        then.status(200).body("<soap:Envelope><soap:Body>");
    });

    let err = connect(&server).get_all_reports().await.unwrap_err();

    assert!(matches!(err, ReportingError::ApiError { .. }));
    assert!(err
        .fault_message()
        .unwrap()
        .starts_with("Malformed SOAP response"));
}

#[tokio::test]
async fn test_validation_happens_before_any_request() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.path("/ReportingApi.asmx");
        then.status(200).body(envelope(""));
    });
    let reporting = connect(&server);

    let results = vec![
        reporting.get_reports("true").await,
        reporting.get_report_fields(42).await,
        reporting
            .run_portal_report(PortalReportQuery::default().limit("many"))
            .await,
        reporting.run_report_count(ReportCount::new(1.0)).await,
        reporting
            .run_report_query(ReportQuery::new("Service").skip(false))
            .await,
    ];

    for result in results {
        assert!(result.unwrap_err().is_validation());
    }
    assert_eq!(mock.hits(), 0);
}

#[tokio::test]
async fn test_unreachable_endpoint_is_api_error() {
    let reporting = Reporting::connect(&config_for("http://127.0.0.1:1")).unwrap();

    let err = reporting.get_portal_reports().await.unwrap_err();

    assert!(matches!(err, ReportingError::ApiError { .. }));
    assert!(!err.fault_message().unwrap().is_empty());
}

#[test]
fn test_connect_rejects_invalid_config() {
    let result = Reporting::connect(&config_for("not a url"));
    assert!(matches!(
        result,
        Err(ReportingError::InvalidConfigValueError { .. })
    ));
}

#[tokio::test]
async fn test_numeric_strings_go_out_as_integers() {
    let server = MockServer::start();
    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/ReportingApi.asmx")
            .header("SOAPAction", "\"http://connectwise.com/RunReportQuery\"")
            .body_contains("<limit>1500</limit>")
            .body_contains("<skip>2</skip>");
        then.status(200).body(envelope(
            r#"<RunReportQueryResponse xmlns="http://connectwise.com">
                <RunReportQueryResult />
            </RunReportQueryResponse>"#,
        ));
    });

    let records = connect(&server)
        .run_report_query(ReportQuery::new("Service").limit("1.5e3").skip(2.5))
        .await
        .unwrap();

    mock.assert();
    assert!(records.is_empty());
}
