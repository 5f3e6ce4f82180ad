use crate::domain::params::ParamValue;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;

/// One normalized result record, fields in the order the server sent them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record {
    pub data: Map<String, Value>,
}

impl Record {
    pub fn new(data: Map<String, Value>) -> Self {
        Self { data }
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.data.get(field)
    }

    pub fn field_names(&self) -> impl Iterator<Item = &str> {
        self.data.keys().map(String::as_str)
    }
}

/// A SOAP fault (or any transport failure reported as one).
#[derive(Error, Debug, Clone, PartialEq)]
#[error("{message}")]
pub struct SoapFault {
    pub code: Option<String>,
    pub message: String,
}

impl SoapFault {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            code: None,
            message: message.into(),
        }
    }
}

/// `RunReportQuery` 的參數，未指定者套用預設值
#[derive(Debug, Clone, PartialEq)]
pub struct ReportQuery {
    pub report_name: ParamValue,
    pub limit: ParamValue,
    pub skip: ParamValue,
    pub conditions: ParamValue,
    pub order_by: ParamValue,
}

impl ReportQuery {
    pub fn new(report_name: impl Into<ParamValue>) -> Self {
        Self {
            report_name: report_name.into(),
            limit: ParamValue::Integer(DEFAULT_LIMIT),
            skip: ParamValue::Integer(DEFAULT_SKIP),
            conditions: ParamValue::empty(),
            order_by: ParamValue::empty(),
        }
    }

    pub fn limit(mut self, limit: impl Into<ParamValue>) -> Self {
        self.limit = limit.into();
        self
    }

    pub fn skip(mut self, skip: impl Into<ParamValue>) -> Self {
        self.skip = skip.into();
        self
    }

    pub fn conditions(mut self, conditions: impl Into<ParamValue>) -> Self {
        self.conditions = conditions.into();
        self
    }

    pub fn order_by(mut self, order_by: impl Into<ParamValue>) -> Self {
        self.order_by = order_by.into();
        self
    }
}

/// `RunPortalReport` 的參數，所有欄位皆可省略
#[derive(Debug, Clone, PartialEq)]
pub struct PortalReportQuery {
    pub limit: ParamValue,
    pub skip: ParamValue,
    pub report_name: ParamValue,
    pub conditions: ParamValue,
    pub order_by: ParamValue,
}

impl Default for PortalReportQuery {
    fn default() -> Self {
        Self {
            limit: ParamValue::Integer(DEFAULT_LIMIT),
            skip: ParamValue::Integer(DEFAULT_SKIP),
            report_name: ParamValue::empty(),
            conditions: ParamValue::empty(),
            order_by: ParamValue::empty(),
        }
    }
}

impl PortalReportQuery {
    pub fn new(report_name: impl Into<ParamValue>) -> Self {
        Self {
            report_name: report_name.into(),
            ..Self::default()
        }
    }

    pub fn limit(mut self, limit: impl Into<ParamValue>) -> Self {
        self.limit = limit.into();
        self
    }

    pub fn skip(mut self, skip: impl Into<ParamValue>) -> Self {
        self.skip = skip.into();
        self
    }

    pub fn conditions(mut self, conditions: impl Into<ParamValue>) -> Self {
        self.conditions = conditions.into();
        self
    }

    pub fn order_by(mut self, order_by: impl Into<ParamValue>) -> Self {
        self.order_by = order_by.into();
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ReportCount {
    pub report_name: ParamValue,
    pub conditions: ParamValue,
}

impl ReportCount {
    pub fn new(report_name: impl Into<ParamValue>) -> Self {
        Self {
            report_name: report_name.into(),
            conditions: ParamValue::empty(),
        }
    }

    pub fn conditions(mut self, conditions: impl Into<ParamValue>) -> Self {
        self.conditions = conditions.into();
        self
    }
}

pub const DEFAULT_LIMIT: i64 = 100;
pub const DEFAULT_SKIP: i64 = 0;
