use crate::domain::params::ParamValue;
use crate::utils::error::{ReportingError, Result};
use url::Url;

pub trait Validate {
    fn validate(&self) -> Result<()>;
}

/// 參數必須是字串
pub fn expect_string<'a>(value: &'a ParamValue, message: &str) -> Result<&'a str> {
    value
        .as_str()
        .ok_or_else(|| ReportingError::validation(message))
}

/// 參數必須是數值（整數、浮點數或可解析為數字的字串）
pub fn expect_numeric(value: &ParamValue, message: &str) -> Result<()> {
    if value.is_numeric() {
        Ok(())
    } else {
        Err(ReportingError::validation(message))
    }
}

/// 參數必須是布林值
pub fn expect_bool(value: &ParamValue, message: &str) -> Result<bool> {
    value
        .as_bool()
        .ok_or_else(|| ReportingError::validation(message))
}

pub fn validate_url(field_name: &str, url_str: &str) -> Result<()> {
    if url_str.is_empty() {
        return Err(ReportingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: "URL cannot be empty".to_string(),
        });
    }

    match Url::parse(url_str) {
        Ok(url) => match url.scheme() {
            "http" | "https" => Ok(()),
            scheme => Err(ReportingError::InvalidConfigValueError {
                field: field_name.to_string(),
                value: url_str.to_string(),
                reason: format!("Unsupported URL scheme: {}", scheme),
            }),
        },
        Err(e) => Err(ReportingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: url_str.to_string(),
            reason: format!("Invalid URL format: {}", e),
        }),
    }
}

/// Rejects empty or whitespace-only values without echoing them back.
pub fn validate_non_empty_string(field_name: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(ReportingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: String::new(),
            reason: "Value cannot be empty or whitespace-only".to_string(),
        });
    }
    Ok(())
}

pub fn validate_range<T: PartialOrd + std::fmt::Display + Copy>(
    field_name: &str,
    value: T,
    min: T,
    max: T,
) -> Result<()> {
    if value < min || value > max {
        return Err(ReportingError::InvalidConfigValueError {
            field: field_name.to_string(),
            value: value.to_string(),
            reason: format!("Value must be between {} and {}", min, max),
        });
    }
    Ok(())
}
