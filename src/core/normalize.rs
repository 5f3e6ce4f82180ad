//! Turns the loosely shaped SOAP value tree into `Vec<Record>`.

use crate::adapters::xml::TEXT_KEY;
use crate::domain::model::Record;
use serde_json::{Map, Value};

/// Flattens `response[key]` into records, keeping server order.
///
/// A missing, nil or empty entry yields no records, a list yields one record per
/// element and a single object yields exactly one record. Scalars are wrapped
/// as `{ key: scalar }`.
pub fn normalize(response: &Value, key: &str) -> Vec<Record> {
    match response.get(key) {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::String(s)) if s.is_empty() => Vec::new(),
        Some(Value::Array(items)) => items.iter().map(|item| to_record(item, key)).collect(),
        Some(item) => vec![to_record(item, key)],
    }
}

/// Same as [`normalize`] for `response[container][key]`.
pub fn normalize_nested(response: &Value, container: &str, key: &str) -> Vec<Record> {
    response
        .get(container)
        .map(|inner| normalize(inner, key))
        .unwrap_or_default()
}

fn to_record(item: &Value, key: &str) -> Record {
    match item {
        Value::Object(fields) => Record::new(fields.clone()),
        scalar => {
            let mut data = Map::new();
            data.insert(key.to_string(), scalar.clone());
            Record::new(data)
        }
    }
}

/// Rewrites a `ResultRow` record (`Value` children carrying a `Name`
/// attribute) into a column name -> value record. Records without named
/// values come back untouched.
pub fn flatten_result_row(record: Record) -> Record {
    let columns: Vec<&Value> = match record.get("Value") {
        Some(Value::Array(items)) => items.iter().collect(),
        Some(single @ Value::Object(_)) => vec![single],
        _ => return record,
    };

    let mut data = Map::new();
    for column in columns {
        let Some(name) = column.get("Name").and_then(Value::as_str) else {
            continue;
        };
        let value = column.get(TEXT_KEY).cloned().unwrap_or(Value::Null);
        data.insert(name.to_string(), value);
    }

    if data.is_empty() {
        record
    } else {
        Record::new(data)
    }
}
