//! JSON loader for the wide unemployment table.
//!
//! Supported inputs:
//! - A JSON array of row objects (`df.to_json(orient="records")` style):
//!   `[{"country_name":"Chad", ..., "2014": 1.2, "2015": null}]`
//! - Newline-delimited JSON (NDJSON) with one row object per line.
//!
//! Rates may be numbers, numeric strings, or `null`.

use std::io::Read;
use std::path::Path;

use serde_json::{Map, Value as JsonValue};

use crate::error::{ExplorerError, ExplorerResult};
use crate::types::{RawRecord, RawTable};

use super::layout::{RateCell, WideLayout, check_rate, open_input, parse_rate};

/// Load a JSON file into a [`RawTable`].
pub fn load_json_from_path(path: impl AsRef<Path>) -> ExplorerResult<RawTable> {
    let mut text = String::new();
    open_input(path.as_ref())?.read_to_string(&mut text)?;
    load_json_from_str(&text)
}

/// Load JSON from an in-memory string into a [`RawTable`].
pub fn load_json_from_str(input: &str) -> ExplorerResult<RawTable> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(ExplorerError::SchemaMismatch {
            message: "json input is empty".to_string(),
        });
    }

    // First try parsing as a single JSON value (array or object).
    let values = match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(JsonValue::Array(items)) => items,
        Ok(v @ JsonValue::Object(_)) => vec![v],
        Ok(_) => {
            return Err(ExplorerError::SchemaMismatch {
                message: "json must be an object, an array of objects, or NDJSON".to_string(),
            });
        }
        Err(_) => trimmed
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty())
            .map(serde_json::from_str::<JsonValue>)
            .collect::<Result<Vec<_>, _>>()?,
    };

    let mut objects = Vec::with_capacity(values.len());
    for (idx0, v) in values.iter().enumerate() {
        let obj = v.as_object().ok_or_else(|| ExplorerError::SchemaMismatch {
            message: format!("row {} is not a json object", idx0 + 1),
        })?;
        objects.push(obj);
    }

    load_json_objects(&objects)
}

fn load_json_objects(objects: &[&Map<String, JsonValue>]) -> ExplorerResult<RawTable> {
    // Union of keys in first-seen order acts as the header row.
    let mut headers: Vec<&str> = Vec::new();
    for obj in objects {
        for key in obj.keys() {
            if !headers.contains(&key.as_str()) {
                headers.push(key);
            }
        }
    }
    let layout = WideLayout::resolve(headers.iter().copied())?;

    let mut records = Vec::with_capacity(objects.len());
    let mut malformed = 0usize;
    for obj in objects {
        let key = layout.series_key(|idx| obj.get(headers[idx]).and_then(JsonValue::as_str));
        let rates = layout
            .years
            .iter()
            .map(|(idx, _)| {
                let cell = json_rate(obj.get(headers[*idx]));
                if cell == RateCell::Malformed {
                    malformed += 1;
                }
                cell.value()
            })
            .collect();
        records.push(RawRecord { key, rates });
    }

    if malformed > 0 {
        log::warn!("{malformed} malformed rate cell(s) treated as absent");
    }

    let years = layout.years.into_iter().map(|(_, y)| y).collect();
    Ok(RawTable::new(years, records))
}

fn json_rate(v: Option<&JsonValue>) -> RateCell {
    match v {
        None | Some(JsonValue::Null) => RateCell::Empty,
        Some(JsonValue::Number(n)) => n.as_f64().map(check_rate).unwrap_or(RateCell::Malformed),
        Some(JsonValue::String(s)) => parse_rate(s),
        Some(_) => RateCell::Malformed,
    }
}
