//! CSV loader for the wide unemployment table.

use std::path::Path;

use crate::error::ExplorerResult;
use crate::types::{RawRecord, RawTable};

use super::layout::{RateCell, WideLayout, open_input, parse_rate};

/// Load a delimited file into a [`RawTable`].
///
/// Rules:
///
/// - The file must have a header row.
/// - Headers must contain all identifier columns (order can differ).
/// - Every header starting with a 4-digit year is a year column; other columns are ignored.
/// - Unparseable or out-of-range rate cells become absent values, including cells that are not
///   valid UTF-8. Identifier cells are decoded lossily.
pub fn load_csv_from_path(path: impl AsRef<Path>, delimiter: u8) -> ExplorerResult<RawTable> {
    let file = open_input(path.as_ref())?;
    let mut rdr = csv::ReaderBuilder::new()
        .has_headers(true)
        .delimiter(delimiter)
        .flexible(true)
        .from_reader(file);
    load_csv_from_reader(&mut rdr)
}

/// Load CSV data from an existing CSV reader.
pub fn load_csv_from_reader<R: std::io::Read>(rdr: &mut csv::Reader<R>) -> ExplorerResult<RawTable> {
    let headers: Vec<String> = rdr
        .byte_headers()?
        .iter()
        .map(|h| String::from_utf8_lossy(h).into_owned())
        .collect();
    let layout = WideLayout::resolve(headers.iter().map(String::as_str))?;

    let mut records = Vec::new();
    let mut malformed = 0usize;
    for result in rdr.byte_records() {
        let record = result?;
        let key = layout.series_key(|idx| record.get(idx).map(String::from_utf8_lossy));
        let rates = layout
            .years
            .iter()
            .map(|(idx, _)| {
                let cell = match record.get(*idx).map(std::str::from_utf8) {
                    None => RateCell::Empty,
                    Some(Ok(text)) => parse_rate(text),
                    Some(Err(_)) => RateCell::Malformed,
                };
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
