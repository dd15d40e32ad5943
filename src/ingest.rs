//! CSV command-stream ingestion and final-state dump, per the external
//! collaborator contract the core expects to be fed by.
//!
//! Command rows: `PLACE,id,side(0=BUY/1=SELL),price,volume`; any other op
//! is treated as `DELETE,id`. Rows have different field counts, so the
//! reader is built with `flexible(true)`.

use std::path::Path;

use thiserror::Error;

use crate::book::OrderBook;
use crate::types::Side;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Place { id: u64, side: Side, price: u32, volume: u64 },
    Delete { id: u64 },
}

#[derive(Debug, Error)]
pub enum IngestError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
    #[error("record {index} has too few fields for its op")]
    Truncated { index: usize },
    #[error("record {index} field {field:?} is not a valid unsigned integer")]
    InvalidField { index: usize, field: String },
}

fn field<'a>(record: &'a csv::StringRecord, index: usize, col: usize) -> Result<&'a str, IngestError> {
    record.get(col).ok_or(IngestError::Truncated { index })
}

fn parse_u64(index: usize, raw: &str) -> Result<u64, IngestError> {
    raw.trim()
        .parse()
        .map_err(|_| IngestError::InvalidField { index, field: raw.to_string() })
}

fn parse_u32(index: usize, raw: &str) -> Result<u32, IngestError> {
    raw.trim()
        .parse()
        .map_err(|_| IngestError::InvalidField { index, field: raw.to_string() })
}

/// Reads the command stream at `path`, one header row followed by
/// newline-delimited PLACE/DELETE rows.
pub fn read_commands(path: impl AsRef<Path>) -> Result<Vec<Command>, IngestError> {
    let mut reader =
        csv::ReaderBuilder::new().has_headers(true).flexible(true).from_path(path)?;

    let mut commands = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record = record?;
        let op = field(&record, index, 0)?;
        let id = parse_u64(index, field(&record, index, 1)?)?;

        if op == "PLACE" {
            let side_raw = parse_u32(index, field(&record, index, 2)?)?;
            let side = if side_raw == 0 { Side::Buy } else { Side::Sell };
            let price = parse_u32(index, field(&record, index, 3)?)?;
            let volume = parse_u64(index, field(&record, index, 4)?)?;
            commands.push(Command::Place { id, side, price, volume });
        } else {
            commands.push(Command::Delete { id });
        }
    }

    Ok(commands)
}

/// Writes the final-state dump: header `Price Limit,Side,Volume`, buy side
/// ascending then sell side ascending, one row per non-empty limit.
pub fn write_book_dump(path: impl AsRef<Path>, book: &OrderBook) -> Result<(), IngestError> {
    let mut writer = csv::WriterBuilder::new().from_path(path)?;
    writer.write_record(["Price Limit", "Side", "Volume"])?;

    for (price, volume) in book.depth(Side::Buy) {
        writer.write_record(&[price.to_string(), "BUY".to_string(), volume.to_string()])?;
    }
    for (price, volume) in book.depth(Side::Sell) {
        writer.write_record(&[price.to_string(), "SELL".to_string(), volume.to_string()])?;
    }

    writer.flush()?;
    Ok(())
}
