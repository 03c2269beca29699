use crate::{ListingRecord, Result, ResultTable, FIELD_NAMES};
use csv::{ReaderBuilder, WriterBuilder};
use std::path::Path;
use tracing::info;

/// Writes `table` as comma-separated text, overwriting `path`.
///
/// The header row is written even when the table is empty. Fields containing
/// commas, quotes or newlines are quoted by the CSV writer.
pub fn export(table: &ResultTable, path: impl AsRef<Path>) -> Result<()> {
    let path = path.as_ref();
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .from_path(path)?;

    writer.write_record(FIELD_NAMES)?;
    for record in table {
        writer.write_record(record.values())?;
    }
    writer.flush()?;

    info!("Exported {} listings to {}", table.len(), path.display());
    Ok(())
}

/// Reads a file produced by [`export`] back into a table.
pub fn read_csv(path: impl AsRef<Path>) -> Result<ResultTable> {
    let mut reader = ReaderBuilder::new().has_headers(true).from_path(path)?;

    let mut table = ResultTable::new();
    for row in reader.deserialize::<ListingRecord>() {
        table.push(row?);
    }
    Ok(table)
}
