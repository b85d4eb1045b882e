use crate::services::measures::MeasureRecord;
use crate::types::{ExtractError, ExtractResult};
use std::io;
use std::path::Path;
use tempfile::NamedTempFile;

/// Column names of every CSV this tool writes, in order.
pub const CSV_HEADER: [&str; 6] = [
    "table",
    "measure",
    "expression",
    "description",
    "format_string",
    "display_folder",
];

/// Write `records` to `output` as CSV and return the number of data rows.
///
/// Rows go to a temporary file next to `output`, which is renamed over the
/// target only once everything has been flushed. On any failure the target
/// is left as it was and the temporary file is removed.
pub fn write_measures_csv<I>(records: I, output: &Path) -> ExtractResult<usize>
where
    I: IntoIterator<Item = MeasureRecord>,
{
    let dir = match output.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let temp = tempfile::Builder::new()
        .prefix(".vpax-")
        .suffix(".csv.tmp")
        .tempfile_in(dir)
        .map_err(|e| ExtractError::write(output, e))?;

    let (temp, rows) = write_rows(temp, records).map_err(|e| ExtractError::write(output, e))?;

    temp.as_file()
        .sync_all()
        .map_err(|e| ExtractError::write(output, e))?;
    temp.persist(output)
        .map_err(|e| ExtractError::write(output, e.error))?;

    log::debug!("Wrote {} rows to {}", rows, output.display());
    Ok(rows)
}

fn write_rows<I>(temp: NamedTempFile, records: I) -> io::Result<(NamedTempFile, usize)>
where
    I: IntoIterator<Item = MeasureRecord>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::Any(b'\n'))
        .from_writer(temp);

    writer.write_record(CSV_HEADER)?;

    let mut rows = 0;
    for record in records {
        writer.write_record([
            &record.table,
            &record.measure,
            &record.expression,
            &record.description,
            &record.format_string,
            &record.display_folder,
        ])?;
        rows += 1;
    }

    let temp = writer
        .into_inner()
        .map_err(|e| io::Error::other(e.to_string()))?;
    Ok((temp, rows))
}
