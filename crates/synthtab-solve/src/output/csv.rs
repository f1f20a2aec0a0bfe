use std::fs::File;
use std::io::BufWriter;
use std::path::Path;

use synthtab_model::AssembledModel;

use crate::model::SolvedTable;

/// Write the solved table as CSV, one row per combination cell: a column
/// per variable plus the solved count, in deterministic cell order.
/// Returns the number of data rows written.
pub fn write_cells_csv(
    path: &Path,
    model: &AssembledModel,
    table: &SolvedTable,
) -> Result<u64, csv::Error> {
    let writer = BufWriter::new(File::create(path).map_err(csv::Error::from)?);
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(writer);

    let mut header: Vec<String> = (0..model.catalog.variable_count())
        .map(|variable| model.catalog.variable_name(variable).to_string())
        .collect();
    header.push("count".to_string());
    writer.write_record(&header)?;

    let mut rows = 0u64;
    for (labels, value) in table.rows(model) {
        let mut record: Vec<String> = labels.iter().map(|label| label.to_string()).collect();
        record.push(format_count(value));
        writer.write_record(&record)?;
        rows += 1;
    }

    writer.flush()?;
    Ok(rows)
}

/// Counts are usually integral; render them without a trailing fraction
/// when they are.
fn format_count(value: f64) -> String {
    if (value - value.round()).abs() < 1e-9 {
        format!("{}", value.round() as i64)
    } else {
        value.to_string()
    }
}
