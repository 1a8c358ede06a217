use crate::file::csv::error::FileError;
use model::records::table::ResultTable;
use std::io::Write;

/// Writes a [`ResultTable`] as CSV: one header row in column order, then one
/// line per row. Lines end with `\n` and fields are quoted only when needed.
///
/// `Null` cells are empty fields. The one exception is a row made of a single
/// empty field, which is written as `""` so it does not read back as a blank
/// line.
#[derive(Debug, Clone, Default)]
pub struct CsvTableWriter;

impl CsvTableWriter {
    pub fn new() -> Self {
        Self
    }

    pub fn write<W: Write>(&self, table: &ResultTable, out: W) -> Result<(), FileError> {
        let mut writer = csv::WriterBuilder::new()
            .terminator(csv::Terminator::Any(b'\n'))
            .from_writer(out);

        writer.write_record(table.column_names())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(|value| value.to_cell()))?;
        }
        writer.flush()?;
        Ok(())
    }

    pub fn to_bytes(&self, table: &ResultTable) -> Result<Vec<u8>, FileError> {
        let mut buf = Vec::new();
        self.write(table, &mut buf)?;
        Ok(buf)
    }
}
