//! CSV export of the history and of a blank import template, in the column layout
//! [`crate::import`] reads.

use crate::error::ReefError;
use csv::Writer;
use reefpulse_schemas::{parameter::ParameterKind, reading::TestEntry};
use std::{fs, io, path::Path};

const DATE_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

const TEMPLATE_EXAMPLE_ROW: [&str; ParameterKind::COUNT + 1] = [
    "2026-01-15 10:30",
    "3",
    "8.2",
    "8.5",
    "420",
    "0.03",
    "1.025",
    "78",
    "1350",
    "0",
    "0",
];

/// The header row: `date` followed by every parameter in canonical order.
pub fn header_row() -> Vec<&'static str> {
    std::iter::once("date")
        .chain(ParameterKind::ALL.iter().map(|kind| kind.as_str()))
        .collect()
}

pub struct HistoryExporter<W: io::Write> {
    label: String,
    writer: Writer<W>,
}

impl HistoryExporter<fs::File> {
    pub fn create(path: &Path) -> Result<Self, ReefError> {
        let label = path.display().to_string();
        let writer = Writer::from_path(path).map_err(|e| ReefError::CsvError(label.clone(), e))?;
        Ok(Self { label, writer })
    }
}

impl<W: io::Write> HistoryExporter<W> {
    pub fn new(label: &str, writer: W) -> Self {
        Self {
            label: label.to_string(),
            writer: Writer::from_writer(writer),
        }
    }

    pub fn write_header(&mut self) -> Result<(), ReefError> {
        self.write_record(header_row())
    }

    pub fn write_example(&mut self) -> Result<(), ReefError> {
        self.write_record(TEMPLATE_EXAMPLE_ROW)
    }

    /// Writes one entry. Absent readings become empty cells.
    pub fn write_entry(&mut self, entry: &TestEntry) -> Result<(), ReefError> {
        let row: Vec<String> = std::iter::once(entry.date.format(DATE_FORMAT).to_string())
            .chain(ParameterKind::ALL.iter().map(|kind| {
                entry
                    .readings
                    .get(*kind)
                    .map(|value| value.to_string())
                    .unwrap_or_default()
            }))
            .collect();
        self.write_record(&row)
    }

    fn write_record<I, T>(&mut self, record: I) -> Result<(), ReefError>
    where
        I: IntoIterator<Item = T>,
        T: AsRef<[u8]>,
    {
        self.writer
            .write_record(record)
            .map_err(|e| ReefError::CsvError(self.label.clone(), e))
    }

    /// Flushes everything written and hands back the underlying writer.
    pub fn into_inner(self) -> Result<W, ReefError> {
        let label = self.label;
        self.writer
            .into_inner()
            .map_err(|e| ReefError::FileIO(label, e.into_error()))
    }
}

/// Writes the import template: the header row and one example row.
pub fn write_template<W: io::Write>(label: &str, writer: W) -> Result<W, ReefError> {
    let mut exporter = HistoryExporter::new(label, writer);
    exporter.write_header()?;
    exporter.write_example()?;
    exporter.into_inner()
}

/// Writes `entries` under a header row, in the order given.
pub fn write_history<'a, W, I>(label: &str, writer: W, entries: I) -> Result<W, ReefError>
where
    W: io::Write,
    I: IntoIterator<Item = &'a TestEntry>,
{
    let mut exporter = HistoryExporter::new(label, writer);
    exporter.write_header()?;
    for entry in entries {
        exporter.write_entry(entry)?;
    }
    exporter.into_inner()
}
