//! HTML output sink for the flux report
//!
//! The report builder hands this module raw markup fragments and
//! semi-structured table rows; nothing here knows about fluxes or models.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use indexmap::IndexMap;

use crate::report::ReportError;

/// A single table row: ordered column-title to display-string fields plus
/// the numeric key the builder sorts on
///
/// The sink ignores the sort key; it only renders the fields. A field
/// missing for a given column title is rendered as an empty cell, which is
/// how the synthetic separator row (no fields at all) comes out blank.
#[derive(Clone, Debug)]
pub struct Row {
    fields: IndexMap<&'static str, String>,
    pub sort_key: f64,
}

impl Row {
    pub fn new(sort_key: f64) -> Row {
        Row {
            fields: IndexMap::new(),
            sort_key,
        }
    }

    /// The zero-flux separator row partitioning negative from positive flux
    pub fn separator() -> Row {
        Row::new(0.0)
    }

    pub fn set(&mut self, title: &'static str, value: impl Into<String>) {
        self.fields.insert(title, value.into());
    }

    pub fn get(&self, title: &str) -> Option<&str> {
        self.fields.get(title).map(String::as_str)
    }
}

/// Abstract writer capability the report builder targets
pub trait HtmlSink {
    /// Write a raw markup fragment verbatim
    fn write_fragment(&mut self, fragment: &str) -> Result<(), ReportError>;

    /// Render rows as an HTML table with the given column order
    ///
    /// `row_colors` is an optional sequence of hex RGB strings parallel to
    /// `rows`, applied as row background colors.
    fn write_table(
        &mut self,
        rows: &[Row],
        titles: &[&str],
        row_colors: Option<&[String]>,
    ) -> Result<(), ReportError>;

    /// Finish the document and flush the underlying writer
    fn close(&mut self) -> Result<(), ReportError>;
}

/// HtmlSink implementation writing a single standalone HTML document
pub struct HtmlWriter<W: Write> {
    writer: W,
}

impl HtmlWriter<BufWriter<File>> {
    /// Open a report file, writing the document preamble
    pub fn create<P: AsRef<Path>>(path: P) -> Result<Self, ReportError> {
        let file = File::create(path)?;
        HtmlWriter::new(BufWriter::new(file))
    }
}

impl<W: Write> HtmlWriter<W> {
    /// Wrap an arbitrary writer, writing the document preamble
    pub fn new(mut writer: W) -> Result<Self, ReportError> {
        writer.write_all(b"<!DOCTYPE html>\n<html>\n<body>\n")?;
        Ok(HtmlWriter { writer })
    }

    /// Consume the sink, handing back the underlying writer
    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> HtmlSink for HtmlWriter<W> {
    fn write_fragment(&mut self, fragment: &str) -> Result<(), ReportError> {
        self.writer.write_all(fragment.as_bytes())?;
        Ok(())
    }

    fn write_table(
        &mut self,
        rows: &[Row],
        titles: &[&str],
        row_colors: Option<&[String]>,
    ) -> Result<(), ReportError> {
        writeln!(self.writer, "<table border=\"1\" cellpadding=\"2\">")?;
        write!(self.writer, "<tr>")?;
        for title in titles {
            write!(self.writer, "<th>{title}</th>")?;
        }
        writeln!(self.writer, "</tr>")?;
        for (i, row) in rows.iter().enumerate() {
            match row_colors.and_then(|colors| colors.get(i)) {
                Some(color) => write!(self.writer, "<tr bgcolor=\"#{color}\">")?,
                None => write!(self.writer, "<tr>")?,
            }
            for title in titles {
                write!(self.writer, "<td>{}</td>", row.get(title).unwrap_or(""))?;
            }
            writeln!(self.writer, "</tr>")?;
        }
        writeln!(self.writer, "</table>")?;
        Ok(())
    }

    fn close(&mut self) -> Result<(), ReportError> {
        self.writer.write_all(b"</body>\n</html>\n")?;
        self.writer.flush()?;
        Ok(())
    }
}
