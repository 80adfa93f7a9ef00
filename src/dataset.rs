/// Dataset output
///
/// Wraps a csv writer that emits the literal header line first, counts data rows,
/// and counts bytes on the underlying sink. Files are truncated on open and
/// flushed when the writer is finished.

use std::fs::File;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use csv::{Terminator, WriterBuilder};
use thiserror::Error;
use tracing::debug;
use crate::records::CsvRecord;
use crate::stats::GenerationStats;

#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("cannot create {path:?}: {source}")]
    Create { path: PathBuf, source: io::Error },

    #[error("csv write failed: {0}")]
    Csv(#[from] csv::Error),

    #[error("I/O error: {0}")]
    Io(#[from] io::Error),
}

pub type DatasetResult<T> = Result<T, DatasetError>;

/// Outcome of one generator run
#[derive(Debug, Clone)]
pub struct DatasetSummary {
    pub file: String,
    pub path: PathBuf,
    pub stats: GenerationStats,
}

/// Byte-counting pass-through writer
#[derive(Debug)]
pub struct CountingWriter<W> {
    inner: W,
    bytes: u64,
}

impl<W: Write> CountingWriter<W> {
    pub fn new(inner: W) -> Self {
        CountingWriter { inner, bytes: 0 }
    }

    pub fn bytes_written(&self) -> u64 {
        self.bytes
    }

    pub fn into_inner(self) -> W {
        self.inner
    }
}

impl<W: Write> Write for CountingWriter<W> {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        let n = self.inner.write(buf)?;
        self.bytes += n as u64;
        Ok(n)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.inner.flush()
    }
}

pub struct DatasetWriter<W: Write> {
    name: String,
    writer: csv::Writer<CountingWriter<W>>,
    stats: GenerationStats,
}

impl DatasetWriter<File> {
    /// Create (or truncate) `path` and write `header`
    pub fn create(path: &Path, header: &str) -> DatasetResult<Self> {
        let file = File::create(path).map_err(|source| DatasetError::Create {
            path: path.to_path_buf(),
            source,
        })?;
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_else(|| path.display().to_string());
        Self::from_writer(name, file, header)
    }
}

impl<W: Write> DatasetWriter<W> {
    pub fn from_writer(name: impl Into<String>, inner: W, header: &str) -> DatasetResult<Self> {
        let name = name.into();
        let writer = WriterBuilder::new()
            .has_headers(false)
            .terminator(Terminator::Any(b'\n'))
            .from_writer(CountingWriter::new(inner));

        let mut dataset = DatasetWriter {
            name,
            writer,
            stats: GenerationStats::new(),
        };
        debug!(file = %dataset.name, "writing dataset");
        dataset.stats.start();
        dataset.writer.write_record(header.split(','))?;
        Ok(dataset)
    }

    /// Write one data row
    pub fn write<T: CsvRecord>(&mut self, record: &T) -> DatasetResult<()> {
        self.writer.write_record(record.to_fields())?;
        self.stats.record_row();
        Ok(())
    }

    /// Write `rows_per_product` rows for each identifier, in pool order
    pub fn write_rows<T, F>(
        &mut self,
        product_ids: &[&str],
        rows_per_product: usize,
        mut next_row: F,
    ) -> DatasetResult<()>
    where
        T: CsvRecord,
        F: FnMut(&str) -> T,
    {
        for &product_id in product_ids {
            for _ in 0..rows_per_product {
                let record = next_row(product_id);
                self.write(&record)?;
            }
        }
        Ok(())
    }

    pub fn rows_written(&self) -> u64 {
        self.stats.total_rows()
    }

    /// Flush, log the summary and hand back the sink
    pub fn finish_into_inner(mut self) -> DatasetResult<(W, GenerationStats)> {
        self.writer.flush()?;
        self.stats.set_bytes(self.writer.get_ref().bytes_written());
        self.stats.finish();
        self.stats.log_summary(&self.name);

        let counting = self
            .writer
            .into_inner()
            .map_err(|e| DatasetError::Io(e.into_error()))?;
        Ok((counting.into_inner(), self.stats))
    }

    pub fn finish(self) -> DatasetResult<GenerationStats> {
        self.finish_into_inner().map(|(_, stats)| stats)
    }
}
