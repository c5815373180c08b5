//! CSV export of a crawl.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use tracing::info;

use crate::dataset::{DatasetRow, UTF8_BOM};
use crate::error::Result;
use crate::types::Dataset;

/// Write `dataset` to `path`, replacing any existing file.
///
/// Returns the number of exhibition rows written. The site-info row is
/// always written, so an empty crawl still produces one data row.
pub fn export(dataset: &Dataset, path: impl AsRef<Path>) -> Result<usize> {
    let path = path.as_ref();
    let file = BufWriter::new(File::create(path)?);
    let written = write_dataset(dataset, file)?;

    info!(
        path = %path.display(),
        exhibitions = written,
        "Exported dataset"
    );
    Ok(written)
}

/// Serialize `dataset` with a leading BOM.
pub fn write_dataset<W: Write>(dataset: &Dataset, mut out: W) -> Result<usize> {
    out.write_all(UTF8_BOM)?;

    let mut writer = csv::Writer::from_writer(out);
    for record in &dataset.exhibitions {
        writer.serialize(DatasetRow::from(record))?;
    }
    writer.serialize(DatasetRow::from(&dataset.site_info))?;
    writer.flush()?;

    Ok(dataset.exhibitions.len())
}
