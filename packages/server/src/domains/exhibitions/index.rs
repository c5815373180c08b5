use std::path::Path;

use exhibition_crawler::{load_dataset, DatasetError, DatasetRow};

/// In-memory copy of the exported dataset.
#[derive(Debug, Clone, Default)]
pub struct ExhibitionIndex {
    rows: Vec<DatasetRow>,
}

impl ExhibitionIndex {
    pub fn new(rows: Vec<DatasetRow>) -> Self {
        Self { rows }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, DatasetError> {
        Ok(Self::new(load_dataset(path)?))
    }

    /// Rows in file order, site-info row included.
    pub fn rows(&self) -> &[DatasetRow] {
        &self.rows
    }

    /// Number of exhibition rows.
    pub fn exhibition_count(&self) -> usize {
        self.rows.iter().filter(|row| !row.is_site_info()).count()
    }

    /// The visitor-information row, if the file has one.
    pub fn site_info(&self) -> Option<&DatasetRow> {
        self.rows.iter().find(|row| row.is_site_info())
    }

    /// Rows whose name, description or address contains `keyword`, in file
    /// order, at most `limit` of them. A blank keyword matches nothing.
    pub fn search(&self, keyword: &str, limit: usize) -> Vec<&DatasetRow> {
        let keyword = keyword.trim();
        if keyword.is_empty() {
            return Vec::new();
        }

        self.rows
            .iter()
            .filter(|row| {
                row.name.contains(keyword)
                    || row.description.contains(keyword)
                    || row.address.contains(keyword)
            })
            .take(limit)
            .collect()
    }
}
