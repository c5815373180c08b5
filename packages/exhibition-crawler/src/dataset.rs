//! On-disk dataset schema shared by the exporter and its readers.
//!
//! One header row, one row per exhibition (info columns blank), then a single
//! site-info row (exhibition columns blank). The file is UTF-8 with a BOM.

use std::fs::File;
use std::io::Read;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::DatasetError;
use crate::types::{ExhibitionRecord, SiteInfoRecord};

pub const COL_NAME: &str = "展覽名稱";
pub const COL_URL: &str = "連結";
pub const COL_PLACE: &str = "地點";
pub const COL_DATE: &str = "日期";
pub const COL_DESCRIPTION: &str = "介紹";
pub const COL_ADDRESS: &str = "地址";
pub const COL_PHONE: &str = "電話";
pub const COL_FAX: &str = "傳真";
pub const COL_EMAIL: &str = "電子郵件";
pub const COL_OPENING_HOURS: &str = "開放時間";

/// Header order of the exported file.
pub const COLUMNS: [&str; 10] = [
    COL_NAME,
    COL_URL,
    COL_PLACE,
    COL_DATE,
    COL_DESCRIPTION,
    COL_ADDRESS,
    COL_PHONE,
    COL_FAX,
    COL_EMAIL,
    COL_OPENING_HOURS,
];

pub(crate) const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

/// One line of the dataset file. Field order matches [`COLUMNS`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatasetRow {
    #[serde(rename = "展覽名稱", default)]
    pub name: String,
    #[serde(rename = "連結", default)]
    pub detail_url: String,
    #[serde(rename = "地點", default)]
    pub place: String,
    #[serde(rename = "日期", default)]
    pub date_range: String,
    #[serde(rename = "介紹", default)]
    pub description: String,
    #[serde(rename = "地址", default)]
    pub address: String,
    #[serde(rename = "電話", default)]
    pub phone: String,
    #[serde(rename = "傳真", default)]
    pub fax: String,
    #[serde(rename = "電子郵件", default)]
    pub email: String,
    #[serde(rename = "開放時間", default)]
    pub opening_hours: String,
}

impl DatasetRow {
    /// True for the trailing visitor-information row.
    ///
    /// Every exhibition row carries its detail URL, so the site-info row is
    /// the one without a link, even when all of its info columns are blank.
    pub fn is_site_info(&self) -> bool {
        self.detail_url.trim().is_empty()
    }
}

impl From<&ExhibitionRecord> for DatasetRow {
    fn from(record: &ExhibitionRecord) -> Self {
        Self {
            name: record.name.clone(),
            detail_url: record.detail_url.clone(),
            place: record.place.clone(),
            date_range: record.date_range.clone(),
            description: record.description.clone(),
            ..Default::default()
        }
    }
}

impl From<&SiteInfoRecord> for DatasetRow {
    fn from(info: &SiteInfoRecord) -> Self {
        Self {
            address: info.address.clone(),
            phone: info.phone.clone(),
            fax: info.fax.clone(),
            email: info.email.clone(),
            opening_hours: info.opening_hours.clone(),
            ..Default::default()
        }
    }
}

/// Load a dataset file written by [`crate::export::export`].
pub fn load_dataset(path: impl AsRef<Path>) -> Result<Vec<DatasetRow>, DatasetError> {
    read_dataset(File::open(path)?)
}

/// Parse dataset rows, tolerating a leading BOM.
///
/// Every column in [`COLUMNS`] must be present in the header.
pub fn read_dataset<R: Read>(mut reader: R) -> Result<Vec<DatasetRow>, DatasetError> {
    let mut raw = String::new();
    reader.read_to_string(&mut raw)?;
    let body = raw.strip_prefix('\u{feff}').unwrap_or(&raw);

    let mut csv = csv::ReaderBuilder::new()
        .flexible(true)
        .from_reader(body.as_bytes());

    let headers = csv.headers()?.clone();
    if let Some(missing) = COLUMNS
        .iter()
        .find(|column| !headers.iter().any(|h| h.trim() == **column))
    {
        return Err(DatasetError::MissingColumn(*missing));
    }

    csv.deserialize()
        .collect::<Result<Vec<DatasetRow>, _>>()
        .map_err(DatasetError::from)
}
