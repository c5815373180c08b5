//! Records produced by a crawl.

use serde::{Deserialize, Serialize};

/// One exhibition, built from a single detail view.
///
/// Identity is `detail_url`; two records with the same URL are the same
/// exhibition as far as the dataset is concerned.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExhibitionRecord {
    pub name: String,
    pub detail_url: String,
    pub place: String,
    pub date_range: String,
    pub description: String,
}

impl ExhibitionRecord {
    pub fn new(name: impl Into<String>, detail_url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            detail_url: detail_url.into(),
            place: String::new(),
            date_range: String::new(),
            description: String::new(),
        }
    }

    pub fn with_place(mut self, place: impl Into<String>) -> Self {
        self.place = place.into();
        self
    }

    pub fn with_date_range(mut self, date_range: impl Into<String>) -> Self {
        self.date_range = date_range.into();
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Visitor information for the museum itself. One per run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SiteInfoRecord {
    pub address: String,
    pub phone: String,
    pub fax: String,
    pub email: String,
    /// Weekday schedule, e.g. `週一：休館 / 週二：09:30-17:30 / ...`
    pub opening_hours: String,
}

/// Everything a run exports: exhibitions in discovery order plus the site info.
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub exhibitions: Vec<ExhibitionRecord>,
    pub site_info: SiteInfoRecord,
}
