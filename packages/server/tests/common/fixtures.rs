//! Test fixtures for creating test data.
//!
//! Rows mirror what the crawler exports: exhibitions first, then the
//! visitor-information row.

use std::sync::Arc;

use bot_core::domains::exhibitions::ExhibitionIndex;
use bot_core::kernel::{ServerDeps, TestMessenger};
use exhibition_crawler::DatasetRow;

pub const CHANNEL_SECRET: &str = "test-channel-secret";

pub fn exhibition(id: u32, name: &str, place: &str, description: &str) -> DatasetRow {
    DatasetRow {
        name: name.to_string(),
        detail_url: format!("https://www.tfam.museum/Exhibition/Exhibition_page.aspx?id={id}"),
        place: place.to_string(),
        date_range: "2026/05/01 - 2026/08/30".to_string(),
        description: description.to_string(),
        ..Default::default()
    }
}

pub fn site_info() -> DatasetRow {
    DatasetRow {
        address: "10461臺北市中山區中山北路三段181號".to_string(),
        phone: "02-2595-7656".to_string(),
        opening_hours: "週一：休館 / 週二：09:30-17:30".to_string(),
        ..Default::default()
    }
}

/// A small dataset with three exhibitions and the site-info row.
pub fn sample_index() -> ExhibitionIndex {
    ExhibitionIndex::new(vec![
        exhibition(1, "臺北雙年展", "一樓 1A", "當代藝術的城市對話"),
        exhibition(2, "兒童藝術教育中心：光的遊戲", "地下樓", "給兒童的互動展"),
        exhibition(3, "典藏常設展", "三樓", "美術館典藏作品精選"),
        site_info(),
    ])
}

pub fn test_deps(messenger: &TestMessenger, index: ExhibitionIndex) -> ServerDeps {
    ServerDeps::new(Arc::new(messenger.clone()), Arc::new(index), 5)
}
