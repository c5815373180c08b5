//! Chat reply text for search results.

use exhibition_crawler::DatasetRow;
use line::MAX_TEXT_CHARS;

pub const NO_RESULTS: &str = "找不到符合的展覽，可以試試其他關鍵字～";

const NO_DATA: &str = "無資料";
const UNNAMED: &str = "未命名展覽";
const SEPARATOR: &str = "－－－－－－";
const ELLIPSIS: char = '…';

/// Longest description shown per exhibition.
pub const DESCRIPTION_CHARS: usize = 120;

/// Render `records` as one chat message.
///
/// Address and opening hours fall back to `site_info` when a row has none of
/// its own. Blocks that would push the message past the platform limit are
/// left out.
pub fn format_reply(records: &[&DatasetRow], site_info: Option<&DatasetRow>) -> String {
    if records.is_empty() {
        return NO_RESULTS.to_string();
    }

    let mut reply = String::new();
    let mut length = 0;
    for record in records {
        let block = format_block(record, site_info);
        let block_len = block.chars().count();
        let added = if reply.is_empty() { block_len } else { block_len + 1 };

        if length + added > MAX_TEXT_CHARS {
            if reply.is_empty() {
                return truncate(&block, MAX_TEXT_CHARS);
            }
            break;
        }
        if !reply.is_empty() {
            reply.push('\n');
        }
        reply.push_str(&block);
        length += added;
    }
    reply
}

fn format_block(record: &DatasetRow, site_info: Option<&DatasetRow>) -> String {
    let address = own_or_site(&record.address, site_info.map(|row| row.address.as_str()));
    let hours = own_or_site(
        &record.opening_hours,
        site_info.map(|row| row.opening_hours.as_str()),
    );

    format!(
        "《{}》\n📍 地點：{}\n📅 日期：{}\n📍 地址：{}\n⏰ 開放時間：{}\n📝 介紹：{}\n{}",
        or_default(&record.name, UNNAMED),
        or_default(&record.place, NO_DATA),
        or_default(&record.date_range, NO_DATA),
        or_default(address, NO_DATA),
        or_default(hours, NO_DATA),
        or_default(&truncate(&record.description, DESCRIPTION_CHARS), NO_DATA),
        SEPARATOR,
    )
}

fn own_or_site<'a>(own: &'a str, site: Option<&'a str>) -> &'a str {
    if own.trim().is_empty() {
        site.unwrap_or_default()
    } else {
        own
    }
}

fn or_default<'a>(value: &'a str, fallback: &'a str) -> &'a str {
    let value = value.trim();
    if value.is_empty() {
        fallback
    } else {
        value
    }
}

/// Cut `text` to at most `max` characters, marking the cut with `…`.
fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push(ELLIPSIS);
    cut
}
