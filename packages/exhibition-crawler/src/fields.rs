//! Field catalog for the museum's markup.
//!
//! Each field's quirks live here as data; [`crate::extract`] interprets them.

use scraper::{Html, Selector};

use crate::extract::{extract, extract_within, stripped_text, FieldSpec, Rule};

/// Any of these appearing means a detail view has rendered enough to read.
pub const READY_SIGNALS: [&str; 3] = ["div.exhibition-title", "h1", "p.date-middle"];

const INFO_ITEMS: &str = "ul.unstyled.spacingB-20 > li";
const LISTING_BLOCK: &str = "div.row.Exhibition_list";
const OPENING_HOURS_TABLE: &str = "div.spacingB-20.web table.table1";
const OPENING_HOURS_CELLS: &str = "tbody tr td";
pub const WEEKDAYS: [&str; 7] = ["週一", "週二", "週三", "週四", "週五", "週六", "週日"];

pub fn exhibition_name() -> FieldSpec {
    FieldSpec::new("name")
        .rule(Rule::text("span#CPContent_lbExName"))
        .rule(Rule::text("h1"))
}

pub fn exhibition_date() -> FieldSpec {
    FieldSpec::new("date_range").rule(Rule::text("span#CPContent_lbDate"))
}

pub fn exhibition_description() -> FieldSpec {
    FieldSpec::new("description").rule(Rule::text("div.info-content.txt"))
}

pub fn listing_place() -> FieldSpec {
    FieldSpec::new("place").rule(Rule::text("p.info-middle"))
}

pub fn address() -> FieldSpec {
    FieldSpec::new("address")
        .rule(Rule::link_text(INFO_ITEMS, "a").labelled("地址"))
        .rule(Rule::after(INFO_ITEMS, '：').labelled("地址"))
}

pub fn phone() -> FieldSpec {
    FieldSpec::new("phone").rule(Rule::after(INFO_ITEMS, '：').labelled("電話"))
}

pub fn fax() -> FieldSpec {
    FieldSpec::new("fax").rule(Rule::after(INFO_ITEMS, '：').labelled("傳真"))
}

pub fn email() -> FieldSpec {
    FieldSpec::new("email")
        .rule(Rule::link_text(INFO_ITEMS, r#"a[href^="mailto:"]"#).labelled("電子郵件"))
        .rule(Rule::after(INFO_ITEMS, '：').labelled("電子郵件"))
}

/// Place text for a card, looked up in the expanded listing page.
///
/// The listing block is the first one whose markup mentions the card label.
pub fn place_for_card(listing: &Html, label: &str) -> String {
    if label.is_empty() {
        return String::new();
    }
    let Ok(block_selector) = Selector::parse(LISTING_BLOCK) else {
        return String::new();
    };

    listing
        .select(&block_selector)
        .find(|block| block.html().contains(label))
        .map(|block| extract_within(block, &listing_place()))
        .unwrap_or_default()
}

/// Weekday schedule as `週一：<v> / 週二：<v> / ...`.
///
/// Cells map to weekdays in order; a missing or blank cell prints `-`.
/// Empty when the hours table is absent.
pub fn opening_hours(doc: &Html) -> String {
    let (Ok(table_selector), Ok(cell_selector)) = (
        Selector::parse(OPENING_HOURS_TABLE),
        Selector::parse(OPENING_HOURS_CELLS),
    ) else {
        return String::new();
    };
    let Some(table) = doc.select(&table_selector).next() else {
        return String::new();
    };

    let cells: Vec<String> = table
        .select(&cell_selector)
        .map(|td| stripped_text(td, ""))
        .collect();

    WEEKDAYS
        .iter()
        .enumerate()
        .map(|(i, day)| {
            let value = cells.get(i).map(String::as_str).filter(|v| !v.is_empty());
            format!("{}：{}", day, value.unwrap_or("-"))
        })
        .collect::<Vec<_>>()
        .join(" / ")
}

/// Name from the detail page, falling back to the card label.
pub fn name_or(doc: &Html, label: &str) -> String {
    let name = extract(doc, &exhibition_name());
    if name.is_empty() {
        label.to_string()
    } else {
        name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const LISTING: &str = r#"
        <div class="row Exhibition_list">
            <a class="ExPage" title="城市的肖像">城市的肖像</a>
            <p class="info-middle">二樓 2A</p>
        </div>
        <div class="row Exhibition_list">
            <a class="ExPage" title="光的練習">光的練習</a>
            <p class="info-middle"> 地下樓 B </p>
        </div>
    "#;

    #[test]
    fn place_comes_from_matching_block() {
        let doc = Html::parse_document(LISTING);
        assert_eq!(place_for_card(&doc, "光的練習"), "地下樓 B");
        assert_eq!(place_for_card(&doc, "城市的肖像"), "二樓 2A");
    }

    #[test]
    fn place_missing_for_unknown_or_blank_label() {
        let doc = Html::parse_document(LISTING);
        assert_eq!(place_for_card(&doc, "不存在"), "");
        assert_eq!(place_for_card(&doc, ""), "");
    }

    #[test]
    fn opening_hours_fill_missing_days() {
        let doc = Html::parse_document(
            r#"<div class="spacingB-20 web"><table class="table1"><tbody>
                <tr><td>休館</td><td>09:30-17:30</td><td></td></tr>
            </tbody></table></div>"#,
        );

        assert_eq!(
            opening_hours(&doc),
            "週一：休館 / 週二：09:30-17:30 / 週三：- / 週四：- / 週五：- / 週六：- / 週日：-"
        );
    }

    #[test]
    fn opening_hours_absent() {
        let doc = Html::parse_document("<table class=\"table1\"></table>");
        assert_eq!(opening_hours(&doc), "");
    }

    #[test]
    fn opening_hours_empty_table_prints_dashes() {
        let doc = Html::parse_document(
            r#"<div class="spacingB-20 web"><table class="table1"></table></div>"#,
        );
        assert_eq!(
            opening_hours(&doc),
            "週一：- / 週二：- / 週三：- / 週四：- / 週五：- / 週六：- / 週日：-"
        );
    }

    #[test]
    fn name_falls_back_to_heading_then_label() {
        let with_span = Html::parse_document(
            r#"<h1>網站標題</h1><span id="CPContent_lbExName">展覽名稱</span>"#,
        );
        assert_eq!(name_or(&with_span, "卡片"), "展覽名稱");

        let heading_only = Html::parse_document("<h1>網站標題</h1>");
        assert_eq!(name_or(&heading_only, "卡片"), "網站標題");

        let bare = Html::parse_document("<p>空</p>");
        assert_eq!(name_or(&bare, "卡片"), "卡片");
    }
}
