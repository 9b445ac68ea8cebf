// ABOUTME: Item-level extraction mapping one <item> subtree to an Entry record.
// ABOUTME: Every lookup is first-match; any failure leaves the field absent.

use crate::document::Element;
use crate::models::Entry;
use crate::time_parse::normalize_pub_date;

/// Extracts an [`Entry`] from one `<item>` subtree.
///
/// Lookups never leave the subtree, so an item field can never be satisfied
/// by a channel-level tag or by a sibling item.
pub fn extract_entry(item: &Element) -> Entry {
    let published_date_raw = item.find_text("pubdate");
    let (published_timestamp, published_date) = normalize_pub_date(published_date_raw.as_deref());
    let enclosure = item.find("enclosure");

    Entry {
        title: item.find_text("title"),
        author: item.find_text("author"),
        comments: item.find_text("comments"),
        description: item.find_text("description"),
        guid: item.find_text("guid"),
        link: item.find_text("link"),
        creative_commons: item.find_text("creativecommons:license"),
        categories: collect_categories(item),
        enclosure_url: enclosure.and_then(|e| e.attr("url")).map(str::to_string),
        enclosure_type: enclosure.and_then(|e| e.attr("type")).map(str::to_string),
        // Non-numeric sizes are absent, not an error.
        enclosure_length: enclosure
            .and_then(|e| e.attr("length"))
            .and_then(|v| v.trim().parse::<u64>().ok()),
        itunes_author_name: item.find_text("itunes:author"),
        itunes_block: is_blocked(item.find_text("itunes:block").as_deref()),
        itunes_closed_captioned: lowercased(item.find_text("itunes:isclosedcaptioned")),
        itunes_duration: item.find_text("itunes:duration"),
        itunes_explicit: lowercased(item.find_text("itunes:explicit")),
        itunes_image: item.find_attr("itunes:image", "href"),
        itunes_order: lowercased(item.find_text("itunes:order")),
        itunes_subtitle: item.find_text("itunes:subtitle"),
        itunes_summary: item.find_text("itunes:summary"),
        published_date_raw,
        published_timestamp,
        published_date,
    }
}

/// `<category>` texts in document order. Duplicates are kept; categories with
/// no text contribute nothing.
pub(crate) fn collect_categories(scope: &Element) -> Vec<String> {
    scope
        .find_all("category")
        .into_iter()
        .filter_map(|c| c.text())
        .collect()
}

/// The `itunes:block` test: exactly the text "yes" after lowercasing.
/// Absent and every other value mean not blocked, so the result is total.
pub(crate) fn is_blocked(text: Option<&str>) -> bool {
    text.map(|t| t.to_lowercase() == "yes").unwrap_or(false)
}

pub(crate) fn lowercased(text: Option<String>) -> Option<String> {
    text.map(|t| t.to_lowercase())
}
