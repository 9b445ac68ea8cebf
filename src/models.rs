// ABOUTME: Record types extracted from a podcast feed.
// ABOUTME: Optional fields are the absent marker; boolean fields are total and default false.

use std::collections::BTreeSet;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// The channel-level record extracted from one RSS 2.0 document.
///
/// Every string field stores the literal element text. A missing or
/// malformed tag leaves its field `None`; no field distinguishes "present
/// but empty" from absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Podcast {
    pub title: Option<String>,
    pub link: Option<String>,
    pub description: Option<String>,
    pub copyright: Option<String>,
    pub generator: Option<String>,
    pub language: Option<String>,
    pub managing_editor: Option<String>,
    pub web_master: Option<String>,
    pub subtitle: Option<String>,
    pub summary: Option<String>,
    pub creative_commons: Option<String>,
    pub ttl: Option<String>,

    /// `<category>` texts in document order, duplicates kept.
    pub categories: Vec<String>,
    /// `<itunes:category text="...">` values in document order.
    pub itunes_categories: Vec<String>,
    /// Comma-split, trimmed, deduplicated `<itunes:keywords>` terms.
    /// Empty when the tag is missing.
    pub itunes_keywords: BTreeSet<String>,

    pub itunes_author_name: Option<String>,
    /// True only for `<itunes:block>yes</itunes:block>` (any case).
    pub itunes_block: bool,
    pub itunes_complete: Option<String>,
    pub itunes_explicit: Option<String>,
    pub itunes_image: Option<String>,
    pub itunes_new_feed_url: Option<String>,
    pub owner_name: Option<String>,
    pub owner_email: Option<String>,

    pub image_title: Option<String>,
    pub image_url: Option<String>,
    pub image_link: Option<String>,
    pub image_width: Option<String>,
    pub image_height: Option<String>,

    /// `href` of the first `<atom:link rel="hub">`.
    pub pubsubhubbub_url: Option<String>,

    pub published_date_raw: Option<String>,
    /// Epoch seconds with the pubDate timezone offset folded in.
    pub published_timestamp: Option<i64>,
    /// Calendar day of the pubDate, timezone ignored.
    pub published_date: Option<NaiveDate>,
    /// Kept raw, never normalized.
    pub last_build_date: Option<String>,

    /// True iff title, link, and description are all present.
    pub is_valid_rss: bool,
    /// True iff some entry has an `audio/mpeg` enclosure (case-insensitive).
    pub is_valid_podcast: bool,

    pub entries: Vec<Entry>,
}

/// The record extracted from one `<item>` subtree.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Entry {
    pub title: Option<String>,
    pub author: Option<String>,
    pub comments: Option<String>,
    pub description: Option<String>,
    pub guid: Option<String>,
    pub link: Option<String>,
    pub creative_commons: Option<String>,

    /// `<category>` texts in document order, duplicates kept.
    pub categories: Vec<String>,

    pub enclosure_url: Option<String>,
    pub enclosure_type: Option<String>,
    /// Byte size parsed from the `length` attribute; absent when missing
    /// or non-numeric.
    pub enclosure_length: Option<u64>,

    pub itunes_author_name: Option<String>,
    /// True only for `<itunes:block>yes</itunes:block>` (any case).
    pub itunes_block: bool,
    /// Lowercased on read; absent stays absent.
    pub itunes_closed_captioned: Option<String>,
    pub itunes_duration: Option<String>,
    /// Lowercased on read.
    pub itunes_explicit: Option<String>,
    pub itunes_image: Option<String>,
    /// Lowercased on read.
    pub itunes_order: Option<String>,
    pub itunes_subtitle: Option<String>,
    pub itunes_summary: Option<String>,

    pub published_date_raw: Option<String>,
    pub published_timestamp: Option<i64>,
    pub published_date: Option<NaiveDate>,
}
