// ABOUTME: Channel-level extraction producing the Podcast record.
// ABOUTME: Splits the document, extracts entries, then fills every channel field.

use std::collections::BTreeSet;

use crate::document::{split, Element, SplitDocument};
use crate::error::ParseError;
use crate::item::{collect_categories, extract_entry, is_blocked, lowercased};
use crate::models::{Entry, Podcast};
use crate::time_parse::normalize_pub_date;

/// Parses raw feed text into a [`Podcast`] record.
///
/// # Arguments
/// * `feed_text` - A complete RSS 2.0 document, iTunes tags included
///
/// # Returns
/// * `Ok(Podcast)` - The best-effort record; missing or malformed fields are
///   absent, never an error
/// * `Err(ParseError)` - Empty input, or nothing recoverable from it
pub fn parse_podcast(feed_text: &str) -> Result<Podcast, ParseError> {
    let doc = split(feed_text)?;
    let entries: Vec<Entry> = doc.items.iter().map(extract_entry).collect();
    Ok(build_podcast(&doc, entries))
}

fn build_podcast(doc: &SplitDocument, entries: Vec<Entry>) -> Podcast {
    let channel = &doc.channel;
    let image = doc.feed_image.as_ref();
    let owner = channel.find("itunes:owner");

    let published_date_raw = channel.find_text("pubdate");
    let (published_timestamp, published_date) = normalize_pub_date(published_date_raw.as_deref());

    let mut podcast = Podcast {
        title: channel.find_text("title"),
        link: channel.find_text("link"),
        description: channel.find_text("description"),
        copyright: channel.find_text("copyright"),
        generator: channel.find_text("generator"),
        language: channel.find_text("language"),
        managing_editor: channel.find_text("managingeditor"),
        web_master: channel.find_text("webmaster"),
        subtitle: channel.find_text("itunes:subtitle"),
        summary: channel.find_text("itunes:summary"),
        creative_commons: channel.find_text("creativecommons:license"),
        ttl: channel.find_text("ttl"),
        categories: collect_categories(channel),
        itunes_categories: itunes_categories(channel),
        itunes_keywords: keyword_set(channel.find_text("itunes:keywords").as_deref()),
        itunes_author_name: channel.find_text("itunes:author"),
        itunes_block: is_blocked(channel.find_text("itunes:block").as_deref()),
        itunes_complete: lowercased(channel.find_text("itunes:complete")),
        itunes_explicit: lowercased(channel.find_text("itunes:explicit")),
        itunes_image: channel.find_attr("itunes:image", "href"),
        itunes_new_feed_url: channel.find_text("itunes:new-feed-url"),
        // Each owner sub-field fails independently.
        owner_name: owner.and_then(|o| o.find_text("itunes:name")),
        owner_email: owner.and_then(|o| o.find_text("itunes:email")),
        image_title: image.and_then(|i| i.find_text("title")),
        image_url: image.and_then(|i| i.find_text("url")),
        image_link: image.and_then(|i| i.find_text("link")),
        image_width: image.and_then(|i| i.find_text("width")),
        image_height: image.and_then(|i| i.find_text("height")),
        pubsubhubbub_url: hub_url(channel),
        published_date_raw,
        published_timestamp,
        published_date,
        last_build_date: channel.find_text("lastbuilddate"),
        is_valid_rss: false,
        is_valid_podcast: false,
        entries,
    };

    // Validity is derived last, over the finished record.
    podcast.is_valid_rss =
        podcast.title.is_some() && podcast.link.is_some() && podcast.description.is_some();
    podcast.is_valid_podcast = podcast.entries.iter().any(|e| {
        e.enclosure_type
            .as_deref()
            .map(|t| t.eq_ignore_ascii_case("audio/mpeg"))
            .unwrap_or(false)
    });
    podcast
}

/// `text` attributes of every `<itunes:category>`, nested subcategories
/// included, in document order.
fn itunes_categories(channel: &Element) -> Vec<String> {
    channel
        .find_all("itunes:category")
        .into_iter()
        .filter_map(|c| c.attr("text").map(str::to_string))
        .collect()
}

/// Splits `<itunes:keywords>` on commas, trims each term, and deduplicates.
/// A missing tag yields an empty set rather than an absent field.
fn keyword_set(text: Option<&str>) -> BTreeSet<String> {
    match text {
        None => BTreeSet::new(),
        Some(t) => t.split(',').map(|k| k.trim().to_string()).collect(),
    }
}

/// `href` of the first `<atom:link rel="hub">`.
fn hub_url(channel: &Element) -> Option<String> {
    channel
        .find_all("atom:link")
        .into_iter()
        .find(|link| link.attr("rel") == Some("hub"))
        .and_then(|link| link.attr("href"))
        .map(str::to_string)
}
