use crate::consts::limits;
use reqwest::Url;
use std::collections::hash_map::DefaultHasher;
use std::hash::{Hash, Hasher};

const ELLIPSIS: &str = "...";

/// Shorten to at most `max_chars`, the ellipsis included.
pub fn truncate_text(s: &str, max_chars: usize) -> String {
    if s.chars().count() <= max_chars { return s.to_string(); }
    let keep = max_chars.saturating_sub(ELLIPSIS.len());
    s.chars().take(keep).collect::<String>() + ELLIPSIS
}

/// Article identifier: `<category>_<hash(title) mod 10000>`.
/// Different titles may collide; the selector merges them.
pub fn article_id(category: &str, title: &str) -> String {
    let mut hasher = DefaultHasher::new();
    title.hash(&mut hasher);
    format!("{}_{}", category, hasher.finish() % limits::ID_HASH_MODULUS)
}

/// Host part of a feed URL, e.g. `lenta.ru` for `https://lenta.ru/rss`.
pub fn source_host(feed_url: &str) -> String {
    if let Some(host) = Url::parse(feed_url).ok().and_then(|u| u.host_str().map(str::to_string)) {
        return host;
    }
    feed_url.split('/').nth(2).unwrap_or(feed_url).to_string()
}

pub fn escape_html(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}
