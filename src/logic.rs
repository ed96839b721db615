//! Business logic layer - source picking, dedup, sampling and digest rendering

use crate::consts::{find_category, limits, texts};
use crate::network::{Article, FeedSource};
use crate::utils::escape_html;
use futures::future::join_all;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;

/// Build a digest for `categories` using fresh entropy.
pub async fn select_news<F: FeedSource>(source: &F, categories: &[String]) -> String {
    let mut rng = StdRng::from_entropy();
    select_news_with(source, categories, &mut rng).await
}

/// Build a digest: one random feed per known category, merged, deduplicated,
/// then a random sample of at most `DIGEST_SIZE` articles.
pub async fn select_news_with<F, R>(source: &F, categories: &[String], rng: &mut R) -> String
where
    F: FeedSource,
    R: Rng + Send,
{
    if categories.is_empty() {
        return texts::NO_CATEGORIES.to_string();
    }

    let picks = pick_feeds(categories, rng);
    let fetches = picks.iter().map(|(category, url)| source.fetch(url, category));
    let pool: Vec<Article> = join_all(fetches).await.into_iter().flatten().collect();

    if pool.is_empty() {
        return texts::NO_NEWS.to_string();
    }

    let mut unique = dedup_articles(pool);
    unique.shuffle(rng);
    unique.truncate(limits::DIGEST_SIZE);

    render_digest(categories, &unique)
}

/// Pick one feed URL per known category. Unknown names are skipped.
pub fn pick_feeds<R: Rng>(categories: &[String], rng: &mut R) -> Vec<(&'static str, &'static str)> {
    categories
        .iter()
        .filter_map(|name| find_category(name))
        .filter_map(|cat| cat.feeds.choose(rng).map(|url| (cat.name, *url)))
        .collect()
}

/// Collapse articles sharing an id. The later article wins but keeps the
/// slot of the first one, so the output order is reproducible.
pub fn dedup_articles(pool: Vec<Article>) -> Vec<Article> {
    let mut slots: HashMap<String, usize> = HashMap::with_capacity(pool.len());
    let mut unique: Vec<Article> = Vec::with_capacity(pool.len());

    for article in pool {
        match slots.get(&article.id) {
            Some(&idx) => unique[idx] = article,
            None => {
                slots.insert(article.id.clone(), unique.len());
                unique.push(article);
            }
        }
    }
    unique
}

// ═══════════════════════════════════════════════════════════════════
// HTML FORMATTING
// ═══════════════════════════════════════════════════════════════════

pub fn render_digest(categories: &[String], articles: &[Article]) -> String {
    let mut output = String::with_capacity(1024);
    output.push_str(&format!(
        "{} ({}):</b>\n\n",
        texts::DIGEST_HEADER,
        escape_html(&categories.join(", "))
    ));

    for (i, article) in articles.iter().enumerate() {
        output.push_str(&format!(
            "<b>{}. {}</b>\n🏷️ {} | 📡 {}\n<a href=\"{}\">{}</a>\n\n",
            i + 1,
            escape_html(&article.title),
            escape_html(&article.category),
            escape_html(&article.source),
            escape_html(&article.link),
            texts::READ_MORE,
        ));
    }
    output
}
