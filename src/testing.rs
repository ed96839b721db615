//! In-memory collaborators shared by unit tests.

use crate::network::{Article, FeedSource};
use crate::utils::{article_id, source_host};
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Mutex;

pub fn article(category: &str, title: &str, link: &str) -> Article {
    Article {
        id: article_id(category, title),
        title: title.to_string(),
        link: link.to_string(),
        category: category.to_string(),
        source: source_host(link),
        timestamp: Utc::now(),
    }
}

/// Serves canned articles per category and records every requested URL.
/// Categories without canned articles behave like a broken feed.
#[derive(Default)]
pub struct StaticFeeds {
    by_category: HashMap<String, Vec<Article>>,
    calls: Mutex<Vec<String>>,
}

impl StaticFeeds {
    pub fn with_category(mut self, name: &str, count: usize) -> Self {
        let articles = (1..=count)
            .map(|i| {
                let mut a = article(name, &format!("{} новость {}", name, i), &format!("https://news.test/{}", i));
                a.id = format!("{}_{}", name, i);
                a
            })
            .collect();
        self.by_category.insert(name.to_string(), articles);
        self
    }

    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }
}

impl FeedSource for StaticFeeds {
    async fn fetch(&self, url: &str, category: &str) -> Vec<Article> {
        self.calls.lock().unwrap().push(url.to_string());
        self.by_category.get(category).cloned().unwrap_or_default()
    }
}
