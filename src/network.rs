//! Feed fetching engine: HTTP via reqwest, parsing via feed-rs.

use crate::consts::{headers, limits};
use crate::utils::{article_id, source_host, truncate_text};
use chrono::{DateTime, Utc};
use feed_rs::parser::ParseFeedError;
use reqwest::header::ACCEPT;
use reqwest::{Client, StatusCode};
use std::future::Future;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FetchError {
    #[error("HTTP: {0}")] Http(#[from] reqwest::Error),
    #[error("Status: {0}")] Status(StatusCode),
    #[error("Parse: {0}")] Parse(#[from] ParseFeedError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct Article {
    pub id: String,
    pub title: String,
    pub link: String,
    pub category: String,
    pub source: String,
    pub timestamp: DateTime<Utc>,
}

/// Anything that can turn a feed URL into articles.
///
/// Implementations swallow their own failures: a broken feed is just an
/// empty result.
pub trait FeedSource: Send + Sync {
    fn fetch(&self, url: &str, category: &str) -> impl Future<Output = Vec<Article>> + Send;
}

pub struct NewsEngine {
    client: Client,
}

impl NewsEngine {
    pub fn new() -> Result<Arc<Self>, FetchError> {
        let client = Client::builder()
            .user_agent(headers::USER_AGENT)
            .timeout(Duration::from_secs(limits::REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Arc::new(Self { client }))
    }

    async fn try_fetch(&self, url: &str, category: &str) -> Result<Vec<Article>, FetchError> {
        let res = self.client.get(url).header(ACCEPT, headers::ACCEPT_RSS).send().await?;
        let status = res.status();
        if !status.is_success() { return Err(FetchError::Status(status)); }
        let bytes = res.bytes().await?;
        parse_articles(&bytes[..], url, category)
    }
}

impl FeedSource for NewsEngine {
    async fn fetch(&self, url: &str, category: &str) -> Vec<Article> {
        match self.try_fetch(url, category).await {
            Ok(articles) => {
                log::debug!("Fetched {} articles from {}", articles.len(), url);
                articles
            }
            Err(e) => {
                log::error!("Failed to fetch {}: {}", url, e);
                Vec::new()
            }
        }
    }
}

/// Parse a syndication document into at most `MAX_ITEMS_PER_FEED` articles.
pub fn parse_articles(bytes: &[u8], url: &str, category: &str) -> Result<Vec<Article>, FetchError> {
    let feed = feed_rs::parser::parse(bytes)?;
    let source = source_host(url);
    let captured_at = Utc::now();

    let articles = feed.entries.into_iter()
        .take(limits::MAX_ITEMS_PER_FEED)
        .filter_map(|e| {
            let raw_title = e.title.map(|t| t.content.trim().to_string()).filter(|t| !t.is_empty())?;
            let link = e.links.into_iter().next().map(|l| l.href)?;
            let title = truncate_text(&raw_title, limits::MAX_TITLE_CHARS);
            Some(Article {
                id: article_id(category, &title),
                title,
                link,
                category: category.to_string(),
                source: source.clone(),
                timestamp: captured_at,
            })
        }).collect();
    Ok(articles)
}
