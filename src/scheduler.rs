//! Twice-daily digest broadcast.

use crate::consts::schedule::DEFAULT_FIRE_TIMES;
use crate::logic::select_news;
use crate::network::FeedSource;
use crate::store::{SubscriberId, SubscriptionStore};
use chrono::{DateTime, Days, Local, NaiveTime, TimeZone};
use std::fmt::Display;
use std::future::Future;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use teloxide::RequestError;
use tokio::time::sleep;

/// Daily fire times on the local clock, sorted and unique
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Schedule {
    times: Vec<NaiveTime>,
}

impl Default for Schedule {
    fn default() -> Self {
        Self::new(
            DEFAULT_FIRE_TIMES
                .iter()
                .filter_map(|&(h, m)| NaiveTime::from_hms_opt(h, m, 0))
                .collect(),
        )
    }
}

impl Schedule {
    pub fn new(mut times: Vec<NaiveTime>) -> Self {
        times.sort();
        times.dedup();
        Self { times }
    }

    pub fn times(&self) -> &[NaiveTime] {
        &self.times
    }

    /// Human readable list, e.g. `09:00 и 18:00`
    pub fn label(&self) -> String {
        let mut parts: Vec<String> = self.times.iter().map(|t| t.format("%H:%M").to_string()).collect();
        match parts.pop() {
            None => String::new(),
            Some(last) if parts.is_empty() => last,
            Some(last) => format!("{} и {}", parts.join(", "), last),
        }
    }

    /// First fire instant strictly after `now`. Local times that do not
    /// exist on a given day (DST gaps) are skipped.
    pub fn next_fire<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<DateTime<Tz>> {
        let tz = now.timezone();
        let today = now.date_naive();
        for offset in 0..=2 {
            let day = today.checked_add_days(Days::new(offset))?;
            for time in &self.times {
                if let Some(candidate) = tz.from_local_datetime(&day.and_time(*time)).earliest() {
                    if candidate > *now {
                        return Some(candidate);
                    }
                }
            }
        }
        None
    }
}

/// Outbound side of a broadcast
pub trait DigestSink: Send + Sync {
    type Error: Display + Send;

    fn deliver(&self, to: SubscriberId, text: String) -> impl Future<Output = Result<(), Self::Error>> + Send;
}

impl DigestSink for Bot {
    type Error = RequestError;

    async fn deliver(&self, to: SubscriberId, text: String) -> Result<(), RequestError> {
        self.send_message(ChatId(to), text)
            .parse_mode(ParseMode::Html)
            .await
            .map(|_| ())
    }
}

/// Send a fresh digest to every known subscriber. A failed delivery is
/// logged and skipped. Returns the number of successful deliveries.
pub async fn broadcast<F, S>(source: &F, sink: &S, store: &SubscriptionStore) -> usize
where
    F: FeedSource,
    S: DigestSink,
{
    let subscribers = store.snapshot();
    if subscribers.is_empty() {
        log::info!("Broadcast skipped: no subscribers");
        return 0;
    }

    let total = subscribers.len();
    let mut delivered = 0;

    for (id, categories) in subscribers {
        let categories: Vec<String> = categories.into_iter().collect();
        let text = select_news(source, &categories).await;
        match sink.deliver(id, text).await {
            Ok(()) => delivered += 1,
            Err(e) => log::warn!("Failed to deliver digest to {}: {}", id, e),
        }
    }

    log::info!("Broadcast done: {}/{} delivered", delivered, total);
    delivered
}

/// Sleep until each fire time and broadcast. Runs until the process exits.
pub async fn run<F, S>(schedule: Schedule, source: Arc<F>, sink: S, store: Arc<SubscriptionStore>)
where
    F: FeedSource,
    S: DigestSink,
{
    log::info!("Broadcast scheduled daily at {}", schedule.label());

    loop {
        let now = Local::now();
        let Some(next) = schedule.next_fire(&now) else {
            log::warn!("No broadcast times configured, scheduler stopped");
            return;
        };
        let wait = (next - now).to_std().unwrap_or_default();
        log::debug!("Next broadcast at {}", next.format("%Y-%m-%d %H:%M"));
        sleep(wait).await;

        broadcast(source.as_ref(), &sink, &store).await;
    }
}
