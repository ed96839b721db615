//! Runtime configuration from the environment (`.env` honoured via dotenvy).

use crate::scheduler::Schedule;
use chrono::NaiveTime;
use std::env;
use thiserror::Error;

pub const TOKEN_VAR: &str = "TELOXIDE_TOKEN";
pub const BROADCAST_TIMES_VAR: &str = "NEWSBOT_BROADCAST_TIMES";

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("TELOXIDE_TOKEN not found")] MissingToken,
    #[error("invalid broadcast time {0:?}, expected HH:MM")] InvalidTime(String),
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub schedule: Schedule,
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        let token = env::var(TOKEN_VAR)
            .ok()
            .filter(|t| !t.trim().is_empty())
            .ok_or(ConfigError::MissingToken)?;

        let schedule = match env::var(BROADCAST_TIMES_VAR) {
            Ok(raw) => parse_schedule(&raw)?,
            Err(_) => Schedule::default(),
        };

        Ok(Self { token, schedule })
    }
}

/// Parse a comma separated list like `09:00,18:00`.
pub fn parse_schedule(raw: &str) -> Result<Schedule, ConfigError> {
    let times = raw
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| NaiveTime::parse_from_str(s, "%H:%M").map_err(|_| ConfigError::InvalidTime(s.to_string())))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(Schedule::new(times))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_times_in_any_order() {
        let schedule = parse_schedule(" 18:00, 09:00 ").unwrap();
        assert_eq!(schedule, Schedule::default());
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_schedule("9am").unwrap_err(), ConfigError::InvalidTime("9am".into()));
        assert_eq!(parse_schedule("25:00").unwrap_err(), ConfigError::InvalidTime("25:00".into()));
    }

    #[test]
    fn blank_list_means_no_broadcasts() {
        assert!(parse_schedule(" , ").unwrap().times().is_empty());
    }
}
