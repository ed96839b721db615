//! NewsBot - Telegram RSS digest bot

mod config;
mod consts;
mod handlers;
mod logic;
mod menu;
mod network;
mod scheduler;
mod store;
mod utils;

#[cfg(test)]
mod testing;

use crate::config::Config;
use crate::handlers::Command;
use crate::network::NewsEngine;
use crate::store::SubscriptionStore;
use std::error::Error;
use std::sync::Arc;
use teloxide::prelude::*;
use teloxide::utils::command::BotCommands;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    dotenvy::dotenv().ok();

    pretty_env_logger::formatted_builder()
        .filter_level(log::LevelFilter::Info)
        .parse_env("RUST_LOG")
        .init();

    log::info!("═══════════════════════════════════════════");
    log::info!("  NEWSBOT ONLINE. GATHERING HEADLINES...");
    log::info!("═══════════════════════════════════════════");

    let config = Config::from_env()?;
    let bot = Bot::new(config.token);
    let engine = NewsEngine::new()?;
    let store = Arc::new(SubscriptionStore::new());
    let schedule = Arc::new(config.schedule.clone());

    // Fails fast on a bad token
    bot.set_my_commands(Command::bot_commands()).await?;

    tokio::spawn(scheduler::run(
        config.schedule,
        Arc::clone(&engine),
        bot.clone(),
        Arc::clone(&store),
    ));

    Dispatcher::builder(bot, handlers::schema())
        .dependencies(dptree::deps![store, engine, schedule])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}
