//! Telegram endpoints: commands and inline button presses.

use crate::consts::texts;
use crate::logic::select_news;
use crate::menu::{main_menu, respond, start_menu, Action, Reply};
use crate::network::NewsEngine;
use crate::scheduler::Schedule;
use crate::store::SubscriptionStore;
use std::sync::Arc;
use teloxide::dispatching::UpdateHandler;
use teloxide::prelude::*;
use teloxide::types::{ChatId, ParseMode};
use teloxide::utils::command::BotCommands;
use teloxide::RequestError;

#[derive(BotCommands, Clone, Debug)]
#[command(rename_rule = "lowercase", description = "Available commands:")]
pub enum Command {
    #[command(description = "Welcome screen")]
    Start,
    #[command(description = "Fresh news digest")]
    News,
}

pub fn schema() -> UpdateHandler<RequestError> {
    dptree::entry()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_callback_query().endpoint(handle_callback))
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    store: Arc<SubscriptionStore>,
    engine: Arc<NewsEngine>,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;

    match cmd {
        Command::Start => {
            bot.send_message(chat_id, texts::WELCOME)
                .reply_markup(start_menu())
                .await?;
        }
        Command::News => {
            let categories: Vec<String> = store.categories_or_default(chat_id.0).into_iter().collect();
            let loading_msg = bot.send_message(chat_id, texts::LOADING).await?;

            send_digest(&bot, chat_id, &engine, &categories).await?;
            let _ = bot.delete_message(chat_id, loading_msg.id).await;

            bot.send_message(chat_id, texts::NEXT_NEWS_COMMAND_HINT)
                .reply_markup(main_menu())
                .await?;
        }
    }

    Ok(())
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    store: Arc<SubscriptionStore>,
    engine: Arc<NewsEngine>,
    schedule: Arc<Schedule>,
) -> ResponseResult<()> {
    // Acknowledge first so the client stops its spinner whatever happens next
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(message) = q.message else { return Ok(()) };
    let Some(action) = q.data.as_deref().and_then(Action::decode) else {
        log::debug!("Ignoring callback {:?} from {}", q.data, q.from.id);
        return Ok(());
    };

    let chat_id = message.chat.id;

    match respond(action, chat_id.0, &store, &schedule) {
        Reply::Edit { text, keyboard } => {
            bot.edit_message_text(chat_id, message.id, text)
                .reply_markup(keyboard)
                .await?;
        }
        Reply::Redraw(keyboard) => {
            bot.edit_message_reply_markup(chat_id, message.id)
                .reply_markup(keyboard)
                .await?;
        }
        Reply::SendDigest(categories) => {
            bot.edit_message_text(chat_id, message.id, texts::LOADING).await?;
            send_digest(&bot, chat_id, &engine, &categories).await?;
            bot.send_message(chat_id, texts::NEXT_NEWS_BUTTON_HINT)
                .reply_markup(main_menu())
                .await?;
        }
    }

    Ok(())
}

async fn send_digest(
    bot: &Bot,
    chat_id: ChatId,
    engine: &NewsEngine,
    categories: &[String],
) -> ResponseResult<()> {
    let digest = select_news(engine, categories).await;
    bot.send_message(chat_id, digest)
        .parse_mode(ParseMode::Html)
        .await?;
    Ok(())
}
