//! Inline keyboards, callback payload protocol and the button state machine.

use crate::consts::{find_category, texts, CATALOG};
use crate::scheduler::Schedule;
use crate::store::{SubscriberId, SubscriptionStore};
use std::collections::BTreeSet;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

/// Callback payload vocabulary
pub mod payloads {
    pub const CATEGORY_PREFIX: &str = "cat_";
    pub const START_WORK: &str = "start_work";
    pub const SAVE_CATEGORIES: &str = "save_cats";
    pub const GET_NEWS: &str = "get_news";
    pub const CHANGE_CATEGORIES: &str = "change_cats";
}

/// Button action decoded from callback data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    StartWork,
    /// Toggle a catalog category
    Toggle(&'static str),
    SaveCategories,
    GetNews,
    ChangeCategories,
}

impl Action {
    /// Decode raw callback data. Unknown payloads and categories outside the
    /// catalog yield `None`.
    pub fn decode(data: &str) -> Option<Self> {
        if let Some(name) = data.strip_prefix(payloads::CATEGORY_PREFIX) {
            return find_category(name).map(|c| Action::Toggle(c.name));
        }
        match data {
            payloads::START_WORK => Some(Action::StartWork),
            payloads::SAVE_CATEGORIES => Some(Action::SaveCategories),
            payloads::GET_NEWS => Some(Action::GetNews),
            payloads::CHANGE_CATEGORIES => Some(Action::ChangeCategories),
            _ => None,
        }
    }

    pub fn payload(&self) -> String {
        match self {
            Action::StartWork => payloads::START_WORK.to_string(),
            Action::Toggle(name) => format!("{}{}", payloads::CATEGORY_PREFIX, name),
            Action::SaveCategories => payloads::SAVE_CATEGORIES.to_string(),
            Action::GetNews => payloads::GET_NEWS.to_string(),
            Action::ChangeCategories => payloads::CHANGE_CATEGORIES.to_string(),
        }
    }

    fn button(self, label: impl Into<String>) -> InlineKeyboardButton {
        InlineKeyboardButton::callback(label, self.payload())
    }
}

// ═══════════════════════════════════════════════════════════════════
// KEYBOARDS
// ═══════════════════════════════════════════════════════════════════

pub fn start_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![vec![Action::StartWork.button(texts::BUTTON_START)]])
}

pub fn categories_keyboard(selected: &BTreeSet<String>) -> InlineKeyboardMarkup {
    let mut rows: Vec<Vec<InlineKeyboardButton>> = CATALOG
        .iter()
        .map(|cat| {
            let mark = if selected.contains(cat.name) { texts::CHECKED } else { texts::UNCHECKED };
            vec![Action::Toggle(cat.name).button(format!("{} {}", mark, cat.name))]
        })
        .collect();
    rows.push(vec![Action::SaveCategories.button(texts::BUTTON_SAVE)]);
    InlineKeyboardMarkup::new(rows)
}

pub fn main_menu() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(vec![
        vec![Action::GetNews.button(texts::BUTTON_GET_NEWS)],
        vec![Action::ChangeCategories.button(texts::BUTTON_CATEGORIES)],
    ])
}

fn confirmation_text(categories: &BTreeSet<String>, schedule: &Schedule) -> String {
    let names: Vec<&str> = categories.iter().map(String::as_str).collect();
    format!(
        "✅ Подписка оформлена!\n\n📋 Категории: {}\n\n⏰ Рассылка в {}\n\n📱 Главное меню:",
        names.join(", "),
        schedule.label()
    )
}

// ═══════════════════════════════════════════════════════════════════
// STATE MACHINE
// ═══════════════════════════════════════════════════════════════════

/// What to do with the message whose button was pressed
#[derive(Debug, Clone, PartialEq)]
pub enum Reply {
    /// Replace text and keyboard
    Edit { text: String, keyboard: InlineKeyboardMarkup },
    /// Keep text, redraw keyboard only
    Redraw(InlineKeyboardMarkup),
    /// Fetch and send a digest for these categories as new messages
    SendDigest(Vec<String>),
}

/// Apply `action` for subscriber `id` and describe the screen update.
pub fn respond(action: Action, id: SubscriberId, store: &SubscriptionStore, schedule: &Schedule) -> Reply {
    match action {
        Action::StartWork => Reply::Edit {
            text: texts::PICK_CATEGORIES.to_string(),
            keyboard: categories_keyboard(&store.categories(id)),
        },
        Action::Toggle(name) => Reply::Redraw(categories_keyboard(&store.toggle(id, name))),
        Action::SaveCategories => {
            let selected = store.categories(id);
            if selected.is_empty() {
                Reply::Edit {
                    text: texts::PICK_AT_LEAST_ONE.to_string(),
                    keyboard: categories_keyboard(&selected),
                }
            } else {
                Reply::Edit {
                    text: confirmation_text(&selected, schedule),
                    keyboard: main_menu(),
                }
            }
        }
        Action::GetNews => Reply::SendDigest(store.categories_or_default(id).into_iter().collect()),
        Action::ChangeCategories => Reply::Edit {
            text: texts::CHANGE_CATEGORIES.to_string(),
            keyboard: categories_keyboard(&store.categories(id)),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::consts::DEFAULT_CATEGORY;
    use teloxide::types::InlineKeyboardButtonKind;

    fn callback_data(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup
            .inline_keyboard
            .iter()
            .flatten()
            .filter_map(|b| match &b.kind {
                InlineKeyboardButtonKind::CallbackData(data) => Some(data.clone()),
                _ => None,
            })
            .collect()
    }

    fn labels(markup: &InlineKeyboardMarkup) -> Vec<String> {
        markup.inline_keyboard.iter().flatten().map(|b| b.text.clone()).collect()
    }

    #[test]
    fn payloads_decode_to_actions() {
        assert_eq!(Action::decode("start_work"), Some(Action::StartWork));
        assert_eq!(Action::decode("save_cats"), Some(Action::SaveCategories));
        assert_eq!(Action::decode("get_news"), Some(Action::GetNews));
        assert_eq!(Action::decode("change_cats"), Some(Action::ChangeCategories));
        assert_eq!(Action::decode("cat_спорт"), Some(Action::Toggle("спорт")));
    }

    #[test]
    fn unknown_payloads_are_rejected() {
        assert_eq!(Action::decode(""), None);
        assert_eq!(Action::decode("cat_"), None);
        assert_eq!(Action::decode("cat_погода"), None);
        assert_eq!(Action::decode("START_WORK"), None);
        assert_eq!(Action::decode("delete_everything"), None);
    }

    #[test]
    fn every_keyboard_payload_decodes() {
        let selected = BTreeSet::from(["спорт".to_string()]);
        for markup in [start_menu(), categories_keyboard(&selected), main_menu()] {
            for data in callback_data(&markup) {
                let action = Action::decode(&data).expect("undecodable payload");
                assert_eq!(action.payload(), data);
            }
        }
    }

    #[test]
    fn picker_marks_selected_categories() {
        let selected = BTreeSet::from(["культура".to_string()]);
        let labels = labels(&categories_keyboard(&selected));
        assert_eq!(labels.len(), CATALOG.len() + 1);
        assert!(labels.contains(&"✅ культура".to_string()));
        assert!(labels.contains(&"⚪ спорт".to_string()));
        assert_eq!(labels.last().unwrap(), texts::BUTTON_SAVE);
    }

    #[test]
    fn start_work_shows_picker_with_previous_choice() {
        let store = SubscriptionStore::new();
        store.toggle(1, "спорт");
        let reply = respond(Action::StartWork, 1, &store, &Schedule::default());
        assert_eq!(
            reply,
            Reply::Edit {
                text: texts::PICK_CATEGORIES.to_string(),
                keyboard: categories_keyboard(&BTreeSet::from(["спорт".to_string()])),
            }
        );
    }

    #[test]
    fn toggle_redraws_keyboard_only() {
        let store = SubscriptionStore::new();
        let reply = respond(Action::Toggle("экономика"), 9, &store, &Schedule::default());
        let Reply::Redraw(markup) = reply else { panic!("expected redraw") };
        assert!(labels(&markup).contains(&"✅ экономика".to_string()));
        assert!(store.categories(9).contains("экономика"));
    }

    #[test]
    fn saving_empty_selection_stays_in_picker() {
        let store = SubscriptionStore::new();
        store.toggle(2, "спорт");
        store.toggle(2, "спорт");
        let reply = respond(Action::SaveCategories, 2, &store, &Schedule::default());
        assert_eq!(
            reply,
            Reply::Edit {
                text: texts::PICK_AT_LEAST_ONE.to_string(),
                keyboard: categories_keyboard(&BTreeSet::new()),
            }
        );
    }

    #[test]
    fn saving_never_touched_selection_stays_in_picker() {
        let store = SubscriptionStore::new();
        let reply = respond(Action::SaveCategories, 3, &store, &Schedule::default());
        let Reply::Edit { text, .. } = reply else { panic!("expected edit") };
        assert_eq!(text, texts::PICK_AT_LEAST_ONE);
    }

    #[test]
    fn saving_selection_opens_main_menu() {
        let store = SubscriptionStore::new();
        store.toggle(4, "спорт");
        store.toggle(4, "культура");
        let reply = respond(Action::SaveCategories, 4, &store, &Schedule::default());
        let Reply::Edit { text, keyboard } = reply else { panic!("expected edit") };
        assert!(text.contains("культура, спорт"));
        assert!(text.contains("09:00 и 18:00"));
        assert_eq!(keyboard, main_menu());
    }

    #[test]
    fn get_news_uses_default_for_new_users() {
        let store = SubscriptionStore::new();
        let reply = respond(Action::GetNews, 5, &store, &Schedule::default());
        assert_eq!(reply, Reply::SendDigest(vec![DEFAULT_CATEGORY.to_string()]));
    }

    #[test]
    fn change_categories_prechecks_current_selection() {
        let store = SubscriptionStore::new();
        store.toggle(6, "технологии");
        let reply = respond(Action::ChangeCategories, 6, &store, &Schedule::default());
        let Reply::Edit { text, keyboard } = reply else { panic!("expected edit") };
        assert_eq!(text, texts::CHANGE_CATEGORIES);
        assert!(labels(&keyboard).contains(&"✅ технологии".to_string()));
    }
}
