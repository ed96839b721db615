//! Static category catalog and bot constants.
//! All strings are &'static str; the catalog is immutable after startup.

/// News category with its candidate feeds
#[derive(Debug, Clone, Copy)]
pub struct Category {
    pub name: &'static str,
    pub feeds: &'static [&'static str],
}

impl Category {
    const fn new(name: &'static str, feeds: &'static [&'static str]) -> Self {
        Self { name, feeds }
    }
}

/// Category catalog, in keyboard display order
pub static CATALOG: &[Category] = &[
    // ═══════════════════════════════════════════════════════════════════
    // POLITICS
    // ═══════════════════════════════════════════════════════════════════
    Category::new(
        "политика",
        &[
            "https://lenta.ru/rss",
            "https://ria.ru/export/rss2/politics.xml",
            "https://www.vedomosti.ru/rss/news",
        ],
    ),

    // ═══════════════════════════════════════════════════════════════════
    // ECONOMY
    // ═══════════════════════════════════════════════════════════════════
    Category::new(
        "экономика",
        &[
            "https://www.vedomosti.ru/rss/news",
            "https://ria.ru/export/rss2/economy.xml",
            "https://www.kommersant.ru/RSS/news.xml",
        ],
    ),

    // ═══════════════════════════════════════════════════════════════════
    // TECHNOLOGY
    // ═══════════════════════════════════════════════════════════════════
    Category::new(
        "технологии",
        &[
            "https://habr.com/ru/rss/hub/python/",
            "https://vc.ru/rss",
            "https://3dnews.ru/news/rss/",
        ],
    ),

    // ═══════════════════════════════════════════════════════════════════
    // SPORT
    // ═══════════════════════════════════════════════════════════════════
    Category::new(
        "спорт",
        &[
            "https://www.championat.com/rss/news.xml",
            "https://www.sports.ru/rss/rubric.xml?s=208",
            "https://rsport.ria.ru/export/rss2/index.xml",
        ],
    ),

    // ═══════════════════════════════════════════════════════════════════
    // CULTURE
    // ═══════════════════════════════════════════════════════════════════
    Category::new(
        "культура",
        &[
            "https://www.kp.ru/rss/theme/10/",
            "https://www.kommersant.ru/RSS/section-culture.xml",
            "https://rg.ru/rss/culture.xml",
        ],
    ),
];

/// Category used for users who never picked any
pub const DEFAULT_CATEGORY: &str = "политика";

/// Lookup category by exact name
#[inline]
pub fn find_category(name: &str) -> Option<&'static Category> {
    CATALOG.iter().find(|c| c.name == name)
}

/// HTTP headers for feed requests
pub mod headers {
    pub const USER_AGENT: &str =
        "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";
    pub const ACCEPT_RSS: &str =
        "application/rss+xml,application/atom+xml,application/xml,text/xml;q=0.9,*/*;q=0.8";
}

/// Limits and thresholds
pub mod limits {
    pub const MAX_ITEMS_PER_FEED: usize = 8;
    pub const MAX_TITLE_CHARS: usize = 80;
    pub const DIGEST_SIZE: usize = 5;
    pub const ID_HASH_MODULUS: u64 = 10_000;
    pub const REQUEST_TIMEOUT_SECS: u64 = 15;
}

/// Daily broadcast fire times, local clock
pub mod schedule {
    pub const DEFAULT_FIRE_TIMES: &[(u32, u32)] = &[(9, 0), (18, 0)];
}

/// User-facing texts
pub mod texts {
    pub const WELCOME: &str = "👋 Добро пожаловать в NewsBot!\n\n\
        📰 Ваш персональный агрегатор новостей.\n\
        🔄 Каждый раз новые свежие новости!";
    pub const PICK_CATEGORIES: &str = "📋 Выберите категории новостей:";
    pub const CHANGE_CATEGORIES: &str = "📋 Изменить категории:";
    pub const PICK_AT_LEAST_ONE: &str = "❌ Выберите хотя бы одну категорию!";
    pub const LOADING: &str = "🔄 Загружаю свежие новости...";
    pub const NEXT_NEWS_BUTTON_HINT: &str =
        "🔄 Нажмите 'Получить новости' для следующих новостей!\n\n📱 Меню:";
    pub const NEXT_NEWS_COMMAND_HINT: &str =
        "🔄 Используйте /news для следующих новостей!\n\n📱 Меню:";

    pub const NO_CATEGORIES: &str = "❌ Выберите категории в настройках";
    pub const NO_NEWS: &str = "❌ Новости не найдены";
    pub const DIGEST_HEADER: &str = "📰 <b>Свежие новости";
    pub const READ_MORE: &str = "📖 Читать далее";

    pub const BUTTON_START: &str = "🚀 Начать работу";
    pub const BUTTON_SAVE: &str = "💾 Сохранить";
    pub const BUTTON_GET_NEWS: &str = "📰 Получить новости";
    pub const BUTTON_CATEGORIES: &str = "⚙️ Категории";
    pub const CHECKED: &str = "✅";
    pub const UNCHECKED: &str = "⚪";
}
