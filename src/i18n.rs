// Localized UI strings

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    Ru,
}

impl Language {
    /// Unknown codes fall back to English.
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "ru" => Language::Ru,
            _ => Language::En,
        }
    }

    pub fn code(self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }

    /// The language the toggle switches to.
    pub fn other(self) -> Self {
        match self {
            Language::En => Language::Ru,
            Language::Ru => Language::En,
        }
    }

    pub fn strings(self) -> &'static Strings {
        match self {
            Language::En => &EN,
            Language::Ru => &RU,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct Strings {
    pub title: &'static str,
    pub subtitle: &'static str,
    pub playlist: &'static str,
    pub previous: &'static str,
    pub play: &'static str,
    pub pause: &'static str,
    pub next: &'static str,
    pub ai_generators: &'static str,
    pub create_with_ai: &'static str,
    pub suno: &'static str,
    pub udio: &'static str,
    pub musicgen: &'static str,
    pub telegram: &'static str,
    pub telegram_link: &'static str,
    pub all_albums: &'static str,
    pub upload: &'static str,
    pub delete: &'static str,
    pub cookie_notice: &'static str,
    pub cookie_accept: &'static str,
}

static EN: Strings = Strings {
    title: "GROK MUSIC",
    subtitle: "CYBERPUNK AUDIO SYSTEM v1.0",
    playlist: "PLAYLIST",
    previous: "Previous",
    play: "Play",
    pause: "Pause",
    next: "Next",
    ai_generators: "AI Music Generators",
    create_with_ai: "Create with AI",
    suno: "Suno AI",
    udio: "Udio",
    musicgen: "MusicGen",
    telegram: "Support & Contact",
    telegram_link: "https://t.me/grokmusic_official",
    all_albums: "All albums",
    upload: "Upload",
    delete: "Delete",
    cookie_notice: "We use cookies to remember your preferences.",
    cookie_accept: "Accept",
};

static RU: Strings = Strings {
    title: "GROK MUSIC",
    subtitle: "КИБЕРПАНК АУДИО СИСТЕМА v1.0",
    playlist: "ПЛЕЙЛИСТ",
    previous: "Назад",
    play: "Играть",
    pause: "Пауза",
    next: "Вперед",
    ai_generators: "AI Музыкальные Генераторы",
    create_with_ai: "Создать с AI",
    suno: "Suno AI",
    udio: "Udio",
    musicgen: "MusicGen",
    telegram: "Поддержка и Контакты",
    telegram_link: "https://t.me/grokmusic_official",
    all_albums: "Все альбомы",
    upload: "Загрузить",
    delete: "Удалить",
    cookie_notice: "Мы используем cookie, чтобы запоминать ваши настройки.",
    cookie_accept: "Принять",
};
