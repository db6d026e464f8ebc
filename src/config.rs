use std::{collections::HashSet, fs, io, path::Path};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::{
    highlight_themes::HighlightThemes,
    utils::{log_level_filter, LOG_LEVEL_NAMES},
};

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("the configuration file isn't accessible: {0}")]
    Io(#[from] io::Error),
    #[error("the configuration file is poorly formatted: {0}")]
    Json(#[from] serde_json::Error),
    #[error("the configuration is invalid: {0}")]
    Invalid(String),
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Link {
    pub rel: String,
    #[serde(rename = "type")]
    pub mime_type: String,
    pub href: String,
}

impl Link {
    pub fn new<R, T, H>(rel: R, mime_type: T, href: H) -> Self
    where
        R: Into<String>,
        T: Into<String>,
        H: Into<String>,
    {
        Self {
            rel: rel.into(),
            mime_type: mime_type.into(),
            href: href.into(),
        }
    }
}

/// What ends up in every page's `<head>`
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Head {
    pub title: String,
    /// Goes to `<html lang="...">`
    pub lang: String,
    pub links: Vec<Link>,
}

#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Highlight {
    pub langs: Vec<String>,
    pub theme: HighlightThemes,
}

/// The values handed to the site framework. Nothing here is interpreted beyond validation.
#[derive(Serialize, Deserialize, PartialEq, Debug, Clone)]
pub struct Config {
    pub compatibility_date: NaiveDate,
    pub devtools: bool,
    pub head: Head,
    pub modules: Vec<String>,
    pub highlight: Highlight,
    pub stylesheets: Vec<String>,
    pub log_level: String,
}

fn strings<const N: usize>(values: [&str; N]) -> Vec<String> {
    values.into_iter().map(String::from).collect()
}

/// `es`, `en-US`, `zh-Hant-TW` and so on. Only the shape is checked, not the registry.
fn is_language_tag(tag: &str) -> bool {
    let mut subtags = tag.split('-');
    let primary_is_valid = subtags.next().map_or(false, |primary| {
        (2..=8).contains(&primary.len()) && primary.bytes().all(|byte| byte.is_ascii_alphabetic())
    });
    primary_is_valid
        && subtags.all(|subtag| {
            (1..=8).contains(&subtag.len())
                && subtag.bytes().all(|byte| byte.is_ascii_alphanumeric())
        })
}

impl Config {
    /// The configuration the site shipped with
    pub fn sample() -> Self {
        Self {
            compatibility_date: NaiveDate::from_ymd_opt(2025, 5, 15)
                .unwrap_or(NaiveDate::MIN),
            devtools: true,
            head: Head {
                title: "Mi Blog".into(),
                lang: "es".into(),
                links: vec![Link::new("icon", "image/x-icon", "/favicon.ico")],
            },
            modules: strings([
                "@nuxt/content",
                "@nuxt/eslint",
                "@nuxt/image",
                "@nuxt/test-utils",
            ]),
            highlight: Highlight {
                langs: strings([
                    "json", "js", "ts", "html", "css", "vue", "shell", "mdc", "md", "yaml",
                ]),
                theme: HighlightThemes::new("catppuccin-mocha", "catppuccin-mocha"),
            },
            stylesheets: strings([
                "@/assets/css/bulma-no-dark-mode.css",
                "@/assets/css/code-theme.css",
            ]),
            log_level: "info".into(),
        }
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        Self::from_json(&fs::read_to_string(path)?)
    }

    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        macro_rules! ensure {
            ($condition:expr, $($message:tt)+) => {
                if !$condition {
                    return Err(ConfigError::Invalid(format!($($message)+)));
                }
            };
        }
        ensure!(!self.head.title.trim().is_empty(), "the site title is empty");
        ensure!(
            is_language_tag(&self.head.lang),
            "{:?} isn't a language tag",
            self.head.lang
        );
        for link in &self.head.links {
            ensure!(
                !link.rel.is_empty() && !link.href.is_empty(),
                "a link needs both `rel` and `href`, got {:?}",
                link
            );
        }
        ensure!(
            !self.highlight.langs.is_empty(),
            "no languages are enabled for syntax highlighting"
        );
        {
            let mut seen = HashSet::new();
            for lang in &self.highlight.langs {
                ensure!(
                    seen.insert(lang.as_str()),
                    "highlighting language {:?} is listed twice",
                    lang
                );
            }
        }
        ensure!(
            self.highlight.theme.names().all(|name| !name.is_empty()),
            "highlighting theme names can't be empty"
        );
        ensure!(
            log_level_filter(&self.log_level).is_some(),
            "log level {:?} isn't in {:?}",
            self.log_level,
            LOG_LEVEL_NAMES
        );
        Ok(())
    }

    pub fn favicon(&self) -> Option<&Link> {
        self.head.links.iter().find(|link| link.rel == "icon")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn invalid(config: &Config) -> String {
        match config.validate() {
            Err(ConfigError::Invalid(message)) => message,
            other => panic!("expected a validation error, got {:?}", other),
        }
    }

    #[test]
    fn sample_is_valid_and_survives_json() {
        let sample = Config::sample();
        sample.validate().unwrap();
        let reparsed = Config::from_json(&sample.to_json().unwrap()).unwrap();
        assert_eq!(reparsed, sample);
    }

    #[test]
    fn sample_matches_the_site() {
        let sample = Config::sample();
        assert_eq!(sample.head.title, "Mi Blog");
        assert_eq!(sample.head.lang, "es");
        assert_eq!(sample.favicon().map(|link| &link.href[..]), Some("/favicon.ico"));
        assert_eq!(sample.highlight.langs.len(), 10);
        assert_eq!(sample.highlight.theme.dark(), "catppuccin-mocha");
        assert_eq!(sample.compatibility_date.to_string(), "2025-05-15");
    }

    #[test]
    fn link_type_is_spelled_like_html() {
        let json = serde_json::to_value(Link::new("icon", "image/x-icon", "/favicon.ico")).unwrap();
        assert_eq!(json["type"], "image/x-icon");
    }

    #[test]
    fn language_tags() {
        for tag in ["es", "en-US", "zh-Hant-TW", "de-CH-1996"] {
            assert!(is_language_tag(tag), "{}", tag);
        }
        for tag in ["", "e", "es_ES", "es-", "-es", "12", "en-toolongsubtag"] {
            assert!(!is_language_tag(tag), "{}", tag);
        }
    }

    #[test]
    fn rejects_bad_values() {
        let mut config = Config::sample();
        config.head.title = "  ".into();
        assert!(invalid(&config).contains("title"));

        let mut config = Config::sample();
        config.head.lang = "spanish language".into();
        assert!(invalid(&config).contains("language tag"));

        let mut config = Config::sample();
        config.highlight.langs.push("json".into());
        assert!(invalid(&config).contains("twice"));

        let mut config = Config::sample();
        config.highlight.langs.clear();
        assert!(invalid(&config).contains("no languages"));

        let mut config = Config::sample();
        config.highlight.theme = HighlightThemes::new("", "catppuccin-mocha");
        assert!(invalid(&config).contains("theme"));

        let mut config = Config::sample();
        config.head.links.push(Link::new("stylesheet", "text/css", ""));
        assert!(invalid(&config).contains("href"));

        let mut config = Config::sample();
        config.log_level = "loud".into();
        assert!(invalid(&config).contains("loud"));
    }

    #[test]
    fn reports_malformed_json() {
        assert!(matches!(
            Config::from_json("{ \"devtools\": true }"),
            Err(ConfigError::Json(_))
        ));
    }

    #[test]
    fn reports_missing_files() {
        assert!(matches!(
            Config::load("/nonexistent/directory/config.json"),
            Err(ConfigError::Io(_))
        ));
    }
}
