use serde::{Deserialize, Serialize};

/// The class set on `<html>` that selects the code color theme
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ColorMode {
    Light,
    Dark,
    Sepia,
}

impl ColorMode {
    pub const ALL: [Self; 3] = [Self::Light, Self::Dark, Self::Sepia];

    pub const fn name(self) -> &'static str {
        match self {
            Self::Light => "light",
            Self::Dark => "dark",
            Self::Sepia => "sepia",
        }
    }
}

#[derive(Deserialize, Serialize, PartialEq, Debug, Clone)]
pub struct HighlightThemes {
    default: String,
    dark: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sepia: Option<String>,
}

impl HighlightThemes {
    pub fn new<D: Into<String>, K: Into<String>>(default: D, dark: K) -> Self {
        Self {
            default: default.into(),
            dark: dark.into(),
            sepia: None,
        }
    }

    #[cfg(test)]
    pub fn with_sepia<S: Into<String>>(mut self, sepia: S) -> Self {
        self.sepia = Some(sepia.into());
        self
    }

    pub fn default_theme(&self) -> &str {
        self.default.as_ref()
    }

    pub fn dark(&self) -> &str {
        self.dark.as_ref()
    }

    pub fn sepia(&self) -> Option<&str> {
        self.sepia.as_deref()
    }

    /// Sepia falls back to the default theme when it isn't configured
    pub fn for_mode(&self, mode: ColorMode) -> &str {
        match mode {
            ColorMode::Light => self.default_theme(),
            ColorMode::Dark => self.dark(),
            ColorMode::Sepia => self.sepia().unwrap_or_else(|| self.default_theme()),
        }
    }

    pub(crate) fn names(&self) -> impl Iterator<Item = &str> {
        [Some(self.default_theme()), Some(self.dark()), self.sepia()]
            .into_iter()
            .flatten()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sepia_falls_back_to_default() {
        let themes = HighlightThemes::new("catppuccin-latte", "catppuccin-mocha");
        assert_eq!(themes.for_mode(ColorMode::Light), "catppuccin-latte");
        assert_eq!(themes.for_mode(ColorMode::Dark), "catppuccin-mocha");
        assert_eq!(themes.for_mode(ColorMode::Sepia), "catppuccin-latte");

        let themes = themes.with_sepia("min-dark");
        assert_eq!(themes.for_mode(ColorMode::Sepia), "min-dark");
    }

    #[test]
    fn missing_sepia_is_not_serialized() {
        let json = serde_json::to_value(HighlightThemes::new("a", "b")).unwrap();
        assert_eq!(json, serde_json::json!({ "default": "a", "dark": "b" }));

        let parsed: HighlightThemes =
            serde_json::from_str(r#"{ "default": "a", "dark": "b", "sepia": "c" }"#).unwrap();
        assert_eq!(parsed.sepia(), Some("c"));
    }
}
