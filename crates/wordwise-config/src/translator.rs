use serde::{Deserialize, Serialize};

fn default_enabled() -> bool {
    true
}

fn default_from_lang() -> String {
    "en".to_string()
}

fn default_to_lang() -> String {
    "hi".to_string()
}

fn default_api_url() -> String {
    "https://api.mymemory.translated.net/get".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default, rename_all = "camelCase")]
pub struct TranslatorConfig {
    #[serde(default = "default_enabled")]
    pub enabled: bool,
    #[serde(default = "default_from_lang")]
    pub from_lang: String,
    #[serde(default = "default_to_lang")]
    pub to_lang: String,
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

impl Default for TranslatorConfig {
    fn default() -> Self {
        Self {
            enabled: default_enabled(),
            from_lang: default_from_lang(),
            to_lang: default_to_lang(),
            api_url: default_api_url(),
        }
    }
}

impl TranslatorConfig {
    /// Lookups attach a translation only when the target differs from the source
    pub fn translates_on_lookup(&self) -> bool {
        self.enabled && !self.to_lang.eq_ignore_ascii_case(&self.from_lang)
    }
}
