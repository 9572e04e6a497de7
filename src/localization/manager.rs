use std::collections::HashMap;

use lazy_static::lazy_static;
use log::warn;
use regex::{Captures, Regex};
use serde::Deserialize;
use serde_yaml::Value;
use strum::IntoEnumIterator;
use strum_macros::{AsRefStr, EnumIter, EnumString};

lazy_static! {
    static ref PLACEHOLDER: Regex = Regex::new(r"\{(\d+)}").expect("placeholder pattern is valid");
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Deserialize, AsRefStr, EnumIter, EnumString)]
pub enum Language {
    #[default]
    #[serde(rename = "en")]
    #[strum(serialize = "en")]
    English,
    #[serde(rename = "de")]
    #[strum(serialize = "de")]
    German,
}

impl Language {
    fn source(&self) -> &'static str {
        match self {
            Language::English => include_str!("../../resources/translations/en.yaml"),
            Language::German => include_str!("../../resources/translations/de.yaml"),
        }
    }
}

pub struct LocalizationManager {
    translations: HashMap<Language, HashMap<String, String>>,
    lang: Language,
    default_lang: Language,
}

impl LocalizationManager {
    /// Loads the translations compiled into the binary; `lang` is used for every lookup.
    pub fn new(lang: Language) -> Result<Self, serde_yaml::Error> {
        let mut translations = HashMap::new();
        for language in Language::iter() {
            translations.insert(language, parse_translations(language.source())?);
        }

        Ok(LocalizationManager {
            translations,
            lang,
            default_lang: Language::default(),
        })
    }

    pub fn lang(&self) -> Language {
        self.lang
    }

    pub fn get(&self, key: &str, params: &[&str]) -> String {
        self.get_in(key, self.lang, params)
    }

    /// Looks `key` up in `lang`, then in the default language, and finally gives back the key itself.
    pub fn get_in(&self, key: &str, lang: Language, params: &[&str]) -> String {
        let template = [lang, self.default_lang]
            .iter()
            .find_map(|l| self.translations.get(l).and_then(|t| t.get(key)));

        match template {
            Some(template) => format_translation(template, params),
            None => {
                warn!("Missing translation for {} ({})", key, lang.as_ref());
                key.to_string()
            }
        }
    }
}

fn parse_translations(source: &str) -> Result<HashMap<String, String>, serde_yaml::Error> {
    let yaml: Value = serde_yaml::from_str(source)?;
    let mut result = HashMap::new();
    flatten_yaml(&yaml, "", &mut result);
    Ok(result)
}

fn flatten_yaml(yaml: &Value, prefix: &str, result: &mut HashMap<String, String>) {
    match yaml {
        Value::Mapping(map) => {
            for (key, value) in map {
                let key_str = key.as_str().unwrap_or("");
                let new_prefix = if prefix.is_empty() {
                    key_str.to_string()
                } else {
                    format!("{}.{}", prefix, key_str)
                };
                flatten_yaml(value, &new_prefix, result);
            }
        }
        Value::String(s) => {
            result.insert(prefix.to_string(), s.clone());
        }
        _ => {}
    }
}

/// Replaces `{N}` with the N-th parameter. Placeholders without a parameter stay as they are.
fn format_translation(template: &str, params: &[&str]) -> String {
    PLACEHOLDER
        .replace_all(template, |caps: &Captures| {
            caps[1]
                .parse::<usize>()
                .ok()
                .and_then(|index| params.get(index))
                .map(|param| param.to_string())
                .unwrap_or_else(|| caps[0].to_string())
        })
        .into_owned()
}
