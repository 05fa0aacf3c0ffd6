//! Translation lookup and message formatting
//!
//! Resolves keys against whatever dictionary is currently cached for a
//! locale. Lookups never perform I/O and always produce a string; a missing
//! key is handed to the [`MissingKeyReporter`] and replaced by its fallback.

use std::collections::HashMap;
use std::fmt;
use std::sync::{Arc, OnceLock};

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};

use super::{MissingKeyReporter, TranslationCache};

/// Translation parameters for message formatting
pub type TranslationParams = HashMap<String, ParamValue>;

/// Value substituted into a `{name}` placeholder
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ParamValue {
    Text(String),
    Integer(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Text(text) => f.write_str(text),
            ParamValue::Integer(value) => write!(f, "{}", value),
            ParamValue::Float(value) => write!(f, "{}", value),
            ParamValue::Bool(value) => write!(f, "{}", value),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Text(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Text(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Integer(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Integer(i64::from(value))
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Build a [`TranslationParams`] map from name/value pairs
pub fn params<I, K, V>(pairs: I) -> TranslationParams
where
    I: IntoIterator<Item = (K, V)>,
    K: Into<String>,
    V: Into<ParamValue>,
{
    pairs.into_iter().map(|(k, v)| (k.into(), v.into())).collect()
}

/// Key lookup against the shared translation cache
#[derive(Debug, Clone)]
pub struct Translator {
    cache: Arc<TranslationCache>,
    reporter: Arc<MissingKeyReporter>,
}

impl Translator {
    pub fn new(cache: Arc<TranslationCache>, reporter: Arc<MissingKeyReporter>) -> Self {
        Self { cache, reporter }
    }

    /// Get a translated message
    pub fn translate(&self, locale: &str, key: &str, params: Option<&TranslationParams>) -> String {
        let dictionary = self.cache.get(locale);

        match dictionary.as_deref().and_then(|dictionary| dictionary.get(key)) {
            Some(text) => format_message(text, params),
            None => {
                self.reporter.report(locale, key);
                self.reporter.fallback_value(locale, key)
            }
        }
    }

    /// Get a translated message choosing between `key.one` and `key.other`
    ///
    /// `{count}` is available to the message. If neither plural form exists
    /// the plain `key` is used before falling back.
    pub fn translate_plural(
        &self,
        locale: &str,
        key: &str,
        count: i64,
        params: Option<&TranslationParams>,
    ) -> String {
        let plural_key = format!("{}.{}", key, plural_form(count));

        let mut final_params = params.cloned().unwrap_or_default();
        final_params.insert("count".to_string(), ParamValue::Integer(count));

        if !self.has_key(locale, &plural_key) && self.has_key(locale, key) {
            return self.translate(locale, key, Some(&final_params));
        }
        self.translate(locale, &plural_key, Some(&final_params))
    }

    /// Whether the cached dictionary for `locale` has a non-empty `key`
    pub fn has_key(&self, locale: &str, key: &str) -> bool {
        self.cache
            .get(locale)
            .is_some_and(|dictionary| dictionary.contains_key(key))
    }

    /// Bind this translator to one locale
    pub fn for_locale(&self, locale: impl Into<String>) -> LocaleTranslator {
        LocaleTranslator {
            translator: self.clone(),
            locale: locale.into(),
        }
    }
}

/// Translator bound to the locale of one request
#[derive(Debug, Clone)]
pub struct LocaleTranslator {
    translator: Translator,
    locale: String,
}

impl LocaleTranslator {
    pub fn locale(&self) -> &str {
        &self.locale
    }

    pub fn t(&self, key: &str) -> String {
        self.translator.translate(&self.locale, key, None)
    }

    pub fn t_with(&self, key: &str, params: &TranslationParams) -> String {
        self.translator.translate(&self.locale, key, Some(params))
    }

    pub fn tp(&self, key: &str, count: i64) -> String {
        self.translator.translate_plural(&self.locale, key, count, None)
    }
}

/// Trivial singular/plural selector
fn plural_form(count: i64) -> &'static str {
    if count == 1 {
        "one"
    } else {
        "other"
    }
}

/// Any brace-delimited name, spaces and dots included
fn placeholder_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\{([^{}]+)\}").expect("placeholder pattern is a valid regex"))
}

/// Substitute `{name}` placeholders; unknown names are left as written
///
/// Substituted values are never scanned again.
pub fn format_message(template: &str, params: Option<&TranslationParams>) -> String {
    let Some(params) = params else {
        return template.to_string();
    };

    placeholder_pattern()
        .replace_all(template, |caps: &Captures<'_>| match params.get(&caps[1]) {
            Some(value) => value.to_string(),
            None => caps[0].to_string(),
        })
        .into_owned()
}
