//! Locale negotiation
//!
//! Picks the locale for a request from, in order: the locale cookie, the
//! `Accept-Language` header, and the configured default. Everything here is
//! pure and free of I/O.

use std::cmp::Ordering;

/// One entry of a parsed `Accept-Language` header
#[derive(Debug, Clone, PartialEq)]
pub struct LanguagePreference {
    /// Primary language subtag (`"en"` for `"en-US"`)
    pub tag: String,
    pub quality: f32,
}

/// Request-scoped snapshot of everything negotiation needs
#[derive(Debug, Clone, Copy)]
pub struct NegotiationInput<'a> {
    pub cookie_locale: &'a str,
    pub accept_language: &'a str,
    pub supported_locales: &'a [String],
    pub default_locale: &'a str,
}

impl NegotiationInput<'_> {
    pub fn resolve(&self) -> String {
        negotiate(
            self.cookie_locale,
            self.accept_language,
            self.supported_locales,
            self.default_locale,
        )
    }
}

/// Negotiate the active locale
///
/// An empty `cookie_locale` or `accept_language` means "not present".
pub fn negotiate(
    cookie_locale: &str,
    accept_language: &str,
    supported_locales: &[String],
    default_locale: &str,
) -> String {
    if !cookie_locale.is_empty() && supported_locales.iter().any(|locale| locale == cookie_locale) {
        return cookie_locale.to_string();
    }

    parse_accept_language(accept_language)
        .iter()
        .find_map(|preference| {
            supported_locales
                .iter()
                .find(|locale| locale.eq_ignore_ascii_case(&preference.tag))
        })
        .cloned()
        .unwrap_or_else(|| default_locale.to_string())
}

/// Parse an `Accept-Language` header into preferences ordered by quality
///
/// Ties keep their header order. Empty segments are skipped and unparsable
/// quality values count as 1.0.
pub fn parse_accept_language(header: &str) -> Vec<LanguagePreference> {
    let mut preferences: Vec<LanguagePreference> = header
        .split(',')
        .filter_map(parse_segment)
        .collect();

    // `sort_by` is stable
    preferences.sort_by(|a, b| b.quality.partial_cmp(&a.quality).unwrap_or(Ordering::Equal));
    preferences
}

fn parse_segment(segment: &str) -> Option<LanguagePreference> {
    let mut parts = segment.split(';');
    let range = parts.next()?.trim();
    let primary = range.split('-').next()?.trim();
    if primary.is_empty() {
        return None;
    }

    let quality = parts
        .filter_map(|param| param.trim().strip_prefix("q="))
        .map(|value| value.trim().parse::<f32>().ok().filter(|q| q.is_finite()).unwrap_or(1.0))
        .next()
        .unwrap_or(1.0);

    Some(LanguagePreference {
        tag: primary.to_string(),
        quality,
    })
}

/// Extract a named cookie from a raw `Cookie` header value
///
/// The value is percent-decoded. Empty values are treated as absent.
pub fn cookie_value(cookie_header: &str, cookie_name: &str) -> Option<String> {
    cookie_header
        .split(';')
        .filter_map(|pair| pair.trim().split_once('='))
        .find(|(name, _)| name.trim() == cookie_name)
        .map(|(_, value)| value.trim().trim_matches('"'))
        .filter(|value| !value.is_empty())
        .map(|value| {
            urlencoding::decode(value)
                .map(|decoded| decoded.into_owned())
                .unwrap_or_else(|_| value.to_string())
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn locales(codes: &[&str]) -> Vec<String> {
        codes.iter().map(|code| code.to_string()).collect()
    }

    #[test]
    fn test_accept_language_quality_order() {
        assert_eq!(negotiate("", "fr;q=0.9,en;q=0.8", &locales(&["en", "fr"]), "en"), "fr");
        assert_eq!(negotiate("", "fr;q=0.5,en;q=0.8", &locales(&["en", "fr"]), "en"), "en");
    }

    #[test]
    fn test_empty_inputs_fall_back_to_default() {
        assert_eq!(negotiate("", "", &locales(&["en"]), "en"), "en");
    }

    #[test]
    fn test_cookie_takes_precedence() {
        assert_eq!(negotiate("de", "fr", &locales(&["en", "de", "fr"]), "en"), "de");
    }

    #[test]
    fn test_unsupported_cookie_is_ignored() {
        assert_eq!(negotiate("xx", "fr-CA,en;q=0.5", &locales(&["en", "fr"]), "en"), "fr");
    }

    #[test]
    fn test_region_subtags_are_reduced() {
        assert_eq!(negotiate("", "ru-RU,ru;q=0.9", &locales(&["en", "ru"]), "en"), "ru");
    }

    #[test]
    fn test_no_supported_candidate_uses_default() {
        assert_eq!(negotiate("", "ja,zh;q=0.8", &locales(&["en", "ru"]), "en"), "en");
    }

    #[test]
    fn test_parse_keeps_header_order_for_ties() {
        let parsed = parse_accept_language("de,fr;q=0.7,en,it;q=0.7");
        let tags: Vec<&str> = parsed.iter().map(|p| p.tag.as_str()).collect();
        assert_eq!(tags, vec!["de", "en", "fr", "it"]);
    }

    #[test]
    fn test_parse_ignores_malformed_segments() {
        let parsed = parse_accept_language(" , ;q=0.3,,-GB,en;q=abc");
        assert_eq!(
            parsed,
            vec![LanguagePreference { tag: "en".to_string(), quality: 1.0 }]
        );
    }

    #[test]
    fn test_parse_accepts_whitespace_around_params() {
        let parsed = parse_accept_language("en; q=0.2, fr ;q=0.6");
        let tags: Vec<&str> = parsed.iter().map(|p| p.tag.as_str()).collect();
        assert_eq!(tags, vec!["fr", "en"]);
    }

    #[test]
    fn test_cookie_value_extraction() {
        let header = "session=abc123; locale=fr; theme=dark";
        assert_eq!(cookie_value(header, "locale"), Some("fr".to_string()));
        assert_eq!(cookie_value(header, "missing"), None);
        assert_eq!(cookie_value("locale=", "locale"), None);
        assert_eq!(cookie_value("my_locale=de; locale=pt%2DBR", "locale"), Some("pt-BR".to_string()));
    }

    #[test]
    fn test_negotiation_input_resolve() {
        let supported = locales(&["en", "de"]);
        let input = NegotiationInput {
            cookie_locale: "",
            accept_language: "de-AT",
            supported_locales: &supported,
            default_locale: "en",
        };
        assert_eq!(input.resolve(), "de");
    }

    proptest! {
        #[test]
        fn negotiated_locale_is_supported_or_default(
            cookie in "[a-z]{0,3}",
            header in "[a-zA-Z,;=.0-9 -]{0,40}",
        ) {
            let supported = locales(&["en", "fr", "de"]);
            let result = negotiate(&cookie, &header, &supported, "en");
            prop_assert!(supported.contains(&result));
        }

        #[test]
        fn supported_cookie_always_wins(header in "[a-zA-Z,;=.0-9 -]{0,40}") {
            let supported = locales(&["en", "fr", "de"]);
            prop_assert_eq!(negotiate("fr", &header, &supported, "en"), "fr");
        }

        #[test]
        fn parsing_never_panics(header in ".{0,64}") {
            let _ = parse_accept_language(&header);
        }
    }
}
