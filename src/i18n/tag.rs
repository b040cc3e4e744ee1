// SPDX-License-Identifier: PMPL-1.0-or-later

//! Catalog language tags
//!
//! Qt and Transifex write tags as `language[_Script][_TERRITORY][@variant]`
//! (`fa_IR`, `zh_Hant_TW`, `sr@latin`). BCP 47 hyphens are accepted on input.

use super::iso639::{is_known_iso639_3, is_valid_iso639_1, language_name};
use regex::Regex;
use serde::Serialize;
use std::fmt;
use std::sync::LazyLock;

static TAG_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([a-z]{2,3})(?:[_-]([A-Z][a-z]{3}))?(?:[_-]([A-Z]{2}|[0-9]{3}))?(?:@([a-z]+))?$")
        .expect("language tag pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct LanguageTag {
    pub language: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub script: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub territory: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant: Option<String>,
}

impl LanguageTag {
    /// Parse a tag; `None` when it does not follow the grammar.
    ///
    /// ```
    /// use tscheck::i18n::LanguageTag;
    /// let tag = LanguageTag::parse("fa_IR").unwrap();
    /// assert_eq!(tag.language, "fa");
    /// assert_eq!(tag.territory.as_deref(), Some("IR"));
    /// ```
    pub fn parse(tag: &str) -> Option<Self> {
        let caps = TAG_RE.captures(tag.trim())?;
        Some(Self {
            language: caps[1].to_string(),
            script: caps.get(2).map(|m| m.as_str().to_string()),
            territory: caps.get(3).map(|m| m.as_str().to_string()),
            variant: caps.get(4).map(|m| m.as_str().to_string()),
        })
    }

    /// The language code is a real ISO 639 code.
    pub fn is_known(&self) -> bool {
        is_valid_iso639_1(&self.language) || is_known_iso639_3(&self.language)
    }

    pub fn language_name(&self) -> Option<&'static str> {
        language_name(&self.language)
    }

    /// `lang_TERRITORY`, the suffix Qt applications use for catalog files.
    pub fn file_stem(&self) -> String {
        match &self.territory {
            Some(territory) => format!("{}_{}", self.language, territory),
            None => self.language.clone(),
        }
    }
}

impl fmt::Display for LanguageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.language)?;
        if let Some(script) = &self.script {
            write!(f, "_{}", script)?;
        }
        if let Some(territory) = &self.territory {
            write!(f, "_{}", territory)?;
        }
        if let Some(variant) = &self.variant {
            write!(f, "@{}", variant)?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wallet_locales() {
        for (raw, lang, territory) in [
            ("fa_IR", "fa", Some("IR")),
            ("hu", "hu", None),
            ("ta", "ta", None),
            ("tr", "tr", None),
            ("zh_HK", "zh", Some("HK")),
        ] {
            let tag = LanguageTag::parse(raw).unwrap();
            assert_eq!(tag.language, lang);
            assert_eq!(tag.territory.as_deref(), territory);
            assert!(tag.is_known());
            assert_eq!(tag.to_string(), raw);
        }
    }

    #[test]
    fn parses_script_and_variant() {
        let tag = LanguageTag::parse("zh-Hant-TW").unwrap();
        assert_eq!(tag.script.as_deref(), Some("Hant"));
        assert_eq!(tag.territory.as_deref(), Some("TW"));
        assert_eq!(tag.to_string(), "zh_Hant_TW");

        let tag = LanguageTag::parse("sr@latin").unwrap();
        assert_eq!(tag.variant.as_deref(), Some("latin"));
        assert_eq!(tag.file_stem(), "sr");

        assert_eq!(LanguageTag::parse("es_419").unwrap().file_stem(), "es_419");
    }

    #[test]
    fn rejects_malformed() {
        assert!(LanguageTag::parse("").is_none());
        assert!(LanguageTag::parse("EN").is_none());
        assert!(LanguageTag::parse("en_us").is_none());
        assert!(LanguageTag::parse("english").is_none());
    }

    #[test]
    fn unknown_but_well_formed() {
        let tag = LanguageTag::parse("xx").unwrap();
        assert!(!tag.is_known());
    }
}
