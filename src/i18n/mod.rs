// SPDX-License-Identifier: PMPL-1.0-or-later

//! Language metadata for catalogs.
//!
//! Everything tscheck needs to know about a catalog's `language` attribute:
//! whether the tag is well formed, whether its code is a real ISO 639 code,
//! and how many plural forms a numerus message must carry.
//!
//! ## Wallet locales
//!
//! | Tag   | Language  | Plural forms |
//! |-------|-----------|--------------|
//! | fa_IR | Persian   | 2            |
//! | hu    | Hungarian | 2            |
//! | ta    | Tamil     | 2            |
//! | tr    | Turkish   | 2            |
//! | zh_HK | Chinese   | 1            |

mod iso639;
mod plural;
mod tag;

pub use iso639::{is_known_iso639_3, is_valid_iso639_1, language_name, native_name};
pub use plural::PluralRule;
pub use tag::LanguageTag;

/// Plural rule for a catalog language tag such as `fa_IR`.
pub fn plural_rule_for_tag(tag: &str) -> Option<PluralRule> {
    LanguageTag::parse(tag).and_then(|t| PluralRule::for_language(&t.language))
}
