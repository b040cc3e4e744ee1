// SPDX-License-Identifier: PMPL-1.0-or-later

//! ISO 639-1 language code validation and metadata.
//!
//! Catalog language tags (`fa_IR`, `zh_HK`) start with an ISO 639 code; this
//! module answers whether that code is real and what the language is called.
//!
//! Reference: <https://www.loc.gov/standards/iso639-2/php/code_list.php>

/// Validates whether a string is a known ISO 639-1 two-letter language code.
///
/// Codes must be lowercase, as they appear in `.ts` language attributes.
///
/// # Examples
/// ```
/// assert!(tscheck::i18n::is_valid_iso639_1("fa"));
/// assert!(tscheck::i18n::is_valid_iso639_1("zh"));
/// assert!(!tscheck::i18n::is_valid_iso639_1("xx"));
/// ```
pub fn is_valid_iso639_1(code: &str) -> bool {
    matches!(
        code,
        "aa" | "ab" | "af" | "ak" | "am" | "an" | "ar" | "as" | "av" | "ay" | "az"
            | "ba" | "be" | "bg" | "bh" | "bi" | "bm" | "bn" | "bo" | "br" | "bs"
            | "ca" | "ce" | "ch" | "co" | "cr" | "cs" | "cu" | "cv" | "cy"
            | "da" | "de" | "dv" | "dz"
            | "ee" | "el" | "en" | "eo" | "es" | "et" | "eu"
            | "fa" | "ff" | "fi" | "fj" | "fo" | "fr" | "fy"
            | "ga" | "gd" | "gl" | "gn" | "gu" | "gv"
            | "ha" | "he" | "hi" | "ho" | "hr" | "ht" | "hu" | "hy" | "hz"
            | "ia" | "id" | "ie" | "ig" | "ii" | "ik" | "io" | "is" | "it" | "iu"
            | "ja" | "jv"
            | "ka" | "kg" | "ki" | "kj" | "kk" | "kl" | "km" | "kn" | "ko" | "kr" | "ks" | "ku" | "kv" | "kw" | "ky"
            | "la" | "lb" | "lg" | "li" | "ln" | "lo" | "lt" | "lu" | "lv"
            | "mg" | "mh" | "mi" | "mk" | "ml" | "mn" | "mr" | "ms" | "mt" | "my"
            | "na" | "nb" | "nd" | "ne" | "ng" | "nl" | "nn" | "no" | "nr" | "nv" | "ny"
            | "oc" | "oj" | "om" | "or" | "os"
            | "pa" | "pi" | "pl" | "ps" | "pt"
            | "qu"
            | "rm" | "rn" | "ro" | "ru" | "rw"
            | "sa" | "sc" | "sd" | "se" | "sg" | "si" | "sk" | "sl" | "sm" | "sn" | "so" | "sq" | "sr" | "ss" | "st" | "su" | "sv" | "sw"
            | "ta" | "te" | "tg" | "th" | "ti" | "tk" | "tl" | "tn" | "to" | "tr" | "ts" | "tt" | "tw" | "ty"
            | "ug" | "uk" | "ur" | "uz"
            | "ve" | "vi" | "vo"
            | "wa" | "wo"
            | "xh"
            | "yi" | "yo"
            | "za" | "zh" | "zu"
    )
}

/// Three-letter codes that Transifex and Qt ship catalogs for but that
/// have no ISO 639-1 equivalent.
pub fn is_known_iso639_3(code: &str) -> bool {
    matches!(
        code,
        "ast" | "ber" | "ckb" | "fil" | "haw" | "kab" | "nds" | "sco" | "szl" | "yue"
    )
}

/// Returns the English name of a language code.
///
/// Returns `None` for unrecognised codes. Covers the locales the wallet
/// ships plus the common Transifex targets.
pub fn language_name(code: &str) -> Option<&'static str> {
    match code {
        "af" => Some("Afrikaans"),
        "am" => Some("Amharic"),
        "ar" => Some("Arabic"),
        "ast" => Some("Asturian"),
        "az" => Some("Azerbaijani"),
        "be" => Some("Belarusian"),
        "bg" => Some("Bulgarian"),
        "bn" => Some("Bengali"),
        "bs" => Some("Bosnian"),
        "ca" => Some("Catalan"),
        "cs" => Some("Czech"),
        "cy" => Some("Welsh"),
        "da" => Some("Danish"),
        "de" => Some("German"),
        "el" => Some("Greek"),
        "en" => Some("English"),
        "eo" => Some("Esperanto"),
        "es" => Some("Spanish"),
        "et" => Some("Estonian"),
        "eu" => Some("Basque"),
        "fa" => Some("Persian"),
        "fi" => Some("Finnish"),
        "fil" => Some("Filipino"),
        "fr" => Some("French"),
        "ga" => Some("Irish"),
        "gl" => Some("Galician"),
        "he" => Some("Hebrew"),
        "hi" => Some("Hindi"),
        "hr" => Some("Croatian"),
        "hu" => Some("Hungarian"),
        "hy" => Some("Armenian"),
        "id" => Some("Indonesian"),
        "is" => Some("Icelandic"),
        "it" => Some("Italian"),
        "ja" => Some("Japanese"),
        "ka" => Some("Georgian"),
        "kk" => Some("Kazakh"),
        "km" => Some("Khmer"),
        "ko" => Some("Korean"),
        "ky" => Some("Kyrgyz"),
        "la" => Some("Latin"),
        "lt" => Some("Lithuanian"),
        "lv" => Some("Latvian"),
        "mk" => Some("Macedonian"),
        "ml" => Some("Malayalam"),
        "mn" => Some("Mongolian"),
        "mr" => Some("Marathi"),
        "ms" => Some("Malay"),
        "mt" => Some("Maltese"),
        "my" => Some("Burmese"),
        "nb" | "no" => Some("Norwegian"),
        "ne" => Some("Nepali"),
        "nl" => Some("Dutch"),
        "pa" => Some("Punjabi"),
        "pl" => Some("Polish"),
        "pt" => Some("Portuguese"),
        "ro" => Some("Romanian"),
        "ru" => Some("Russian"),
        "si" => Some("Sinhala"),
        "sk" => Some("Slovak"),
        "sl" => Some("Slovenian"),
        "sq" => Some("Albanian"),
        "sr" => Some("Serbian"),
        "sv" => Some("Swedish"),
        "sw" => Some("Swahili"),
        "ta" => Some("Tamil"),
        "te" => Some("Telugu"),
        "th" => Some("Thai"),
        "tr" => Some("Turkish"),
        "uk" => Some("Ukrainian"),
        "ur" => Some("Urdu"),
        "uz" => Some("Uzbek"),
        "vi" => Some("Vietnamese"),
        "yue" => Some("Cantonese"),
        "zh" => Some("Chinese"),
        _ => None,
    }
}

/// Returns the native name of a language code.
///
/// Used when listing catalogs so translators see their language written in
/// its own script.
pub fn native_name(code: &str) -> Option<&'static str> {
    match code {
        "de" => Some("Deutsch"),
        "en" => Some("English"),
        "es" => Some("Español"),
        "fa" => Some("فارسی"),
        "fr" => Some("Français"),
        "hu" => Some("Magyar"),
        "ja" => Some("日本語"),
        "ko" => Some("한국어"),
        "pt" => Some("Português"),
        "ru" => Some("Русский"),
        "ta" => Some("தமிழ்"),
        "tr" => Some("Türkçe"),
        "zh" => Some("中文"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn valid_codes_accepted() {
        assert!(is_valid_iso639_1("fa"));
        assert!(is_valid_iso639_1("hu"));
        assert!(is_valid_iso639_1("ta"));
        assert!(is_valid_iso639_1("zh"));
    }

    #[test]
    fn invalid_codes_rejected() {
        assert!(!is_valid_iso639_1("xx"));
        assert!(!is_valid_iso639_1(""));
        assert!(!is_valid_iso639_1("eng"));
        assert!(!is_valid_iso639_1("EN"));
    }

    #[test]
    fn wallet_locales_resolve() {
        assert_eq!(language_name("fa"), Some("Persian"));
        assert_eq!(language_name("hu"), Some("Hungarian"));
        assert_eq!(language_name("ta"), Some("Tamil"));
        assert_eq!(language_name("tr"), Some("Turkish"));
        assert_eq!(language_name("zh"), Some("Chinese"));
        assert_eq!(language_name("xx"), None);
    }

    #[test]
    fn native_names_resolve() {
        assert_eq!(native_name("hu"), Some("Magyar"));
        assert_eq!(native_name("tr"), Some("Türkçe"));
        assert_eq!(native_name("xx"), None);
    }

    #[test]
    fn three_letter_codes() {
        assert!(is_known_iso639_3("fil"));
        assert!(!is_known_iso639_3("en"));
        assert!(!is_valid_iso639_1("fil"));
    }
}
