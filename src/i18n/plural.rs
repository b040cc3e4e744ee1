// SPDX-License-Identifier: PMPL-1.0-or-later

//! Plural rules for numerus messages
//!
//! A numerus message carries one `<numerusform>` per plural category the
//! target language distinguishes for integers, in CLDR category order
//! (zero, one, two, few, many, other). Transifex generates catalogs with
//! exactly these forms, so the count is both what the lint checks and what
//! the translator indexes into.
//!
//! Only integer operands are modelled: `%n` is always a whole count.

use serde::Serialize;

/// CLDR cardinal rule families, restricted to integer counts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum PluralRule {
    /// other (zh, ja, ko, vi, th, id, ms …)
    Invariant,
    /// one: n = 1 (en, de, hu, tr, ta …)
    OneOther,
    /// one: n = 0 or 1 (fr, pt, fa, hi …)
    ZeroOneOther,
    /// one/few/many by last digits (ru, uk, be, sr, hr, bs)
    EastSlavic,
    /// one: 1, few: 2-4 (cs, sk)
    CzechSlovak,
    /// one: 1, few: 2-4 outside the teens, many: rest (pl)
    Polish,
    /// one/few by last digit outside the teens (lt)
    Lithuanian,
    /// zero/one by last digits (lv)
    Latvian,
    /// one: 1, few: 0 or 2-19 mod 100 (ro, mo)
    Romanian,
    /// one: n%10 = 1 except 11 (is, mk)
    LastDigitOne,
    /// one/two/few by n mod 100 (sl)
    Slovenian,
    /// one/two/few/many (ga)
    Irish,
    /// one/two/few for 1-19 (gd)
    ScottishGaelic,
    /// one/two/few/many (mt)
    Maltese,
    /// one/two (he)
    Hebrew,
    /// zero/one/two/few/many (ar)
    Arabic,
    /// zero/one/two/few/many on exact values (cy)
    Welsh,
}

impl PluralRule {
    /// Rule for an ISO 639 language code (the part of a tag before `_`).
    pub fn for_language(language: &str) -> Option<Self> {
        use PluralRule::*;
        let rule = match language {
            "bo" | "dz" | "id" | "ig" | "ja" | "jv" | "km" | "ko" | "lo" | "ms" | "my"
            | "sah" | "su" | "th" | "to" | "vi" | "wo" | "yo" | "yue" | "zh" => Invariant,
            "af" | "an" | "ast" | "az" | "bg" | "ca" | "da" | "de" | "el" | "en" | "eo"
            | "es" | "et" | "eu" | "fi" | "fo" | "fy" | "gl" | "gu" | "ha" | "hu" | "hy"
            | "it" | "ka" | "kk" | "kl" | "ku" | "ky" | "lb" | "ml" | "mn" | "mr" | "nb"
            | "nd" | "ne" | "nl" | "nn" | "no" | "nr" | "om" | "or" | "os" | "ps" | "sc"
            | "sd" | "so" | "sq" | "ss" | "st" | "sv" | "sw" | "ta" | "te" | "tk" | "tn"
            | "tr" | "ts" | "ug" | "ur" | "uz" | "ve" | "xh" | "yi" | "zu" => OneOther,
            "am" | "as" | "bn" | "fa" | "ff" | "fil" | "fr" | "hi" | "kab" | "kn" | "ln"
            | "pa" | "pt" | "si" | "ti" | "wa" => ZeroOneOther,
            "be" | "bs" | "hr" | "ru" | "sr" | "uk" => EastSlavic,
            "cs" | "sk" => CzechSlovak,
            "pl" => Polish,
            "lt" => Lithuanian,
            "lv" => Latvian,
            "mo" | "ro" => Romanian,
            "is" | "mk" => LastDigitOne,
            "sl" => Slovenian,
            "ga" => Irish,
            "gd" => ScottishGaelic,
            "mt" => Maltese,
            "he" | "iw" => Hebrew,
            "ar" => Arabic,
            "cy" => Welsh,
            _ => return None,
        };
        Some(rule)
    }

    /// Number of `<numerusform>` entries a catalog must carry.
    pub fn form_count(&self) -> usize {
        use PluralRule::*;
        match self {
            Invariant => 1,
            OneOther | ZeroOneOther | LastDigitOne => 2,
            EastSlavic | CzechSlovak | Polish | Lithuanian | Latvian | Romanian | Hebrew => 3,
            Slovenian | ScottishGaelic => 4,
            Irish | Maltese => 5,
            Arabic | Welsh => 6,
        }
    }

    /// Index of the form used for count `n`.
    ///
    /// ```
    /// use tscheck::i18n::PluralRule;
    /// let ru = PluralRule::for_language("ru").unwrap();
    /// assert_eq!(ru.form_index(1), 0);
    /// assert_eq!(ru.form_index(3), 1);
    /// assert_eq!(ru.form_index(11), 2);
    /// ```
    pub fn form_index(&self, n: u64) -> usize {
        use PluralRule::*;
        let n10 = n % 10;
        let n100 = n % 100;
        match self {
            Invariant => 0,
            OneOther => usize::from(n != 1),
            ZeroOneOther => usize::from(n > 1),
            LastDigitOne => usize::from(!(n10 == 1 && n100 != 11)),
            EastSlavic => {
                if n10 == 1 && n100 != 11 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            CzechSlovak => match n {
                1 => 0,
                2..=4 => 1,
                _ => 2,
            },
            Polish => {
                if n == 1 {
                    0
                } else if (2..=4).contains(&n10) && !(12..=14).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Lithuanian => {
                if (11..=19).contains(&n100) {
                    2
                } else if n10 == 1 {
                    0
                } else if n10 >= 2 {
                    1
                } else {
                    2
                }
            }
            Latvian => {
                if n10 == 0 || (11..=19).contains(&n100) {
                    0
                } else if n10 == 1 {
                    1
                } else {
                    2
                }
            }
            Romanian => {
                if n == 1 {
                    0
                } else if n == 0 || (1..=19).contains(&n100) {
                    1
                } else {
                    2
                }
            }
            Slovenian => match n100 {
                1 => 0,
                2 => 1,
                3 | 4 => 2,
                _ => 3,
            },
            Irish => match n {
                1 => 0,
                2 => 1,
                3..=6 => 2,
                7..=10 => 3,
                _ => 4,
            },
            ScottishGaelic => match n {
                1 | 11 => 0,
                2 | 12 => 1,
                3..=10 | 13..=19 => 2,
                _ => 3,
            },
            Maltese => {
                if n == 1 {
                    0
                } else if n == 2 {
                    1
                } else if n == 0 || (3..=10).contains(&n100) {
                    2
                } else if (11..=19).contains(&n100) {
                    3
                } else {
                    4
                }
            }
            Hebrew => match n {
                1 => 0,
                2 => 1,
                _ => 2,
            },
            Arabic => {
                if n == 0 {
                    0
                } else if n == 1 {
                    1
                } else if n == 2 {
                    2
                } else if (3..=10).contains(&n100) {
                    3
                } else if (11..=99).contains(&n100) {
                    4
                } else {
                    5
                }
            }
            Welsh => match n {
                0 => 0,
                1 => 1,
                2 => 2,
                3 => 3,
                6 => 4,
                _ => 5,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wallet_locale_cardinality() {
        let count = |lang| PluralRule::for_language(lang).map(|r| r.form_count());
        assert_eq!(count("fa"), Some(2));
        assert_eq!(count("hu"), Some(2));
        assert_eq!(count("ta"), Some(2));
        assert_eq!(count("tr"), Some(2));
        assert_eq!(count("zh"), Some(1));
        assert_eq!(count("xx"), None);
    }

    #[test]
    fn every_index_is_within_form_count() {
        for lang in [
            "zh", "en", "fr", "ru", "cs", "pl", "lt", "lv", "ro", "is", "sl", "ga", "gd",
            "mt", "he", "ar", "cy",
        ] {
            let rule = PluralRule::for_language(lang).unwrap();
            let mut seen = vec![false; rule.form_count()];
            for n in 0..1000 {
                let idx = rule.form_index(n);
                assert!(idx < rule.form_count(), "{lang}: n={n} -> {idx}");
                seen[idx] = true;
            }
            assert!(seen.iter().all(|s| *s), "{lang}: some form unreachable");
        }
    }

    #[test]
    fn one_other_languages() {
        let hu = PluralRule::for_language("hu").unwrap();
        assert_eq!(hu.form_index(0), 1);
        assert_eq!(hu.form_index(1), 0);
        assert_eq!(hu.form_index(2), 1);

        let fr = PluralRule::for_language("fr").unwrap();
        assert_eq!(fr.form_index(0), 0);
        assert_eq!(fr.form_index(1), 0);
        assert_eq!(fr.form_index(2), 1);
    }

    #[test]
    fn slavic_teens() {
        let pl = PluralRule::for_language("pl").unwrap();
        assert_eq!(pl.form_index(1), 0);
        assert_eq!(pl.form_index(22), 1);
        assert_eq!(pl.form_index(12), 2);
        assert_eq!(pl.form_index(21), 2);

        let ru = PluralRule::for_language("ru").unwrap();
        assert_eq!(ru.form_index(21), 0);
        assert_eq!(ru.form_index(111), 2);
    }

    #[test]
    fn romanian_few_covers_hundreds_plus_one() {
        let ro = PluralRule::for_language("ro").unwrap();
        assert_eq!(
            [1, 0, 2, 19, 20, 100, 101, 119, 120, 201].map(|n| ro.form_index(n)),
            [0, 1, 1, 1, 2, 2, 1, 1, 2, 1]
        );
    }

    #[test]
    fn arabic_categories() {
        let ar = PluralRule::for_language("ar").unwrap();
        assert_eq!(
            [0, 1, 2, 5, 11, 100].map(|n| ar.form_index(n)),
            [0, 1, 2, 3, 4, 5]
        );
    }
}
