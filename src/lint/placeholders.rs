// SPDX-License-Identifier: PMPL-1.0-or-later

//! Format specifier extraction
//!
//! Two substitution styles meet in wallet catalogs. Qt strings use `%1`..`%99`
//! (optionally `%L1`) and `%n`, filled by `QString::arg` and `tr()`, in any
//! order. Core strings use printf-style `%s`/`%d`/`%u`, filled positionally
//! by `strprintf`, where order matters and a missing specifier is a crash.
//! Qt strings may also contain a bare `%` ("(%1%)"), so once any Qt argument
//! is present the printf reading is dropped.

use std::collections::BTreeSet;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct FormatSpecifiers {
    /// Qt argument numbers, order free
    pub qt: BTreeSet<u32>,
    /// `%n` or `%Ln`
    pub count: bool,
    /// printf conversions in order of appearance
    pub printf: Vec<char>,
}

impl FormatSpecifiers {
    pub fn extract(text: &str) -> Self {
        let mut specs = FormatSpecifiers::default();
        let chars: Vec<char> = text.chars().collect();
        let mut i = 0;

        while i < chars.len() {
            if chars[i] != '%' {
                i += 1;
                continue;
            }
            let mut j = i + 1;
            if chars.get(j) == Some(&'%') {
                i = j + 1;
                continue;
            }
            if chars.get(j) == Some(&'L')
                && chars
                    .get(j + 1)
                    .is_some_and(|c| c.is_ascii_digit() || *c == 'n')
            {
                j += 1;
            }
            match chars.get(j) {
                Some('n') => {
                    specs.count = true;
                    i = j + 1;
                }
                Some(c) if ('1'..='9').contains(c) => {
                    let mut number = c.to_digit(10).unwrap_or(0);
                    j += 1;
                    if let Some(d) = chars.get(j).and_then(|c| c.to_digit(10)) {
                        number = number * 10 + d;
                        j += 1;
                    }
                    specs.qt.insert(number);
                    i = j;
                }
                Some(c) if c.is_ascii_alphabetic() => {
                    specs.printf.push(*c);
                    i = j + 1;
                }
                _ => i = j,
            }
        }

        if !specs.qt.is_empty() {
            specs.printf.clear();
        }
        specs
    }

    pub fn is_empty(&self) -> bool {
        self.qt.is_empty() && !self.count && self.printf.is_empty()
    }

    /// Only `%n`, nothing else.
    pub fn is_count_only(&self) -> bool {
        self.count && self.qt.is_empty() && self.printf.is_empty()
    }
}

impl fmt::Display for FormatSpecifiers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return write!(f, "none");
        }
        let mut parts: Vec<String> = self.qt.iter().map(|n| format!("%{}", n)).collect();
        if self.count {
            parts.push("%n".to_string());
        }
        parts.extend(self.printf.iter().map(|c| format!("%{}", c)));
        write!(f, "{}", parts.join(" "))
    }
}

/// Compare a translation form against its source. Returns a description of
/// the difference, or `None` when they agree.
pub fn compare(source: &str, translation: &str, numerus: bool) -> Option<String> {
    let expected = FormatSpecifiers::extract(source);
    let actual = FormatSpecifiers::extract(translation);
    if expected == actual {
        return None;
    }
    // Singular forms may spell the count out ("one hour").
    if numerus && expected.is_count_only() && !translation.contains('%') {
        return None;
    }
    Some(format!("source uses {}, translation uses {}", expected, actual))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn qt_arguments_are_a_set() {
        let specs = FormatSpecifiers::extract("%2 of %1, then %2 again");
        assert_eq!(specs.qt.iter().copied().collect::<Vec<_>>(), vec![1, 2]);
        assert!(specs.printf.is_empty());
        assert!(compare("%1 and %2", "%2 és %1", false).is_none());
    }

    #[test]
    fn printf_order_matters() {
        assert!(compare("Loading %s from %d", "%s yükleniyor %d", false).is_none());
        assert!(compare("Loading %s from %d", "%d: %s", false).is_some());
    }

    #[test]
    fn bare_percent_in_qt_strings() {
        let specs = FormatSpecifiers::extract("(percentage: %1%)");
        assert_eq!(specs.qt.len(), 1);
        assert!(specs.printf.is_empty());
        assert!(compare("(%1%)", "(%1 %)", false).is_none());
    }

    #[test]
    fn escaped_percent_is_not_a_specifier() {
        assert!(FormatSpecifiers::extract("100%% sure").is_empty());
    }

    #[test]
    fn localized_and_two_digit_arguments() {
        let specs = FormatSpecifiers::extract("%L1 blocks, %12 peers, %Ln left");
        assert_eq!(specs.qt.iter().copied().collect::<Vec<_>>(), vec![1, 12]);
        assert!(specs.count);
    }

    #[test]
    fn missing_argument_is_reported() {
        let diff = compare("Date: %1", "Tarih:", false).unwrap();
        assert!(diff.contains("%1"));
        assert!(diff.contains("none"));
    }

    #[test]
    fn numerus_may_spell_out_count() {
        assert!(compare("%n hour(s)", "egy óra", true).is_none());
        assert!(compare("%n hour(s)", "egy óra", false).is_some());
        assert!(compare("%n hour(s)", "%1 óra", true).is_some());
    }

    #[test]
    fn count_added_without_source() {
        assert!(compare("Hours", "%n óra", false).is_some());
    }
}
