// SPDX-License-Identifier: PMPL-1.0-or-later

//! Runtime string lookup over loaded catalogs
//!
//! Mirrors how a Qt application resolves `tr()` calls: installed catalogs are
//! searched newest first, the first non-empty translation wins, and the
//! source string is the last resort. Numerus messages pick their form with
//! the catalog language's plural rule.

use crate::catalog::{self, Catalog, Message};
use crate::i18n::{plural_rule_for_tag, LanguageTag, PluralRule};
use anyhow::{anyhow, bail, Result};
use std::borrow::Cow;
use std::collections::BTreeMap;
use std::path::Path;
use tracing::debug;

#[derive(Debug)]
struct Installed {
    catalog: Catalog,
    rule: Option<PluralRule>,
}

#[derive(Debug, Default)]
pub struct Translator {
    installed: Vec<Installed>,
}

impl Translator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a catalog; it takes precedence over those installed before.
    pub fn install(&mut self, catalog: Catalog) {
        let rule = plural_rule_for_tag(&catalog.language);
        debug!(
            language = %catalog.language,
            messages = catalog.message_count(),
            "installed catalog"
        );
        self.installed.push(Installed { catalog, rule });
    }

    pub fn is_empty(&self) -> bool {
        self.installed.is_empty()
    }

    /// Load `{prefix}_{lang}.ts` and then `{prefix}_{lang}_{TERRITORY}.ts`
    /// from `dir`, so territory strings override the base language.
    pub fn from_locale_dir(dir: &Path, prefix: &str, tag: &str) -> Result<Self> {
        let parsed =
            LanguageTag::parse(tag).ok_or_else(|| anyhow!("malformed language tag {:?}", tag))?;
        let mut stems = vec![parsed.language.clone()];
        if parsed.territory.is_some() {
            stems.push(parsed.file_stem());
        }

        let mut translator = Self::new();
        for stem in stems {
            let path = dir.join(format!("{}_{}.ts", prefix, stem));
            if path.is_file() {
                translator.install(catalog::load(&path)?);
            } else {
                debug!(path = %path.display(), "no catalog");
            }
        }
        if translator.is_empty() {
            bail!(
                "no {}_*.ts catalog for {} in {}",
                prefix,
                tag,
                dir.display()
            );
        }
        Ok(translator)
    }

    fn lookup<'a>(
        installed: &'a Installed,
        context: &str,
        source: &str,
        comment: Option<&str>,
    ) -> Option<&'a Message> {
        installed
            .catalog
            .find(context, source, comment)
            .filter(|m| !m.translation.state.is_retired())
    }

    pub fn translate(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&str> {
        self.installed.iter().rev().find_map(|installed| {
            let msg = Self::lookup(installed, context, source, comment)?;
            let text = msg.translation.text();
            (!text.is_empty()).then_some(text)
        })
    }

    /// Translate a numerus message for count `n`, with `%n` substituted.
    pub fn translate_plural(
        &self,
        context: &str,
        source: &str,
        comment: Option<&str>,
        n: u64,
    ) -> Option<String> {
        self.installed.iter().rev().find_map(|installed| {
            let msg = Self::lookup(installed, context, source, comment)?;
            let forms = &msg.translation.forms;
            if forms.is_empty() {
                return None;
            }
            let index = installed
                .rule
                .map(|rule| rule.form_index(n))
                .unwrap_or(usize::from(n != 1))
                .min(forms.len() - 1);
            let form = &forms[index];
            (!form.is_empty()).then(|| substitute_count(form, n))
        })
    }

    /// Translation or the source string itself.
    pub fn tr<'a>(&'a self, context: &str, source: &'a str) -> Cow<'a, str> {
        match self.translate(context, source, None) {
            Some(text) => Cow::Borrowed(text),
            None => Cow::Borrowed(source),
        }
    }

    /// Plural translation, falling back to the source with `%n` filled in.
    pub fn tr_plural(&self, context: &str, source: &str, n: u64) -> String {
        self.translate_plural(context, source, None, n)
            .unwrap_or_else(|| substitute_count(source, n))
    }
}

/// Replace `%n` and `%Ln` with the count.
pub fn substitute_count(text: &str, n: u64) -> String {
    text.replace("%Ln", &n.to_string())
        .replace("%n", &n.to_string())
}

/// Parse a Qt argument marker at `chars[i]` (which is `%`). Returns the
/// argument number and the index after the marker.
fn marker_at(chars: &[char], i: usize) -> Option<(u32, usize)> {
    let mut j = i + 1;
    if chars.get(j) == Some(&'L') {
        j += 1;
    }
    let first = chars.get(j)?.to_digit(10).filter(|d| *d > 0)?;
    j += 1;
    match chars.get(j).and_then(|c| c.to_digit(10)) {
        Some(second) => Some((first * 10 + second, j + 1)),
        None => Some((first, j)),
    }
}

/// Qt multi-argument substitution: the lowest marker takes the first
/// argument, the next lowest the second, and so on. Markers beyond the
/// supplied arguments are left in place.
///
/// ```
/// use tscheck::translator::arg;
/// assert_eq!(arg("%2 of %1", &["3", "10"]), "10 of 3");
/// assert_eq!(arg("%1 (%3)", &["a"]), "a (%3)");
/// ```
pub fn arg(template: &str, args: &[&str]) -> String {
    let chars: Vec<char> = template.chars().collect();

    let mut numbers = Vec::new();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%' {
            if let Some((number, next)) = marker_at(&chars, i) {
                numbers.push(number);
                i = next;
                continue;
            }
        }
        i += 1;
    }
    numbers.sort_unstable();
    numbers.dedup();
    let slots: BTreeMap<u32, &str> = numbers.into_iter().zip(args.iter().copied()).collect();

    let mut out = String::with_capacity(template.len());
    let mut i = 0;
    while i < chars.len() {
        if chars[i] == '%' {
            if let Some((number, next)) = marker_at(&chars, i) {
                match slots.get(&number) {
                    Some(value) => out.push_str(value),
                    None => out.extend(&chars[i..next]),
                }
                i = next;
                continue;
            }
        }
        out.push(chars[i]);
        i += 1;
    }
    out
}
