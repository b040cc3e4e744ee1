// SPDX-License-Identifier: PMPL-1.0-or-later

//! Individual catalog checks
//!
//! Each check pushes raw findings at the rule's default severity; the engine
//! in `lint::check` applies configuration afterwards.

use super::placeholders;
use crate::catalog::{Catalog, Context, Message};
use crate::i18n::{LanguageTag, PluralRule};
use crate::types::{Finding, LintRule};
use std::collections::{HashMap, HashSet};

fn finding(rule: LintRule, message: String) -> Finding {
    Finding {
        rule,
        severity: rule.default_severity(),
        message,
        context: None,
        source: None,
        line: None,
    }
}

fn message_finding(rule: LintRule, ctx: &Context, msg: &Message, text: String) -> Finding {
    Finding {
        context: Some(ctx.name.clone()),
        source: Some(msg.source.clone()),
        line: msg.line,
        ..finding(rule, text)
    }
}

pub(crate) fn language(catalog: &Catalog, has_override: bool, out: &mut Vec<Finding>) {
    let tag = &catalog.language;
    let text = match LanguageTag::parse(tag) {
        None => format!("language tag {:?} is malformed", tag),
        Some(parsed) if !parsed.is_known() => {
            format!("language code {:?} is not an ISO 639 code", parsed.language)
        }
        Some(parsed) => {
            if has_override || PluralRule::for_language(&parsed.language).is_some() {
                return;
            }
            format!(
                "no plural rule for {:?}; numerus forms cannot be checked",
                parsed.language
            )
        }
    };
    out.push(finding(LintRule::UnknownLanguage, text));
}

pub(crate) fn duplicate_contexts(catalog: &Catalog, out: &mut Vec<Finding>) {
    let mut first_seen: HashMap<&str, Option<u32>> = HashMap::new();
    for ctx in &catalog.contexts {
        if let Some(first) = first_seen.get(ctx.name.as_str()) {
            let text = match first {
                Some(line) => format!("context {:?} already defined at line {}", ctx.name, line),
                None => format!("context {:?} already defined", ctx.name),
            };
            out.push(Finding {
                context: Some(ctx.name.clone()),
                line: ctx.line,
                ..finding(LintRule::DuplicateContext, text)
            });
        } else {
            first_seen.insert(ctx.name.as_str(), ctx.line);
        }
    }
}

pub(crate) fn duplicate_messages(ctx: &Context, out: &mut Vec<Finding>) {
    let mut seen = HashSet::new();
    for msg in &ctx.messages {
        if !seen.insert(msg.key()) {
            let text = match &msg.comment {
                Some(comment) => format!(
                    "message {:?} (comment {:?}) repeats in context {:?}",
                    msg.source, comment, ctx.name
                ),
                None => format!("message {:?} repeats in context {:?}", msg.source, ctx.name),
            };
            out.push(message_finding(LintRule::DuplicateMessage, ctx, msg, text));
        }
    }
}

pub(crate) fn empty_context(ctx: &Context, out: &mut Vec<Finding>) {
    if ctx.messages.is_empty() {
        out.push(Finding {
            context: Some(ctx.name.clone()),
            line: ctx.line,
            ..finding(
                LintRule::EmptyContext,
                format!("context {:?} has no messages", ctx.name),
            )
        });
    }
}

pub(crate) fn numerus_forms(
    ctx: &Context,
    msg: &Message,
    expected: Option<usize>,
    out: &mut Vec<Finding>,
) {
    let Some(expected) = expected else {
        return;
    };
    if !msg.numerus || msg.translation.is_empty() {
        return;
    }
    let actual = msg.translation.forms.len();
    if actual != expected {
        out.push(message_finding(
            LintRule::NumerusFormCount,
            ctx,
            msg,
            format!("{} numerus forms, language expects {}", actual, expected),
        ));
    }
}

pub(crate) fn untranslated(ctx: &Context, msg: &Message, out: &mut Vec<Finding>) {
    let forms = &msg.translation.forms;
    let empty = forms.iter().filter(|f| f.is_empty()).count();
    if forms.is_empty() || empty == forms.len() {
        out.push(message_finding(
            LintRule::Untranslated,
            ctx,
            msg,
            "no translation".to_string(),
        ));
    } else if empty > 0 {
        out.push(message_finding(
            LintRule::Untranslated,
            ctx,
            msg,
            format!("{} of {} numerus forms empty", empty, forms.len()),
        ));
    }
}

/// Non-empty translation forms, paired with their position.
fn filled_forms(msg: &Message) -> impl Iterator<Item = (usize, &str)> {
    msg.translation
        .forms
        .iter()
        .enumerate()
        .filter(|(_, f)| !f.is_empty())
        .map(|(i, f)| (i, f.as_str()))
}

fn form_label(msg: &Message, index: usize) -> String {
    if msg.numerus {
        format!("numerus form {}: ", index + 1)
    } else {
        String::new()
    }
}

pub(crate) fn placeholders(ctx: &Context, msg: &Message, out: &mut Vec<Finding>) {
    for (i, form) in filled_forms(msg) {
        if let Some(diff) = placeholders::compare(&msg.source, form, msg.numerus) {
            out.push(message_finding(
                LintRule::PlaceholderMismatch,
                ctx,
                msg,
                format!("{}{}", form_label(msg, i), diff),
            ));
        }
    }
}

/// Mnemonic ampersands; `&&` is a literal and `&name;` an HTML entity.
pub fn has_accelerator(text: &str) -> bool {
    let chars: Vec<char> = text.chars().collect();
    let mut i = 0;
    while i < chars.len() {
        if chars[i] != '&' {
            i += 1;
            continue;
        }
        match chars.get(i + 1) {
            Some('&') => i += 2,
            Some(c) if c.is_whitespace() => i += 1,
            Some(_) if is_entity(&chars[i + 1..]) => i += 1,
            Some(_) => return true,
            None => i += 1,
        }
    }
    false
}

fn is_entity(rest: &[char]) -> bool {
    let end = match rest.iter().take(10).position(|c| *c == ';') {
        Some(end) if end > 0 => end,
        _ => return false,
    };
    let body = &rest[..end];
    if body[0] == '#' {
        body.len() > 1 && body[1..].iter().all(|c| c.is_ascii_alphanumeric())
    } else {
        body.iter().all(|c| c.is_ascii_alphabetic())
    }
}

pub(crate) fn accelerators(ctx: &Context, msg: &Message, out: &mut Vec<Finding>) {
    let expected = has_accelerator(&msg.source);
    for (i, form) in filled_forms(msg) {
        let actual = has_accelerator(form);
        if actual != expected {
            let text = if expected {
                "source has an accelerator, translation has none"
            } else {
                "translation has an accelerator the source lacks"
            };
            out.push(message_finding(
                LintRule::AcceleratorMismatch,
                ctx,
                msg,
                format!("{}{}", form_label(msg, i), text),
            ));
        }
    }
}

pub(crate) fn surrounding_whitespace(ctx: &Context, msg: &Message, out: &mut Vec<Finding>) {
    let leading = |s: &str| s.starts_with(char::is_whitespace);
    let trailing = |s: &str| s.ends_with(char::is_whitespace);
    for (i, form) in filled_forms(msg) {
        let mut problems = Vec::new();
        if leading(&msg.source) != leading(form) {
            problems.push("leading");
        }
        if trailing(&msg.source) != trailing(form) {
            problems.push("trailing");
        }
        if !problems.is_empty() {
            out.push(message_finding(
                LintRule::SurroundingWhitespace,
                ctx,
                msg,
                format!(
                    "{}{} whitespace differs from the source",
                    form_label(msg, i),
                    problems.join(" and ")
                ),
            ));
        }
    }
}

/// Final punctuation class, folding full-width and script-specific marks.
pub fn ending_class(text: &str) -> Option<char> {
    let trimmed = text.trim_end();
    if trimmed.ends_with("...") || trimmed.ends_with('…') {
        return Some('…');
    }
    match trimmed.chars().last()? {
        '.' | '。' | '।' | '۔' | '｡' => Some('.'),
        ':' | '：' => Some(':'),
        '?' | '？' | '؟' => Some('?'),
        '!' | '！' => Some('!'),
        _ => None,
    }
}

pub(crate) fn ending_punctuation(ctx: &Context, msg: &Message, out: &mut Vec<Finding>) {
    let expected = ending_class(&msg.source);
    for (i, form) in filled_forms(msg) {
        let actual = ending_class(form);
        if actual != expected {
            let show = |c: Option<char>| c.map(|c| format!("{:?}", c)).unwrap_or("none".into());
            out.push(message_finding(
                LintRule::EndingPunctuation,
                ctx,
                msg,
                format!(
                    "{}source ends with {}, translation with {}",
                    form_label(msg, i),
                    show(expected),
                    show(actual)
                ),
            ));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accelerator_detection() {
        assert!(has_accelerator("&New"));
        assert!(has_accelerator("C&lose"));
        assert!(!has_accelerator("Save && exit"));
        assert!(!has_accelerator("Fee & change"));
        assert!(!has_accelerator("a&nbsp;b"));
        assert!(!has_accelerator("&#160;"));
        assert!(!has_accelerator("trailing &"));
    }

    #[test]
    fn ending_classes_fold_cjk() {
        assert_eq!(ending_class("Done."), Some('.'));
        assert_eq!(ending_class("完成。"), Some('.'));
        assert_eq!(ending_class("Sure？"), Some('?'));
        assert_eq!(ending_class("Loading..."), Some('…'));
        assert_eq!(ending_class("Amount"), None);
    }

    #[test]
    fn duplicate_contexts_report_first_line() {
        let mut a = Context::new("RPCConsole");
        a.line = Some(3);
        let mut b = Context::new("RPCConsole");
        b.line = Some(40);
        let catalog = Catalog::new("tr").with_context(a).with_context(b);
        let mut out = Vec::new();
        duplicate_contexts(&catalog, &mut out);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].line, Some(40));
        assert!(out[0].message.contains("line 3"));
    }

    #[test]
    fn malformed_language() {
        let mut out = Vec::new();
        language(&Catalog::new("Hungarian"), false, &mut out);
        assert_eq!(out.len(), 1);
        assert!(out[0].message.contains("malformed"));

        out.clear();
        language(&Catalog::new("hu"), false, &mut out);
        assert!(out.is_empty());
    }
}
