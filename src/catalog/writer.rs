// SPDX-License-Identifier: PMPL-1.0-or-later

//! Canonical `.ts` serialization
//!
//! Emits the layout Transifex produces for the wallet locale files: contexts
//! at column zero, four-space steps below that, numerus forms inline, and
//! the closing `</context>` indented one step. A file already in this
//! layout survives a read/write cycle byte for byte.

use super::{Catalog, Context, Message};
use anyhow::{Context as _, Result};
use std::fmt::Write as _;
use std::fs;
use std::path::Path;

const PROLOG: &str = "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n";

/// Serialize a catalog to `.ts` XML.
pub fn to_string(catalog: &Catalog) -> String {
    let mut out = String::new();
    if catalog.prolog {
        out.push_str(PROLOG);
    }

    // lupdate puts version first, Transifex puts language first.
    out.push_str("<TS");
    let version = catalog.version.as_str();
    if catalog.prolog {
        push_attr(&mut out, "version", version);
        push_attr(&mut out, "language", &catalog.language);
    } else {
        push_attr(&mut out, "language", &catalog.language);
        push_attr(&mut out, "version", version);
    }
    if let Some(source_language) = &catalog.source_language {
        push_attr(&mut out, "sourcelanguage", source_language);
    }
    out.push_str(">\n");

    for context in &catalog.contexts {
        write_context(&mut out, context);
    }

    out.push_str("</TS>\n");
    out
}

/// Serialize and write a catalog.
pub fn save(catalog: &Catalog, path: &Path) -> Result<()> {
    fs::write(path, to_string(catalog)).with_context(|| format!("writing {}", path.display()))
}

fn write_context(out: &mut String, context: &Context) {
    out.push_str("<context>\n");
    out.push_str("    <name>");
    push_text(out, &context.name);
    out.push_str("</name>\n");
    for message in &context.messages {
        write_message(out, message);
    }
    out.push_str("    </context>\n");
}

fn write_message(out: &mut String, message: &Message) {
    out.push_str("    <message");
    if message.numerus {
        out.push_str(" numerus=\"yes\"");
    }
    out.push_str(">\n");

    for location in &message.locations {
        out.push_str("        <location");
        // Relative locations omit the file when it repeats.
        if !location.filename.is_empty() {
            push_attr(out, "filename", &location.filename);
        }
        if let Some(line) = location.line {
            push_attr(out, "line", &line.to_string());
        }
        out.push_str("/>\n");
    }

    push_element(out, "source", &message.source);
    if let Some(comment) = &message.comment {
        push_element(out, "comment", comment);
    }
    if let Some(extra) = &message.extra_comment {
        push_element(out, "extracomment", extra);
    }
    if let Some(note) = &message.translator_comment {
        push_element(out, "translatorcomment", note);
    }

    out.push_str("        <translation");
    if let Some(state) = message.translation.state.attribute() {
        push_attr(out, "type", state);
    }
    out.push('>');
    if message.numerus {
        for form in &message.translation.forms {
            out.push_str("<numerusform>");
            push_text(out, form);
            out.push_str("</numerusform>");
        }
    } else {
        push_text(out, message.translation.text());
    }
    out.push_str("</translation>\n");

    out.push_str("    </message>\n");
}

fn push_element(out: &mut String, name: &str, text: &str) {
    out.push_str("        <");
    out.push_str(name);
    out.push('>');
    push_text(out, text);
    out.push_str("</");
    out.push_str(name);
    out.push_str(">\n");
}

fn push_attr(out: &mut String, name: &str, value: &str) {
    out.push(' ');
    out.push_str(name);
    out.push_str("=\"");
    for ch in value.chars() {
        match ch {
            '"' => out.push_str("&quot;"),
            _ => push_escaped(out, ch),
        }
    }
    out.push('"');
}

/// Only `&`, `<` and `>` are escaped in character data, matching lupdate.
/// Control characters XML cannot carry become `<byte value="xN"/>`.
fn push_text(out: &mut String, text: &str) {
    for ch in text.chars() {
        match ch {
            '\t' | '\n' | '\r' => out.push(ch),
            c if (c as u32) < 0x20 => {
                let _ = write!(out, "<byte value=\"x{:x}\"/>", c as u32);
            }
            _ => push_escaped(out, ch),
        }
    }
}

fn push_escaped(out: &mut String, ch: char) {
    match ch {
        '&' => out.push_str("&amp;"),
        '<' => out.push_str("&lt;"),
        '>' => out.push_str("&gt;"),
        _ => out.push(ch),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{Catalog, Context, Message, Translation, TranslationState};

    #[test]
    fn writes_empty_context_with_indented_close() {
        let catalog = Catalog::new("ta").with_context(Context::new("WalletView"));
        assert_eq!(
            to_string(&catalog),
            "<TS language=\"ta\" version=\"2.1\">\n<context>\n    <name>WalletView</name>\n    </context>\n</TS>\n"
        );
    }

    #[test]
    fn escapes_markup_in_text() {
        let catalog = Catalog::new("tr").with_context(
            Context::new("AskPassphraseDialog")
                .with_messages(vec![Message::new("<b>LOSE</b> & more", "<b>KAYIP</b>")]),
        );
        let xml = to_string(&catalog);
        assert!(xml.contains("<source>&lt;b&gt;LOSE&lt;/b&gt; &amp; more</source>"));
        assert!(xml.contains("<translation>&lt;b&gt;KAYIP&lt;/b&gt;</translation>"));
    }

    #[test]
    fn numerus_forms_inline() {
        let catalog = Catalog::new("hu").with_context(
            Context::new("BitcoinGUI")
                .with_messages(vec![Message::numerus("%n day(s)", ["%n nap", "%n nap"])]),
        );
        let xml = to_string(&catalog);
        assert!(xml.contains("    <message numerus=\"yes\">\n"));
        assert!(xml.contains(
            "        <translation><numerusform>%n nap</numerusform><numerusform>%n nap</numerusform></translation>\n"
        ));
    }

    #[test]
    fn unfinished_state_attribute() {
        let mut msg = Message::new("Amount", "");
        msg.translation = Translation {
            state: TranslationState::Unfinished,
            forms: vec![String::new()],
        };
        let catalog =
            Catalog::new("fa_IR").with_context(Context::new("QObject").with_messages(vec![msg]));
        assert!(to_string(&catalog).contains("<translation type=\"unfinished\"></translation>"));
    }

    #[test]
    fn prolog_orders_version_first() {
        let mut catalog = Catalog::new("de");
        catalog.prolog = true;
        let xml = to_string(&catalog);
        assert!(xml.starts_with(PROLOG));
        assert!(xml.contains("<TS version=\"2.1\" language=\"de\">"));
    }
}
