// SPDX-License-Identifier: PMPL-1.0-or-later

//! `.ts` reader
//!
//! Streams the document through quick-xml and builds a [`Catalog`].
//! Text content is kept verbatim: multi-line translations and leading or
//! trailing spaces are significant to translators and to the
//! `surrounding-whitespace` lint, so nothing is trimmed.

use super::{
    Catalog, Context, Location, LocationLine, Message, Translation, TranslationState, TsVersion,
};
use anyhow::{anyhow, bail, Context as _, Result};
use encoding_rs::Encoding;
use quick_xml::events::{BytesStart, BytesText, Event};
use quick_xml::Reader;
use std::borrow::Cow;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Load and parse a `.ts` file.
pub fn load(path: &Path) -> Result<Catalog> {
    let bytes = fs::read(path).with_context(|| format!("reading {}", path.display()))?;
    let text = decode(&bytes).with_context(|| format!("decoding {}", path.display()))?;
    let catalog = parse_str(&text).with_context(|| format!("parsing {}", path.display()))?;
    debug!(
        path = %path.display(),
        language = %catalog.language,
        contexts = catalog.contexts.len(),
        messages = catalog.message_count(),
        "loaded catalog"
    );
    Ok(catalog)
}

/// Whether a `.ts` file is a Qt Linguist catalog rather than a TypeScript
/// source. Unreadable or undecodable files count as catalogs so that the
/// load error is reported.
pub fn is_catalog_file(path: &Path) -> bool {
    match fs::read(path) {
        Ok(bytes) => match decode(&bytes) {
            Ok(text) => has_ts_root(&text),
            Err(_) => true,
        },
        Err(_) => true,
    }
}

/// First element, after any prolog, doctype or comments, is `<TS`.
fn has_ts_root(text: &str) -> bool {
    let mut rest = text.trim_start();
    loop {
        let skip_to = if rest.starts_with("<!--") {
            rest.find("-->").map(|end| end + 3)
        } else if rest.starts_with("<?") || rest.starts_with("<!") {
            rest.find('>').map(|end| end + 1)
        } else {
            break;
        };
        match skip_to {
            Some(end) => rest = rest[end..].trim_start(),
            None => return false,
        }
    }
    rest.strip_prefix("<TS").is_some_and(|after| {
        after
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_whitespace() || c == '>' || c == '/')
    })
}

/// BOM-sniffed decode, strict UTF-8 otherwise.
fn decode(bytes: &[u8]) -> Result<Cow<'_, str>> {
    if let Some((encoding, bom_len)) = Encoding::for_bom(bytes) {
        let (text, had_errors) = encoding.decode_without_bom_handling(&bytes[bom_len..]);
        if had_errors {
            bail!("invalid {} byte sequence", encoding.name());
        }
        return Ok(text);
    }
    match std::str::from_utf8(bytes) {
        Ok(text) => Ok(Cow::Borrowed(text)),
        Err(err) => bail!("not valid UTF-8 (byte {})", err.valid_up_to()),
    }
}

/// Parse `.ts` XML held in memory.
pub fn parse_str(text: &str) -> Result<Catalog> {
    let mut parser = Parser::new(text);
    parser.document()
}

/// Converts byte offsets into 1-based line numbers. Offsets are requested in
/// increasing order, so counting is incremental.
struct LineCounter<'a> {
    text: &'a [u8],
    offset: usize,
    line: u32,
}

impl<'a> LineCounter<'a> {
    fn new(text: &'a str) -> Self {
        Self {
            text: text.as_bytes(),
            offset: 0,
            line: 1,
        }
    }

    fn line_at(&mut self, pos: usize) -> u32 {
        let pos = pos.min(self.text.len());
        if pos < self.offset {
            return 1 + self.text[..pos].iter().filter(|&&b| b == b'\n').count() as u32;
        }
        self.line += self.text[self.offset..pos]
            .iter()
            .filter(|&&b| b == b'\n')
            .count() as u32;
        self.offset = pos;
        self.line
    }
}

struct Parser<'a> {
    reader: Reader<&'a [u8]>,
    lines: LineCounter<'a>,
}

impl<'a> Parser<'a> {
    fn new(text: &'a str) -> Self {
        let mut reader = Reader::from_str(text);
        let config = reader.config_mut();
        config.trim_text(false);
        config.expand_empty_elements = true;
        config.check_end_names = true;
        Self {
            reader,
            lines: LineCounter::new(text),
        }
    }

    /// Next event together with the line it starts on.
    fn next(&mut self) -> Result<(Event<'a>, u32)> {
        let start = self.reader.buffer_position() as usize;
        match self.reader.read_event() {
            Ok(event) => {
                let line = self.lines.line_at(start);
                Ok((event, line))
            }
            Err(err) => {
                let line = self.lines.line_at(self.reader.error_position() as usize);
                Err(anyhow!("line {}: malformed XML: {}", line, err))
            }
        }
    }

    fn skip(&mut self, start: &BytesStart<'a>, line: u32) -> Result<()> {
        debug!(element = %element_name(start), line, "skipping element");
        self.reader
            .read_to_end(start.name())
            .map_err(|err| anyhow!("line {}: malformed XML: {}", line, err))?;
        Ok(())
    }

    fn document(&mut self) -> Result<Catalog> {
        let mut prolog = false;
        let mut catalog = None;

        loop {
            let (event, line) = self.next()?;
            match event {
                Event::Decl(_) | Event::DocType(_) => prolog = true,
                Event::Comment(_) | Event::PI(_) => {}
                Event::Text(ref t) if is_blank(t) => {}
                Event::Text(_) | Event::CData(_) => {
                    bail!("line {}: text outside the <TS> root element", line)
                }
                Event::Start(ref e) if e.name().as_ref() == b"TS" && catalog.is_none() => {
                    catalog = Some(self.ts(e, line)?);
                }
                Event::Start(ref e) => {
                    bail!("line {}: unexpected element <{}>", line, element_name(e))
                }
                Event::End(ref e) => bail!(
                    "line {}: unexpected closing tag </{}>",
                    line,
                    String::from_utf8_lossy(e.name().as_ref())
                ),
                Event::Empty(ref e) => {
                    bail!("line {}: unexpected element <{}/>", line, element_name(e))
                }
                Event::Eof => break,
            }
        }

        let mut catalog = catalog.ok_or_else(|| anyhow!("document has no <TS> root element"))?;
        catalog.prolog = prolog;
        Ok(catalog)
    }

    fn ts(&mut self, start: &BytesStart<'a>, line: u32) -> Result<Catalog> {
        let language = attribute(start, "language")?
            .ok_or_else(|| anyhow!("line {}: <TS> has no language attribute", line))?;
        let version = match attribute(start, "version")? {
            Some(value) => TsVersion::parse(&value)
                .ok_or_else(|| anyhow!("line {}: unsupported TS version {:?}", line, value))?,
            None => TsVersion::default(),
        };
        let mut catalog = Catalog::new(language);
        catalog.version = version;
        catalog.source_language = attribute(start, "sourcelanguage")?;

        loop {
            let (event, line) = self.next()?;
            match event {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"context" => {
                        let context = self.context(line)?;
                        catalog.contexts.push(context);
                    }
                    b"dependencies" => self.skip(e, line)?,
                    _ => bail!("line {}: unexpected element <{}> in <TS>", line, element_name(e)),
                },
                Event::End(_) => return Ok(catalog),
                Event::Text(ref t) if is_blank(t) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => bail!("line {}: unterminated <TS>", line),
                _ => bail!("line {}: unexpected content in <TS>", line),
            }
        }
    }

    fn context(&mut self, line: u32) -> Result<Context> {
        let mut name = None;
        let mut messages = Vec::new();

        loop {
            let (event, event_line) = self.next()?;
            match event {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"name" => name = Some(self.text("name", event_line)?),
                    b"message" => messages.push(self.message(e, event_line)?),
                    b"comment" => self.skip(e, event_line)?,
                    _ => bail!(
                        "line {}: unexpected element <{}> in <context>",
                        event_line,
                        element_name(e)
                    ),
                },
                Event::End(_) => break,
                Event::Text(ref t) if is_blank(t) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => bail!("line {}: unterminated <context>", line),
                _ => bail!("line {}: unexpected content in <context>", event_line),
            }
        }

        let name = name.ok_or_else(|| anyhow!("line {}: <context> has no <name>", line))?;
        Ok(Context {
            name,
            messages,
            line: Some(line),
        })
    }

    fn message(&mut self, start: &BytesStart<'a>, line: u32) -> Result<Message> {
        let numerus = attribute(start, "numerus")?.as_deref() == Some("yes");
        let mut source = None;
        let mut comment = None;
        let mut extra_comment = None;
        let mut translator_comment = None;
        let mut locations = Vec::new();
        let mut translation = None;

        loop {
            let (event, event_line) = self.next()?;
            match event {
                Event::Start(ref e) => match e.name().as_ref() {
                    b"source" => source = Some(self.text("source", event_line)?),
                    b"comment" => comment = Some(self.text("comment", event_line)?),
                    b"extracomment" => {
                        extra_comment = Some(self.text("extracomment", event_line)?)
                    }
                    b"translatorcomment" => {
                        translator_comment = Some(self.text("translatorcomment", event_line)?)
                    }
                    b"location" => {
                        locations.push(location(e, event_line)?);
                        self.skip(e, event_line)?;
                    }
                    b"translation" => {
                        translation = Some(self.translation(e, numerus, event_line)?)
                    }
                    // Neither affects lookup; lupdate regenerates them.
                    b"oldsource" | b"oldcomment" | b"userdata" => self.skip(e, event_line)?,
                    other if other.starts_with(b"extra-") => self.skip(e, event_line)?,
                    _ => bail!(
                        "line {}: unexpected element <{}> in <message>",
                        event_line,
                        element_name(e)
                    ),
                },
                Event::End(_) => break,
                Event::Text(ref t) if is_blank(t) => {}
                Event::Comment(_) | Event::PI(_) => {}
                Event::Eof => bail!("line {}: unterminated <message>", line),
                _ => bail!("line {}: unexpected content in <message>", event_line),
            }
        }

        let source = source.ok_or_else(|| anyhow!("line {}: <message> has no <source>", line))?;
        let translation = translation.unwrap_or_else(|| Translation::unfinished(1));
        Ok(Message {
            source,
            comment,
            extra_comment,
            translator_comment,
            locations,
            numerus,
            translation,
            line: Some(line),
        })
    }

    fn translation(
        &mut self,
        start: &BytesStart<'a>,
        numerus: bool,
        line: u32,
    ) -> Result<Translation> {
        let state = match attribute(start, "type")? {
            Some(value) => TranslationState::parse(&value).ok_or_else(|| {
                anyhow!("line {}: unknown translation type {:?}", line, value)
            })?,
            None => TranslationState::Finished,
        };

        if !numerus {
            let text = self.text("translation", line)?;
            return Ok(Translation {
                state,
                forms: vec![text],
            });
        }

        let mut forms = Vec::new();
        loop {
            let (event, event_line) = self.next()?;
            match event {
                Event::Start(ref e) if e.name().as_ref() == b"numerusform" => {
                    if attribute(e, "variants")?.as_deref() == Some("yes") {
                        bail!("line {}: length variants are not supported", event_line);
                    }
                    forms.push(self.text("numerusform", event_line)?);
                }
                Event::Start(ref e) => bail!(
                    "line {}: unexpected element <{}> in numerus <translation>",
                    event_line,
                    element_name(e)
                ),
                Event::End(_) => break,
                Event::Text(ref t) if is_blank(t) => {}
                Event::Comment(_) => {}
                Event::Eof => bail!("line {}: unterminated <translation>", line),
                _ => bail!(
                    "line {}: text directly inside a numerus <translation>",
                    event_line
                ),
            }
        }
        Ok(Translation { state, forms })
    }

    /// Character data up to the closing tag of `element`.
    fn text(&mut self, element: &str, line: u32) -> Result<String> {
        let mut out = String::new();
        loop {
            let (event, event_line) = self.next()?;
            match event {
                Event::Text(ref t) => {
                    let text = t
                        .unescape()
                        .map_err(|err| anyhow!("line {}: {}", event_line, err))?;
                    out.push_str(&text);
                }
                Event::CData(ref c) => out.push_str(&String::from_utf8_lossy(c)),
                Event::End(_) => return Ok(out),
                Event::Comment(_) => {}
                Event::Start(ref e) if e.name().as_ref() == b"numerusform" => bail!(
                    "line {}: <numerusform> in a message without numerus=\"yes\"",
                    event_line
                ),
                Event::Start(ref e) if e.name().as_ref() == b"lengthvariant" => {
                    bail!("line {}: length variants are not supported", event_line)
                }
                Event::Start(ref e) if e.name().as_ref() == b"byte" => {
                    out.push(byte_value(e, event_line)?);
                    self.skip(e, event_line)?;
                }
                Event::Start(ref e) => bail!(
                    "line {}: unexpected element <{}> inside <{}>",
                    event_line,
                    element_name(e),
                    element
                ),
                Event::Eof => bail!("line {}: unterminated <{}>", line, element),
                _ => bail!("line {}: unexpected content inside <{}>", event_line, element),
            }
        }
    }
}

fn location(start: &BytesStart<'_>, line: u32) -> Result<Location> {
    let filename = attribute(start, "filename")?.unwrap_or_default();
    let line_attr = match attribute(start, "line")? {
        Some(value) => Some(
            LocationLine::parse(&value)
                .ok_or_else(|| anyhow!("line {}: invalid location line {:?}", line, value))?,
        ),
        None => None,
    };
    Ok(Location {
        filename,
        line: line_attr,
    })
}

/// lupdate escapes control characters as `<byte value="x1"/>`; the value
/// is hex with an `x` prefix or plain decimal.
fn byte_value(start: &BytesStart<'_>, line: u32) -> Result<char> {
    let value = attribute(start, "value")?
        .ok_or_else(|| anyhow!("line {}: <byte> has no value attribute", line))?;
    let code = match value.strip_prefix('x') {
        Some(hex) => u32::from_str_radix(hex, 16).ok(),
        None => value.parse::<u32>().ok(),
    };
    code.and_then(char::from_u32)
        .ok_or_else(|| anyhow!("line {}: invalid <byte> value {:?}", line, value))
}

fn attribute(start: &BytesStart<'_>, name: &str) -> Result<Option<String>> {
    for attr in start.attributes() {
        let attr = attr?;
        if attr.key.as_ref() == name.as_bytes() {
            return Ok(Some(attr.unescape_value()?.into_owned()));
        }
    }
    Ok(None)
}

fn element_name(start: &BytesStart<'_>) -> String {
    String::from_utf8_lossy(start.name().as_ref()).into_owned()
}

fn is_blank(text: &BytesText<'_>) -> bool {
    text.iter().all(u8::is_ascii_whitespace)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_lines_incrementally() {
        let mut lines = LineCounter::new("a\nb\nc\n");
        assert_eq!(lines.line_at(0), 1);
        assert_eq!(lines.line_at(2), 2);
        assert_eq!(lines.line_at(5), 3);
        assert_eq!(lines.line_at(1), 1);
    }

    #[test]
    fn decodes_utf8_bom() {
        let bytes = b"\xEF\xBB\xBF<TS/>";
        assert_eq!(decode(bytes).unwrap(), "<TS/>");
    }

    #[test]
    fn decodes_utf16le_bom() {
        let mut bytes = vec![0xFF, 0xFE];
        for unit in "<TS/>".encode_utf16() {
            bytes.extend_from_slice(&unit.to_le_bytes());
        }
        assert_eq!(decode(&bytes).unwrap(), "<TS/>");
    }

    #[test]
    fn byte_elements_decode_to_control_characters() {
        let catalog = parse_str(
            "<TS language=\"tr\">\n<context>\n    <name>RPCConsole</name>\n    <message>\n        <source>Tab<byte value=\"x9\"/>stop</source>\n        <translation>Sekme<byte value=\"9\"/>durak</translation>\n    </message>\n    </context>\n</TS>\n",
        )
        .unwrap();
        let msg = &catalog.contexts[0].messages[0];
        assert_eq!(msg.source, "Tab\tstop");
        assert_eq!(msg.translation.text(), "Sekme\tdurak");

        let err = parse_str(
            "<TS language=\"tr\"><context><name>A</name><message><source><byte value=\"xZZ\"/></source></message></context></TS>",
        )
        .unwrap_err();
        assert!(err.to_string().contains("invalid <byte> value"), "{}", err);
    }

    #[test]
    fn recognises_catalog_roots() {
        assert!(has_ts_root("<TS language=\"hu\" version=\"2.1\">"));
        assert!(has_ts_root(
            "<?xml version=\"1.0\" encoding=\"utf-8\"?>\n<!DOCTYPE TS>\n<!-- generated -> by lupdate -->\n<TS version=\"2.1\">"
        ));
        assert!(!has_ts_root("import { Component } from '@angular/core';\n"));
        assert!(!has_ts_root("const view = <TSX />;"));
        assert!(!has_ts_root("<TSX/>"));
        assert!(!has_ts_root(""));
    }

    #[test]
    fn rejects_latin1() {
        assert!(decode(b"<source>caf\xE9</source>").is_err());
    }
}
