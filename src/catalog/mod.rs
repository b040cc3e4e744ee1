// SPDX-License-Identifier: PMPL-1.0-or-later

//! Qt Linguist catalog model
//!
//! A catalog is one `.ts` file: a language tag plus an ordered list of
//! contexts, each holding the source/translation pairs for one UI class.
//! Reading lives in [`reader`], canonical serialization in [`writer`].

pub mod reader;
pub mod writer;

use anyhow::{bail, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fmt;
use std::path::Path;

pub use reader::{is_catalog_file, load, parse_str};
pub use writer::{save, to_string};

/// Format versions seen in the wild. Transifex exports still emit `2.0`
/// for some locales (zh_HK) and `2.1` for the rest.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TsVersion {
    #[serde(rename = "2.0")]
    V2_0,
    #[serde(rename = "2.1")]
    V2_1,
}

impl TsVersion {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim() {
            "2.0" => Some(TsVersion::V2_0),
            "2.1" => Some(TsVersion::V2_1),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            TsVersion::V2_0 => "2.0",
            TsVersion::V2_1 => "2.1",
        }
    }
}

impl Default for TsVersion {
    fn default() -> Self {
        TsVersion::V2_1
    }
}

/// The `type` attribute of `<translation>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TranslationState {
    #[default]
    Finished,
    Unfinished,
    Vanished,
    Obsolete,
}

impl TranslationState {
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "unfinished" => Some(TranslationState::Unfinished),
            "vanished" => Some(TranslationState::Vanished),
            "obsolete" => Some(TranslationState::Obsolete),
            _ => None,
        }
    }

    /// Attribute value, `None` for finished translations (no attribute).
    pub fn attribute(&self) -> Option<&'static str> {
        match self {
            TranslationState::Finished => None,
            TranslationState::Unfinished => Some("unfinished"),
            TranslationState::Vanished => Some("vanished"),
            TranslationState::Obsolete => Some("obsolete"),
        }
    }

    /// Vanished and obsolete entries are kept for translators but never
    /// shown to users.
    pub fn is_retired(&self) -> bool {
        matches!(
            self,
            TranslationState::Vanished | TranslationState::Obsolete
        )
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct Translation {
    #[serde(default)]
    pub state: TranslationState,
    /// One entry for plain messages, one per `<numerusform>` otherwise.
    pub forms: Vec<String>,
}

impl Translation {
    pub fn single(text: impl Into<String>) -> Self {
        Self {
            state: TranslationState::Finished,
            forms: vec![text.into()],
        }
    }

    pub fn plural<I, S>(forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            state: TranslationState::Finished,
            forms: forms.into_iter().map(Into::into).collect(),
        }
    }

    pub fn unfinished(form_count: usize) -> Self {
        Self {
            state: TranslationState::Unfinished,
            forms: vec![String::new(); form_count],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.forms.iter().all(|f| f.is_empty())
    }

    pub fn text(&self) -> &str {
        self.forms.first().map(String::as_str).unwrap_or("")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Location {
    pub filename: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub line: Option<LocationLine>,
}

/// `line` attribute of a `<location>`. lupdate's relative mode writes the
/// offset from the previous location of the same file, always signed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum LocationLine {
    Absolute(u32),
    Relative(i32),
}

impl LocationLine {
    pub fn parse(value: &str) -> Option<Self> {
        let value = value.trim();
        match value.as_bytes().first()? {
            b'+' | b'-' => value.parse().ok().map(LocationLine::Relative),
            _ => value.parse().ok().map(LocationLine::Absolute),
        }
    }
}

impl fmt::Display for LocationLine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LocationLine::Absolute(line) => write!(f, "{}", line),
            LocationLine::Relative(offset) => write!(f, "{:+}", offset),
        }
    }
}

impl From<LocationLine> for String {
    fn from(line: LocationLine) -> Self {
        line.to_string()
    }
}

impl TryFrom<String> for LocationLine {
    type Error = String;

    fn try_from(value: String) -> std::result::Result<Self, Self::Error> {
        LocationLine::parse(&value).ok_or_else(|| format!("invalid location line {:?}", value))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub source: String,
    /// Disambiguation comment; part of the lookup key.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extra_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub translator_comment: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub locations: Vec<Location>,
    #[serde(default)]
    pub numerus: bool,
    pub translation: Translation,
    /// Line of the `<message>` tag in the file it was read from.
    #[serde(skip)]
    pub line: Option<u32>,
}

impl Message {
    pub fn new(source: impl Into<String>, translation: impl Into<String>) -> Self {
        Self {
            source: source.into(),
            comment: None,
            extra_comment: None,
            translator_comment: None,
            locations: Vec::new(),
            numerus: false,
            translation: Translation::single(translation),
            line: None,
        }
    }

    pub fn numerus<I, S>(source: impl Into<String>, forms: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            numerus: true,
            translation: Translation::plural(forms),
            ..Self::new(source, "")
        }
    }

    pub fn key(&self) -> MessageKey<'_> {
        MessageKey {
            source: &self.source,
            comment: self.comment.as_deref(),
        }
    }
}

/// `(source, comment)`; unique within a context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MessageKey<'a> {
    pub source: &'a str,
    pub comment: Option<&'a str>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Context {
    pub name: String,
    #[serde(default)]
    pub messages: Vec<Message>,
    #[serde(skip)]
    pub line: Option<u32>,
}

impl Context {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            messages: Vec::new(),
            line: None,
        }
    }

    pub fn with_messages(mut self, messages: Vec<Message>) -> Self {
        self.messages = messages;
        self
    }

    pub fn find(&self, source: &str, comment: Option<&str>) -> Option<&Message> {
        self.messages
            .iter()
            .find(|m| m.source == source && m.comment.as_deref() == comment)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Catalog {
    pub language: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source_language: Option<String>,
    #[serde(default)]
    pub version: TsVersion,
    /// Whether the file opened with `<?xml …?>` and `<!DOCTYPE TS>`.
    #[serde(default)]
    pub prolog: bool,
    #[serde(default)]
    pub contexts: Vec<Context>,
}

impl Catalog {
    pub fn new(language: impl Into<String>) -> Self {
        Self {
            language: language.into(),
            source_language: None,
            version: TsVersion::default(),
            prolog: false,
            contexts: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: Context) -> Self {
        self.contexts.push(context);
        self
    }

    /// First context with the given name. Duplicate names are a lint
    /// finding, not a load error, so lookups resolve to the first one.
    pub fn context(&self, name: &str) -> Option<&Context> {
        self.contexts.iter().find(|c| c.name == name)
    }

    pub fn find(&self, context: &str, source: &str, comment: Option<&str>) -> Option<&Message> {
        self.contexts
            .iter()
            .filter(|c| c.name == context)
            .find_map(|c| c.find(source, comment))
    }

    pub fn messages(&self) -> impl Iterator<Item = (&Context, &Message)> {
        self.contexts
            .iter()
            .flat_map(|c| c.messages.iter().map(move |m| (c, m)))
    }

    pub fn message_count(&self) -> usize {
        self.contexts.iter().map(|c| c.messages.len()).sum()
    }

    /// Index of every message by `(context, source, comment)`. The first
    /// occurrence wins.
    pub fn index(&self) -> HashMap<(&str, MessageKey<'_>), &Message> {
        let mut map = HashMap::new();
        for (ctx, msg) in self.messages() {
            map.entry((ctx.name.as_str(), msg.key())).or_insert(msg);
        }
        map
    }
}

/// Load a catalog from `.ts`, `.json` or `.yaml`/`.yml` by extension.
pub fn load_any(path: &Path) -> Result<Catalog> {
    use anyhow::Context as _;

    match path.extension().and_then(|ext| ext.to_str()) {
        Some("ts") => load(path),
        Some("json") => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("parsing json catalog {}", path.display()))
        }
        Some("yaml") | Some("yml") => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("reading catalog {}", path.display()))?;
            serde_yaml::from_str(&content)
                .with_context(|| format!("parsing yaml catalog {}", path.display()))
        }
        other => bail!(
            "unsupported catalog extension {:?} for {}",
            other.unwrap_or(""),
            path.display()
        ),
    }
}

/// Write a catalog as `.ts`, `.json` or `.yaml`/`.yml` by extension.
pub fn save_any(catalog: &Catalog, path: &Path) -> Result<()> {
    use anyhow::Context as _;

    let content = match path.extension().and_then(|ext| ext.to_str()) {
        Some("ts") => to_string(catalog),
        Some("json") => serde_json::to_string_pretty(catalog)?,
        Some("yaml") | Some("yml") => serde_yaml::to_string(catalog)?,
        other => bail!(
            "unsupported catalog extension {:?} for {}",
            other.unwrap_or(""),
            path.display()
        ),
    };
    std::fs::write(path, content).with_context(|| format!("writing {}", path.display()))
}
