// SPDX-License-Identifier: PMPL-1.0-or-later

//! Update a translated catalog from a newer source template
//!
//! The result follows the template's context and message order. Existing
//! translations carry over by `(context, source, comment)`; anything the
//! template no longer has is kept as `vanished` so translators can still
//! reuse it, unless dropped.

use crate::catalog::{Catalog, Context, Message, MessageKey, Translation, TranslationState};
use crate::i18n::plural_rule_for_tag;
use std::collections::HashSet;
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct MergeOptions {
    /// Discard messages the template no longer contains
    pub drop_obsolete: bool,
    /// Numerus form count for new messages; defaults to the language's rule
    pub plural_forms: Option<usize>,
}

#[derive(Debug, Clone)]
pub struct MergeOutcome {
    pub catalog: Catalog,
    pub kept: usize,
    pub added: usize,
    pub obsoleted: usize,
}

fn carry_over(template: &Message, existing: &Message) -> Option<Translation> {
    if template.numerus != existing.numerus {
        return None;
    }
    let mut translation = existing.translation.clone();
    if translation.state.is_retired() {
        translation.state = TranslationState::Unfinished;
    }
    Some(translation)
}

pub fn merge(template: &Catalog, existing: &Catalog, options: &MergeOptions) -> MergeOutcome {
    let numerus_forms = options
        .plural_forms
        .or_else(|| plural_rule_for_tag(&existing.language).map(|r| r.form_count()))
        .unwrap_or(2);
    let index = existing.index();

    let mut catalog = Catalog {
        contexts: Vec::with_capacity(template.contexts.len()),
        ..existing.clone()
    };
    let mut seen: HashSet<(&str, MessageKey<'_>)> = HashSet::new();
    let (mut kept, mut added, mut obsoleted) = (0, 0, 0);

    for tctx in &template.contexts {
        let mut ctx = Context::new(tctx.name.clone());
        for tmsg in &tctx.messages {
            let key = (tctx.name.as_str(), tmsg.key());
            seen.insert(key);

            let mut msg = Message {
                line: None,
                ..tmsg.clone()
            };
            msg.translator_comment = None;
            match index.get(&key).and_then(|old| {
                carry_over(tmsg, old).map(|t| (t, old.translator_comment.clone()))
            }) {
                Some((translation, translator_comment)) => {
                    msg.translation = translation;
                    msg.translator_comment = translator_comment;
                    kept += 1;
                }
                None => {
                    let forms = if tmsg.numerus { numerus_forms } else { 1 };
                    msg.translation = Translation::unfinished(forms);
                    added += 1;
                }
            }
            ctx.messages.push(msg);
        }
        catalog.contexts.push(ctx);
    }

    if !options.drop_obsolete {
        for (ectx, emsg) in existing.messages() {
            if seen.contains(&(ectx.name.as_str(), emsg.key())) {
                continue;
            }
            // Duplicates of one key are folded together.
            seen.insert((ectx.name.as_str(), emsg.key()));

            let mut retired = Message {
                line: None,
                ..emsg.clone()
            };
            if !retired.translation.state.is_retired() {
                retired.translation.state = TranslationState::Vanished;
            }
            let position = catalog.contexts.iter().position(|c| c.name == ectx.name);
            let target = match position {
                Some(i) => &mut catalog.contexts[i],
                None => {
                    catalog.contexts.push(Context::new(ectx.name.clone()));
                    let last = catalog.contexts.len() - 1;
                    &mut catalog.contexts[last]
                }
            };
            target.messages.push(retired);
            obsoleted += 1;
        }
    } else {
        debug!("dropping messages absent from the template");
    }

    info!(
        language = %catalog.language,
        kept,
        added,
        obsoleted,
        "merged catalog"
    );

    MergeOutcome {
        catalog,
        kept,
        added,
        obsoleted,
    }
}
