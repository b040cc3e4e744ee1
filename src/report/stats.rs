// SPDX-License-Identifier: PMPL-1.0-or-later

//! Completion figures and source fingerprint for a catalog

use crate::catalog::{Catalog, TranslationState};
use crate::types::CatalogStats;

pub fn compute(catalog: &Catalog) -> CatalogStats {
    let mut stats = CatalogStats {
        contexts: catalog.contexts.len(),
        empty_contexts: catalog
            .contexts
            .iter()
            .filter(|c| c.messages.is_empty())
            .count(),
        messages: catalog.message_count(),
        ..CatalogStats::default()
    };

    for (_, msg) in catalog.messages() {
        if msg.numerus {
            stats.numerus_messages += 1;
        }
        let state = msg.translation.state;
        if state.is_retired() {
            stats.retired += 1;
        } else if msg.translation.is_empty() {
            stats.untranslated += 1;
        } else if state == TranslationState::Unfinished {
            stats.unfinished += 1;
        } else {
            stats.translated += 1;
        }
    }

    let active = stats.messages - stats.retired;
    stats.completion = if active == 0 {
        0.0
    } else {
        stats.translated as f64 * 100.0 / active as f64
    };
    stats.fingerprint = fingerprint(catalog);
    stats
}

/// BLAKE3 over the ordered `(context, source, comment)` keys of every
/// non-retired message. Two catalogs generated from the same template share
/// a fingerprint whatever their translations.
pub fn fingerprint(catalog: &Catalog) -> String {
    let mut hasher = blake3::Hasher::new();
    for (ctx, msg) in catalog.messages() {
        if msg.translation.state.is_retired() {
            continue;
        }
        hasher.update(ctx.name.as_bytes());
        hasher.update(&[0]);
        hasher.update(msg.source.as_bytes());
        match &msg.comment {
            Some(comment) => {
                hasher.update(&[1]);
                hasher.update(comment.as_bytes());
            }
            None => {
                hasher.update(&[2]);
            }
        }
        hasher.update(&[0]);
    }
    hasher.finalize().to_hex().to_string()
}
