// SPDX-License-Identifier: PMPL-1.0-or-later

//! tscheck: Qt Linguist translation catalog toolkit.
//!
//! Reads `.ts` catalogs (the per-locale string tables of a Qt application
//! such as a Bitcoin wallet GUI), writes them back in canonical layout, and
//! checks them for the mistakes that break a release: numerus form counts
//! that do not match the language's plural rules, format specifiers that
//! differ between source and translation, duplicate contexts.
//!
//! MODULES:
//! 1. **catalog**: data model, XML reader and canonical writer.
//! 2. **lint**: rule engine over a loaded catalog.
//! 3. **merge** and **translator**: catalog update and runtime lookup.
//! 4. **report** and **sweep**: terminal, JSON/YAML/SARIF output and batch runs.

pub mod catalog;
pub mod config;
pub mod i18n;
pub mod lint;
pub mod merge;
pub mod report;
pub mod sweep;
pub mod translator;
pub mod types;
