//! docsearch - live keyword search over documentation indexes.
//!
//! A documentation site ships an ordered keyword index: one entry per page
//! with a tag, a title, and auxiliary keywords. This library filters that
//! index as a query is typed, renders the matches as parallel title and tag
//! lists, maps a selection in the title list back to its entry, and turns
//! the chosen entry into a navigation target.
//!
//! # Modules
//!
//! - [`index`] - Entry and keyword index types, JSON and script loaders
//! - [`search`] - Tokenizer, matcher, result lists, selection lookup
//! - [`widget`] - The stateful search widget and its event handling
//! - [`navigate`] - Navigation targets and navigators
//! - [`commands`] - High-level operations (search, list, resolve, convert)
//! - [`repl`] - Line-driven terminal session around a widget
//! - [`config`] - Configuration loading
//! - [`cli`] - Command-line interface definitions

pub mod cli;
pub mod commands;
pub mod config;
pub mod index;
pub mod navigate;
pub mod repl;
pub mod search;
pub mod widget;

#[cfg(feature = "mcp")]
pub mod mcp;
