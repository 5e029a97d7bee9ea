//! Core library: filename classification for the upload stage and subject
//! suggestions for the classification stage of an EPrints deposit editor.

pub mod autofill;
pub mod chapter;
pub mod classifier;
pub mod config;
pub mod debounce;
pub mod error;
pub mod filename;
pub mod form;
pub mod models;
pub mod page;
pub mod pipeline;
pub mod rules;
pub mod signal;
pub mod stopwords;
pub mod suggester;
pub mod taxonomy;
pub mod text;

#[cfg(test)]
pub(crate) mod testing;
