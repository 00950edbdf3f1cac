pub mod config;
pub mod models;
pub mod irregular;
pub mod word_forms;
pub mod dictionary;
pub mod api;
pub mod database;
pub mod defaults;
pub mod export;
pub mod word_book;

#[cfg(test)]
mod test_support;

pub use config::Config;
pub use models::*;
pub use word_book::WordBook;
pub use word_forms::{PartsOfSpeech, WordForms, generate_word_forms, word_forms_for};
