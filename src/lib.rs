// Library interface for the-word
// This allows integration tests to access internal modules

pub mod catalog;
pub mod cli;
pub mod daily;
pub mod evaluator;
pub mod logging;
pub mod session;
pub mod store;
pub mod tui;

// Re-export the core types for easier testing
pub use catalog::{WORD_LENGTH, WordCatalog};
pub use daily::{DateKey, select_index, select_word};
pub use evaluator::{GuessResult, KeyboardHints, LetterScore, LetterStatus, evaluate};
pub use session::{GameSession, GameState, GuessRejection, MAX_ATTEMPTS};
pub use store::{FileStore, GameStore, KvStore, MemoryStore, Statistics};
