use crate::catalog::{WORD_LENGTH, WordCatalog};
use crate::daily::DateKey;
use crate::evaluator::{GuessResult, KeyboardHints, evaluate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::mem;

pub const MAX_ATTEMPTS: usize = 6;

/// Where a session sits in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    NotStarted,
    InProgress,
    Won,
    Lost,
}

impl GameState {
    pub fn is_over(self) -> bool {
        matches!(self, Self::Won | Self::Lost)
    }
}

/// A submission the player can recover from. These never mutate state;
/// the front end surfaces the message and shakes the row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GuessRejection {
    IncompleteGuess,
    UnknownWord,
    GameAlreadyOver,
}

impl GuessRejection {
    /// The inline message shown to the player.
    pub fn message(self) -> &'static str {
        match self {
            Self::IncompleteGuess => "Not enough letters!",
            Self::UnknownWord => "Not in word list!",
            Self::GameAlreadyOver => "The game is already over!",
        }
    }
}

impl fmt::Display for GuessRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.message())
    }
}

/// One player's progress on one day's puzzle.
///
/// The session is the single source of truth: rendering projects from it,
/// never the reverse. All mutation goes through the event methods below.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameSession {
    target_word: String,
    played_date: DateKey,
    guesses: Vec<String>,
    current_guess: String,
    game_over: bool,
    game_won: bool,
}

impl GameSession {
    pub fn new(target_word: String, played_date: DateKey) -> Self {
        Self {
            target_word,
            played_date,
            guesses: Vec::new(),
            current_guess: String::new(),
            game_over: false,
            game_won: false,
        }
    }

    pub fn target_word(&self) -> &str {
        &self.target_word
    }

    pub fn played_date(&self) -> DateKey {
        self.played_date
    }

    pub fn guesses(&self) -> &[String] {
        &self.guesses
    }

    /// Letters typed into the row being assembled.
    pub fn current_guess(&self) -> &str {
        &self.current_guess
    }

    pub fn current_row(&self) -> usize {
        self.guesses.len()
    }

    pub fn current_col(&self) -> usize {
        self.current_guess.len()
    }

    pub fn is_over(&self) -> bool {
        self.game_over
    }

    pub fn is_won(&self) -> bool {
        self.game_won
    }

    pub fn remaining_attempts(&self) -> usize {
        MAX_ATTEMPTS - self.guesses.len()
    }

    pub fn state(&self) -> GameState {
        if self.game_won {
            GameState::Won
        } else if self.game_over {
            GameState::Lost
        } else if self.guesses.is_empty() && self.current_guess.is_empty() {
            GameState::NotStarted
        } else {
            GameState::InProgress
        }
    }

    /// Appends a letter to the working row. Full rows and non-letter input
    /// are no-ops; a finished game rejects the event outright.
    pub fn add_letter(&mut self, letter: char) -> Result<(), GuessRejection> {
        if self.game_over {
            return Err(GuessRejection::GameAlreadyOver);
        }
        if letter.is_ascii_alphabetic() && self.current_guess.len() < WORD_LENGTH {
            self.current_guess.push(letter.to_ascii_uppercase());
        }
        Ok(())
    }

    /// Removes the last typed letter. An empty row is a no-op.
    pub fn delete_letter(&mut self) -> Result<(), GuessRejection> {
        if self.game_over {
            return Err(GuessRejection::GameAlreadyOver);
        }
        self.current_guess.pop();
        Ok(())
    }

    /// Finalizes the working row: validates it against the catalog, scores
    /// it, and advances the state machine. On success the scored row is
    /// returned and the column resets to zero.
    pub fn submit_guess(&mut self, catalog: &WordCatalog) -> Result<GuessResult, GuessRejection> {
        if self.game_over {
            return Err(GuessRejection::GameAlreadyOver);
        }
        if self.current_guess.len() != WORD_LENGTH {
            return Err(GuessRejection::IncompleteGuess);
        }
        if !catalog.contains(&self.current_guess) {
            return Err(GuessRejection::UnknownWord);
        }

        // Lengths were validated above, so the evaluator contract holds.
        let result = evaluate(&self.current_guess, &self.target_word)
            .map_err(|_| GuessRejection::IncompleteGuess)?;

        let guess = mem::take(&mut self.current_guess);
        let won = guess == self.target_word;
        self.guesses.push(guess);

        if won {
            self.game_over = true;
            self.game_won = true;
        } else if self.guesses.len() == MAX_ATTEMPTS {
            self.game_over = true;
        }

        Ok(result)
    }

    /// Rebuilds the keyboard overlay from the submitted rows, e.g. after
    /// restoring a persisted session.
    pub fn letter_hints(&self) -> KeyboardHints {
        let mut hints = KeyboardHints::new();
        for guess in &self.guesses {
            if let Ok(result) = evaluate(guess, &self.target_word) {
                hints.record(&result);
            }
        }
        hints
    }

    /// Re-scores every submitted row, for redrawing the board on resume.
    pub fn scored_rows(&self) -> Vec<GuessResult> {
        self.guesses
            .iter()
            .filter_map(|guess| evaluate(guess, &self.target_word).ok())
            .collect()
    }
}
