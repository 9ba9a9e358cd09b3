use crate::catalog::WORD_LENGTH;
use std::collections::HashMap;
use std::fmt;

/// Per-letter classification of a submitted guess.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LetterStatus {
    Correct,
    Present,
    Incorrect,
}

impl LetterStatus {
    /// Ranking for the keyboard overlay: a known-correct letter is never
    /// downgraded, and present beats incorrect.
    fn rank(self) -> u8 {
        match self {
            Self::Correct => 2,
            Self::Present => 1,
            Self::Incorrect => 0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LetterScore {
    pub letter: char,
    pub status: LetterStatus,
}

pub type GuessResult = Vec<LetterScore>;

/// The evaluator was handed a guess or target of the wrong length. This is
/// a caller contract violation: the state machine only submits validated,
/// full-length guesses.
#[derive(Debug, PartialEq, Eq)]
pub struct InvalidGuessLength {
    pub guess_len: usize,
    pub target_len: usize,
}

impl fmt::Display for InvalidGuessLength {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "guess/target must both be {WORD_LENGTH} letters (got {} and {})",
            self.guess_len, self.target_len
        )
    }
}

impl std::error::Error for InvalidGuessLength {}

/// Scores a guess against the target word.
///
/// Two passes with multiset consumption: exact-position matches first, each
/// consuming its target letter, then present/incorrect for the rest against
/// the remaining pool. A letter in the guess can never earn more combined
/// correct/present marks than it has occurrences in the target.
pub fn evaluate(guess: &str, target: &str) -> Result<GuessResult, InvalidGuessLength> {
    let guess_chars: Vec<char> = guess.chars().collect();
    let mut target_chars: Vec<Option<char>> = target.chars().map(Some).collect();
    if guess_chars.len() != WORD_LENGTH || target_chars.len() != WORD_LENGTH {
        return Err(InvalidGuessLength {
            guess_len: guess_chars.len(),
            target_len: target_chars.len(),
        });
    }

    let mut result: Vec<Option<LetterScore>> = vec![None; WORD_LENGTH];

    // First pass: exact positions consume their target letter.
    for i in 0..WORD_LENGTH {
        if target_chars[i] == Some(guess_chars[i]) {
            result[i] = Some(LetterScore {
                letter: guess_chars[i],
                status: LetterStatus::Correct,
            });
            target_chars[i] = None;
        }
    }

    // Second pass: remaining positions draw from the leftover pool.
    for i in 0..WORD_LENGTH {
        if result[i].is_some() {
            continue;
        }
        let status = match target_chars.iter().position(|&c| c == Some(guess_chars[i])) {
            Some(pos) => {
                target_chars[pos] = None;
                LetterStatus::Present
            }
            None => LetterStatus::Incorrect,
        };
        result[i] = Some(LetterScore {
            letter: guess_chars[i],
            status,
        });
    }

    Ok(result.into_iter().flatten().collect())
}

/// Cumulative best-known status per letter across all submitted guesses,
/// for the keyboard overlay.
#[derive(Debug, Default, Clone)]
pub struct KeyboardHints {
    statuses: HashMap<char, LetterStatus>,
}

impl KeyboardHints {
    pub fn new() -> Self {
        Self::default()
    }

    /// Folds one scored row into the hints, never downgrading a letter.
    pub fn record(&mut self, scores: &[LetterScore]) {
        for score in scores {
            let entry = self.statuses.entry(score.letter).or_insert(score.status);
            if score.status.rank() > entry.rank() {
                *entry = score.status;
            }
        }
    }

    pub fn status(&self, letter: char) -> Option<LetterStatus> {
        self.statuses.get(&letter).copied()
    }

    pub fn is_empty(&self) -> bool {
        self.statuses.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use LetterStatus::{Correct, Incorrect, Present};

    fn statuses(guess: &str, target: &str) -> Vec<LetterStatus> {
        evaluate(guess, target)
            .unwrap()
            .iter()
            .map(|s| s.status)
            .collect()
    }

    #[test]
    fn test_all_correct_round_trip() {
        assert_eq!(
            statuses("APPLE", "APPLE"),
            vec![Correct, Correct, Correct, Correct, Correct]
        );
    }

    #[test]
    fn test_all_incorrect() {
        assert_eq!(
            statuses("MOUNT", "CRABS"),
            vec![Incorrect, Incorrect, Incorrect, Incorrect, Incorrect]
        );
    }

    #[test]
    fn test_duplicate_guess_letters_single_target_occurrence() {
        // ERASE has one S and two Es; SPEED's two trailing Es both find a
        // pool E, its D finds nothing.
        assert_eq!(
            statuses("SPEED", "ERASE"),
            vec![Present, Incorrect, Present, Present, Incorrect]
        );
    }

    #[test]
    fn test_duplicate_letters_consume_pool() {
        // LEVEL holds two Es. EERIE: the position-1 E is exact and consumes
        // one; the position-0 E takes the last pool E; the position-4 E
        // finds the pool empty.
        assert_eq!(
            statuses("EERIE", "LEVEL"),
            vec![Present, Correct, Incorrect, Incorrect, Incorrect]
        );
    }

    #[test]
    fn test_exact_match_wins_over_earlier_present() {
        // Position 0 is an exact A; the E at position 3 draws the pool E
        // and the Bs and Y find nothing.
        assert_eq!(
            statuses("ABBEY", "ARENA"),
            vec![Correct, Incorrect, Incorrect, Present, Incorrect]
        );
    }

    #[test]
    fn test_length_contract_enforced() {
        assert!(evaluate("ABCD", "APPLE").is_err());
        assert!(evaluate("APPLE", "ABCDEF").is_err());
        let err = evaluate("ABC", "APPLE").unwrap_err();
        assert_eq!(err.guess_len, 3);
        assert_eq!(err.target_len, 5);
    }

    #[test]
    fn test_result_carries_guess_letters() {
        let result = evaluate("SPEED", "ERASE").unwrap();
        let letters: String = result.iter().map(|s| s.letter).collect();
        assert_eq!(letters, "SPEED");
    }

    #[test]
    fn test_hints_never_downgrade() {
        let mut hints = KeyboardHints::new();
        hints.record(&evaluate("APPLE", "APRON").unwrap());
        assert_eq!(hints.status('A'), Some(Correct));
        assert_eq!(hints.status('P'), Some(Correct));
        assert_eq!(hints.status('L'), Some(Incorrect));
        // A later row where A is merely present must not demote it.
        hints.record(&evaluate("SALAD", "APRON").unwrap());
        assert_eq!(hints.status('A'), Some(Correct));
        assert_eq!(hints.status('S'), Some(Incorrect));
    }

    #[test]
    fn test_hints_present_overrides_incorrect() {
        // SALAD vs CRABS scores the first A present and the second A
        // incorrect; the overlay keeps the stronger mark.
        let mut hints = KeyboardHints::new();
        hints.record(&evaluate("SALAD", "CRABS").unwrap());
        assert_eq!(hints.status('A'), Some(Present));
        assert_eq!(hints.status('S'), Some(Present));
        assert_eq!(hints.status('L'), Some(Incorrect));
    }

    #[test]
    fn test_hints_take_best_mark_within_a_row() {
        // EERIE vs LEVEL marks E present, correct, and incorrect across
        // the row; the hint lands on correct regardless of order.
        let mut hints = KeyboardHints::new();
        hints.record(&evaluate("EERIE", "LEVEL").unwrap());
        assert_eq!(hints.status('E'), Some(Correct));
        assert_eq!(hints.status('R'), Some(Incorrect));
    }

    #[test]
    fn test_unseen_letter_has_no_hint() {
        let hints = KeyboardHints::new();
        assert_eq!(hints.status('Q'), None);
        assert!(hints.is_empty());
    }
}
