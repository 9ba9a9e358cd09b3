use crate::catalog::WordCatalog;
use crate::daily::DateKey;
use crate::evaluator::{GuessResult, KeyboardHints, LetterStatus};
use crate::session::{GameSession, MAX_ATTEMPTS};
use crate::store::{GameStore, KvStore, Statistics};
use clap::Parser;
use std::io::BufRead;
use std::path::PathBuf;

/// The Word - a daily word-guessing game
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to a newline-delimited answer catalog file
    #[arg(short = 'i', long = "words")]
    pub words_path: Option<String>,

    /// Play a specific day's puzzle (YYYY-MM-DD) instead of today's
    #[arg(long = "date")]
    pub date: Option<String>,

    /// Use the plain line-based interface instead of the TUI
    #[arg(long)]
    pub plain: bool,

    /// Print cumulative statistics and exit
    #[arg(long)]
    pub stats: bool,

    /// Keep game data under this directory
    #[arg(long = "data-dir")]
    pub data_dir: Option<PathBuf>,
}

#[must_use]
pub fn parse_cli() -> Cli {
    Cli::parse()
}

// Plain-mode rendering

fn status_char(status: LetterStatus) -> char {
    match status {
        LetterStatus::Correct => 'G',
        LetterStatus::Present => 'Y',
        LetterStatus::Incorrect => 'X',
    }
}

/// A finalized row as two aligned lines, letters over G/Y/X marks.
pub fn format_row(result: &GuessResult) -> String {
    let letters: String = result.iter().map(|s| s.letter).collect();
    let marks: String = result.iter().map(|s| status_char(s.status)).collect();
    format!("  {letters}\n  {marks}")
}

/// One-line keyboard summary: which letters are placed, misplaced, or dead.
pub fn format_hints(hints: &KeyboardHints) -> String {
    let mut placed = String::new();
    let mut misplaced = String::new();
    let mut dead = String::new();
    for letter in 'A'..='Z' {
        match hints.status(letter) {
            Some(LetterStatus::Correct) => placed.push(letter),
            Some(LetterStatus::Present) => misplaced.push(letter),
            Some(LetterStatus::Incorrect) => dead.push(letter),
            None => {}
        }
    }
    format!("  placed: [{placed}]  misplaced: [{misplaced}]  dead: [{dead}]")
}

fn display_board(session: &GameSession) {
    for row in session.scored_rows() {
        println!("{}", format_row(&row));
    }
}

fn display_outcome(session: &GameSession) {
    if session.is_won() {
        println!("You win!");
    } else {
        println!("Game over! The word was: {}", session.target_word());
    }
}

pub fn display_statistics(stats: &Statistics) {
    println!("Games played: {}", stats.games_played);
    println!("Games won:    {}", stats.games_won);
    println!("Streak:       {} (best {})", stats.current_streak, stats.max_streak);
    let buckets: Vec<String> = (1..=MAX_ATTEMPTS)
        .map(|n| format!("{n}:{}", stats.wins_in(n)))
        .collect();
    println!("Wins by attempt: {}", buckets.join(" "));
}

/// Line-mode game loop. One guess per line; 'exit' quits. The reader is
/// injected so tests can script a whole game.
pub fn game_loop<R: BufRead, S: KvStore>(
    catalog: &WordCatalog,
    store: &mut GameStore<S>,
    today: DateKey,
    mut reader: R,
) {
    let mut session = match store.open_daily(today, catalog) {
        Ok(session) => session,
        Err(already) => {
            println!("{already}");
            return;
        }
    };

    println!("The Word - {today}");
    if !session.guesses().is_empty() {
        println!("Resuming today's game:");
        display_board(&session);
    }
    if session.is_over() {
        display_outcome(&session);
        display_statistics(&store.statistics());
        return;
    }
    println!("{} attempts left. Enter your guess (or 'exit' to quit):", session.remaining_attempts());

    loop {
        let mut input = String::new();
        match reader.read_line(&mut input) {
            Ok(0) | Err(_) => break,
            Ok(_) => {}
        }
        let input = input.trim().to_uppercase();
        if input == "EXIT" {
            println!("Exiting. Your progress is saved.");
            break;
        }

        // The line replaces whatever was in the working row.
        while session.current_col() > 0 {
            if session.delete_letter().is_err() {
                break;
            }
        }
        for c in input.chars() {
            if session.add_letter(c).is_err() {
                break;
            }
        }

        match session.submit_guess(catalog) {
            Ok(result) => {
                store.save(&session);
                println!("{}", format_row(&result));
                let hints = session.letter_hints();
                println!("{}", format_hints(&hints));
            }
            Err(rejection) => {
                println!("{}", rejection.message());
                continue;
            }
        }

        if session.is_over() {
            display_outcome(&session);
            display_statistics(&store.statistics());
            break;
        }
        println!("{} attempts left:", session.remaining_attempts());
    }
}
