//! Terminal interface for the daily game, built on Ratatui.
//!
//! The session state machine owns the game; this module only projects it
//! onto the screen and translates key presses into session events. The
//! session is saved after every finalized row so a quit-and-restart
//! resumes mid-game.

use crate::catalog::{WORD_LENGTH, WordCatalog};
use crate::daily::DateKey;
use crate::evaluator::{GuessResult, KeyboardHints, LetterStatus};
use crate::session::{GameSession, MAX_ATTEMPTS};
use crate::store::{GameStore, KvStore};
use crate::{debug_log, info_log};
use crossterm::{
    cursor,
    event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{
    Frame, Terminal,
    backend::CrosstermBackend,
    layout::{Constraint, Direction, Layout, Rect},
    style::{Color, Modifier, Style},
    text::{Line, Span},
    widgets::{Block, Borders, Paragraph},
};
use std::io;

const EVENT_POLL_TIMEOUT_MS: u64 = 100;
const ROW_SPACING: u16 = 2;

const HEADER_STYLE: Style = Style::new().fg(Color::Cyan).add_modifier(Modifier::BOLD);
const ERROR_STYLE: Style = Style::new().fg(Color::Red);
const WIN_STYLE: Style = Style::new().fg(Color::Green).add_modifier(Modifier::BOLD);
const LOSS_STYLE: Style = Style::new().fg(Color::Yellow).add_modifier(Modifier::BOLD);

const KEYBOARD_ROWS: [&str; 3] = ["QWERTYUIOP", "ASDFGHJKL", "ZXCVBNM"];

fn status_colors(status: LetterStatus) -> (Color, Color) {
    match status {
        LetterStatus::Correct => (Color::Green, Color::Black),
        LetterStatus::Present => (Color::Yellow, Color::Black),
        LetterStatus::Incorrect => (Color::DarkGray, Color::White),
    }
}

struct Tui<'a, S: KvStore> {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    catalog: &'a WordCatalog,
    store: &'a mut GameStore<S>,
    session: GameSession,
    rows: Vec<GuessResult>,
    hints: KeyboardHints,
    message: String,
    error_message: String,
}

pub fn run<S: KvStore>(
    catalog: &WordCatalog,
    store: &mut GameStore<S>,
    today: DateKey,
) -> io::Result<()> {
    let session = match store.open_daily(today, catalog) {
        Ok(session) => session,
        Err(already) => {
            println!("{already}");
            return Ok(());
        }
    };

    let mut tui = Tui::new(catalog, store, session)?;
    let result = tui.event_loop();
    tui.cleanup()?;
    result
}

impl<'a, S: KvStore> Tui<'a, S> {
    fn new(
        catalog: &'a WordCatalog,
        store: &'a mut GameStore<S>,
        session: GameSession,
    ) -> io::Result<Self> {
        info_log!("Tui::new() - initializing terminal");
        enable_raw_mode()?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, cursor::Hide)?;
        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend)?;

        // Rebuild the board projection for a resumed session.
        let rows = session.scored_rows();
        let hints = session.letter_hints();
        let message = if session.is_over() {
            outcome_message(&session)
        } else {
            String::new()
        };

        Ok(Self {
            terminal,
            catalog,
            store,
            session,
            rows,
            hints,
            message,
            error_message: String::new(),
        })
    }

    fn cleanup(&mut self) -> io::Result<()> {
        disable_raw_mode()?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            cursor::Show
        )?;
        Ok(())
    }

    fn event_loop(&mut self) -> io::Result<()> {
        loop {
            self.draw()?;
            if self.handle_input()? {
                return Ok(());
            }
        }
    }

    /// Returns true when the player asked to quit.
    fn handle_input(&mut self) -> io::Result<bool> {
        if !event::poll(std::time::Duration::from_millis(EVENT_POLL_TIMEOUT_MS))? {
            return Ok(false);
        }
        let Event::Key(key) = event::read()? else {
            return Ok(false);
        };
        if key.kind != KeyEventKind::Press {
            return Ok(false);
        }
        Ok(self.handle_key(key))
    }

    fn handle_key(&mut self, key: KeyEvent) -> bool {
        if key.modifiers.contains(KeyModifiers::ALT)
            || key.modifiers.contains(KeyModifiers::CONTROL)
        {
            debug_log!("ignoring key with modifiers: {:?}", key.modifiers);
            return false;
        }

        match key.code {
            KeyCode::Esc => return true,
            KeyCode::Char('q' | 'Q') if self.session.is_over() => return true,
            KeyCode::Char(c) if c.is_ascii_alphabetic() => {
                self.error_message.clear();
                if self.session.add_letter(c).is_err() {
                    self.error_message = "The game is already over - press Q to quit".to_string();
                }
            }
            KeyCode::Backspace => {
                self.error_message.clear();
                let _ = self.session.delete_letter();
            }
            KeyCode::Enter => self.submit(),
            _ => {
                debug_log!("ignoring key: {:?}", key.code);
            }
        }
        false
    }

    fn submit(&mut self) {
        self.error_message.clear();
        match self.session.submit_guess(self.catalog) {
            Ok(result) => {
                self.hints.record(&result);
                self.rows.push(result);
                self.store.save(&self.session);
                if self.session.is_over() {
                    self.message = outcome_message(&self.session);
                }
            }
            Err(rejection) => {
                debug_log!("guess rejected: {rejection:?}");
                self.error_message = rejection.message().to_string();
            }
        }
    }

    fn draw(&mut self) -> io::Result<()> {
        let ctx = RenderContext {
            date: self.session.played_date(),
            rows: &self.rows,
            current_input: self.session.current_guess(),
            game_over: self.session.is_over(),
            remaining: self.session.remaining_attempts(),
            hints: &self.hints,
            message: &self.message,
            error_message: &self.error_message,
            won: self.session.is_won(),
        };
        self.terminal.draw(|f| render(f, &ctx))?;
        Ok(())
    }
}

fn outcome_message(session: &GameSession) -> String {
    if session.is_won() {
        "You win!".to_string()
    } else {
        format!("Game over! The word was: {}", session.target_word())
    }
}

/// Groups render inputs so the draw closure borrows no &mut self.
struct RenderContext<'a> {
    date: DateKey,
    rows: &'a [GuessResult],
    current_input: &'a str,
    game_over: bool,
    remaining: usize,
    hints: &'a KeyboardHints,
    message: &'a str,
    error_message: &'a str,
    won: bool,
}

fn render(f: &mut Frame, ctx: &RenderContext) {
    let chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(3),  // Title
            Constraint::Length(14), // Board
            Constraint::Length(5),  // Keyboard overlay
            Constraint::Min(3),     // Messages
            Constraint::Length(3),  // Instructions
        ])
        .split(f.area());

    render_title(f, chunks[0], ctx.date, ctx.remaining);
    render_board(f, chunks[1], ctx);
    render_keyboard(f, chunks[2], ctx.hints);
    render_messages(f, chunks[3], ctx);
    render_instructions(f, chunks[4], ctx.game_over);
}

fn render_title(f: &mut Frame, area: Rect, date: DateKey, remaining: usize) {
    let title = Paragraph::new(format!("THE WORD - {date}  |  attempts left: {remaining}"))
        .style(HEADER_STYLE)
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(title, area);
}

fn render_board(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let block = Block::default().title("Board").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row_index, row) in ctx.rows.iter().enumerate() {
        let mut spans = vec![Span::raw("  ")];
        for score in row {
            let (bg, fg) = status_colors(score.status);
            spans.push(Span::styled(
                format!(" {} ", score.letter),
                Style::default().fg(fg).bg(bg),
            ));
            spans.push(Span::raw(" "));
        }
        render_line(f, inner, row_index, spans);
    }

    if !ctx.game_over && ctx.rows.len() < MAX_ATTEMPTS {
        let mut spans = vec![Span::raw("  ")];
        for i in 0..WORD_LENGTH {
            let letter = ctx.current_input.chars().nth(i).unwrap_or(' ');
            spans.push(Span::styled(
                format!(" {letter} "),
                Style::default().fg(Color::White).bg(Color::DarkGray),
            ));
            spans.push(Span::raw(" "));
        }
        render_line(f, inner, ctx.rows.len(), spans);
    }
}

#[allow(clippy::cast_possible_truncation)]
fn render_line(f: &mut Frame, area: Rect, row_index: usize, spans: Vec<Span>) {
    let y = area.y + (row_index as u16 * ROW_SPACING);
    if y >= area.y + area.height {
        return;
    }
    f.render_widget(
        Paragraph::new(Line::from(spans)),
        Rect {
            x: area.x,
            y,
            width: area.width,
            height: 1,
        },
    );
}

fn render_keyboard(f: &mut Frame, area: Rect, hints: &KeyboardHints) {
    let block = Block::default().title("Letters").borders(Borders::ALL);
    let inner = block.inner(area);
    f.render_widget(block, area);

    for (row_index, letters) in KEYBOARD_ROWS.iter().enumerate() {
        let mut spans = vec![Span::raw(" ".repeat(row_index + 1))];
        for letter in letters.chars() {
            let style = match hints.status(letter) {
                Some(status) => {
                    let (bg, fg) = status_colors(status);
                    Style::default().fg(fg).bg(bg)
                }
                None => Style::default().fg(Color::White),
            };
            spans.push(Span::styled(format!("{letter} "), style));
        }
        if row_index < inner.height as usize {
            f.render_widget(
                Paragraph::new(Line::from(spans)),
                Rect {
                    x: inner.x,
                    y: inner.y + row_index as u16,
                    width: inner.width,
                    height: 1,
                },
            );
        }
    }
}

fn render_messages(f: &mut Frame, area: Rect, ctx: &RenderContext) {
    let mut lines = Vec::new();
    if !ctx.message.is_empty() {
        let style = if ctx.won { WIN_STYLE } else { LOSS_STYLE };
        lines.push(Line::from(Span::styled(ctx.message, style)));
    }
    if !ctx.error_message.is_empty() {
        lines.push(Line::from(Span::styled(ctx.error_message, ERROR_STYLE)));
    }
    let paragraph =
        Paragraph::new(lines).block(Block::default().title("Messages").borders(Borders::ALL));
    f.render_widget(paragraph, area);
}

fn render_instructions(f: &mut Frame, area: Rect, game_over: bool) {
    let text = if game_over {
        "Q: Quit | Come back tomorrow for a new word"
    } else {
        "Type your guess | ENTER: Submit | BACKSPACE: Delete | ESC: Quit"
    };
    let paragraph = Paragraph::new(text)
        .style(Style::default().fg(Color::Gray))
        .block(Block::default().borders(Borders::ALL));
    f.render_widget(paragraph, area);
}
