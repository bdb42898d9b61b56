//! HTML-to-text extraction.
//!
//! A single forward pass over the markup with three states. Tags are dropped
//! whole (names and attributes are not modelled), entities are decoded through
//! a fixed table, everything else is copied to the output.

mod entity;

use crate::locator::is_markup;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LexState {
    /// Copying characters to the output.
    Text,
    /// Inside `<...>`; characters are discarded until `>`.
    InTag,
    /// After `&`; characters accumulate until `;`.
    InEntity,
}

/// Streaming extractor. Feed characters one at a time, then call [`Lexer::finish`].
#[derive(Debug)]
pub struct Lexer {
    state: LexState,
    entity: String,
    out: String,
}

impl Default for Lexer {
    fn default() -> Self {
        Self::starting_in(LexState::Text)
    }
}

impl Lexer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn starting_in(state: LexState) -> Self {
        Self {
            state,
            entity: String::new(),
            out: String::new(),
        }
    }

    pub fn state(&self) -> LexState {
        self.state
    }

    pub fn feed(&mut self, c: char) {
        self.state = match self.state {
            LexState::Text => match c {
                '<' => LexState::InTag,
                '&' => {
                    self.entity.clear();
                    LexState::InEntity
                }
                _ => {
                    self.out.push(c);
                    LexState::Text
                }
            },
            LexState::InTag if c == '>' => LexState::Text,
            LexState::InTag => LexState::InTag,
            LexState::InEntity if c == ';' => {
                entity::push_resolved(&self.entity, &mut self.out);
                LexState::Text
            }
            LexState::InEntity => {
                self.entity.push(c);
                LexState::InEntity
            }
        };
    }

    pub fn feed_str(&mut self, s: &str) {
        s.chars().for_each(|c| self.feed(c));
    }

    /// Returns the text produced so far. An entity still open at this point
    /// (no closing `;`) is dropped.
    pub fn finish(self) -> String {
        self.out
    }
}

/// Runs the lexer over `markup` starting in `initial`.
pub fn lex(markup: &str, initial: LexState) -> String {
    let mut lexer = Lexer::starting_in(initial);
    lexer.feed_str(markup);
    lexer.finish()
}

/// Reduces `markup` to plain text when `content_type` is HTML; any other
/// content type passes through unchanged.
pub fn extract(markup: &str, content_type: &str) -> String {
    if is_markup(content_type) {
        lex(markup, LexState::Text)
    } else {
        markup.to_string()
    }
}
