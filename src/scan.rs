use crate::fmt::{TriviaData, TriviaDataFactory, TriviaFactory};
use std::sync::Arc;

/// A maximal run of non-whitespace bytes in the source.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) struct Token {
    pub start: usize,
    pub end: usize,
}

pub(crate) fn scan(source: &str) -> Vec<Token> {
    let mut tokens = vec![];
    let mut start = None;
    for (i, b) in source.bytes().enumerate() {
        let is_whitespace = matches!(b, b' ' | b'\t' | b'\n' | b'\r');
        match start {
            None if !is_whitespace => start = Some(i),
            Some(s) if is_whitespace => {
                tokens.push(Token { start: s, end: i });
                start = None;
            }
            _ => {}
        }
    }
    if let Some(s) = start {
        tokens.push(Token {
            start: s,
            end: source.len(),
        });
    }
    tokens
}

/// The measured shape of one whitespace run.
#[derive(Debug)]
struct GapShape {
    line_breaks: i32,
    /// Columns after the last break, or literal spaces when there is none.
    space: i32,
    /// Whether re-rendering the shape reproduces the run byte for byte.
    /// False for tabs, carriage returns, and blanks dropped by a break.
    reproducible: bool,
}

fn measure(text: &str, tab_size: usize) -> GapShape {
    let tab_size = tab_size.max(1);
    let mut line_breaks = 0;
    let mut column = 0;
    let mut reproducible = true;
    for c in text.chars() {
        match c {
            '\n' => {
                line_breaks += 1;
                if column > 0 {
                    reproducible = false;
                }
                column = 0;
            }
            ' ' => column += 1,
            '\t' => {
                column += tab_size - (column % tab_size);
                reproducible = false;
            }
            _ => reproducible = false,
        }
    }
    GapShape {
        line_breaks: line_breaks as i32,
        space: column as i32,
        reproducible,
    }
}

/// Turns the source text around tokens into trivia, interning through the
/// shared factory.
#[derive(Debug)]
pub(crate) struct SourceTriviaFactory<'a> {
    source: &'a str,
    factory: &'a TriviaDataFactory,
}

impl<'a> SourceTriviaFactory<'a> {
    pub(crate) fn new(source: &'a str, factory: &'a TriviaDataFactory) -> Self {
        Self { source, factory }
    }

    fn trivia_between(&self, start: usize, end: usize) -> Arc<TriviaData> {
        let text = &self.source[start..end];
        let shape = measure(text, self.factory.options().tab_size);
        if shape.line_breaks == 0 && shape.reproducible {
            self.factory.space_trivia(shape.space, false)
        } else {
            self.factory
                .whitespace_trivia(shape.line_breaks, shape.space, shape.reproducible, false)
        }
    }
}

impl TriviaFactory for SourceTriviaFactory<'_> {
    type Token = Token;

    fn create_leading_trivia(&self, token: &Token) -> Arc<TriviaData> {
        self.trivia_between(0, token.start)
    }

    fn create_trailing_trivia(&self, token: &Token) -> Arc<TriviaData> {
        self.trivia_between(token.end, self.source.len())
    }

    fn create(&self, left: &Token, right: &Token) -> Arc<TriviaData> {
        self.trivia_between(left.end, right.start)
    }
}
