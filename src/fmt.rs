pub mod factory;
pub mod formatted;
pub mod trivia;

pub use factory::{TriviaDataFactory, TriviaFactory};
pub use formatted::FormattedTrivia;
pub use trivia::{TriviaData, TOKEN_PAIR_INDEX_NOT_NEEDED};

use crate::scan::{self, Token};
use std::collections::HashMap;

/// Recognized formatting options. Consumed, never mutated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Deserialize)]
#[serde(default)]
pub struct FormattingOptions {
    /// Columns per indentation level.
    pub indentation_size: usize,
    pub use_tab: bool,
    pub tab_size: usize,
}

impl Default for FormattingOptions {
    fn default() -> Self {
        Self {
            indentation_size: 4,
            use_tab: false,
            tab_size: 4,
        }
    }
}

#[derive(Debug)]
pub struct FormatContext {
    pub options: FormattingOptions,
}

// More consecutive line breaks than this collapse into one blank line.
const MAX_LINE_BREAKS: i32 = 2;

/// Normalize the whitespace around `tokens`: leading blanks are dropped,
/// same-line runs collapse to one space, blank lines are capped, and the
/// document ends with a single newline. Gaps already in their desired shape
/// are kept byte for byte.
pub(crate) fn format(source: &str, tokens: &[Token], options: FormattingOptions) -> String {
    if tokens.is_empty() {
        return String::new();
    }

    let cache = TriviaDataFactory::new(options);
    let factory = scan::SourceTriviaFactory::new(source, &cache);
    let ctx = FormatContext { options };

    let mut leading = None;
    factory
        .create_leading_trivia(&tokens[0])
        .with_space(0)
        .format(
            &ctx,
            &mut |_, formatted| leading = Some(formatted),
            TOKEN_PAIR_INDEX_NOT_NEEDED,
        );

    let mut replacements: HashMap<i32, FormattedTrivia> = HashMap::new();
    for (i, pair) in tokens.windows(2).enumerate() {
        let trivia = factory.create(&pair[0], &pair[1]);
        let desired = if trivia.second_token_is_first_token_on_line() {
            let line = trivia.line_breaks().min(MAX_LINE_BREAKS);
            let indentation = trivia.space();
            trivia.with_line(line, indentation)
        } else {
            trivia.with_space(1)
        };
        desired.format(
            &ctx,
            &mut |index, formatted| {
                replacements.insert(index, formatted);
            },
            i as i32,
        );
    }

    let last = &tokens[tokens.len() - 1];
    let mut trailing = None;
    factory.create_trailing_trivia(last).with_line(1, 0).format(
        &ctx,
        &mut |_, formatted| trailing = Some(formatted),
        TOKEN_PAIR_INDEX_NOT_NEEDED,
    );

    log::debug!(
        "rewriting {} of {} token gaps",
        replacements.len() + leading.iter().count() + trailing.iter().count(),
        tokens.len() + 1,
    );

    let mut buf = String::with_capacity(source.len() + 1);
    match &leading {
        Some(formatted) => buf.push_str(formatted.new_string()),
        None => buf.push_str(&source[..tokens[0].start]),
    }
    for (i, token) in tokens.iter().enumerate() {
        buf.push_str(&source[token.start..token.end]);
        if let Some(next) = tokens.get(i + 1) {
            match replacements.get(&(i as i32)) {
                Some(formatted) => buf.push_str(formatted.new_string()),
                None => buf.push_str(&source[token.end..next.start]),
            }
        }
    }
    match &trailing {
        Some(formatted) => buf.push_str(formatted.new_string()),
        None => buf.push_str(&source[last.end..]),
    }
    buf
}
