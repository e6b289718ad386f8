use super::{formatted::FormattedTrivia, FormatContext};
use std::sync::Arc;

/// Passed to `format` when the caller has no token pair to correlate the
/// result with, e.g. at the edges of the document.
pub const TOKEN_PAIR_INDEX_NOT_NEEDED: i32 = i32::MIN;

/// A description of the whitespace between two adjacent tokens.
///
/// This is only a descriptor. It carries no replacement text; the text is
/// produced at the end of a formatting pass as a [`FormattedTrivia`], so a
/// descriptor cannot be asked for its string and a materialized result
/// cannot be transformed any further.
///
/// `line_breaks` and `space` may go negative while the surrounding pass is
/// still adjusting deltas. They are clamped once, when materialized.
#[derive(Debug)]
pub enum TriviaData {
    /// Whitespace as originally present between two tokens.
    Whitespace {
        line_breaks: i32,
        space: i32,
        elastic: bool,
    },
    /// Whitespace that diverged from `original`, which is remembered so a
    /// later transformation back to the original shape can revert to it.
    Modified {
        original: Arc<TriviaData>,
        line_breaks: i32,
        space: i32,
    },
    /// Diverged whitespace with no baseline to revert to.
    ModifiedWithoutOriginal { line_breaks: i32, space: i32 },
}

impl TriviaData {
    pub fn whitespace(line_breaks: i32, space: i32, elastic: bool) -> Arc<Self> {
        Arc::new(Self::Whitespace {
            line_breaks,
            space,
            elastic,
        })
    }

    /// Same-line spacing: no line breaks, `space` literal spaces.
    pub fn spaces(space: i32, elastic: bool) -> Arc<Self> {
        assert!(space >= 0, "space must not be negative: {space}");
        Self::whitespace(0, space, elastic)
    }

    pub fn modified_without_original(line_breaks: i32, space: i32) -> Arc<Self> {
        Arc::new(Self::ModifiedWithoutOriginal { line_breaks, space })
    }

    /// Number of newline sequences to put before the second token.
    pub fn line_breaks(&self) -> i32 {
        match self {
            Self::Whitespace { line_breaks, .. }
            | Self::Modified { line_breaks, .. }
            | Self::ModifiedWithoutOriginal { line_breaks, .. } => *line_breaks,
        }
    }

    /// Indentation columns when there are line breaks, literal spaces
    /// otherwise.
    pub fn space(&self) -> i32 {
        match self {
            Self::Whitespace { space, .. }
            | Self::Modified { space, .. }
            | Self::ModifiedWithoutOriginal { space, .. } => *space,
        }
    }

    pub fn second_token_is_first_token_on_line(&self) -> bool {
        self.line_breaks() > 0
    }

    /// Elastic trivia is synthesized rather than measured, so it must never
    /// be served from or stored into a cache.
    pub fn treat_as_elastic(&self) -> bool {
        matches!(self, Self::Whitespace { elastic: true, .. })
    }

    /// Every variant of this enum is whitespace-only. Carriers of comments
    /// or other non-whitespace trivia live outside this engine.
    pub fn is_whitespace_only(&self) -> bool {
        true
    }

    pub fn should_replace_original_with_new_string(&self) -> bool {
        matches!(
            self,
            Self::Modified { .. } | Self::ModifiedWithoutOriginal { .. }
        )
    }

    /// Request zero line breaks and `space` columns of spacing.
    pub fn with_space(self: Arc<Self>, space: i32) -> Arc<Self> {
        if let Some(original) = self.revertible_original(0, space) {
            return original;
        }
        if self.line_breaks() == 0 && self.space() == space {
            return self;
        }
        self.replace_shape(0, space)
    }

    /// Request `line` line breaks followed by `indentation` columns.
    pub fn with_line(self: Arc<Self>, line: i32, indentation: i32) -> Arc<Self> {
        assert!(line > 0, "line break count must be positive: {line}");
        if let Some(original) = self.revertible_original(line, indentation) {
            return original;
        }
        if self.line_breaks() == line && self.space() == indentation {
            return self;
        }
        self.replace_shape(line, indentation)
    }

    /// Keep the line break count but change the indentation.
    pub fn with_indentation(self: Arc<Self>, indentation: i32) -> Arc<Self> {
        if let Some(original) = self.revertible_original(self.line_breaks(), indentation) {
            return original;
        }
        if self.space() == indentation {
            return self;
        }
        let line_breaks = self.line_breaks();
        self.replace_shape(line_breaks, indentation)
    }

    /// Finalize this trivia. Unchanged trivia is left alone; diverged
    /// trivia is materialized and handed to `result_applier` exactly once.
    pub fn format(
        &self,
        ctx: &FormatContext,
        result_applier: &mut impl FnMut(i32, FormattedTrivia),
        token_pair_index: i32,
    ) {
        match self {
            Self::Whitespace { .. } => {}
            Self::Modified {
                line_breaks, space, ..
            }
            | Self::ModifiedWithoutOriginal { line_breaks, space } => {
                let formatted = FormattedTrivia::new(&ctx.options, *line_breaks, *space);
                result_applier(token_pair_index, formatted);
            }
        }
    }

    /// The remembered baseline, if requesting (`line_breaks`, `space`)
    /// would bring this trivia back to exactly its shape.
    fn revertible_original(&self, line_breaks: i32, space: i32) -> Option<Arc<Self>> {
        match self {
            Self::Modified { original, .. }
                if original.line_breaks() == line_breaks && original.space() == space =>
            {
                log::trace!("reverting trivia to its original shape ({line_breaks}, {space})");
                Some(Arc::clone(original))
            }
            _ => None,
        }
    }

    fn replace_shape(self: Arc<Self>, line_breaks: i32, space: i32) -> Arc<Self> {
        match &*self {
            Self::Whitespace { .. } => Arc::new(Self::Modified {
                original: Arc::clone(&self),
                line_breaks,
                space,
            }),
            // Always wrap the root baseline, so wrappers never nest.
            Self::Modified { original, .. } => Arc::new(Self::Modified {
                original: Arc::clone(original),
                line_breaks,
                space,
            }),
            Self::ModifiedWithoutOriginal { .. } => {
                Arc::new(Self::ModifiedWithoutOriginal { line_breaks, space })
            }
        }
    }
}
