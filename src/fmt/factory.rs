use super::{FormattingOptions, TriviaData};
use std::sync::{Arc, OnceLock};

const SPACE_CACHE_SIZE: usize = 10;
const LINE_BREAK_CACHE_SIZE: usize = 5;
const INDENTATION_LEVEL_CACHE_SIZE: usize = 20;

/// Creates trivia descriptors, interning the recurring shapes.
///
/// One factory is shared by every worker of a formatting pass. The space
/// cache is filled up front; the line-break x indentation-level cache fills
/// lazily with insert-if-absent slots, so population needs no lock. Racing
/// writers all construct an identical candidate for a slot, which makes the
/// race benign: the losers drop their candidate and read back the winner.
#[derive(Debug)]
pub struct TriviaDataFactory {
    options: FormattingOptions,
    spaces: [Arc<TriviaData>; SPACE_CACHE_SIZE],
    whitespaces: [[OnceLock<Arc<TriviaData>>; INDENTATION_LEVEL_CACHE_SIZE]; LINE_BREAK_CACHE_SIZE],
}

impl TriviaDataFactory {
    pub fn new(options: FormattingOptions) -> Self {
        Self {
            options,
            spaces: std::array::from_fn(|space| TriviaData::spaces(space as i32, false)),
            whitespaces: std::array::from_fn(|_| std::array::from_fn(|_| OnceLock::new())),
        }
    }

    pub fn options(&self) -> &FormattingOptions {
        &self.options
    }

    /// Trivia for `space` same-line spaces. Small counts come from the
    /// cache; elastic trivia is always fresh and never cached.
    pub fn space_trivia(&self, space: i32, elastic: bool) -> Arc<TriviaData> {
        assert!(space >= 0, "space must not be negative: {space}");
        if elastic {
            return TriviaData::spaces(space, true);
        }
        if (space as usize) < SPACE_CACHE_SIZE {
            return Arc::clone(&self.spaces[space as usize]);
        }
        TriviaData::spaces(space, false)
    }

    /// Trivia for `line_breaks` breaks followed by `indentation` columns.
    ///
    /// `use_trivia_as_it_is` asserts that the shape reflects whitespace as
    /// found in the source. Only such trivia is cacheable, and only when it
    /// is not elastic, its break count is within the cache range, and its
    /// indentation is an exact multiple of one indent level.
    pub fn whitespace_trivia(
        &self,
        line_breaks: i32,
        indentation: i32,
        use_trivia_as_it_is: bool,
        elastic: bool,
    ) -> Arc<TriviaData> {
        assert!(
            line_breaks >= 0,
            "line break count must not be negative: {line_breaks}"
        );
        assert!(
            indentation >= 0,
            "indentation must not be negative: {indentation}"
        );

        let indent_size = self.options.indentation_size as i32;
        let cacheable = !elastic
            && use_trivia_as_it_is
            && 0 < line_breaks
            && line_breaks <= LINE_BREAK_CACHE_SIZE as i32
            && indent_size > 0
            && indentation % indent_size == 0;
        if cacheable {
            let level = (indentation / indent_size) as usize;
            if level < INDENTATION_LEVEL_CACHE_SIZE {
                return self.interned_whitespace((line_breaks - 1) as usize, level);
            }
        }

        if use_trivia_as_it_is {
            TriviaData::whitespace(line_breaks, indentation, elastic)
        } else {
            TriviaData::modified_without_original(line_breaks, indentation)
        }
    }

    fn interned_whitespace(&self, line_index: usize, level: usize) -> Arc<TriviaData> {
        assert!(
            line_index < LINE_BREAK_CACHE_SIZE,
            "line index out of range: {line_index}"
        );
        assert!(
            level < INDENTATION_LEVEL_CACHE_SIZE,
            "indentation level out of range: {level}"
        );

        let slot = &self.whitespaces[line_index][level];
        if let Some(cached) = slot.get() {
            return Arc::clone(cached);
        }
        // The candidate is a pure function of the slot coordinates, so a
        // redundant construction on a lost race is cheap and interchangeable.
        let candidate = TriviaData::whitespace(
            (line_index + 1) as i32,
            (level * self.options.indentation_size) as i32,
            false,
        );
        if slot.set(candidate).is_ok() {
            log::trace!("interned whitespace trivia at [{line_index}][{level}]");
        }
        Arc::clone(slot.get().expect("slot was just populated"))
    }
}

/// Token-level entry points of the trivia engine, implemented by a
/// collaborator that can read the actual source text around its tokens.
pub trait TriviaFactory {
    type Token;

    /// Trivia in front of `token`, at the start of the document.
    fn create_leading_trivia(&self, token: &Self::Token) -> Arc<TriviaData>;

    /// Trivia behind `token`, at the end of the document.
    fn create_trailing_trivia(&self, token: &Self::Token) -> Arc<TriviaData>;

    /// Trivia between two adjacent tokens.
    fn create(&self, left: &Self::Token, right: &Self::Token) -> Arc<TriviaData>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn factory() -> TriviaDataFactory {
        TriviaDataFactory::new(FormattingOptions::default())
    }

    #[test]
    fn small_space_counts_are_interned() {
        let factory = factory();
        for space in 0..SPACE_CACHE_SIZE as i32 {
            let first = factory.space_trivia(space, false);
            let second = factory.space_trivia(space, false);
            assert!(Arc::ptr_eq(&first, &second));
            assert_eq!(first.space(), space);
        }
    }

    #[test]
    fn large_space_counts_are_fresh() {
        let factory = factory();
        let first = factory.space_trivia(SPACE_CACHE_SIZE as i32, false);
        let second = factory.space_trivia(SPACE_CACHE_SIZE as i32, false);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.space(), SPACE_CACHE_SIZE as i32);
    }

    #[test]
    fn elastic_spaces_bypass_the_cache() {
        let factory = factory();
        let elastic = factory.space_trivia(2, true);
        assert!(elastic.treat_as_elastic());
        assert!(!Arc::ptr_eq(&elastic, &factory.space_trivia(2, false)));
        // The cached instance stays non-elastic.
        assert!(!factory.space_trivia(2, false).treat_as_elastic());
    }

    #[test]
    fn aligned_indentation_is_interned() {
        let factory = factory();
        let indent = factory.options().indentation_size as i32;
        let first = factory.whitespace_trivia(2, indent * 3, true, false);
        let second = factory.whitespace_trivia(2, indent * 3, true, false);
        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(first.line_breaks(), 2);
        assert_eq!(first.space(), indent * 3);
    }

    #[test]
    fn unaligned_indentation_is_fresh_but_value_equal() {
        let factory = factory();
        let indent = factory.options().indentation_size as i32;
        let first = factory.whitespace_trivia(2, indent * 3 + 1, true, false);
        let second = factory.whitespace_trivia(2, indent * 3 + 1, true, false);
        assert!(!Arc::ptr_eq(&first, &second));
        assert_eq!(first.line_breaks(), 2);
        assert_eq!(first.space(), indent * 3 + 1);
    }

    #[test]
    fn excessive_break_counts_and_levels_are_fresh() {
        let factory = factory();
        let indent = factory.options().indentation_size as i32;

        let breaks = LINE_BREAK_CACHE_SIZE as i32 + 1;
        let first = factory.whitespace_trivia(breaks, indent, true, false);
        assert!(!Arc::ptr_eq(&first, &factory.whitespace_trivia(breaks, indent, true, false)));

        let deep = indent * INDENTATION_LEVEL_CACHE_SIZE as i32;
        let first = factory.whitespace_trivia(1, deep, true, false);
        assert!(!Arc::ptr_eq(&first, &factory.whitespace_trivia(1, deep, true, false)));
    }

    #[test]
    fn zero_break_whitespace_is_never_interned() {
        let factory = factory();
        let first = factory.whitespace_trivia(0, 0, true, false);
        let second = factory.whitespace_trivia(0, 0, true, false);
        assert!(!Arc::ptr_eq(&first, &second));
    }

    #[test]
    fn forced_shapes_are_marked_as_modified() {
        let factory = factory();
        let trivia = factory.whitespace_trivia(1, 3, false, false);
        assert!(trivia.should_replace_original_with_new_string());
        assert!(matches!(
            &*trivia,
            TriviaData::ModifiedWithoutOriginal { .. }
        ));
    }

    #[test]
    fn elastic_whitespace_bypasses_the_cache() {
        let factory = factory();
        let indent = factory.options().indentation_size as i32;
        let elastic = factory.whitespace_trivia(1, indent, true, true);
        assert!(elastic.treat_as_elastic());
        let cached = factory.whitespace_trivia(1, indent, true, false);
        assert!(!Arc::ptr_eq(&elastic, &cached));
        assert!(!cached.treat_as_elastic());
    }

    #[test]
    fn racing_writers_converge_on_one_instance() {
        let factory = factory();
        let indent = factory.options().indentation_size as i32;
        let results = std::thread::scope(|s| {
            let handles: Vec<_> = (0..8)
                .map(|_| s.spawn(|| factory.whitespace_trivia(3, indent * 2, true, false)))
                .collect();
            handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .collect::<Vec<_>>()
        });
        for pair in results.windows(2) {
            assert!(Arc::ptr_eq(&pair[0], &pair[1]));
        }
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn negative_space_counts_are_rejected() {
        let _ = factory().space_trivia(-1, false);
    }

    #[test]
    #[should_panic(expected = "must not be negative")]
    fn negative_break_counts_are_rejected() {
        let _ = factory().whitespace_trivia(-1, 0, true, false);
    }
}
