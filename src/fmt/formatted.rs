use super::FormattingOptions;

/// The materialized replacement text for one inter-token gap.
///
/// Construction is eager: counts are clamped to zero and the literal string
/// is built once, up front. This type intentionally has no `with_*`
/// transformations; a finalized gap cannot be reshaped.
#[derive(Debug)]
pub struct FormattedTrivia {
    line_breaks: usize,
    space: usize,
    text: String,
}

impl FormattedTrivia {
    pub fn new(options: &FormattingOptions, line_breaks: i32, indentation: i32) -> Self {
        let line_breaks = line_breaks.max(0) as usize;
        let space = indentation.max(0) as usize;
        let mut text = "\n".repeat(line_breaks);
        if line_breaks > 0 {
            push_indentation(&mut text, space, options);
        } else {
            text.push_str(&" ".repeat(space));
        }
        Self {
            line_breaks,
            space,
            text,
        }
    }

    pub fn line_breaks(&self) -> usize {
        self.line_breaks
    }

    pub fn space(&self) -> usize {
        self.space
    }

    pub fn new_string(&self) -> &str {
        &self.text
    }
}

/// Render `column` columns of indentation, as tabs followed by the space
/// remainder when tabs are configured, as plain spaces otherwise.
fn push_indentation(buf: &mut String, column: usize, options: &FormattingOptions) {
    if options.use_tab && options.tab_size > 0 {
        buf.push_str(&"\t".repeat(column / options.tab_size));
        buf.push_str(&" ".repeat(column % options.tab_size));
    } else {
        buf.push_str(&" ".repeat(column));
    }
}
