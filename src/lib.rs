mod cli;
mod config;
pub mod fmt;
mod scan;

#[cfg(test)]
mod test;

pub use cli::run;
pub use config::{config_of_dir, config_of_path, Config};
pub use fmt::FormattingOptions;

/// Normalize the whitespace of `source` according to `options`.
pub fn format_source(source: &str, options: FormattingOptions) -> String {
    let tokens = scan::scan(source);
    fmt::format(source, &tokens, options)
}
