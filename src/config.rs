use crate::fmt::FormattingOptions;
use anyhow::Result;
use std::{
    fs::File,
    io::BufReader,
    path::{Path, PathBuf},
};

#[derive(Debug, Default, serde::Deserialize)]
#[serde(default)]
pub struct Config {
    pub format: FormattingOptions,
}

pub fn config_of_path(file_path: &Path) -> Result<Config> {
    match file_path.parent() {
        Some(dir_path) => config_of_dir(dir_path),
        None => Ok(Config::default()),
    }
}

pub fn config_of_dir(dir_path: &Path) -> Result<Config> {
    let config_path = find_config_file_path(dir_path);
    let config = match config_path {
        Some(config_path) => {
            let config_file = File::open(config_path)?;
            let reader = BufReader::new(config_file);
            serde_yaml::from_reader(reader)?
        }
        None => Config::default(),
    };
    Ok(config)
}

fn find_config_file_path(base: &Path) -> Option<PathBuf> {
    let config_path = base.join(".wsfmt.yml");
    if config_path.exists() {
        return Some(config_path);
    }
    if let Some(parent) = base.parent() {
        return find_config_file_path(parent);
    }
    None
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn missing_config_file_falls_back_to_defaults() {
        let config = config_of_dir(Path::new("/")).unwrap();
        assert_eq!(config.format, FormattingOptions::default());
    }

    #[test]
    fn config_yaml_overrides_only_named_options() {
        let config: Config = serde_yaml::from_str("format:\n  use_tab: true\n").unwrap();
        assert!(config.format.use_tab);
        assert_eq!(
            config.format.indentation_size,
            FormattingOptions::default().indentation_size
        );
    }
}
