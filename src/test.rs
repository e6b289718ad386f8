use similar_asserts::assert_eq;
use std::{
    fs,
    path::{Path, PathBuf},
};

#[test]
fn system_tests() {
    let dirs = get_test_dirs(Path::new("tests"));
    assert!(!dirs.is_empty(), "no fixture directories found");
    for dir_path in dirs {
        println!("test: {:?}", dir_path);
        compare_files(dir_path);
    }
}

fn get_test_dirs(dir_path: &Path) -> Vec<PathBuf> {
    let mut dirs = vec![];
    let entries = fs::read_dir(dir_path).unwrap();
    for entry in entries {
        let path = entry.unwrap().path();
        if path.is_dir() {
            dirs.push(path);
        }
    }
    dirs
}

fn compare_files(dir_path: PathBuf) {
    let mut input_path = dir_path.clone();
    input_path.push("in.txt");
    let mut output_path = dir_path.clone();
    output_path.push("out.txt");

    // Fixtures may carry their own .wsfmt.yml to test non-default options.
    let config = crate::config::config_of_dir(&dir_path).unwrap();
    let input = fs::read_to_string(&input_path).unwrap();
    let want = fs::read_to_string(&output_path).unwrap();
    let got = crate::format_source(&input, config.format);
    assert_eq!(want, got, "{:?}", &input_path);
}
