// lexis-cli: shared utilities for the command-line tools.

use std::path::PathBuf;
use std::process;

use lexis::LexisHandle;

/// Search for a dictionary pair and build a handle.
///
/// Search order:
/// 1. `dict_path` argument (base path, `.aff`/`.dic` appended)
/// 2. `LEXIS_DICT_PATH` environment variable
/// 3. `./dictionary.aff` / `./dictionary.dic`
pub fn load_handle(dict_path: Option<&str>) -> Result<LexisHandle, String> {
    let search_paths = build_search_paths(dict_path);

    for base in &search_paths {
        if base.with_extension("aff").is_file() {
            return LexisHandle::from_path(base)
                .map_err(|e| format!("failed to load {}: {e}", base.display()));
        }
    }

    Err(format!(
        "could not find an .aff/.dic pair at any of:\n{}",
        search_paths
            .iter()
            .map(|p| format!("  - {}.aff", p.display()))
            .collect::<Vec<_>>()
            .join("\n")
    ))
}

fn build_search_paths(dict_path: Option<&str>) -> Vec<PathBuf> {
    let mut paths = Vec::new();
    if let Some(path) = dict_path {
        paths.push(PathBuf::from(path));
    }
    if let Ok(path) = std::env::var("LEXIS_DICT_PATH") {
        paths.push(PathBuf::from(path));
    }
    paths.push(PathBuf::from("dictionary"));
    paths
}

/// Pull a `-d PATH` / `--dict-path PATH` pair out of the argument list.
pub fn parse_dict_path(args: &[String]) -> (Option<String>, Vec<String>) {
    let mut dict_path = None;
    let mut rest = Vec::new();
    let mut iter = args.iter();
    while let Some(arg) = iter.next() {
        if arg == "-d" || arg == "--dict-path" {
            dict_path = iter.next().cloned();
        } else {
            rest.push(arg.clone());
        }
    }
    (dict_path, rest)
}

pub fn wants_help(args: &[String]) -> bool {
    args.iter().any(|a| a == "-h" || a == "--help")
}

/// Print an error and exit with a failure status.
pub fn fatal(message: &str) -> ! {
    eprintln!("error: {message}");
    process::exit(1);
}
