// lexis-spell: check spelling of words from stdin.
//
// Reads words (one per line) and reports each as correct or wrong:
//   C: word    (correct)
//   W: word    (wrong / misspelled)
//
// With -s, suggestions follow each miss as "S: word" lines.

use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = lexis_cli::parse_dict_path(&args);

    if lexis_cli::wants_help(&args) {
        println!("lexis-spell: check spelling of words from stdin.");
        println!();
        println!("Usage: lexis-spell [-d DICT_BASE] [OPTIONS]");
        println!();
        println!("Reads words from stdin (one per line). Prints:");
        println!("  C: word    (correct)");
        println!("  W: word    (misspelled)");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary base path (PATH.aff / PATH.dic)");
        println!("  -s, --suggest          Also print suggestions for misspelled words");
        println!("  -w, --warn             Flag rarely-correct words as \"?: word\"");
        println!("  -h, --help             Print this help");
        return;
    }

    let show_suggestions = args.iter().any(|a| a == "-s" || a == "--suggest");
    let show_warnings = args.iter().any(|a| a == "-w" || a == "--warn");

    let handle = lexis_cli::load_handle(dict_path.as_deref())
        .unwrap_or_else(|e| lexis_cli::fatal(&e));

    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut out = io::BufWriter::new(stdout.lock());

    for line in stdin.lock().lines() {
        let line = match line {
            Ok(l) => l,
            Err(e) => {
                eprintln!("error reading stdin: {e}");
                break;
            }
        };
        let word = line.trim();
        if word.is_empty() {
            continue;
        }

        let result = handle.check(word);
        if result.correct {
            if show_warnings && result.warn {
                let _ = writeln!(out, "?: {word}");
            } else {
                let _ = writeln!(out, "C: {word}");
            }
        } else {
            let _ = writeln!(out, "W: {word}");
            if show_suggestions {
                for suggestion in handle.suggest(word) {
                    let _ = writeln!(out, "S: {suggestion}");
                }
            }
        }
    }
}
