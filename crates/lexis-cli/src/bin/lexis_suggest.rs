// lexis-suggest: print corrections for words from stdin.
//
// For each input word, one line: the word, a colon, and the ranked
// suggestions separated by ", ". Correct words print "word: -".

use std::io::{self, BufRead, Write};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let (dict_path, args) = lexis_cli::parse_dict_path(&args);

    if lexis_cli::wants_help(&args) {
        println!("lexis-suggest: print corrections for words from stdin.");
        println!();
        println!("Usage: lexis-suggest [-d DICT_BASE]");
        println!();
        println!("Options:");
        println!("  -d, --dict-path PATH   Dictionary base path (PATH.aff / PATH.dic)");
        println!("  -h, --help             Print this help");
        return;
    }

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

        if handle.lookup(word) {
            let _ = writeln!(out, "{word}: -");
        } else {
            let suggestions = handle.suggest(word);
            let _ = writeln!(out, "{word}: {}", suggestions.join(", "));
        }
    }
}
