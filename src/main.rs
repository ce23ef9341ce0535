use std::fs;

use clap::Parser;
use linecalc::evaluate_document;

/// linecalc is a line-oriented calculator: every line of a document is an
/// arithmetic expression, and results carry across lines through variables.
#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Tells linecalc to look at a file instead of an inline document.
    #[arg(short, long)]
    file: bool,

    contents: String,
}

fn main() {
    let args = Args::parse();

    let document = if args.file {
        fs::read_to_string(&args.contents).unwrap_or_else(|_| {
            eprintln!("Failed to read the input file '{}'. Perhaps this file does not exist?",
                      &args.contents);
            std::process::exit(1);
        })
    } else {
        args.contents
    };

    let results = evaluate_document(&document);

    for (line, result) in document.lines().zip(results) {
        if result.valid {
            println!("{line} = {}", result.value);
        } else {
            println!("{line}");
        }
    }
}
