//! Dumps what the engine sees for every line of a DESC file.
//!
//!     cargo run -p desc-analysis --example debug_context -- world.desc [line column]
//!
//! Without a position, prints the block still open at the end of each line. With
//! one, prints the completion suggestions and hover for that position as JSON.

use desc_analysis::{completion_items, hover, resolve, DocumentView, LineIndex, Position};

fn main() {
    let args: Vec<String> = std::env::args().skip(1).collect();
    let source = match args.first() {
        Some(path) => std::fs::read_to_string(path).unwrap_or_else(|err| {
            eprintln!("Failed to read {}: {}", path, err);
            std::process::exit(1);
        }),
        None => {
            eprintln!("usage: debug_context <file.desc> [line column]");
            std::process::exit(2);
        }
    };
    let document = LineIndex::new(source);

    let position = match (args.get(1), args.get(2)) {
        (Some(line), Some(column)) => match (line.parse(), column.parse()) {
            (Ok(line), Ok(column)) => Some(Position::new(line, column)),
            _ => {
                eprintln!("line and column must be zero-based integers");
                std::process::exit(2);
            }
        },
        _ => None,
    };

    match position {
        Some(position) => {
            let report = serde_json::json!({
                "block": resolve(&document, position).block,
                "suggestions": completion_items(&document, position),
                "hover": hover(&document, position),
            });
            match serde_json::to_string_pretty(&report) {
                Ok(json) => println!("{}", json),
                Err(err) => eprintln!("Failed to serialize report: {}", err),
            }
        }
        None => {
            for line in 0..document.line_count() {
                let text = document.line_text(line).unwrap_or_default();
                let end_of_line = Position::new(line, text.chars().count());
                let block = resolve(&document, end_of_line)
                    .block
                    .map(|keyword| keyword.as_str())
                    .unwrap_or("-");
                println!("{:>4} {:<12} {}", line + 1, block, text);
            }
        }
    }
}
