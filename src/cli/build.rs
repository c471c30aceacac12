use std::path::PathBuf;
use std::process;

use tagless::tree::build;

use super::{resolve_program, write_output, Format};

pub fn cmd_build(name: &str, format: Format, output: Option<PathBuf>) {
    let program = resolve_program(name);
    let tree = build(&program);

    let text = match format {
        Format::Sexpr => tree.to_string(),
        Format::Json => match tree.to_json() {
            Ok(json) => json,
            Err(e) => {
                eprintln!("error: cannot serialize tree: {}", e);
                process::exit(1);
            }
        },
    };
    write_output(output, &text);
}
