use std::path::PathBuf;
use std::process;

use tagless::diagnostic::render_diagnostics;
use tagless::tree::{parse_tree, SourceMap};
use tagless::{DecodeError, Decoder, Eval, Product, Tree, View};

use super::{read_input, Format, TierArg};

pub fn cmd_decode(input: PathBuf, tier: TierArg, format: Format, max_depth: usize) {
    let (filename, source) = read_input(&input);

    let (tree, map) = match format {
        Format::Sexpr => match parse_tree(&source) {
            Ok((tree, map)) => (tree, Some(map)),
            Err(diagnostics) => {
                render_diagnostics(&diagnostics, &filename, &source);
                process::exit(1);
            }
        },
        Format::Json => match Tree::from_json_with_max_depth(&source, max_depth) {
            Ok(tree) => (tree, None),
            Err(e) => {
                eprintln!("error: invalid JSON tree in '{}': {}", filename, e);
                process::exit(1);
            }
        },
    };

    let sym = Product::new(Eval, View);
    let result = match tier {
        TierArg::Base => Decoder::base().with_max_depth(max_depth).decode(&tree, &sym),
        TierArg::Mul => Decoder::with_mul()
            .with_max_depth(max_depth)
            .decode(&tree, &sym),
    };

    let (value, text) = match result {
        Ok(repr) => repr,
        Err(err) => {
            report_decode_error(&err, map.as_ref(), &filename, &source);
            process::exit(1);
        }
    };

    println!("view: {}", text);
    match value {
        Ok(n) => println!("eval: {}", n),
        Err(e) => {
            eprintln!("error: {}", e);
            process::exit(1);
        }
    }
}

fn report_decode_error(err: &DecodeError, map: Option<&SourceMap>, filename: &str, source: &str) {
    match map {
        // Spans only exist for s-expression input.
        Some(map) => render_diagnostics(&[err.to_diagnostic(Some(map))], filename, source),
        None => eprintln!("error: {}", err),
    }
}
