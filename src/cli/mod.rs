pub mod build;
pub mod decode;
pub mod show;

use std::io::Read;
use std::path::{Path, PathBuf};
use std::process;

use clap::ValueEnum;
use tagless::program::Builtin;

/// External tree format.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// `(Add (Lit 1) (Lit 2))`
    Sexpr,
    /// `{"Node":{"tag":"Lit","children":[{"Leaf":"1"}]}}`
    Json,
}

/// Decoder tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum TierArg {
    /// Lit, Neg, Add
    Base,
    /// Base plus Mul
    Mul,
}

/// Look up a built-in program by name, exiting on an unknown name.
pub fn resolve_program(name: &str) -> Builtin {
    match Builtin::from_name(name) {
        Some(program) => program,
        None => {
            let known: Vec<&str> = Builtin::ALL.iter().map(|b| b.name()).collect();
            eprintln!(
                "error: unknown program '{}' (expected one of: {})",
                name,
                known.join(", ")
            );
            process::exit(1);
        }
    }
}

/// Read the input file (or stdin for `-`). Returns a display name and the text.
pub fn read_input(path: &Path) -> (String, String) {
    if path == Path::new("-") {
        let mut source = String::new();
        if let Err(e) = std::io::stdin().read_to_string(&mut source) {
            eprintln!("error: cannot read stdin: {}", e);
            process::exit(1);
        }
        return ("<stdin>".to_string(), source);
    }
    match std::fs::read_to_string(path) {
        Ok(source) => (path.display().to_string(), source),
        Err(e) => {
            eprintln!("error: cannot read '{}': {}", path.display(), e);
            process::exit(1);
        }
    }
}

/// Write to the output file, or stdout when none is given.
pub fn write_output(output: Option<PathBuf>, text: &str) {
    match output {
        Some(path) => {
            if let Err(e) = std::fs::write(&path, text) {
                eprintln!("error: cannot write '{}': {}", path.display(), e);
                process::exit(1);
            }
            eprintln!("Wrote {}", path.display());
        }
        None => println!("{}", text),
    }
}
