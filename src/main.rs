use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

mod cli;

use cli::{Format, TierArg};
use tagless::tree::decode::DEFAULT_MAX_DEPTH;

#[derive(Parser)]
#[command(
    name = "tagless",
    version,
    about = "Tagless-final expressions: one program, many interpretations."
)]
struct Cli {
    /// Log more (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// List the built-in programs
    List,
    /// Run a built-in program under every interpretation
    Show {
        /// Program name (see `tagless list`)
        program: String,
    },
    /// Serialize a built-in program to its generic tree
    Build {
        /// Program name (see `tagless list`)
        program: String,
        /// Output format
        #[arg(long, value_enum, default_value = "sexpr")]
        format: Format,
        /// Output file (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Decode a tree and evaluate and print it
    Decode {
        /// Input file, or `-` for stdin
        input: PathBuf,
        /// Decoder tier: `base` rejects `Mul`
        #[arg(long, value_enum, default_value = "mul")]
        tier: TierArg,
        /// Input format
        #[arg(long, value_enum, default_value = "sexpr")]
        format: Format,
        /// Maximum tree nesting depth
        #[arg(long, default_value_t = DEFAULT_MAX_DEPTH)]
        max_depth: usize,
    },
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => tracing::Level::WARN,
        1 => tracing::Level::DEBUG,
        _ => tracing::Level::TRACE,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::List => cli::show::cmd_list(),
        Command::Show { program } => cli::show::cmd_show(&program),
        Command::Build {
            program,
            format,
            output,
        } => cli::build::cmd_build(&program, format, output),
        Command::Decode {
            input,
            tier,
            format,
            max_depth,
        } => cli::decode::cmd_decode(input, tier, format, max_depth),
    }
}
