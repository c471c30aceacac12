use tagless::program::{Builtin, Program};
use tagless::{product, Build, Count, Eval, View};

use super::resolve_program;

pub fn cmd_list() {
    for program in Builtin::ALL {
        let tier = if program.uses_mul() { "mul" } else { "base" };
        println!("{:<6} {:<5} {}", program.name(), tier, program.run(&View));
    }
}

pub fn cmd_show(name: &str) {
    let program = resolve_program(name);

    // One traversal feeds all four interpretations.
    let (value, (text, (ops, tree))) = program.run(&product!(Eval, View, Count, Build));

    println!("program: {}", program);
    match value {
        Ok(n) => println!("eval:    {}", n),
        Err(e) => println!("eval:    error: {}", e),
    }
    println!("view:    {}", text);
    println!("ops:     {}", ops);
    println!("tree:    {}", tree);
}
