//! Light CLI wrapper around the `famicore-mmu` crate.
//!
//! Builds an MMU from a JSON memory map (or a single flat 64 KiB RAM bank)
//! and runs a script of read/write commands against it, printing results as
//! uppercase hex.

use std::{error::Error, process::exit};

use clap::Parser;
use clap_stdin::FileOrStdin;

mod map;
mod script;

#[derive(Parser, Debug)]
struct Args {
    /// Input command script file, or `-` to read stdin (end with ^D)
    script: FileOrStdin,

    /// JSON memory map file; a single flat 64 KiB RAM bank if not given
    #[arg(short = 'm', long)]
    map: Option<String>,
}

fn main() {
    let args = Args::parse();

    let mut mmu = match &args.map {
        Some(path) => unwrap_or_abort(map::load(path), "Memory map"),
        None => map::flat(),
    };

    let commands = args.script.to_string();
    for (index, line) in commands.lines().enumerate() {
        match script::execute_line(&mut mmu, line) {
            Ok(Some(output)) => println!("{output}"),
            Ok(None) => (),
            Err(error) => {
                eprintln!("Script error on line {}.\n", index + 1);
                eprintln!("{error}");
                exit(1)
            }
        }
    }
}

fn unwrap_or_abort<T>(result: Result<T, Box<dyn Error>>, stage: &str) -> T {
    match result {
        Ok(t) => t,
        Err(error) => {
            eprintln!("{stage} errors occurred.\n");
            eprintln!("{error}");
            exit(1)
        }
    }
}
