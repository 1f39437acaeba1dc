//! Single-shot executor binary.
//!
//! Contract with the spawning process: two positional arguments in, one
//! line of result on stdout, diagnostics on stderr, exit code 0 on
//! success and non-zero otherwise.
use std::env;
use std::path::Path;
use std::process;

use executor::{logging, ExecutorConfig, HandlerRegistry, ShapeRegistry};

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    if args.len() < 3 {
        eprintln!("Usage: executor <handler-identifier> <payload-file-path>");
        process::exit(1);
    }

    // Diagnostics go to stderr and stay silent unless EXECUTOR_LOG is set.
    logging::init();

    let config = ExecutorConfig::from_env();
    let handlers = HandlerRegistry::builtin();
    let shapes = ShapeRegistry::builtin();

    let rendered = executor::execute(&args[1], Path::new(&args[2]), &handlers, &shapes, &config)?;

    // The one stdout write of the whole process.
    println!("{rendered}");
    Ok(())
}
