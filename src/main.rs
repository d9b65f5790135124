use std::io;
use std::io::prelude::*;

use tracing_subscriber::prelude::*;

use reactor_reboot::{count, count_bounded, parse};

fn run() -> Result<(), String> {
    let mut input = String::new();
    io::stdin()
        .read_to_string(&mut input)
        .map_err(|e| format!("failed to read input: {}", e))?;
    let steps = parse(&input).map_err(|e| e.to_string())?;
    println!(
        "Part 1: {} cubes are on in the initialization region",
        count_bounded(&steps)
    );
    println!("Part 2: {} cubes are on", count(&steps, None));
    Ok(())
}

fn main() {
    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);
    let filter_layer = match tracing_subscriber::EnvFilter::try_from_default_env()
        .or_else(|_| tracing_subscriber::EnvFilter::try_new("info"))
    {
        Err(e) => {
            eprintln!("{}", e);
            std::process::exit(1);
        }
        Ok(layer) => layer,
    };

    tracing_subscriber::registry()
        .with(filter_layer)
        .with(fmt_layer)
        .init();

    if let Err(e) = run() {
        eprintln!("fail: {}", e);
        std::process::exit(1);
    }
}
