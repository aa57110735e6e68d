//! Helper binary that repeatedly selects a global version
//!
//! Usage: state_writer <root> <version> <iterations>

use pyvm_core::{Config, RuntimeVersion, StateStore};
use std::env;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: state_writer <root> <version> <iterations>");
        std::process::exit(1);
    }

    let store = StateStore::new(&Config::new(&args[1]));
    let version: RuntimeVersion = args[2].parse().expect("invalid version");
    let iterations: usize = args[3].parse().expect("iterations must be a number");

    for _ in 0..iterations {
        store.write(&version).expect("Failed to write state");
        store.read().expect("Failed to read state");
    }

    println!("State writer completed {} iterations", iterations);
}
