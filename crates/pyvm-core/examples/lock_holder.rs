//! Helper binary that takes the install lock for a version, writes a marker, holds, releases
//!
//! Usage: lock_holder <root> <version> <process_id>
//!
//! Used to test that installs of one version are serialized across processes.

use pyvm_core::{Config, RuntimeVersion, lock::acquire_lock};
use std::env;
use std::fs::OpenOptions;
use std::io::Write;
use std::time::Duration;

fn main() {
    let args: Vec<String> = env::args().collect();
    if args.len() != 4 {
        eprintln!("Usage: lock_holder <root> <version> <process_id>");
        std::process::exit(1);
    }

    let config = Config::new(&args[1]);
    let version: RuntimeVersion = args[2].parse().expect("invalid version");
    let process_id = &args[3];

    let _guard = acquire_lock(
        &config.install_lock_path(&version),
        Duration::from_secs(30),
        &format!("install {} (process {})", version, process_id),
    )
    .expect("Failed to acquire lock");

    let marker_path = config.cache_dir().join("marker.txt");
    let mut file = OpenOptions::new()
        .create(true)
        .append(true)
        .open(marker_path)
        .expect("Failed to open marker file");

    writeln!(file, "process_{} start", process_id).expect("Failed to write marker");
    std::thread::sleep(Duration::from_millis(100));
    writeln!(file, "process_{} end", process_id).expect("Failed to write marker");

    println!("Process {} completed", process_id);
}
