use std::process::exit;

/// Runs the driver and turns its result into the process exit code.
fn main() {
    match ccdriver::run() {
        Ok(code) => exit(code),
        Err(err) => {
            eprintln!("error: {err:#}");
            exit(1);
        }
    }
}
