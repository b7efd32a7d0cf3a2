use std::process;

fn main() {
    if let Err(e) = stackcheck::run() {
        eprintln!("stackcheck: {}", e);
        process::exit(1);
    }
}
