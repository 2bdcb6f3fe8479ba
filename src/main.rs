pub mod cli;
pub mod config;
pub mod remote;
pub mod sync;
pub mod trace;

fn main() {
    if let Err(err) = cli::run() {
        eprintln!("Error: {err:?}");
        std::process::exit(1);
    }
}
