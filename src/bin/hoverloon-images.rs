//! Hoverloon image preparation CLI
//!
//! Command-line entry point; see the `cli` module of the hoverloon-images library.

#[cfg(feature = "cli")]
use hoverloon_images::cli;

#[cfg(feature = "cli")]
fn main() -> anyhow::Result<std::process::ExitCode> {
    cli::main()
}

#[cfg(not(feature = "cli"))]
fn main() {
    panic!("CLI feature not enabled. Please rebuild with --features cli");
}
