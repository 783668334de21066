//! Command-line interface for the `upskill` application.
//!
//! This crate serves as the main entry point for the executable, delegating
//! its core functionality to the `upskill-app` crate.

fn main() -> anyhow::Result<()> {
    upskill_app::run()
}
