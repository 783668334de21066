//! Runtime settings for upskill.
//!
//! Every knob is read from an `UPSKILL_*` environment variable with a
//! built-in default. The application copies config-file values into unset
//! variables at start-up, so this crate never reads the file itself.

pub mod env;

pub use env::{
    cache_ttl, config_file, data_dir, default_top_k, env_dedupe, fetch_limit, fetch_timeout,
    home_dir,
};
