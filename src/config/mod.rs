//! Configuration system
//!
//! Loads ~/.config/ladle/config.yaml: backend origin, landing-page cache
//! window, and landing-page recipe count.

mod ladle_config;

pub use ladle_config::LadleConfig;
