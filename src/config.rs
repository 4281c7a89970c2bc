//! Configuration for fsc.
//!
//! The config file (`fsc.toml`) is deserialized into [load::RawConfig] and converted into
//! [Config], which the rest of fsc reads from.
//! - [general]: initial toggles, prefix key and timeout, log level
//! - [display]: what each list row shows
//! - [theme]: colors
//! - [input]: key bindings and the configured editor

pub mod display;
pub mod general;
pub mod input;
pub mod load;
pub mod theme;

pub use display::Display;
pub use general::{General, InternalGeneral};
pub use input::{Editor, Keys};
pub use load::Config;
pub use theme::Theme;
