//! Domain types for LadderChart

pub mod bar;

pub use bar::{validate_bars, Bar};

/// Symbol type alias
pub type Symbol = String;
