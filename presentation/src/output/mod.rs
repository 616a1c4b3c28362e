//! Output formatting for catalogues and tool results

pub mod console;
pub mod formatter;
pub mod json;
