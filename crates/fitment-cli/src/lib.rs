//! Library components of the `fitment` command-line tool.

pub mod input;
pub mod logging;
