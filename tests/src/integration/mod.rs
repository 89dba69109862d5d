//! Cross-subsystem integration flows.

pub mod fixtures;
mod flows;
