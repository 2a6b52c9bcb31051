//! CLI library components for `bulksend`.

pub mod logging;
pub mod pipeline;
pub mod summary;
