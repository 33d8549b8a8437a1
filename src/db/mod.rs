pub mod import;
pub mod initialize;
pub mod log;
pub mod migrate;
pub mod name_match;
pub mod pool;
pub mod queries;
pub mod source;
pub mod stats;
