mod classify;
pub mod utils;
