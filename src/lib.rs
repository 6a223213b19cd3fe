pub mod args;
pub mod config;
pub mod errors;
pub mod extract;
pub mod kev;
pub mod load;
pub mod pipeline;
pub mod store;
pub mod transform;
