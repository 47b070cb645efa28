pub mod api;
pub mod config;
pub mod default_colors;
pub mod session;
pub mod status;
pub mod store;
pub mod sync;
pub mod traits;
pub mod types;
