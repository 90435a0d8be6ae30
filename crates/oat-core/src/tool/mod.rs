pub mod server;
pub mod types;

pub use server::{SecuritySchemeInfo, ServerInfo};
pub use types::*;
