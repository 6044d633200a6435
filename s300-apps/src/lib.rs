mod error;
mod node;
mod node_config;
mod sink;
pub mod utils;

pub use error::*;
pub use node::*;
pub use node_config::*;
pub use sink::*;
