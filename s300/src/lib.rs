#![doc = include_str!("../README.md")]

mod acquisition;
mod assembler;
mod clients;
pub mod consts;
mod error;
mod frame;
mod pose;
mod traits;
mod window;

pub use acquisition::*;
pub use assembler::*;
pub use clients::*;
pub use error::*;
pub use frame::*;
pub use pose::*;
pub use traits::*;
pub use window::*;

// re-export
pub use nalgebra::{self, Isometry3, Translation3, UnitQuaternion};
