pub mod bundled;
pub mod config;
pub mod error;
pub mod framework;
pub mod io;
pub mod lifecycle;
pub mod markdown;
pub mod name;
pub mod paths;
pub mod search;
pub mod state;
pub mod template;
pub mod types;
pub mod validate;

pub use error::{Result, SuitError};
pub use lifecycle::{Confirmed, InitReport, SteeringManager};
