pub mod coerce;
pub mod handlers;
pub mod pagination;
pub mod types;

pub use handlers::*;
pub use types::*;
