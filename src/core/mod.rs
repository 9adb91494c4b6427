pub mod constants;
pub mod probe;
pub mod snapshot;

pub use probe::*;
pub use snapshot::*;
