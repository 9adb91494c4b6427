pub mod config;
pub mod jvm;
pub mod logging;
pub mod properties;
pub mod snapshot_source;

pub use config::Config;
pub use snapshot_source::SnapshotSource;
