// Cache module for local filesystem caching.
// Stores each user's recent events so repeat invocations skip the network.

pub mod paths;
pub mod store;

pub use paths::{cache_dir, snapshot_path};
pub use store::{DEFAULT_TTL, read_if_valid, write_snapshot};
