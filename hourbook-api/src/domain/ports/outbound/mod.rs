mod directory;
mod entry_store;
mod memberships;
#[cfg(test)]
pub(crate) mod mock;
mod preferences;
mod time_entries;

pub use directory::*;
pub use entry_store::*;
pub use memberships::*;
pub use preferences::*;
pub use time_entries::*;
