mod directory;
mod memberships;
mod preferences;
mod reports;
mod time_entries;

pub use directory::*;
pub use memberships::*;
pub use preferences::*;
pub use reports::*;
pub use time_entries::*;
