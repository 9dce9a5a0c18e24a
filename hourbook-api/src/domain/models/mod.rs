mod company;
mod membership;
mod preference;
mod project;
mod report;
mod time_entry;
mod user;

pub use company::*;
pub use membership::*;
pub use preference::*;
pub use project::*;
pub use report::*;
pub use time_entry::*;
pub use user::*;

pub use rollup::{Actor, CompanyId, EntryFilter, EntryId, Hours, ProjectId, ProjectRole, Role, UserId};
