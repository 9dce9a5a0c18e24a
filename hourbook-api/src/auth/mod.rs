mod extractor;

pub use extractor::{AuthSettings, CurrentActor};
