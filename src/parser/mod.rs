pub mod chain;
pub mod debug;
pub mod dom;
pub mod experience;
pub mod filters;
pub mod profile;

pub use debug::{debug_experience, ExperienceDebug};
pub use dom::Page;
pub use profile::{extract, ProfileRecord};
