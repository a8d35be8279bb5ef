mod handler;
mod model;

pub use handler::get_lookups;
pub use model::{CITIES, JOB_CATEGORIES, JOB_TYPES, LookupItem, is_known};
