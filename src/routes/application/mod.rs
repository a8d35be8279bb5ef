mod handler;
mod model;

pub use handler::{apply, job_applications, my_applications, update_status};
pub use model::ApplicationStatus;
