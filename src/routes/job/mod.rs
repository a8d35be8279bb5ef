mod handler;
mod model;

pub use handler::{
    close_job, create_job, delete_job, get_job, list_jobs, my_jobs, update_job,
};
pub use model::{Job, JobFilter};
