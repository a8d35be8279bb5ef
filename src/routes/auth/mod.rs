mod handler;
mod model;

pub use handler::{login, logout, me, register_candidate, register_employer};
