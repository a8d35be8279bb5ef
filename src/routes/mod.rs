pub mod application;
pub mod auth;
pub mod candidate;
pub mod content;
pub mod employer;
pub mod health;
pub mod job;
pub mod lookup;
