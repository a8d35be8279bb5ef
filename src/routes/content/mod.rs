mod handler;
mod model;

pub use handler::{
    create_post, delete_post, get_about, get_post, get_settings, list_posts, list_users,
    update_about, update_post, update_settings,
};
