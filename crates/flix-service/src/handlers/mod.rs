//! HTTP request handlers for the myFlix API.

pub mod auth_handler;
pub mod health;
pub mod metrics;
pub mod movie_handler;
pub mod user_handler;

pub use auth_handler::login;
pub use health::{greeting, health_check};
pub use metrics::metrics_handler;
pub use movie_handler::{get_director, get_genre, get_movie, list_movies};
pub use user_handler::{
    add_favorite, delete_user, get_user, register, remove_favorite, update_user,
};
