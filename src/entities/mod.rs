pub mod movie;
pub mod user;
pub mod user_favorite;
