pub mod comments;
pub mod personas;
pub mod posts;
