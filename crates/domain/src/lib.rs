mod error;
mod models;
pub mod validate;

pub use error::ForumError;
pub use models::{
    CommentView, Persona, PostDetail, PostView, SortOrder, DELETED_PERSONA_NAME,
    RESERVED_PERSONA_NAME,
};
