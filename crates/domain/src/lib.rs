mod error;
mod models;
pub mod window;

pub use error::Error;
pub use models::{
    Comment, ModerationStatus, NewComment, NewPrayer, NewTestimonial, ParentKind, Prayer, Stats,
    Testimonial, ANONYMOUS_NAME, MAX_COMMENT_LEN, MAX_REQUEST_LEN, MAX_TESTIMONY_LEN,
};
