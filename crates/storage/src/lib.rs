use async_trait::async_trait;
use chrono::NaiveDateTime;
use std::sync::Arc;

use domain::{
    Comment, Error, ModerationStatus, NewComment, NewPrayer, NewTestimonial, ParentKind, Prayer,
    Stats, Testimonial,
};

mod memory;
mod models;
mod repo;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::Db;

/// URL sentinel that selects the in-memory backend.
pub const MEMORY_URL: &str = "memory";

/// The record store behind every collection. Each method is atomic:
/// no caller observes a partially applied create/increment/approve/delete.
#[async_trait]
pub trait Backend: Send + Sync {
    async fn create_comment(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        new: NewComment,
    ) -> Result<Comment, Error>;
    async fn list_comments(
        &self,
        parent: Option<(ParentKind, &str)>,
    ) -> Result<Vec<Comment>, Error>;
    async fn set_comment_status(
        &self,
        id: &str,
        status: ModerationStatus,
    ) -> Result<Comment, Error>;
    async fn delete_comment(&self, id: &str) -> Result<(), Error>;

    async fn create_prayer(&self, new: NewPrayer) -> Result<Prayer, Error>;
    async fn list_prayers(&self) -> Result<Vec<Prayer>, Error>;
    async fn get_prayer(&self, id: &str) -> Result<Prayer, Error>;
    async fn heart_prayer(&self, id: &str) -> Result<Prayer, Error>;
    /// Cascades: the prayer's comments go with it.
    async fn delete_prayer(&self, id: &str) -> Result<(), Error>;

    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial, Error>;
    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, Error>;
    async fn approve_testimonial(
        &self,
        id: &str,
        now: NaiveDateTime,
    ) -> Result<Testimonial, Error>;
    async fn delete_testimonial(&self, id: &str) -> Result<(), Error>;

    async fn stats(&self) -> Result<Stats, Error>;
}

pub type Store = Arc<dyn Backend>;

/// Open the backend named by the configured database URL. `memory`
/// selects the process-local store (all data is lost on restart);
/// anything else is treated as a SQLite URL.
pub async fn connect(database_url: &str) -> anyhow::Result<Store> {
    if database_url == MEMORY_URL {
        tracing::info!("using in-memory store; data will not survive a restart");
        Ok(Arc::new(MemoryStore::new()))
    } else {
        tracing::info!(url = database_url, "using sqlite store");
        Ok(Arc::new(Db::new(database_url).await?))
    }
}
