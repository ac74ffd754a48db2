use async_trait::async_trait;
use chrono::NaiveDateTime;
use sqlx::{migrate::MigrateDatabase, sqlite::SqlitePoolOptions, Pool, Sqlite};
use std::{fs, path::Path};

use domain::{
    Comment, Error, ModerationStatus, NewComment, NewPrayer, NewTestimonial, ParentKind, Prayer,
    Stats, Testimonial,
};

use crate::Backend;

#[derive(Clone)]
pub struct Db {
    pub(crate) pool: Pool<Sqlite>,
}

impl Db {
    pub async fn new(db_url: &str) -> anyhow::Result<Self> {
        let in_memory = db_url.contains(":memory:");
        if db_url.starts_with("sqlite://") && !in_memory {
            let path_str = db_url.trim_start_matches("sqlite://");
            let path = Path::new(path_str);
            if let Some(parent) = path.parent() {
                if !parent.as_os_str().is_empty() && !parent.exists() {
                    fs::create_dir_all(parent)?;
                }
            }
        }
        if !Sqlite::database_exists(db_url).await.unwrap_or(false) {
            Sqlite::create_database(db_url).await?;
        }
        // a :memory: database exists per connection, so keep exactly one
        let pool = SqlitePoolOptions::new()
            .max_connections(if in_memory { 1 } else { 5 })
            .connect(db_url)
            .await?;
        sqlx::query("PRAGMA journal_mode = WAL;")
            .execute(&pool)
            .await?;
        sqlx::query("PRAGMA synchronous = NORMAL;")
            .execute(&pool)
            .await?;
        sqlx::migrate!("../../migrations").run(&pool).await?;
        Ok(Self { pool })
    }
}

#[async_trait]
impl Backend for Db {
    async fn create_comment(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        new: NewComment,
    ) -> Result<Comment, Error> {
        self.insert_comment(parent_kind, parent_id, new).await
    }

    async fn list_comments(
        &self,
        parent: Option<(ParentKind, &str)>,
    ) -> Result<Vec<Comment>, Error> {
        self.select_comments(parent).await
    }

    async fn set_comment_status(
        &self,
        id: &str,
        status: ModerationStatus,
    ) -> Result<Comment, Error> {
        self.update_comment_status(id, status).await
    }

    async fn delete_comment(&self, id: &str) -> Result<(), Error> {
        self.remove_comment(id).await
    }

    async fn create_prayer(&self, new: NewPrayer) -> Result<Prayer, Error> {
        self.insert_prayer(new).await
    }

    async fn list_prayers(&self) -> Result<Vec<Prayer>, Error> {
        self.select_prayers().await
    }

    async fn get_prayer(&self, id: &str) -> Result<Prayer, Error> {
        self.select_prayer(id).await
    }

    async fn heart_prayer(&self, id: &str) -> Result<Prayer, Error> {
        self.increment_hearts(id).await
    }

    async fn delete_prayer(&self, id: &str) -> Result<(), Error> {
        self.remove_prayer(id).await
    }

    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial, Error> {
        self.insert_testimonial(new).await
    }

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, Error> {
        self.select_testimonials().await
    }

    async fn approve_testimonial(
        &self,
        id: &str,
        now: NaiveDateTime,
    ) -> Result<Testimonial, Error> {
        self.mark_testimonial_approved(id, now).await
    }

    async fn delete_testimonial(&self, id: &str) -> Result<(), Error> {
        self.remove_testimonial(id).await
    }

    async fn stats(&self) -> Result<Stats, Error> {
        self.aggregate_stats().await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    async fn db() -> Db {
        Db::new("sqlite::memory:").await.expect("in-memory db")
    }

    fn prayer(name: &str, request: &str) -> NewPrayer {
        NewPrayer::new(Some(name.to_string()), request.to_string(), false).unwrap()
    }

    fn comment(content: &str) -> NewComment {
        NewComment::new(Some("Sam".into()), None, content.to_string(), false).unwrap()
    }

    #[tokio::test]
    async fn prayer_round_trip_and_ordering() {
        let db = db().await;
        let a = db.create_prayer(prayer("A", "first")).await.unwrap();
        let b = db.create_prayer(prayer("B", "second")).await.unwrap();
        assert_ne!(a.id, b.id);

        let prayers = db.list_prayers().await.unwrap();
        assert_eq!(prayers.len(), 2);
        assert_eq!(prayers[0].id, b.id);
    }

    #[tokio::test]
    async fn hearts_only_touch_the_target_row() {
        let db = db().await;
        let a = db.create_prayer(prayer("A", "first")).await.unwrap();
        let b = db.create_prayer(prayer("B", "second")).await.unwrap();

        assert_eq!(db.heart_prayer(&a.id).await.unwrap().hearts, 1);
        assert_eq!(db.heart_prayer(&a.id).await.unwrap().hearts, 2);
        assert_eq!(db.get_prayer(&b.id).await.unwrap().hearts, 0);

        assert!(matches!(
            db.heart_prayer("12345").await.unwrap_err(),
            Error::NotFound(_)
        ));
        assert!(matches!(
            db.heart_prayer("not-a-number").await.unwrap_err(),
            Error::NotFound(_)
        ));
    }

    #[tokio::test]
    async fn cascade_delete_is_scoped_to_one_prayer() {
        let db = db().await;
        let a = db.create_prayer(prayer("A", "first")).await.unwrap();
        let b = db.create_prayer(prayer("B", "second")).await.unwrap();
        db.create_comment(ParentKind::Prayer, &a.id, comment("on a"))
            .await
            .unwrap();
        db.create_comment(ParentKind::Prayer, &b.id, comment("on b"))
            .await
            .unwrap();
        db.create_comment(ParentKind::Post, &a.id, comment("post with same id"))
            .await
            .unwrap();

        db.delete_prayer(&a.id).await.unwrap();

        let remaining = db.list_comments(None).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(db
            .list_comments(Some((ParentKind::Prayer, a.id.as_str())))
            .await
            .unwrap()
            .is_empty());
    }

    #[tokio::test]
    async fn comment_on_missing_prayer_is_rejected() {
        let db = db().await;
        let err = db
            .create_comment(ParentKind::Prayer, "7", comment("hi"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn approve_transition_is_one_way() {
        let db = db().await;
        let t = db
            .create_testimonial(NewTestimonial::new(None, "Healed".into(), true).unwrap())
            .await
            .unwrap();

        let when = Utc::now().naive_utc();
        let approved = db.approve_testimonial(&t.id, when).await.unwrap();
        assert!(approved.approved);
        assert_eq!(approved.approved_at, Some(when));

        let err = db
            .approve_testimonial(&t.id, when + chrono::Duration::days(1))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::AlreadyApproved));

        let list = db.list_testimonials().await.unwrap();
        assert_eq!(list[0].approved_at, Some(when));
    }

    #[tokio::test]
    async fn status_update_and_stats() {
        let db = db().await;
        let p = db.create_prayer(prayer("A", "first")).await.unwrap();
        db.heart_prayer(&p.id).await.unwrap();
        let c = db
            .create_comment(ParentKind::Post, "sermon-1", comment("first!"))
            .await
            .unwrap();
        assert_eq!(c.status, ModerationStatus::Approved);

        let updated = db
            .set_comment_status(&c.id, ModerationStatus::Pending)
            .await
            .unwrap();
        assert_eq!(updated.status, ModerationStatus::Pending);

        let stats = db.stats().await.unwrap();
        assert_eq!(stats.total_prayers, 1);
        assert_eq!(stats.total_hearts, 1);
        assert_eq!(stats.total_comments, 1);
    }
}
