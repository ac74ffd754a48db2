use async_trait::async_trait;
use chrono::{NaiveDateTime, Utc};
use std::sync::Mutex;

use domain::{
    Comment, Error, ModerationStatus, NewComment, NewPrayer, NewTestimonial, ParentKind, Prayer,
    Stats, Testimonial,
};

use crate::Backend;

/// Process-local backend. One mutex guards all three collections; every
/// operation completes inside a single critical section and never
/// suspends while holding it, so each appears atomic to callers.
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Default)]
struct Inner {
    comments: Vec<Comment>,
    prayers: Vec<Prayer>,
    testimonials: Vec<Testimonial>,
    next_comment_id: i64,
    next_prayer_id: i64,
    next_testimonial_id: i64,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(Inner::default()),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn now() -> NaiveDateTime {
    Utc::now().naive_utc()
}

/// Most recent first; ties in `created_at` fall back to newest id, which
/// encodes insertion order.
fn by_recency<T: Clone>(items: &[T], created_at: impl Fn(&T) -> NaiveDateTime) -> Vec<T> {
    let mut out: Vec<T> = items.iter().rev().cloned().collect();
    out.sort_by(|a, b| created_at(b).cmp(&created_at(a)));
    out
}

#[async_trait]
impl Backend for MemoryStore {
    async fn create_comment(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        new: NewComment,
    ) -> Result<Comment, Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        if parent_kind == ParentKind::Prayer && !inner.prayers.iter().any(|p| p.id == parent_id) {
            return Err(Error::NotFound("Prayer"));
        }
        inner.next_comment_id += 1;
        let comment = Comment {
            id: inner.next_comment_id.to_string(),
            parent_kind,
            parent_id: parent_id.to_string(),
            name: new.name,
            email: new.email,
            content: new.content,
            status: ModerationStatus::Approved,
            created_at: now(),
        };
        inner.comments.push(comment.clone());
        Ok(comment)
    }

    async fn list_comments(
        &self,
        parent: Option<(ParentKind, &str)>,
    ) -> Result<Vec<Comment>, Error> {
        let inner = self.inner.lock().expect("store lock poisoned");
        let matching: Vec<Comment> = inner
            .comments
            .iter()
            .filter(|c| match parent {
                Some((kind, id)) => c.parent_kind == kind && c.parent_id == id,
                None => true,
            })
            .cloned()
            .collect();
        Ok(by_recency(&matching, |c| c.created_at))
    }

    async fn set_comment_status(
        &self,
        id: &str,
        status: ModerationStatus,
    ) -> Result<Comment, Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let comment = inner
            .comments
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(Error::NotFound("Comment"))?;
        comment.status = status;
        Ok(comment.clone())
    }

    async fn delete_comment(&self, id: &str) -> Result<(), Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let before = inner.comments.len();
        inner.comments.retain(|c| c.id != id);
        if inner.comments.len() == before {
            return Err(Error::NotFound("Comment"));
        }
        Ok(())
    }

    async fn create_prayer(&self, new: NewPrayer) -> Result<Prayer, Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        inner.next_prayer_id += 1;
        let prayer = Prayer {
            id: inner.next_prayer_id.to_string(),
            name: new.name,
            request: new.request,
            hearts: 0,
            anonymous: new.anonymous,
            created_at: now(),
        };
        inner.prayers.push(prayer.clone());
        Ok(prayer)
    }

    async fn list_prayers(&self) -> Result<Vec<Prayer>, Error> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(by_recency(&inner.prayers, |p| p.created_at))
    }

    async fn get_prayer(&self, id: &str) -> Result<Prayer, Error> {
        let inner = self.inner.lock().expect("store lock poisoned");
        inner
            .prayers
            .iter()
            .find(|p| p.id == id)
            .cloned()
            .ok_or(Error::NotFound("Prayer"))
    }

    async fn heart_prayer(&self, id: &str) -> Result<Prayer, Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let prayer = inner
            .prayers
            .iter_mut()
            .find(|p| p.id == id)
            .ok_or(Error::NotFound("Prayer"))?;
        prayer.hearts += 1;
        Ok(prayer.clone())
    }

    async fn delete_prayer(&self, id: &str) -> Result<(), Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let before = inner.prayers.len();
        inner.prayers.retain(|p| p.id != id);
        if inner.prayers.len() == before {
            return Err(Error::NotFound("Prayer"));
        }
        inner
            .comments
            .retain(|c| !(c.parent_kind == ParentKind::Prayer && c.parent_id == id));
        Ok(())
    }

    async fn create_testimonial(&self, new: NewTestimonial) -> Result<Testimonial, Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        inner.next_testimonial_id += 1;
        let testimonial = Testimonial {
            id: inner.next_testimonial_id.to_string(),
            name: new.name,
            testimony: new.testimony,
            anonymous: new.anonymous,
            approved: false,
            created_at: now(),
            approved_at: None,
        };
        inner.testimonials.push(testimonial.clone());
        Ok(testimonial)
    }

    async fn list_testimonials(&self) -> Result<Vec<Testimonial>, Error> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(by_recency(&inner.testimonials, |t| t.created_at))
    }

    async fn approve_testimonial(
        &self,
        id: &str,
        now: NaiveDateTime,
    ) -> Result<Testimonial, Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let testimonial = inner
            .testimonials
            .iter_mut()
            .find(|t| t.id == id)
            .ok_or(Error::NotFound("Testimonial"))?;
        if testimonial.approved {
            return Err(Error::AlreadyApproved);
        }
        testimonial.approved = true;
        testimonial.approved_at = Some(now);
        Ok(testimonial.clone())
    }

    async fn delete_testimonial(&self, id: &str) -> Result<(), Error> {
        let mut inner = self.inner.lock().expect("store lock poisoned");
        let before = inner.testimonials.len();
        inner.testimonials.retain(|t| t.id != id);
        if inner.testimonials.len() == before {
            return Err(Error::NotFound("Testimonial"));
        }
        Ok(())
    }

    async fn stats(&self) -> Result<Stats, Error> {
        let inner = self.inner.lock().expect("store lock poisoned");
        Ok(Stats {
            total_prayers: inner.prayers.len() as i64,
            total_hearts: inner.prayers.iter().map(|p| p.hearts).sum(),
            total_comments: inner.comments.len() as i64,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn prayer(name: &str, request: &str) -> NewPrayer {
        NewPrayer::new(Some(name.to_string()), request.to_string(), false).unwrap()
    }

    fn comment(content: &str) -> NewComment {
        NewComment::new(Some("Sam".into()), None, content.to_string(), false).unwrap()
    }

    #[tokio::test]
    async fn ids_are_strictly_increasing() {
        let store = MemoryStore::new();
        let a = store.create_prayer(prayer("A", "first")).await.unwrap();
        let b = store.create_prayer(prayer("B", "second")).await.unwrap();
        assert_eq!(a.id, "1");
        assert_eq!(b.id, "2");
    }

    #[tokio::test]
    async fn list_is_most_recent_first() {
        let store = MemoryStore::new();
        store.create_prayer(prayer("A", "first")).await.unwrap();
        store.create_prayer(prayer("B", "second")).await.unwrap();
        let prayers = store.list_prayers().await.unwrap();
        assert_eq!(prayers.len(), 2);
        assert_eq!(prayers[0].request, "second");
        assert_eq!(prayers[1].request, "first");
    }

    #[tokio::test]
    async fn heart_increments_exactly_one_prayer() {
        let store = MemoryStore::new();
        let a = store.create_prayer(prayer("A", "first")).await.unwrap();
        let b = store.create_prayer(prayer("B", "second")).await.unwrap();

        let hearted = store.heart_prayer(&a.id).await.unwrap();
        assert_eq!(hearted.hearts, 1);
        assert_eq!(store.get_prayer(&b.id).await.unwrap().hearts, 0);

        let err = store.heart_prayer("999").await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
        assert_eq!(store.get_prayer(&a.id).await.unwrap().hearts, 1);
    }

    #[tokio::test]
    async fn prayer_comment_requires_existing_parent() {
        let store = MemoryStore::new();
        let err = store
            .create_comment(ParentKind::Prayer, "42", comment("hello"))
            .await
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        // blog posts are not stored, so any post id is accepted
        store
            .create_comment(ParentKind::Post, "easter-2026", comment("hello"))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn deleting_a_prayer_cascades_to_its_comments_only() {
        let store = MemoryStore::new();
        let a = store.create_prayer(prayer("A", "first")).await.unwrap();
        let b = store.create_prayer(prayer("B", "second")).await.unwrap();
        store
            .create_comment(ParentKind::Prayer, &a.id, comment("on a"))
            .await
            .unwrap();
        store
            .create_comment(ParentKind::Prayer, &b.id, comment("on b"))
            .await
            .unwrap();
        store
            .create_comment(ParentKind::Post, &a.id, comment("post sharing id"))
            .await
            .unwrap();

        store.delete_prayer(&a.id).await.unwrap();

        let remaining = store.list_comments(None).await.unwrap();
        assert_eq!(remaining.len(), 2);
        assert!(remaining
            .iter()
            .all(|c| !(c.parent_kind == ParentKind::Prayer && c.parent_id == a.id)));
    }

    #[tokio::test]
    async fn approve_is_one_way() {
        let store = MemoryStore::new();
        let t = store
            .create_testimonial(NewTestimonial::new(None, "God is good".into(), true).unwrap())
            .await
            .unwrap();
        assert!(!t.approved);
        assert!(t.approved_at.is_none());

        let when = Utc::now().naive_utc();
        let approved = store.approve_testimonial(&t.id, when).await.unwrap();
        assert!(approved.approved);
        assert_eq!(approved.approved_at, Some(when));

        let later = when + chrono::Duration::hours(1);
        let err = store.approve_testimonial(&t.id, later).await.unwrap_err();
        assert!(matches!(err, Error::AlreadyApproved));

        let list = store.list_testimonials().await.unwrap();
        assert_eq!(list[0].approved_at, Some(when));
    }

    #[tokio::test]
    async fn set_status_and_delete_comment() {
        let store = MemoryStore::new();
        let c = store
            .create_comment(ParentKind::Post, "sermon-1", comment("first!"))
            .await
            .unwrap();
        assert_eq!(c.status, ModerationStatus::Approved);

        let updated = store
            .set_comment_status(&c.id, ModerationStatus::Rejected)
            .await
            .unwrap();
        assert_eq!(updated.status, ModerationStatus::Rejected);

        store.delete_comment(&c.id).await.unwrap();
        let err = store.delete_comment(&c.id).await.unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[tokio::test]
    async fn stats_aggregate_all_collections() {
        let store = MemoryStore::new();
        let a = store.create_prayer(prayer("A", "first")).await.unwrap();
        store.create_prayer(prayer("B", "second")).await.unwrap();
        store.heart_prayer(&a.id).await.unwrap();
        store.heart_prayer(&a.id).await.unwrap();
        store
            .create_comment(ParentKind::Prayer, &a.id, comment("amen"))
            .await
            .unwrap();

        let stats = store.stats().await.unwrap();
        assert_eq!(stats.total_prayers, 2);
        assert_eq!(stats.total_hearts, 2);
        assert_eq!(stats.total_comments, 1);
    }
}
