use chrono::NaiveDateTime;
use domain::{Comment, ModerationStatus, ParentKind, Prayer, Testimonial};
use sqlx::FromRow;

#[derive(FromRow)]
pub struct SqlComment {
    pub id: i64,
    pub parent_kind: String,
    pub parent_id: String,
    pub name: String,
    pub email: Option<String>,
    pub content: String,
    pub status: String,
    pub created_at: NaiveDateTime,
}

impl From<SqlComment> for Comment {
    fn from(sql: SqlComment) -> Self {
        Comment {
            id: sql.id.to_string(),
            parent_kind: if sql.parent_kind == "prayer" {
                ParentKind::Prayer
            } else {
                ParentKind::Post
            },
            parent_id: sql.parent_id,
            name: sql.name,
            email: sql.email,
            content: sql.content,
            // CHECK constraint keeps the column in range; be lenient anyway
            status: sql.status.parse().unwrap_or(ModerationStatus::Pending),
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlPrayer {
    pub id: i64,
    pub name: String,
    pub request: String,
    pub hearts: i64,
    pub anonymous: bool,
    pub created_at: NaiveDateTime,
}

impl From<SqlPrayer> for Prayer {
    fn from(sql: SqlPrayer) -> Self {
        Prayer {
            id: sql.id.to_string(),
            name: sql.name,
            request: sql.request,
            hearts: sql.hearts,
            anonymous: sql.anonymous,
            created_at: sql.created_at,
        }
    }
}

#[derive(FromRow)]
pub struct SqlTestimonial {
    pub id: i64,
    pub name: String,
    pub testimony: String,
    pub anonymous: bool,
    pub approved: bool,
    pub created_at: NaiveDateTime,
    pub approved_at: Option<NaiveDateTime>,
}

impl From<SqlTestimonial> for Testimonial {
    fn from(sql: SqlTestimonial) -> Self {
        Testimonial {
            id: sql.id.to_string(),
            name: sql.name,
            testimony: sql.testimony,
            anonymous: sql.anonymous,
            approved: sql.approved,
            created_at: sql.created_at,
            approved_at: sql.approved_at,
        }
    }
}
