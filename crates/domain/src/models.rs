use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::Error;

/// Sentinel display name stored at write time when a submitter opts out.
pub const ANONYMOUS_NAME: &str = "Anonymous";

pub const MAX_COMMENT_LEN: usize = 2000;
pub const MAX_REQUEST_LEN: usize = 2000;
pub const MAX_TESTIMONY_LEN: usize = 1000;

/// What a comment hangs off of: a blog post slug or a prayer id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ParentKind {
    Post,
    Prayer,
}

impl ParentKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ParentKind::Post => "post",
            ParentKind::Prayer => "prayer",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModerationStatus {
    Approved,
    Pending,
    Rejected,
}

impl ModerationStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ModerationStatus::Approved => "approved",
            ModerationStatus::Pending => "pending",
            ModerationStatus::Rejected => "rejected",
        }
    }
}

impl FromStr for ModerationStatus {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "approved" => Ok(ModerationStatus::Approved),
            "pending" => Ok(ModerationStatus::Pending),
            "rejected" => Ok(ModerationStatus::Rejected),
            other => Err(Error::InvalidStatus(other.to_string())),
        }
    }
}

impl fmt::Display for ModerationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: String,
    pub parent_kind: ParentKind,
    pub parent_id: String,
    pub name: String,
    pub email: Option<String>,
    pub content: String,
    pub status: ModerationStatus,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Prayer {
    pub id: String,
    pub name: String,
    pub request: String,
    pub hearts: i64,
    pub anonymous: bool,
    pub created_at: NaiveDateTime,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Testimonial {
    pub id: String,
    pub name: String,
    pub testimony: String,
    pub anonymous: bool,
    pub approved: bool,
    pub created_at: NaiveDateTime,
    pub approved_at: Option<NaiveDateTime>,
}

#[derive(Debug, Clone, Copy, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Stats {
    pub total_prayers: i64,
    pub total_hearts: i64,
    pub total_comments: i64,
}

/// Validated comment input. `require_name` distinguishes blog comments
/// (name mandatory) from nested prayer comments (falls back to the
/// anonymous sentinel).
#[derive(Debug, Clone)]
pub struct NewComment {
    pub name: String,
    pub email: Option<String>,
    pub content: String,
}

impl NewComment {
    pub fn new(
        name: Option<String>,
        email: Option<String>,
        content: String,
        require_name: bool,
    ) -> Result<Self, Error> {
        let content = content.trim().to_string();
        if content.is_empty() {
            return Err(Error::validation("Comment content required"));
        }
        if content.chars().count() > MAX_COMMENT_LEN {
            return Err(Error::validation(format!(
                "Comment is too long (max {} characters)",
                MAX_COMMENT_LEN
            )));
        }

        let name = name.map(|n| n.trim().to_string()).unwrap_or_default();
        let name = if name.is_empty() {
            if require_name {
                return Err(Error::validation("Name required"));
            }
            ANONYMOUS_NAME.to_string()
        } else {
            name
        };

        let email = email
            .map(|e| e.trim().to_string())
            .filter(|e| !e.is_empty());

        Ok(Self {
            name,
            email,
            content,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewPrayer {
    pub name: String,
    pub request: String,
    pub anonymous: bool,
}

impl NewPrayer {
    pub fn new(name: Option<String>, request: String, anonymous: bool) -> Result<Self, Error> {
        let request = request.trim().to_string();
        if request.is_empty() {
            return Err(Error::validation("Prayer request required"));
        }
        if request.chars().count() > MAX_REQUEST_LEN {
            return Err(Error::validation(format!(
                "Prayer request is too long (max {} characters)",
                MAX_REQUEST_LEN
            )));
        }

        let name = name.map(|n| n.trim().to_string()).unwrap_or_default();
        let name = if anonymous || name.is_empty() {
            ANONYMOUS_NAME.to_string()
        } else {
            name
        };

        Ok(Self {
            name,
            request,
            anonymous,
        })
    }
}

#[derive(Debug, Clone)]
pub struct NewTestimonial {
    pub name: String,
    pub testimony: String,
    pub anonymous: bool,
}

impl NewTestimonial {
    pub fn new(name: Option<String>, testimony: String, anonymous: bool) -> Result<Self, Error> {
        let testimony = testimony.trim().to_string();
        if testimony.is_empty() {
            return Err(Error::validation("Testimony content required"));
        }
        if testimony.chars().count() > MAX_TESTIMONY_LEN {
            return Err(Error::validation(format!(
                "Testimony is too long (max {} characters)",
                MAX_TESTIMONY_LEN
            )));
        }

        let name = if anonymous {
            ANONYMOUS_NAME.to_string()
        } else {
            let name = name.map(|n| n.trim().to_string()).unwrap_or_default();
            if name.is_empty() {
                return Err(Error::validation(
                    "Name required for non-anonymous testimonials",
                ));
            }
            name
        };

        Ok(Self {
            name,
            testimony,
            anonymous,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn comment_content_is_trimmed_and_required() {
        let err = NewComment::new(Some("Sam".into()), None, "   \n ".into(), true);
        assert!(matches!(err, Err(Error::Validation(_))));

        let ok = NewComment::new(Some(" Sam ".into()), None, "  Amen  ".into(), true).unwrap();
        assert_eq!(ok.name, "Sam");
        assert_eq!(ok.content, "Amen");
    }

    #[test]
    fn comment_name_falls_back_to_anonymous_when_optional() {
        let ok = NewComment::new(None, None, "Praying for you".into(), false).unwrap();
        assert_eq!(ok.name, ANONYMOUS_NAME);

        let err = NewComment::new(None, None, "hello".into(), true);
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[test]
    fn blank_email_is_dropped() {
        let ok = NewComment::new(Some("Sam".into()), Some("  ".into()), "hi".into(), true).unwrap();
        assert!(ok.email.is_none());
    }

    #[test]
    fn prayer_request_must_be_non_empty() {
        let err = NewPrayer::new(Some("Sam".into()), "".into(), false);
        assert!(matches!(err, Err(Error::Validation(_))));
    }

    #[test]
    fn anonymous_prayer_overwrites_name_at_write_time() {
        let p = NewPrayer::new(Some("Sam".into()), "Pray for healing".into(), true).unwrap();
        assert_eq!(p.name, ANONYMOUS_NAME);

        let p = NewPrayer::new(None, "Pray for healing".into(), false).unwrap();
        assert_eq!(p.name, ANONYMOUS_NAME);
    }

    #[test]
    fn empty_testimony_uses_exact_client_message() {
        let err = NewTestimonial::new(None, "  ".into(), true).unwrap_err();
        assert_eq!(err.to_string(), "Testimony content required");
    }

    #[test]
    fn testimony_length_is_bounded() {
        let long = "x".repeat(MAX_TESTIMONY_LEN + 1);
        let err = NewTestimonial::new(None, long, true);
        assert!(matches!(err, Err(Error::Validation(_))));

        let exact = "x".repeat(MAX_TESTIMONY_LEN);
        assert!(NewTestimonial::new(None, exact, true).is_ok());
    }

    #[test]
    fn non_anonymous_testimonial_requires_name() {
        let err = NewTestimonial::new(Some("  ".into()), "God is good".into(), false);
        assert!(matches!(err, Err(Error::Validation(_))));

        let ok = NewTestimonial::new(Some("Sam".into()), "God is good".into(), false).unwrap();
        assert_eq!(ok.name, "Sam");
    }

    #[test]
    fn invalid_status_is_rejected() {
        assert!(matches!(
            "deleted".parse::<ModerationStatus>(),
            Err(Error::InvalidStatus(_))
        ));
        assert_eq!(
            "rejected".parse::<ModerationStatus>().unwrap(),
            ModerationStatus::Rejected
        );
    }
}
