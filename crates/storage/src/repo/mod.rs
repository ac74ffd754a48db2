use domain::{Error, Stats};

use crate::Db;

mod comments;
mod prayers;
mod testimonials;

pub(crate) fn internal(e: sqlx::Error) -> Error {
    Error::Internal(e.into())
}

/// Identifiers are numeric under the hood; anything unparseable cannot
/// name a stored row.
pub(crate) fn parse_id(id: &str, kind: &'static str) -> Result<i64, Error> {
    id.parse::<i64>().map_err(|_| Error::NotFound(kind))
}

impl Db {
    pub(crate) async fn aggregate_stats(&self) -> Result<Stats, Error> {
        let (total_prayers, total_hearts): (i64, i64) = sqlx::query_as(
            "SELECT COUNT(*), COALESCE(SUM(hearts), 0) FROM prayers",
        )
        .fetch_one(&self.pool)
        .await
        .map_err(internal)?;

        let total_comments: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM comments")
            .fetch_one(&self.pool)
            .await
            .map_err(internal)?;

        Ok(Stats {
            total_prayers,
            total_hearts,
            total_comments,
        })
    }
}
