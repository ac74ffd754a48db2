use chrono::Utc;

use domain::{Comment, Error, ModerationStatus, NewComment, ParentKind};

use crate::models::SqlComment;
use crate::repo::{internal, parse_id};
use crate::Db;

const SELECT: &str = "SELECT id, parent_kind, parent_id, name, email, content, status, created_at \
     FROM comments";

impl Db {
    pub(crate) async fn insert_comment(
        &self,
        parent_kind: ParentKind,
        parent_id: &str,
        new: NewComment,
    ) -> Result<Comment, Error> {
        let created_at = Utc::now().naive_utc();
        let status = ModerationStatus::Approved;

        let mut tx = self.pool.begin().await.map_err(internal)?;

        // parent existence is only enforceable for prayers; blog posts
        // live outside the store
        if parent_kind == ParentKind::Prayer {
            let pid = parse_id(parent_id, "Prayer")?;
            let exists: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM prayers WHERE id = ?")
                .bind(pid)
                .fetch_one(&mut *tx)
                .await
                .map_err(internal)?;
            if exists == 0 {
                return Err(Error::NotFound("Prayer"));
            }
        }

        let result = sqlx::query(
            r#"
            INSERT INTO comments (parent_kind, parent_id, name, email, content, status, created_at)
            VALUES (?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(parent_kind.as_str())
        .bind(parent_id)
        .bind(&new.name)
        .bind(&new.email)
        .bind(&new.content)
        .bind(status.as_str())
        .bind(created_at)
        .execute(&mut *tx)
        .await
        .map_err(internal)?;

        tx.commit().await.map_err(internal)?;

        Ok(Comment {
            id: result.last_insert_rowid().to_string(),
            parent_kind,
            parent_id: parent_id.to_string(),
            name: new.name,
            email: new.email,
            content: new.content,
            status,
            created_at,
        })
    }

    pub(crate) async fn select_comments(
        &self,
        parent: Option<(ParentKind, &str)>,
    ) -> Result<Vec<Comment>, Error> {
        let rows: Vec<SqlComment> = match parent {
            Some((kind, id)) => {
                sqlx::query_as(&format!(
                    "{SELECT} WHERE parent_kind = ? AND parent_id = ? \
                     ORDER BY created_at DESC, id DESC"
                ))
                .bind(kind.as_str())
                .bind(id)
                .fetch_all(&self.pool)
                .await
            }
            None => {
                sqlx::query_as(&format!("{SELECT} ORDER BY created_at DESC, id DESC"))
                    .fetch_all(&self.pool)
                    .await
            }
        }
        .map_err(internal)?;

        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub(crate) async fn update_comment_status(
        &self,
        id: &str,
        status: ModerationStatus,
    ) -> Result<Comment, Error> {
        let cid = parse_id(id, "Comment")?;
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let result = sqlx::query("UPDATE comments SET status = ? WHERE id = ?")
            .bind(status.as_str())
            .bind(cid)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Comment"));
        }

        let row: SqlComment = sqlx::query_as(&format!("{SELECT} WHERE id = ?"))
            .bind(cid)
            .fetch_one(&mut *tx)
            .await
            .map_err(internal)?;

        tx.commit().await.map_err(internal)?;
        Ok(row.into())
    }

    pub(crate) async fn remove_comment(&self, id: &str) -> Result<(), Error> {
        let cid = parse_id(id, "Comment")?;
        let result = sqlx::query("DELETE FROM comments WHERE id = ?")
            .bind(cid)
            .execute(&self.pool)
            .await
            .map_err(internal)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Comment"));
        }
        Ok(())
    }
}
