use chrono::Utc;

use domain::{Error, NewPrayer, ParentKind, Prayer};

use crate::models::SqlPrayer;
use crate::repo::{internal, parse_id};
use crate::Db;

const SELECT: &str = "SELECT id, name, request, hearts, anonymous, created_at FROM prayers";

impl Db {
    pub(crate) async fn insert_prayer(&self, new: NewPrayer) -> Result<Prayer, Error> {
        let created_at = Utc::now().naive_utc();
        let result = sqlx::query(
            r#"
            INSERT INTO prayers (name, request, hearts, anonymous, created_at)
            VALUES (?, ?, 0, ?, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.request)
        .bind(new.anonymous)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        Ok(Prayer {
            id: result.last_insert_rowid().to_string(),
            name: new.name,
            request: new.request,
            hearts: 0,
            anonymous: new.anonymous,
            created_at,
        })
    }

    pub(crate) async fn select_prayers(&self) -> Result<Vec<Prayer>, Error> {
        let rows: Vec<SqlPrayer> =
            sqlx::query_as(&format!("{SELECT} ORDER BY created_at DESC, id DESC"))
                .fetch_all(&self.pool)
                .await
                .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub(crate) async fn select_prayer(&self, id: &str) -> Result<Prayer, Error> {
        let pid = parse_id(id, "Prayer")?;
        let row: Option<SqlPrayer> = sqlx::query_as(&format!("{SELECT} WHERE id = ?"))
            .bind(pid)
            .fetch_optional(&self.pool)
            .await
            .map_err(internal)?;
        row.map(Into::into).ok_or(Error::NotFound("Prayer"))
    }

    pub(crate) async fn increment_hearts(&self, id: &str) -> Result<Prayer, Error> {
        let pid = parse_id(id, "Prayer")?;
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let result = sqlx::query("UPDATE prayers SET hearts = hearts + 1 WHERE id = ?")
            .bind(pid)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Prayer"));
        }

        let row: SqlPrayer = sqlx::query_as(&format!("{SELECT} WHERE id = ?"))
            .bind(pid)
            .fetch_one(&mut *tx)
            .await
            .map_err(internal)?;

        tx.commit().await.map_err(internal)?;
        Ok(row.into())
    }

    pub(crate) async fn remove_prayer(&self, id: &str) -> Result<(), Error> {
        let pid = parse_id(id, "Prayer")?;
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let result = sqlx::query("DELETE FROM prayers WHERE id = ?")
            .bind(pid)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Prayer"));
        }

        sqlx::query("DELETE FROM comments WHERE parent_kind = ? AND parent_id = ?")
            .bind(ParentKind::Prayer.as_str())
            .bind(id)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;

        tx.commit().await.map_err(internal)?;
        Ok(())
    }
}
