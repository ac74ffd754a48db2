use chrono::{NaiveDateTime, Utc};

use domain::{Error, NewTestimonial, Testimonial};

use crate::models::SqlTestimonial;
use crate::repo::{internal, parse_id};
use crate::Db;

const SELECT: &str = "SELECT id, name, testimony, anonymous, approved, created_at, approved_at \
     FROM testimonials";

impl Db {
    pub(crate) async fn insert_testimonial(
        &self,
        new: NewTestimonial,
    ) -> Result<Testimonial, Error> {
        let created_at = Utc::now().naive_utc();
        let result = sqlx::query(
            r#"
            INSERT INTO testimonials (name, testimony, anonymous, approved, created_at)
            VALUES (?, ?, ?, FALSE, ?)
            "#,
        )
        .bind(&new.name)
        .bind(&new.testimony)
        .bind(new.anonymous)
        .bind(created_at)
        .execute(&self.pool)
        .await
        .map_err(internal)?;

        Ok(Testimonial {
            id: result.last_insert_rowid().to_string(),
            name: new.name,
            testimony: new.testimony,
            anonymous: new.anonymous,
            approved: false,
            created_at,
            approved_at: None,
        })
    }

    pub(crate) async fn select_testimonials(&self) -> Result<Vec<Testimonial>, Error> {
        let rows: Vec<SqlTestimonial> =
            sqlx::query_as(&format!("{SELECT} ORDER BY created_at DESC, id DESC"))
                .fetch_all(&self.pool)
                .await
                .map_err(internal)?;
        Ok(rows.into_iter().map(Into::into).collect())
    }

    pub(crate) async fn mark_testimonial_approved(
        &self,
        id: &str,
        now: NaiveDateTime,
    ) -> Result<Testimonial, Error> {
        let tid = parse_id(id, "Testimonial")?;
        let mut tx = self.pool.begin().await.map_err(internal)?;

        let approved: Option<bool> =
            sqlx::query_scalar("SELECT approved FROM testimonials WHERE id = ?")
                .bind(tid)
                .fetch_optional(&mut *tx)
                .await
                .map_err(internal)?;
        match approved {
            None => return Err(Error::NotFound("Testimonial")),
            Some(true) => return Err(Error::AlreadyApproved),
            Some(false) => {}
        }

        sqlx::query("UPDATE testimonials SET approved = TRUE, approved_at = ? WHERE id = ?")
            .bind(now)
            .bind(tid)
            .execute(&mut *tx)
            .await
            .map_err(internal)?;

        let row: SqlTestimonial = sqlx::query_as(&format!("{SELECT} WHERE id = ?"))
            .bind(tid)
            .fetch_one(&mut *tx)
            .await
            .map_err(internal)?;

        tx.commit().await.map_err(internal)?;
        Ok(row.into())
    }

    pub(crate) async fn remove_testimonial(&self, id: &str) -> Result<(), Error> {
        let tid = parse_id(id, "Testimonial")?;
        let result = sqlx::query("DELETE FROM testimonials WHERE id = ?")
            .bind(tid)
            .execute(&self.pool)
            .await
            .map_err(internal)?;
        if result.rows_affected() == 0 {
            return Err(Error::NotFound("Testimonial"));
        }
        Ok(())
    }
}
