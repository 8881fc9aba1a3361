//! Repository for the `club_images` table.

use itam_core::types::DbId;
use sqlx::PgPool;

use crate::models::club::ClubImage;

pub struct ClubImageRepo;

impl ClubImageRepo {
    /// Images of every club in `club_ids`, in gallery order.
    pub async fn for_clubs(pool: &PgPool, club_ids: &[DbId]) -> Result<Vec<ClubImage>, sqlx::Error> {
        sqlx::query_as::<_, ClubImage>(
            "SELECT id, club_id, image_url, sort_order FROM club_images \
             WHERE club_id = ANY($1) \
             ORDER BY club_id, sort_order, id",
        )
        .bind(club_ids)
        .fetch_all(pool)
        .await
    }

    /// Replace a club's gallery. `sort_order` follows the order of `urls`;
    /// blank entries are dropped.
    pub async fn replace_for_club(
        pool: &PgPool,
        club_id: DbId,
        urls: &[String],
    ) -> Result<(), sqlx::Error> {
        let urls: Vec<&str> = urls
            .iter()
            .map(|u| u.trim())
            .filter(|u| !u.is_empty())
            .collect();

        sqlx::query("DELETE FROM club_images WHERE club_id = $1")
            .bind(club_id)
            .execute(pool)
            .await?;

        if !urls.is_empty() {
            sqlx::query(
                "INSERT INTO club_images (club_id, image_url, sort_order) \
                 SELECT $1, u.url, (u.ord - 1)::INTEGER \
                 FROM UNNEST($2::TEXT[]) WITH ORDINALITY AS u(url, ord)",
            )
            .bind(club_id)
            .bind(urls.as_slice())
            .execute(pool)
            .await?;
        }
        Ok(())
    }
}
