//! Repository for the `wins` table.

use async_trait::async_trait;
use itam_core::audit::entity_types;
use itam_core::cache::keys;
use itam_core::dates::parse_date;
use itam_core::error::CoreError;
use itam_core::types::DbId;
use itam_core::validation::check_date;
use sqlx::{FromRow, PgPool};

use super::non_blank;
use crate::entity::Entity;
use crate::models::win::{CreateWin, UpdateWin, Win, WinFilter, WinStats};
use crate::query::{BindValue, FilterBuilder, Table, UpdateBuilder};

const COLUMNS: &str = "id, team_name, hackathon_name, result, prize, award_date, year, link, \
                       sort_order, is_visible, created_at, updated_at";

/// Provides CRUD operations for wins, plus dashboard aggregates.
pub struct WinRepo;

#[async_trait]
impl Entity for WinRepo {
    type Record = Win;
    type Create = CreateWin;
    type Update = UpdateWin;
    type Filter = WinFilter;

    const KIND: &'static str = entity_types::WIN;
    const LABEL: &'static str = "Win";
    const TABLE: Table = Table::simple(
        "wins",
        COLUMNS,
        "year DESC, sort_order DESC, award_date DESC NULLS LAST",
        "is_visible = TRUE",
    );
    const CACHE_KEYS: &'static [&'static str] = &[keys::PUBLIC_WINS];

    fn validate_create(input: &CreateWin) -> Result<(), CoreError> {
        input.validate()
    }

    fn validate_update(input: &UpdateWin) -> Result<(), CoreError> {
        input.validate()
    }

    fn filter(filter: &WinFilter) -> FilterBuilder {
        FilterBuilder::new()
            .search(&["team_name", "hackathon_name"], filter.search.as_deref())
            .eq("year", filter.year)
    }

    fn changes(_existing: &Win, input: &UpdateWin) -> Result<UpdateBuilder, CoreError> {
        let award_date = match input.award_date.as_deref() {
            Some(raw) => Some(BindValue::NullableDate(check_date("award_date", Some(raw))?)),
            None => None,
        };
        Ok(UpdateBuilder::new()
            .set_trimmed("team_name", input.team_name.as_deref())
            .set_trimmed("hackathon_name", input.hackathon_name.as_deref())
            .set_trimmed("result", input.result.as_deref())
            .set("prize", input.prize)
            .set("award_date", award_date)
            .set("year", input.year)
            .set_text_or_null("link", input.link.as_deref())
            .set("sort_order", input.sort_order)
            .set("is_visible", input.is_visible))
    }

    async fn insert(pool: &PgPool, input: &CreateWin) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar::<_, DbId>(
            "INSERT INTO wins \
                (team_name, hackathon_name, result, prize, award_date, year, link, sort_order, is_visible) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9) \
             RETURNING id",
        )
        .bind(input.team_name.trim())
        .bind(input.hackathon_name.trim())
        .bind(input.result.trim())
        .bind(input.prize)
        .bind(input.award_date.as_deref().and_then(parse_date))
        .bind(input.year)
        .bind(non_blank(input.link.as_deref()))
        .bind(input.sort_order)
        .bind(input.is_visible.unwrap_or(true))
        .fetch_one(pool)
        .await
    }
}

#[derive(FromRow)]
struct StatsRow {
    total_wins: i64,
    total_prize: i64,
    current_year_prize: i64,
}

impl WinRepo {
    /// Distinct years that have at least one win, newest first.
    pub async fn years(pool: &PgPool) -> Result<Vec<i32>, sqlx::Error> {
        sqlx::query_scalar::<_, i32>("SELECT DISTINCT year FROM wins ORDER BY year DESC")
            .fetch_all(pool)
            .await
    }

    /// Totals across all wins and for `current_year`.
    pub async fn stats(pool: &PgPool, current_year: i32) -> Result<WinStats, sqlx::Error> {
        let row = sqlx::query_as::<_, StatsRow>(
            "SELECT COUNT(*) AS total_wins, \
                    COALESCE(SUM(prize), 0)::BIGINT AS total_prize, \
                    COALESCE(SUM(prize) FILTER (WHERE year = $1), 0)::BIGINT AS current_year_prize \
             FROM wins",
        )
        .bind(current_year)
        .fetch_one(pool)
        .await?;

        Ok(WinStats {
            total_wins: row.total_wins,
            total_prize: row.total_prize,
            current_year,
            current_year_prize: row.current_year_prize,
        })
    }
}
