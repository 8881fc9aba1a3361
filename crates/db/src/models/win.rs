//! Hackathon wins.

use chrono::NaiveDate;
use itam_core::csv_import::WinCsvRow;
use itam_core::error::CoreError;
use itam_core::types::{DbId, Timestamp};
use itam_core::validation::{check_date, check_non_negative, check_year, reject_blank, require_text};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

/// A row from the `wins` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Win {
    pub id: DbId,
    pub team_name: String,
    pub hackathon_name: String,
    pub result: String,
    pub prize: i32,
    pub award_date: Option<NaiveDate>,
    pub year: i32,
    pub link: Option<String>,
    pub sort_order: i32,
    pub is_visible: bool,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// DTO for creating a win. `award_date` accepts `DD.MM.YYYY` or `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateWin {
    #[serde(default)]
    pub team_name: String,
    #[serde(default)]
    pub hackathon_name: String,
    #[serde(default)]
    pub result: String,
    #[serde(default)]
    pub prize: i32,
    pub award_date: Option<String>,
    #[serde(default)]
    pub year: i32,
    pub link: Option<String>,
    #[serde(default)]
    pub sort_order: i32,
    pub is_visible: Option<bool>,
}

impl CreateWin {
    pub fn validate(&self) -> Result<(), CoreError> {
        require_text("team_name", &self.team_name)?;
        require_text("hackathon_name", &self.hackathon_name)?;
        require_text("result", &self.result)?;
        check_year(self.year)?;
        check_non_negative("prize", self.prize)?;
        check_date("award_date", self.award_date.as_deref())?;
        Ok(())
    }
}

impl From<WinCsvRow> for CreateWin {
    fn from(row: WinCsvRow) -> Self {
        Self {
            team_name: row.team_name,
            hackathon_name: row.hackathon_name,
            result: row.result,
            prize: row.prize,
            award_date: row.award_date,
            year: row.year,
            link: row.link,
            sort_order: 0,
            is_visible: None,
        }
    }
}

/// DTO for updating a win. Empty `award_date` or `link` clears the column.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateWin {
    pub team_name: Option<String>,
    pub hackathon_name: Option<String>,
    pub result: Option<String>,
    pub prize: Option<i32>,
    pub award_date: Option<String>,
    pub year: Option<i32>,
    pub link: Option<String>,
    pub sort_order: Option<i32>,
    pub is_visible: Option<bool>,
}

impl UpdateWin {
    pub fn validate(&self) -> Result<(), CoreError> {
        reject_blank("team_name", self.team_name.as_deref())?;
        reject_blank("hackathon_name", self.hackathon_name.as_deref())?;
        reject_blank("result", self.result.as_deref())?;
        if let Some(year) = self.year {
            check_year(year)?;
        }
        if let Some(prize) = self.prize {
            check_non_negative("prize", prize)?;
        }
        check_date("award_date", self.award_date.as_deref())?;
        Ok(())
    }
}

/// Query parameters for `GET /wins`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct WinFilter {
    pub search: Option<String>,
    pub year: Option<i32>,
}

/// Dashboard totals.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct WinStats {
    pub total_wins: i64,
    pub total_prize: i64,
    pub current_year: i32,
    pub current_year_prize: i64,
}
