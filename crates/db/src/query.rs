//! Parameterized SQL fragment builders.
//!
//! Column names always come from `&'static str` literals compiled into each
//! repository; caller input only ever travels as a bound [`BindValue`].
//! Placeholders are numbered in the order values are pushed, so a filter's
//! values can be reused verbatim for both the page query and its count.

use chrono::NaiveDate;
use itam_core::types::{DbId, Timestamp};
use sqlx::postgres::PgArguments;
use sqlx::Arguments;

/// Static description of an entity's storage.
#[derive(Debug, Clone, Copy)]
pub struct Table {
    /// Bare table name used by `UPDATE`/`DELETE`.
    pub name: &'static str,
    /// `FROM` clause for reads; may include joins.
    pub from: &'static str,
    /// Select list matching the record's `FromRow` fields.
    pub columns: &'static str,
    /// Id column as referenced in `from`.
    pub id_column: &'static str,
    pub order_by: &'static str,
    /// Predicate selecting publicly visible rows.
    pub public_filter: &'static str,
    /// Slug column as referenced in `from`, for entities that have one.
    pub slug_column: Option<&'static str>,
}

impl Table {
    /// A single-table entity with no joins and no slug.
    pub const fn simple(
        name: &'static str,
        columns: &'static str,
        order_by: &'static str,
        public_filter: &'static str,
    ) -> Self {
        Self {
            name,
            from: name,
            columns,
            id_column: "id",
            order_by,
            public_filter,
            slug_column: None,
        }
    }

    pub const fn with_slug(mut self, column: &'static str) -> Self {
        self.slug_column = Some(column);
        self
    }
}

/// Typed bind value for dynamically-built queries.
#[derive(Debug, Clone, PartialEq)]
pub enum BindValue {
    BigInt(i64),
    Int(i32),
    Bool(bool),
    Text(String),
    NullableText(Option<String>),
    NullableBigInt(Option<i64>),
    NullableDate(Option<NaiveDate>),
    Date(NaiveDate),
    Timestamp(Timestamp),
    Json(serde_json::Value),
    BigIntArray(Vec<i64>),
    IntArray(Vec<i32>),
}

impl From<i64> for BindValue {
    fn from(v: i64) -> Self {
        BindValue::BigInt(v)
    }
}

impl From<i32> for BindValue {
    fn from(v: i32) -> Self {
        BindValue::Int(v)
    }
}

impl From<bool> for BindValue {
    fn from(v: bool) -> Self {
        BindValue::Bool(v)
    }
}

impl From<String> for BindValue {
    fn from(v: String) -> Self {
        BindValue::Text(v)
    }
}

impl From<&str> for BindValue {
    fn from(v: &str) -> Self {
        BindValue::Text(v.to_string())
    }
}

impl From<NaiveDate> for BindValue {
    fn from(v: NaiveDate) -> Self {
        BindValue::Date(v)
    }
}

impl From<Timestamp> for BindValue {
    fn from(v: Timestamp) -> Self {
        BindValue::Timestamp(v)
    }
}

impl From<serde_json::Value> for BindValue {
    fn from(v: serde_json::Value) -> Self {
        BindValue::Json(v)
    }
}

impl From<Option<DbId>> for BindValue {
    fn from(v: Option<DbId>) -> Self {
        BindValue::NullableBigInt(v)
    }
}

impl From<Option<NaiveDate>> for BindValue {
    fn from(v: Option<NaiveDate>) -> Self {
        BindValue::NullableDate(v)
    }
}

impl From<Option<String>> for BindValue {
    fn from(v: Option<String>) -> Self {
        BindValue::NullableText(v)
    }
}

/// Encode `values` as positional Postgres arguments (`$1`, `$2`, ...).
pub fn arguments(values: &[BindValue]) -> Result<PgArguments, sqlx::Error> {
    let mut args = PgArguments::default();
    for value in values {
        let added = match value {
            BindValue::BigInt(v) => args.add(*v),
            BindValue::Int(v) => args.add(*v),
            BindValue::Bool(v) => args.add(*v),
            BindValue::Text(v) => args.add(v.as_str()),
            BindValue::NullableText(v) => args.add(v.as_deref()),
            BindValue::NullableBigInt(v) => args.add(*v),
            BindValue::NullableDate(v) => args.add(*v),
            BindValue::Date(v) => args.add(*v),
            BindValue::Timestamp(v) => args.add(*v),
            BindValue::Json(v) => args.add(v),
            BindValue::BigIntArray(v) => args.add(v.as_slice()),
            BindValue::IntArray(v) => args.add(v.as_slice()),
        };
        added.map_err(sqlx::Error::Encode)?;
    }
    Ok(args)
}

/// Escape `LIKE` wildcards so user input matches literally.
fn escape_like(term: &str) -> String {
    let mut escaped = String::with_capacity(term.len());
    for c in term.chars() {
        if matches!(c, '\\' | '%' | '_') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Accumulates `WHERE` predicates from optional filters.
///
/// Absent filters contribute nothing.
#[derive(Debug, Default, Clone)]
pub struct FilterBuilder {
    conditions: Vec<String>,
    values: Vec<BindValue>,
}

impl FilterBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    fn push(&mut self, value: BindValue) -> String {
        self.values.push(value);
        format!("${}", self.values.len())
    }

    /// Case-insensitive substring match over one or more columns, OR-ed.
    pub fn search(mut self, columns: &[&'static str], term: Option<&str>) -> Self {
        let term = match term.map(str::trim) {
            Some(t) if !t.is_empty() => t,
            _ => return self,
        };
        let placeholder = self.push(BindValue::Text(format!("%{}%", escape_like(term))));
        let ors: Vec<String> = columns
            .iter()
            .map(|c| format!("{c} ILIKE {placeholder}"))
            .collect();
        self.conditions.push(format!("({})", ors.join(" OR ")));
        self
    }

    pub fn eq<V: Into<BindValue>>(self, column: &'static str, value: Option<V>) -> Self {
        self.compare(column, "=", value)
    }

    pub fn gte<V: Into<BindValue>>(self, column: &'static str, value: Option<V>) -> Self {
        self.compare(column, ">=", value)
    }

    pub fn lt<V: Into<BindValue>>(self, column: &'static str, value: Option<V>) -> Self {
        self.compare(column, "<", value)
    }

    fn compare<V: Into<BindValue>>(
        mut self,
        column: &'static str,
        op: &'static str,
        value: Option<V>,
    ) -> Self {
        if let Some(v) = value {
            let placeholder = self.push(v.into());
            self.conditions.push(format!("{column} {op} {placeholder}"));
        }
        self
    }

    /// A fixed predicate with no bound values.
    pub fn predicate(mut self, sql: &'static str) -> Self {
        self.conditions.push(sql.to_string());
        self
    }

    /// Empty when no filter is active, otherwise starts with `WHERE `.
    pub fn where_clause(&self) -> String {
        if self.conditions.is_empty() {
            String::new()
        } else {
            format!("WHERE {}", self.conditions.join(" AND "))
        }
    }

    pub fn values(&self) -> &[BindValue] {
        &self.values
    }

    /// `LIMIT $n OFFSET $n+1` with the filter values followed by the page values.
    pub fn paginate(&self, limit: i64, offset: i64) -> (String, Vec<BindValue>) {
        let mut values = self.values.clone();
        values.push(BindValue::BigInt(limit));
        values.push(BindValue::BigInt(offset));
        let n = values.len();
        (format!("LIMIT ${} OFFSET ${}", n - 1, n), values)
    }
}

/// Accumulates `SET` assignments for a sparse update.
#[derive(Debug, Default, Clone)]
pub struct UpdateBuilder {
    sets: Vec<String>,
    values: Vec<BindValue>,
}

impl UpdateBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Assign `column` when `value` is present.
    pub fn set<V: Into<BindValue>>(mut self, column: &'static str, value: Option<V>) -> Self {
        if let Some(v) = value {
            self.values.push(v.into());
            self.sets.push(format!("{column} = ${}", self.values.len()));
        }
        self
    }

    /// Assign a required text column, trimmed the same way inserts are.
    pub fn set_trimmed(self, column: &'static str, value: Option<&str>) -> Self {
        self.set(column, value.map(str::trim))
    }

    /// Assign a nullable text column; an empty string clears it.
    pub fn set_text_or_null(self, column: &'static str, value: Option<&str>) -> Self {
        let value = value.map(|v| {
            if v.trim().is_empty() {
                None
            } else {
                Some(v.to_string())
            }
        });
        self.set(column, value.map(BindValue::NullableText))
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }

    /// Column names assigned so far, in order.
    pub fn columns(&self) -> Vec<&str> {
        self.sets
            .iter()
            .filter_map(|s| s.split(" = ").next())
            .collect()
    }

    /// `UPDATE ... SET ..., updated_at = NOW() WHERE id = $n`, or `None`
    /// when nothing was assigned.
    pub fn build(&self, table: &Table, id: DbId) -> Option<(String, Vec<BindValue>)> {
        if self.is_empty() {
            return None;
        }
        let mut values = self.values.clone();
        values.push(BindValue::BigInt(id));
        let sql = format!(
            "UPDATE {} SET {}, updated_at = NOW() WHERE id = ${}",
            table.name,
            self.sets.join(", "),
            values.len()
        );
        Some((sql, values))
    }
}

/// PostgreSQL unique constraint violation (`23505`).
pub fn is_unique_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23505"))
}

/// PostgreSQL foreign key violation (`23503`).
pub fn is_foreign_key_violation(err: &sqlx::Error) -> bool {
    matches!(err, sqlx::Error::Database(db) if db.code().as_deref() == Some("23503"))
}

#[cfg(test)]
mod tests {
    use super::*;

    const WINS: Table = Table::simple("wins", "id, team_name", "sort_order DESC", "is_visible = TRUE");

    #[test]
    fn empty_filter_has_no_where_clause() {
        let filter = FilterBuilder::new()
            .search(&["title"], None)
            .eq::<bool>("is_visible", None);
        assert_eq!(filter.where_clause(), "");
        assert!(filter.values().is_empty());
    }

    #[test]
    fn search_reuses_one_placeholder_across_columns() {
        let filter = FilterBuilder::new().search(&["team_name", "hackathon_name"], Some(" alpha "));
        assert_eq!(
            filter.where_clause(),
            "WHERE (team_name ILIKE $1 OR hackathon_name ILIKE $1)"
        );
        assert_eq!(filter.values(), &[BindValue::Text("%alpha%".into())]);
    }

    #[test]
    fn blank_search_is_ignored() {
        let filter = FilterBuilder::new().search(&["title"], Some("   "));
        assert_eq!(filter.where_clause(), "");
    }

    #[test]
    fn like_wildcards_are_escaped() {
        let filter = FilterBuilder::new().search(&["title"], Some("100%_done"));
        assert_eq!(filter.values(), &[BindValue::Text(r"%100\%\_done%".into())]);
    }

    #[test]
    fn predicates_are_numbered_in_order() {
        let filter = FilterBuilder::new()
            .search(&["name"], Some("x"))
            .eq("year", Some(2024))
            .eq::<bool>("is_visible", None)
            .gte("created_at", Some(NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()));
        assert_eq!(
            filter.where_clause(),
            "WHERE (name ILIKE $1) AND year = $2 AND created_at >= $3"
        );
        assert_eq!(filter.values().len(), 3);
    }

    #[test]
    fn fixed_predicate_binds_nothing() {
        let filter = FilterBuilder::new().predicate("is_visible = TRUE").eq("id", Some(5i64));
        assert_eq!(filter.where_clause(), "WHERE is_visible = TRUE AND id = $1");
    }

    #[test]
    fn paginate_appends_after_filter_values() {
        let filter = FilterBuilder::new().eq("year", Some(2024));
        let (clause, values) = filter.paginate(20, 40);
        assert_eq!(clause, "LIMIT $2 OFFSET $3");
        assert_eq!(
            values,
            vec![BindValue::Int(2024), BindValue::BigInt(20), BindValue::BigInt(40)]
        );
    }

    #[test]
    fn empty_update_builds_nothing() {
        let update = UpdateBuilder::new().set::<String>("team_name", None);
        assert!(update.is_empty());
        assert!(update.build(&WINS, 1).is_none());
    }

    #[test]
    fn update_sets_only_present_fields() {
        let update = UpdateBuilder::new()
            .set("team_name", Some("Beta".to_string()))
            .set::<i32>("prize", None)
            .set("year", Some(2023));
        let (sql, values) = update.build(&WINS, 9).unwrap();
        assert_eq!(
            sql,
            "UPDATE wins SET team_name = $1, year = $2, updated_at = NOW() WHERE id = $3"
        );
        assert_eq!(
            values,
            vec![BindValue::Text("Beta".into()), BindValue::Int(2023), BindValue::BigInt(9)]
        );
        assert_eq!(update.columns(), vec!["team_name", "year"]);
    }

    #[test]
    fn empty_text_clears_nullable_column() {
        let update = UpdateBuilder::new()
            .set_text_or_null("link", Some(""))
            .set_text_or_null("photo", Some("a.png"))
            .set_text_or_null("badge", None);
        let (_, values) = update.build(&WINS, 1).unwrap();
        assert_eq!(
            values,
            vec![
                BindValue::NullableText(None),
                BindValue::NullableText(Some("a.png".into())),
                BindValue::BigInt(1),
            ]
        );
    }

    #[test]
    fn required_text_is_trimmed() {
        let update = UpdateBuilder::new()
            .set_trimmed("team_name", Some("  Beta "))
            .set_trimmed("result", None);
        let (_, values) = update.build(&WINS, 4).unwrap();
        assert_eq!(values, vec![BindValue::Text("Beta".into()), BindValue::BigInt(4)]);
    }
}
