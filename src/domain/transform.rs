use std::str::FromStr;

use sqlx::{postgres::PgRow, FromRow, Row};

use super::entity::{
    organization::{Team, TeamState, User, UserState},
    tracking::{Issue, IssueState, WorkItem, WorkItemState},
    EntityCtl,
};

fn decode_variant<T>(row: &PgRow, column: &str) -> Result<T, sqlx::Error>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    let raw: String = row.try_get(column)?;
    raw.parse().map_err(|err: T::Err| sqlx::Error::ColumnDecode {
        index: column.into(),
        source: Box::new(err),
    })
}

impl<'r> FromRow<'r, PgRow> for UserState {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            first_name: row.try_get("first_name")?,
            last_name: row.try_get("last_name")?,
            user_name: row.try_get("user_name")?,
            password: row.try_get("password")?,
            user_number: row.try_get("user_number")?,
            status: decode_variant(row, "status")?,
            team_id: row.try_get("team_id")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for TeamState {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            name: row.try_get("name")?,
            status: decode_variant(row, "status")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for WorkItemState {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            title: row.try_get("title")?,
            description: row.try_get("description")?,
            status: decode_variant(row, "status")?,
            user_id: row.try_get("user_id")?,
            team_id: row.try_get("team_id")?,
        })
    }
}

impl<'r> FromRow<'r, PgRow> for IssueState {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        Ok(Self {
            title: row.try_get("title")?,
            reason: row.try_get("reason")?,
            answer: row.try_get("answer")?,
            work_item_id: row.try_get("work_item_id")?,
        })
    }
}

fn restore<'r, State>(row: &'r PgRow) -> Result<EntityCtl<State>, sqlx::Error>
where
    State: FromRow<'r, PgRow>,
{
    Ok(EntityCtl::restore(row.try_get("id")?, State::from_row(row)?))
}

impl<'r> FromRow<'r, PgRow> for User {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        restore(row)
    }
}

impl<'r> FromRow<'r, PgRow> for Team {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        restore(row)
    }
}

impl<'r> FromRow<'r, PgRow> for WorkItem {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        restore(row)
    }
}

impl<'r> FromRow<'r, PgRow> for Issue {
    fn from_row(row: &'r PgRow) -> Result<Self, sqlx::Error> {
        restore(row)
    }
}
