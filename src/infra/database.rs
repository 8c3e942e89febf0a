pub mod connection {
    use std::time::Duration;

    pub async fn create_sqlx_pool(database_url: &str) -> Result<sqlx::PgPool, sqlx::Error> {
        sqlx::postgres::PgPoolOptions::new()
            .min_connections(1)
            .max_connections(5)
            .acquire_timeout(Duration::from_millis(1000))
            .idle_timeout(Duration::from_millis(1000 * 30))
            .max_lifetime(Duration::from_millis(1000 * 10))
            .connect(database_url)
            .await
    }
}

pub mod repository {
    use std::str::FromStr;

    use async_trait::async_trait;
    use futures::TryStreamExt;
    use sqlx::PgPool;

    use crate::{
        domain::{
            datatype::{ActivityStatus, UserNameField, WorkItemStatus},
            entity::{
                organization::{Team, TeamState, User, UserState},
                tracking::{Issue, IssueState, WorkItem, WorkItemState},
                Entity, Ident,
            },
            repository::{
                IssueRepository, RepoResult, TeamRepository, UserRepository, WorkItemRepository,
            },
        },
        error::persistence::PersistenceError,
    };

    macro_rules! select_user {
        ($filter:literal) => {
            concat!(
                "SELECT id, first_name, last_name, user_name, password, user_number, status, team_id ",
                "FROM tracker.users ",
                $filter,
                " ORDER BY id"
            )
        };
    }

    macro_rules! select_team {
        ($filter:literal) => {
            concat!("SELECT id, name, status FROM tracker.teams ", $filter, " ORDER BY id")
        };
    }

    macro_rules! select_work_item {
        ($filter:literal) => {
            concat!(
                "SELECT id, title, description, status, user_id, team_id ",
                "FROM tracker.work_items ",
                $filter,
                " ORDER BY id"
            )
        };
    }

    fn parse_status<T: FromStr>(raw: Option<String>) -> RepoResult<Option<T>> {
        raw.map(|raw| raw.parse().map_err(|_| PersistenceError::DecodeData))
            .transpose()
    }

    fn expect_affected(rows: u64) -> RepoResult<()> {
        if rows == 0 {
            return Err(PersistenceError::NotFound);
        }
        Ok(())
    }

    /// Postgres backed store over the `tracker` schema.
    #[derive(Debug, Clone)]
    pub struct PgStore {
        pool: PgPool,
    }

    impl PgStore {
        pub fn new(pool: PgPool) -> Self {
            Self { pool }
        }
    }

    #[async_trait]
    impl UserRepository for PgStore {
        async fn user_exists(&self, id: Ident) -> RepoResult<bool> {
            Ok(
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tracker.users WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?,
            )
        }

        async fn find_user(&self, id: Ident) -> RepoResult<Option<User>> {
            Ok(sqlx::query_as(select_user!("WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?)
        }

        async fn find_user_status(&self, id: Ident) -> RepoResult<Option<ActivityStatus>> {
            let raw: Option<String> =
                sqlx::query_scalar("SELECT status FROM tracker.users WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            parse_status(raw)
        }

        async fn find_user_team(&self, id: Ident) -> RepoResult<Option<Ident>> {
            let team: Option<Option<Ident>> =
                sqlx::query_scalar("SELECT team_id FROM tracker.users WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            Ok(team.flatten())
        }

        async fn find_users_by_number(&self, user_number: &str) -> RepoResult<Vec<User>> {
            Ok(sqlx::query_as(select_user!("WHERE user_number = $1"))
                .bind(user_number)
                .fetch(&self.pool)
                .try_collect()
                .await?)
        }

        async fn find_users_by_any_name(&self, value: &str) -> RepoResult<Vec<User>> {
            Ok(sqlx::query_as(select_user!(
                "WHERE first_name = $1 OR last_name = $1 OR user_name = $1"
            ))
            .bind(value)
            .fetch(&self.pool)
            .try_collect()
            .await?)
        }

        async fn find_users_by_name(
            &self,
            field: UserNameField,
            value: &str,
        ) -> RepoResult<Vec<User>> {
            let query = match field {
                UserNameField::FirstName => select_user!("WHERE first_name = $1"),
                UserNameField::LastName => select_user!("WHERE last_name = $1"),
                UserNameField::UserName => select_user!("WHERE user_name = $1"),
            };
            Ok(sqlx::query_as(query)
                .bind(value)
                .fetch(&self.pool)
                .try_collect()
                .await?)
        }

        async fn find_users_by_team(&self, team_id: Ident) -> RepoResult<Vec<User>> {
            Ok(sqlx::query_as(select_user!("WHERE team_id = $1"))
                .bind(team_id)
                .fetch(&self.pool)
                .try_collect()
                .await?)
        }

        async fn team_has_users(&self, team_id: Ident) -> RepoResult<bool> {
            Ok(sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM tracker.users WHERE team_id = $1)",
            )
            .bind(team_id)
            .fetch_one(&self.pool)
            .await?)
        }

        async fn insert_user(&self, user: UserState) -> RepoResult<User> {
            let id: Ident = sqlx::query_scalar(concat!(
                "INSERT INTO tracker.users ",
                "(first_name, last_name, user_name, password, user_number, status, team_id) ",
                "VALUES ($1, $2, $3, $4, $5, $6, $7) RETURNING id"
            ))
            .bind(&user.first_name)
            .bind(&user.last_name)
            .bind(&user.user_name)
            .bind(&user.password)
            .bind(&user.user_number)
            .bind(user.status.as_str())
            .bind(user.team_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(User::restore(id, user))
        }

        async fn save_user(&self, user: &User) -> RepoResult<()> {
            let result = sqlx::query(concat!(
                "UPDATE tracker.users SET first_name = $2, last_name = $3, user_name = $4, ",
                "password = $5, user_number = $6, status = $7, team_id = $8 WHERE id = $1"
            ))
            .bind(user.ident())
            .bind(user.first_name())
            .bind(user.last_name())
            .bind(user.user_name())
            .bind(user.password())
            .bind(user.user_number())
            .bind(user.status().as_str())
            .bind(user.team_id())
            .execute(&self.pool)
            .await?;

            expect_affected(result.rows_affected())
        }
    }

    #[async_trait]
    impl TeamRepository for PgStore {
        async fn team_exists(&self, id: Ident) -> RepoResult<bool> {
            Ok(
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tracker.teams WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?,
            )
        }

        async fn find_team(&self, id: Ident) -> RepoResult<Option<Team>> {
            Ok(sqlx::query_as(select_team!("WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?)
        }

        async fn find_team_status(&self, id: Ident) -> RepoResult<Option<ActivityStatus>> {
            let raw: Option<String> =
                sqlx::query_scalar("SELECT status FROM tracker.teams WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            parse_status(raw)
        }

        async fn find_all_teams(&self) -> RepoResult<Vec<Team>> {
            Ok(sqlx::query_as(select_team!(""))
                .fetch(&self.pool)
                .try_collect()
                .await?)
        }

        async fn count_team_members(&self, id: Ident) -> RepoResult<i64> {
            Ok(
                sqlx::query_scalar("SELECT COUNT(*) FROM tracker.users WHERE team_id = $1")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?,
            )
        }

        async fn insert_team(&self, team: TeamState) -> RepoResult<Team> {
            let id: Ident = sqlx::query_scalar(
                "INSERT INTO tracker.teams (name, status) VALUES ($1, $2) RETURNING id",
            )
            .bind(&team.name)
            .bind(team.status.as_str())
            .fetch_one(&self.pool)
            .await?;

            Ok(Team::restore(id, team))
        }

        async fn save_team(&self, team: &Team) -> RepoResult<()> {
            let result =
                sqlx::query("UPDATE tracker.teams SET name = $2, status = $3 WHERE id = $1")
                    .bind(team.ident())
                    .bind(team.name())
                    .bind(team.status().as_str())
                    .execute(&self.pool)
                    .await?;

            expect_affected(result.rows_affected())
        }
    }

    #[async_trait]
    impl WorkItemRepository for PgStore {
        async fn work_item_exists(&self, id: Ident) -> RepoResult<bool> {
            Ok(sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM tracker.work_items WHERE id = $1)",
            )
            .bind(id)
            .fetch_one(&self.pool)
            .await?)
        }

        async fn find_work_item(&self, id: Ident) -> RepoResult<Option<WorkItem>> {
            Ok(sqlx::query_as(select_work_item!("WHERE id = $1"))
                .bind(id)
                .fetch_optional(&self.pool)
                .await?)
        }

        async fn find_work_item_status(&self, id: Ident) -> RepoResult<Option<WorkItemStatus>> {
            let raw: Option<String> =
                sqlx::query_scalar("SELECT status FROM tracker.work_items WHERE id = $1")
                    .bind(id)
                    .fetch_optional(&self.pool)
                    .await?;
            parse_status(raw)
        }

        async fn find_work_items_by_status(
            &self,
            status: WorkItemStatus,
        ) -> RepoResult<Vec<WorkItem>> {
            Ok(sqlx::query_as(select_work_item!("WHERE status = $1"))
                .bind(status.as_str())
                .fetch(&self.pool)
                .try_collect()
                .await?)
        }

        async fn find_work_items_by_team(&self, team_id: Ident) -> RepoResult<Vec<WorkItem>> {
            Ok(sqlx::query_as(select_work_item!("WHERE team_id = $1"))
                .bind(team_id)
                .fetch(&self.pool)
                .try_collect()
                .await?)
        }

        async fn find_work_items_by_user(&self, user_id: Ident) -> RepoResult<Vec<WorkItem>> {
            Ok(sqlx::query_as(select_work_item!("WHERE user_id = $1"))
                .bind(user_id)
                .fetch(&self.pool)
                .try_collect()
                .await?)
        }

        async fn search_work_items(&self, text: &str) -> RepoResult<Vec<WorkItem>> {
            // strpos keeps `%` and `_` in the text literal
            Ok(sqlx::query_as(select_work_item!(
                "WHERE strpos(lower(description), lower($1)) > 0"
            ))
            .bind(text)
            .fetch(&self.pool)
            .try_collect()
            .await?)
        }

        async fn find_work_items_with_issue(&self) -> RepoResult<Vec<WorkItem>> {
            Ok(sqlx::query_as(select_work_item!(
                "WHERE id IN (SELECT work_item_id FROM tracker.issues)"
            ))
            .fetch(&self.pool)
            .try_collect()
            .await?)
        }

        async fn count_work_items_by_user(&self, user_id: Ident) -> RepoResult<i64> {
            Ok(
                sqlx::query_scalar("SELECT COUNT(*) FROM tracker.work_items WHERE user_id = $1")
                    .bind(user_id)
                    .fetch_one(&self.pool)
                    .await?,
            )
        }

        async fn any_work_item_with_team(&self) -> RepoResult<bool> {
            Ok(sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM tracker.work_items WHERE team_id IS NOT NULL)",
            )
            .fetch_one(&self.pool)
            .await?)
        }

        async fn any_work_item_with_user(&self) -> RepoResult<bool> {
            Ok(sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM tracker.work_items WHERE user_id IS NOT NULL)",
            )
            .fetch_one(&self.pool)
            .await?)
        }

        async fn insert_work_item(&self, item: WorkItemState) -> RepoResult<WorkItem> {
            let id: Ident = sqlx::query_scalar(concat!(
                "INSERT INTO tracker.work_items (title, description, status, user_id, team_id) ",
                "VALUES ($1, $2, $3, $4, $5) RETURNING id"
            ))
            .bind(&item.title)
            .bind(&item.description)
            .bind(item.status.as_str())
            .bind(item.user_id)
            .bind(item.team_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(WorkItem::restore(id, item))
        }

        async fn save_work_item(&self, item: &WorkItem) -> RepoResult<()> {
            let result = sqlx::query(concat!(
                "UPDATE tracker.work_items SET title = $2, description = $3, status = $4, ",
                "user_id = $5, team_id = $6 WHERE id = $1"
            ))
            .bind(item.ident())
            .bind(item.title())
            .bind(item.description())
            .bind(item.status().as_str())
            .bind(item.user_id())
            .bind(item.team_id())
            .execute(&self.pool)
            .await?;

            expect_affected(result.rows_affected())
        }

        async fn delete_work_item(&self, id: Ident) -> RepoResult<()> {
            // issues go with it through ON DELETE CASCADE
            sqlx::query("DELETE FROM tracker.work_items WHERE id = $1")
                .bind(id)
                .execute(&self.pool)
                .await?;
            Ok(())
        }
    }

    #[async_trait]
    impl IssueRepository for PgStore {
        async fn issue_exists(&self, id: Ident) -> RepoResult<bool> {
            Ok(
                sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM tracker.issues WHERE id = $1)")
                    .bind(id)
                    .fetch_one(&self.pool)
                    .await?,
            )
        }

        async fn find_issue(&self, id: Ident) -> RepoResult<Option<Issue>> {
            Ok(sqlx::query_as(
                "SELECT id, title, reason, answer, work_item_id FROM tracker.issues WHERE id = $1",
            )
            .bind(id)
            .fetch_optional(&self.pool)
            .await?)
        }

        async fn any_issue_with_work_item(&self) -> RepoResult<bool> {
            Ok(sqlx::query_scalar(
                "SELECT EXISTS (SELECT 1 FROM tracker.issues WHERE work_item_id IS NOT NULL)",
            )
            .fetch_one(&self.pool)
            .await?)
        }

        async fn insert_issue(&self, issue: IssueState) -> RepoResult<Issue> {
            let id: Ident = sqlx::query_scalar(concat!(
                "INSERT INTO tracker.issues (title, reason, answer, work_item_id) ",
                "VALUES ($1, $2, $3, $4) RETURNING id"
            ))
            .bind(&issue.title)
            .bind(&issue.reason)
            .bind(&issue.answer)
            .bind(issue.work_item_id)
            .fetch_one(&self.pool)
            .await?;

            Ok(Issue::restore(id, issue))
        }

        async fn save_issue(&self, issue: &Issue) -> RepoResult<()> {
            let result = sqlx::query(concat!(
                "UPDATE tracker.issues SET title = $2, reason = $3, answer = $4, work_item_id = $5 ",
                "WHERE id = $1"
            ))
            .bind(issue.ident())
            .bind(issue.title())
            .bind(issue.reason())
            .bind(issue.answer())
            .bind(issue.work_item_id())
            .execute(&self.pool)
            .await?;

            expect_affected(result.rows_affected())
        }
    }
}
