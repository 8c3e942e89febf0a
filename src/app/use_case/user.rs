use super::{ensure, Created};
use crate::{
    app::{resource::organization::User, service, transform::convert_all, AppContext},
    domain::{
        datatype::{ActivityStatus, UserField, UserNameField},
        entity::{organization::USER_NAME_MIN_LENGTH, Entity, Ident},
    },
    error::{
        app::ApplicationError,
        resource::{InvalidInputError, NotFoundError},
    },
};

type Result<T> = std::result::Result<T, ApplicationError>;

pub async fn create_user(ctx: &AppContext, dto: User) -> Result<Created> {
    ensure!(
        dto.user_name.chars().count() >= USER_NAME_MIN_LENGTH,
        InvalidInputError::new(format!(
            "User name must have at least {USER_NAME_MIN_LENGTH} characters"
        ))
    );
    ensure!(
        dto.password.as_deref().map_or(false, |pwd| !pwd.is_empty()),
        InvalidInputError::new("A password is required")
    );

    let user = service::organization::add_user(ctx, dto.into()).await?;
    Ok(Created(user.ident()))
}

pub async fn update_user(
    ctx: &AppContext,
    user_id: Ident,
    field: UserField,
    value: String,
) -> Result<()> {
    ensure!(
        ctx.store.user_exists(user_id).await?,
        InvalidInputError::new(format!("User {user_id} does not exist"))
    );

    service::organization::update_user(ctx, user_id, field, value).await?;
    Ok(())
}

pub async fn set_user_status(ctx: &AppContext, user_id: Ident, status: ActivityStatus) -> Result<()> {
    ensure!(
        ctx.store.user_exists(user_id).await?,
        InvalidInputError::new(format!("User {user_id} does not exist"))
    );
    ensure!(
        ctx.store.find_user_status(user_id).await? != Some(status),
        InvalidInputError::new(format!("User {user_id} is already {status}"))
    );

    service::organization::set_user_status(ctx, user_id, status).await?;
    Ok(())
}

pub async fn find_by_user_number(ctx: &AppContext, user_number: &str) -> Result<User> {
    ensure!(
        !ctx.store.find_users_by_number(user_number).await?.is_empty(),
        NotFoundError::new(format!("No user has user number {user_number}"))
    );

    let user = service::organization::find_by_user_number(ctx, user_number)
        .await?
        .into_iter()
        .next()
        .ok_or_else(|| NotFoundError::new(format!("No user has user number {user_number}")))?;
    Ok(user.into())
}

pub async fn find_by_name(ctx: &AppContext, field: UserNameField, name: &str) -> Result<Vec<User>> {
    ensure!(
        !ctx.store.find_users_by_any_name(name).await?.is_empty(),
        InvalidInputError::new(format!("No user is named {name}"))
    );

    let users = service::organization::find_by_name(ctx, field, name).await?;
    Ok(convert_all(users))
}

pub async fn find_by_team(ctx: &AppContext, team_id: Ident) -> Result<Vec<User>> {
    ensure!(
        ctx.store.team_has_users(team_id).await?,
        InvalidInputError::new(format!("No user belongs to team {team_id}"))
    );

    let users = service::organization::users_of_team(ctx, team_id).await?;
    Ok(convert_all(users))
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::app::use_case::test_support::context;

    fn user(user_name: &str, user_number: &str) -> User {
        User {
            id: None,
            first_name: "Karl".into(),
            last_name: "Karlsson".into(),
            user_name: user_name.into(),
            password: Some("secure:12345678".into()),
            user_number: user_number.into(),
            status: ActivityStatus::Active,
        }
    }

    fn message(err: ApplicationError) -> String {
        match err {
            ApplicationError::InvalidInput(InvalidInputError(msg))
            | ApplicationError::NotFound(NotFoundError(msg)) => msg,
            other => panic!("unexpected error {other}"),
        }
    }

    #[tokio::test]
    async fn user_name_needs_ten_characters() {
        let ctx = context();

        let err = create_user(&ctx, user("karl12345", "Se1")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
        assert_eq!(message(err), "User name must have at least 10 characters");

        assert!(create_user(&ctx, user("karl123456", "Se2")).await.is_ok());
        assert!(create_user(&ctx, user("karlkarlsson", "Se3")).await.is_ok());
    }

    #[tokio::test]
    async fn user_name_length_counts_characters() {
        let ctx = context();
        assert!(create_user(&ctx, user("åäöåäöåäöå", "Se1")).await.is_ok());
    }

    #[tokio::test]
    async fn password_is_required() {
        let ctx = context();

        let mut missing = user("karlkarlsson", "Se1");
        missing.password = None;
        let err = create_user(&ctx, missing).await.unwrap_err();
        assert_eq!(message(err), "A password is required");

        let mut empty = user("karlkarlsson", "Se1");
        empty.password = Some(String::new());
        let err = create_user(&ctx, empty).await.unwrap_err();
        assert_eq!(message(err), "A password is required");

        assert!(ctx.store.find_users_by_number("Se1").await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn stored_password_is_hashed() {
        let ctx = context();
        let Created(id) = create_user(&ctx, user("karlkarlsson", "Se1")).await.unwrap();

        let stored = ctx.store.find_user(id).await.unwrap().unwrap();
        assert_eq!(stored.password(), "plain$secure:12345678");
    }

    #[tokio::test]
    async fn duplicate_user_number_conflicts() {
        let ctx = context();
        create_user(&ctx, user("karlkarlsson", "Se1")).await.unwrap();

        let err = create_user(&ctx, user("annaandersson", "Se1")).await.unwrap_err();
        assert!(matches!(err, ApplicationError::Conflict(_)));
    }

    #[tokio::test]
    async fn status_must_change() {
        let ctx = context();
        let Created(id) = create_user(&ctx, user("karlkarlsson", "Se1")).await.unwrap();

        let err = set_user_status(&ctx, id, ActivityStatus::Active).await.unwrap_err();
        assert_eq!(message(err), format!("User {id} is already Active"));

        set_user_status(&ctx, id, ActivityStatus::Inactive).await.unwrap();
        set_user_status(&ctx, id, ActivityStatus::Active).await.unwrap();
    }

    #[tokio::test]
    async fn missing_user_is_checked_before_status() {
        let ctx = context();
        let err = set_user_status(&ctx, 99, ActivityStatus::Active).await.unwrap_err();
        assert_eq!(message(err), "User 99 does not exist");
    }

    #[tokio::test]
    async fn update_replaces_one_column() {
        let ctx = context();
        let Created(id) = create_user(&ctx, user("karlkarlsson", "Se1")).await.unwrap();

        update_user(&ctx, id, UserField::LastName, "Lind".into()).await.unwrap();
        update_user(&ctx, id, UserField::Password, "other".into()).await.unwrap();

        let stored = ctx.store.find_user(id).await.unwrap().unwrap();
        assert_eq!(stored.last_name(), "Lind");
        assert_eq!(stored.first_name(), "Karl");
        assert_eq!(stored.password(), "plain$other");

        let err = update_user(&ctx, id + 1, UserField::LastName, "x".into())
            .await
            .unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn find_by_number_misses_with_not_found() {
        let ctx = context();
        create_user(&ctx, user("karlkarlsson", "Se29377")).await.unwrap();

        let found = find_by_user_number(&ctx, "Se29377").await.unwrap();
        assert_eq!(found.user_name, "karlkarlsson");

        let err = find_by_user_number(&ctx, "Se0").await.unwrap_err();
        assert!(matches!(err, ApplicationError::NotFound(_)));
    }

    #[tokio::test]
    async fn find_by_name_guards_on_any_name_column() {
        let ctx = context();
        create_user(&ctx, user("karlkarlsson", "Se1")).await.unwrap();

        let by_first = find_by_name(&ctx, UserNameField::FirstName, "Karl").await.unwrap();
        assert_eq!(by_first.len(), 1);

        // the guard passes on the user name, the search itself looks at last names
        let by_last = find_by_name(&ctx, UserNameField::LastName, "karlkarlsson")
            .await
            .unwrap();
        assert!(by_last.is_empty());

        let err = find_by_name(&ctx, UserNameField::FirstName, "Nobody").await.unwrap_err();
        assert!(matches!(err, ApplicationError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn find_by_team_requires_members() {
        let ctx = context();
        let err = find_by_team(&ctx, 1).await.unwrap_err();
        assert_eq!(message(err), "No user belongs to team 1");
    }

    #[tokio::test]
    async fn responses_never_carry_password_json() {
        let ctx = context();
        create_user(&ctx, user("karlkarlsson", "Se1")).await.unwrap();

        let found = find_by_user_number(&ctx, "Se1").await.unwrap();
        let json = serde_json::to_value(&found).unwrap();
        assert!(json.get("password").is_none());
        assert_eq!(json["userName"], "karlkarlsson");
    }
}
