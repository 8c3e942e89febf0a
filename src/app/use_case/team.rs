use super::{ensure, Created};
use crate::{
    app::{resource::organization::Team, service, transform::convert_all, AppContext},
    domain::{
        datatype::ActivityStatus,
        entity::{organization::TEAM_MEMBER_LIMIT, Entity, Ident},
    },
    error::{
        app::ApplicationError,
        resource::{InvalidInputError, NotFoundError},
    },
};

type Result<T> = std::result::Result<T, ApplicationError>;

pub async fn create_team(ctx: &AppContext, dto: Team) -> Result<Created> {
    let team = service::organization::add_team(ctx, dto.into()).await?;
    Ok(Created(team.ident()))
}

pub async fn rename_team(ctx: &AppContext, name: String, team_id: Ident) -> Result<()> {
    ensure!(
        ctx.store.team_exists(team_id).await?,
        NotFoundError::new(format!("Team {team_id} does not exist"))
    );

    service::organization::rename_team(ctx, team_id, name).await?;
    Ok(())
}

pub async fn set_team_status(ctx: &AppContext, team_id: Ident, status: ActivityStatus) -> Result<()> {
    ensure!(
        ctx.store.team_exists(team_id).await?,
        InvalidInputError::new(format!("Team {team_id} does not exist"))
    );
    ensure!(
        ctx.store.find_team_status(team_id).await? != Some(status),
        InvalidInputError::new(format!("Team {team_id} is already {status}"))
    );

    service::organization::set_team_status(ctx, team_id, status).await?;
    Ok(())
}

pub async fn all_teams(ctx: &AppContext) -> Result<Vec<Team>> {
    ensure!(
        !ctx.store.find_all_teams().await?.is_empty(),
        InvalidInputError::new("There are no teams")
    );

    let teams = service::organization::all_teams(ctx).await?;
    Ok(convert_all(teams))
}

pub async fn assign_user_to_team(ctx: &AppContext, team_id: Ident, user_id: Ident) -> Result<()> {
    ensure!(
        ctx.store.user_exists(user_id).await?,
        NotFoundError::new(format!("User {user_id} does not exist"))
    );
    ensure!(
        ctx.store.team_exists(team_id).await?,
        NotFoundError::new(format!("Team {team_id} does not exist"))
    );
    ensure!(
        ctx.store.count_team_members(team_id).await? < TEAM_MEMBER_LIMIT,
        InvalidInputError::new(format!(
            "Team {team_id} already has {TEAM_MEMBER_LIMIT} members"
        ))
    );
    ensure!(
        ctx.store.find_user_team(user_id).await?.is_none(),
        InvalidInputError::new(format!("User {user_id} is already a member of a team"))
    );

    service::organization::add_user_to_team(ctx, team_id, user_id).await?;
    Ok(())
}
