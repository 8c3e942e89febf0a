pub mod controller;
pub mod database;
pub mod memory;
pub mod service;

pub mod router {
    use std::sync::Arc;

    use salvo::{logging::Logger, Router};

    use super::controller::*;
    use crate::app::AppContext;

    fn users(ctx: &AppContext) -> Router {
        // `team/<team_id>` is pushed before `<find_type>/<name>` so it wins
        Router::with_path("users")
            .post(CreateUserController::new(ctx.clone()))
            .push(Router::with_path("team/<team_id>").get(FindUsersByTeamController::new(ctx.clone())))
            .push(Router::with_path("<user_number>").get(FindUserByNumberController::new(ctx.clone())))
            .push(
                Router::with_path("<find_type>/<name>")
                    .get(FindUsersByNameController::new(ctx.clone())),
            )
            .push(Router::with_path("<id>/<status>").put(SetUserStatusController::new(ctx.clone())))
            .push(
                Router::with_path("<id>/<column>/<value>")
                    .put(UpdateUserFieldController::new(ctx.clone())),
            )
    }

    fn teams(ctx: &AppContext) -> Router {
        Router::with_path("teams")
            .post(CreateTeamController::new(ctx.clone()))
            .push(Router::with_path("all").get(ListTeamsController::new(ctx.clone())))
            .push(Router::with_path("update/<name>/<id>").put(RenameTeamController::new(ctx.clone())))
            .push(
                Router::with_path("state/<id>/<status>")
                    .put(SetTeamStatusController::new(ctx.clone())),
            )
            .push(
                Router::with_path("asign/<team_id>/<user_id>")
                    .put(AssignUserToTeamController::new(ctx.clone())),
            )
    }

    fn issues(ctx: &AppContext) -> Router {
        Router::with_path("issues")
            .push(
                Router::with_path("post/<work_item_id>")
                    .post(CreateIssueController::new(ctx.clone())),
            )
            .push(
                Router::with_path("update/<id>/<answer>/<reason>")
                    .put(UpdateIssueController::new(ctx.clone())),
            )
            .push(Router::with_path("all/items").get(ListItemsWithIssueController::new(ctx.clone())))
    }

    fn items(ctx: &AppContext) -> Router {
        Router::with_path("items")
            .post(CreateWorkItemController::new(ctx.clone()))
            .push(Router::with_path("state/<status>").get(ItemsByStatusController::new(ctx.clone())))
            .push(
                Router::with_path("state/<id>/<status>")
                    .put(SetWorkItemStatusController::new(ctx.clone())),
            )
            .push(
                Router::with_path("remove/<issue_id>/<id>")
                    .delete(RemoveWorkItemController::new(ctx.clone())),
            )
            .push(
                Router::with_path("assign/<user_id>/<work_item_id>")
                    .put(AssignWorkItemController::new(ctx.clone())),
            )
            .push(Router::with_path("team/<id>").get(ItemsByTeamController::new(ctx.clone())))
            .push(Router::with_path("user/<id>").get(ItemsByUserController::new(ctx.clone())))
            .push(Router::with_path("search/<text>").get(SearchItemsController::new(ctx.clone())))
    }

    /// Every route, behind request logging and the shared secret check.
    pub fn app(ctx: AppContext, secret: Arc<str>) -> Router {
        Router::new()
            .hoop(Logger)
            .hoop(AuthorizationHoop::new(secret))
            .push(users(&ctx))
            .push(teams(&ctx))
            .push(issues(&ctx))
            .push(items(&ctx))
    }
}
