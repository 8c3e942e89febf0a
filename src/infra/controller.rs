use std::{str::FromStr, sync::Arc};

use async_trait::async_trait;
use salvo::{
    http::{header, HeaderValue, StatusCode},
    writer::Json,
    Depot, FlowCtrl, Handler, Request, Response,
};

use crate::{
    app::{
        resource::{
            organization::{Team, User},
            tracking::{Issue, WorkItem},
        },
        use_case::{self, Created},
        AppContext,
    },
    domain::{
        datatype::{ActivityStatus, UserField, UserNameField, WorkItemStatus},
        entity::Ident,
    },
    error::{
        app::ApplicationError, http::BadRequest, resource::InvalidInputError,
        security::UnauthorizedError,
    },
};

macro_rules! map_res_err {
    ($result:expr, $response:ident) => {
        match $result {
            Err(err) => {
                let err = ApplicationError::from(err);
                log_failure(&err);
                $response.render(err);
                return;
            }
            Ok(ok) => ok,
        }
    };
}

/// Declares a handler holding the application context.
///
/// The body sees the context, request and response under the given names and
/// is responsible for the whole response.
macro_rules! controller {
    ($name:ident, |$ctx:ident, $req:ident, $res:ident| $body:block) => {
        pub struct $name {
            ctx: AppContext,
        }

        impl $name {
            pub fn new(ctx: AppContext) -> Self {
                Self { ctx }
            }
        }

        #[async_trait]
        impl Handler for $name {
            async fn handle(
                &self,
                $req: &mut Request,
                _: &mut Depot,
                $res: &mut Response,
                _: &mut FlowCtrl,
            ) {
                let $ctx = &self.ctx;
                $body
            }
        }
    };
}

fn log_failure(err: &ApplicationError) {
    if err.status_code().is_server_error() {
        tracing::error!(error = %err, "request failed");
    } else {
        tracing::debug!(error = %err, "request rejected");
    }
}

/// Reads a path parameter as `T`.
///
/// Unparseable values are reported as invalid input before any guard runs.
fn param<T: FromStr>(req: &Request, name: &str) -> Result<T, InvalidInputError> {
    let raw = req
        .params()
        .get(name)
        .ok_or_else(|| InvalidInputError::new(format!("Missing {name}")))?;
    raw.parse()
        .map_err(|_| InvalidInputError::new(format!("Invalid {name} '{raw}'")))
}

fn param_string(req: &Request, name: &str) -> Result<String, InvalidInputError> {
    param(req, name)
}

fn param_ident(req: &Request, name: &str) -> Result<Ident, InvalidInputError> {
    param(req, name)
}

fn render_created(req: &Request, res: &mut Response, created: Created) {
    let Created(id) = created;
    let location = format!("{}/{id}", req.uri().path().trim_end_matches('/'));
    match HeaderValue::from_str(&location) {
        Ok(value) => {
            res.headers_mut().insert(header::LOCATION, value);
        }
        Err(err) => tracing::warn!(%location, %err, "location header not representable"),
    }
    res.set_status_code(StatusCode::CREATED);
}

fn render_no_content(res: &mut Response) {
    res.set_status_code(StatusCode::NO_CONTENT);
}

fn render_json<T: serde::Serialize + Send>(res: &mut Response, body: T) {
    res.render(Json(body));
    res.set_status_code(StatusCode::OK);
}

// users

controller!(CreateUserController, |ctx, req, res| {
    let result: Result<User, _> = req.parse_body().await.map_err(BadRequest::from);
    let dto = map_res_err!(result, res);

    let created = map_res_err!(use_case::user::create_user(ctx, dto).await, res);
    render_created(req, res, created);
});

controller!(UpdateUserFieldController, |ctx, req, res| {
    let id = map_res_err!(param_ident(req, "id"), res);
    let field: UserField = map_res_err!(param(req, "column"), res);
    let value = map_res_err!(param_string(req, "value"), res);

    map_res_err!(use_case::user::update_user(ctx, id, field, value).await, res);
    render_no_content(res);
});

controller!(SetUserStatusController, |ctx, req, res| {
    let id = map_res_err!(param_ident(req, "id"), res);
    let status: ActivityStatus = map_res_err!(param(req, "status"), res);

    map_res_err!(use_case::user::set_user_status(ctx, id, status).await, res);
    render_no_content(res);
});

controller!(FindUserByNumberController, |ctx, req, res| {
    let user_number = map_res_err!(param_string(req, "user_number"), res);

    let user = map_res_err!(
        use_case::user::find_by_user_number(ctx, &user_number).await,
        res
    );
    render_json(res, user);
});

controller!(FindUsersByNameController, |ctx, req, res| {
    let field: UserNameField = map_res_err!(param(req, "find_type"), res);
    let name = map_res_err!(param_string(req, "name"), res);

    let users = map_res_err!(use_case::user::find_by_name(ctx, field, &name).await, res);
    render_json(res, users);
});

controller!(FindUsersByTeamController, |ctx, req, res| {
    let team_id = map_res_err!(param_ident(req, "team_id"), res);

    let users = map_res_err!(use_case::user::find_by_team(ctx, team_id).await, res);
    render_json(res, users);
});

// teams

controller!(CreateTeamController, |ctx, req, res| {
    let result: Result<Team, _> = req.parse_body().await.map_err(BadRequest::from);
    let dto = map_res_err!(result, res);

    let created = map_res_err!(use_case::team::create_team(ctx, dto).await, res);
    render_created(req, res, created);
});

controller!(RenameTeamController, |ctx, req, res| {
    let name = map_res_err!(param_string(req, "name"), res);
    let id = map_res_err!(param_ident(req, "id"), res);

    map_res_err!(use_case::team::rename_team(ctx, name, id).await, res);
    render_no_content(res);
});

controller!(SetTeamStatusController, |ctx, req, res| {
    let id = map_res_err!(param_ident(req, "id"), res);
    let status: ActivityStatus = map_res_err!(param(req, "status"), res);

    map_res_err!(use_case::team::set_team_status(ctx, id, status).await, res);
    render_no_content(res);
});

controller!(ListTeamsController, |ctx, _req, res| {
    let teams = map_res_err!(use_case::team::all_teams(ctx).await, res);
    render_json(res, teams);
});

controller!(AssignUserToTeamController, |ctx, req, res| {
    let team_id = map_res_err!(param_ident(req, "team_id"), res);
    let user_id = map_res_err!(param_ident(req, "user_id"), res);

    map_res_err!(
        use_case::team::assign_user_to_team(ctx, team_id, user_id).await,
        res
    );
    render_no_content(res);
});

// issues

controller!(CreateIssueController, |ctx, req, res| {
    let work_item_id = map_res_err!(param_ident(req, "work_item_id"), res);
    let result: Result<Issue, _> = req.parse_body().await.map_err(BadRequest::from);
    let dto = map_res_err!(result, res);

    let created = map_res_err!(
        use_case::issue::create_issue(ctx, work_item_id, dto).await,
        res
    );
    render_created(req, res, created);
});

controller!(UpdateIssueController, |ctx, req, res| {
    let id = map_res_err!(param_ident(req, "id"), res);
    let answer = map_res_err!(param_string(req, "answer"), res);
    let reason = map_res_err!(param_string(req, "reason"), res);

    map_res_err!(
        use_case::issue::update_issue(ctx, id, answer, reason).await,
        res
    );
    render_no_content(res);
});

controller!(ListItemsWithIssueController, |ctx, _req, res| {
    let items = map_res_err!(use_case::issue::work_items_with_issue(ctx).await, res);
    render_json(res, items);
});

// work items

controller!(CreateWorkItemController, |ctx, req, res| {
    let result: Result<WorkItem, _> = req.parse_body().await.map_err(BadRequest::from);
    let dto = map_res_err!(result, res);

    let created = map_res_err!(use_case::work_item::create_work_item(ctx, dto).await, res);
    render_created(req, res, created);
});

controller!(SetWorkItemStatusController, |ctx, req, res| {
    let id = map_res_err!(param_ident(req, "id"), res);
    let status: WorkItemStatus = map_res_err!(param(req, "status"), res);

    map_res_err!(
        use_case::work_item::set_work_item_status(ctx, id, status).await,
        res
    );
    render_no_content(res);
});

controller!(RemoveWorkItemController, |ctx, req, res| {
    let issue_id = map_res_err!(param_ident(req, "issue_id"), res);
    let id = map_res_err!(param_ident(req, "id"), res);

    map_res_err!(
        use_case::work_item::remove_work_item(ctx, issue_id, id).await,
        res
    );
    render_no_content(res);
});

controller!(AssignWorkItemController, |ctx, req, res| {
    let user_id = map_res_err!(param_ident(req, "user_id"), res);
    let work_item_id = map_res_err!(param_ident(req, "work_item_id"), res);

    map_res_err!(
        use_case::work_item::assign_work_item_to_user(ctx, user_id, work_item_id).await,
        res
    );
    render_no_content(res);
});

controller!(ItemsByStatusController, |ctx, req, res| {
    let status: WorkItemStatus = map_res_err!(param(req, "status"), res);

    let items = map_res_err!(use_case::work_item::by_status(ctx, status).await, res);
    render_json(res, items);
});

controller!(ItemsByTeamController, |ctx, req, res| {
    let team_id = map_res_err!(param_ident(req, "id"), res);

    let items = map_res_err!(use_case::work_item::by_team(ctx, team_id).await, res);
    render_json(res, items);
});

controller!(ItemsByUserController, |ctx, req, res| {
    let user_id = map_res_err!(param_ident(req, "id"), res);

    let items = map_res_err!(use_case::work_item::by_user(ctx, user_id).await, res);
    render_json(res, items);
});

controller!(SearchItemsController, |ctx, req, res| {
    let text = map_res_err!(param_string(req, "text"), res);

    let items = map_res_err!(use_case::work_item::search(ctx, &text).await, res);
    render_json(res, items);
});

/// Rejects requests whose `Authorization` header is not the shared secret.
///
/// The comparison ignores ASCII case. Rejected requests never reach a
/// controller.
pub struct AuthorizationHoop {
    secret: Arc<str>,
}

impl AuthorizationHoop {
    pub fn new(secret: impl Into<Arc<str>>) -> Self {
        Self {
            secret: secret.into(),
        }
    }
}

fn authorize(req: &Request, secret: &str) -> Result<(), UnauthorizedError> {
    let token: Option<&str> = req.header("authorization");
    let token = token.ok_or(UnauthorizedError::TokenNotPresent)?;
    if token.eq_ignore_ascii_case(secret) {
        Ok(())
    } else {
        Err(UnauthorizedError::InvalidToken)
    }
}

#[async_trait]
impl Handler for AuthorizationHoop {
    async fn handle(&self, req: &mut Request, _: &mut Depot, res: &mut Response, ctrl: &mut FlowCtrl) {
        if let Err(err) = authorize(req, &self.secret) {
            tracing::info!(path = req.uri().path(), reason = %err, "unauthorized request");
            res.render(ApplicationError::from(err));
            ctrl.skip_rest();
        }
    }
}
