//! Route table of the webservice stand-in.

use axum::{
    routing::{delete, get, post},
    Router,
};

use super::{controller, state::WebserviceState};

/// Builds the router with every endpoint the CLI and the tests call.
///
/// Entry paths are matched as a single wildcard so that both `%2F`-encoded and
/// plain slashes reach the handler as `registry/namespace/name[/toolname]`.
///
/// # Registered Endpoints
/// - `GET /users/user` - Current user
/// - `GET /users/{id}/containers` / `GET /users/{id}/workflows` - The user's entries
/// - `GET /users/registries/github/organizations[/{org}]` - GitHub organizations and repositories
/// - `POST /auth/tokens/github` / `POST /auth/tokens/google` - OAuth code exchanges
/// - `/containers/...` - Tool lookup, search, publication, registration, refresh and tags
/// - `/workflows/...` - Workflow lookup, publication and refresh
/// - `GET /ga4gh/trs/v2/tools/{id}/versions/{version}/{type}/descriptor` - TRS descriptors
pub fn routes() -> Router<WebserviceState> {
    Router::new()
        .route("/users/user", get(controller::user::get_user))
        .route("/users/{id}/containers", get(controller::user::get_user_tools))
        .route("/users/{id}/workflows", get(controller::user::get_user_workflows))
        .route(
            "/users/registries/github/organizations",
            get(controller::user::get_github_organizations),
        )
        .route(
            "/users/registries/github/organizations/{organization}",
            get(controller::user::get_github_repositories),
        )
        .route("/auth/tokens/github", post(controller::auth::link_github))
        .route("/auth/tokens/google", post(controller::auth::login_google))
        .route(
            "/containers/path/tool/{*path}",
            get(controller::tool::get_tool_by_path),
        )
        .route("/containers/search", get(controller::tool::search_tools))
        .route(
            "/containers/registerManual",
            post(controller::tool::register_manual_tool),
        )
        .route(
            "/containers/{id}/publish",
            post(controller::tool::publish_tool),
        )
        .route(
            "/containers/{id}/refresh",
            post(controller::tool::refresh_tool),
        )
        .route(
            "/containers/{id}/tags",
            get(controller::tool::get_tags).post(controller::tool::add_tags),
        )
        .route(
            "/containers/{id}/tags/{tag_id}",
            delete(controller::tool::delete_tag),
        )
        .route(
            "/workflows/path/workflow/{*path}",
            get(controller::workflow::get_workflow_by_path),
        )
        .route(
            "/workflows/{id}/publish",
            post(controller::workflow::publish_workflow),
        )
        .route(
            "/workflows/{id}/refresh",
            post(controller::workflow::refresh_workflow),
        )
        .route(
            "/ga4gh/trs/v2/tools/{id}/versions/{version}/{descriptor_type}/descriptor",
            get(controller::trs::get_descriptor),
        )
}
