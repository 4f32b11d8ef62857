//! Token authentication → `AuthCtx` in request extensions.
//!
//! Flow per request:
//! - `AuthService::authenticate` (extract → validate → resolve)
//! - `AuthPolicy::decide` (reject, or fall back to anonymous)
//! - insert the resulting `AuthCtx` once, then run the handler
//!
//! Rejections never reach the handler and leave the extensions untouched.

use std::sync::Arc;

use axum::{
    Router,
    body::Body,
    extract::State,
    http::Request,
    middleware::{self, Next},
    response::Response,
};

use crate::error::AppError;
use crate::services::auth::{AuthPolicy, AuthService};
use crate::state::AppState;

#[derive(Clone)]
struct AccessState {
    auth: Arc<AuthService>,
    policy: AuthPolicy,
}

/// Routes that need an authenticated user.
///
/// ```ignore
/// let protected = Router::new().route("/user", get(current_user));
/// let protected = middleware::auth::access::require(protected, &state);
/// ```
pub fn require(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    apply(router, state, AuthPolicy::required())
}

/// Routes that serve anonymous callers too, but want the user when there is one.
pub fn optional(router: Router<AppState>, state: &AppState) -> Router<AppState> {
    apply(router, state, AuthPolicy::optional())
}

pub fn apply(router: Router<AppState>, state: &AppState, policy: AuthPolicy) -> Router<AppState> {
    let access = AccessState {
        auth: state.auth.clone(),
        policy,
    };
    // route_layer: unmatched paths stay 404 instead of turning into 401
    router.route_layer(middleware::from_fn_with_state(access, access_middleware))
}

async fn access_middleware(
    State(access): State<AccessState>,
    mut req: Request<Body>,
    next: Next,
) -> Result<Response, AppError> {
    let headers = req.headers();
    let query = req.uri().query();
    let outcome = access.auth.authenticate(headers, query).await;

    let ctx = access.policy.decide(outcome)?;

    tracing::debug!(
        subject_id = ctx.current_subject_id(),
        enforced = access.policy.enforce_required(),
        "auth context set"
    );

    req.extensions_mut().insert(ctx);

    Ok(next.run(req).await)
}
