//! Basic-auth guard for the API routes.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::Response;
use axum_extra::headers::authorization::Basic;
use axum_extra::headers::Authorization;
use axum_extra::TypedHeader;
use service::domain::{User, ROLE_ADMIN};
use service::errors::ServiceError;
use uuid::Uuid;

use crate::errors::ApiError;
use crate::state::ServerState;

/// Caller identity resolved by [`require_basic_auth`], stored in request extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub user_id: Uuid,
    pub name: String,
    pub role: String,
}

impl AuthContext {
    pub fn is_admin(&self) -> bool {
        self.role == ROLE_ADMIN
    }

    /// Mutations are reserved for administrators.
    pub fn require_admin(&self) -> Result<(), ApiError> {
        if self.is_admin() {
            Ok(())
        } else {
            Err(ApiError::Forbidden)
        }
    }
}

impl From<User> for AuthContext {
    fn from(u: User) -> Self {
        Self { user_id: u.id, name: u.name, role: u.role }
    }
}

pub async fn require_basic_auth(
    State(state): State<ServerState>,
    credentials: Option<TypedHeader<Authorization<Basic>>>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let Some(TypedHeader(Authorization(basic))) = credentials else {
        return Err(ApiError::Unauthorized);
    };
    let user = state
        .users
        .authenticate(basic.username(), basic.password())
        .await
        .map_err(|e| match e {
            ServiceError::Unauthorized => ApiError::Unauthorized,
            other => ApiError::Service(other),
        })?;
    req.extensions_mut().insert(AuthContext::from(user));
    Ok(next.run(req).await)
}
