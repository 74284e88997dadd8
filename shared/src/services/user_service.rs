use tracing::{info, warn};

use crate::errors::{IdentityError, IdentityResult};
use crate::models::{
    ConfirmForgotPasswordRequest, LoginRequest, UserAttribute, UserRecord, UserRequest,
};
use crate::providers::IdentityProvider;
use crate::response::{AuthResponse, Envelope, ResetResponse, UserResponse};

/// Handlers for the per-user operations. Holds the provider handle built at
/// process start; each call is an independent request/response cycle.
pub struct UserService<P> {
    provider: P,
}

impl<P: IdentityProvider> UserService<P> {
    pub fn new(provider: P) -> Self {
        Self { provider }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Create the user with a suppressed invitation, then set a permanent
    /// password. If the password set fails the user still exists in the
    /// pool; the failure is reported and the orphan logged, not rolled back.
    pub async fn add_user(&self, request: &UserRequest) -> UserResponse {
        let user = &request.user;
        if user.email_address.is_empty() || request.user_pool_id.is_empty() || user.name.is_empty()
        {
            return UserResponse::failure(&IdentityError::Validation(
                "You must supply an email address, user pool ID, and user name".to_string(),
            ));
        }

        let attributes = match self
            .provider
            .admin_create_user(&request.user_pool_id, &user.email_address, &user.name)
            .await
        {
            Ok(attributes) => attributes,
            Err(e) => {
                return UserResponse::failure(&IdentityError::Cognito(format!(
                    "Got error creating user: {}",
                    e
                )))
            }
        };

        let record = UserRecord::from_attributes(&attributes);

        if let Err(e) = self
            .provider
            .admin_set_user_password(&request.user_pool_id, &user.email_address, &user.password)
            .await
        {
            warn!(
                "User {} was created but the permanent password could not be set",
                user.email_address
            );
            return UserResponse::failure(&e);
        }

        info!("Created user {} in pool {}", user.email_address, request.user_pool_id);
        UserResponse::ok(vec![record])
    }

    /// Single-page listing; attribute order as returned by the provider.
    pub async fn list_users(&self, user_pool_id: &str) -> UserResponse {
        if user_pool_id.is_empty() {
            return UserResponse::failure(&IdentityError::Validation(
                "You must supply a user pool ID".to_string(),
            ));
        }

        match self.provider.list_users(user_pool_id).await {
            Ok(users) => UserResponse::ok(
                users
                    .iter()
                    .map(|attributes| UserRecord::from_attributes(attributes))
                    .collect(),
            ),
            Err(_) => UserResponse::failure(&IdentityError::Cognito(
                "Got error listing users".to_string(),
            )),
        }
    }

    /// The email address doubles as the username for deletion.
    pub async fn delete_user(&self, request: &UserRequest) -> UserResponse {
        match self
            .provider
            .admin_delete_user(&request.user_pool_id, &request.user.email_address)
            .await
        {
            Ok(()) => UserResponse::ok(Vec::new()),
            Err(e) => UserResponse::failure(&e),
        }
    }

    pub async fn authenticate(&self, request: &LoginRequest) -> AuthResponse {
        match self
            .provider
            .initiate_auth(&request.client_id, &request.email_address, &request.password)
            .await
        {
            Ok(session) => AuthResponse::ok(vec![session]),
            Err(e) => AuthResponse::failure(&e),
        }
    }

    pub async fn forgot_password(&self, request: &LoginRequest) -> ResetResponse {
        match self
            .provider
            .forgot_password(&request.client_id, &request.email_address)
            .await
        {
            Ok(delivery) => ResetResponse::ok(delivery.into_iter().collect()),
            Err(e) => ResetResponse::failure(&e),
        }
    }

    pub async fn confirm_forgot_password(
        &self,
        request: &ConfirmForgotPasswordRequest,
    ) -> ResetResponse {
        match self.provider.confirm_forgot_password(request).await {
            Ok(()) => ResetResponse::ok(Vec::new()),
            Err(e) => ResetResponse::failure(&e),
        }
    }

    /// Post-confirmation lifecycle step. Errors propagate so the runtime can
    /// block the confirmation flow.
    pub async fn verify_email(&self, user_pool_id: &str, username: &str) -> IdentityResult<()> {
        self.provider
            .admin_update_user_attributes(
                user_pool_id,
                username,
                vec![UserAttribute::new("email_verified", "true")],
            )
            .await
    }
}
