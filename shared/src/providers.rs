use async_trait::async_trait;

use crate::errors::IdentityResult;
use crate::models::{
    ClientRecord, ClientSettings, CodeDeliveryRecord, ConfirmForgotPasswordRequest,
    CreatePoolRequest, PoolRecord, SessionRecord, SmsRole, UserAttribute,
};

pub mod cognito;
pub mod iam;
pub mod mock;

pub use cognito::CognitoIdentityService;
pub use iam::IamRoleService;
pub use mock::{MockAccessPolicyProvider, MockIdentityProvider};

/// The managed identity-provider operations this system delegates to.
///
/// Implementations own all durable state; every call is a fresh round trip.
#[async_trait]
pub trait IdentityProvider {
    /// Create a user with a suppressed invitation and `email_verified`
    /// pre-set. Returns the attribute set the provider echoed back.
    async fn admin_create_user(
        &self,
        user_pool_id: &str,
        email: &str,
        name: &str,
    ) -> IdentityResult<Vec<UserAttribute>>;

    async fn admin_set_user_password(
        &self,
        user_pool_id: &str,
        username: &str,
        password: &str,
    ) -> IdentityResult<()>;

    async fn admin_delete_user(&self, user_pool_id: &str, username: &str) -> IdentityResult<()>;

    async fn admin_update_user_attributes(
        &self,
        user_pool_id: &str,
        username: &str,
        attributes: Vec<UserAttribute>,
    ) -> IdentityResult<()>;

    /// Single page only; no pagination token handling.
    async fn list_users(&self, user_pool_id: &str) -> IdentityResult<Vec<Vec<UserAttribute>>>;

    async fn initiate_auth(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> IdentityResult<SessionRecord>;

    async fn forgot_password(
        &self,
        client_id: &str,
        username: &str,
    ) -> IdentityResult<Option<CodeDeliveryRecord>>;

    async fn confirm_forgot_password(
        &self,
        request: &ConfirmForgotPasswordRequest,
    ) -> IdentityResult<()>;

    async fn create_user_pool(
        &self,
        request: &CreatePoolRequest,
        sms_role: &SmsRole,
    ) -> IdentityResult<PoolRecord>;

    async fn list_user_pools(&self, max_results: i32) -> IdentityResult<Vec<PoolRecord>>;

    async fn create_user_pool_client(
        &self,
        settings: &ClientSettings,
    ) -> IdentityResult<ClientRecord>;

    async fn list_user_pool_clients(
        &self,
        user_pool_id: &str,
        max_results: i32,
    ) -> IdentityResult<Vec<ClientRecord>>;

    /// Returns the post-update client state.
    async fn update_user_pool_client(
        &self,
        client_id: &str,
        settings: &ClientSettings,
    ) -> IdentityResult<ClientRecord>;

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> IdentityResult<ClientRecord>;
}

/// The access-policy operations needed when provisioning a pool.
#[async_trait]
pub trait AccessPolicyProvider {
    async fn create_sms_role(&self, role_name: &str) -> IdentityResult<SmsRole>;
}
