use tracing::{info, warn};

use crate::errors::IdentityError;
use crate::models::{ClientQueryRequest, ClientSettings, CreatePoolRequest, UpdateClientRequest};
use crate::providers::{AccessPolicyProvider, IdentityProvider};
use crate::response::{ClientResponse, Envelope, PoolResponse};
use crate::roles::sms_role_name;

/// Handlers for the user-pool and app-client operations.
pub struct PoolService<P, R> {
    provider: P,
    roles: R,
}

impl<P: IdentityProvider, R: AccessPolicyProvider> PoolService<P, R> {
    pub fn new(provider: P, roles: R) -> Self {
        Self { provider, roles }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn roles(&self) -> &R {
        &self.roles
    }

    /// Two-step provisioning: the SMS role first, then the pool wired to it.
    /// A role failure aborts before the pool exists. A pool failure leaves
    /// the role orphaned; there is no rollback, so the orphan is logged by
    /// name for manual cleanup.
    pub async fn create_user_pool(&self, request: &CreatePoolRequest) -> PoolResponse {
        if request.pool_name.len() < 2 {
            return PoolResponse::failure(&IdentityError::Validation(
                "Pool name is required".to_string(),
            ));
        }

        let role_name = sms_role_name(&request.pool_name);
        let sms_role = match self.roles.create_sms_role(&role_name).await {
            Ok(role) => role,
            Err(e) => {
                return PoolResponse::failure(&IdentityError::Iam(format!(
                    "Could not create role {}",
                    e
                )))
            }
        };

        match self.provider.create_user_pool(request, &sms_role).await {
            Ok(pool) => {
                info!("Created user pool {} ({})", pool.pool_name, pool.pool_id);
                PoolResponse::ok(vec![pool])
            }
            Err(e) => {
                warn!(
                    "Pool creation failed after role {} was created; the role is orphaned and needs manual cleanup",
                    role_name
                );
                PoolResponse::failure(&IdentityError::Cognito(format!(
                    "Could not create user pool {}",
                    e
                )))
            }
        }
    }

    /// One list call with the requested max; no follow-up pages.
    pub async fn list_user_pools(&self, max_results: i32) -> PoolResponse {
        match self.provider.list_user_pools(max_results).await {
            Ok(pools) => PoolResponse::ok(pools),
            Err(e) => PoolResponse::failure(&IdentityError::Cognito(format!(
                "Could not list user pools {}",
                e
            ))),
        }
    }

    pub async fn create_client(&self, settings: &ClientSettings) -> ClientResponse {
        match self.provider.create_user_pool_client(settings).await {
            Ok(client) => ClientResponse::ok(vec![client]),
            Err(e) => ClientResponse::failure(&e),
        }
    }

    pub async fn list_clients(&self, request: &ClientQueryRequest) -> ClientResponse {
        match self
            .provider
            .list_user_pool_clients(&request.pool_id, request.max)
            .await
        {
            Ok(clients) => ClientResponse::ok(clients),
            Err(e) => ClientResponse::failure(&e),
        }
    }

    /// Issues the update and returns the post-update client state.
    pub async fn update_client(&self, request: &UpdateClientRequest) -> ClientResponse {
        match self
            .provider
            .update_user_pool_client(&request.client_id, &request.settings)
            .await
        {
            Ok(client) => ClientResponse::ok(vec![client]),
            Err(e) => ClientResponse::failure(&e),
        }
    }

    pub async fn describe_client(&self, request: &ClientQueryRequest) -> ClientResponse {
        match self
            .provider
            .describe_user_pool_client(&request.pool_id, &request.client_id)
            .await
        {
            Ok(client) => ClientResponse::ok(vec![client]),
            Err(e) => ClientResponse::failure(&e),
        }
    }
}
