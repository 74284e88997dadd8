//! Mock providers for isolating the services in tests. They record every
//! call so tests can assert which collaborator operations ran (or that none
//! did), and they fail on demand per operation.

use std::collections::HashMap;
use std::sync::{Mutex, MutexGuard};

use async_trait::async_trait;

use crate::errors::{IdentityError, IdentityResult};
use crate::models::{
    ClientRecord, ClientSettings, CodeDeliveryRecord, ConfirmForgotPasswordRequest,
    CreatePoolRequest, PoolRecord, SessionRecord, SmsRole, UserAttribute,
};
use crate::providers::{AccessPolicyProvider, IdentityProvider};

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[derive(Default)]
pub struct MockIdentityProvider {
    calls: Mutex<Vec<String>>,
    failures: Mutex<HashMap<String, String>>,
    users: Mutex<Vec<Vec<UserAttribute>>>,
    pools: Mutex<Vec<PoolRecord>>,
    clients: Mutex<Vec<ClientRecord>>,
    updated_attributes: Mutex<Vec<UserAttribute>>,
}

impl MockIdentityProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `operation` fail with `message` when next invoked.
    pub fn fail(&self, operation: &str, message: &str) {
        lock(&self.failures).insert(operation.to_string(), message.to_string());
    }

    pub fn with_users(self, users: Vec<Vec<UserAttribute>>) -> Self {
        *lock(&self.users) = users;
        self
    }

    pub fn with_pools(self, pools: Vec<PoolRecord>) -> Self {
        *lock(&self.pools) = pools;
        self
    }

    pub fn with_clients(self, clients: Vec<ClientRecord>) -> Self {
        *lock(&self.clients) = clients;
        self
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }

    /// Attributes passed to the last `admin_update_user_attributes` call.
    pub fn updated_attributes(&self) -> Vec<UserAttribute> {
        lock(&self.updated_attributes).clone()
    }

    fn record(&self, operation: &str) -> IdentityResult<()> {
        lock(&self.calls).push(operation.to_string());
        if let Some(message) = lock(&self.failures).get(operation) {
            return Err(match operation {
                "admin_set_user_password" | "initiate_auth" => {
                    IdentityError::CredentialsRejected(message.clone())
                }
                _ => IdentityError::Cognito(message.clone()),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl IdentityProvider for MockIdentityProvider {
    async fn admin_create_user(
        &self,
        _user_pool_id: &str,
        email: &str,
        name: &str,
    ) -> IdentityResult<Vec<UserAttribute>> {
        self.record("admin_create_user")?;
        // Echo the attributes back the way Cognito does.
        Ok(vec![
            UserAttribute::new("email", email),
            UserAttribute::new("name", name),
            UserAttribute::new("email_verified", "true"),
        ])
    }

    async fn admin_set_user_password(
        &self,
        _user_pool_id: &str,
        _username: &str,
        _password: &str,
    ) -> IdentityResult<()> {
        self.record("admin_set_user_password")
    }

    async fn admin_delete_user(&self, _user_pool_id: &str, _username: &str) -> IdentityResult<()> {
        self.record("admin_delete_user")
    }

    async fn admin_update_user_attributes(
        &self,
        _user_pool_id: &str,
        _username: &str,
        attributes: Vec<UserAttribute>,
    ) -> IdentityResult<()> {
        self.record("admin_update_user_attributes")?;
        *lock(&self.updated_attributes) = attributes;
        Ok(())
    }

    async fn list_users(&self, _user_pool_id: &str) -> IdentityResult<Vec<Vec<UserAttribute>>> {
        self.record("list_users")?;
        Ok(lock(&self.users).clone())
    }

    async fn initiate_auth(
        &self,
        _client_id: &str,
        _username: &str,
        _password: &str,
    ) -> IdentityResult<SessionRecord> {
        self.record("initiate_auth")?;
        Ok(SessionRecord {
            access_token: Some("mock-access-token".to_string()),
            id_token: Some("mock-id-token".to_string()),
            refresh_token: Some("mock-refresh-token".to_string()),
            token_type: Some("Bearer".to_string()),
            expires_in: 3600,
            challenge_name: None,
        })
    }

    async fn forgot_password(
        &self,
        _client_id: &str,
        username: &str,
    ) -> IdentityResult<Option<CodeDeliveryRecord>> {
        self.record("forgot_password")?;
        Ok(Some(CodeDeliveryRecord {
            destination: Some(username.to_string()),
            delivery_medium: Some("EMAIL".to_string()),
            attribute_name: Some("email".to_string()),
        }))
    }

    async fn confirm_forgot_password(
        &self,
        _request: &ConfirmForgotPasswordRequest,
    ) -> IdentityResult<()> {
        self.record("confirm_forgot_password")
    }

    async fn create_user_pool(
        &self,
        request: &CreatePoolRequest,
        _sms_role: &SmsRole,
    ) -> IdentityResult<PoolRecord> {
        self.record("create_user_pool")?;
        Ok(PoolRecord {
            pool_id: "us-east-1_MockPool".to_string(),
            pool_name: request.pool_name.clone(),
            created_date: None,
        })
    }

    async fn list_user_pools(&self, max_results: i32) -> IdentityResult<Vec<PoolRecord>> {
        self.record("list_user_pools")?;
        let pools = lock(&self.pools);
        // The provider never returns more summaries than requested.
        Ok(pools.iter().take(max_results.max(0) as usize).cloned().collect())
    }

    async fn create_user_pool_client(
        &self,
        settings: &ClientSettings,
    ) -> IdentityResult<ClientRecord> {
        self.record("create_user_pool_client")?;
        Ok(ClientRecord {
            client_id: "mock-client-id".to_string(),
            client_name: settings.client_name.clone(),
        })
    }

    async fn list_user_pool_clients(
        &self,
        _user_pool_id: &str,
        max_results: i32,
    ) -> IdentityResult<Vec<ClientRecord>> {
        self.record("list_user_pool_clients")?;
        let clients = lock(&self.clients);
        Ok(clients.iter().take(max_results.max(0) as usize).cloned().collect())
    }

    async fn update_user_pool_client(
        &self,
        client_id: &str,
        settings: &ClientSettings,
    ) -> IdentityResult<ClientRecord> {
        self.record("update_user_pool_client")?;
        // Post-update state: the settings just written.
        Ok(ClientRecord {
            client_id: client_id.to_string(),
            client_name: settings.client_name.clone(),
        })
    }

    async fn describe_user_pool_client(
        &self,
        _user_pool_id: &str,
        client_id: &str,
    ) -> IdentityResult<ClientRecord> {
        self.record("describe_user_pool_client")?;
        let clients = lock(&self.clients);
        Ok(clients
            .iter()
            .find(|client| client.client_id == client_id)
            .cloned()
            .unwrap_or_else(|| ClientRecord {
                client_id: client_id.to_string(),
                client_name: "mock-client".to_string(),
            }))
    }
}

#[derive(Default)]
pub struct MockAccessPolicyProvider {
    calls: Mutex<Vec<String>>,
    failure: Mutex<Option<String>>,
}

impl MockAccessPolicyProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn fail(&self, message: &str) {
        *lock(&self.failure) = Some(message.to_string());
    }

    pub fn calls(&self) -> Vec<String> {
        lock(&self.calls).clone()
    }

    pub fn call_count(&self) -> usize {
        lock(&self.calls).len()
    }
}

#[async_trait]
impl AccessPolicyProvider for MockAccessPolicyProvider {
    async fn create_sms_role(&self, role_name: &str) -> IdentityResult<SmsRole> {
        lock(&self.calls).push("create_sms_role".to_string());
        if let Some(message) = lock(&self.failure).clone() {
            return Err(IdentityError::Iam(message));
        }
        Ok(SmsRole {
            arn: format!("arn:aws:iam::123456789012:role/service-role/{}", role_name),
            role_id: "AROAMOCKEXAMPLEID".to_string(),
        })
    }
}
