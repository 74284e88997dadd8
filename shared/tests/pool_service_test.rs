// Pool and app-client flow tests against mock providers.
// Run with: cargo test --test pool_service_test

use cognito_shared::{
    ClientQueryRequest, ClientRecord, ClientSettings, CreatePoolRequest, MockAccessPolicyProvider,
    MockIdentityProvider, PoolRecord, PoolService, UpdateClientRequest,
};

fn create_pool_request(pool_name: &str) -> CreatePoolRequest {
    CreatePoolRequest {
        pool_name: pool_name.to_string(),
        email_message: "Welcome!".to_string(),
        email_subject: "Welcome".to_string(),
        sms_message: "Welcome {username}".to_string(),
        email_verify_msg: "Your code is {####}".to_string(),
        email_verify_sub: "Verify".to_string(),
        sms_auth_msg: "Your code is {####}".to_string(),
        sms_verify_msg: "Your code is {####}".to_string(),
        wait_days: 7,
    }
}

fn new_service() -> PoolService<MockIdentityProvider, MockAccessPolicyProvider> {
    PoolService::new(MockIdentityProvider::new(), MockAccessPolicyProvider::new())
}

#[tokio::test]
async fn test_create_pool_provisions_role_then_pool() {
    let service = new_service();

    let response = service.create_user_pool(&create_pool_request("my-pool")).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.message, "Ok");
    assert_eq!(response.pools.len(), 1);
    assert_eq!(response.pools[0].pool_name, "my-pool");
    assert!(!response.pools[0].pool_id.is_empty());
    assert_eq!(service.roles().calls(), vec!["create_sms_role"]);
    assert_eq!(service.provider().calls(), vec!["create_user_pool"]);
}

#[tokio::test]
async fn test_short_pool_name_fails_before_any_collaborator_call() {
    let service = new_service();

    let response = service.create_user_pool(&create_pool_request("A")).await;

    assert_eq!(response.response_code, 500);
    assert_eq!(response.message, "Pool name is required");
    assert!(response.pools.is_empty());
    assert_eq!(service.roles().call_count(), 0);
    assert_eq!(service.provider().call_count(), 0);
}

#[tokio::test]
async fn test_role_failure_aborts_before_pool_creation() {
    let provider = MockIdentityProvider::new();
    let roles = MockAccessPolicyProvider::new();
    roles.fail("EntityAlreadyExists");
    let service = PoolService::new(provider, roles);

    let response = service.create_user_pool(&create_pool_request("my-pool")).await;

    assert_eq!(response.response_code, 500);
    assert!(response.message.starts_with("Could not create role"));
    assert_eq!(service.provider().call_count(), 0);
}

#[tokio::test]
async fn test_pool_failure_leaves_role_orphaned_without_rollback() {
    let provider = MockIdentityProvider::new();
    provider.fail("create_user_pool", "LimitExceededException");
    let service = PoolService::new(provider, MockAccessPolicyProvider::new());

    let response = service.create_user_pool(&create_pool_request("my-pool")).await;

    assert_eq!(response.response_code, 500);
    assert!(response.message.starts_with("Could not create user pool"));
    assert!(response.pools.is_empty());
    // The role was created and nothing ever deletes it.
    assert_eq!(service.roles().calls(), vec!["create_sms_role"]);
    assert_eq!(service.provider().calls(), vec!["create_user_pool"]);
}

#[tokio::test]
async fn test_list_pools_never_exceeds_requested_max() {
    let pools: Vec<PoolRecord> = (0..5)
        .map(|i| PoolRecord {
            pool_id: format!("us-east-1_{}", i),
            pool_name: format!("pool-{}", i),
            created_date: None,
        })
        .collect();
    let provider = MockIdentityProvider::new().with_pools(pools);
    let service = PoolService::new(provider, MockAccessPolicyProvider::new());

    let response = service.list_user_pools(3).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.pools.len(), 3);
    assert_eq!(response.pools[0].pool_id, "us-east-1_0");
}

#[tokio::test]
async fn test_list_pools_failure_is_500() {
    let provider = MockIdentityProvider::new();
    provider.fail("list_user_pools", "TooManyRequestsException");
    let service = PoolService::new(provider, MockAccessPolicyProvider::new());

    let response = service.list_user_pools(10).await;

    assert_eq!(response.response_code, 500);
    assert!(response.message.starts_with("Could not list user pools"));
    assert!(response.pools.is_empty());
}

#[tokio::test]
async fn test_create_client_returns_one_record() {
    let service = new_service();
    let settings = ClientSettings {
        client_name: "web-app".to_string(),
        user_pool_id: "us-east-1_Example".to_string(),
        generate_secret: true,
        refresh_token_validity: 30,
        allowed_oauth_flows: vec!["code".to_string()],
        callback_url: vec!["https://example.com/cb".to_string()],
        ..Default::default()
    };

    let response = service.create_client(&settings).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.clients.len(), 1);
    assert_eq!(response.clients[0].client_name, "web-app");
}

#[tokio::test]
async fn test_list_clients_respects_max() {
    let clients: Vec<ClientRecord> = (0..4)
        .map(|i| ClientRecord {
            client_id: format!("client-{}", i),
            client_name: format!("app-{}", i),
        })
        .collect();
    let provider = MockIdentityProvider::new().with_clients(clients);
    let service = PoolService::new(provider, MockAccessPolicyProvider::new());

    let request = ClientQueryRequest {
        pool_id: "us-east-1_Example".to_string(),
        max: 2,
        ..Default::default()
    };
    let response = service.list_clients(&request).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.clients.len(), 2);
}

#[tokio::test]
async fn test_update_client_returns_post_update_state() {
    let service = new_service();
    let request = UpdateClientRequest {
        client_id: "client-1".to_string(),
        settings: ClientSettings {
            client_name: "renamed-app".to_string(),
            user_pool_id: "us-east-1_Example".to_string(),
            ..Default::default()
        },
    };

    let response = service.update_client(&request).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.clients.len(), 1);
    // The record reflects the state after the update, not before it.
    assert_eq!(response.clients[0].client_id, "client-1");
    assert_eq!(response.clients[0].client_name, "renamed-app");
    assert_eq!(service.provider().calls(), vec!["update_user_pool_client"]);
}

#[tokio::test]
async fn test_describe_client_passes_through() {
    let provider = MockIdentityProvider::new().with_clients(vec![ClientRecord {
        client_id: "client-1".to_string(),
        client_name: "web-app".to_string(),
    }]);
    let service = PoolService::new(provider, MockAccessPolicyProvider::new());

    let request = ClientQueryRequest {
        pool_id: "us-east-1_Example".to_string(),
        client_id: "client-1".to_string(),
        ..Default::default()
    };
    let response = service.describe_client(&request).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.clients[0].client_name, "web-app");
}

#[tokio::test]
async fn test_client_failure_is_500() {
    let provider = MockIdentityProvider::new();
    provider.fail("create_user_pool_client", "InvalidParameterException");
    let service = PoolService::new(provider, MockAccessPolicyProvider::new());

    let response = service.create_client(&ClientSettings::default()).await;

    assert_eq!(response.response_code, 500);
    assert_eq!(response.message, "InvalidParameterException");
    assert!(response.clients.is_empty());
}
