// Service flow tests against mock providers.
// Run with: cargo test --test user_service_test

use cognito_shared::{
    ConfirmForgotPasswordRequest, Envelope, LoginRequest, MockIdentityProvider, NewUser,
    UserAttribute, UserRequest, UserService,
};

fn add_user_request(pool_id: &str, name: &str, email: &str, password: &str) -> UserRequest {
    UserRequest {
        user_pool_id: pool_id.to_string(),
        user: NewUser {
            name: name.to_string(),
            email_address: email.to_string(),
            password: password.to_string(),
        },
    }
}

#[tokio::test]
async fn test_add_user_success_echoes_one_record() {
    let service = UserService::new(MockIdentityProvider::new());
    let request = add_user_request("p1", "Ann", "ann@x.com", "secret1");

    let response = service.add_user(&request).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.message, "Ok");
    assert_eq!(response.users.len(), 1);
    assert_eq!(response.users[0].name, "Ann");
    assert_eq!(response.users[0].email_address, "ann@x.com");
}

#[tokio::test]
async fn test_add_user_missing_fields_fails_before_any_call() {
    let incomplete = [
        add_user_request("", "Ann", "ann@x.com", "secret1"),
        add_user_request("p1", "", "ann@x.com", "secret1"),
        add_user_request("p1", "Ann", "", "secret1"),
    ];

    for request in &incomplete {
        let service = UserService::new(MockIdentityProvider::new());
        let response = service.add_user(request).await;

        assert_eq!(response.response_code, 500);
        assert_eq!(
            response.message,
            "You must supply an email address, user pool ID, and user name"
        );
        assert!(response.users.is_empty());
        assert_eq!(service.provider().call_count(), 0);
    }
}

#[tokio::test]
async fn test_add_user_password_failure_reports_400_and_leaves_user() {
    let provider = MockIdentityProvider::new();
    provider.fail("admin_set_user_password", "Password does not conform to policy");
    let service = UserService::new(provider);

    let response = service
        .add_user(&add_user_request("p1", "Ann", "ann@x.com", "x"))
        .await;

    assert_eq!(response.response_code, 400);
    assert_eq!(response.message, "Password does not conform to policy");
    assert!(response.users.is_empty());
    // The create call already ran; the user exists and is not rolled back.
    assert_eq!(
        service.provider().calls(),
        vec!["admin_create_user", "admin_set_user_password"]
    );
}

#[tokio::test]
async fn test_add_user_create_failure_reports_500() {
    let provider = MockIdentityProvider::new();
    provider.fail("admin_create_user", "UsernameExistsException");
    let service = UserService::new(provider);

    let response = service
        .add_user(&add_user_request("p1", "Ann", "ann@x.com", "secret1"))
        .await;

    assert_eq!(response.response_code, 500);
    assert!(response.message.starts_with("Got error creating user:"));
    assert_eq!(service.provider().calls(), vec!["admin_create_user"]);
}

#[tokio::test]
async fn test_list_users_maps_attributes_in_order() {
    let provider = MockIdentityProvider::new().with_users(vec![
        vec![
            UserAttribute::new("name", "Ann"),
            UserAttribute::new("email", "ann@x.com"),
            UserAttribute::new("email_verified", "true"),
            UserAttribute::new("is_confirmed", "true"),
        ],
        vec![
            UserAttribute::new("name", "Bob"),
            UserAttribute::new("email", "bob@x.com"),
            UserAttribute::new("custom:ignored", "whatever"),
        ],
    ]);
    let service = UserService::new(provider);

    let response = service.list_users("p1").await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.users.len(), 2);
    assert_eq!(response.users[0].name, "Ann");
    assert_eq!(response.users[0].email_verified, "true");
    assert_eq!(response.users[1].name, "Bob");
    assert_eq!(response.users[1].email_verified, "");
}

#[tokio::test]
async fn test_list_users_requires_pool_id() {
    let service = UserService::new(MockIdentityProvider::new());

    let response = service.list_users("").await;

    assert_eq!(response.response_code, 500);
    assert_eq!(response.message, "You must supply a user pool ID");
    assert_eq!(service.provider().call_count(), 0);
}

#[tokio::test]
async fn test_list_users_failure_uses_fixed_message() {
    let provider = MockIdentityProvider::new();
    provider.fail("list_users", "InternalErrorException");
    let service = UserService::new(provider);

    let response = service.list_users("p1").await;

    assert_eq!(response.response_code, 500);
    assert_eq!(response.message, "Got error listing users");
}

#[tokio::test]
async fn test_delete_user_returns_envelope() {
    let service = UserService::new(MockIdentityProvider::new());
    let response = service
        .delete_user(&add_user_request("p1", "", "ann@x.com", ""))
        .await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.message, "Ok");
    assert!(response.users.is_empty());
}

#[tokio::test]
async fn test_delete_user_failure_is_500() {
    let provider = MockIdentityProvider::new();
    provider.fail("admin_delete_user", "UserNotFoundException");
    let service = UserService::new(provider);

    let response = service
        .delete_user(&add_user_request("p1", "", "ghost@x.com", ""))
        .await;

    assert_eq!(response.response_code, 500);
    assert_eq!(response.message, "UserNotFoundException");
}

#[tokio::test]
async fn test_authenticate_returns_session() {
    let service = UserService::new(MockIdentityProvider::new());
    let request = LoginRequest {
        email_address: "ann@x.com".to_string(),
        password: "secret1".to_string(),
        client_id: "client1".to_string(),
    };

    let response = service.authenticate(&request).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.sessions.len(), 1);
    assert!(response.sessions[0].access_token.is_some());
}

#[tokio::test]
async fn test_authenticate_rejection_is_400() {
    let provider = MockIdentityProvider::new();
    provider.fail("initiate_auth", "NotAuthorizedException");
    let service = UserService::new(provider);

    let response = service.authenticate(&LoginRequest::default()).await;

    assert_eq!(response.response_code, 400);
    assert!(response.sessions.is_empty());
}

#[tokio::test]
async fn test_forgot_password_reports_delivery() {
    let service = UserService::new(MockIdentityProvider::new());
    let request = LoginRequest {
        email_address: "ann@x.com".to_string(),
        client_id: "client1".to_string(),
        ..Default::default()
    };

    let response = service.forgot_password(&request).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.deliveries.len(), 1);
    assert_eq!(response.deliveries[0].delivery_medium.as_deref(), Some("EMAIL"));
}

#[tokio::test]
async fn test_forgot_password_failure_is_500() {
    let provider = MockIdentityProvider::new();
    provider.fail("forgot_password", "LimitExceededException");
    let service = UserService::new(provider);

    let response = service.forgot_password(&LoginRequest::default()).await;

    assert_eq!(response.response_code, 500);
    assert_eq!(response.message, "LimitExceededException");
}

#[tokio::test]
async fn test_confirm_forgot_password_success_is_empty_ok() {
    let service = UserService::new(MockIdentityProvider::new());
    let request = ConfirmForgotPasswordRequest {
        email_address: "ann@x.com".to_string(),
        password: "newsecret".to_string(),
        client_id: "client1".to_string(),
        confirmation_code: "123456".to_string(),
    };

    let response = service.confirm_forgot_password(&request).await;

    assert_eq!(response.response_code, 200);
    assert_eq!(response.message, "Ok");
    assert!(response.deliveries.is_empty());
}

#[tokio::test]
async fn test_verify_email_sets_the_attribute() {
    let service = UserService::new(MockIdentityProvider::new());

    service.verify_email("p1", "ann@x.com").await.unwrap();

    let attributes = service.provider().updated_attributes();
    assert_eq!(attributes.len(), 1);
    assert_eq!(attributes[0].name, "email_verified");
    assert_eq!(attributes[0].value, "true");
}

#[tokio::test]
async fn test_verify_email_propagates_failure() {
    let provider = MockIdentityProvider::new();
    provider.fail("admin_update_user_attributes", "UserNotFoundException");
    let service = UserService::new(provider);

    let result = service.verify_email("p1", "ghost@x.com").await;
    assert!(result.is_err());
}

#[tokio::test]
async fn test_envelope_round_trip_from_handler_output() {
    let service = UserService::new(MockIdentityProvider::new());
    let response = service
        .add_user(&add_user_request("p1", "Ann", "ann@x.com", "secret1"))
        .await;

    let body = response.to_json();
    let decoded: cognito_shared::UserResponse = serde_json::from_str(&body).unwrap();
    assert_eq!(decoded, response);
}
