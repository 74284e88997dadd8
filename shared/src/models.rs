use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single Cognito user attribute, as exchanged with the provider.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserAttribute {
    pub name: String,
    pub value: String,
}

impl UserAttribute {
    pub fn new(name: &str, value: &str) -> Self {
        Self {
            name: name.to_string(),
            value: value.to_string(),
        }
    }
}

/// User fields supplied on creation. The password is write-only; it is never
/// echoed back in a record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NewUser {
    pub name: String,
    pub email_address: String,
    pub password: String,
}

/// Body shape for the user operations: a pool id plus the user in question.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRequest {
    pub user_pool_id: String,
    pub user: NewUser,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email_address: String,
    pub password: String,
    pub client_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfirmForgotPasswordRequest {
    pub email_address: String,
    pub password: String,
    pub client_id: String,
    pub confirmation_code: String,
}

/// A user as read back from the pool. Attribute values are strings on the
/// wire ("true"/"false"), so they stay strings here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UserRecord {
    pub name: String,
    pub email_address: String,
    pub email_verified: String,
    pub is_confirmed: String,
}

impl UserRecord {
    /// Map a provider attribute set by name; unmatched attributes are
    /// ignored.
    pub fn from_attributes(attributes: &[UserAttribute]) -> Self {
        let mut record = UserRecord::default();
        for attribute in attributes {
            match attribute.name.as_str() {
                "name" => record.name = attribute.value.clone(),
                "email" => record.email_address = attribute.value.clone(),
                "email_verified" => record.email_verified = attribute.value.clone(),
                "is_confirmed" => record.is_confirmed = attribute.value.clone(),
                _ => {}
            }
        }
        record
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CreatePoolRequest {
    pub email_message: String,
    pub email_subject: String,
    pub sms_message: String,
    pub email_verify_msg: String,
    pub email_verify_sub: String,
    pub sms_auth_msg: String,
    pub sms_verify_msg: String,
    pub pool_name: String,
    pub wait_days: i32,
}

/// A pool summary; the id and creation date are assigned by the provider.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PoolRecord {
    pub pool_id: String,
    pub pool_name: String,
    pub created_date: Option<DateTime<Utc>>,
}

/// The IAM role provisioned for a pool's SMS delivery.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SmsRole {
    pub arn: String,
    pub role_id: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalyticsConfig {
    pub application_id: String,
    pub external_id: String,
    pub role_arn: String,
    pub user_data_shared: bool,
}

/// Flat app-client configuration, mapped 1:1 into the provider's create and
/// update calls. `generate_secret` only applies on create.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientSettings {
    pub allowed_oauth_flows: Vec<String>,
    pub allowed_oauth_flows_userpool_client: bool,
    pub allowed_oauth_scopes: Vec<String>,
    pub analytics_config: AnalyticsConfig,
    pub callback_url: Vec<String>,
    pub client_name: String,
    pub default_redirect_uri: String,
    pub explicit_auth_flows: Vec<String>,
    pub generate_secret: bool,
    pub logout_urls: Vec<String>,
    pub read_attributes: Vec<String>,
    pub refresh_token_validity: i32,
    pub supported_identity_providers: Vec<String>,
    pub user_pool_id: String,
    pub write_attributes: Vec<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UpdateClientRequest {
    pub client_id: String,
    #[serde(flatten)]
    pub settings: ClientSettings,
}

/// Body shape for the list/describe client operations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientQueryRequest {
    pub pool_id: String,
    pub client_id: String,
    pub max: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientRecord {
    pub client_id: String,
    pub client_name: String,
}

/// Tokens issued by a successful password authentication. When the provider
/// answers with a challenge instead, only `challenge_name` is set.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionRecord {
    pub access_token: Option<String>,
    pub id_token: Option<String>,
    pub refresh_token: Option<String>,
    pub token_type: Option<String>,
    pub expires_in: i32,
    pub challenge_name: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CodeDeliveryRecord {
    pub destination: Option<String>,
    pub delivery_medium: Option<String>,
    pub attribute_name: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_from_attributes() {
        let attributes = vec![
            UserAttribute::new("name", "Ann"),
            UserAttribute::new("email", "ann@x.com"),
            UserAttribute::new("email_verified", "true"),
            UserAttribute::new("is_confirmed", "true"),
            UserAttribute::new("sub", "ignored-opaque-id"),
        ];

        let record = UserRecord::from_attributes(&attributes);
        assert_eq!(record.name, "Ann");
        assert_eq!(record.email_address, "ann@x.com");
        assert_eq!(record.email_verified, "true");
        assert_eq!(record.is_confirmed, "true");
    }

    #[test]
    fn test_requests_tolerate_missing_fields() {
        // Handlers validate required fields themselves; decoding an empty
        // body must not fail before validation gets a chance to.
        let request: UserRequest = serde_json::from_str("{}").unwrap();
        assert!(request.user_pool_id.is_empty());
        assert!(request.user.email_address.is_empty());

        let request: CreatePoolRequest = serde_json::from_str("{}").unwrap();
        assert!(request.pool_name.is_empty());
        assert_eq!(request.wait_days, 0);
    }

    #[test]
    fn test_update_request_flattens_settings() {
        let body = r#"{
            "client_id": "abc123",
            "client_name": "web",
            "user_pool_id": "us-east-1_Example",
            "refresh_token_validity": 30
        }"#;
        let request: UpdateClientRequest = serde_json::from_str(body).unwrap();
        assert_eq!(request.client_id, "abc123");
        assert_eq!(request.settings.client_name, "web");
        assert_eq!(request.settings.refresh_token_validity, 30);
    }
}
