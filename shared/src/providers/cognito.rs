use async_trait::async_trait;
use aws_sdk_cognitoidentityprovider::error::DisplayErrorContext;
use aws_sdk_cognitoidentityprovider::primitives::DateTime as SdkDateTime;
use aws_sdk_cognitoidentityprovider::types::{
    AdminCreateUserConfigType, AnalyticsConfigurationType, AttributeDataType, AttributeType,
    AuthFlowType, DeliveryMediumType, ExplicitAuthFlowsType, MessageActionType,
    MessageTemplateType, OAuthFlowType, PasswordPolicyType, SchemaAttributeType,
    SmsConfigurationType, StringAttributeConstraintsType, UserPoolClientType, UserPoolPolicyType,
    VerifiedAttributeType,
};
use aws_sdk_cognitoidentityprovider::Client as CognitoClient;
use chrono::{DateTime, Utc};

use crate::errors::{IdentityError, IdentityResult};
use crate::models::{
    ClientRecord, ClientSettings, CodeDeliveryRecord, ConfirmForgotPasswordRequest,
    CreatePoolRequest, PoolRecord, SessionRecord, SmsRole, UserAttribute,
};
use crate::providers::IdentityProvider;

/// `IdentityProvider` backed by the Cognito Identity Provider SDK client.
pub struct CognitoIdentityService {
    client: CognitoClient,
}

impl CognitoIdentityService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: CognitoClient::new(config),
        }
    }
}

fn to_chrono(timestamp: Option<&SdkDateTime>) -> Option<DateTime<Utc>> {
    timestamp.and_then(|t| DateTime::from_timestamp(t.secs(), t.subsec_nanos()))
}

fn to_user_attributes(attributes: &[AttributeType]) -> Vec<UserAttribute> {
    attributes
        .iter()
        .map(|attribute| UserAttribute {
            name: attribute.name().to_string(),
            value: attribute.value().unwrap_or_default().to_string(),
        })
        .collect()
}

fn to_client_record(client: Option<&UserPoolClientType>) -> ClientRecord {
    let mut record = ClientRecord::default();
    if let Some(client) = client {
        record.client_id = client.client_id().unwrap_or_default().to_string();
        record.client_name = client.client_name().unwrap_or_default().to_string();
    }
    record
}

fn user_attribute(name: &str, value: &str) -> IdentityResult<AttributeType> {
    AttributeType::builder()
        .name(name)
        .value(value)
        .build()
        .map_err(|e| IdentityError::Cognito(e.to_string()))
}

fn sms_configuration(sms_role: &SmsRole) -> SmsConfigurationType {
    SmsConfigurationType::builder()
        .sns_caller_arn(&sms_role.arn)
        .external_id(&sms_role.role_id)
        .build()
}

#[async_trait]
impl IdentityProvider for CognitoIdentityService {
    async fn admin_create_user(
        &self,
        user_pool_id: &str,
        email: &str,
        name: &str,
    ) -> IdentityResult<Vec<UserAttribute>> {
        let output = self
            .client
            .admin_create_user()
            .user_pool_id(user_pool_id)
            .username(email)
            .desired_delivery_mediums(DeliveryMediumType::Email)
            .message_action(MessageActionType::Suppress)
            .user_attributes(user_attribute("email", email)?)
            .user_attributes(user_attribute("name", name)?)
            .user_attributes(user_attribute("email_verified", "true")?)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;

        let attributes = output
            .user()
            .map(|user| to_user_attributes(user.attributes()))
            .unwrap_or_default();
        Ok(attributes)
    }

    async fn admin_set_user_password(
        &self,
        user_pool_id: &str,
        username: &str,
        password: &str,
    ) -> IdentityResult<()> {
        self.client
            .admin_set_user_password()
            .user_pool_id(user_pool_id)
            .username(username)
            .password(password)
            .permanent(true)
            .send()
            .await
            // A rejected password is the caller's fault, not the backend's.
            .map_err(|e| IdentityError::CredentialsRejected(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    async fn admin_delete_user(&self, user_pool_id: &str, username: &str) -> IdentityResult<()> {
        self.client
            .admin_delete_user()
            .user_pool_id(user_pool_id)
            .username(username)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    async fn admin_update_user_attributes(
        &self,
        user_pool_id: &str,
        username: &str,
        attributes: Vec<UserAttribute>,
    ) -> IdentityResult<()> {
        let mut call = self
            .client
            .admin_update_user_attributes()
            .user_pool_id(user_pool_id)
            .username(username);
        for attribute in &attributes {
            call = call.user_attributes(user_attribute(&attribute.name, &attribute.value)?);
        }
        call.send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    async fn list_users(&self, user_pool_id: &str) -> IdentityResult<Vec<Vec<UserAttribute>>> {
        let output = self
            .client
            .list_users()
            .user_pool_id(user_pool_id)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;

        Ok(output
            .users()
            .iter()
            .map(|user| to_user_attributes(user.attributes()))
            .collect())
    }

    async fn initiate_auth(
        &self,
        client_id: &str,
        username: &str,
        password: &str,
    ) -> IdentityResult<SessionRecord> {
        let output = self
            .client
            .initiate_auth()
            .auth_flow(AuthFlowType::UserPasswordAuth)
            .auth_parameters("USERNAME", username)
            .auth_parameters("PASSWORD", password)
            .client_id(client_id)
            .send()
            .await
            .map_err(|e| IdentityError::CredentialsRejected(DisplayErrorContext(e).to_string()))?;

        let mut session = SessionRecord {
            challenge_name: output.challenge_name().map(|c| c.as_str().to_string()),
            ..Default::default()
        };
        if let Some(tokens) = output.authentication_result() {
            session.access_token = tokens.access_token().map(str::to_string);
            session.id_token = tokens.id_token().map(str::to_string);
            session.refresh_token = tokens.refresh_token().map(str::to_string);
            session.token_type = tokens.token_type().map(str::to_string);
            session.expires_in = tokens.expires_in();
        }
        Ok(session)
    }

    async fn forgot_password(
        &self,
        client_id: &str,
        username: &str,
    ) -> IdentityResult<Option<CodeDeliveryRecord>> {
        let output = self
            .client
            .forgot_password()
            .client_id(client_id)
            .username(username)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;

        Ok(output.code_delivery_details().map(|details| CodeDeliveryRecord {
            destination: details.destination().map(str::to_string),
            delivery_medium: details.delivery_medium().map(|m| m.as_str().to_string()),
            attribute_name: details.attribute_name().map(str::to_string),
        }))
    }

    async fn confirm_forgot_password(
        &self,
        request: &ConfirmForgotPasswordRequest,
    ) -> IdentityResult<()> {
        self.client
            .confirm_forgot_password()
            .client_id(&request.client_id)
            .username(&request.email_address)
            .password(&request.password)
            .confirmation_code(&request.confirmation_code)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;
        Ok(())
    }

    async fn create_user_pool(
        &self,
        request: &CreatePoolRequest,
        sms_role: &SmsRole,
    ) -> IdentityResult<PoolRecord> {
        let invite_template = MessageTemplateType::builder()
            .email_message(&request.email_message)
            .email_subject(&request.email_subject)
            .sms_message(&request.sms_message)
            .build();

        let admin_create_config = AdminCreateUserConfigType::builder()
            // false == users can sign themselves up
            .allow_admin_create_user_only(false)
            .invite_message_template(invite_template)
            .unused_account_validity_days(request.wait_days)
            .build();

        // Minimum length 6, no complexity requirements.
        let password_policy = PasswordPolicyType::builder()
            .minimum_length(6)
            .require_lowercase(false)
            .require_numbers(false)
            .require_symbols(false)
            .require_uppercase(false)
            .build();

        // Every pool carries an immutable user_name attribute, 3-64 chars.
        let schema_attribute = SchemaAttributeType::builder()
            .attribute_data_type(AttributeDataType::String)
            .developer_only_attribute(false)
            .mutable(false)
            .name("user_name")
            .required(false)
            .string_attribute_constraints(
                StringAttributeConstraintsType::builder()
                    .min_length("3")
                    .max_length("64")
                    .build(),
            )
            .build();

        let output = self
            .client
            .create_user_pool()
            .pool_name(&request.pool_name)
            .admin_create_user_config(admin_create_config)
            .auto_verified_attributes(VerifiedAttributeType::Email)
            .auto_verified_attributes(VerifiedAttributeType::PhoneNumber)
            .email_verification_message(&request.email_verify_msg)
            .email_verification_subject(&request.email_verify_sub)
            .policies(
                UserPoolPolicyType::builder()
                    .password_policy(password_policy)
                    .build(),
            )
            .schema(schema_attribute)
            .sms_authentication_message(&request.sms_auth_msg)
            .sms_configuration(sms_configuration(sms_role))
            .sms_verification_message(&request.sms_verify_msg)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;

        let pool = output
            .user_pool()
            .ok_or_else(|| IdentityError::Cognito("No user pool in create response".to_string()))?;
        Ok(PoolRecord {
            pool_id: pool.id().unwrap_or_default().to_string(),
            pool_name: pool.name().unwrap_or_default().to_string(),
            created_date: to_chrono(pool.creation_date()),
        })
    }

    async fn list_user_pools(&self, max_results: i32) -> IdentityResult<Vec<PoolRecord>> {
        let output = self
            .client
            .list_user_pools()
            .max_results(max_results)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;

        Ok(output
            .user_pools()
            .iter()
            .map(|pool| PoolRecord {
                pool_id: pool.id().unwrap_or_default().to_string(),
                pool_name: pool.name().unwrap_or_default().to_string(),
                created_date: to_chrono(pool.creation_date()),
            })
            .collect())
    }

    async fn create_user_pool_client(
        &self,
        settings: &ClientSettings,
    ) -> IdentityResult<ClientRecord> {
        let analytics = AnalyticsConfigurationType::builder()
            .application_id(&settings.analytics_config.application_id)
            .external_id(&settings.analytics_config.external_id)
            .role_arn(&settings.analytics_config.role_arn)
            .user_data_shared(settings.analytics_config.user_data_shared)
            .build();

        let mut call = self
            .client
            .create_user_pool_client()
            .user_pool_id(&settings.user_pool_id)
            .client_name(&settings.client_name)
            .allowed_o_auth_flows_user_pool_client(settings.allowed_oauth_flows_userpool_client)
            .analytics_configuration(analytics)
            .default_redirect_uri(&settings.default_redirect_uri)
            .generate_secret(settings.generate_secret)
            .refresh_token_validity(settings.refresh_token_validity);
        for flow in &settings.allowed_oauth_flows {
            call = call.allowed_o_auth_flows(OAuthFlowType::from(flow.as_str()));
        }
        for scope in &settings.allowed_oauth_scopes {
            call = call.allowed_o_auth_scopes(scope);
        }
        for url in &settings.callback_url {
            call = call.callback_urls(url);
        }
        for flow in &settings.explicit_auth_flows {
            call = call.explicit_auth_flows(ExplicitAuthFlowsType::from(flow.as_str()));
        }
        for url in &settings.logout_urls {
            call = call.logout_urls(url);
        }
        for attribute in &settings.read_attributes {
            call = call.read_attributes(attribute);
        }
        for provider in &settings.supported_identity_providers {
            call = call.supported_identity_providers(provider);
        }
        for attribute in &settings.write_attributes {
            call = call.write_attributes(attribute);
        }

        let output = call
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;
        Ok(to_client_record(output.user_pool_client()))
    }

    async fn list_user_pool_clients(
        &self,
        user_pool_id: &str,
        max_results: i32,
    ) -> IdentityResult<Vec<ClientRecord>> {
        let output = self
            .client
            .list_user_pool_clients()
            .user_pool_id(user_pool_id)
            .max_results(max_results)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;

        Ok(output
            .user_pool_clients()
            .iter()
            .map(|client| ClientRecord {
                client_id: client.client_id().unwrap_or_default().to_string(),
                client_name: client.client_name().unwrap_or_default().to_string(),
            })
            .collect())
    }

    async fn update_user_pool_client(
        &self,
        client_id: &str,
        settings: &ClientSettings,
    ) -> IdentityResult<ClientRecord> {
        let analytics = AnalyticsConfigurationType::builder()
            .application_id(&settings.analytics_config.application_id)
            .external_id(&settings.analytics_config.external_id)
            .role_arn(&settings.analytics_config.role_arn)
            .user_data_shared(settings.analytics_config.user_data_shared)
            .build();

        // Same mapping as create, minus generate_secret which is fixed at
        // client creation and not updatable.
        let mut call = self
            .client
            .update_user_pool_client()
            .user_pool_id(&settings.user_pool_id)
            .client_id(client_id)
            .client_name(&settings.client_name)
            .allowed_o_auth_flows_user_pool_client(settings.allowed_oauth_flows_userpool_client)
            .analytics_configuration(analytics)
            .default_redirect_uri(&settings.default_redirect_uri)
            .refresh_token_validity(settings.refresh_token_validity);
        for flow in &settings.allowed_oauth_flows {
            call = call.allowed_o_auth_flows(OAuthFlowType::from(flow.as_str()));
        }
        for scope in &settings.allowed_oauth_scopes {
            call = call.allowed_o_auth_scopes(scope);
        }
        for url in &settings.callback_url {
            call = call.callback_urls(url);
        }
        for flow in &settings.explicit_auth_flows {
            call = call.explicit_auth_flows(ExplicitAuthFlowsType::from(flow.as_str()));
        }
        for url in &settings.logout_urls {
            call = call.logout_urls(url);
        }
        for attribute in &settings.read_attributes {
            call = call.read_attributes(attribute);
        }
        for provider in &settings.supported_identity_providers {
            call = call.supported_identity_providers(provider);
        }
        for attribute in &settings.write_attributes {
            call = call.write_attributes(attribute);
        }

        let output = call
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;
        Ok(to_client_record(output.user_pool_client()))
    }

    async fn describe_user_pool_client(
        &self,
        user_pool_id: &str,
        client_id: &str,
    ) -> IdentityResult<ClientRecord> {
        let output = self
            .client
            .describe_user_pool_client()
            .user_pool_id(user_pool_id)
            .client_id(client_id)
            .send()
            .await
            .map_err(|e| IdentityError::Cognito(DisplayErrorContext(e).to_string()))?;
        Ok(to_client_record(output.user_pool_client()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sms_configuration_carries_role_arn_and_external_id() {
        let role = SmsRole {
            arn: "arn:aws:iam::123456789012:role/service-role/pool-SMS-Role".to_string(),
            role_id: "AROAEXAMPLEID".to_string(),
        };

        // The SMS configuration builder is infallible; the role fields must
        // land unchanged in the built value.
        let configuration = sms_configuration(&role);
        assert_eq!(configuration.sns_caller_arn(), role.arn.as_str());
        assert_eq!(configuration.external_id(), Some(role.role_id.as_str()));
    }

    #[test]
    fn test_user_attribute_requires_a_name() {
        let attribute = user_attribute("email", "ann@x.com").unwrap();
        assert_eq!(attribute.name(), "email");
        assert_eq!(attribute.value(), Some("ann@x.com"));
    }
}
