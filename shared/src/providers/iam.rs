use async_trait::async_trait;
use aws_sdk_iam::error::DisplayErrorContext;
use aws_sdk_iam::Client as IamClient;

use crate::errors::{IdentityError, IdentityResult};
use crate::models::SmsRole;
use crate::providers::AccessPolicyProvider;
use crate::roles::{ASSUME_ROLE_POLICY_DOCUMENT, SMS_ROLE_PATH};

/// `AccessPolicyProvider` backed by the IAM SDK client.
pub struct IamRoleService {
    client: IamClient,
}

impl IamRoleService {
    pub fn new(config: &aws_config::SdkConfig) -> Self {
        Self {
            client: IamClient::new(config),
        }
    }
}

#[async_trait]
impl AccessPolicyProvider for IamRoleService {
    async fn create_sms_role(&self, role_name: &str) -> IdentityResult<SmsRole> {
        let output = self
            .client
            .create_role()
            .assume_role_policy_document(ASSUME_ROLE_POLICY_DOCUMENT)
            .role_name(role_name)
            .path(SMS_ROLE_PATH)
            .send()
            .await
            .map_err(|e| IdentityError::Iam(DisplayErrorContext(e).to_string()))?;

        let role = output
            .role()
            .ok_or_else(|| IdentityError::Iam("No role in create response".to_string()))?;
        Ok(SmsRole {
            arn: role.arn().to_string(),
            role_id: role.role_id().to_string(),
        })
    }
}
