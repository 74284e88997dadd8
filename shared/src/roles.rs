//! Naming and policy fixtures for the per-pool SMS delivery role.

/// Trust policy letting Cognito assume the SMS role.
pub const ASSUME_ROLE_POLICY_DOCUMENT: &str = r#"{ "Version": "2012-10-17", "Statement": [ { "Sid": "", "Effect": "Allow", "Principal": { "Service": "cognito-idp.amazonaws.com" }, "Action": "sts:AssumeRole" } ] }"#;

pub const SMS_ROLE_PATH: &str = "/service-role/";

/// Role name derived from the pool name: hyphens stripped, `-SMS-Role`
/// suffix. Deterministic so the role can be found again from the pool name.
pub fn sms_role_name(pool_name: &str) -> String {
    let name: String = pool_name.chars().filter(|c| *c != '-').collect();
    format!("{}-SMS-Role", name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sms_role_name_strips_hyphens() {
        assert_eq!(sms_role_name("my-app-pool"), "myapppool-SMS-Role");
        assert_eq!(sms_role_name("pool"), "pool-SMS-Role");
    }

    #[test]
    fn test_policy_document_is_valid_json() {
        let parsed: serde_json::Value = serde_json::from_str(ASSUME_ROLE_POLICY_DOCUMENT).unwrap();
        assert_eq!(parsed["Version"], "2012-10-17");
    }
}
