use thiserror::Error;

/// Caller-visible error kinds. The message is built where the failure is
/// observed, so Display stays the raw detail that goes into the envelope.
#[derive(Error, Debug)]
pub enum IdentityError {
    #[error("{0}")]
    Validation(String),

    #[error("{0}")]
    CredentialsRejected(String),

    #[error("{0}")]
    Cognito(String),

    #[error("{0}")]
    Iam(String),
}

impl IdentityError {
    /// The single place an error kind is turned into an HTTP-style status
    /// code. Validation failures are coded 500 — that is the documented
    /// external contract, so changing the policy is a one-line edit here.
    pub fn status_code(&self) -> u16 {
        match self {
            IdentityError::Validation(_) => 500,
            IdentityError::CredentialsRejected(_) => 400,
            IdentityError::Cognito(_) => 500,
            IdentityError::Iam(_) => 500,
        }
    }
}

pub type IdentityResult<T> = Result<T, IdentityError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_code_mapping() {
        assert_eq!(IdentityError::Validation("x".to_string()).status_code(), 500);
        assert_eq!(IdentityError::CredentialsRejected("x".to_string()).status_code(), 400);
        assert_eq!(IdentityError::Cognito("x".to_string()).status_code(), 500);
        assert_eq!(IdentityError::Iam("x".to_string()).status_code(), 500);
    }

    #[test]
    fn test_display_is_the_bare_detail() {
        let err = IdentityError::Validation("Pool name is required".to_string());
        assert_eq!(err.to_string(), "Pool name is required");
    }
}
