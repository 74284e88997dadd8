use serde::{Deserialize, Serialize};

use crate::errors::IdentityError;
use crate::models::{ClientRecord, CodeDeliveryRecord, PoolRecord, SessionRecord, UserRecord};

/// Body returned when an envelope itself cannot be serialized.
pub const ENCODING_FAILURE_BODY: &str = "Unable to construct JSON";

/// The uniform success/failure/result wrapper every operation returns.
///
/// Each concrete envelope is `{response_code, message, <items>}` where the
/// items key names the record type it carries. Construction goes through
/// `ok`/`failure` so the status-code policy lives in one place
/// (`IdentityError::status_code`) instead of per-handler literals.
pub trait Envelope: Serialize + Sized {
    type Item;

    fn from_parts(response_code: u16, message: String, items: Vec<Self::Item>) -> Self;

    fn response_code(&self) -> u16;

    fn ok(items: Vec<Self::Item>) -> Self {
        Self::from_parts(200, "Ok".to_string(), items)
    }

    fn failure(error: &IdentityError) -> Self {
        Self::from_parts(error.status_code(), error.to_string(), Vec::new())
    }

    fn to_json(&self) -> String {
        serde_json::to_string(self).unwrap_or_else(|_| ENCODING_FAILURE_BODY.to_string())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserResponse {
    pub response_code: u16,
    pub message: String,
    pub users: Vec<UserRecord>,
}

impl Envelope for UserResponse {
    type Item = UserRecord;

    fn from_parts(response_code: u16, message: String, items: Vec<UserRecord>) -> Self {
        Self {
            response_code,
            message,
            users: items,
        }
    }

    fn response_code(&self) -> u16 {
        self.response_code
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PoolResponse {
    pub response_code: u16,
    pub message: String,
    pub pools: Vec<PoolRecord>,
}

impl Envelope for PoolResponse {
    type Item = PoolRecord;

    fn from_parts(response_code: u16, message: String, items: Vec<PoolRecord>) -> Self {
        Self {
            response_code,
            message,
            pools: items,
        }
    }

    fn response_code(&self) -> u16 {
        self.response_code
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClientResponse {
    pub response_code: u16,
    pub message: String,
    pub clients: Vec<ClientRecord>,
}

impl Envelope for ClientResponse {
    type Item = ClientRecord;

    fn from_parts(response_code: u16, message: String, items: Vec<ClientRecord>) -> Self {
        Self {
            response_code,
            message,
            clients: items,
        }
    }

    fn response_code(&self) -> u16 {
        self.response_code
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResponse {
    pub response_code: u16,
    pub message: String,
    pub sessions: Vec<SessionRecord>,
}

impl Envelope for AuthResponse {
    type Item = SessionRecord;

    fn from_parts(response_code: u16, message: String, items: Vec<SessionRecord>) -> Self {
        Self {
            response_code,
            message,
            sessions: items,
        }
    }

    fn response_code(&self) -> u16 {
        self.response_code
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResetResponse {
    pub response_code: u16,
    pub message: String,
    pub deliveries: Vec<CodeDeliveryRecord>,
}

impl Envelope for ResetResponse {
    type Item = CodeDeliveryRecord;

    fn from_parts(response_code: u16, message: String, items: Vec<CodeDeliveryRecord>) -> Self {
        Self {
            response_code,
            message,
            deliveries: items,
        }
    }

    fn response_code(&self) -> u16 {
        self.response_code
    }
}
