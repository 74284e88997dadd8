//! API Gateway trigger adapter: decodes proxy request bodies into operation
//! inputs and renders response envelopes back to the proxy shape. This is
//! the only place an envelope is turned into a transport response.

use aws_lambda_events::encodings::Body;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use serde::de::DeserializeOwned;

use crate::errors::{IdentityError, IdentityResult};
use crate::response::Envelope;

/// Decode the JSON body into an operation's input type. Request structs
/// default their fields, so an empty `{}` body decodes fine and required
/// fields are enforced by handler validation, not here.
pub fn parse_body<T: DeserializeOwned>(request: &ApiGatewayProxyRequest) -> IdentityResult<T> {
    let body = request.body.as_deref().unwrap_or_default();
    serde_json::from_str(body)
        .map_err(|e| IdentityError::Validation(format!("Could not parse request body: {}", e)))
}

/// Read a named path parameter as an integer.
pub fn path_parameter_i32(request: &ApiGatewayProxyRequest, name: &str) -> IdentityResult<i32> {
    let value = request
        .path_parameters
        .get(name)
        .ok_or_else(|| IdentityError::Validation(format!("Missing path parameter: {}", name)))?;
    value
        .parse()
        .map_err(|e| IdentityError::Validation(format!("Invalid path parameter {}: {}", name, e)))
}

/// Render an envelope: the body is the envelope JSON and the status code is
/// the envelope's `response_code`.
pub fn render<E: Envelope>(envelope: &E) -> ApiGatewayProxyResponse {
    ApiGatewayProxyResponse {
        status_code: i64::from(envelope.response_code()),
        body: Some(Body::Text(envelope.to_json())),
        ..Default::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::PoolResponse;

    fn request_with_body(body: &str) -> ApiGatewayProxyRequest {
        ApiGatewayProxyRequest {
            body: Some(body.to_string()),
            ..Default::default()
        }
    }

    #[test]
    fn test_parse_body_defaults_missing_fields() {
        let request = request_with_body("{}");
        let parsed: crate::models::UserRequest = parse_body(&request).unwrap();
        assert!(parsed.user_pool_id.is_empty());
    }

    #[test]
    fn test_parse_body_rejects_malformed_json() {
        let request = request_with_body("not json");
        let result: IdentityResult<crate::models::UserRequest> = parse_body(&request);
        let err = result.unwrap_err();
        assert_eq!(err.status_code(), 500);
    }

    #[test]
    fn test_path_parameter() {
        let mut request = ApiGatewayProxyRequest::default();
        request
            .path_parameters
            .insert("max".to_string(), "25".to_string());
        assert_eq!(path_parameter_i32(&request, "max").unwrap(), 25);
        assert!(path_parameter_i32(&request, "missing").is_err());
    }

    #[test]
    fn test_render_uses_envelope_code_and_body() {
        let envelope = PoolResponse::ok(Vec::new());
        let response = render(&envelope);
        assert_eq!(response.status_code, 200);
        match response.body {
            Some(Body::Text(text)) => assert!(text.contains("\"pools\"")),
            _ => panic!("expected a text body"),
        }
    }
}
