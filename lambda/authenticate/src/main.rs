use aws_config::BehaviorVersion;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use cognito_shared::gateway::{parse_body, render};
use cognito_shared::{AuthResponse, CognitoIdentityService, Envelope, LoginRequest, UserService};

async fn function_handler(
    service: &UserService<CognitoIdentityService>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request: LoginRequest = match parse_body(&event.payload) {
        Ok(request) => request,
        Err(e) => return Ok(render(&AuthResponse::failure(&e))),
    };

    info!("Authentication request for {}", request.email_address);
    Ok(render(&service.authenticate(&request).await))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let service = UserService::new(CognitoIdentityService::new(&config));
    let service = &service;

    run(service_fn(move |event| async move {
        function_handler(service, event).await
    }))
    .await
}
