use aws_config::BehaviorVersion;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use cognito_shared::gateway::{parse_body, render};
use cognito_shared::{CognitoIdentityService, Envelope, UserRequest, UserResponse, UserService};

async fn function_handler(
    service: &UserService<CognitoIdentityService>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request: UserRequest = match parse_body(&event.payload) {
        Ok(request) => request,
        Err(e) => return Ok(render(&UserResponse::failure(&e))),
    };

    info!(
        "Create user request for {} in pool {}",
        request.user.email_address, request.user_pool_id
    );
    Ok(render(&service.add_user(&request).await))
}

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_max_level(tracing::Level::INFO)
        .with_target(false)
        .without_time()
        .init();

    // One client per process, built at cold start and shared by invocations.
    let config = aws_config::load_defaults(BehaviorVersion::latest()).await;
    let service = UserService::new(CognitoIdentityService::new(&config));
    let service = &service;

    run(service_fn(move |event| async move {
        function_handler(service, event).await
    }))
    .await
}
