use aws_config::BehaviorVersion;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use cognito_shared::gateway::{path_parameter_i32, render};
use cognito_shared::{
    CognitoIdentityService, Envelope, IamRoleService, PoolResponse, PoolService,
};

async fn function_handler(
    service: &PoolService<CognitoIdentityService, IamRoleService>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let max = match path_parameter_i32(&event.payload, "max") {
        Ok(max) => max,
        Err(e) => return Ok(render(&PoolResponse::failure(&e))),
    };

    info!("List user pools request, max {}", max);
    Ok(render(&service.list_user_pools(max).await))
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
    let service = PoolService::new(
        CognitoIdentityService::new(&config),
        IamRoleService::new(&config),
    );
    let service = &service;

    run(service_fn(move |event| async move {
        function_handler(service, event).await
    }))
    .await
}
