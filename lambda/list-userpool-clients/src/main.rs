use aws_config::BehaviorVersion;
use aws_lambda_events::event::apigw::{ApiGatewayProxyRequest, ApiGatewayProxyResponse};
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

use cognito_shared::gateway::{parse_body, render};
use cognito_shared::{
    ClientQueryRequest, ClientResponse, CognitoIdentityService, Envelope, IamRoleService,
    PoolService,
};

async fn function_handler(
    service: &PoolService<CognitoIdentityService, IamRoleService>,
    event: LambdaEvent<ApiGatewayProxyRequest>,
) -> Result<ApiGatewayProxyResponse, Error> {
    let request: ClientQueryRequest = match parse_body(&event.payload) {
        Ok(request) => request,
        Err(e) => return Ok(render(&ClientResponse::failure(&e))),
    };

    info!("List app clients request for pool {}", request.pool_id);
    Ok(render(&service.list_clients(&request).await))
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
