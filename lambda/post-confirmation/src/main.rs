use aws_config::BehaviorVersion;
use aws_lambda_events::event::cognito::CognitoEventUserPoolsPostConfirmation;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::{error, info};

use cognito_shared::{CognitoIdentityService, UserService};

/// Marks the confirmed user's email as verified. An update failure is
/// returned to the runtime so the confirmation flow surfaces it.
async fn function_handler(
    service: &UserService<CognitoIdentityService>,
    event: LambdaEvent<CognitoEventUserPoolsPostConfirmation>,
) -> Result<CognitoEventUserPoolsPostConfirmation, Error> {
    let response_event = event.payload;
    let header = &response_event.cognito_event_user_pools_header;

    let (user_pool_id, user_name) = match (&header.user_pool_id, &header.user_name) {
        (Some(pool_id), Some(name)) => (pool_id.clone(), name.clone()),
        _ => {
            info!("Post-confirmation trigger without pool or user name; nothing to do");
            return Ok(response_event);
        }
    };

    info!(
        "Post-confirmation trigger for user {} in pool {}",
        user_name, user_pool_id
    );

    if let Err(e) = service.verify_email(&user_pool_id, &user_name).await {
        error!("Could not mark email verified for {}: {}", user_name, e);
        return Err(Box::new(e));
    }

    Ok(response_event)
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
