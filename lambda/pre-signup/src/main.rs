use aws_lambda_events::event::cognito::CognitoEventUserPoolsPreSignup;
use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use tracing::info;

/// Confirms every sign-up and marks the email verified so no confirmation
/// code round-trip is needed. This trigger never blocks registration.
async fn function_handler(
    event: LambdaEvent<CognitoEventUserPoolsPreSignup>,
) -> Result<CognitoEventUserPoolsPreSignup, Error> {
    let mut response_event = event.payload;

    info!(
        "Pre-signup trigger for user {:?} in pool {:?}",
        response_event.cognito_event_user_pools_header.user_name,
        response_event.cognito_event_user_pools_header.user_pool_id
    );

    response_event.response.auto_confirm_user = true;
    response_event.response.auto_verify_email = true;

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

    run(service_fn(function_handler)).await
}
