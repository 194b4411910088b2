use std::sync::Arc;

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use tracing_actix_web::TracingLogger;

use otp_api::middleware::create_cors;
use otp_api::telemetry::init_tracing;
use otp_api::{configure, AppState};
use otp_core::{FormRelayTrait, OtpSessionConfig, OtpSessionManager};
use otp_infra::relay::create_form_relay;
use otp_infra::sms::{create_delivery_service, SmsDeliveryAdapter};
use otp_shared::{AppConfig, Environment};

type Relay = Box<dyn FormRelayTrait>;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    // Variables already set, including those from `.env`, take precedence
    dotenvy::from_filename(Environment::from_env().env_file()).ok();

    let config = AppConfig::from_env();
    init_tracing(&config.logging);

    tracing::info!(
        environment = %config.environment,
        "Starting OTP gateway"
    );

    let infra = otp_infra::load_config();
    let delivery = create_delivery_service(&infra.sms, config.environment)
        .context("failed to configure SMS delivery")?;
    let relay = create_form_relay(&infra.relay, config.environment)
        .context("failed to configure form relay")?;

    tracing::info!(
        sms_provider = delivery.provider_name(),
        relay_configured = infra.relay.url.is_some(),
        expose_code = config.otp.expose_code,
        "Collaborators initialized"
    );

    let manager = Arc::new(OtpSessionManager::new(
        Arc::new(delivery),
        Arc::new(relay),
        OtpSessionConfig::from(&config.otp),
    ));
    let cleanup = manager.start_cleanup();

    let state = web::Data::new(AppState::new(Arc::clone(&manager)));
    let cors_config = config.cors.clone();
    let max_payload_size = config.server.max_payload_size;
    let bind_address = config.server.bind_address();

    tracing::info!(address = %bind_address, "Binding HTTP server");

    let mut server = HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .wrap(create_cors(&cors_config))
            .wrap(TracingLogger::default())
            .configure(configure::<SmsDeliveryAdapter, Relay>(max_payload_size))
    });
    if config.server.workers > 0 {
        server = server.workers(config.server.workers);
    }

    let result = server
        .bind(&bind_address)
        .with_context(|| format!("failed to bind {bind_address}"))?
        .run()
        .await;

    if let Some(handle) = cleanup {
        handle.shutdown().await;
    }
    tracing::info!(
        active_sessions = manager.active_sessions().await,
        "OTP gateway stopped"
    );

    result.context("HTTP server error")
}
