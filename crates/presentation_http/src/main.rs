//! Careline HTTP Server
//!
//! Main entry point for the webhook and admin API server.

use std::sync::Arc;
use std::time::Duration;

use application::ports::{InboundParserPort, MessageGatewayPort, RecipientDirectoryPort};
use application::{AlertDispatcher, MessagePipeline, ReplyCatalog};
use infrastructure::{AppConfig, BroadcastChannel, Environment, StaticRecipientDirectory};
use integration_sms::{TwilioSmsClient, TwilioSmsConfig};
use integration_whatsapp::{WhatsAppClient, WhatsAppClientConfig, WhatsAppParser};
use presentation_http::error::set_expose_internal_errors;
use presentation_http::{AppState, StatsCollector, create_router};
use tokio::{net::TcpListener, signal};
use tower_http::cors::{Any, CorsLayer};
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "careline_server=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Careline v{} starting...", env!("CARGO_PKG_VERSION"));

    let config = AppConfig::load().unwrap_or_else(|e| {
        warn!("Failed to load config, using defaults: {}", e);
        AppConfig::default()
    });

    info!(
        host = %config.server.host,
        port = %config.server.port,
        environment = %config.environment(),
        broadcast_channel = %config.broadcast_channel,
        "Configuration loaded"
    );

    let warnings = config.security_warnings();
    for warning in &warnings {
        warn!("{warning}");
    }
    if config.environment() == Environment::Production {
        set_expose_internal_errors(false);
        if !warnings.is_empty() {
            anyhow::bail!("refusing to start in production with insecure configuration");
        }
    }

    // WhatsApp gateway, always used for inbound replies
    let whatsapp_gateway: Option<Arc<dyn MessageGatewayPort>> = match WhatsAppClient::new(
        WhatsAppClientConfig {
            access_token: config.whatsapp.access_token_str().unwrap_or("").to_string(),
            phone_number_id: config.whatsapp.phone_number_id.clone().unwrap_or_default(),
            verify_token: config.whatsapp.verify_token.clone().unwrap_or_default(),
            api_version: config.whatsapp.api_version.clone(),
        },
    ) {
        Ok(client) => Some(Arc::new(client)),
        Err(e) => {
            warn!("WhatsApp gateway not configured: {e}");
            None
        },
    };

    // Twilio gateway, only needed when selected for broadcasts
    let sms_gateway: Option<Arc<dyn MessageGatewayPort>> =
        if config.broadcast_channel == BroadcastChannel::Sms {
            match TwilioSmsClient::new(TwilioSmsConfig {
                account_sid: config.sms.account_sid.clone().unwrap_or_default(),
                auth_token: config.sms.auth_token_str().unwrap_or("").to_string(),
                from_number: config.sms.from_number.clone().unwrap_or_default(),
                webhook_token: config.sms.webhook_token_str().map(str::to_string),
            }) {
                Ok(client) => Some(Arc::new(client)),
                Err(e) => {
                    warn!("SMS gateway not configured: {e}");
                    None
                },
            }
        } else {
            None
        };

    let reply_gateway = whatsapp_gateway
        .clone()
        .ok_or_else(|| anyhow::anyhow!("whatsapp access_token and phone_number_id are required"))?;

    let parser: Arc<dyn InboundParserPort> = Arc::new(WhatsAppParser);
    let replies = ReplyCatalog::new(config.alerts.emergency_number.clone());
    let pipeline = Arc::new(MessagePipeline::new(
        parser,
        Arc::clone(&reply_gateway),
        replies,
    ));

    let broadcast_gateway = match config.broadcast_channel {
        BroadcastChannel::WhatsApp => Some(reply_gateway),
        BroadcastChannel::Sms => sms_gateway,
    };
    let dispatcher = broadcast_gateway.map(|gateway| {
        let directory: Arc<dyn RecipientDirectoryPort> = Arc::new(StaticRecipientDirectory::new(
            config.alerts.broadcast_recipients.clone(),
        ));
        Arc::new(AlertDispatcher::new(
            gateway,
            directory,
            config.alerts.emergency_number.clone(),
        ))
    });
    if dispatcher.is_none() {
        warn!("Alert dispatcher disabled: selected broadcast channel is not configured");
    }

    let state = AppState {
        pipeline,
        dispatcher,
        config: Arc::new(config.clone()),
        stats: Arc::new(StatsCollector::new()),
    };

    let app = create_router(state);

    let app = if config.server.cors_enabled {
        app.layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
    } else {
        app
    };
    let app = app
        .layer(RequestBodyLimitLayer::new(
            config.server.max_body_size_json_bytes,
        ))
        .layer(TraceLayer::new_for_http());

    let addr = format!("{}:{}", config.server.host, config.server.port);
    let listener = TcpListener::bind(&addr).await?;
    info!("Server listening on http://{}", addr);

    let shutdown_timeout = Duration::from_secs(config.server.shutdown_timeout_secs.unwrap_or(30));

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown_timeout))
        .await?;

    info!("Server shutdown complete");
    Ok(())
}

/// Wait for shutdown signals (SIGINT, SIGTERM)
async fn shutdown_signal(timeout: Duration) {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to install Ctrl+C handler: {}", e);
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            },
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            },
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown...");
        }
        () = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown...");
        }
    }

    info!("Waiting up to {:?} for connections to close...", timeout);
}
