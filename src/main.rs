//! Vendora - booking and availability coordination service.
//!
//! Long-running service that:
//! - Serves the booking, availability, and chat REST API
//! - Coordinates slot claims through transactional PostgreSQL writes
//! - Fans out chat and vendor location events over WebSocket

use std::sync::Arc;

use axum::http::HeaderValue;
use axum::Router;
use sqlx::postgres::PgPoolOptions;
use tower_http::compression::CompressionLayer;
use tower_http::cors::{Any, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;

use vendora::adapters::http::{
    availability_routes, booking_routes, chat_routes, health_routes, AvailabilityHandlers,
    BookingHandlers, ChatHandlers,
};
use vendora::adapters::postgres::{
    PgBookingStore, PgConversationStore, PgMenuReader, PgSlotLedger,
};
use vendora::adapters::realtime::{
    realtime_router, BroadcastHub, ConnectionRegistry, RealtimeState,
};
use vendora::application::handlers::booking::{
    CancelBookingHandler, CreateBookingHandler, GetAvailabilityHandler, GetBookingHandler,
    ListBookingsHandler, SetBookingStatusHandler, SetScheduleHandler,
};
use vendora::application::handlers::chat::{
    ListConversationsHandler, ListMessagesHandler, SendMessageHandler, StartConversationHandler,
};
use vendora::config::{AppConfig, ServerConfig};
use vendora::ports::{
    BookingStore, ConversationStore, EventBroadcaster, MenuReader, SlotLedger,
};

type BoxError = Box<dyn std::error::Error + Send + Sync>;

#[tokio::main]
async fn main() -> Result<(), BoxError> {
    let config = AppConfig::load()?;
    config.validate()?;

    // RUST_LOG wins over the configured default filter
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.server.log_level.clone().into()),
        )
        .init();

    tracing::info!(
        environment = ?config.server.environment,
        "Starting vendora"
    );

    let pool = PgPoolOptions::new()
        .min_connections(config.database.min_connections)
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .idle_timeout(config.database.idle_timeout())
        .max_lifetime(config.database.max_lifetime())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        tracing::info!("Running database migrations");
        sqlx::migrate!("./migrations").run(&pool).await?;
    }

    // Storage adapters
    let booking_store: Arc<dyn BookingStore> = Arc::new(PgBookingStore::new(
        pool.clone(),
        config.database.transaction_timeout(),
    ));
    let slot_ledger: Arc<dyn SlotLedger> = Arc::new(PgSlotLedger::new(pool.clone()));
    let menu_reader: Arc<dyn MenuReader> = Arc::new(PgMenuReader::new(pool.clone()));
    let conversation_store: Arc<dyn ConversationStore> =
        Arc::new(PgConversationStore::new(pool.clone()));

    // Realtime fan-out
    let registry = Arc::new(ConnectionRegistry::new());
    let hub = Arc::new(BroadcastHub::new(config.realtime.channel_capacity));
    let broadcaster: Arc<dyn EventBroadcaster> = hub.clone();

    // Application handlers
    let booking_handlers = BookingHandlers::new(
        Arc::new(CreateBookingHandler::new(
            menu_reader.clone(),
            slot_ledger.clone(),
            booking_store.clone(),
        )),
        Arc::new(CancelBookingHandler::new(booking_store.clone())),
        Arc::new(SetBookingStatusHandler::new(booking_store.clone())),
        Arc::new(GetBookingHandler::new(booking_store.clone())),
        Arc::new(ListBookingsHandler::new(booking_store.clone())),
    );
    let availability_handlers = AvailabilityHandlers::new(
        Arc::new(GetAvailabilityHandler::new(slot_ledger.clone())),
        Arc::new(SetScheduleHandler::new(slot_ledger.clone())),
    );
    let chat_handlers = ChatHandlers::new(
        Arc::new(StartConversationHandler::new(conversation_store.clone())),
        Arc::new(SendMessageHandler::new(
            conversation_store.clone(),
            broadcaster,
        )),
        Arc::new(ListMessagesHandler::new(conversation_store.clone())),
        Arc::new(ListConversationsHandler::new(conversation_store.clone())),
    );
    let realtime_state = RealtimeState::new(registry, hub);

    let app = Router::new()
        .merge(health_routes())
        .nest("/api/bookings", booking_routes(booking_handlers))
        .nest("/api/vendors", availability_routes(availability_handlers))
        .nest("/api/conversations", chat_routes(chat_handlers))
        .merge(realtime_router().with_state(realtime_state))
        .layer(build_cors(&config.server))
        .layer(CompressionLayer::new())
        .layer(TimeoutLayer::new(config.server.request_timeout()))
        .layer(TraceLayer::new_for_http())
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid));

    let addr = config.server.socket_addr();
    let listener = tokio::net::TcpListener::bind(addr).await?;
    tracing::info!("vendora listening on {addr}");

    axum::serve(listener, app).await?;

    Ok(())
}

/// Restrictive CORS when origins are configured, permissive otherwise.
fn build_cors(config: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = config
        .cors_origins_list()
        .iter()
        .filter_map(|origin| origin.parse().ok())
        .collect();

    if origins.is_empty() {
        CorsLayer::permissive()
    } else {
        CorsLayer::new()
            .allow_origin(origins)
            .allow_methods(Any)
            .allow_headers(Any)
    }
}
