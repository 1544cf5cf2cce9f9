//! Vigia server entrypoint.
//!
//! Wires the file-backed contact directory, the Plivo call gateway, and the
//! cron scheduler into the HTTP application, then serves it.

use std::error::Error;
use std::sync::Arc;
use std::time::Duration;

use axum::Router;
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use vigia::adapters::http::{
    checkin_routes, contact_routes, schedule_routes, CheckInHandlers, ContactHandlers,
    ScheduleHandlers,
};
use vigia::adapters::scheduler::CronScheduler;
use vigia::adapters::storage::FileContactStore;
use vigia::adapters::telephony::{PlivoCallGateway, PlivoConfig};
use vigia::application::handlers::checkin::{
    CheckInPolicy, ConfirmationCallbackHandler, EscalateHandler, ScheduleCheckInHandler,
    SpeechCallbackHandler, StartCheckInHandler,
};
use vigia::application::handlers::contacts::{
    ListContactsHandler, RemoveContactHandler, UpsertContactHandler,
};
use vigia::config::AppConfig;
use vigia::domain::foundation::PhoneNumberValidator;
use vigia::ports::{CallGateway, CheckInScheduler, ContactStore};

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .or_else(|_| EnvFilter::try_new(&config.server.log_level))
                .unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with(tracing_subscriber::fmt::layer().with_target(false))
        .init();

    let validator = PhoneNumberValidator::new(config.checkin.region());
    let policy = CheckInPolicy::from(&config.checkin);

    let store: Arc<dyn ContactStore> = Arc::new(FileContactStore::new(&config.contacts_file));
    let gateway: Arc<dyn CallGateway> =
        Arc::new(PlivoCallGateway::new(PlivoConfig::from(&config.telephony)));

    let start_handler = Arc::new(StartCheckInHandler::new(
        store.clone(),
        gateway.clone(),
        validator.clone(),
    ));
    let escalate_handler = Arc::new(EscalateHandler::new(
        store.clone(),
        gateway.clone(),
        validator.clone(),
    ));
    let speech_handler = Arc::new(SpeechCallbackHandler::new(
        escalate_handler,
        policy.clone(),
    ));
    let confirmation_handler = Arc::new(ConfirmationCallbackHandler::new(policy));

    let scheduler: Arc<dyn CheckInScheduler> = Arc::new(CronScheduler::new(config.schedule.tz()?));
    let schedule_handler = Arc::new(ScheduleCheckInHandler::new(
        scheduler,
        start_handler.clone(),
    ));

    let triggers = config.schedule.load_triggers()?;
    schedule_handler.register_table(&triggers).await?;

    let upsert_handler = Arc::new(UpsertContactHandler::new(store.clone(), validator));
    let remove_handler = Arc::new(RemoveContactHandler::new(store.clone()));
    let list_handler = Arc::new(ListContactsHandler::new(store));

    let app = Router::new()
        .merge(checkin_routes(CheckInHandlers::new(
            start_handler,
            speech_handler,
            confirmation_handler,
            gateway,
        )))
        .merge(contact_routes(ContactHandlers::new(
            upsert_handler,
            remove_handler,
            list_handler,
        )))
        .merge(schedule_routes(ScheduleHandlers::new(schedule_handler)))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, environment = ?config.server.environment, "starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
