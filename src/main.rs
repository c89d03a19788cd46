use std::{process, time::Duration};

use quire::{
    application::error::AppError,
    config,
    infra::{app, error::InfraError, memory::InMemoryRepositories, telemetry},
};
use tracing::{Dispatch, Level, dispatcher, error, info, warn};
use tracing_subscriber::fmt as tracing_fmt;

#[tokio::main]
async fn main() {
    if let Err(error) = run().await {
        report_application_error(&error);
        process::exit(1);
    }
}

fn report_application_error(error: &AppError) {
    if dispatcher::has_been_set() {
        error!(error = %error, "application error");
        return;
    }

    let subscriber = tracing_fmt().with_max_level(Level::ERROR).finish();
    let dispatch = Dispatch::new(subscriber);
    dispatcher::with_default(&dispatch, || {
        error!(error = %error, "application error");
    });
}

async fn run() -> Result<(), AppError> {
    let (cli_args, settings) = config::load_with_cli()
        .map_err(|err| AppError::unexpected(format!("failed to load configuration: {err}")))?;

    let command = cli_args
        .command
        .unwrap_or(config::Command::Serve(Box::<config::ServeArgs>::default()));

    telemetry::init(&settings.logging).map_err(AppError::from)?;

    match command {
        config::Command::Serve(_) => run_serve(settings).await,
    }
}

async fn run_serve(settings: config::Settings) -> Result<(), AppError> {
    let repositories = if settings.site.seed_demo_content {
        InMemoryRepositories::with_demo_content()
    } else {
        InMemoryRepositories::empty()
    };

    if settings.admin.access_token.is_none() {
        warn!(
            target = "quire::bootstrap",
            "Admin area is open; set admin.access_token to require a token"
        );
    }

    let router = app::build_app(repositories, &settings)?;

    let listener = tokio::net::TcpListener::bind(settings.server.addr)
        .await
        .map_err(|err| AppError::from(InfraError::from(err)))?;

    info!(
        target = "quire::bootstrap",
        addr = %settings.server.addr,
        seeded = settings.site.seed_demo_content,
        latency_ms = settings.mutations.simulated_latency.as_millis() as u64,
        "Serving"
    );

    axum::serve(listener, router.into_make_service())
        .with_graceful_shutdown(shutdown_signal(settings.server.graceful_shutdown))
        .await
        .map_err(|err| AppError::unexpected(format!("server error: {err}")))?;

    info!(target = "quire::bootstrap", "Server stopped");
    Ok(())
}

/// Resolves on Ctrl-C (or SIGTERM on unix), then arms a hard deadline so
/// lingering SSE streams cannot hold the process open.
async fn shutdown_signal(grace: Duration) {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(target = "quire::bootstrap", error = %err, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                error!(target = "quire::bootstrap", error = %err, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    info!(
        target = "quire::bootstrap",
        grace_seconds = grace.as_secs(),
        "Shutdown requested"
    );

    tokio::spawn(async move {
        tokio::time::sleep(grace).await;
        warn!(target = "quire::bootstrap", "Graceful shutdown timed out");
        process::exit(0);
    });
}
