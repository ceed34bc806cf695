/// Which signal ended the server.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ShutdownSignal {
    CtrlC,
    Terminate,
}

/// Resolves once Ctrl+C or SIGTERM arrives.
///
/// # Panics
///
/// Panics if the Ctrl+C or SIGTERM signal handler cannot be installed.
async fn wait_for_signal() -> ShutdownSignal {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => ShutdownSignal::CtrlC,
        () = terminate => ShutdownSignal::Terminate,
    }
}

/// Future handed to `axum::serve(..).with_graceful_shutdown`.
pub async fn shutdown_signal() {
    match wait_for_signal().await {
        ShutdownSignal::CtrlC => tracing::info!("Ctrl+C pressed, draining in-flight requests"),
        ShutdownSignal::Terminate => tracing::info!("Received SIGTERM, draining in-flight requests"),
    }
}
