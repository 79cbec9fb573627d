use zoomingo::env_config;
use zoomingo::server::create_router;
use zoomingo::storage::Store;

#[tokio::main]
async fn main() {
    env_logger::init();

    let db_path = env_config::database_path();
    let store = match Store::connect(&db_path).await {
        Ok(s) => s,
        Err(e) => {
            log::error!("failed to open database {db_path}: {e}");
            std::process::exit(1);
        }
    };
    log::info!("database ready at {db_path}");

    let app = create_router(store);

    let port = env_config::server_port();
    let listener = match tokio::net::TcpListener::bind(format!("0.0.0.0:{port}")).await {
        Ok(l) => l,
        Err(e) => {
            log::error!("failed to bind port {port}: {e}");
            std::process::exit(1);
        }
    };
    log::info!("server running on port {port}, press Ctrl+C to stop");

    if let Err(e) = axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
    {
        log::error!("server error: {e}");
        std::process::exit(1);
    }

    log::info!("server stopped");
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install CTRL+C signal handler");
}
