use tokio::net::TcpListener;

use folio::logger::Logger;
use folio::{router, AppState, Config, WikiError};

#[tokio::main]
async fn main() -> Result<(), WikiError> {
    if let Err(e) = Logger::init() {
        eprintln!("Failed to install logger: {}", e);
    }

    let config = Config::new();
    let addr = config.socket_addr();
    let state = AppState::new(config)?;
    state.pages.ensure_dir()?;

    let app = router(state);

    log::info!("Wiki listening on http://{}", addr);
    let listener = TcpListener::bind(addr).await?;
    axum::serve(listener, app).await.map_err(WikiError::from)
}
