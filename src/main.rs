//! HTTP server for the inventory service.
//!
//! Endpoints: health, auth (register/login/logout/me), products CRUD,
//! movement history. Configuration via env: `PORT` (default 3001),
//! `ADMIN_USER`/`ADMIN_PASSWORD` (seed account, default `admin`/`admin`),
//! `DISABLE_AUTH` (dev bypass).

use stockroom::api;
use stockroom::Auth;
use tokio::net::TcpListener;

#[tokio::main]
async fn main() {
    let _ = env_logger::try_init();
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(3001);

    let auth = Auth::from_env().expect("seed admin account");
    let app = api::create_router(auth);

    let addr = format!("0.0.0.0:{}", port);
    let listener = TcpListener::bind(&addr).await.expect("bind");
    eprintln!("listening on http://{}", addr);
    axum::serve(listener, app.into_make_service())
        .await
        .expect("serve");
}
