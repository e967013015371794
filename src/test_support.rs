//! Helpers shared by the unit tests: a throwaway upstream served by axum.
use axum::Router;
use std::net::{SocketAddr, TcpListener};

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr: SocketAddr = listener.local_addr().expect("local addr");
    let server = axum::Server::from_tcp(listener)
        .expect("server from listener")
        .serve(app.into_make_service());
    tokio::spawn(async move {
        let _ = server.await;
    });
    format!("http://{}", addr)
}
