use std::net::TcpListener;
use std::sync::{Arc, Mutex};

use axum::{body::Body, http::Request, routing::post, Json, Router};
use serde_json::{json, Value};

/// Serve `app` on an ephemeral local port and return its base URL.
pub async fn spawn_upstream(app: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").expect("bind ephemeral port");
    let addr = listener.local_addr().expect("local addr");
    let server = axum::Server::from_tcp(listener)
        .expect("server from listener")
        .serve(app.into_make_service());
    tokio::spawn(async move {
        let _ = server.await;
    });
    format!("http://{}", addr)
}

/// Completion stub answering every call with `content`; returns the
/// completions URL and the user prompts it saw.
pub async fn completion_stub(content: &'static str) -> (String, Arc<Mutex<Vec<String>>>) {
    let prompts = Arc::new(Mutex::new(Vec::new()));
    let sink = prompts.clone();
    let app = Router::new().route(
        "/chat/completions",
        post(move |Json(body): Json<Value>| {
            let sink = sink.clone();
            async move {
                let prompt = body["messages"][1]["content"].as_str().unwrap_or_default().to_string();
                sink.lock().unwrap().push(prompt);
                Json(json!({"choices": [{"message": {"content": content}}]}))
            }
        }),
    );
    (format!("{}/chat/completions", spawn_upstream(app).await), prompts)
}

pub fn json_post(uri: &str, body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

pub async fn body_json(response: axum::response::Response) -> Value {
    let bytes = hyper::body::to_bytes(response.into_body()).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
}
