// Connection handling module
// Serves HTTP/1.x on a single accepted TCP connection

use hyper::server::conn::http1;
use hyper::service::service_fn;
use hyper_util::rt::TokioIo;
use std::sync::Arc;
use std::time::Duration;

use crate::config::AppState;
use crate::handler;
use crate::logger;

/// Handle a single connection in a spawned task.
///
/// This function:
/// 1. Wraps the TCP stream in `TokioIo`
/// 2. Configures HTTP/1 keep-alive
/// 3. Serves the connection with the request handler
/// 4. Applies the optional connection timeout
///
/// Failures are logged and end only this connection.
pub fn handle_connection(stream: tokio::net::TcpStream, state: Arc<AppState>) {
    tokio::spawn(async move {
        let io = TokioIo::new(stream);

        let timeout_secs = state.config.performance.connection_timeout;

        let mut builder = http1::Builder::new();
        builder.keep_alive(state.config.performance.keep_alive);

        let conn = builder.serve_connection(
            io,
            service_fn(move |req| handler::handle_request(req, Arc::clone(&state))),
        );

        if timeout_secs == 0 {
            if let Err(err) = conn.await {
                logger::log_connection_error(&err);
            }
            return;
        }

        match tokio::time::timeout(Duration::from_secs(timeout_secs), conn).await {
            Ok(Ok(())) => {}
            Ok(Err(err)) => logger::log_connection_error(&err),
            Err(_) => {
                logger::log_debug(&format!(
                    "Connection timeout after {timeout_secs} seconds"
                ));
            }
        }
    });
}
