use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::middleware::Next;
use axum::response::Response;

use crate::shared::format::format_size;

/// Журнал HTTP-запросов: длительность, размер ответа, статус, метод и путь
///
/// 2xx пишется на уровне info, 4xx на warn, 5xx на error.
pub async fn request_logger(req: Request<Body>, next: Next) -> Response {
    let start = std::time::Instant::now();
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let response = next.run(req).await;
    let (parts, body) = response.into_parts();
    let status = parts.status.as_u16();

    // Тело читается целиком, чтобы узнать реальный размер
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            tracing::error!(
                "{:>5}ms | {:>10} | {} {:>6} {} | body read failed: {}",
                start.elapsed().as_millis(),
                "error",
                status,
                method,
                path,
                e
            );
            return Response::from_parts(parts, Body::default());
        }
    };

    let elapsed = start.elapsed().as_millis();
    let size = format_size(bytes.len());
    if parts.status.is_server_error() {
        tracing::error!("{:>5}ms | {:>10} | {} {:>6} {}", elapsed, size, status, method, path);
    } else if parts.status.is_client_error() {
        tracing::warn!("{:>5}ms | {:>10} | {} {:>6} {}", elapsed, size, status, method, path);
    } else {
        tracing::info!("{:>5}ms | {:>10} | {} {:>6} {}", elapsed, size, status, method, path);
    }

    Response::from_parts(parts, Body::from(bytes))
}
