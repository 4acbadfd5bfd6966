use axum::http::{header, Method};
use axum::{middleware, routing::get, Router};
use contracts::domain::a001_equipment::Equipment;
use contracts::domain::a002_product::Product;
use contracts::domain::a003_leave_request::LeaveRequest;
use contracts::domain::a004_overtime::OvertimeEntry;
use contracts::domain::a005_quotation::Quotation;
use contracts::domain::a006_spare_part::SparePart;
use contracts::domain::a007_work_order::WorkOrder;
use tower_http::cors::{Any, CorsLayer};

use crate::domain::collection::Collection;
use crate::handlers::records;
use crate::shared::state::AppState;
use crate::system::middleware::request_logger::request_logger;

/// Маршруты одной коллекции под /api/<collection_name>
fn collection_routes<T: Collection>() -> Router<AppState> {
    let base = format!("/api/{}", T::collection_name());
    Router::new()
        .route(&base, get(records::list_all::<T>).post(records::create::<T>))
        .route(&format!("{}/list", base), get(records::list_page::<T>))
        .route(&format!("{}/summary", base), get(records::summary::<T>))
        .route(&format!("{}/export.csv", base), get(records::export_csv::<T>))
        .route(
            &format!("{}/testdata", base),
            axum::routing::post(records::insert_test_data::<T>),
        )
        .route(
            &format!("{}/:id", base),
            get(records::get_by_id::<T>)
                .put(records::replace::<T>)
                .patch(records::patch::<T>)
                .delete(records::delete::<T>),
        )
}

/// Конфигурация всех роутов приложения
pub fn configure_routes(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers([header::CONTENT_TYPE, header::ACCEPT]);

    Router::new()
        .route("/health", get(|| async { "ok" }))
        // ========================================
        // COLLECTIONS
        // ========================================
        .merge(collection_routes::<Equipment>())
        .merge(collection_routes::<Product>())
        .merge(collection_routes::<LeaveRequest>())
        .merge(collection_routes::<OvertimeEntry>())
        .merge(collection_routes::<Quotation>())
        .merge(collection_routes::<SparePart>())
        .merge(collection_routes::<WorkOrder>())
        .layer(middleware::from_fn(request_logger))
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::data::db::connect_in_memory;

    #[tokio::test]
    async fn test_routes_build_without_conflicts() {
        let conn = connect_in_memory().await.unwrap();
        let _router = configure_routes(AppState::new(conn));
    }
}
