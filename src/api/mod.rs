pub mod handlers;

pub use handlers::*;

use crate::service::InvoiceService;
use axum::{routing::{get, post}, Router};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// All HTTP routes, with request tracing
pub fn router(service: Arc<InvoiceService>) -> Router {
    let invoice_routes = Router::new()
        .route("/api/members/:id/invoice", get(member_invoice))
        .route("/api/members/:id/invoice.csv", get(member_invoice_csv))
        .route("/api/invoices/batch", post(batch_invoices))
        .with_state(service);

    Router::new()
        .route("/health", get(health_check))
        .merge(invoice_routes)
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
}
