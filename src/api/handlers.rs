use crate::error::AppError;
use crate::models::MemberInvoice;
use crate::service::{export_invoice_csv, InvoiceService};
use axum::{
    extract::{Json, Path, Query, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Optional evaluation day, `?as_of=YYYY-MM-DD`
#[derive(Debug, Default, Deserialize)]
pub struct AsOfQuery {
    pub as_of: Option<NaiveDate>,
}

/// Request body: member id list
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BatchInvoiceRequest {
    pub member_ids: Vec<i64>,
    #[serde(default)]
    pub as_of: Option<NaiveDate>,
}

/// Response body
#[derive(Debug, Serialize)]
pub struct BatchInvoiceResponse {
    pub success: bool,
    pub message: String,
    pub invoices: Option<Vec<MemberInvoice>>,
}

/// Health check
pub async fn health_check() -> &'static str {
    "OK"
}

/// Arrears invoice for one member
pub async fn member_invoice(
    State(service): State<Arc<InvoiceService>>,
    Path(member_id): Path<i64>,
    Query(query): Query<AsOfQuery>,
) -> Result<Json<MemberInvoice>, AppError> {
    let today = query.as_of.unwrap_or_else(|| service.today());
    let invoice = service.member_invoice(member_id, today).await?;
    Ok(Json(invoice))
}

/// Arrears invoice for one member as CSV
pub async fn member_invoice_csv(
    State(service): State<Arc<InvoiceService>>,
    Path(member_id): Path<i64>,
    Query(query): Query<AsOfQuery>,
) -> Result<Response, AppError> {
    let today = query.as_of.unwrap_or_else(|| service.today());
    let invoice = service.member_invoice(member_id, today).await?;

    let mut body = Vec::new();
    export_invoice_csv(std::slice::from_ref(&invoice), &mut body)?;
    Ok((StatusCode::OK, [(header::CONTENT_TYPE, "text/csv")], body).into_response())
}

/// Batch arrears invoices
pub async fn batch_invoices(
    State(service): State<Arc<InvoiceService>>,
    Json(req): Json<BatchInvoiceRequest>,
) -> Response {
    let today = req.as_of.unwrap_or_else(|| service.today());
    match service.batch_invoices(&req.member_ids, today).await {
        Ok(invoices) => {
            let in_arrears = invoices
                .iter()
                .filter(|i| !i.details.unpaid_months.is_empty())
                .count();
            let response = BatchInvoiceResponse {
                success: true,
                message: format!(
                    "Computed {} invoices as of {}, {} members in arrears",
                    invoices.len(), today, in_arrears
                ),
                invoices: Some(invoices),
            };
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => {
            tracing::error!("Batch invoices failed: {}", e);
            let response = BatchInvoiceResponse {
                success: false,
                message: format!("Error: {}", e),
                invoices: None,
            };
            (StatusCode::INTERNAL_SERVER_ERROR, Json(response)).into_response()
        }
    }
}
