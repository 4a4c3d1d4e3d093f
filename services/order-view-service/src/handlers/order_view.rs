use std::time::Instant;

use axum::{
    extract::{Path, Query, State},
    Json,
};
use common::metrics;
use read_model::InvoiceView;
use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ApiError;
use crate::state::AppState;

/// Route segment owned by this endpoint. A path tail equal to the route
/// name means no identifier was supplied in the path.
pub const ROUTE_NAME: &str = "order-view";

#[derive(Debug, Default, Deserialize)]
pub struct OrderViewParams {
    pub id: Option<String>,
}

/// Get the order view with the identifier in the path,
/// e.g. `GET /order-view/abc123`
pub async fn order_view_by_path(
    State(state): State<AppState>,
    Path(tail): Path<String>,
    Query(params): Query<OrderViewParams>,
) -> Result<Json<InvoiceView>, ApiError> {
    let started = Instant::now();
    let result = match resolve_order_ref(Some(tail), params.id) {
        Ok(order_ref) => render_order_view(&state, &order_ref).await,
        Err(e) => Err(e),
    };
    record_outcome(&result, started);
    result
}

/// Get the order view with the identifier in the query string,
/// e.g. `GET /order-view?id=abc123`
pub async fn order_view_by_query(
    State(state): State<AppState>,
    Query(params): Query<OrderViewParams>,
) -> Result<Json<InvoiceView>, ApiError> {
    let started = Instant::now();
    let result = match resolve_order_ref(None, params.id) {
        Ok(order_ref) => render_order_view(&state, &order_ref).await,
        Err(e) => Err(e),
    };
    record_outcome(&result, started);
    result
}

/// CORS preflight short-circuit. Never touches the store.
pub async fn preflight() -> &'static str {
    "ok"
}

/// Resolve the order identifier: path tail first, then the `id` query
/// parameter when the tail is empty or is the route's own name.
fn resolve_order_ref(
    path_tail: Option<String>,
    query_id: Option<String>,
) -> Result<String, ApiError> {
    path_tail
        .filter(|tail| !tail.is_empty() && tail != ROUTE_NAME)
        .or_else(|| query_id.filter(|id| !id.is_empty()))
        .ok_or(ApiError::MissingOrderId)
}

async fn render_order_view(
    state: &AppState,
    order_ref: &str,
) -> Result<Json<InvoiceView>, ApiError> {
    info!("Assembling order view: {}", order_ref);

    // Required lookup: a miss and a failed read are the same to the client
    let bill = match state.repository.find_bill(order_ref).await {
        Ok(Some(bill)) => bill,
        Ok(None) => {
            info!("Order not found: {}", order_ref);
            return Err(ApiError::OrderNotFound);
        }
        Err(e) => {
            warn!("Bill lookup failed for {}: {}", order_ref, e);
            return Err(ApiError::OrderNotFound);
        }
    };

    // Optional lookups: a miss or a failed read degrades to defaults
    let profile = match state.repository.find_shop_profile(&bill.user_id).await {
        Ok(profile) => profile,
        Err(e) => {
            warn!("Shop profile lookup failed for {}: {}", bill.user_id, e);
            None
        }
    };

    let items = match state.repository.list_bill_items(order_ref).await {
        Ok(items) => items,
        Err(e) => {
            warn!("Bill item lookup failed for {}: {}", order_ref, e);
            Vec::new()
        }
    };

    info!("Assembled order view: {}", order_ref);
    Ok(Json(InvoiceView::assemble(order_ref, bill, profile, items)))
}

fn record_outcome(result: &Result<Json<InvoiceView>, ApiError>, started: Instant) {
    let status = match result {
        Ok(_) => "ok",
        Err(ApiError::MissingOrderId) => "missing_id",
        Err(ApiError::OrderNotFound) => "not_found",
        Err(ApiError::Internal(_)) => "error",
    };
    metrics::record_view_request(status, started.elapsed().as_secs_f64());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{sample_bill, StubRepository};
    use read_model::view::{PLACEHOLDER_CUSTOMER_NAME, PLACEHOLDER_SHOP_NAME};
    use read_model::ShopProfile;

    #[test]
    fn test_resolve_prefers_path_tail() {
        let resolved = resolve_order_ref(Some("abc123".to_string()), Some("xyz".to_string()));
        assert_eq!(resolved.unwrap(), "abc123");
    }

    #[test]
    fn test_resolve_falls_back_to_query_when_tail_is_route_name() {
        let resolved = resolve_order_ref(Some(ROUTE_NAME.to_string()), Some("xyz".to_string()));
        assert_eq!(resolved.unwrap(), "xyz");
    }

    #[test]
    fn test_resolve_falls_back_to_query_when_tail_is_empty() {
        let resolved = resolve_order_ref(Some(String::new()), Some("xyz".to_string()));
        assert_eq!(resolved.unwrap(), "xyz");
    }

    #[test]
    fn test_resolve_requires_some_identifier() {
        assert!(matches!(
            resolve_order_ref(None, None),
            Err(ApiError::MissingOrderId)
        ));
        assert!(matches!(
            resolve_order_ref(Some(ROUTE_NAME.to_string()), None),
            Err(ApiError::MissingOrderId)
        ));
        assert!(matches!(
            resolve_order_ref(None, Some(String::new())),
            Err(ApiError::MissingOrderId)
        ));
    }

    #[tokio::test]
    async fn test_unknown_order_is_not_found() {
        let state = StubRepository::empty().into_state();

        let result = order_view_by_path(
            State(state),
            Path("missing".to_string()),
            Query(OrderViewParams::default()),
        )
        .await;

        assert!(matches!(result, Err(ApiError::OrderNotFound)));
    }

    #[tokio::test]
    async fn test_bill_lookup_failure_is_not_found() {
        let mut stub = StubRepository::with_bill(sample_bill("abc123"));
        stub.fail_bill = true;
        let state = stub.into_state();

        let result = order_view_by_path(
            State(state),
            Path("abc123".to_string()),
            Query(OrderViewParams::default()),
        )
        .await;

        assert!(matches!(result, Err(ApiError::OrderNotFound)));
    }

    #[tokio::test]
    async fn test_bare_bill_renders_with_defaults() {
        let mut bill = sample_bill("abc123");
        bill.bill_number = Some("INV-01".to_string());
        bill.customer_name = None;
        let state = StubRepository::with_bill(bill).into_state();

        let Json(view) = order_view_by_path(
            State(state),
            Path("abc123".to_string()),
            Query(OrderViewParams::default()),
        )
        .await
        .unwrap();

        assert_eq!(view.order.id, "INV-01");
        assert_eq!(view.order.total, 500.0);
        assert_eq!(view.customer.name, PLACEHOLDER_CUSTOMER_NAME);
        assert_eq!(view.shop.name, PLACEHOLDER_SHOP_NAME);
        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn test_profile_lookup_failure_degrades_to_defaults() {
        let mut stub = StubRepository::with_bill(sample_bill("abc123"));
        stub.profile = Some(ShopProfile {
            user_id: "user-1".to_string(),
            shop_name: Some("Acme Traders".to_string()),
            shop_address: None,
            shop_phone: None,
            shop_gst_number: None,
        });
        stub.fail_profile = true;
        let state = stub.into_state();

        let Json(view) = order_view_by_path(
            State(state),
            Path("abc123".to_string()),
            Query(OrderViewParams::default()),
        )
        .await
        .unwrap();

        assert_eq!(view.shop.name, PLACEHOLDER_SHOP_NAME);
    }

    #[tokio::test]
    async fn test_item_lookup_failure_degrades_to_empty() {
        let mut stub = StubRepository::with_bill(sample_bill("abc123"));
        stub.fail_items = true;
        let state = stub.into_state();

        let Json(view) = order_view_by_path(
            State(state),
            Path("abc123".to_string()),
            Query(OrderViewParams::default()),
        )
        .await
        .unwrap();

        assert!(view.items.is_empty());
    }

    #[tokio::test]
    async fn test_query_identifier_behaves_like_path_tail() {
        let state = StubRepository::with_bill(sample_bill("xyz")).into_state();

        let Json(view) = order_view_by_query(
            State(state),
            Query(OrderViewParams {
                id: Some("xyz".to_string()),
            }),
        )
        .await
        .unwrap();

        assert_eq!(view.order.total, 500.0);
    }

    #[tokio::test]
    async fn test_query_route_without_id_is_bad_request() {
        let state = StubRepository::empty().into_state();

        let result = order_view_by_query(State(state), Query(OrderViewParams::default())).await;

        assert!(matches!(result, Err(ApiError::MissingOrderId)));
    }

    #[tokio::test]
    async fn test_preflight_never_touches_the_store() {
        // No state is even reachable from the preflight handler
        assert_eq!(preflight().await, "ok");
    }
}
