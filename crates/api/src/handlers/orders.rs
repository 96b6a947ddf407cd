//! Handlers for the `/orders` resource.
//!
//! A `POST` creates an order *sheet*: one or more line items sharing an
//! order number, written in a single transaction. All other operations act
//! on individual line items.

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::Json;
use chrono::{NaiveDate, Utc};
use serde_json::json;
use stitchdesk_core::error::CoreError;
use stitchdesk_core::order_type::OrderType;
use stitchdesk_core::outcome::{validate_outcome, OutcomeStatus};
use stitchdesk_core::roles::Role;
use stitchdesk_core::sizes::{total_quantity, validate_sizes};
use stitchdesk_core::types::DbId;
use stitchdesk_core::workflow::{transition_allowed, ProductionStatus};
use stitchdesk_db::models::notification::{KIND_ALERT, KIND_INFO};
use stitchdesk_db::models::order::{
    CreateOrder, CreateOrderItem, NewOrderItem, OrderChanges, OrderRecord, UpdateOrder,
};
use stitchdesk_db::repositories::{NotificationRepo, OrderRepo};

use crate::error::{AppError, AppResult};
use crate::middleware::auth::AuthUser;
use crate::middleware::rbac::RequireSales;
use crate::state::AppState;

/// GET /orders
///
/// List every order item, newest first, with the author's public identity
/// denormalized onto each record.
pub async fn list_orders(
    _auth: AuthUser,
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OrderRecord>>> {
    let orders = OrderRepo::list_with_authors(&state.pool).await?;
    Ok(Json(orders))
}

/// POST /orders
///
/// Create a sheet with its line items. Sales (or admin) only; the author
/// is always the authenticated caller, never client-supplied. Returns the
/// created item for a single-item sheet, or the array of items otherwise.
pub async fn create_order(
    RequireSales(auth): RequireSales,
    State(state): State<AppState>,
    Json(draft): Json<CreateOrder>,
) -> AppResult<(StatusCode, Json<serde_json::Value>)> {
    if draft.order_number.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Order number must not be empty".into(),
        )));
    }
    if draft.client_name.trim().is_empty() {
        return Err(AppError::Core(CoreError::Validation(
            "Client name must not be empty".into(),
        )));
    }

    let drafts: Vec<CreateOrderItem> = match &draft.items {
        Some(items) if items.is_empty() => {
            return Err(AppError::Core(CoreError::Validation(
                "A sheet needs at least one item".into(),
            )));
        }
        Some(items) => items.clone(),
        None => vec![draft.item.clone()],
    };

    let items = drafts
        .iter()
        .enumerate()
        .map(|(position, item)| resolve_item(position as i32, &draft, item))
        .collect::<Result<Vec<_>, _>>()?;

    let created =
        OrderRepo::create_sheet(&state.pool, auth.user_id, draft.order_number.trim(), &items)
            .await?;

    NotificationRepo::create(
        &state.pool,
        auth.user_id,
        "Order created",
        &format!(
            "Order {} created with {} item(s)",
            draft.order_number.trim(),
            created.len()
        ),
        KIND_INFO,
    )
    .await?;

    tracing::info!(
        user_id = auth.user_id,
        order_number = %draft.order_number.trim(),
        items = created.len(),
        "Order sheet created"
    );

    let body = if created.len() == 1 {
        json!(created[0])
    } else {
        json!(created)
    };
    Ok((StatusCode::CREATED, Json(body)))
}

/// GET /orders/{id}
pub async fn get_order(
    _auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<OrderRecord>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;
    Ok(Json(order))
}

/// PUT /orders/{id}
///
/// Typed partial update. Sizes changes recompute the total; a status change
/// goes through the transition policy; logging an outcome forces the status
/// to `Delivered` in the same single-row write.
pub async fn update_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
    Json(input): Json<UpdateOrder>,
) -> AppResult<Json<OrderRecord>> {
    let current = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;

    let changes = build_changes(&current, &input)?;
    let alteration_logged = matches!(
        changes.outcome_status.as_deref(),
        Some(s) if s == OutcomeStatus::AlterationRequired.as_str()
    );

    let updated = OrderRepo::update(&state.pool, id, &changes)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;

    if alteration_logged {
        NotificationRepo::create(
            &state.pool,
            updated.author.id,
            "Alteration required",
            &format!("Order {} needs alteration after delivery", updated.order_number),
            KIND_ALERT,
        )
        .await?;
    }

    tracing::info!(user_id = auth.user_id, order_id = id, "Order updated");

    Ok(Json(updated))
}

/// DELETE /orders/{id}
///
/// Allowed for admins and for the authoring user.
pub async fn delete_order(
    auth: AuthUser,
    State(state): State<AppState>,
    Path(id): Path<DbId>,
) -> AppResult<Json<serde_json::Value>> {
    let order = OrderRepo::find_by_id(&state.pool, id)
        .await?
        .ok_or(AppError::Core(CoreError::NotFound { entity: "Order", id }))?;

    if auth.role != Role::Admin && auth.user_id != order.author.id {
        return Err(AppError::Core(CoreError::Forbidden(
            "Only an admin or the order's author may delete it".into(),
        )));
    }

    if !OrderRepo::delete(&state.pool, id).await? {
        return Err(AppError::Core(CoreError::NotFound { entity: "Order", id }));
    }

    tracing::info!(user_id = auth.user_id, order_id = id, "Order deleted");

    Ok(Json(json!({ "message": "Order deleted" })))
}

// ---------------------------------------------------------------------------
// Draft resolution
// ---------------------------------------------------------------------------

/// Turn one item draft into a fully resolved insert row: order type
/// defaulted, sizes validated, total recomputed.
fn resolve_item(
    position: i32,
    draft: &CreateOrder,
    item: &CreateOrderItem,
) -> Result<NewOrderItem, AppError> {
    let order_type: OrderType = item
        .order_type
        .as_deref()
        .map(str::parse)
        .transpose()?
        .unwrap_or_default();

    let sizes = item.sizes.clone().unwrap_or_default();
    validate_sizes(&sizes)?;
    let total = total_quantity(&sizes);

    Ok(NewOrderItem {
        position,
        order_type: order_type.as_str().to_string(),
        order_date: draft.order_date,
        production_start_date: draft.production_start_date,
        delivery_date: draft.delivery_date,
        client_name: draft.client_name.trim().to_string(),
        brand_name: draft.brand_name.clone(),
        product_name: item.product_name.clone().unwrap_or_default(),
        description: item.description.clone(),
        fabrics: json!(item.fabrics.clone().unwrap_or_default()),
        color: item.color.clone(),
        sleeve_style: item.sleeve_style.clone(),
        suppliers: json!(item.suppliers.clone().unwrap_or_default()),
        accessories: json!(item.accessories.clone().unwrap_or_default()),
        pattern_reference: item.pattern_reference.clone(),
        prices: json!(item.prices.clone().unwrap_or_default()),
        units: json!(item.units.clone().unwrap_or_default()),
        manufacturer: item.manufacturer.clone(),
        embellishments: json!(item.embellishments.clone().unwrap_or_default()),
        sizes: json!(sizes),
        total_quantity: total,
        images: json!(item.images.clone().unwrap_or_default()),
        logo_image: item.logo_image.clone(),
        notes: item.notes.clone(),
    })
}

/// Parse a date from its canonical `YYYY-MM-DD` textual form.
fn parse_date(field: &str, value: &str) -> Result<NaiveDate, AppError> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d").map_err(|_| {
        AppError::Core(CoreError::Validation(format!(
            "{field} must be a date in YYYY-MM-DD form"
        )))
    })
}

/// Validate a partial update against the current record and produce the
/// typed change set for the single-row UPDATE.
fn build_changes(current: &OrderRecord, input: &UpdateOrder) -> Result<OrderChanges, AppError> {
    let mut changes = OrderChanges::default();

    if let Some(order_type) = &input.order_type {
        let parsed: OrderType = order_type.parse()?;
        changes.order_type = Some(parsed.as_str().to_string());
    }

    if let Some(value) = &input.order_date {
        changes.order_date = Some(parse_date("order_date", value)?);
    }
    if let Some(value) = &input.production_start_date {
        changes.production_start_date = Some(parse_date("production_start_date", value)?);
    }
    if let Some(value) = &input.delivery_date {
        changes.delivery_date = Some(parse_date("delivery_date", value)?);
    }

    changes.client_name = input.client_name.clone();
    changes.brand_name = input.brand_name.clone();
    changes.product_name = input.product_name.clone();
    changes.description = input.description.clone();
    changes.color = input.color.clone();
    changes.sleeve_style = input.sleeve_style.clone();
    changes.pattern_reference = input.pattern_reference.clone();
    changes.manufacturer = input.manufacturer.clone();
    changes.logo_image = input.logo_image.clone();
    changes.notes = input.notes.clone();

    changes.fabrics = input.fabrics.as_ref().map(|v| json!(v));
    changes.suppliers = input.suppliers.as_ref().map(|v| json!(v));
    changes.accessories = input.accessories.as_ref().map(|v| json!(v));
    changes.prices = input.prices.as_ref().map(|v| json!(v));
    changes.units = input.units.as_ref().map(|v| json!(v));
    changes.embellishments = input.embellishments.as_ref().map(|v| json!(v));
    changes.images = input.images.as_ref().map(|v| json!(v));

    // The total is never taken from the client; it is recomputed whenever
    // the breakdown changes.
    if let Some(sizes) = &input.sizes {
        validate_sizes(sizes)?;
        changes.sizes = Some(json!(sizes));
        changes.total_quantity = Some(total_quantity(sizes));
    }

    if let Some(status) = &input.status {
        let to: ProductionStatus = status.parse()?;
        let from: ProductionStatus = current
            .status
            .parse()
            .map_err(|_| AppError::InternalError(format!("Stored status is invalid: {}", current.status)))?;
        if !transition_allowed(from, to) {
            return Err(AppError::Core(CoreError::Validation(format!(
                "Status transition {from} -> {to} is not allowed"
            ))));
        }
        changes.status = Some(to.as_str().to_string());
    }

    if let Some(outcome) = &input.outcome_status {
        let parsed: OutcomeStatus = outcome.parse()?;
        let solution = input
            .outcome_solution
            .clone()
            .or_else(|| current.outcome_solution.clone());
        validate_outcome(parsed, solution.as_deref())?;

        changes.outcome_status = Some(parsed.as_str().to_string());
        changes.outcome_reason = input.outcome_reason.clone();
        changes.outcome_solution = input.outcome_solution.clone();
        changes.outcome_comments = input.outcome_comments.clone();
        changes.outcome_logged_at = Some(Utc::now());

        // Logging an outcome forces delivery, whatever the payload said.
        changes.status = Some(ProductionStatus::Delivered.as_str().to_string());
    }

    Ok(changes)
}
