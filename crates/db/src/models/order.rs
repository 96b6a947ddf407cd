//! Order entity models and DTOs.
//!
//! An order *sheet* is one logical customer order; each row in `orders` is
//! one manufacturing line item on a sheet. Items share the sheet's order
//! number by construction.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::types::Json;
use sqlx::FromRow;
use stitchdesk_core::sizes::SizeEntry;
use stitchdesk_core::types::{DbId, Timestamp};

/// A row from the `order_sheets` table.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderSheet {
    pub id: DbId,
    pub order_number: String,
    pub created_by: DbId,
    pub created_at: Timestamp,
}

/// The authoring user's public identity, denormalized onto order records.
/// Never includes the password hash.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderAuthor {
    #[sqlx(rename = "author_id")]
    pub id: DbId,
    #[sqlx(rename = "author_name")]
    pub name: String,
    #[sqlx(rename = "author_email")]
    pub email: String,
    #[sqlx(rename = "author_role")]
    pub role: String,
}

/// A line item joined with its sheet's order number and its author.
///
/// This is the shape every order endpoint returns. Dates serialize in ISO
/// `YYYY-MM-DD` form, the single canonical textual rendering.
#[derive(Debug, Clone, FromRow, Serialize)]
pub struct OrderRecord {
    pub id: DbId,
    pub sheet_id: DbId,
    pub order_number: String,
    pub position: i32,

    pub order_type: String,
    pub order_date: NaiveDate,
    pub production_start_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,

    pub client_name: String,
    pub brand_name: Option<String>,

    pub product_name: String,
    pub description: Option<String>,
    pub fabrics: Json<Vec<String>>,
    pub color: Option<String>,
    pub sleeve_style: Option<String>,
    pub suppliers: Json<Vec<String>>,
    pub accessories: Json<Vec<String>>,
    pub pattern_reference: Option<String>,

    pub prices: Json<Vec<String>>,
    pub units: Json<Vec<String>>,
    pub manufacturer: Option<String>,
    pub embellishments: Json<Vec<String>>,

    pub sizes: Json<Vec<SizeEntry>>,
    pub total_quantity: i64,

    pub images: Json<Vec<String>>,
    pub logo_image: Option<String>,

    pub status: String,
    pub notes: Option<String>,

    pub outcome_status: Option<String>,
    pub outcome_reason: Option<String>,
    pub outcome_solution: Option<String>,
    pub outcome_comments: Option<String>,
    pub outcome_logged_at: Option<Timestamp>,

    pub created_at: Timestamp,
    pub updated_at: Timestamp,

    #[sqlx(flatten)]
    pub author: OrderAuthor,
}

/// One line item in a sheet-creation request. Every field is optional so
/// the same shape works both inside `items` and flattened at the top level
/// of [`CreateOrder`] for single-item sheets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CreateOrderItem {
    pub order_type: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub fabrics: Option<Vec<String>>,
    pub color: Option<String>,
    pub sleeve_style: Option<String>,
    pub suppliers: Option<Vec<String>>,
    pub accessories: Option<Vec<String>>,
    pub pattern_reference: Option<String>,
    pub prices: Option<Vec<String>>,
    pub units: Option<Vec<String>>,
    pub manufacturer: Option<String>,
    pub embellishments: Option<Vec<String>>,
    pub sizes: Option<Vec<SizeEntry>>,
    pub images: Option<Vec<String>>,
    pub logo_image: Option<String>,
    pub notes: Option<String>,
}

/// Request body for `POST /orders`.
///
/// A sheet carries one or more items. Clients may either send an `items`
/// array or, for a single-item sheet, put the item fields directly at the
/// top level (they flatten into [`CreateOrderItem`]).
#[derive(Debug, Deserialize)]
pub struct CreateOrder {
    pub order_number: String,
    pub order_date: Option<NaiveDate>,
    pub production_start_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub client_name: String,
    pub brand_name: Option<String>,
    pub items: Option<Vec<CreateOrderItem>>,
    #[serde(flatten)]
    pub item: CreateOrderItem,
}

/// A fully resolved line item, ready to insert. Built by the handler from
/// [`CreateOrder`]; `total_quantity` has already been recomputed from
/// `sizes`.
#[derive(Debug)]
pub struct NewOrderItem {
    pub position: i32,
    pub order_type: String,
    pub order_date: Option<NaiveDate>,
    pub production_start_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub client_name: String,
    pub brand_name: Option<String>,
    pub product_name: String,
    pub description: Option<String>,
    pub fabrics: serde_json::Value,
    pub color: Option<String>,
    pub sleeve_style: Option<String>,
    pub suppliers: serde_json::Value,
    pub accessories: serde_json::Value,
    pub pattern_reference: Option<String>,
    pub prices: serde_json::Value,
    pub units: serde_json::Value,
    pub manufacturer: Option<String>,
    pub embellishments: serde_json::Value,
    pub sizes: serde_json::Value,
    pub total_quantity: i64,
    pub images: serde_json::Value,
    pub logo_image: Option<String>,
    pub notes: Option<String>,
}

/// Request body for `PUT /orders/{id}`: a typed partial update.
///
/// Every mutable field is enumerated; unknown fields are rejected instead
/// of being merged onto the record. Date fields arrive in their textual
/// `YYYY-MM-DD` form and are parsed before persisting.
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct UpdateOrder {
    pub order_type: Option<String>,
    pub order_date: Option<String>,
    pub production_start_date: Option<String>,
    pub delivery_date: Option<String>,
    pub client_name: Option<String>,
    pub brand_name: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub fabrics: Option<Vec<String>>,
    pub color: Option<String>,
    pub sleeve_style: Option<String>,
    pub suppliers: Option<Vec<String>>,
    pub accessories: Option<Vec<String>>,
    pub pattern_reference: Option<String>,
    pub prices: Option<Vec<String>>,
    pub units: Option<Vec<String>>,
    pub manufacturer: Option<String>,
    pub embellishments: Option<Vec<String>>,
    pub sizes: Option<Vec<SizeEntry>>,
    pub images: Option<Vec<String>>,
    pub logo_image: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub outcome_status: Option<String>,
    pub outcome_reason: Option<String>,
    pub outcome_solution: Option<String>,
    pub outcome_comments: Option<String>,
}

/// A validated, typed set of changes ready for a single-row UPDATE.
///
/// Built by the order handler from [`UpdateOrder`]: dates parsed, status
/// checked against the transition policy (and forced to `Delivered` when an
/// outcome is logged), `total_quantity` recomputed whenever `sizes` is
/// present.
#[derive(Debug, Default)]
pub struct OrderChanges {
    pub order_type: Option<String>,
    pub order_date: Option<NaiveDate>,
    pub production_start_date: Option<NaiveDate>,
    pub delivery_date: Option<NaiveDate>,
    pub client_name: Option<String>,
    pub brand_name: Option<String>,
    pub product_name: Option<String>,
    pub description: Option<String>,
    pub fabrics: Option<serde_json::Value>,
    pub color: Option<String>,
    pub sleeve_style: Option<String>,
    pub suppliers: Option<serde_json::Value>,
    pub accessories: Option<serde_json::Value>,
    pub pattern_reference: Option<String>,
    pub prices: Option<serde_json::Value>,
    pub units: Option<serde_json::Value>,
    pub manufacturer: Option<String>,
    pub embellishments: Option<serde_json::Value>,
    pub sizes: Option<serde_json::Value>,
    pub total_quantity: Option<i64>,
    pub images: Option<serde_json::Value>,
    pub logo_image: Option<String>,
    pub status: Option<String>,
    pub notes: Option<String>,
    pub outcome_status: Option<String>,
    pub outcome_reason: Option<String>,
    pub outcome_solution: Option<String>,
    pub outcome_comments: Option<String>,
    pub outcome_logged_at: Option<Timestamp>,
}
