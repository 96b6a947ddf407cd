//! Repository for the `order_sheets` and `orders` tables.
//!
//! Sheet creation is the only multi-row write in the system and runs in a
//! single transaction: the sheet row plus all of its line items commit or
//! roll back together, so a duplicate order number can never leave partial
//! items behind. Every other order write is a single-row statement.

use sqlx::{PgPool, Postgres, Transaction};
use stitchdesk_core::types::DbId;

use crate::models::order::{NewOrderItem, OrderChanges, OrderRecord};

/// Column list for joined order queries (`orders o`, `order_sheets s`,
/// `users u`).
const COLUMNS: &str = "o.id, o.sheet_id, s.order_number, o.position, \
    o.order_type, o.order_date, o.production_start_date, o.delivery_date, \
    o.client_name, o.brand_name, \
    o.product_name, o.description, o.fabrics, o.color, o.sleeve_style, \
    o.suppliers, o.accessories, o.pattern_reference, \
    o.prices, o.units, o.manufacturer, o.embellishments, \
    o.sizes, o.total_quantity, o.images, o.logo_image, \
    o.status, o.notes, \
    o.outcome_status, o.outcome_reason, o.outcome_solution, o.outcome_comments, \
    o.outcome_logged_at, \
    o.created_at, o.updated_at, \
    u.id AS author_id, u.name AS author_name, u.email AS author_email, \
    u.role AS author_role";

/// Join clause shared by all order selects.
const FROM: &str = "FROM orders o \
    JOIN order_sheets s ON s.id = o.sheet_id \
    JOIN users u ON u.id = o.created_by";

/// Provides CRUD operations for order sheets and their line items.
pub struct OrderRepo;

impl OrderRepo {
    /// Create a sheet and its line items in one transaction, returning the
    /// created items in position order.
    ///
    /// A duplicate order number violates `uq_order_sheets_order_number` and
    /// rolls the whole creation back.
    pub async fn create_sheet(
        pool: &PgPool,
        author_id: DbId,
        order_number: &str,
        items: &[NewOrderItem],
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let sheet_id: DbId = sqlx::query_scalar(
            "INSERT INTO order_sheets (order_number, created_by) \
             VALUES ($1, $2) \
             RETURNING id",
        )
        .bind(order_number)
        .bind(author_id)
        .fetch_one(&mut *tx)
        .await?;

        for item in items {
            Self::insert_item(&mut tx, sheet_id, author_id, item).await?;
        }

        tx.commit().await?;

        Self::list_for_sheet(pool, sheet_id).await
    }

    /// Insert one line item row within a sheet-creation transaction.
    async fn insert_item(
        tx: &mut Transaction<'_, Postgres>,
        sheet_id: DbId,
        author_id: DbId,
        item: &NewOrderItem,
    ) -> Result<DbId, sqlx::Error> {
        sqlx::query_scalar(
            "INSERT INTO orders (sheet_id, position, order_type, \
                order_date, production_start_date, delivery_date, \
                client_name, brand_name, \
                product_name, description, fabrics, color, sleeve_style, \
                suppliers, accessories, pattern_reference, \
                prices, units, manufacturer, embellishments, \
                sizes, total_quantity, images, logo_image, notes, created_by) \
             VALUES ($1, $2, $3, COALESCE($4, CURRENT_DATE), $5, $6, \
                $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, \
                $17, $18, $19, $20, $21, $22, $23, $24, $25, $26) \
             RETURNING id",
        )
        .bind(sheet_id)
        .bind(item.position)
        .bind(&item.order_type)
        .bind(item.order_date)
        .bind(item.production_start_date)
        .bind(item.delivery_date)
        .bind(&item.client_name)
        .bind(&item.brand_name)
        .bind(&item.product_name)
        .bind(&item.description)
        .bind(&item.fabrics)
        .bind(&item.color)
        .bind(&item.sleeve_style)
        .bind(&item.suppliers)
        .bind(&item.accessories)
        .bind(&item.pattern_reference)
        .bind(&item.prices)
        .bind(&item.units)
        .bind(&item.manufacturer)
        .bind(&item.embellishments)
        .bind(&item.sizes)
        .bind(item.total_quantity)
        .bind(&item.images)
        .bind(&item.logo_image)
        .bind(&item.notes)
        .bind(author_id)
        .fetch_one(&mut **tx)
        .await
    }

    /// List every order item, newest first.
    pub async fn list_with_authors(pool: &PgPool) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM} \
             ORDER BY o.created_at DESC, o.id DESC"
        );
        sqlx::query_as::<_, OrderRecord>(&query)
            .fetch_all(pool)
            .await
    }

    /// List the items of one sheet in position order.
    pub async fn list_for_sheet(
        pool: &PgPool,
        sheet_id: DbId,
    ) -> Result<Vec<OrderRecord>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} {FROM} \
             WHERE o.sheet_id = $1 \
             ORDER BY o.position, o.id"
        );
        sqlx::query_as::<_, OrderRecord>(&query)
            .bind(sheet_id)
            .fetch_all(pool)
            .await
    }

    /// Find one order item by id.
    pub async fn find_by_id(
        pool: &PgPool,
        id: DbId,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let query = format!("SELECT {COLUMNS} {FROM} WHERE o.id = $1");
        sqlx::query_as::<_, OrderRecord>(&query)
            .bind(id)
            .fetch_optional(pool)
            .await
    }

    /// Apply a validated partial update as one single-row write. Absent
    /// fields keep their current value. The caller has already recomputed
    /// `total_quantity` from `sizes` and forced `status` to `Delivered`
    /// when an outcome is present, so status and outcome land atomically.
    ///
    /// Returns the updated record, or `None` if no item has this id.
    pub async fn update(
        pool: &PgPool,
        id: DbId,
        changes: &OrderChanges,
    ) -> Result<Option<OrderRecord>, sqlx::Error> {
        let result = sqlx::query(
            "UPDATE orders SET \
                order_type = COALESCE($2, order_type), \
                order_date = COALESCE($3, order_date), \
                production_start_date = COALESCE($4, production_start_date), \
                delivery_date = COALESCE($5, delivery_date), \
                client_name = COALESCE($6, client_name), \
                brand_name = COALESCE($7, brand_name), \
                product_name = COALESCE($8, product_name), \
                description = COALESCE($9, description), \
                fabrics = COALESCE($10, fabrics), \
                color = COALESCE($11, color), \
                sleeve_style = COALESCE($12, sleeve_style), \
                suppliers = COALESCE($13, suppliers), \
                accessories = COALESCE($14, accessories), \
                pattern_reference = COALESCE($15, pattern_reference), \
                prices = COALESCE($16, prices), \
                units = COALESCE($17, units), \
                manufacturer = COALESCE($18, manufacturer), \
                embellishments = COALESCE($19, embellishments), \
                sizes = COALESCE($20, sizes), \
                total_quantity = COALESCE($21, total_quantity), \
                images = COALESCE($22, images), \
                logo_image = COALESCE($23, logo_image), \
                status = COALESCE($24, status), \
                notes = COALESCE($25, notes), \
                outcome_status = COALESCE($26, outcome_status), \
                outcome_reason = COALESCE($27, outcome_reason), \
                outcome_solution = COALESCE($28, outcome_solution), \
                outcome_comments = COALESCE($29, outcome_comments), \
                outcome_logged_at = COALESCE($30, outcome_logged_at), \
                updated_at = NOW() \
             WHERE id = $1",
        )
        .bind(id)
        .bind(&changes.order_type)
        .bind(changes.order_date)
        .bind(changes.production_start_date)
        .bind(changes.delivery_date)
        .bind(&changes.client_name)
        .bind(&changes.brand_name)
        .bind(&changes.product_name)
        .bind(&changes.description)
        .bind(&changes.fabrics)
        .bind(&changes.color)
        .bind(&changes.sleeve_style)
        .bind(&changes.suppliers)
        .bind(&changes.accessories)
        .bind(&changes.pattern_reference)
        .bind(&changes.prices)
        .bind(&changes.units)
        .bind(&changes.manufacturer)
        .bind(&changes.embellishments)
        .bind(&changes.sizes)
        .bind(changes.total_quantity)
        .bind(&changes.images)
        .bind(&changes.logo_image)
        .bind(&changes.status)
        .bind(&changes.notes)
        .bind(&changes.outcome_status)
        .bind(&changes.outcome_reason)
        .bind(&changes.outcome_solution)
        .bind(&changes.outcome_comments)
        .bind(changes.outcome_logged_at)
        .execute(pool)
        .await?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        Self::find_by_id(pool, id).await
    }

    /// Delete one line item. When the item was the last one on its sheet,
    /// the now-empty sheet is removed too so the order number becomes
    /// available again.
    ///
    /// Returns `true` if the item existed.
    pub async fn delete(pool: &PgPool, id: DbId) -> Result<bool, sqlx::Error> {
        let mut tx = pool.begin().await?;

        let sheet_id: Option<DbId> =
            sqlx::query_scalar("DELETE FROM orders WHERE id = $1 RETURNING sheet_id")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await?;

        let Some(sheet_id) = sheet_id else {
            tx.rollback().await?;
            return Ok(false);
        };

        sqlx::query(
            "DELETE FROM order_sheets \
             WHERE id = $1 \
               AND NOT EXISTS (SELECT 1 FROM orders WHERE sheet_id = $1)",
        )
        .bind(sheet_id)
        .execute(&mut *tx)
        .await?;

        tx.commit().await?;
        Ok(true)
    }
}
