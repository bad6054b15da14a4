use async_trait::async_trait;
use common::{AddressId, CartId, CustomerId, OrderId};
use domain::{Address, Cart, Customer, DefaultsUpdate, Order};
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use crate::error::Result;
use crate::repository::{AddressRepository, CartRepository, CustomerRepository, OrderRepository};

/// PostgreSQL-backed storage.
///
/// Aggregates are persisted as JSONB documents keyed by id, with the columns
/// needed for lookups (owner, placement time) promoted alongside.
#[derive(Clone)]
pub struct PostgresStore {
    pool: PgPool,
}

impl PostgresStore {
    /// Creates a new PostgreSQL store.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Gets a reference to the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Runs the database migrations.
    pub async fn run_migrations(&self) -> std::result::Result<(), sqlx::migrate::MigrateError> {
        sqlx::migrate!("../../migrations").run(&self.pool).await
    }

    fn row_to_doc<T: serde::de::DeserializeOwned>(row: &PgRow) -> Result<T> {
        let data: serde_json::Value = row.try_get("data")?;
        Ok(serde_json::from_value(data)?)
    }
}

#[async_trait]
impl CustomerRepository for PostgresStore {
    async fn find_customer(&self, id: CustomerId) -> Result<Option<Customer>> {
        let row = sqlx::query("SELECT data FROM customers WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_doc).transpose()
    }

    #[tracing::instrument(skip(self, customer), fields(customer_id = %customer.id))]
    async fn save_customer(&self, customer: &Customer) -> Result<()> {
        let data = serde_json::to_value(customer)?;

        sqlx::query(
            r#"
            INSERT INTO customers (id, data)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(customer.id.as_uuid())
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update_default_addresses(
        &self,
        customer: &Customer,
        update: DefaultsUpdate,
    ) -> Result<()> {
        if update.billing_changed {
            let value = serde_json::to_value(customer.default_billing)?;
            sqlx::query("UPDATE customers SET data = jsonb_set(data, '{default_billing}', $2) WHERE id = $1")
                .bind(customer.id.as_uuid())
                .bind(value)
                .execute(&self.pool)
                .await?;
        }

        if update.shipping_changed {
            let value = serde_json::to_value(customer.default_shipping)?;
            sqlx::query("UPDATE customers SET data = jsonb_set(data, '{default_shipping}', $2) WHERE id = $1")
                .bind(customer.id.as_uuid())
                .bind(value)
                .execute(&self.pool)
                .await?;
        }

        Ok(())
    }
}

#[async_trait]
impl AddressRepository for PostgresStore {
    async fn find_address(&self, id: AddressId) -> Result<Option<Address>> {
        let row = sqlx::query("SELECT data FROM addresses WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_doc).transpose()
    }

    async fn find_addresses_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Address>> {
        let rows = sqlx::query(
            "SELECT data FROM addresses WHERE customer_id = $1 ORDER BY created_at ASC",
        )
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_doc).collect()
    }

    #[tracing::instrument(skip(self, address))]
    async fn save_address(&self, address: &Address) -> Result<AddressId> {
        let id = address.id.unwrap_or_else(AddressId::new);
        let mut record = address.clone();
        record.id = Some(id);
        let data = serde_json::to_value(&record)?;
        let customer_id: Option<Uuid> = record.customer_id.map(|c| c.as_uuid());

        sqlx::query(
            r#"
            INSERT INTO addresses (id, customer_id, data)
            VALUES ($1, $2, $3)
            ON CONFLICT (id) DO UPDATE SET customer_id = EXCLUDED.customer_id, data = EXCLUDED.data
            "#,
        )
        .bind(id.as_uuid())
        .bind(customer_id)
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(id)
    }

    async fn delete_address(&self, id: AddressId) -> Result<()> {
        sqlx::query("DELETE FROM addresses WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await?;

        Ok(())
    }
}

#[async_trait]
impl CartRepository for PostgresStore {
    async fn find_cart(&self, id: CartId) -> Result<Option<Cart>> {
        let row = sqlx::query("SELECT data FROM carts WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_doc).transpose()
    }

    #[tracing::instrument(skip(self, cart), fields(cart_id = %cart.id()))]
    async fn save_cart(&self, cart: &Cart) -> Result<()> {
        let data = serde_json::to_value(cart)?;

        sqlx::query(
            r#"
            INSERT INTO carts (id, data)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET data = EXCLUDED.data
            "#,
        )
        .bind(cart.id().as_uuid())
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[async_trait]
impl OrderRepository for PostgresStore {
    #[tracing::instrument(skip(self, order), fields(order_id = %order.id))]
    async fn insert_order(&self, order: &Order) -> Result<()> {
        let data = serde_json::to_value(order)?;
        let customer_id: Option<Uuid> = order.customer_id.map(|c| c.as_uuid());

        sqlx::query(
            r#"
            INSERT INTO orders (id, customer_id, placed_at, data)
            VALUES ($1, $2, $3, $4)
            "#,
        )
        .bind(order.id.as_uuid())
        .bind(customer_id)
        .bind(order.placed_at)
        .bind(data)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn find_order(&self, id: OrderId) -> Result<Option<Order>> {
        let row = sqlx::query("SELECT data FROM orders WHERE id = $1")
            .bind(id.as_uuid())
            .fetch_optional(&self.pool)
            .await?;

        row.as_ref().map(Self::row_to_doc).transpose()
    }

    async fn find_orders_for_customer(&self, customer_id: CustomerId) -> Result<Vec<Order>> {
        let rows = sqlx::query(
            "SELECT data FROM orders WHERE customer_id = $1 ORDER BY placed_at DESC",
        )
        .bind(customer_id.as_uuid())
        .fetch_all(&self.pool)
        .await?;

        rows.iter().map(Self::row_to_doc).collect()
    }
}
