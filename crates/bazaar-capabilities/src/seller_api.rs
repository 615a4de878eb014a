//! Mocked seller-platform API client.
//!
//! The client is an external collaborator with a fixed interface; the SDK
//! only needs its type identity for injection. All methods return canned
//! data so applications can be developed and tested offline.

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use bazaar_core::ExecContext;

/// A sellable product variant awaiting packaging.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Variant {
    /// Variant identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// A warehouse intake time slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CapacitySlot {
    /// Slot identifier.
    pub id: u64,
    /// Slot opening time (`HH:MM`).
    pub from: String,
    /// Slot closing time (`HH:MM`).
    pub to: String,
}

/// Outcome of a package creation request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageReceipt {
    /// Whether the platform accepted the package.
    pub success: bool,
}

/// A customer order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    /// Order identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
    /// Product ids contained in the order.
    pub products: Vec<u64>,
    /// Total order price.
    pub total_price: u64,
}

/// A listed product.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    /// Product identifier.
    pub id: u64,
    /// Display name.
    pub name: String,
}

/// Client for the seller platform, constructed per call from the execution
/// context's API key.
#[derive(Debug, Clone)]
pub struct SellerApi {
    api_key: Option<String>,
}

impl SellerApi {
    /// Construct a client from the context's credential.
    #[must_use]
    pub fn new(ctx: &ExecContext) -> Self {
        Self {
            api_key: ctx.seller_api_key().map(str::to_owned),
        }
    }

    /// Whether a credential was configured.
    #[must_use]
    pub fn has_credentials(&self) -> bool {
        self.api_key.is_some()
    }

    /// Variants that should be packaged within the window.
    #[must_use]
    pub fn should_package_variants(&self, from_date: &str, to_date: &str) -> Vec<Variant> {
        info!(from_date, to_date, "Fetching variants");
        vec![
            Variant {
                id: 1,
                name: "Variant 1".to_string(),
            },
            Variant {
                id: 2,
                name: "Variant 2".to_string(),
            },
        ]
    }

    /// Intake capacity slots for a warehouse.
    #[must_use]
    pub fn warehouse_capacity(&self, warehouse_id: u64) -> Vec<CapacitySlot> {
        info!(warehouse_id, "Fetching warehouse capacity");
        vec![
            CapacitySlot {
                id: 101,
                from: "09:00".to_string(),
                to: "17:00".to_string(),
            },
            CapacitySlot {
                id: 102,
                from: "17:00".to_string(),
                to: "23:00".to_string(),
            },
        ]
    }

    /// Create a package for `variants` at the given warehouse slot.
    #[must_use]
    pub fn create_package(
        &self,
        variants: &[Variant],
        warehouse_id: u64,
        capacity_id: u64,
    ) -> PackageReceipt {
        info!(
            variant_count = variants.len(),
            warehouse_id, capacity_id, "Creating package"
        );
        debug!(?variants, "Package contents");
        PackageReceipt { success: true }
    }

    /// Orders placed within the window.
    #[must_use]
    pub fn orders(&self, from_date: &str, to_date: &str) -> Vec<Order> {
        info!(from_date, to_date, "Fetching orders");
        vec![
            Order {
                id: 1,
                name: "Order 1".to_string(),
                products: vec![1, 2],
                total_price: 100,
            },
            Order {
                id: 2,
                name: "Order 2".to_string(),
                products: vec![2],
                total_price: 50,
            },
        ]
    }

    /// Products listed within the window.
    #[must_use]
    pub fn products(&self, from_date: &str, to_date: &str) -> Vec<Product> {
        info!(from_date, to_date, "Fetching products");
        vec![
            Product {
                id: 1,
                name: "Product 1".to_string(),
            },
            Product {
                id: 2,
                name: "Product 2".to_string(),
            },
        ]
    }
}
