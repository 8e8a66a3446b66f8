use super::*;
use crate::catalog::CatalogSnapshot;
use rust_decimal::Decimal;
use shared::models::{
    Coupon, DiningTable, DiscountType, LoyaltyProgram, Modifier, ModifierKind, Product,
    TenantSettings,
};
use shared::order::{CartItemInput, CartModifierInput, DeliveryAddress};
use std::str::FromStr;

const TENANT: i64 = 1;
const OTHER_TENANT: i64 = 2;

// Catalog ids (tenant 1)
const BURGER: i64 = 1; // 20.00
const SODA: i64 = 2; // 3.50
const SEASONAL_PIE: i64 = 3; // inactive
const FAMILY_PIZZA: i64 = 4; // 100.00
const EXTRA_CHEESE: i64 = 10; // 1.50
const RETIRED_SAUCE: i64 = 11; // inactive
const TABLE_T1: i64 = 1;
const CLOSED_TABLE: i64 = 2;

// Catalog ids (tenant 2)
const OTHER_PRODUCT: i64 = 50;
const OTHER_TABLE: i64 = 5;

const DEFAULT_FEE: &str = "2.50";

fn dec(s: &str) -> Decimal {
    Decimal::from_str(s).unwrap()
}

fn seeded_catalog() -> CatalogSnapshot {
    let catalog = CatalogSnapshot::new();
    let products = [
        (BURGER, TENANT, "Burger", "20.00", true),
        (SODA, TENANT, "Soda", "3.50", true),
        (SEASONAL_PIE, TENANT, "Seasonal Pie", "6.00", false),
        (FAMILY_PIZZA, TENANT, "Family Pizza", "100.00", true),
        (OTHER_PRODUCT, OTHER_TENANT, "Other Burger", "9.00", true),
    ];
    for (id, tenant_id, name, price, is_active) in products {
        catalog.upsert_product(Product {
            id,
            tenant_id,
            name: name.to_string(),
            price: dec(price),
            is_active,
        });
    }
    for (id, name, price, is_active) in [
        (EXTRA_CHEESE, "Extra cheese", "1.50", true),
        (RETIRED_SAUCE, "Retired sauce", "0.80", false),
    ] {
        catalog.upsert_modifier(Modifier {
            id,
            tenant_id: TENANT,
            kind: ModifierKind::Addon,
            name: name.to_string(),
            price: dec(price),
            is_active,
        });
    }
    for (id, tenant_id, name, is_active) in [
        (TABLE_T1, TENANT, "T1", true),
        (CLOSED_TABLE, TENANT, "Terrace", false),
        (OTHER_TABLE, OTHER_TENANT, "T5", true),
    ] {
        catalog.upsert_table(DiningTable {
            id,
            tenant_id,
            name: name.to_string(),
            capacity: 4,
            is_active,
        });
    }
    catalog
}

fn create_test_manager() -> OrdersManager {
    let storage = OrderStorage::open_in_memory().unwrap();
    OrdersManager::new(storage, Arc::new(seeded_catalog()), dec(DEFAULT_FEE))
}

fn actor() -> Actor {
    Actor::new(7, "Front Desk")
}

fn item(product_id: i64, quantity: i32) -> CartItemInput {
    CartItemInput {
        product_id,
        quantity,
        notes: None,
        modifiers: vec![],
    }
}

fn item_with_modifier(product_id: i64, quantity: i32, modifier_id: i64, mq: i32) -> CartItemInput {
    CartItemInput {
        modifiers: vec![CartModifierInput {
            modifier_id,
            quantity: mq,
        }],
        ..item(product_id, quantity)
    }
}

fn address() -> DeliveryAddress {
    DeliveryAddress {
        street: "Rua Augusta".to_string(),
        number: Some("100".to_string()),
        complement: None,
        city: "Lisboa".to_string(),
        postal_code: "1100-053".to_string(),
        reference: Some("Blue door".to_string()),
    }
}

fn request(kind: OrderKind, items: Vec<CartItemInput>) -> CreateOrderRequest {
    CreateOrderRequest {
        kind,
        customer_id: Some(42),
        items,
        delivery_address: None,
        table_id: None,
        coupon_code: None,
        delivery_fee: None,
        notes: None,
        client_request_id: None,
    }
}

fn pickup(items: Vec<CartItemInput>) -> CreateOrderRequest {
    request(OrderKind::Pickup, items)
}

fn delivery(items: Vec<CartItemInput>) -> CreateOrderRequest {
    CreateOrderRequest {
        delivery_address: Some(address()),
        ..request(OrderKind::Delivery, items)
    }
}

fn table_service(table_id: Option<i64>, items: Vec<CartItemInput>) -> CreateOrderRequest {
    CreateOrderRequest {
        table_id,
        customer_id: None,
        ..request(OrderKind::TableService, items)
    }
}

/// Create and return the order, panicking on failure
fn create(manager: &OrdersManager, req: CreateOrderRequest) -> Order {
    let outcome = manager.create_order(TENANT, actor(), req).unwrap();
    assert!(outcome.created);
    outcome.order
}

/// Expect a business failure and return it
fn expect_order_error<T: std::fmt::Debug>(result: ManagerResult<T>) -> OrderError {
    match result {
        Err(ManagerError::Order(e)) => e,
        other => panic!("expected business error, got {other:?}"),
    }
}

fn change(manager: &OrdersManager, order_id: i64, to: OrderStatus) -> ManagerResult<Order> {
    manager.change_status(
        TENANT,
        order_id,
        actor(),
        ChangeStatusRequest {
            status: to,
            notes: None,
            expected_status: None,
        },
    )
}

/// Walk an order through the given statuses
fn advance(manager: &OrdersManager, order_id: i64, path: &[OrderStatus]) -> Order {
    let mut order = None;
    for status in path {
        order = Some(change(manager, order_id, *status).unwrap());
    }
    order.expect("empty path")
}

const PICKUP_PATH: [OrderStatus; 4] = [
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::ReadyForPickup,
    OrderStatus::Delivered,
];

const DELIVERY_PATH: [OrderStatus; 5] = [
    OrderStatus::Confirmed,
    OrderStatus::Preparing,
    OrderStatus::ReadyForDelivery,
    OrderStatus::OutForDelivery,
    OrderStatus::Delivered,
];

fn coupon(id: i64, code: &str, discount_type: DiscountType, value: &str) -> Coupon {
    Coupon {
        id,
        tenant_id: TENANT,
        code: code.to_string(),
        discount_type,
        value: dec(value),
        min_order_value: None,
        max_discount_value: None,
        usage_limit: None,
        usage_count: 0,
        valid_from: None,
        valid_until: None,
        is_active: true,
        first_order_only: false,
    }
}

fn seed_loyalty(manager: &OrdersManager, min_order_value: &str) {
    manager
        .storage()
        .store_loyalty_program(&LoyaltyProgram {
            tenant_id: TENANT,
            points_per_unit: Decimal::ONE,
            min_order_value: dec(min_order_value),
            validity_days: Some(365),
            is_active: true,
        })
        .unwrap();
}

fn seed_tenant_settings(manager: &OrdersManager, delivery_fee: Option<&str>, lead_minutes: u32) {
    manager
        .storage()
        .store_tenant_settings(&TenantSettings {
            tenant_id: TENANT,
            delivery_fee: delivery_fee.map(dec),
            delivery_lead_minutes: lead_minutes,
        })
        .unwrap();
}
