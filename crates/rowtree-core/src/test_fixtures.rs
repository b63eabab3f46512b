//! Shared sales-schema fixtures for tree and bind tests.

use crate::model::{AssocModel, DescriptorRegistry, EmbeddedModel, EntityDescriptor, PropertyModel};

/// invoice → order (one) → details (many) → product (one), plus an
/// optional coupon on the order and a customer with embedded groups.
pub(crate) fn sales_registry() -> DescriptorRegistry {
    let mut registry = DescriptorRegistry::new();

    registry
        .register(
            EntityDescriptor::new("invoice", "s_invoice", PropertyModel::new("id", "id"))
                .property(PropertyModel::new("number", "invoice_number"))
                .assoc(AssocModel::one("order", "order"))
                .assoc(AssocModel::one("customer", "customer")),
        )
        .unwrap();

    registry
        .register(
            EntityDescriptor::new("order", "s_order", PropertyModel::new("id", "id"))
                .property(PropertyModel::new("status", "status"))
                .assoc(AssocModel::many("details", "order_detail"))
                .assoc(AssocModel::optional_one("coupon", "coupon")),
        )
        .unwrap();

    registry
        .register(
            EntityDescriptor::new(
                "order_detail",
                "s_order_detail",
                PropertyModel::new("id", "id"),
            )
            .property(PropertyModel::new("qty", "order_qty"))
            .assoc(AssocModel::one("product", "product")),
        )
        .unwrap();

    registry
        .register(
            EntityDescriptor::new("product", "s_product", PropertyModel::new("id", "id"))
                .property(PropertyModel::new("sku", "sku")),
        )
        .unwrap();

    registry
        .register(
            EntityDescriptor::new("coupon", "s_coupon", PropertyModel::new("id", "id"))
                .property(PropertyModel::new("code", "code")),
        )
        .unwrap();

    registry.register(customer_descriptor()).unwrap();

    registry
}

/// Customer with two embedded groups: a three-scalar address and an
/// audit group whose only scalar is read-only.
pub(crate) fn customer_descriptor() -> EntityDescriptor {
    EntityDescriptor::new("customer", "s_customer", PropertyModel::new("id", "id"))
        .property(PropertyModel::new("name", "customer_name"))
        .embedded(EmbeddedModel::new(
            "address",
            vec![
                PropertyModel::new("street", "addr_street"),
                PropertyModel::new("city", "addr_city"),
                PropertyModel::new("zip", "addr_zip"),
            ],
        ))
        .embedded(EmbeddedModel::new(
            "audit",
            vec![PropertyModel::new("created_at", "created_at").read_only()],
        ))
}
