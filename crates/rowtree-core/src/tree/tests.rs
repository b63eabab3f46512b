use crate::{
    fetch::{FetchConfig, FetchPlan, RelationPath},
    obs::{TraceEvent, TraceSink},
    row::{BufferedRowContext, EntityRef, EntityRow, RowContext, RowError, qualified_column},
    test_fixtures::sales_registry,
    tree::{FromClause, JoinType, TreeBuilder, TreeError},
    value::Value,
};
use std::sync::{Arc, Mutex};

fn path(p: &str) -> RelationPath {
    RelationPath::try_new(p).unwrap()
}

/// order + details + product + customer, all joined.
fn joined_plan() -> FetchPlan {
    FetchPlan::new()
        .fetch(path("order"), FetchConfig::join())
        .fetch(path("order.details"), FetchConfig::join())
        .fetch(path("order.details.product"), FetchConfig::join())
        .fetch(path("customer"), FetchConfig::join())
}

fn row(pairs: &[(&str, Value)]) -> Vec<(String, Value)> {
    pairs
        .iter()
        .map(|(column, value)| ((*column).to_string(), value.clone()))
        .collect()
}

/// Full flattened row for the joined plan.
fn invoice_row(detail_id: i64, qty: i64, product_id: i64, sku: &str) -> Vec<(String, Value)> {
    row(&[
        ("id", Value::Int(1)),
        ("invoice_number", Value::from("INV-1")),
        ("order.id", Value::Int(10)),
        ("order.status", Value::from("shipped")),
        ("order.details.id", Value::Int(detail_id)),
        ("order.details.order_qty", Value::Int(qty)),
        ("order.details.product.id", Value::Int(product_id)),
        ("order.details.product.sku", Value::from(sku)),
        ("customer.id", Value::Int(5)),
        ("customer.customer_name", Value::from("Acme")),
        ("customer.addr_street", Value::from("1 Main")),
        ("customer.addr_city", Value::from("Springfield")),
        ("customer.addr_zip", Value::from("12345")),
        ("customer.created_at", Value::Int(1_700_000_000)),
    ])
}

// ---- join emission -----------------------------------------------------

#[test]
fn many_root_forces_outer_for_its_whole_subtree() {
    let registry = sales_registry();
    let plan = joined_plan().fetch(path("order.coupon"), FetchConfig::join());
    let tree = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    let mut from = FromClause::new();
    tree.append_from(&mut from);

    assert_eq!(from.root(), Some("s_invoice"));
    // sibling to-one paths outside the to-many subtree stay inner
    assert_eq!(from.join_for("order"), Some(JoinType::Inner));
    assert_eq!(from.join_for("customer"), Some(JoinType::Inner));
    // the to-many root and everything beneath it is outer, even the
    // mandatory product relationship
    assert_eq!(from.join_for("order.details"), Some(JoinType::Outer));
    assert_eq!(from.join_for("order.details.product"), Some(JoinType::Outer));
    // optional to-one escalates on its own
    assert_eq!(from.join_for("order.coupon"), Some(JoinType::Outer));
}

#[test]
fn append_from_emits_each_path_once() {
    let registry = sales_registry();
    let plan = joined_plan();
    let tree = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    let mut from = FromClause::new();
    tree.append_from(&mut from);
    tree.append_from(&mut from);

    assert_eq!(from.joins().len(), 4);
}

// ---- row loading -------------------------------------------------------

#[test]
fn flattened_rows_merge_into_one_graph() {
    let registry = sales_registry();
    let plan = joined_plan();
    let tree = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    let mut ctx = BufferedRowContext::new();

    ctx.position(invoice_row(100, 2, 1000, "SKU-A"));
    let first = tree.load_row(&mut ctx).unwrap().unwrap();

    ctx.position(invoice_row(101, 1, 1001, "SKU-B"));
    let second = tree.load_row(&mut ctx).unwrap().unwrap();

    // one root identity across both rows
    assert!(EntityRef::ptr_eq(&first, &second));

    let order = first.borrow().one("order").unwrap().clone();
    let details = order.borrow().collection("details").unwrap().to_vec();
    assert_eq!(details.len(), 2);
    assert!(!order.borrow().is_collection_modified("details"));

    let product = details[1].borrow().one("product").unwrap().clone();
    assert_eq!(
        product.borrow().value("sku"),
        Some(&Value::from("SKU-B"))
    );

    let customer = first.borrow().one("customer").unwrap().clone();
    assert_eq!(
        customer.borrow().value("name"),
        Some(&Value::from("Acme"))
    );
    // embedded sub-values land under dotted slots
    assert_eq!(
        customer.borrow().value("address.city"),
        Some(&Value::from("Springfield"))
    );
}

#[test]
fn outer_joined_row_with_no_detail_leaves_an_empty_collection() {
    let registry = sales_registry();
    let plan = joined_plan();
    let tree = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    let mut ctx = BufferedRowContext::new();
    let mut columns = invoice_row(0, 0, 0, "");
    columns.retain(|(column, _)| !column.starts_with("order.details"));
    columns.push(("order.details.id".to_string(), Value::Null));
    ctx.position(columns);

    let invoice = tree.load_row(&mut ctx).unwrap().unwrap();
    let order = invoice.borrow().one("order").unwrap().clone();

    // zero children still materializes the collection: empty, not
    // unloaded, and untouched by dirty checking
    let order = order.borrow();
    assert!(
        order
            .collection("details")
            .is_some_and(<[_]>::is_empty)
    );
    assert!(!order.is_collection_modified("details"));
}

#[test]
fn detached_many_root_load_returns_the_detail_without_an_owner() {
    let registry = sales_registry();
    let plan = joined_plan();
    let tree = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    // invoice → order → details
    let order_node = &tree.root().children()[0];
    let many_node = &order_node.children()[0];
    assert!(many_node.has_many());
    assert_eq!(many_node.prefix(), "order.details");

    let mut ctx = BufferedRowContext::new();
    ctx.position(invoice_row(100, 2, 1000, "SKU-A"));

    let detail = many_node.load(&mut ctx, None, None).unwrap().unwrap();
    assert_eq!(detail.borrow().value("qty"), Some(&Value::Int(2)));
}

#[test]
fn many_root_load_adds_one_element_per_row_to_the_owner() {
    let registry = sales_registry();
    let plan = joined_plan();
    let tree = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    let many_node = &tree.root().children()[0].children()[0];
    let owner = EntityRow::new("order").into_ref();
    let mut ctx = BufferedRowContext::new();

    ctx.position(invoice_row(100, 2, 1000, "SKU-A"));
    many_node.load(&mut ctx, None, Some(&owner)).unwrap();
    ctx.position(invoice_row(101, 1, 1001, "SKU-B"));
    many_node.load(&mut ctx, None, Some(&owner)).unwrap();

    assert_eq!(owner.borrow().collection("details").unwrap().len(), 2);
}

#[test]
fn read_errors_pass_through_unchanged() {
    let registry = sales_registry();
    let plan = joined_plan();
    let tree = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    let mut ctx = BufferedRowContext::new();
    ctx.position(row(&[("id", Value::Int(1))]));

    let err = tree.load_row(&mut ctx).unwrap_err();
    assert!(matches!(
        err,
        TreeError::Row(RowError::MissingColumn { ref column }) if column == "invoice_number"
    ));
}

// ---- plan splitting and validation -------------------------------------

#[test]
fn non_join_paths_split_into_secondary_queries() {
    let registry = sales_registry();
    let plan = FetchPlan::new()
        .fetch(path("order"), FetchConfig::join())
        .fetch(path("order.details"), FetchConfig::query_with(50).unwrap())
        .fetch(path("order.details.product"), FetchConfig::join());
    let tree = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    // the deferred path and its sub-paths are absent from the main tree
    let order_node = &tree.root().children()[0];
    assert!(order_node.children().is_empty());

    let secondary = tree.secondary_queries();
    assert_eq!(secondary.len(), 1);
    assert_eq!(secondary[0].path, path("order.details"));
    assert_eq!(secondary[0].config, FetchConfig::query_with(50).unwrap());
    assert_eq!(
        secondary[0].nested,
        vec![(path("order.details.product"), FetchConfig::join())]
    );
}

#[test]
fn paths_without_a_joined_ancestor_are_rejected() {
    let registry = sales_registry();
    let plan = FetchPlan::new().fetch(path("order.details"), FetchConfig::join());

    let err = TreeBuilder::new(&registry, &plan)
        .build("invoice")
        .unwrap_err();
    assert!(matches!(
        err,
        TreeError::OrphanPath { ref path } if path == "order.details"
    ));
}

#[test]
fn unknown_root_entity_is_a_model_error() {
    let registry = sales_registry();
    let plan = FetchPlan::new();

    let err = TreeBuilder::new(&registry, &plan).build("ghost").unwrap_err();
    assert!(matches!(err, TreeError::Model(_)));
}

// ---- determinism -------------------------------------------------------

struct RecordingContext {
    inner: BufferedRowContext,
    reads: Vec<String>,
}

impl RecordingContext {
    fn new(columns: Vec<(String, Value)>) -> Self {
        let mut inner = BufferedRowContext::new();
        inner.position(columns);
        Self {
            inner,
            reads: Vec::new(),
        }
    }
}

impl RowContext for RecordingContext {
    fn read_column(&mut self, prefix: &str, column: &str) -> Result<Value, RowError> {
        self.reads.push(qualified_column(prefix, column));
        self.inner.read_column(prefix, column)
    }

    fn contextual(&mut self, entity: &str, id: &Value, fresh: EntityRow) -> EntityRef {
        self.inner.contextual(entity, id, fresh)
    }
}

#[test]
fn rebuilding_the_tree_preserves_joins_and_read_order() {
    let registry = sales_registry();
    let plan = joined_plan();

    let first = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();
    let second = TreeBuilder::new(&registry, &plan).build("invoice").unwrap();

    let mut from_first = FromClause::new();
    let mut from_second = FromClause::new();
    first.append_from(&mut from_first);
    second.append_from(&mut from_second);
    assert_eq!(from_first.joins(), from_second.joins());

    let mut ctx_first = RecordingContext::new(invoice_row(100, 2, 1000, "SKU-A"));
    let mut ctx_second = RecordingContext::new(invoice_row(100, 2, 1000, "SKU-A"));
    first.load_row(&mut ctx_first).unwrap();
    second.load_row(&mut ctx_second).unwrap();

    assert!(!ctx_first.reads.is_empty());
    assert_eq!(ctx_first.reads, ctx_second.reads);
}

// ---- tracing -----------------------------------------------------------

#[derive(Default)]
struct RecordingSink {
    events: Mutex<Vec<TraceEvent>>,
}

impl TraceSink for RecordingSink {
    fn on_event(&self, event: TraceEvent) {
        self.events.lock().unwrap().push(event);
    }
}

#[test]
fn trace_sink_observes_compilation_and_row_loads() {
    let registry = sales_registry();
    let plan = joined_plan();
    let sink = Arc::new(RecordingSink::default());

    let tree = TreeBuilder::new(&registry, &plan)
        .with_trace(sink.clone())
        .build("invoice")
        .unwrap();

    let mut ctx = BufferedRowContext::new();
    ctx.position(invoice_row(100, 2, 1000, "SKU-A"));
    tree.load_row(&mut ctx).unwrap();

    let events = sink.events.lock().unwrap();
    assert_eq!(
        events[0],
        TraceEvent::TreeCompiled {
            entity: "invoice".to_string(),
            joined_nodes: 5,
            secondary_queries: 0,
        }
    );
    assert_eq!(
        events[1],
        TraceEvent::RowLoaded {
            entity: "invoice".to_string(),
        }
    );
}
