//! End-to-end resolution scenarios over file-backed fixture stores.

mod helpers;

use rstest::rstest;
use serial_test::serial;

use fixtura::prelude::*;
use helpers::models::{Invoice, InvoiceType, Node, Order, register_models};
use helpers::test_data::TestDataLoader;

#[rstest]
fn resolves_invoice_for_john_and_jane() {
	register_models();
	let resolver = TestDataLoader::new().resolver("billing.json");

	let invoice: Invoice = resolver.resolve("invoice for john and jane").unwrap();

	assert_eq!(invoice.number, 1);
	assert_eq!(invoice.orders.len(), 2);
	assert_eq!(invoice.invoice_type, InvoiceType::Invoice);
	assert_eq!(invoice.orders[0].customer.name, "john");
	assert_eq!(invoice.orders[1].customer.name, "jane");
	assert_eq!(
		invoice.orders[1].customer.email.as_deref(),
		Some("jane@example.com")
	);
}

#[rstest]
fn missing_variant_fails_with_not_found() {
	register_models();
	let resolver = TestDataLoader::new().resolver("billing.json");

	let result: FixtureResult<Invoice> = resolver.resolve("nonexistent");
	assert!(matches!(
		result,
		Err(FixtureError::NotFound(key))
			if key == FixtureKey::new("billing.Invoice", "nonexistent")
	));
}

#[rstest]
fn implicit_default_equals_explicit_default() {
	register_models();
	let resolver = TestDataLoader::new().resolver("billing.json");

	let implicit: Invoice = resolver.resolve_default().unwrap();
	let explicit: Invoice = resolver.resolve(DEFAULT_VARIANT).unwrap();

	assert_eq!(implicit, explicit);
	assert_eq!(implicit.number, 100);
	assert_eq!(implicit.invoice_type, InvoiceType::CreditNote);
	assert!(implicit.orders.is_empty());
}

#[rstest]
fn resolution_is_deterministic() {
	register_models();
	let resolver = TestDataLoader::new().resolver("billing.json");

	let first: Invoice = resolver.resolve("invoice for john and jane").unwrap();
	let second: Invoice = resolver.resolve("invoice for john and jane").unwrap();
	assert_eq!(first, second);
}

#[rstest]
fn reference_overrides_apply_on_top_of_the_referenced_definition() {
	register_models();
	let resolver = TestDataLoader::new().resolver("billing.json");

	let invoice: Invoice = resolver.resolve("discounted order").unwrap();
	let order: &Order = &invoice.orders[0];

	assert_eq!(order.total, 99.0);
	// Fields not overridden keep the referenced definition's values.
	assert_eq!(order.customer.name, "john");
}

#[rstest]
fn non_numeric_string_fails_coercion() {
	register_models();
	let resolver = TestDataLoader::new().resolver("billing.json");

	let result: FixtureResult<Invoice> = resolver.resolve("bad number");
	assert!(matches!(
		result,
		Err(FixtureError::TypeCoercion { field, .. }) if field == "number"
	));
}

#[rstest]
fn self_reference_cycle_is_detected() {
	register_models();
	let resolver = TestDataLoader::new().resolver("cyclic.json");

	let result: FixtureResult<Node> = resolver.resolve("ouroboros");
	assert!(matches!(result, Err(FixtureError::CyclicReference { .. })));
}

#[rstest]
fn mutual_reference_cycle_is_detected() {
	register_models();
	let resolver = TestDataLoader::new().resolver("cyclic.json");

	match resolver.resolve::<Node>("ping") {
		Err(FixtureError::CyclicReference { chain }) => {
			assert!(chain.contains("ping"));
			assert!(chain.contains("pong"));
		}
		other => panic!("expected a cycle error, got {:?}", other),
	}
}

#[rstest]
fn combined_stores_load_from_multiple_files() {
	register_models();
	let loader = TestDataLoader::new();
	let store = FixtureStore::load_from_paths(&[
		loader.path("billing.json").as_path(),
		loader.path("cyclic.json").as_path(),
	])
	.unwrap();

	assert_eq!(store.len(), 9);
	assert!(store.contains(&FixtureKey::default_variant("billing.Invoice")));
	assert!(store.contains(&FixtureKey::new("graph.Node", "ouroboros")));
}

#[rstest]
#[serial(installed_store)]
fn fluent_facade_resolves_through_installed_store() {
	register_models();
	install_store(TestDataLoader::new().store("billing.json"));

	let invoice: Invoice = fixture::<Invoice>()
		.with_variant("invoice for john and jane")
		.get()
		.unwrap();

	assert_eq!(invoice.number, 1);
	assert_eq!(invoice.orders.len(), 2);
}

#[rstest]
#[serial(installed_store)]
fn facade_rebinding_creates_an_independent_binding() {
	register_models();
	install_store(TestDataLoader::new().store("billing.json"));

	let bound = fixture::<Invoice>();
	let rebound = bound.with_variant("invoice for john and jane");

	// The original binding still resolves the default variant.
	let default_invoice = bound.get().unwrap();
	let named_invoice = rebound.get().unwrap();

	assert_eq!(default_invoice.number, 100);
	assert_eq!(named_invoice.number, 1);
}
