//! Billing and graph model types used by the integration suite.

use std::str::FromStr;

use fixtura::prelude::*;

/// Invoice kind, parsed from its fixture string form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvoiceType {
	Invoice,
	CreditNote,
}

impl FromStr for InvoiceType {
	type Err = String;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"INVOICE" => Ok(Self::Invoice),
			"CREDIT_NOTE" => Ok(Self::CreditNote),
			other => Err(format!("unknown invoice type {}", other)),
		}
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Customer {
	pub name: String,
	pub email: Option<String>,
}

impl FixtureModel for Customer {
	fn model_id() -> &'static str {
		"billing.Customer"
	}

	fn from_fields(fields: &mut ResolvedFields) -> FixtureResult<Self> {
		Ok(Self {
			name: fields.string("name")?,
			email: fields.opt_string("email")?,
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Order {
	pub customer: Customer,
	pub total: f64,
}

impl FixtureModel for Order {
	fn model_id() -> &'static str {
		"billing.Order"
	}

	fn from_fields(fields: &mut ResolvedFields) -> FixtureResult<Self> {
		Ok(Self {
			customer: fields.nested("customer")?,
			total: fields.f64("total")?,
		})
	}
}

#[derive(Debug, Clone, PartialEq)]
pub struct Invoice {
	pub number: i64,
	pub orders: Vec<Order>,
	pub invoice_type: InvoiceType,
}

impl FixtureModel for Invoice {
	fn model_id() -> &'static str {
		"billing.Invoice"
	}

	fn from_fields(fields: &mut ResolvedFields) -> FixtureResult<Self> {
		Ok(Self {
			number: fields.i64("number")?,
			orders: fields.instances("orders")?,
			invoice_type: fields.parsed("invoice_type")?,
		})
	}
}

/// Linked node used for reference-cycle scenarios.
#[derive(Debug, PartialEq)]
pub struct Node {
	pub label: String,
	pub next: Option<Box<Node>>,
}

impl FixtureModel for Node {
	fn model_id() -> &'static str {
		"graph.Node"
	}

	fn from_fields(fields: &mut ResolvedFields) -> FixtureResult<Self> {
		Ok(Self {
			label: fields.string("label")?,
			next: fields.opt_instance::<Node>("next")?.map(Box::new),
		})
	}
}

/// Registers every model the integration suite resolves through references.
pub fn register_models() {
	register_model::<Customer>();
	register_model::<Order>();
	register_model::<Invoice>();
	register_model::<Node>();
}
