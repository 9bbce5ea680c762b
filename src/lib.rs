//! Declarative, variant-based test fixture resolution for Rust models.
//!
//! This crate removes hand-written test setup boilerplate: instead of
//! constructing object graphs by hand in every test, authors declare named
//! fixture *variants* in JSON/YAML files and request them generically,
//! parameterized only by the model's type.
//!
//! # Quick Start
//!
//! Declare fixtures (`fixtures/billing.json`):
//!
//! ```json
//! [
//!   {
//!     "model": "billing.Invoice",
//!     "variant": "invoice for john and jane",
//!     "fields": {
//!       "number": 1,
//!       "orders": [
//!         {"$fixture": "billing.Order", "$variant": "order for john"},
//!         {"$fixture": "billing.Order", "$variant": "order for jane"}
//!       ],
//!       "invoice_type": "INVOICE"
//!     }
//!   }
//! ]
//! ```
//!
//! Bind models once, then request instances by type and variant:
//!
//! ```ignore
//! use fixtura::prelude::*;
//!
//! impl FixtureModel for Invoice {
//!     fn model_id() -> &'static str { "billing.Invoice" }
//!
//!     fn from_fields(fields: &mut ResolvedFields) -> FixtureResult<Self> {
//!         Ok(Self {
//!             number: fields.i64("number")?,
//!             orders: fields.instances("orders")?,
//!             invoice_type: fields.parsed("invoice_type")?,
//!         })
//!     }
//! }
//!
//! register_model::<Order>();
//! install_store(FixtureStore::load_from_path(Path::new("fixtures/billing.json"))?);
//!
//! let invoice: Invoice = fixture::<Invoice>()
//!     .with_variant("invoice for john and jane")
//!     .get()?;
//! ```
//!
//! # Architecture
//!
//! Two cooperating pieces:
//!
//! - **Fixture store** ([`fixtures`]): parses external fixture sources into
//!   an immutable mapping from [`FixtureKey`] (model + variant) to
//!   [`FixtureDefinition`]. Loaded once, read-only afterwards, safely
//!   shared for concurrent resolution.
//! - **Fixture resolver** ([`resolve`]): given a model type and a variant
//!   name (defaulting to `"default"`), looks up the raw definition, walks
//!   it recursively — resolving nested definitions, references to other
//!   fixtures and sequences, detecting reference cycles — and binds the
//!   resolved fields through the model's canonical constructor
//!   ([`FixtureModel::from_fields`]).
//!
//! The [`Fixture`] facade sequences those calls behind a small immutable
//! binding of a type to a variant name.
//!
//! # Features
//!
//! - `json` - JSON fixture sources (enabled by default)
//! - `yaml` - YAML fixture sources
//! - `full` - All features enabled

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod builder;
pub mod error;
pub mod fixtures;
pub mod prelude;
pub mod resolve;

// Re-export commonly used types at crate root
pub use builder::{Fixture, fixture, install_store, installed_store};
pub use error::{FixtureError, FixtureResult};
pub use fixtures::{
	DEFAULT_VARIANT, FixtureData, FixtureDefinition, FixtureFormat, FixtureKey, FixtureParser,
	FixtureRecord, FixtureRef, FixtureSerializer, FixtureStore, FixtureValue,
};
pub use resolve::{FixtureModel, FixtureResolver, ModelRegistry, ResolvedFields, ResolvedValue, register_model};
