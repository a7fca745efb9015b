//! Reference resolution and record creation.
//!
//! Refs of one factory are resolved strictly in declaration order. Each ref
//! sees the context produced by the refs before it, which is what lets a
//! later sibling reuse rows an earlier one created.

use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

use futures::FutureExt;
use futures::future::BoxFuture;
use serde_json::Value;
use tracing::{debug, trace};

use super::Seeder;
use crate::args::{Arg, SeedArgs};
use crate::error::{SeedingError, SeedingResult};
use crate::factory::{Factory, Ref};
use crate::record::{Context, Record, SeedId, SeedResult};
use crate::writer::Writer;

/// Foreign keys, related rows and context produced by resolving a factory's refs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ResolvedRefs {
	foreign_keys: BTreeMap<String, Option<SeedId>>,
	objects: HashMap<String, Record>,
	context: Context,
}

impl ResolvedRefs {
	/// Foreign key values keyed by field name; `None` for null optional refs.
	pub fn foreign_keys(&self) -> &BTreeMap<String, Option<SeedId>> {
		&self.foreign_keys
	}

	/// Referenced rows keyed by factory name. Refs resolved from a bare id or
	/// `null` have no entry.
	pub fn objects(&self) -> &HashMap<String, Record> {
		&self.objects
	}

	/// Context after all refs were resolved.
	pub fn context(&self) -> &Context {
		&self.context
	}
}

/// Outcome of resolving a single ref.
struct Resolution {
	foreign_key: Option<SeedId>,
	object: Option<Record>,
	context: Context,
}

impl Resolution {
	fn null() -> Self {
		Self {
			foreign_key: None,
			object: None,
			context: Context::new(),
		}
	}

	fn id(id: SeedId) -> Self {
		Self {
			foreign_key: Some(id),
			object: None,
			context: Context::new(),
		}
	}

	fn object(factory_name: &str, id: SeedId, object: Record) -> Self {
		Self {
			foreign_key: Some(id),
			context: Context::new().with(factory_name, object.clone()),
			object: Some(object),
		}
	}

	fn seeded(result: SeedResult) -> Self {
		let (id, record, context) = result.into_parts();
		Self {
			foreign_key: Some(id),
			object: Some(record),
			context,
		}
	}
}

impl Seeder {
	/// Resolves `refs` in order, threading the context from one ref to the next.
	pub(super) async fn resolve_refs_with(
		&self,
		writer: &Arc<dyn Writer>,
		refs: &[Ref],
		args: &SeedArgs,
		context: Context,
		reuse_refs: bool,
	) -> SeedingResult<ResolvedRefs> {
		let mut resolved = ResolvedRefs {
			context,
			..ResolvedRefs::default()
		};

		for reference in refs {
			let resolution = self
				.resolve_ref(writer, reference, args, &resolved.context, reuse_refs)
				.await?;

			resolved
				.foreign_keys
				.insert(reference.foreign_key().to_string(), resolution.foreign_key);
			if let Some(object) = resolution.object {
				resolved
					.objects
					.insert(reference.factory_name().to_string(), object);
			}
			resolved.context.merge(resolution.context);
		}

		Ok(resolved)
	}

	fn resolve_ref<'a>(
		&'a self,
		writer: &'a Arc<dyn Writer>,
		reference: &'a Ref,
		args: &'a SeedArgs,
		context: &'a Context,
		reuse_refs: bool,
	) -> BoxFuture<'a, SeedingResult<Resolution>> {
		async move {
			let field = reference.foreign_key();
			let provided = match args.get(field) {
				None => None,
				Some(Arg::Value(value)) => Some(value.clone()),
				Some(Arg::Deferred(deferred)) => Some(deferred.resolve().await?),
			};

			if reference.is_optional() && matches!(provided, Some(Value::Null)) {
				trace!(field, "optional reference set to null");
				return Ok(Resolution::null());
			}

			let factory = self.registry().get(reference.factory_name())?;

			if let Some(value) = provided {
				return provided_foreign_key(factory.as_ref(), field, value);
			}

			if !reuse_refs {
				let seeded = self
					.seed_factory(writer, factory, args.clone(), None, context.clone(), false)
					.await?;
				return Ok(Resolution::seeded(seeded));
			}

			if let Some(existing) = context.get(factory.name()) {
				trace!(
					factory = factory.name(),
					field, "reusing record from context"
				);
				let id = primary_key_of(existing, factory.primary_key(), field)?;
				return Ok(Resolution::object(factory.name(), id, existing.clone()));
			}

			// Siblings resolved earlier may satisfy the target's own refs.
			let mut inherited = args.clone();
			for inner in factory.refs() {
				if inherited.contains(inner.foreign_key()) {
					continue;
				}
				if let Some(sibling) = context.get(inner.factory_name()) {
					inherited.insert(
						inner.foreign_key(),
						Arg::Value(Value::Object(sibling.clone())),
					);
				}
			}

			let seeded = self
				.seed_factory(writer, factory, inherited, None, context.clone(), true)
				.await?;
			Ok(Resolution::seeded(seeded))
		}
		.boxed()
	}

	/// Resolves the factory's refs (unless `resolved` is given), runs the
	/// hooks and provider, and persists the row.
	pub(super) fn seed_factory<'a>(
		&'a self,
		writer: &'a Arc<dyn Writer>,
		factory: Arc<dyn Factory>,
		args: SeedArgs,
		resolved: Option<ResolvedRefs>,
		context: Context,
		reuse_refs: bool,
	) -> BoxFuture<'a, SeedingResult<SeedResult>> {
		async move {
			let resolved = match resolved {
				Some(resolved) => resolved,
				None => {
					self.resolve_refs_with(writer, factory.refs(), &args, context, reuse_refs)
						.await?
				}
			};

			let mut input = args.resolve_record().await?;
			for (field, foreign_key) in &resolved.foreign_keys {
				input.insert(field.clone(), Value::from(*foreign_key));
			}

			factory.before(&input, &resolved.context, self).await?;

			let mut record = factory.provide(&input, &resolved.context).await?;
			for (field, foreign_key) in &resolved.foreign_keys {
				record.insert(field.clone(), Value::from(*foreign_key));
			}

			let id = writer
				.insert(factory.table_name(), factory.primary_key(), &record)
				.await?;
			record.insert(factory.primary_key().to_string(), Value::from(id));
			debug!(
				factory = factory.name(),
				table = factory.table_name(),
				id,
				"inserted record"
			);

			let context = resolved.context.with(factory.name(), record.clone());
			factory.after(&input, &context, self).await?;

			Ok(SeedResult::new(id, record, context))
		}
		.boxed()
	}
}

/// Foreign key from a caller-supplied value: a bare id or a row object.
fn provided_foreign_key(
	factory: &dyn Factory,
	field: &str,
	value: Value,
) -> SeedingResult<Resolution> {
	match value {
		Value::Object(object) => {
			let id = primary_key_of(&object, factory.primary_key(), field)?;
			Ok(Resolution::object(factory.name(), id, object))
		}
		Value::Number(number) => number.as_i64().map(Resolution::id).ok_or_else(|| {
			SeedingError::validation(field, format!("{} is not an integer id", number))
		}),
		Value::Null => Err(SeedingError::validation(
			field,
			"foreign key is required and cannot be null",
		)),
		_ => Err(SeedingError::validation(
			field,
			"foreign key must be a number or an object",
		)),
	}
}

fn primary_key_of(object: &Record, primary_key: &str, field: &str) -> SeedingResult<SeedId> {
	object
		.get(primary_key)
		.and_then(Value::as_i64)
		.ok_or_else(|| {
			SeedingError::validation(
				field,
				format!("object has no integer primary key \"{}\"", primary_key),
			)
		})
}
