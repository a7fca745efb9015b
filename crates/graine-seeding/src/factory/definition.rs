//! Factory trait and the closure-backed [`FactoryDefinition`].

use std::fmt;
use std::future::Future;
use std::sync::Arc;

use async_trait::async_trait;
use futures::FutureExt;
use futures::future::BoxFuture;
use serde::Serialize;
use serde_json::Value;

use super::Ref;
use crate::error::{SeedingError, SeedingResult};
use crate::record::{Context, Record};
use crate::seeder::Seeder;

/// Template for producing and persisting one kind of row.
///
/// Implement this trait directly for struct-based factories, or build a
/// [`FactoryDefinition`] from closures.
///
/// # Example
///
/// ```ignore
/// struct ChannelFactory;
///
/// #[async_trait]
/// impl Factory for ChannelFactory {
///     fn name(&self) -> &str { "channel" }
///     fn table_name(&self) -> &str { "channels" }
///     fn primary_key(&self) -> &str { "channelID" }
///
///     async fn provide(&self, _args: &Record, _context: &Context) -> SeedingResult<Record> {
///         to_record(json!({ "name": "general" }))
///     }
/// }
/// ```
#[async_trait]
pub trait Factory: Send + Sync {
	/// Unique factory name.
	fn name(&self) -> &str;

	/// Table the writer inserts rows into.
	fn table_name(&self) -> &str;

	/// Field holding the generated id.
	fn primary_key(&self) -> &str;

	/// Dependencies, resolved in declaration order.
	fn refs(&self) -> &[Ref] {
		&[]
	}

	/// Produces the row's own fields from the arguments (foreign keys
	/// included) and the context gathered so far.
	async fn provide(&self, args: &Record, context: &Context) -> SeedingResult<Record>;

	/// Runs before the provider.
	async fn before(&self, _args: &Record, _context: &Context, _seeder: &Seeder) -> SeedingResult<()> {
		Ok(())
	}

	/// Runs after the row is persisted; `context` already contains it.
	async fn after(&self, _args: &Record, _context: &Context, _seeder: &Seeder) -> SeedingResult<()> {
		Ok(())
	}
}

/// Converts a serializable value into a record.
///
/// Fails with [`SeedingError::FactoryError`] unless the value serializes to a
/// JSON object.
pub fn to_record<T: Serialize>(data: T) -> SeedingResult<Record> {
	match serde_json::to_value(data)? {
		Value::Object(record) => Ok(record),
		other => Err(SeedingError::FactoryError(format!(
			"provider must produce an object, got {}",
			other
		))),
	}
}

type ProviderFn =
	Arc<dyn Fn(&Record, &Context) -> BoxFuture<'static, SeedingResult<Record>> + Send + Sync>;
type HookFn =
	Arc<dyn Fn(Record, Context, Seeder) -> BoxFuture<'static, SeedingResult<()>> + Send + Sync>;

/// Factory assembled from plain data and closures.
///
/// # Example
///
/// ```ignore
/// let user = FactoryDefinition::new("user", "users", "userID")
///     .with_ref(Ref::new("channel", "channelID"))
///     .provider(|args, _context| {
///         json!({ "name": args.get("name").cloned().unwrap_or(json!("Jane")) })
///     });
/// seeder.register(user);
/// ```
pub struct FactoryDefinition {
	name: String,
	table_name: String,
	primary_key: String,
	refs: Vec<Ref>,
	provider: ProviderFn,
	before: Option<HookFn>,
	after: Option<HookFn>,
}

impl FactoryDefinition {
	/// Creates a definition whose provider yields an empty record.
	pub fn new(
		name: impl Into<String>,
		table_name: impl Into<String>,
		primary_key: impl Into<String>,
	) -> Self {
		Self {
			name: name.into(),
			table_name: table_name.into(),
			primary_key: primary_key.into(),
			refs: Vec::new(),
			provider: Arc::new(|_: &Record, _: &Context| {
				async { Ok::<_, SeedingError>(Record::new()) }.boxed()
			}),
			before: None,
			after: None,
		}
	}

	/// Appends a reference.
	pub fn with_ref(mut self, reference: Ref) -> Self {
		self.refs.push(reference);
		self
	}

	/// Appends several references, keeping their order.
	pub fn with_refs(mut self, refs: impl IntoIterator<Item = Ref>) -> Self {
		self.refs.extend(refs);
		self
	}

	/// Sets a synchronous provider. The returned value must serialize to a
	/// JSON object.
	pub fn provider<F, T>(mut self, provider: F) -> Self
	where
		F: Fn(&Record, &Context) -> T + Send + Sync + 'static,
		T: Serialize,
	{
		self.provider = Arc::new(move |args: &Record, context: &Context| {
			let record = to_record(provider(args, context));
			async move { record }.boxed()
		});
		self
	}

	/// Sets an asynchronous provider.
	pub fn async_provider<F, Fut, T>(mut self, provider: F) -> Self
	where
		F: Fn(Record, Context) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = SeedingResult<T>> + Send + 'static,
		T: Serialize,
	{
		self.provider = Arc::new(move |args: &Record, context: &Context| {
			let data = provider(args.clone(), context.clone());
			async move { to_record(data.await?) }.boxed()
		});
		self
	}

	/// Sets a hook run before the provider.
	pub fn before<F, Fut>(mut self, hook: F) -> Self
	where
		F: Fn(Record, Context, Seeder) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = SeedingResult<()>> + Send + 'static,
	{
		self.before = Some(Arc::new(move |args: Record, context: Context, seeder: Seeder| {
			hook(args, context, seeder).boxed()
		}));
		self
	}

	/// Sets a hook run after the row is persisted.
	pub fn after<F, Fut>(mut self, hook: F) -> Self
	where
		F: Fn(Record, Context, Seeder) -> Fut + Send + Sync + 'static,
		Fut: Future<Output = SeedingResult<()>> + Send + 'static,
	{
		self.after = Some(Arc::new(move |args: Record, context: Context, seeder: Seeder| {
			hook(args, context, seeder).boxed()
		}));
		self
	}
}

impl fmt::Debug for FactoryDefinition {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.debug_struct("FactoryDefinition")
			.field("name", &self.name)
			.field("table_name", &self.table_name)
			.field("primary_key", &self.primary_key)
			.field("refs", &self.refs)
			.field("before", &self.before.is_some())
			.field("after", &self.after.is_some())
			.finish()
	}
}

#[async_trait]
impl Factory for FactoryDefinition {
	fn name(&self) -> &str {
		&self.name
	}

	fn table_name(&self) -> &str {
		&self.table_name
	}

	fn primary_key(&self) -> &str {
		&self.primary_key
	}

	fn refs(&self) -> &[Ref] {
		&self.refs
	}

	async fn provide(&self, args: &Record, context: &Context) -> SeedingResult<Record> {
		(self.provider)(args, context).await
	}

	async fn before(&self, args: &Record, context: &Context, seeder: &Seeder) -> SeedingResult<()> {
		match &self.before {
			Some(hook) => hook(args.clone(), context.clone(), seeder.clone()).await,
			None => Ok(()),
		}
	}

	async fn after(&self, args: &Record, context: &Context, seeder: &Seeder) -> SeedingResult<()> {
		match &self.after {
			Some(hook) => hook(args.clone(), context.clone(), seeder.clone()).await,
			None => Ok(()),
		}
	}
}
