//! Foreign-key references between factories.

/// Declared dependency of one factory on another.
///
/// The referenced factory only has to be registered by the time a seed call
/// resolves the reference.
///
/// # Example
///
/// ```
/// use graine_seeding::factory::Ref;
///
/// let channel = Ref::new("channel", "channelID").optional();
/// assert_eq!(channel.factory_name(), "channel");
/// assert_eq!(channel.foreign_key(), "channelID");
/// assert!(channel.is_optional());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Ref {
	factory_name: String,
	foreign_key: String,
	optional: bool,
}

impl Ref {
	/// Creates a required reference to `factory_name` stored in `foreign_key`.
	pub fn new(factory_name: impl Into<String>, foreign_key: impl Into<String>) -> Self {
		Self {
			factory_name: factory_name.into(),
			foreign_key: foreign_key.into(),
			optional: false,
		}
	}

	/// Creates an optional reference, shorthand for `Ref::new(..).optional()`.
	pub fn optional_to(factory_name: impl Into<String>, foreign_key: impl Into<String>) -> Self {
		Self::new(factory_name, foreign_key).optional()
	}

	/// Marks the reference as optional, allowing an explicit `null` foreign key.
	pub fn optional(mut self) -> Self {
		self.optional = true;
		self
	}

	/// Name of the referenced factory.
	pub fn factory_name(&self) -> &str {
		&self.factory_name
	}

	/// Field receiving the referenced row's primary key.
	pub fn foreign_key(&self) -> &str {
		&self.foreign_key
	}

	/// Returns true if the foreign key may be null.
	pub fn is_optional(&self) -> bool {
		self.optional
	}
}
