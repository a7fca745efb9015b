//! Factory schemas shared by the integration tests.
//!
//! Each function registers a small schema on a fresh seeder backed by the
//! given in-memory writer.

#![allow(dead_code)]

use std::sync::Arc;

use fake::Fake;
use fake::faker::company::en::CompanyName;
use fake::faker::currency::en::{CurrencyCode, CurrencyName};
use fake::faker::lorem::en::{Sentence, Word};
use fake::faker::name::en::{FirstName, Name};
use fake::faker::phone_number::en::PhoneNumber;
use graine_seeding::prelude::*;
use rstest::fixture;

/// Empty in-memory writer.
#[fixture]
pub fn writer() -> Arc<MemoryWriter> {
	Arc::new(MemoryWriter::new())
}

/// Returns `args[field]`, or `fallback` when the caller did not pass it.
pub fn arg_or(args: &Record, field: &str, fallback: impl Into<Value>) -> Value {
	args.get(field).cloned().unwrap_or_else(|| fallback.into())
}

fn user_factory() -> FactoryDefinition {
	FactoryDefinition::new("user", "users", "userID").provider(|args, _| {
		json!({
			"name": arg_or(args, "name", FirstName().fake::<String>()),
			"phone": arg_or(args, "phone", PhoneNumber().fake::<String>()),
			"age": arg_or(args, "age", (18..60).fake::<u8>()),
		})
	})
}

fn channel_factory() -> FactoryDefinition {
	FactoryDefinition::new("channel", "channels", "channelID")
		.provider(|args, _| json!({ "name": arg_or(args, "name", Word().fake::<String>()) }))
}

/// `user` references `channel` through `channelID`.
pub fn chat_seeder(writer: Arc<MemoryWriter>) -> Seeder {
	let seeder = Seeder::with_writer(writer);
	seeder.register(user_factory().with_ref(Ref::new("channel", "channelID")));
	seeder.register(channel_factory());
	seeder
}

/// Like [`chat_seeder`] but the channel reference is optional.
pub fn optional_chat_seeder(writer: Arc<MemoryWriter>) -> Seeder {
	let seeder = Seeder::with_writer(writer);
	seeder.register(user_factory().with_ref(Ref::new("channel", "channelID").optional()));
	seeder.register(channel_factory());
	seeder
}

/// Independent `user` and `channel` joined by `user_channel`.
pub fn membership_seeder(writer: Arc<MemoryWriter>) -> Seeder {
	let seeder = Seeder::with_writer(writer);
	seeder.register_all([
		Arc::new(user_factory()) as Arc<dyn Factory>,
		Arc::new(channel_factory()) as Arc<dyn Factory>,
		Arc::new(
			FactoryDefinition::new("user_channel", "user_channels", "userChannelID").with_refs([
				Ref::new("user", "userID"),
				Ref::new("channel", "channelID"),
			]),
		) as Arc<dyn Factory>,
	]);
	seeder
}

/// `subscription` references `plan` and `billing_cycle`, which itself
/// references `plan`.
pub fn subscription_seeder(writer: Arc<MemoryWriter>) -> Seeder {
	let seeder = Seeder::with_writer(writer);
	seeder.register(
		FactoryDefinition::new("subscription", "subscriptions", "subscriptionID")
			.with_ref(Ref::new("plan", "planID"))
			.with_ref(Ref::new("billing_cycle", "billingCycleID"))
			.provider(|_, _| json!({ "name": Name().fake::<String>() })),
	);
	seeder.register(
		FactoryDefinition::new("plan", "plans", "planID")
			.provider(|_, _| json!({ "name": Word().fake::<String>() })),
	);
	seeder.register(
		FactoryDefinition::new("billing_cycle", "billing_cycles", "billingCycleID")
			.with_ref(Ref::new("plan", "planID"))
			.provider(|_, _| json!({ "name": Word().fake::<String>() })),
	);
	seeder
}

/// Ledger schema where `currency` is reachable through three paths:
/// `branch -> merchant -> currency`, `child -> organization -> currency`
/// and `ledger -> currency`.
pub fn ledger_seeder(writer: Arc<MemoryWriter>) -> Seeder {
	let seeder = Seeder::with_writer(writer);
	seeder.register(
		FactoryDefinition::new("currency", "currencies", "currencyID").provider(|args, _| {
			json!({
				"currencyCode": arg_or(args, "currencyCode", CurrencyCode().fake::<String>()),
				"currencyName": arg_or(args, "currencyName", CurrencyName().fake::<String>()),
			})
		}),
	);
	seeder.register(
		FactoryDefinition::new("organization", "organizations", "organizationID")
			.with_ref(Ref::new("currency", "currencyID"))
			.provider(|args, _| {
				json!({
					"organizationName": arg_or(args, "organizationName", CompanyName().fake::<String>()),
					"selfRegistration": arg_or(args, "selfRegistration", false),
				})
			}),
	);
	seeder.register(
		FactoryDefinition::new("user", "users", "userID")
			.provider(|args, _| json!({ "name": arg_or(args, "name", FirstName().fake::<String>()) })),
	);
	seeder.register(
		FactoryDefinition::new("child", "children", "childID")
			.with_ref(Ref::new("organization", "organizationID"))
			.with_ref(Ref::new("user", "userID"))
			.provider(|args, _| {
				json!({
					"fullName": arg_or(args, "fullName", Name().fake::<String>()),
					"grade": arg_or(args, "grade", Word().fake::<String>()),
				})
			}),
	);
	seeder.register(
		FactoryDefinition::new("merchant", "merchants", "merchantID")
			.with_ref(Ref::new("currency", "currencyID"))
			.provider(|args, _| {
				json!({ "merchantName": arg_or(args, "merchantName", CompanyName().fake::<String>()) })
			}),
	);
	seeder.register(
		FactoryDefinition::new("branch", "branches", "branchID")
			.with_ref(Ref::new("merchant", "merchantID"))
			.provider(|args, _| {
				json!({ "branchName": arg_or(args, "branchName", CompanyName().fake::<String>()) })
			}),
	);
	seeder.register(
		FactoryDefinition::new("ledger", "ledger", "ledgerID")
			.with_refs([
				Ref::new("branch", "branchID"),
				Ref::new("child", "childID"),
				Ref::new("currency", "currencyID"),
			])
			.provider(|args, _| json!({ "name": arg_or(args, "name", Word().fake::<String>()) })),
	);
	seeder
}

/// Chat clone: channels have an owner, members join through
/// `channel_user`, and messages have an author.
pub fn slack_seeder(writer: Arc<MemoryWriter>) -> Seeder {
	let seeder = Seeder::with_writer(writer);
	seeder.register(user_factory());
	seeder.register(channel_factory().with_ref(Ref::new("user", "ownerID")));
	seeder.register(
		FactoryDefinition::new("channel_user", "channel_users", "userChannelID")
			.with_ref(Ref::new("user", "userID"))
			.with_ref(Ref::new("channel", "channelID"))
			.provider(|_, _| json!({ "joinedAt": "2024-01-01T00:00:00Z" })),
	);
	seeder.register(
		FactoryDefinition::new("message", "messages", "messageID")
			.with_ref(Ref::new("user", "authorID"))
			.with_ref(Ref::new("channel", "channelID"))
			.provider(|_, _| json!({ "content": Sentence(3..8).fake::<String>() })),
	);
	seeder
}
