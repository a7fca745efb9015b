//! Chat schema with owners, memberships and messages.

#[path = "helpers/schemas.rs"]
mod schemas;

use std::sync::Arc;

use graine_seeding::prelude::*;
use rstest::rstest;
use schemas::{slack_seeder, writer};

#[rstest]
#[tokio::test]
async fn test_channel_user_reuses_member_as_owner(writer: Arc<MemoryWriter>) {
	let seeder = slack_seeder(writer.clone());

	let membership = seeder.seed("channel_user", SeedArgs::new()).await.unwrap();

	let users = writer.rows("users");
	let channels = writer.rows("channels");
	let members = writer.rows("channel_users");
	assert_eq!(users.len(), 1);
	assert_eq!(channels.len(), 1);
	assert_eq!(members.len(), 1);
	assert_eq!(channels[0]["ownerID"], json!(1));
	assert_eq!(members[0]["userID"], json!(1));
	assert_eq!(members[0]["channelID"], json!(1));
	assert_eq!(members[0]["joinedAt"], json!("2024-01-01T00:00:00Z"));

	let context = membership.context();
	assert_eq!(context.len(), 3);
	assert_eq!(context.get("user"), Some(&users[0]));
	assert_eq!(context.get("channel"), Some(&channels[0]));
	assert_eq!(context.get("channel_user"), Some(&members[0]));
}

#[rstest]
#[tokio::test]
async fn test_message_with_explicit_author_and_channel(writer: Arc<MemoryWriter>) {
	let seeder = slack_seeder(writer.clone());

	let owner = seeder.seed("user", SeedArgs::new()).await.unwrap();
	let channel = seeder
		.seed("channel", SeedArgs::new().set("ownerID", &owner))
		.await
		.unwrap();
	seeder
		.seed(
			"message",
			SeedArgs::new()
				.set("authorID", &owner)
				.set("channelID", &channel),
		)
		.await
		.unwrap();

	assert_eq!(writer.count("users"), 1);
	assert_eq!(writer.count("channels"), 1);
	let messages = writer.rows("messages");
	assert_eq!(messages.len(), 1);
	assert_eq!(messages[0]["authorID"], json!(owner.id()));
	assert_eq!(messages[0]["channelID"], json!(channel.id()));
	assert!(messages[0]["content"].is_string());
}

#[rstest]
#[tokio::test]
async fn test_message_author_owns_new_channel(writer: Arc<MemoryWriter>) {
	let seeder = slack_seeder(writer.clone());

	seeder.seed("message", SeedArgs::new()).await.unwrap();

	assert_eq!(writer.count("users"), 1);
	assert_eq!(writer.count("channels"), 1);
	assert_eq!(writer.rows("channels")[0]["ownerID"], json!(1));
	assert_eq!(writer.rows("messages")[0]["authorID"], json!(1));
}

#[rstest]
#[tokio::test]
async fn test_clean_up_single_table(writer: Arc<MemoryWriter>) {
	let seeder = slack_seeder(writer.clone());
	seeder.seed("message", SeedArgs::new()).await.unwrap();

	seeder.clean_up(&["message"]).await.unwrap();

	assert_eq!(writer.count("messages"), 0);
	assert_eq!(writer.count("users"), 1);
	assert_eq!(writer.count("channels"), 1);

	seeder.clean_up(&[]).await.unwrap();

	assert_eq!(writer.count("users"), 0);
	assert_eq!(writer.count("channels"), 0);
}
