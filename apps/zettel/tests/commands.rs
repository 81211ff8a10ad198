use std::{sync::Arc, time::Duration};

use clap::Parser;

use zettel::{Args, Command};
use zettel_client::HttpNoteService;
use zettel_domain::{Category, NoteStatus};
use zettel_testkit::{FakeNoteService, StubServer};
use zettel_workbench::{Settings, Workbench};

async fn start() -> (Arc<FakeNoteService>, StubServer, Workbench) {
	let fake = Arc::new(FakeNoteService::new());
	let server = StubServer::start(fake.clone()).await.expect("Failed to start stub server.");
	let service = HttpNoteService::new(&zettel_config::Service::new(server.api_base()))
		.expect("Failed to build client.");
	let settings = Settings { debounce: Duration::from_millis(10), min_link_search_chars: 2 };
	let workbench = Workbench::new(Arc::new(service), settings);

	(fake, server, workbench)
}

async fn execute_with_notices(workbench: &mut Workbench, args: &[&str]) -> (String, String) {
	let args = Args::try_parse_from(std::iter::once("zettel").chain(args.iter().copied()))
		.expect("Failed to parse arguments.");
	let mut out = Vec::new();
	let mut notices = Vec::new();

	zettel::execute(workbench, args.command, &mut out, &mut notices).await.expect("Command failed.");

	(
		String::from_utf8(out).expect("Output is not UTF-8."),
		String::from_utf8(notices).expect("Notices are not UTF-8."),
	)
}

async fn execute(workbench: &mut Workbench, args: &[&str]) -> String {
	let (out, notices) = execute_with_notices(workbench, args).await;

	assert!(notices.is_empty(), "unexpected notices: {notices}");

	out
}

#[test]
fn link_arguments_accept_labels_with_spaces() {
	let args = Args::try_parse_from(["zettel", "commit", "abc", "--link", "def=is an example of"])
		.expect("Failed to parse arguments.");

	let Command::Commit { id, links } = args.command else {
		panic!("Expected the commit command.");
	};

	assert_eq!(id, "abc");
	assert_eq!(links[0].target, "def");
	assert_eq!(links[0].relationship, "is an example of");
}

#[test]
fn malformed_link_arguments_are_rejected() {
	assert!(Args::try_parse_from(["zettel", "commit", "abc", "--link", "def"]).is_err());
	assert!(
		Args::try_parse_from(["zettel", "create", "--title", "x", "--category", "poem"]).is_err()
	);
}

#[tokio::test]
async fn commit_over_http_links_and_lists() {
	let (fake, server, mut workbench) = start().await;
	let target = fake.seed_committed("Idea B", "");
	let out = execute(&mut workbench, &[
		"create",
		"--title",
		"Idea A",
		"--category",
		"literature",
		"--reference",
		"Ahrens, 2017",
	])
	.await;

	assert!(out.starts_with("Staged "));

	let staged = fake.store().list(NoteStatus::Staged, "");

	assert_eq!(staged[0].category, Category::Literature);
	assert_eq!(staged[0].reference.as_deref(), Some("Ahrens, 2017"));

	let link = format!("{}=supports", target.id);
	let out = execute(&mut workbench, &["commit", &staged[0].id, "--link", &link]).await;

	assert!(out.contains("1 link(s)"));

	let out = execute(&mut workbench, &["show", &target.id]).await;

	assert!(out.contains("<- supports Idea A"));

	let out = execute(&mut workbench, &["list", "--query", "idea"]).await;

	assert_eq!(out.lines().count(), 2);

	server.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn toggling_permanence_reports_the_new_state() {
	let (fake, server, mut workbench) = start().await;
	let note = fake.seed_committed("Idea B", "");
	let out = execute(&mut workbench, &["toggle-permanent", &note.id]).await;

	assert_eq!(out.trim(), format!("{} is now permanent.", note.id));
	assert!(fake.store().get(&note.id).expect("note missing").is_permanent);

	let out = execute(&mut workbench, &["relationship-types"]).await;

	assert!(out.contains("rt-example-of  is an example of  #2196F3"));

	server.shutdown().await.expect("shutdown failed");
}

#[tokio::test]
async fn repeated_link_targets_are_reported_as_notices() {
	let (fake, server, mut workbench) = start().await;
	let note = fake.seed_staged("Idea A", "");
	let target = fake.seed_committed("Idea B", "");
	let supports = format!("{}=supports", target.id);
	let contradicts = format!("{}=contradicts", target.id);
	let (out, notices) = execute_with_notices(&mut workbench, &[
		"commit",
		&note.id,
		"--link",
		&supports,
		"--link",
		&contradicts,
	])
	.await;

	assert!(out.contains("1 link(s)"));
	assert_eq!(notices.trim(), format!("Skipping {}; it is already linked.", target.id));
	assert_eq!(
		fake.store().get(&note.id).expect("note missing").links[0].relationship_type_id,
		"rt-supports"
	);

	server.shutdown().await.expect("shutdown failed");
}
