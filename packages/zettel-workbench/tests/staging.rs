use std::sync::Arc;

use zettel_domain::{Category, Link, Note, NoteStatus};
use zettel_testkit::{Call, FakeNoteService, NoteStore, Operation};
use zettel_workbench::{
	AddOutcome, Error, NoteForm, RefreshSignal, Settings, StagingArea, StagingPhase,
	ValidationError,
};

fn staging(fake: &Arc<FakeNoteService>) -> (StagingArea, RefreshSignal) {
	let refresh = RefreshSignal::new();
	let staging = StagingArea::new(fake.clone(), refresh.clone(), &Settings::default());

	(staging, refresh)
}

async fn selected(fake: &Arc<FakeNoteService>, note: &Note) -> (StagingArea, RefreshSignal) {
	let (mut staging, refresh) = staging(fake);

	staging.mount().await.expect("mount failed");
	staging.select(&note.id).await.expect("select failed");

	(staging, refresh)
}

#[tokio::test(start_paused = true)]
async fn blank_title_blocks_creation_without_a_request() {
	let fake = Arc::new(FakeNoteService::new());
	let (mut staging, _) = staging(&fake);

	staging.form_mut().title = "   ".to_string();

	let err = staging.create_note().await.expect_err("Expected a validation error.");

	assert_eq!(err.validation(), Some(&ValidationError::EmptyTitle));
	assert_eq!(fake.count(Operation::CreateNote), 0);
	assert_eq!(staging.form().title, "   ");
}

#[tokio::test(start_paused = true)]
async fn creation_resets_the_form_and_refetches_the_staged_list() {
	let fake = Arc::new(FakeNoteService::new());
	let (mut staging, _) = staging(&fake);

	staging.mount().await.expect("mount failed");

	assert_eq!(staging.phase(), &StagingPhase::Empty);

	let form = staging.form_mut();

	form.title = "Idea A".to_string();
	form.body = "First thought.".to_string();
	form.category = Category::Literature;
	form.reference = "Ahrens, 2017".to_string();

	let created = staging.create_note().await.expect("create failed");

	assert_eq!(created.status, NoteStatus::Staged);
	assert_eq!(created.reference.as_deref(), Some("Ahrens, 2017"));
	assert_eq!(staging.form(), &NoteForm::default());
	assert_eq!(staging.staged().len(), 1);
	assert_eq!(staging.phase(), &StagingPhase::StagedUnselected);
	assert_eq!(fake.count(Operation::ListNotes), 2);
}

#[tokio::test(start_paused = true)]
async fn failed_creation_keeps_the_form() {
	let fake = Arc::new(FakeNoteService::new());
	let (mut staging, _) = staging(&fake);

	fake.fail(Operation::CreateNote);

	staging.form_mut().title = "Idea A".to_string();

	let err = staging.create_note().await.expect_err("Expected a service error.");

	assert!(matches!(err, Error::Service(_)));
	assert_eq!(staging.form().title, "Idea A");
}

#[tokio::test(start_paused = true)]
async fn switching_selection_discards_drafted_links() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let b = fake.seed_staged("Idea C", "");
	let target = fake.seed_committed("Idea B", "");
	let (mut staging, _) = selected(&fake, &a).await;

	assert_eq!(staging.add_link(&target).expect("add failed"), AddOutcome::Added);
	assert_eq!(staging.suggested_links().len(), 1);

	staging.select(&b.id).await.expect("select failed");

	assert!(staging.suggested_links().is_empty());
	assert_eq!(staging.selected().map(|note| note.id.as_str()), Some(b.id.as_str()));
}

#[tokio::test(start_paused = true)]
async fn reselecting_the_same_note_still_discards_links() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let target = fake.seed_committed("Idea B", "");
	let (mut staging, _) = selected(&fake, &a).await;

	staging.add_link(&target).expect("add failed");
	staging.select(&a.id).await.expect("select failed");

	assert!(staging.suggested_links().is_empty());
	assert!(matches!(staging.phase(), StagingPhase::StagedSelected { .. }));
}

#[tokio::test(start_paused = true)]
async fn selecting_an_unknown_note_is_rejected() {
	let fake = Arc::new(FakeNoteService::new());
	let (mut staging, _) = staging(&fake);

	fake.seed_staged("Idea A", "");
	staging.mount().await.expect("mount failed");

	let err = staging.select("missing").await.expect_err("Expected a validation error.");

	assert_eq!(err.validation(), Some(&ValidationError::UnknownNote("missing".to_string())));
	assert_eq!(staging.phase(), &StagingPhase::StagedUnselected);
}

#[tokio::test(start_paused = true)]
async fn duplicate_targets_keep_the_first_link() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let target = fake.seed_committed("Idea B", "");
	let (mut staging, _) = selected(&fake, &a).await;

	assert_eq!(staging.add_link(&target).expect("add failed"), AddOutcome::Added);

	staging.editor_mut().select_relationship_type("contradicts").expect("select type failed");

	assert_eq!(staging.add_link(&target).expect("add failed"), AddOutcome::Duplicate);

	let links = staging.suggested_links().as_slice();

	assert_eq!(links.len(), 1);
	assert_eq!(links[0].relationship_type_label, "supports");
	assert_eq!(links[0].target_note_title, "Idea B");
}

#[tokio::test(start_paused = true)]
async fn removing_a_link_filters_by_target() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let b = fake.seed_committed("Idea B", "");
	let c = fake.seed_committed("Idea C", "");
	let (mut staging, _) = selected(&fake, &a).await;

	staging.add_link(&b).expect("add failed");
	staging.add_link(&c).expect("add failed");

	assert!(staging.remove_link(&b.id).expect("remove failed"));
	assert!(!staging.remove_link(&b.id).expect("remove failed"));
	assert_eq!(
		staging.suggested_links().iter().map(|link| link.target_note_id.as_str()).collect::<Vec<_>>(),
		vec![c.id.as_str()]
	);
}

#[tokio::test(start_paused = true)]
async fn staged_notes_cannot_be_link_targets() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let other = fake.seed_staged("Idea C", "");
	let (mut staging, _) = selected(&fake, &a).await;
	let err = staging.add_link(&other).expect_err("Expected a validation error.");

	assert_eq!(err.validation(), Some(&ValidationError::TargetNotCommitted(other.id.clone())));
	assert!(staging.suggested_links().is_empty());
}

#[tokio::test(start_paused = true)]
async fn missing_relationship_types_block_adding_links() {
	let fake = Arc::new(FakeNoteService::with_store(NoteStore::new(Vec::new())));
	let a = fake.seed_staged("Idea A", "");
	let target = fake.seed_committed("Idea B", "");
	let (mut staging, _) = selected(&fake, &a).await;

	assert!(staging.editor().catalog().is_loaded());
	assert!(staging.editor().selected_relationship_type().is_none());

	let err = staging.add_link(&target).expect_err("Expected a validation error.");

	assert_eq!(err.validation(), Some(&ValidationError::NoRelationshipType));
	assert!(staging.suggested_links().is_empty());
}

#[tokio::test(start_paused = true)]
async fn commit_sends_links_and_raises_refresh() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let target = fake.seed_committed("Idea B", "");
	let (mut staging, refresh) = selected(&fake, &a).await;

	staging.add_link(&target).expect("add failed");

	let receipt = staging.commit().await.expect("commit failed");
	let expected = vec![Link {
		target_note_id: target.id.clone(),
		relationship_type_id: "rt-supports".to_string(),
	}];

	assert_eq!(receipt.note_id, a.id);
	assert_eq!(receipt.links, expected);
	assert_eq!(receipt.message.as_deref(), Some("Note committed successfully"));
	assert_eq!(receipt.refresh_version, 1);
	assert_eq!(refresh.version(), 1);
	assert!(staging.suggested_links().is_empty());
	assert!(staging.selected().is_none());
	assert!(staging.staged().is_empty());
	assert_eq!(staging.phase(), &StagingPhase::Empty);
	assert!(fake.calls().contains(&Call::CommitNote {
		id: a.id.clone(),
		request: zettel_domain::CommitRequest { links: expected },
	}));
}

#[tokio::test(start_paused = true)]
async fn commit_without_links_is_allowed() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let (mut staging, refresh) = selected(&fake, &a).await;
	let receipt = staging.commit().await.expect("commit failed");

	assert!(receipt.links.is_empty());
	assert_eq!(refresh.version(), 1);
	assert_eq!(
		fake.store().get(&a.id).expect("note missing").status,
		NoteStatus::Committed
	);
}

#[tokio::test(start_paused = true)]
async fn commit_without_selection_sends_nothing() {
	let fake = Arc::new(FakeNoteService::new());
	let (mut staging, refresh) = staging(&fake);

	fake.seed_staged("Idea A", "");
	staging.mount().await.expect("mount failed");

	let err = staging.commit().await.expect_err("Expected a validation error.");

	assert_eq!(err.validation(), Some(&ValidationError::NoSelection));
	assert_eq!(fake.count(Operation::CommitNote), 0);
	assert_eq!(refresh.version(), 0);
}

#[tokio::test(start_paused = true)]
async fn failed_commit_keeps_selection_and_links_for_resubmission() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let target = fake.seed_committed("Idea B", "");
	let (mut staging, refresh) = selected(&fake, &a).await;

	staging.add_link(&target).expect("add failed");
	fake.fail(Operation::CommitNote);

	let err = staging.commit().await.expect_err("Expected a service error.");

	assert!(matches!(err, Error::Service(_)));
	assert!(matches!(staging.phase(), StagingPhase::CommitFailed { note, .. } if note.id == a.id));
	assert_eq!(staging.suggested_links().len(), 1);
	assert_eq!(staging.staged().len(), 1);
	assert_eq!(refresh.version(), 0);

	fake.recover(Operation::CommitNote);

	let receipt = staging.commit().await.expect("resubmit failed");

	assert_eq!(receipt.links.len(), 1);
	assert_eq!(refresh.version(), 1);
	assert_eq!(fake.count(Operation::CommitNote), 2);
}

#[tokio::test(start_paused = true)]
async fn deselect_abandons_links() {
	let fake = Arc::new(FakeNoteService::new());
	let a = fake.seed_staged("Idea A", "");
	let target = fake.seed_committed("Idea B", "");
	let (mut staging, _) = selected(&fake, &a).await;

	staging.add_link(&target).expect("add failed");
	staging.deselect().expect("deselect failed");

	assert!(staging.suggested_links().is_empty());
	assert_eq!(staging.phase(), &StagingPhase::StagedUnselected);

	let err = staging.add_link(&target).expect_err("Expected a validation error.");

	assert_eq!(err.validation(), Some(&ValidationError::NoSelection));
}
