//! Debounced, stale-safe search over the note service.
//!
//! A driver task owns the query input. Each keystroke restarts the debounce timer; only a
//! settled query is sent. Every request carries a sequence number: issuing a newer request
//! aborts the previous one, and any response that is not for the latest sequence number is
//! dropped.

use std::{sync::Arc, time::Duration};

use tokio::{
	sync::{mpsc, watch},
	task::JoinHandle,
	time::{self, Instant},
};

use crate::{RefreshSubscriber, SharedService};
use zettel_domain::{Note, NoteStatus};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SearchPhase {
	/// Query below the minimum length; no results.
	Idle,
	/// Waiting for typing to pause.
	Debouncing,
	/// A request is in flight.
	Searching,
	Ready,
	Failed,
}
impl SearchPhase {
	pub fn is_settled(self) -> bool {
		matches!(self, Self::Idle | Self::Ready | Self::Failed)
	}
}

#[derive(Clone, Debug, PartialEq)]
pub struct SearchSnapshot {
	/// Sequence number of the latest issued (or invalidated) request.
	pub seq: u64,
	/// Input revision this snapshot reflects.
	pub input_version: u64,
	pub query: String,
	pub phase: SearchPhase,
	/// Last successful results. Kept while a newer request is pending or after a failure.
	pub results: Vec<Note>,
	pub error: Option<String>,
}

#[derive(Clone, Debug)]
pub struct SearchOptions {
	pub status: NoteStatus,
	pub debounce: Duration,
	/// Queries shorter than this (in characters) never reach the service.
	pub min_chars: usize,
}

pub struct DebouncedSearch {
	input: watch::Sender<(u64, String)>,
	snapshots: watch::Receiver<SearchSnapshot>,
	driver: JoinHandle<()>,
}
impl DebouncedSearch {
	/// Starts the driver. When the empty query already qualifies, it is searched right away,
	/// after the usual debounce.
	pub fn spawn(
		service: SharedService,
		options: SearchOptions,
		refresh: Option<RefreshSubscriber>,
	) -> Self {
		let (input, input_rx) = watch::channel((0, String::new()));
		let initial = SearchSnapshot {
			seq: 0,
			input_version: 0,
			query: String::new(),
			phase: if options.min_chars == 0 { SearchPhase::Debouncing } else { SearchPhase::Idle },
			results: Vec::new(),
			error: None,
		};
		let (snapshots_tx, snapshots) = watch::channel(initial);
		let driver = Driver::new(service, options, snapshots_tx);
		let driver = tokio::spawn(driver.run(input_rx, refresh));

		Self { input, snapshots, driver }
	}

	pub fn set_query(&self, query: impl Into<String>) {
		let query = query.into();

		self.input.send_modify(|(version, current)| {
			*version += 1;
			*current = query;
		});
	}

	pub fn clear(&self) {
		self.set_query(String::new());
	}

	pub fn query(&self) -> String {
		self.input.borrow().1.clone()
	}

	pub fn snapshot(&self) -> SearchSnapshot {
		self.snapshots.borrow().clone()
	}

	pub fn subscribe(&self) -> watch::Receiver<SearchSnapshot> {
		self.snapshots.clone()
	}

	/// Waits until the latest input has been fully processed.
	pub async fn settled(&mut self) -> SearchSnapshot {
		let version = self.input.borrow().0;

		self.wait_for(|snapshot| snapshot.input_version >= version && snapshot.phase.is_settled())
			.await
	}

	pub async fn wait_for<F>(&mut self, predicate: F) -> SearchSnapshot
	where
		F: FnMut(&SearchSnapshot) -> bool,
	{
		let found = self.snapshots.wait_for(predicate).await.map(|snapshot| snapshot.clone());

		match found {
			Ok(snapshot) => snapshot,
			Err(_) => self.snapshot(),
		}
	}
}
impl Drop for DebouncedSearch {
	fn drop(&mut self) {
		self.driver.abort();
	}
}

type Outcome = (u64, Result<Vec<Note>, String>);

struct Driver {
	service: SharedService,
	options: SearchOptions,
	out: watch::Sender<SearchSnapshot>,
	seq: u64,
	in_flight: Option<JoinHandle<()>>,
	done_tx: mpsc::UnboundedSender<Outcome>,
	done_rx: mpsc::UnboundedReceiver<Outcome>,
}
impl Driver {
	fn new(
		service: SharedService,
		options: SearchOptions,
		out: watch::Sender<SearchSnapshot>,
	) -> Self {
		let (done_tx, done_rx) = mpsc::unbounded_channel();

		Self { service, options, out, seq: 0, in_flight: None, done_tx, done_rx }
	}

	async fn run(
		mut self,
		mut input: watch::Receiver<(u64, String)>,
		mut refresh: Option<RefreshSubscriber>,
	) {
		let mut deadline =
			self.qualifies(&input.borrow().1).then(|| Instant::now() + self.options.debounce);

		loop {
			tokio::select! {
				changed = input.changed() => {
					if changed.is_err() {
						break;
					}

					let (version, query) = input.borrow_and_update().clone();

					if self.qualifies(&query) {
						deadline = Some(Instant::now() + self.options.debounce);

						self.invalidate();
						self.publish(version, &query, SearchPhase::Debouncing);
					} else {
						deadline = None;

						self.go_idle(version, &query);
					}
				},
				_ = time::sleep_until(deadline.unwrap_or_else(Instant::now)), if deadline.is_some() => {
					deadline = None;

					let (version, query) = input.borrow().clone();

					self.issue(version, query);
				},
				raised = next_refresh(&mut refresh) => {
					if !raised {
						refresh = None;

						continue;
					}

					let (version, query) = input.borrow().clone();

					if self.qualifies(&query) {
						deadline = None;

						tracing::debug!(query = %query, "Refresh raised; re-issuing search.");

						self.issue(version, query);
					}
				},
				Some((seq, outcome)) = self.done_rx.recv() => {
					self.complete(seq, outcome);
				},
			}
		}

		if let Some(handle) = self.in_flight.take() {
			handle.abort();
		}
	}

	fn qualifies(&self, query: &str) -> bool {
		query.chars().count() >= self.options.min_chars
	}

	fn publish(&self, version: u64, query: &str, phase: SearchPhase) {
		let seq = self.seq;

		self.out.send_modify(|snapshot| {
			snapshot.seq = seq;
			snapshot.input_version = version;
			snapshot.query = query.to_string();
			snapshot.phase = phase;
		});
	}

	/// Drops whatever is in flight; a response for an older sequence number is never published.
	fn invalidate(&mut self) {
		self.seq += 1;

		if let Some(handle) = self.in_flight.take() {
			handle.abort();
		}
	}

	fn go_idle(&mut self, version: u64, query: &str) {
		self.invalidate();

		let seq = self.seq;

		self.out.send_modify(|snapshot| {
			snapshot.seq = seq;
			snapshot.input_version = version;
			snapshot.query = query.to_string();
			snapshot.phase = SearchPhase::Idle;
			snapshot.results.clear();
			snapshot.error = None;
		});
	}

	fn issue(&mut self, version: u64, query: String) {
		self.invalidate();

		let seq = self.seq;
		let status = self.options.status;
		let service = Arc::clone(&self.service);
		let done = self.done_tx.clone();

		self.publish(version, &query, SearchPhase::Searching);

		self.in_flight = Some(tokio::spawn(async move {
			let outcome = service.list_notes(status, &query).await.map_err(|err| {
				tracing::warn!(%status, query = %query, error = %err, "Search request failed.");

				err.to_string()
			});
			let _ = done.send((seq, outcome));
		}));
	}

	fn complete(&mut self, seq: u64, outcome: Result<Vec<Note>, String>) {
		if seq != self.seq {
			tracing::debug!(seq, latest = self.seq, "Dropping stale search response.");

			return;
		}

		self.in_flight = None;

		self.out.send_modify(|snapshot| match outcome {
			Ok(notes) => {
				snapshot.phase = SearchPhase::Ready;
				snapshot.results = notes;
				snapshot.error = None;
			},
			Err(message) => {
				snapshot.phase = SearchPhase::Failed;
				snapshot.error = Some(message);
			},
		});
	}
}

async fn next_refresh(refresh: &mut Option<RefreshSubscriber>) -> bool {
	match refresh {
		Some(subscriber) => subscriber.changed().await,
		None => std::future::pending().await,
	}
}
