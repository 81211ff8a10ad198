use std::sync::Arc;

use tokio::sync::watch;

/// Version counter raised after a commit so committed-note views know to re-fetch.
///
/// Observation is fire-and-forget: several raises between two observations are seen once.
#[derive(Clone, Debug)]
pub struct RefreshSignal {
	tx: Arc<watch::Sender<u64>>,
}
impl RefreshSignal {
	pub fn new() -> Self {
		let (tx, _) = watch::channel(0);

		Self { tx: Arc::new(tx) }
	}

	pub fn raise(&self) -> u64 {
		self.tx.send_modify(|version| *version = version.wrapping_add(1));

		self.version()
	}

	pub fn version(&self) -> u64 {
		*self.tx.borrow()
	}

	/// New subscribers only observe raises that happen after they subscribed.
	pub fn subscribe(&self) -> RefreshSubscriber {
		RefreshSubscriber { rx: self.tx.subscribe() }
	}
}
impl Default for RefreshSignal {
	fn default() -> Self {
		Self::new()
	}
}

#[derive(Debug)]
pub struct RefreshSubscriber {
	rx: watch::Receiver<u64>,
}
impl RefreshSubscriber {
	/// Returns true once per unseen raise.
	pub fn observe(&mut self) -> bool {
		match self.rx.has_changed() {
			Ok(true) => {
				self.rx.borrow_and_update();

				true
			},
			_ => false,
		}
	}

	/// Waits for the next raise. Returns false once the signal is gone.
	pub async fn changed(&mut self) -> bool {
		self.rx.changed().await.is_ok()
	}
}

#[cfg(test)]
mod tests {
	use super::RefreshSignal;

	#[test]
	fn raises_are_observed_once() {
		let signal = RefreshSignal::new();
		let mut subscriber = signal.subscribe();

		assert!(!subscriber.observe());

		signal.raise();
		signal.raise();

		assert!(subscriber.observe());
		assert!(!subscriber.observe());
		assert_eq!(signal.version(), 2);
	}

	#[test]
	fn late_subscribers_ignore_earlier_raises() {
		let signal = RefreshSignal::new();

		signal.raise();

		let mut subscriber = signal.subscribe();

		assert!(!subscriber.observe());
	}
}
