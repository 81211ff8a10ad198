pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Request to {url} failed: {source}")]
	Transport { url: String, source: reqwest::Error },
	#[error("Note service returned {status} for {url}: {body}")]
	Status { url: String, status: u16, body: String },
	#[error("Failed to decode response from {url}: {source}")]
	Decode { url: String, source: serde_json::Error },
	#[error("{message}")]
	InvalidConfig { message: String },
}
impl Error {
	pub fn status(&self) -> Option<u16> {
		match self {
			Self::Status { status, .. } => Some(*status),
			_ => None,
		}
	}

	pub fn is_not_found(&self) -> bool {
		self.status() == Some(404)
	}
}
