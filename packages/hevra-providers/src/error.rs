pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Reqwest(#[from] reqwest::Error),
	#[error(transparent)]
	SerdeJson(#[from] serde_json::Error),
	#[error("Upstream request timed out after {timeout_ms} ms.")]
	Timeout { timeout_ms: u64 },
	#[error("Upstream returned HTTP {status}: {body}")]
	Status { status: u16, body: String },
	#[error("{message}")]
	InvalidResponse { message: String },
}
impl Error {
	/// Failures worth another attempt: timeouts, connection errors and 5xx responses.
	pub fn is_transient(&self) -> bool {
		match self {
			Self::Timeout { .. } => true,
			Self::Status { status, .. } => *status >= 500,
			Self::Reqwest(err) => err.is_timeout() || err.is_connect() || err.is_request(),
			Self::SerdeJson(_) | Self::InvalidResponse { .. } => false,
		}
	}

	pub(crate) fn from_send(err: reqwest::Error, timeout_ms: u64) -> Self {
		if err.is_timeout() { Self::Timeout { timeout_ms } } else { Self::Reqwest(err) }
	}
}
