pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error("Invalid request: {message}")]
	Validation { message: String },
	#[error("Upstream unavailable: {message}")]
	UpstreamUnavailable { message: String },
	#[error("Unexpected upstream response: {message}")]
	UpstreamShape { message: String },
	#[error("Upstream timed out after {timeout_ms} ms.")]
	Timeout { timeout_ms: u64 },
}
impl Error {
	pub fn is_validation(&self) -> bool {
		matches!(self, Self::Validation { .. })
	}
}

impl From<hevra_providers::Error> for Error {
	fn from(err: hevra_providers::Error) -> Self {
		match err {
			hevra_providers::Error::Timeout { timeout_ms } => Self::Timeout { timeout_ms },
			hevra_providers::Error::Reqwest(inner) if inner.is_decode() =>
				Self::UpstreamShape { message: inner.to_string() },
			hevra_providers::Error::Reqwest(inner) =>
				Self::UpstreamUnavailable { message: inner.to_string() },
			hevra_providers::Error::Status { status, body } =>
				Self::UpstreamUnavailable { message: format!("HTTP {status}: {body}") },
			hevra_providers::Error::SerdeJson(inner) =>
				Self::UpstreamShape { message: inner.to_string() },
			hevra_providers::Error::InvalidResponse { message } => Self::UpstreamShape { message },
		}
	}
}
