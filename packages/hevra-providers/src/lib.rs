pub mod datastore;
pub mod error;
pub mod insolvency;

pub use error::{Error, Result};

/// Upstream error bodies are truncated to this many characters.
const ERROR_BODY_LIMIT: usize = 512;

pub(crate) async fn read_error_body(res: reqwest::Response) -> String {
	let body = res.text().await.unwrap_or_default();

	match body.char_indices().nth(ERROR_BODY_LIMIT) {
		Some((cut, _)) => body[..cut].to_string(),
		None => body,
	}
}
