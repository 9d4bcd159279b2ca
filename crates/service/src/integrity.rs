//! Quote integrity verification using HMAC-SHA256
//!
//! Quotes are durable, shareable offers; the checksum lets any later
//! consumer verify a document was issued by this engine and not altered.

use hmac::{Hmac, Mac};
use sha2::Sha256;
use std::fmt::Write;
use thiserror::Error;

type HmacSha256 = Hmac<Sha256>;

/// Errors that can occur during integrity operations
#[derive(Debug, Error)]
pub enum IntegrityError {
	#[error("Failed to create HMAC: {0}")]
	HmacCreation(String),

	#[error("Checksum verification failed")]
	VerificationFailed,
}

#[cfg_attr(test, mockall::automock)]
pub trait IntegrityTrait: Send + Sync {
	/// Generate a checksum for a canonical payload string
	fn generate_checksum(&self, payload: &str) -> Result<String, IntegrityError>;

	/// Verify a payload against an expected checksum
	fn verify_checksum(&self, payload: &str, expected: &str) -> Result<bool, IntegrityError>;
}

/// HMAC-SHA256 integrity service keyed with a deployment secret
pub struct IntegrityService {
	secret_key: String,
}

impl IntegrityService {
	pub fn new(secret_key: impl Into<String>) -> Self {
		Self {
			secret_key: secret_key.into(),
		}
	}
}

impl IntegrityTrait for IntegrityService {
	fn generate_checksum(&self, payload: &str) -> Result<String, IntegrityError> {
		let mut mac = HmacSha256::new_from_slice(self.secret_key.as_bytes())
			.map_err(|e| IntegrityError::HmacCreation(e.to_string()))?;
		mac.update(payload.as_bytes());

		let code_bytes = mac.finalize().into_bytes();
		let mut hex_string = String::with_capacity(code_bytes.len() * 2);
		for byte in code_bytes {
			write!(&mut hex_string, "{:02x}", byte)
				.map_err(|e| IntegrityError::HmacCreation(e.to_string()))?;
		}

		Ok(hex_string)
	}

	fn verify_checksum(&self, payload: &str, expected: &str) -> Result<bool, IntegrityError> {
		let calculated = self.generate_checksum(payload)?;
		Ok(constant_time_eq(calculated.as_bytes(), expected.as_bytes()))
	}
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
	if a.len() != b.len() {
		return false;
	}
	let mut diff = 0u8;
	for (x, y) in a.iter().zip(b.iter()) {
		diff |= x ^ y;
	}
	diff == 0
}
