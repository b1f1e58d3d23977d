// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use crate::Version;

#[derive(Debug, thiserror::Error)]
pub enum Error {
	/// Both operands must be written for the same protocol version.
	#[error("xcm version mismatch: expected {expected}, got {actual}")]
	VersionMismatch { expected: Version, actual: Version },
	#[error("{what} is not representable in xcm {version}")]
	UnsupportedInVersion { what: &'static str, version: Version },
	#[error("{0} junctions exceed the maximum of 8")]
	TooManyJunctions(usize),
	#[error("account id must be {expected} bytes, got {actual}")]
	InvalidAccountLength { expected: usize, actual: usize },
	#[error("invalid reserve path: {0}")]
	InvalidReservePath(String),
	#[error(transparent)]
	Codec(#[from] serde_json::Error),
}
