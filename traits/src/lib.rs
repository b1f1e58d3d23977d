// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;

pub type ParaId = u32;
/// Genesis-hash based chain identifier, hex encoded.
pub type ChainId = String;

/// Shape of a metadata type node, narrowed to what version negotiation needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TypeNode {
	/// Tagged union, variant names in declaration order.
	Variant(Vec<String>),
	/// Any other type definition.
	Other,
}

#[derive(Debug, thiserror::Error)]
pub enum CoderError {
	#[error("type `{0}` not found in runtime metadata")]
	TypeNotFound(String),
	#[error("cannot encode value at `{path}`: {reason}")]
	Encoding { path: String, reason: String },
	#[error("invalid runtime metadata: {0}")]
	Metadata(String),
	#[error("runtime metadata fetch failed: {0}")]
	Fetch(String),
}

/// Runtime type information of a single chain.
pub trait RuntimeCoder: Send + Sync {
	/// Look up a type node by its dot separated path, e.g. `xcm.VersionedLocation`.
	fn type_node(&self, type_name: &str) -> Option<TypeNode>;

	/// Whether the chain's module (pallet) index contains `module_name`.
	fn has_module(&self, module_name: &str) -> bool;

	/// Encode a JSON token value as the named wire type.
	fn encode(&self, type_name: &str, value: &Value) -> Result<Vec<u8>, CoderError>;

	/// Encode a dispatchable call of `module_name`: module index, call index, then `args`
	/// given as an object keyed by argument name.
	fn encode_call(
		&self,
		module_name: &str,
		call_name: &str,
		args: &Value,
	) -> Result<Vec<u8>, CoderError>;
}

/// Source of per-chain coders, usually backed by a runtime metadata cache.
#[async_trait]
pub trait CoderFactory: Send + Sync {
	/// Returns `None` when the chain has no metadata available.
	async fn fetch_coder(&self, chain: &ChainId) -> Result<Option<Arc<dyn RuntimeCoder>>, CoderError>;
}
