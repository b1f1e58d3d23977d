// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use xtransfer_traits::{ChainId, CoderFactory, RuntimeCoder, TypeNode};
use xtransfer_xcm::Version;

use crate::{
	Error, LOG_TARGET, VERSIONED_ASSETS_TYPES, VERSIONED_LOCATION_TYPES, VERSIONED_XCM_TYPES,
	XCM_PALLET_CANDIDATES,
};

/// Lowest version named by the variants of `type_name`.
///
/// `None` when the type is missing, is not a tagged union, or none of its variant names
/// parses as a version.
pub fn lowest_supported_version(coder: &dyn RuntimeCoder, type_name: &str) -> Option<Version> {
	match coder.type_node(type_name)? {
		TypeNode::Variant(names) => names.iter().filter_map(|name| name.parse().ok()).min(),
		TypeNode::Other => {
			log::debug!(target: LOG_TARGET, "type {type_name} is not a tagged union");
			None
		},
	}
}

/// First of `candidates`, in priority order, that the runtime defines.
pub fn module_name<'a>(coder: &dyn RuntimeCoder, candidates: &[&'a str]) -> Option<&'a str> {
	candidates.iter().copied().find(|candidate| coder.has_module(candidate))
}

/// Answers version and module questions about a chain from its runtime metadata.
pub struct MetadataResolver<F> {
	factory: F,
}

impl<F: CoderFactory> MetadataResolver<F> {
	pub fn new(factory: F) -> Self {
		Self { factory }
	}

	pub fn factory(&self) -> &F {
		&self.factory
	}

	/// Lowest protocol version `chain` accepts for `type_name`, `None` if it cannot tell.
	pub async fn resolve_lowest_supported_version(
		&self,
		chain: &ChainId,
		type_name: &str,
	) -> Result<Option<Version>, Error> {
		self.resolve_first_supported_version(chain, &[type_name]).await
	}

	/// Like [`Self::resolve_lowest_supported_version`], probing each of `type_names` until
	/// one of them yields a version. Runtimes renamed several versioned types over time.
	pub async fn resolve_first_supported_version(
		&self,
		chain: &ChainId,
		type_names: &[&str],
	) -> Result<Option<Version>, Error> {
		let Some(coder) = self.factory.fetch_coder(chain).await? else {
			log::debug!(target: LOG_TARGET, "no runtime metadata for chain {chain}");
			return Ok(None)
		};

		let version = type_names
			.iter()
			.find_map(|type_name| lowest_supported_version(coder.as_ref(), type_name));
		log::debug!(
			target: LOG_TARGET,
			"chain {chain} lowest supported version of {type_names:?} is {version:?}"
		);
		Ok(version)
	}

	pub async fn resolve_module_name(
		&self,
		chain: &ChainId,
		candidates: &[&str],
	) -> Result<String, Error> {
		let Some(coder) = self.factory.fetch_coder(chain).await? else {
			log::warn!(target: LOG_TARGET, "no runtime metadata for chain {chain}");
			return Err(Error::MetadataUnavailable(chain.clone()))
		};

		match module_name(coder.as_ref(), candidates) {
			Some(name) => {
				log::debug!(target: LOG_TARGET, "chain {chain} exposes module {name}");
				Ok(name.to_string())
			},
			None => Err(Error::NoMatchingModule {
				candidates: candidates.iter().map(|candidate| candidate.to_string()).collect(),
			}),
		}
	}

	pub async fn resolve_xcm_pallet(&self, chain: &ChainId) -> Result<String, Error> {
		self.resolve_module_name(chain, XCM_PALLET_CANDIDATES).await
	}

	pub async fn resolve_location_version(&self, chain: &ChainId) -> Result<Option<Version>, Error> {
		self.resolve_first_supported_version(chain, VERSIONED_LOCATION_TYPES).await
	}

	pub async fn resolve_assets_version(&self, chain: &ChainId) -> Result<Option<Version>, Error> {
		self.resolve_first_supported_version(chain, VERSIONED_ASSETS_TYPES).await
	}

	pub async fn resolve_message_version(&self, chain: &ChainId) -> Result<Option<Version>, Error> {
		self.resolve_first_supported_version(chain, VERSIONED_XCM_TYPES).await
	}
}
