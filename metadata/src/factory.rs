// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use std::{
	collections::BTreeMap,
	sync::{Arc, RwLock},
};

use async_trait::async_trait;
use xtransfer_traits::{ChainId, CoderError, CoderFactory, RuntimeCoder};

use crate::{coder::MetadataCoder, LOG_TARGET};

/// Coders registered up front, keyed by chain id.
#[derive(Default)]
pub struct InMemoryCoderFactory {
	coders: RwLock<BTreeMap<ChainId, Arc<dyn RuntimeCoder>>>,
}

impl InMemoryCoderFactory {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn insert(&self, chain: ChainId, coder: Arc<dyn RuntimeCoder>) -> Result<(), CoderError> {
		log::debug!(target: LOG_TARGET, "registered runtime coder for chain {chain}");
		self.coders
			.write()
			.map_err(|e| CoderError::Fetch(e.to_string()))?
			.insert(chain, coder);
		Ok(())
	}

	/// Decodes raw runtime metadata and registers the resulting coder.
	pub fn insert_metadata(&self, chain: ChainId, metadata: &[u8]) -> Result<(), CoderError> {
		let coder = MetadataCoder::from_bytes(metadata)?;
		self.insert(chain, Arc::new(coder))
	}
}

#[async_trait]
impl CoderFactory for InMemoryCoderFactory {
	async fn fetch_coder(&self, chain: &ChainId) -> Result<Option<Arc<dyn RuntimeCoder>>, CoderError> {
		let coders = self.coders.read().map_err(|e| CoderError::Fetch(e.to_string()))?;
		Ok(coders.get(chain).cloned())
	}
}
