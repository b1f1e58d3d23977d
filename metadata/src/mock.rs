// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

#![cfg(test)]

use std::{collections::BTreeMap, sync::Arc};

use async_trait::async_trait;
use codec::Encode;
use frame_metadata::{
	v14::{ExtrinsicMetadata, PalletMetadata, RuntimeMetadataV14},
	RuntimeMetadata, RuntimeMetadataPrefixed, META_RESERVED,
};
use scale_info::{
	build::{Fields, Variants},
	meta_type, Path, PortableRegistry, Registry, Type, TypeInfo,
};
use serde_json::Value;
use xtransfer_traits::{ChainId, CoderError, CoderFactory, RuntimeCoder, TypeNode};

pub const POLKADOT: &str = "0x91b171bb158e2d3848fa23a9f1c25182fb8e20313b2c1eb49219da7a70ce90c3";
pub const ASSET_HUB: &str = "0x68d56f15f85d3136970ec16946040bc1752654e906147f7e43e9d539d7c3de2f";
pub const UNKNOWN_CHAIN: &str = "0x00";

pub fn init_logger() {
	let _ = env_logger::builder().is_test(true).try_init();
}

/// Stand-in for a runtime's versioned location enum with three generations.
pub struct VersionedLocationStub;

impl TypeInfo for VersionedLocationStub {
	type Identity = Self;

	fn type_info() -> Type {
		Type::builder().path(Path::new("VersionedLocation", "xcm")).variant(
			Variants::new()
				.variant("V2", |v| v.index(1).fields(Fields::unnamed().field(|f| f.ty::<u8>())))
				.variant("V3", |v| v.index(3).fields(Fields::unnamed().field(|f| f.ty::<u8>())))
				.variant("V4", |v| v.index(4).fields(Fields::unnamed().field(|f| f.ty::<u8>()))),
		)
	}
}

#[derive(Debug, Clone, Encode, scale_info::TypeInfo)]
pub enum Choice {
	Empty,
	Tuple(u8, u8),
	Named { value: u32 },
}

#[derive(Debug, Clone, Encode, scale_info::TypeInfo)]
pub struct Sample {
	pub flag: bool,
	#[codec(compact)]
	pub amount: u128,
	pub key: [u8; 4],
	pub items: Vec<u8>,
	pub maybe: Option<u32>,
	pub pair: (u8, String),
	pub single: [Choice; 1],
	pub choice: Choice,
	pub unit: Choice,
}

#[derive(Debug, Clone, Encode, scale_info::TypeInfo)]
pub struct CompactIndex {
	#[codec(compact)]
	pub id: u32,
}

/// Shape of a messaging module's call enum.
#[allow(non_camel_case_types)]
#[derive(Debug, Clone, Encode, scale_info::TypeInfo)]
pub enum PalletCall {
	#[codec(index = 8)]
	limited_reserve_transfer_assets { dest: Choice, fee_asset_item: u32, weight_limit: Choice },
	#[codec(index = 9)]
	limited_teleport_assets { dest: Choice, fee_asset_item: u32, weight_limit: Choice },
}

/// Registers `T` alone and returns its id in the resulting registry.
pub fn registry_with<T: TypeInfo + 'static>() -> (PortableRegistry, u32) {
	let mut registry = Registry::new();
	let id = registry.register_type(&meta_type::<T>()).id;
	(PortableRegistry::from(registry), id)
}

/// Magic prefixed v14 metadata holding [`VersionedLocationStub`] and the given pallets.
pub fn portable_metadata(pallet_names: Vec<String>) -> Vec<u8> {
	let mut registry = Registry::new();
	let runtime = registry.register_type(&meta_type::<VersionedLocationStub>());
	let extrinsic = registry.register_type(&meta_type::<()>());

	let pallets = pallet_names
		.into_iter()
		.enumerate()
		.map(|(index, name)| PalletMetadata {
			name,
			storage: None,
			calls: None,
			event: None,
			constants: vec![],
			error: None,
			index: index as u8,
		})
		.collect();
	let metadata = RuntimeMetadataV14 {
		types: PortableRegistry::from(registry),
		pallets,
		extrinsic: ExtrinsicMetadata { ty: extrinsic, version: 4, signed_extensions: vec![] },
		ty: runtime,
	};
	RuntimeMetadataPrefixed(META_RESERVED, RuntimeMetadata::V14(metadata)).encode()
}

/// Coder answering from fixed tables, encoding values as JSON text.
#[derive(Default)]
pub struct MockCoder {
	nodes: BTreeMap<String, TypeNode>,
	modules: Vec<String>,
}

impl MockCoder {
	pub fn with_variants(mut self, type_name: &str, names: &[&str]) -> Self {
		self.nodes.insert(
			type_name.to_string(),
			TypeNode::Variant(names.iter().map(|name| name.to_string()).collect()),
		);
		self
	}

	pub fn with_other(mut self, type_name: &str) -> Self {
		self.nodes.insert(type_name.to_string(), TypeNode::Other);
		self
	}

	pub fn with_module(mut self, module_name: &str) -> Self {
		self.modules.push(module_name.to_string());
		self
	}
}

impl RuntimeCoder for MockCoder {
	fn type_node(&self, type_name: &str) -> Option<TypeNode> {
		self.nodes.get(type_name).cloned()
	}

	fn has_module(&self, module_name: &str) -> bool {
		self.modules.iter().any(|module| module == module_name)
	}

	fn encode(&self, type_name: &str, value: &Value) -> Result<Vec<u8>, CoderError> {
		if !self.nodes.contains_key(type_name) {
			return Err(CoderError::TypeNotFound(type_name.to_string()))
		}
		serde_json::to_vec(value)
			.map_err(|e| CoderError::Encoding { path: type_name.to_string(), reason: e.to_string() })
	}

	fn encode_call(
		&self,
		module_name: &str,
		call_name: &str,
		args: &Value,
	) -> Result<Vec<u8>, CoderError> {
		if !self.has_module(module_name) {
			return Err(CoderError::TypeNotFound(format!("{module_name} calls")))
		}
		serde_json::to_vec(&(call_name, args)).map_err(|e| CoderError::Encoding {
			path: format!("{module_name}.{call_name}"),
			reason: e.to_string(),
		})
	}
}

pub struct FailingFactory;

#[async_trait]
impl CoderFactory for FailingFactory {
	async fn fetch_coder(&self, chain: &ChainId) -> Result<Option<Arc<dyn RuntimeCoder>>, CoderError> {
		Err(CoderError::Fetch(format!("rpc unreachable for {chain}")))
	}
}
