// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use std::collections::BTreeMap;

use codec::Decode;
use frame_metadata::{RuntimeMetadata, RuntimeMetadataPrefixed, META_RESERVED};
use scale_info::{PortableRegistry, TypeDef};
use serde_json::Value;
use xtransfer_traits::{CoderError, RuntimeCoder, TypeNode};

use crate::{scale::ScaleEncoder, LOG_TARGET};

/// [`RuntimeCoder`] over a chain's runtime metadata.
///
/// Types are looked up by their dot joined path, e.g. `xcm.VersionedLocation`. When several
/// registry entries share a path (generic instantiations) the first one wins.
pub struct MetadataCoder {
	registry: PortableRegistry,
	pallets: Vec<String>,
	/// Module name to its index and call enum type.
	calls: BTreeMap<String, (u8, u32)>,
	paths: BTreeMap<String, u32>,
}

impl MetadataCoder {
	pub fn new(registry: PortableRegistry, pallets: Vec<String>) -> Self {
		let mut paths = BTreeMap::new();
		for ty in registry.types.iter() {
			if ty.ty.path.segments.is_empty() {
				continue
			}
			paths.entry(ty.ty.path.segments.join(".")).or_insert(ty.id);
		}
		log::debug!(
			target: LOG_TARGET,
			"indexed {} named types and {} pallets",
			paths.len(),
			pallets.len()
		);
		Self { registry, pallets, calls: BTreeMap::new(), paths }
	}

	/// Registers the call enums of modules, given as `(name, module index, call type id)`.
	pub fn with_calls<I: IntoIterator<Item = (String, u8, u32)>>(mut self, calls: I) -> Self {
		self.calls
			.extend(calls.into_iter().map(|(name, index, call_ty)| (name, (index, call_ty))));
		self
	}

	pub fn from_metadata(metadata: RuntimeMetadataPrefixed) -> Result<Self, CoderError> {
		if metadata.0 != META_RESERVED {
			return Err(CoderError::Metadata(format!("bad magic number {:#x}", metadata.0)))
		}
		match metadata.1 {
			RuntimeMetadata::V14(metadata) => {
				let calls = metadata
					.pallets
					.iter()
					.filter_map(|pallet| {
						Some((pallet.name.clone(), pallet.index, pallet.calls.as_ref()?.ty.id))
					})
					.collect::<Vec<_>>();
				Ok(Self::new(
					metadata.types,
					metadata.pallets.into_iter().map(|pallet| pallet.name).collect(),
				)
				.with_calls(calls))
			},
			RuntimeMetadata::V15(metadata) => {
				let calls = metadata
					.pallets
					.iter()
					.filter_map(|pallet| {
						Some((pallet.name.clone(), pallet.index, pallet.calls.as_ref()?.ty.id))
					})
					.collect::<Vec<_>>();
				Ok(Self::new(
					metadata.types,
					metadata.pallets.into_iter().map(|pallet| pallet.name).collect(),
				)
				.with_calls(calls))
			},
			other => Err(CoderError::Metadata(format!(
				"metadata version {} is not supported",
				other.version()
			))),
		}
	}

	/// Decodes SCALE encoded, magic prefixed runtime metadata.
	pub fn from_bytes(mut bytes: &[u8]) -> Result<Self, CoderError> {
		let metadata = RuntimeMetadataPrefixed::decode(&mut bytes)
			.map_err(|e| CoderError::Metadata(e.to_string()))?;
		Self::from_metadata(metadata)
	}

	pub fn type_id(&self, type_name: &str) -> Option<u32> {
		self.paths.get(type_name).copied()
	}

	pub fn registry(&self) -> &PortableRegistry {
		&self.registry
	}

	pub fn encode_type_id(&self, type_id: u32, value: &Value) -> Result<Vec<u8>, CoderError> {
		ScaleEncoder::new(&self.registry).encode(type_id, value, &format!("#{type_id}"))
	}
}

impl RuntimeCoder for MetadataCoder {
	fn type_node(&self, type_name: &str) -> Option<TypeNode> {
		let ty = self.registry.resolve(self.type_id(type_name)?)?;
		Some(match &ty.type_def {
			TypeDef::Variant(variant) =>
				TypeNode::Variant(variant.variants.iter().map(|v| v.name.clone()).collect()),
			_ => TypeNode::Other,
		})
	}

	fn has_module(&self, module_name: &str) -> bool {
		self.pallets.iter().any(|pallet| pallet == module_name)
	}

	fn encode(&self, type_name: &str, value: &Value) -> Result<Vec<u8>, CoderError> {
		let type_id =
			self.type_id(type_name).ok_or_else(|| CoderError::TypeNotFound(type_name.to_string()))?;
		ScaleEncoder::new(&self.registry).encode(type_id, value, type_name)
	}

	fn encode_call(
		&self,
		module_name: &str,
		call_name: &str,
		args: &Value,
	) -> Result<Vec<u8>, CoderError> {
		let (index, call_ty) = self
			.calls
			.get(module_name)
			.copied()
			.ok_or_else(|| CoderError::TypeNotFound(format!("{module_name} calls")))?;
		let call = Value::Array(vec![Value::String(call_name.to_string()), args.clone()]);
		let path = format!("{module_name}.{call_name}");

		let mut encoded = vec![index];
		encoded.extend(ScaleEncoder::new(&self.registry).encode(call_ty, &call, &path)?);
		log::debug!(target: LOG_TARGET, "encoded call {path} into {} bytes", encoded.len());
		Ok(encoded)
	}
}
