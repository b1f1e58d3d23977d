// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use core::fmt;

use serde::{
	de::{self, SeqAccess, Visitor},
	ser::{self, SerializeStruct},
	Deserializer, Serialize, Serializer,
};
use xtransfer_traits::ParaId;

use crate::{
	variant::{
		deserialize_tagged, serialize_tagged, serialize_unit_tagged, unsupported, Encoded,
		HexBytes, HexRef, IndexKeyed, ItemsSeed, Listed, Payload, Quantity, VariantTable,
		VersionedCodec,
	},
	Error, Version,
};

pub(crate) const X_TAGS: [&str; 8] = ["X1", "X2", "X3", "X4", "X5", "X6", "X7", "X8"];

pub(crate) fn x_tag<E: ser::Error>(len: usize) -> Result<&'static str, E> {
	len.checked_sub(1)
		.and_then(|index| X_TAGS.get(index))
		.copied()
		.ok_or_else(|| E::custom(Error::TooManyJunctions(len)))
}

pub(crate) fn x_len(tag: &str) -> Option<usize> {
	X_TAGS.iter().position(|candidate| *candidate == tag).map(|index| index + 1)
}

/// Network scope of an account junction.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum NetworkId {
	Any,
	Named(Vec<u8>),
	Polkadot,
	Kusama,
	ByGenesis([u8; 32]),
	Ethereum { chain_id: u64 },
}

const LEGACY_NETWORK_TAGS: &[&str] = &["Any", "Named", "Polkadot", "Kusama"];
const NETWORK_TAGS: &[&str] = &["ByGenesis", "Polkadot", "Kusama", "Ethereum"];

struct EthereumChain(u64);

impl Serialize for EthereumChain {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("Ethereum", 1)?;
		state.serialize_field("chain_id", &Quantity(self.0.into()))?;
		state.end()
	}
}

impl VersionedCodec for NetworkId {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match version {
			Version::V0 | Version::V1 | Version::V2 => match self {
				NetworkId::Any => serialize_unit_tagged(serializer, "Any"),
				NetworkId::Named(name) => serialize_tagged(serializer, "Named", &HexRef(name)),
				NetworkId::Polkadot => serialize_unit_tagged(serializer, "Polkadot"),
				NetworkId::Kusama => serialize_unit_tagged(serializer, "Kusama"),
				NetworkId::ByGenesis(_) => Err(unsupported("network ByGenesis", version)),
				NetworkId::Ethereum { .. } => Err(unsupported("network Ethereum", version)),
			},
			// optional from v3 on, `Any` is the absent network
			Version::V3 | Version::V4 | Version::V5 => match self {
				NetworkId::Any => serializer.serialize_none(),
				NetworkId::Named(_) => Err(unsupported("network Named", version)),
				NetworkId::Polkadot => serialize_unit_tagged(serializer, "Polkadot"),
				NetworkId::Kusama => serialize_unit_tagged(serializer, "Kusama"),
				NetworkId::ByGenesis(genesis) =>
					serialize_tagged(serializer, "ByGenesis", &HexRef(genesis)),
				NetworkId::Ethereum { chain_id } =>
					serialize_tagged(serializer, "Ethereum", &EthereumChain(*chain_id)),
			},
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		match version {
			Version::V0 | Version::V1 | Version::V2 => deserialize_tagged(version, deserializer),
			Version::V3 | Version::V4 | Version::V5 =>
				deserializer.deserialize_option(OptionalNetwork(version)),
		}
	}
}

struct OptionalNetwork(Version);

impl<'de> Visitor<'de> for OptionalNetwork {
	type Value = NetworkId;

	fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
		f.write_str("an optional network id")
	}

	fn visit_none<E: de::Error>(self) -> Result<NetworkId, E> {
		Ok(NetworkId::Any)
	}

	fn visit_unit<E: de::Error>(self) -> Result<NetworkId, E> {
		Ok(NetworkId::Any)
	}

	fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<NetworkId, D::Error> {
		deserialize_tagged(self.0, deserializer)
	}
}

impl VariantTable for NetworkId {
	const EXPECTING: &'static str = "a network id";

	fn tags(version: Version) -> &'static [&'static str] {
		match version {
			Version::V0 | Version::V1 | Version::V2 => LEGACY_NETWORK_TAGS,
			Version::V3 | Version::V4 | Version::V5 => NETWORK_TAGS,
		}
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Any" => payload.unit().map(|_| NetworkId::Any),
			"Named" => payload.value::<HexBytes>().map(|name| NetworkId::Named(name.0)),
			"Polkadot" => payload.unit().map(|_| NetworkId::Polkadot),
			"Kusama" => payload.unit().map(|_| NetworkId::Kusama),
			"ByGenesis" => payload.value::<HexBytes>()?.into_array().map(NetworkId::ByGenesis),
			"Ethereum" => {
				let mut fields = payload.fields()?;
				let chain_id = fields.take_u64("chain_id")?;
				fields.finish(&["chain_id"])?;
				Ok(NetworkId::Ethereum { chain_id })
			},
			other => Err(Self::unknown(version, other)),
		}
	}
}

/// One segment of a location path.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Junction {
	Parachain(ParaId),
	AccountId32 { network: NetworkId, id: [u8; 32] },
	AccountIndex64 { network: NetworkId, index: u64 },
	AccountKey20 { network: NetworkId, key: [u8; 20] },
	PalletInstance(u8),
	GeneralIndex(u128),
	GeneralKey(Vec<u8>),
	OnlyChild,
}

pub(crate) const JUNCTION_TAGS: &[&str] = &[
	"Parachain",
	"AccountId32",
	"AccountIndex64",
	"AccountKey20",
	"PalletInstance",
	"GeneralIndex",
	"GeneralKey",
	"OnlyChild",
];

impl Junction {
	/// Raw account of an account-by-32-bytes or account-by-20-bytes junction.
	pub fn account_id(&self) -> Option<&[u8]> {
		match self {
			Junction::AccountId32 { id, .. } => Some(id),
			Junction::AccountKey20 { key, .. } => Some(key),
			_ => None,
		}
	}
}

/// Account junction payload: the network scope plus one keyed value.
struct NetworkScoped<'a, T> {
	network: &'a NetworkId,
	version: Version,
	field: &'static str,
	value: T,
}

impl<T: Serialize> Serialize for NetworkScoped<'_, T> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("NetworkScoped", 2)?;
		state.serialize_field("network", &Encoded(self.network, self.version))?;
		state.serialize_field(self.field, &self.value)?;
		state.end()
	}
}

/// Fixed width general key used from v3 on.
struct BoundedGeneralKey<'a>(&'a [u8]);

impl Serialize for BoundedGeneralKey<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let length = self.0.len();
		if length > 32 {
			return Err(ser::Error::custom(format_args!("general key of {length} bytes exceeds 32")))
		}
		let mut data = [0u8; 32];
		data[..length].copy_from_slice(self.0);

		let mut state = serializer.serialize_struct("GeneralKey", 2)?;
		state.serialize_field("length", &(length as u8))?;
		state.serialize_field("data", &HexRef(&data))?;
		state.end()
	}
}

impl VersionedCodec for Junction {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match self {
			Junction::Parachain(para_id) => serialize_tagged(serializer, "Parachain", para_id),
			Junction::AccountId32 { network, id } => serialize_tagged(
				serializer,
				"AccountId32",
				&NetworkScoped { network, version, field: "id", value: HexRef(id) },
			),
			Junction::AccountIndex64 { network, index } => serialize_tagged(
				serializer,
				"AccountIndex64",
				&NetworkScoped { network, version, field: "index", value: Quantity((*index).into()) },
			),
			Junction::AccountKey20 { network, key } => serialize_tagged(
				serializer,
				"AccountKey20",
				&NetworkScoped { network, version, field: "key", value: HexRef(key) },
			),
			Junction::PalletInstance(index) => serialize_tagged(serializer, "PalletInstance", index),
			Junction::GeneralIndex(index) =>
				serialize_tagged(serializer, "GeneralIndex", &Quantity(*index)),
			Junction::GeneralKey(key) => match version {
				Version::V0 | Version::V1 | Version::V2 =>
					serialize_tagged(serializer, "GeneralKey", &HexRef(key)),
				Version::V3 | Version::V4 | Version::V5 =>
					serialize_tagged(serializer, "GeneralKey", &BoundedGeneralKey(key)),
			},
			Junction::OnlyChild => serialize_unit_tagged(serializer, "OnlyChild"),
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserialize_tagged(version, deserializer)
	}
}

impl VariantTable for Junction {
	const EXPECTING: &'static str = "a junction";

	fn tags(_: Version) -> &'static [&'static str] {
		JUNCTION_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Parachain" => payload.value().map(Junction::Parachain),
			"AccountId32" => {
				let mut fields = payload.fields()?;
				let network = fields.take_versioned("network", version)?;
				let id = fields.take_array("id")?;
				fields.finish(&["network", "id"])?;
				Ok(Junction::AccountId32 { network, id })
			},
			"AccountIndex64" => {
				let mut fields = payload.fields()?;
				let network = fields.take_versioned("network", version)?;
				let index = fields.take_u64("index")?;
				fields.finish(&["network", "index"])?;
				Ok(Junction::AccountIndex64 { network, index })
			},
			"AccountKey20" => {
				let mut fields = payload.fields()?;
				let network = fields.take_versioned("network", version)?;
				let key = fields.take_array("key")?;
				fields.finish(&["network", "key"])?;
				Ok(Junction::AccountKey20 { network, key })
			},
			"PalletInstance" => payload.value().map(Junction::PalletInstance),
			"GeneralIndex" => payload.value::<Quantity>().map(|index| Junction::GeneralIndex(index.0)),
			"GeneralKey" => match version {
				Version::V0 | Version::V1 | Version::V2 =>
					payload.value::<HexBytes>().map(|key| Junction::GeneralKey(key.0)),
				Version::V3 | Version::V4 | Version::V5 => {
					let mut fields = payload.fields()?;
					let length: u8 = fields.take("length")?;
					let data: [u8; 32] = fields.take_array("data")?;
					fields.finish(&["length", "data"])?;
					let key = data.get(..length as usize).ok_or_else(|| {
						<A::Error as de::Error>::invalid_value(
							de::Unexpected::Unsigned(length.into()),
							&"a general key length of at most 32",
						)
					})?;
					Ok(Junction::GeneralKey(key.to_vec()))
				},
			},
			"OnlyChild" => payload.unit().map(|_| Junction::OnlyChild),
			other => Err(Self::unknown(version, other)),
		}
	}
}

/// Ordered junction path, at most [`Junctions::MAX_ITEMS`] long on the wire.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Junctions {
	items: Vec<Junction>,
}

const JUNCTIONS_TAGS: &[&str] = &["Here", "X1", "X2", "X3", "X4", "X5", "X6", "X7", "X8"];

impl Junctions {
	pub const MAX_ITEMS: usize = 8;

	pub fn new(items: Vec<Junction>) -> Self {
		Self { items }
	}

	pub fn here() -> Self {
		Self::default()
	}

	pub fn items(&self) -> &[Junction] {
		&self.items
	}

	pub fn into_items(self) -> Vec<Junction> {
		self.items
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	pub fn first(&self) -> Option<&Junction> {
		self.items.first()
	}

	pub fn last(&self) -> Option<&Junction> {
		self.items.last()
	}

	pub fn appending<I: IntoIterator<Item = Junction>>(&self, components: I) -> Self {
		self.items.iter().cloned().chain(components).collect()
	}

	pub fn prepending<I: IntoIterator<Item = Junction>>(&self, components: I) -> Self {
		components.into_iter().chain(self.items.iter().cloned()).collect()
	}

	/// Splits the path at its leaf: everything but the last junction, and the last one.
	pub fn last_component(&self) -> (Junctions, Option<Junction>) {
		match self.items.split_last() {
			Some((last, rest)) => (Junctions::new(rest.to_vec()), Some(last.clone())),
			None => (Junctions::here(), None),
		}
	}
}

impl From<Vec<Junction>> for Junctions {
	fn from(items: Vec<Junction>) -> Self {
		Self::new(items)
	}
}

impl From<Junction> for Junctions {
	fn from(junction: Junction) -> Self {
		Self::new(vec![junction])
	}
}

impl<const N: usize> From<[Junction; N]> for Junctions {
	fn from(items: [Junction; N]) -> Self {
		Self::new(items.into())
	}
}

impl FromIterator<Junction> for Junctions {
	fn from_iter<I: IntoIterator<Item = Junction>>(iter: I) -> Self {
		Self::new(iter.into_iter().collect())
	}
}

impl IntoIterator for Junctions {
	type Item = Junction;
	type IntoIter = std::vec::IntoIter<Junction>;

	fn into_iter(self) -> Self::IntoIter {
		self.items.into_iter()
	}
}

impl VersionedCodec for Junctions {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match self.items.as_slice() {
			[] => serialize_unit_tagged(serializer, "Here"),
			[single] => serialize_tagged(serializer, "X1", &Encoded(single, version)),
			items => {
				let tag = x_tag::<S::Error>(items.len())?;
				match version {
					Version::V0 | Version::V1 | Version::V2 | Version::V3 =>
						serialize_tagged(serializer, tag, &IndexKeyed(items, version)),
					Version::V4 | Version::V5 =>
						serialize_tagged(serializer, tag, &Listed(items, version)),
				}
			},
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserialize_tagged(version, deserializer)
	}
}

impl VariantTable for Junctions {
	const EXPECTING: &'static str = "junctions";

	fn tags(_: Version) -> &'static [&'static str] {
		JUNCTIONS_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Here" => payload.unit().map(|_| Junctions::here()),
			"X1" => payload.versioned::<Junction>(version).map(Junctions::from),
			other => {
				let len = x_len(other).ok_or_else(|| Self::unknown::<A::Error>(version, other))?;
				payload.seed(ItemsSeed::new(version, len)).map(Junctions::new)
			},
		}
	}
}
