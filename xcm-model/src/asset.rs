// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use core::fmt;

use serde::{
	de::{self, SeqAccess, Visitor},
	ser::SerializeStruct,
	Deserializer, Serialize, Serializer,
};

use crate::{
	location::Multilocation,
	variant::{
		deserialize_tagged, serialize_tagged, serialize_unit_tagged, unsupported, Encoded, Fields,
		HexBytes, HexRef, Listed, Payload, Quantity, VariantTable, VersionedCodec,
	},
	Version,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetId {
	Concrete(Multilocation),
	Abstract(Vec<u8>),
}

const ASSET_ID_TAGS: &[&str] = &["Concrete", "Abstract"];

impl VersionedCodec for AssetId {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match version {
			Version::V0 | Version::V1 | Version::V2 | Version::V3 => match self {
				AssetId::Concrete(location) =>
					serialize_tagged(serializer, "Concrete", &Encoded(location, version)),
				AssetId::Abstract(key) => serialize_tagged(serializer, "Abstract", &HexRef(key)),
			},
			// the id is the location itself from v4 on
			Version::V4 | Version::V5 => match self {
				AssetId::Concrete(location) => location.encode_versioned(version, serializer),
				AssetId::Abstract(_) => Err(unsupported("abstract asset id", version)),
			},
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		match version {
			Version::V0 | Version::V1 | Version::V2 | Version::V3 =>
				deserialize_tagged(version, deserializer),
			Version::V4 | Version::V5 =>
				Multilocation::decode_versioned(version, deserializer).map(AssetId::Concrete),
		}
	}
}

impl VariantTable for AssetId {
	const EXPECTING: &'static str = "an asset id";

	fn tags(_: Version) -> &'static [&'static str] {
		ASSET_ID_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Concrete" => payload.versioned(version).map(AssetId::Concrete),
			"Abstract" => payload.value::<HexBytes>().map(|key| AssetId::Abstract(key.0)),
			other => Err(Self::unknown(version, other)),
		}
	}
}

/// Identifies one item of a non-fungible class.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum AssetInstance {
	Undefined,
	Index(u128),
	Array4([u8; 4]),
	Array8([u8; 8]),
	Array16([u8; 16]),
	Array32([u8; 32]),
	/// Dropped in v3.
	Blob(Vec<u8>),
}

const LEGACY_INSTANCE_TAGS: &[&str] =
	&["Undefined", "Index", "Array4", "Array8", "Array16", "Array32", "Blob"];
const INSTANCE_TAGS: &[&str] = &["Undefined", "Index", "Array4", "Array8", "Array16", "Array32"];

impl VersionedCodec for AssetInstance {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match self {
			AssetInstance::Undefined => serialize_unit_tagged(serializer, "Undefined"),
			AssetInstance::Index(index) => serialize_tagged(serializer, "Index", &Quantity(*index)),
			AssetInstance::Array4(data) => serialize_tagged(serializer, "Array4", &HexRef(data)),
			AssetInstance::Array8(data) => serialize_tagged(serializer, "Array8", &HexRef(data)),
			AssetInstance::Array16(data) => serialize_tagged(serializer, "Array16", &HexRef(data)),
			AssetInstance::Array32(data) => serialize_tagged(serializer, "Array32", &HexRef(data)),
			AssetInstance::Blob(data) => match version {
				Version::V0 | Version::V1 | Version::V2 =>
					serialize_tagged(serializer, "Blob", &HexRef(data)),
				Version::V3 | Version::V4 | Version::V5 =>
					Err(unsupported("blob asset instance", version)),
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

impl VariantTable for AssetInstance {
	const EXPECTING: &'static str = "an asset instance";

	fn tags(version: Version) -> &'static [&'static str] {
		match version {
			Version::V0 | Version::V1 | Version::V2 => LEGACY_INSTANCE_TAGS,
			Version::V3 | Version::V4 | Version::V5 => INSTANCE_TAGS,
		}
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Undefined" => payload.unit().map(|_| AssetInstance::Undefined),
			"Index" => payload.value::<Quantity>().map(|index| AssetInstance::Index(index.0)),
			"Array4" => payload.value::<HexBytes>()?.into_array().map(AssetInstance::Array4),
			"Array8" => payload.value::<HexBytes>()?.into_array().map(AssetInstance::Array8),
			"Array16" => payload.value::<HexBytes>()?.into_array().map(AssetInstance::Array16),
			"Array32" => payload.value::<HexBytes>()?.into_array().map(AssetInstance::Array32),
			"Blob" => payload.value::<HexBytes>().map(|blob| AssetInstance::Blob(blob.0)),
			other => Err(Self::unknown(version, other)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Fungibility {
	Fungible(u128),
	NonFungible(AssetInstance),
}

const FUNGIBILITY_TAGS: &[&str] = &["Fungible", "NonFungible"];

impl VersionedCodec for Fungibility {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match self {
			Fungibility::Fungible(amount) => serialize_tagged(serializer, "Fungible", &Quantity(*amount)),
			Fungibility::NonFungible(instance) =>
				serialize_tagged(serializer, "NonFungible", &Encoded(instance, version)),
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserialize_tagged(version, deserializer)
	}
}

impl VariantTable for Fungibility {
	const EXPECTING: &'static str = "a fungibility";

	fn tags(_: Version) -> &'static [&'static str] {
		FUNGIBILITY_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Fungible" => payload.value::<Quantity>().map(|amount| Fungibility::Fungible(amount.0)),
			"NonFungible" => payload.versioned(version).map(Fungibility::NonFungible),
			other => Err(Self::unknown(version, other)),
		}
	}
}

/// A single asset with its amount or instance.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Multiasset {
	pub id: AssetId,
	pub fun: Fungibility,
}

impl Multiasset {
	pub fn new(id: AssetId, fun: Fungibility) -> Self {
		Self { id, fun }
	}

	pub fn fungible(location: Multilocation, amount: u128) -> Self {
		Self::new(AssetId::Concrete(location), Fungibility::Fungible(amount))
	}
}

// v0 folds the id kind and the fungibility into the tag
const V0_MULTIASSET_TAGS: &[&str] =
	&["ConcreteFungible", "AbstractFungible", "ConcreteNonFungible", "AbstractNonFungible"];

struct V0Payload<I, V> {
	id_field: &'static str,
	id: I,
	value_field: &'static str,
	value: V,
}

impl<I: Serialize, V: Serialize> Serialize for V0Payload<I, V> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("Multiasset", 2)?;
		state.serialize_field(self.id_field, &self.id)?;
		state.serialize_field(self.value_field, &self.value)?;
		state.end()
	}
}

impl Multiasset {
	fn encode_v0<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let version = Version::V0;
		match (&self.id, &self.fun) {
			(AssetId::Concrete(location), Fungibility::Fungible(amount)) => serialize_tagged(
				serializer,
				"ConcreteFungible",
				&V0Payload {
					id_field: "id",
					id: Encoded(location, version),
					value_field: "amount",
					value: Quantity(*amount),
				},
			),
			(AssetId::Abstract(key), Fungibility::Fungible(amount)) => serialize_tagged(
				serializer,
				"AbstractFungible",
				&V0Payload {
					id_field: "id",
					id: HexRef(key),
					value_field: "amount",
					value: Quantity(*amount),
				},
			),
			(AssetId::Concrete(location), Fungibility::NonFungible(instance)) => serialize_tagged(
				serializer,
				"ConcreteNonFungible",
				&V0Payload {
					id_field: "class",
					id: Encoded(location, version),
					value_field: "instance",
					value: Encoded(instance, version),
				},
			),
			(AssetId::Abstract(key), Fungibility::NonFungible(instance)) => serialize_tagged(
				serializer,
				"AbstractNonFungible",
				&V0Payload {
					id_field: "class",
					id: HexRef(key),
					value_field: "instance",
					value: Encoded(instance, version),
				},
			),
		}
	}
}

impl VersionedCodec for Multiasset {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match version {
			Version::V0 => self.encode_v0(serializer),
			Version::V1 | Version::V2 | Version::V3 | Version::V4 | Version::V5 => {
				let mut state = serializer.serialize_struct("Multiasset", 2)?;
				state.serialize_field("id", &Encoded(&self.id, version))?;
				state.serialize_field("fun", &Encoded(&self.fun, version))?;
				state.end()
			},
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		match version {
			Version::V0 => deserialize_tagged(version, deserializer),
			Version::V1 | Version::V2 | Version::V3 | Version::V4 | Version::V5 => {
				let mut fields = Fields::decode(deserializer)?;
				let id = fields.take_versioned("id", version)?;
				let fun = fields.take_versioned("fun", version)?;
				fields.finish(&["id", "fun"])?;
				Ok(Multiasset { id, fun })
			},
		}
	}
}

impl VariantTable for Multiasset {
	const EXPECTING: &'static str = "a v0 multiasset";

	fn tags(_: Version) -> &'static [&'static str] {
		V0_MULTIASSET_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		let mut fields = payload.fields()?;
		let asset = match tag {
			"ConcreteFungible" => Multiasset::new(
				AssetId::Concrete(fields.take_versioned("id", version)?),
				Fungibility::Fungible(fields.take_quantity("amount")?),
			),
			"AbstractFungible" => Multiasset::new(
				AssetId::Abstract(fields.take_bytes("id")?),
				Fungibility::Fungible(fields.take_quantity("amount")?),
			),
			"ConcreteNonFungible" => Multiasset::new(
				AssetId::Concrete(fields.take_versioned("class", version)?),
				Fungibility::NonFungible(fields.take_versioned("instance", version)?),
			),
			"AbstractNonFungible" => Multiasset::new(
				AssetId::Abstract(fields.take_bytes("class")?),
				Fungibility::NonFungible(fields.take_versioned("instance", version)?),
			),
			other => return Err(Self::unknown(version, other)),
		};
		match tag {
			"ConcreteFungible" | "AbstractFungible" => fields.finish(&["id", "amount"])?,
			_ => fields.finish(&["class", "instance"])?,
		}
		Ok(asset)
	}
}

/// Fungibility selector of a wildcard, written as its bare ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum WildFungibility {
	Fungible = 0,
	NonFungible = 1,
}

impl Serialize for WildFungibility {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_u8(*self as u8)
	}
}

impl<'de> serde::Deserialize<'de> for WildFungibility {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		struct OrdinalVisitor;

		impl<'de> Visitor<'de> for OrdinalVisitor {
			type Value = WildFungibility;

			fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
				f.write_str("wild fungibility ordinal 0 or 1")
			}

			fn visit_u64<E: de::Error>(self, v: u64) -> Result<WildFungibility, E> {
				match v {
					0 => Ok(WildFungibility::Fungible),
					1 => Ok(WildFungibility::NonFungible),
					other => Err(E::invalid_value(de::Unexpected::Unsigned(other), &self)),
				}
			}
		}

		deserializer.deserialize_u8(OrdinalVisitor)
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum WildMultiasset {
	All,
	AllOf { id: AssetId, fun: WildFungibility },
	AllCounted(u32),
	AllOfCounted { id: AssetId, fun: WildFungibility, count: u32 },
}

const LEGACY_WILD_TAGS: &[&str] = &["All", "AllOf"];
const WILD_TAGS: &[&str] = &["All", "AllOf", "AllCounted", "AllOfCounted"];

struct AllOf<'a> {
	version: Version,
	id: &'a AssetId,
	fun: WildFungibility,
	count: Option<u32>,
}

impl Serialize for AllOf<'_> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		let len = if self.count.is_some() { 3 } else { 2 };
		let mut state = serializer.serialize_struct("AllOf", len)?;
		state.serialize_field("id", &Encoded(self.id, self.version))?;
		state.serialize_field("fun", &self.fun)?;
		if let Some(count) = self.count {
			state.serialize_field("count", &count)?;
		}
		state.end()
	}
}

impl VersionedCodec for WildMultiasset {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		if version == Version::V0 {
			return Err(unsupported("wildcard asset", version))
		}
		let counted = version >= Version::V3;
		match self {
			WildMultiasset::All => serialize_unit_tagged(serializer, "All"),
			WildMultiasset::AllOf { id, fun } => serialize_tagged(
				serializer,
				"AllOf",
				&AllOf { version, id, fun: *fun, count: None },
			),
			WildMultiasset::AllCounted(count) if counted =>
				serialize_tagged(serializer, "AllCounted", count),
			WildMultiasset::AllOfCounted { id, fun, count } if counted => serialize_tagged(
				serializer,
				"AllOfCounted",
				&AllOf { version, id, fun: *fun, count: Some(*count) },
			),
			WildMultiasset::AllCounted(_) | WildMultiasset::AllOfCounted { .. } =>
				Err(unsupported("counted wildcard", version)),
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserialize_tagged(version, deserializer)
	}
}

impl VariantTable for WildMultiasset {
	const EXPECTING: &'static str = "a wildcard asset";

	fn tags(version: Version) -> &'static [&'static str] {
		match version {
			Version::V0 => &[],
			Version::V1 | Version::V2 => LEGACY_WILD_TAGS,
			Version::V3 | Version::V4 | Version::V5 => WILD_TAGS,
		}
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"All" => payload.unit().map(|_| WildMultiasset::All),
			"AllCounted" => payload.value().map(WildMultiasset::AllCounted),
			"AllOf" => {
				let mut fields = payload.fields()?;
				let id = fields.take_versioned("id", version)?;
				let fun = fields.take("fun")?;
				fields.finish(&["id", "fun"])?;
				Ok(WildMultiasset::AllOf { id, fun })
			},
			"AllOfCounted" => {
				let mut fields = payload.fields()?;
				let id = fields.take_versioned("id", version)?;
				let fun = fields.take("fun")?;
				let count = fields.take("count")?;
				fields.finish(&["id", "fun", "count"])?;
				Ok(WildMultiasset::AllOfCounted { id, fun, count })
			},
			other => Err(Self::unknown(version, other)),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum MultiassetFilter {
	Definite(Vec<Multiasset>),
	Wild(WildMultiasset),
}

const FILTER_TAGS: &[&str] = &["Definite", "Wild"];

impl MultiassetFilter {
	/// Upper bound on the assets the filter selects, as carried by v2 instructions.
	pub fn count(&self) -> u32 {
		match self {
			MultiassetFilter::Definite(assets) => u32::try_from(assets.len()).unwrap_or(u32::MAX),
			MultiassetFilter::Wild(WildMultiasset::AllCounted(count)) |
			MultiassetFilter::Wild(WildMultiasset::AllOfCounted { count, .. }) => *count,
			MultiassetFilter::Wild(_) => 1,
		}
	}
}

impl VersionedCodec for MultiassetFilter {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		if version == Version::V0 {
			return Err(unsupported("asset filter", version))
		}
		match self {
			MultiassetFilter::Definite(assets) =>
				serialize_tagged(serializer, "Definite", &Listed(assets, version)),
			MultiassetFilter::Wild(wild) => serialize_tagged(serializer, "Wild", &Encoded(wild, version)),
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserialize_tagged(version, deserializer)
	}
}

impl VariantTable for MultiassetFilter {
	const EXPECTING: &'static str = "an asset filter";

	fn tags(version: Version) -> &'static [&'static str] {
		match version {
			Version::V0 => &[],
			Version::V1 | Version::V2 | Version::V3 | Version::V4 | Version::V5 => FILTER_TAGS,
		}
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Definite" => payload.versioned(version).map(MultiassetFilter::Definite),
			"Wild" => payload.versioned(version).map(MultiassetFilter::Wild),
			other => Err(Self::unknown(version, other)),
		}
	}
}

/// An asset together with the location of the chain that holds it.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct LocatableAsset {
	pub location: Multilocation,
	pub asset_id: AssetId,
}

impl VersionedCodec for LocatableAsset {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		let mut state = serializer.serialize_struct("LocatableAsset", 2)?;
		state.serialize_field("location", &Encoded(&self.location, version))?;
		state.serialize_field("asset_id", &Encoded(&self.asset_id, version))?;
		state.end()
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		let mut fields = Fields::decode(deserializer)?;
		let location = fields.take_versioned("location", version)?;
		let asset_id = fields.take_versioned("asset_id", version)?;
		fields.finish(&["location", "asset_id"])?;
		Ok(LocatableAsset { location, asset_id })
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::*;
	use crate::{
		mock::{usdt_location, ALICE, ASSET_HUB},
		variant::{from_value, to_value},
		Junction, NetworkId,
	};

	fn usdt() -> Multiasset {
		Multiasset::fungible(usdt_location(), 1_000_000)
	}

	#[test]
	fn asset_id_is_bare_location_from_v4() {
		let id = AssetId::Concrete(Multilocation::parent());
		assert_eq!(
			to_value(&id, Version::V3).unwrap(),
			json!(["Concrete", {"parents": 1, "interior": ["Here", null]}])
		);
		assert_eq!(to_value(&id, Version::V4).unwrap(), json!({"parents": 1, "interior": ["Here", null]}));
		assert_eq!(from_value::<AssetId>(&to_value(&id, Version::V5).unwrap(), Version::V5).unwrap(), id);

		let err = to_value(&AssetId::Abstract(b"DOT".to_vec()), Version::V4).unwrap_err();
		assert!(err.to_string().contains("abstract asset id is not representable in xcm V4"), "{err}");
	}

	#[test]
	fn multiasset_keyed_shape_from_v1() {
		assert_eq!(
			to_value(&Multiasset::fungible(Multilocation::here(), 10), Version::V2).unwrap(),
			json!({
				"id": ["Concrete", {"parents": 0, "interior": ["Here", null]}],
				"fun": ["Fungible", "10"],
			})
		);
	}

	#[test]
	fn multiasset_legacy_union_in_v0() {
		let value = to_value(&Multiasset::fungible(Multilocation::parent(), 5), Version::V0).unwrap();
		assert_eq!(value, json!(["ConcreteFungible", {"id": ["X1", ["Parent", null]], "amount": "5"}]));

		let nft = Multiasset::new(
			AssetId::Abstract(b"kitties".to_vec()),
			Fungibility::NonFungible(AssetInstance::Index(7)),
		);
		let value = to_value(&nft, Version::V0).unwrap();
		assert_eq!(
			value,
			json!(["AbstractNonFungible", {"class": "0x6b697474696573", "instance": ["Index", "7"]}])
		);
		assert_eq!(from_value::<Multiasset>(&value, Version::V0).unwrap(), nft);
	}

	#[test]
	fn assets_round_trip_in_every_version() {
		let parachain = AssetId::Concrete(Multilocation::new(0, Junction::Parachain(ASSET_HUB)));
		let kusama_account = AssetId::Concrete(Multilocation::new(
			1,
			Junction::AccountId32 { network: NetworkId::Kusama, id: ALICE },
		));
		let nft = |instance| Multiasset::new(parachain.clone(), Fungibility::NonFungible(instance));

		let mut assets = vec![
			usdt(),
			Multiasset::new(kusama_account, Fungibility::Fungible(u128::MAX)),
			nft(AssetInstance::Undefined),
			nft(AssetInstance::Index(u128::MAX)),
			nft(AssetInstance::Array4([1, 2, 3, 4])),
			nft(AssetInstance::Array8([8; 8])),
			nft(AssetInstance::Array16([16; 16])),
			nft(AssetInstance::Array32([32; 32])),
		];
		for version in Version::ALL {
			if version <= Version::V3 {
				assets.push(Multiasset::new(AssetId::Abstract(b"KSM".to_vec()), Fungibility::Fungible(7)));
			}
			if version <= Version::V2 {
				assets.push(nft(AssetInstance::Blob(b"kitty".to_vec())));
			}
			for asset in &assets {
				let value = to_value(asset, version).unwrap();
				assert_eq!(&from_value::<Multiasset>(&value, version).unwrap(), asset, "{version} {value}");
			}
			assets.truncate(8);
		}
	}

	#[test]
	fn wild_fungibility_is_bare_ordinal() {
		let wild = WildMultiasset::AllOf { id: usdt().id, fun: WildFungibility::NonFungible };
		let value = to_value(&wild, Version::V3).unwrap();
		assert_eq!(value[0], json!("AllOf"));
		assert_eq!(value[1]["fun"], json!(1));
		assert_eq!(from_value::<WildMultiasset>(&value, Version::V3).unwrap(), wild);

		let mut bad = value;
		bad[1]["fun"] = json!(2);
		assert!(from_value::<WildMultiasset>(&bad, Version::V3).is_err());
	}

	#[test]
	fn counted_wildcards_need_v3() {
		let counted = WildMultiasset::AllCounted(1);
		assert_eq!(to_value(&counted, Version::V3).unwrap(), json!(["AllCounted", 1]));
		assert!(to_value(&counted, Version::V2).is_err());

		let err = from_value::<WildMultiasset>(&json!(["AllCounted", 1]), Version::V2).unwrap_err();
		assert!(err.to_string().contains("unknown variant `AllCounted`"), "{err}");

		let counted_of =
			WildMultiasset::AllOfCounted { id: usdt().id, fun: WildFungibility::Fungible, count: 2 };
		let value = to_value(&counted_of, Version::V4).unwrap();
		assert_eq!(value[1]["count"], json!(2));
		assert_eq!(from_value::<WildMultiasset>(&value, Version::V4).unwrap(), counted_of);
	}

	#[test]
	fn filters_round_trip() {
		let filters = [
			MultiassetFilter::Definite(vec![usdt()]),
			MultiassetFilter::Wild(WildMultiasset::All),
		];
		for version in [Version::V1, Version::V2, Version::V3, Version::V4, Version::V5] {
			for filter in &filters {
				let value = to_value(filter, version).unwrap();
				assert_eq!(&from_value::<MultiassetFilter>(&value, version).unwrap(), filter, "{version}");
			}
		}
		assert!(to_value(&filters[1], Version::V0).is_err());
	}

	#[test]
	fn filter_count_bounds_selected_assets() {
		assert_eq!(MultiassetFilter::Definite(vec![usdt(), usdt()]).count(), 2);
		assert_eq!(MultiassetFilter::Wild(WildMultiasset::AllCounted(3)).count(), 3);
		assert_eq!(MultiassetFilter::Wild(WildMultiasset::All).count(), 1);
	}

	#[test]
	fn blob_instance_dropped_in_v3() {
		let instance = AssetInstance::Blob(vec![1]);
		assert!(to_value(&instance, Version::V2).is_ok());
		assert!(to_value(&instance, Version::V3).is_err());
	}

	#[test]
	fn locatable_asset_is_keyed() {
		let asset = LocatableAsset {
			location: Multilocation::new(1, Junction::Parachain(ASSET_HUB)),
			asset_id: usdt().id,
		};
		let value = to_value(&asset, Version::V4).unwrap();
		assert_eq!(value["location"], json!({"parents": 1, "interior": ["X1", ["Parachain", 1000]]}));
		assert_eq!(from_value::<LocatableAsset>(&value, Version::V4).unwrap(), asset);
	}
}
