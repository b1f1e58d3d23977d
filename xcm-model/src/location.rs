// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use serde::{
	de::{self, SeqAccess},
	ser::SerializeStruct,
	Deserializer, Serializer,
};

use crate::{
	asset::AssetId,
	junction::{x_len, x_tag, Junction, Junctions, JUNCTION_TAGS},
	variant::{
		deserialize_tagged, serialize_tagged, serialize_unit_tagged, Encoded, Fields, IndexKeyed,
		ItemsSeed, Payload, VariantTable, VersionedCodec,
	},
	Version,
};

/// Relative address: a number of parent hops followed by an interior path.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct Multilocation {
	pub parents: u8,
	pub interior: Junctions,
}

impl Multilocation {
	pub fn new(parents: u8, interior: impl Into<Junctions>) -> Self {
		Self { parents, interior: interior.into() }
	}

	pub fn here() -> Self {
		Self::default()
	}

	pub fn parent() -> Self {
		Self::new(1, Junctions::here())
	}

	pub fn is_here(&self) -> bool {
		self.parents == 0 && self.interior.is_empty()
	}

	/// Account of the interior's leaf junction, if the leaf is an account junction.
	pub fn account_id(&self) -> Option<&[u8]> {
		self.interior.last().and_then(Junction::account_id)
	}

	pub fn appending<I: IntoIterator<Item = Junction>>(&self, components: I) -> Self {
		Self { parents: self.parents, interior: self.interior.appending(components) }
	}

	pub fn to_asset_id(&self) -> AssetId {
		AssetId::Concrete(self.clone())
	}
}

impl VersionedCodec for Multilocation {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match version {
			Version::V0 => encode_v0(self, serializer),
			Version::V1 | Version::V2 | Version::V3 | Version::V4 | Version::V5 => {
				let mut state = serializer.serialize_struct("Multilocation", 2)?;
				state.serialize_field("parents", &self.parents)?;
				state.serialize_field("interior", &Encoded(&self.interior, version))?;
				state.end()
			},
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		match version {
			Version::V0 =>
				deserialize_tagged(version, deserializer).map(|V0Location(location)| location),
			Version::V1 | Version::V2 | Version::V3 | Version::V4 | Version::V5 => {
				let mut fields = Fields::decode(deserializer)?;
				let parents = fields.take("parents")?;
				let interior = fields.take_versioned("interior", version)?;
				fields.finish(&["parents", "interior"])?;
				Ok(Multilocation { parents, interior })
			},
		}
	}
}

// V0 has no parent count: parent hops are leading `Parent` junctions.
#[derive(Debug, Clone, PartialEq, Eq)]
enum V0Junction {
	Parent,
	Interior(Junction),
}

const V0_JUNCTION_TAGS: &[&str] = &[
	"Parent",
	"Parachain",
	"AccountId32",
	"AccountIndex64",
	"AccountKey20",
	"PalletInstance",
	"GeneralIndex",
	"GeneralKey",
	"OnlyChild",
];

const V0_LOCATION_TAGS: &[&str] = &["Null", "X1", "X2", "X3", "X4", "X5", "X6", "X7", "X8"];

impl VersionedCodec for V0Junction {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		match self {
			V0Junction::Parent => serialize_unit_tagged(serializer, "Parent"),
			V0Junction::Interior(junction) => junction.encode_versioned(version, serializer),
		}
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		deserialize_tagged(version, deserializer)
	}
}

impl VariantTable for V0Junction {
	const EXPECTING: &'static str = "a v0 junction";

	fn tags(_: Version) -> &'static [&'static str] {
		V0_JUNCTION_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Parent" => payload.unit().map(|_| V0Junction::Parent),
			other if JUNCTION_TAGS.contains(&other) =>
				Junction::decode_variant(version, other, payload).map(V0Junction::Interior),
			other => Err(Self::unknown(version, other)),
		}
	}
}

fn encode_v0<S: Serializer>(location: &Multilocation, serializer: S) -> Result<S::Ok, S::Error> {
	let items: Vec<V0Junction> = (0..location.parents)
		.map(|_| V0Junction::Parent)
		.chain(location.interior.items().iter().cloned().map(V0Junction::Interior))
		.collect();

	match items.as_slice() {
		[] => serialize_unit_tagged(serializer, "Null"),
		[single] => serialize_tagged(serializer, "X1", &Encoded(single, Version::V0)),
		items => {
			let tag = x_tag::<S::Error>(items.len())?;
			serialize_tagged(serializer, tag, &IndexKeyed(items, Version::V0))
		},
	}
}

struct V0Location(Multilocation);

impl V0Location {
	fn from_items<E: de::Error>(items: Vec<V0Junction>) -> Result<Self, E> {
		let mut parents = 0u8;
		let mut interior = Vec::with_capacity(items.len());
		for item in items {
			match item {
				V0Junction::Parent if interior.is_empty() => parents += 1,
				V0Junction::Parent =>
					return Err(E::custom("`Parent` junction after an interior junction")),
				V0Junction::Interior(junction) => interior.push(junction),
			}
		}
		Ok(V0Location(Multilocation::new(parents, interior)))
	}
}

impl VariantTable for V0Location {
	const EXPECTING: &'static str = "a v0 multilocation";

	fn tags(_: Version) -> &'static [&'static str] {
		V0_LOCATION_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Null" => payload.unit().map(|_| V0Location(Multilocation::here())),
			"X1" => V0Location::from_items(vec![payload.versioned(version)?]),
			other => {
				let len = x_len(other).ok_or_else(|| Self::unknown::<A::Error>(version, other))?;
				V0Location::from_items(payload.seed(ItemsSeed::new(version, len))?)
			},
		}
	}
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::*;
	use crate::{
		mock::{ALICE, ASSET_HUB, BALTATHAR, MOONBEAM},
		variant::{from_value, to_value},
		NetworkId,
	};

	fn parachain_account() -> Multilocation {
		Multilocation::new(
			1,
			[
				Junction::Parachain(MOONBEAM),
				Junction::AccountKey20 { network: NetworkId::Any, key: BALTATHAR },
			],
		)
	}

	#[test]
	fn keyed_shape_from_v1() {
		let location = Multilocation::new(1, Junction::Parachain(ASSET_HUB));
		for version in [Version::V1, Version::V2, Version::V3, Version::V4, Version::V5] {
			assert_eq!(
				to_value(&location, version).unwrap(),
				json!({"parents": 1, "interior": ["X1", ["Parachain", 1000]]}),
				"{version}"
			);
		}
		assert_eq!(
			to_value(&Multilocation::here(), Version::V3).unwrap(),
			json!({"parents": 0, "interior": ["Here", null]})
		);
	}

	#[test]
	fn v0_folds_parents_into_junctions() {
		assert_eq!(to_value(&Multilocation::here(), Version::V0).unwrap(), json!(["Null", null]));
		assert_eq!(to_value(&Multilocation::parent(), Version::V0).unwrap(), json!(["X1", ["Parent", null]]));

		let location = Multilocation::new(1, Junction::Parachain(ASSET_HUB));
		assert_eq!(
			to_value(&location, Version::V0).unwrap(),
			json!(["X2", {"0": ["Parent", null], "1": ["Parachain", 1000]}])
		);
	}

	#[test]
	fn round_trips_in_every_version() {
		let locations = [
			Multilocation::here(),
			Multilocation::parent(),
			Multilocation::new(0, Junction::Parachain(ASSET_HUB)),
			parachain_account(),
		];
		for version in Version::ALL {
			for location in &locations {
				let value = to_value(location, version).unwrap();
				assert_eq!(&from_value::<Multilocation>(&value, version).unwrap(), location, "{version}");
			}
		}
	}

	#[test]
	fn v0_rejects_parent_after_interior() {
		let value = json!(["X2", {"0": ["Parachain", 1000], "1": ["Parent", null]}]);
		assert!(from_value::<Multilocation>(&value, Version::V0).is_err());
	}

	#[test]
	fn v0_counts_parents_against_junction_limit() {
		let location = Multilocation::new(2, (0..7).map(Junction::GeneralIndex).collect::<Junctions>());
		assert!(to_value(&location, Version::V0).is_err());
		assert!(to_value(&location, Version::V1).is_ok());
	}

	#[test]
	fn keyed_shape_rejects_unknown_fields() {
		let value = json!({"parents": 0, "interior": ["Here", null], "extra": 1});
		let err = from_value::<Multilocation>(&value, Version::V3).unwrap_err();
		assert!(err.to_string().contains("unknown field `extra`"), "{err}");
	}

	#[test]
	fn account_id_reads_leaf_only() {
		assert_eq!(parachain_account().account_id(), Some(&BALTATHAR[..]));

		let nested = Multilocation::new(
			0,
			[Junction::AccountId32 { network: NetworkId::Any, id: ALICE }, Junction::PalletInstance(3)],
		);
		assert_eq!(nested.account_id(), None);
		assert_eq!(Multilocation::here().account_id(), None);
	}

	#[test]
	fn to_asset_id_is_concrete() {
		let location = Multilocation::new(0, [Junction::PalletInstance(50), Junction::GeneralIndex(1984)]);
		assert_eq!(location.to_asset_id(), AssetId::Concrete(location.clone()));
	}
}
