// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

//! Version tagged envelopes. Each case holds the version independent value, the case
//! itself decides which generation's shape the value is written in.

use crate::{
	asset::{LocatableAsset, Multiasset},
	location::Multilocation,
	Version,
};

/// Declares an envelope over `$inner` with one case per listed version.
///
/// The envelope writes `[raw version name, payload]` and refuses any version name outside
/// its own cases when decoding.
macro_rules! versioned_envelope {
	(
		$(#[$attr:meta])*
		pub enum $name:ident($inner:ty) { $($case:ident),+ $(,)? }
	) => {
		$(#[$attr])*
		#[derive(Debug, Clone, PartialEq, Eq)]
		pub enum $name {
			$($case($inner),)+
		}

		impl $name {
			const TAGS: &'static [&'static str] = &[$(stringify!($case)),+];

			pub fn new(value: $inner, version: $crate::Version) -> Result<Self, $crate::Error> {
				match version {
					$($crate::Version::$case => Ok(Self::$case(value)),)+
					#[allow(unreachable_patterns)]
					other => Err($crate::Error::UnsupportedInVersion {
						what: stringify!($name),
						version: other,
					}),
				}
			}

			pub fn version(&self) -> $crate::Version {
				match self {
					$(Self::$case(_) => $crate::Version::$case,)+
				}
			}

			pub fn inner(&self) -> &$inner {
				match self {
					$(Self::$case(inner) => inner,)+
				}
			}

			pub fn into_inner(self) -> $inner {
				match self {
					$(Self::$case(inner) => inner,)+
				}
			}
		}

		impl ::serde::Serialize for $name {
			fn serialize<S: ::serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
				let version = self.version();
				$crate::variant::serialize_tagged(
					serializer,
					version.raw_name(),
					&$crate::variant::Encoded(self.inner(), version),
				)
			}
		}

		impl $crate::variant::VariantTable for $name {
			const EXPECTING: &'static str = stringify!($name);

			fn tags(_: $crate::Version) -> &'static [&'static str] {
				Self::TAGS
			}

			fn decode_variant<'de, A: ::serde::de::SeqAccess<'de>>(
				version: $crate::Version,
				tag: &str,
				payload: $crate::variant::Payload<'_, A>,
			) -> Result<Self, A::Error> {
				let case = $crate::Version::from_raw_name(tag)
					.ok_or_else(|| {
						<Self as $crate::variant::VariantTable>::unknown::<A::Error>(version, tag)
					})?;
				let value = payload.versioned(case)?;
				Self::new(value, case).map_err(::serde::de::Error::custom)
			}
		}

		impl<'de> ::serde::Deserialize<'de> for $name {
			fn deserialize<D: ::serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
				// the envelope tag carries the version, the seed version is never consulted
				$crate::variant::deserialize_tagged($crate::Version::V0, deserializer)
			}
		}
	};
}

pub(crate) use versioned_envelope;

versioned_envelope! {
	/// A relative location in the shape of a specific protocol generation.
	pub enum VersionedMultilocation(Multilocation) { V0, V1, V2, V3, V4, V5 }
}

impl VersionedMultilocation {
	/// Every version can carry a location, so this never fails.
	pub fn versioned(location: Multilocation, version: Version) -> Self {
		match version {
			Version::V0 => Self::V0(location),
			Version::V1 => Self::V1(location),
			Version::V2 => Self::V2(location),
			Version::V3 => Self::V3(location),
			Version::V4 => Self::V4(location),
			Version::V5 => Self::V5(location),
		}
	}
}

versioned_envelope! {
	pub enum VersionedMultiassets(Vec<Multiasset>) { V0, V1, V2, V3, V4, V5 }
}

versioned_envelope! {
	/// Asset plus the location of its holding chain, defined by runtimes from v3 on.
	pub enum VersionedLocatableAsset(LocatableAsset) { V3, V4, V5 }
}

#[cfg(test)]
mod test {
	use serde_json::json;

	use super::*;
	use crate::{
		asset::AssetId,
		mock::{usdt_location, ASSET_HUB},
		Junction,
	};

	#[test]
	fn envelope_tag_follows_case() {
		let location = Multilocation::new(1, Junction::Parachain(ASSET_HUB));
		for version in Version::ALL {
			let versioned = VersionedMultilocation::versioned(location.clone(), version);
			assert_eq!(versioned.version(), version);

			let value = serde_json::to_value(&versioned).unwrap();
			assert_eq!(value[0], json!(version.raw_name()));
			assert_eq!(serde_json::from_value::<VersionedMultilocation>(value).unwrap(), versioned);
		}
	}

	#[test]
	fn payload_uses_case_shape() {
		let versioned = VersionedMultilocation::V3(Multilocation::parent());
		assert_eq!(
			serde_json::to_value(&versioned).unwrap(),
			json!(["V3", {"parents": 1, "interior": ["Here", null]}])
		);
		let legacy = VersionedMultilocation::V0(Multilocation::parent());
		assert_eq!(serde_json::to_value(&legacy).unwrap(), json!(["V0", ["X1", ["Parent", null]]]));
	}

	#[test]
	fn unknown_version_tag_is_rejected() {
		let err = serde_json::from_value::<VersionedMultilocation>(json!(["V6", {}])).unwrap_err();
		assert!(err.to_string().contains("unknown variant `V6`"), "{err}");

		let err = serde_json::from_value::<VersionedLocatableAsset>(json!(["V2", {}])).unwrap_err();
		assert!(err.to_string().contains("unknown variant `V2`"), "{err}");
	}

	#[test]
	fn new_rejects_versions_without_a_case() {
		let asset = LocatableAsset {
			location: Multilocation::new(1, Junction::Parachain(ASSET_HUB)),
			asset_id: AssetId::Concrete(usdt_location()),
		};
		assert!(matches!(
			VersionedLocatableAsset::new(asset.clone(), Version::V2),
			Err(crate::Error::UnsupportedInVersion { version: Version::V2, .. })
		));

		let versioned = VersionedLocatableAsset::new(asset.clone(), Version::V4).unwrap();
		assert_eq!(versioned.version(), Version::V4);
		assert_eq!(versioned.into_inner(), asset);
	}

	#[test]
	fn multiassets_round_trip() {
		let assets = VersionedMultiassets::V1(vec![
			Multiasset::fungible(usdt_location(), 10),
			Multiasset::fungible(Multilocation::parent(), 20),
		]);
		let value = serde_json::to_value(&assets).unwrap();
		assert_eq!(value[1][0]["fun"], json!(["Fungible", "10"]));
		assert_eq!(serde_json::from_value::<VersionedMultiassets>(value).unwrap(), assets);
	}
}
