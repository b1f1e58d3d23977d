// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use serde::{de, Deserialize, Deserializer, Serializer};
use xtransfer_traits::ParaId;

use crate::{
	asset::AssetId,
	junction::{Junction, Junctions, NetworkId},
	location::Multilocation,
	variant::{Quantity, VersionedCodec},
	versioned::versioned_envelope,
	Error, Version,
};

/// Parachain ids below this one belong to system chains.
pub const FIRST_PUBLIC_PARA_ID: ParaId = 2000;

/// Whether the chain is the relay chain (`None`) or one of its system parachains.
pub fn is_relay_or_system_parachain(para_id: Option<ParaId>) -> bool {
	para_id.map_or(true, |para_id| para_id < FIRST_PUBLIC_PARA_ID)
}

/// Position of a chain or account measured from the network root.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct AbsoluteLocation {
	junctions: Junctions,
}

impl AbsoluteLocation {
	/// The relay chain when `para_id` is absent, otherwise the parachain under it.
	pub fn new(para_id: Option<ParaId>) -> Self {
		match para_id {
			Some(para_id) => Self { junctions: Junction::Parachain(para_id).into() },
			None => Self::root(),
		}
	}

	pub fn root() -> Self {
		Self::default()
	}

	pub fn from_junctions(junctions: impl Into<Junctions>) -> Result<Self, Error> {
		let junctions = junctions.into();
		if junctions.len() > Junctions::MAX_ITEMS {
			return Err(Error::TooManyJunctions(junctions.len()))
		}
		Ok(Self { junctions })
	}

	pub fn junctions(&self) -> &Junctions {
		&self.junctions
	}

	pub fn appending<I: IntoIterator<Item = Junction>>(&self, components: I) -> Result<Self, Error> {
		Self::from_junctions(self.junctions.appending(components))
	}

	/// Appends an account junction: 20 byte keys for Ethereum based chains, 32 byte ids otherwise.
	pub fn appending_account_id(
		&self,
		account_id: &[u8],
		is_ethereum_base: bool,
	) -> Result<Self, Error> {
		let invalid = |expected| Error::InvalidAccountLength { expected, actual: account_id.len() };
		let junction = if is_ethereum_base {
			let key: [u8; 20] = account_id.try_into().map_err(|_| invalid(20))?;
			Junction::AccountKey20 { network: NetworkId::Any, key }
		} else {
			let id: [u8; 32] = account_id.try_into().map_err(|_| invalid(32))?;
			Junction::AccountId32 { network: NetworkId::Any, id }
		};
		self.appending([junction])
	}

	/// How an observer located at `observer` addresses `self`.
	///
	/// The common prefix of both paths is the closest shared ancestor: the observer climbs one
	/// hop per junction it has below the ancestor, then descends along the rest of `self`.
	pub fn from_point_of_view(&self, observer: &AbsoluteLocation) -> Multilocation {
		let common = self
			.junctions
			.items()
			.iter()
			.zip(observer.junctions.items())
			.take_while(|(target, observer)| target == observer)
			.count();

		// both paths hold at most MAX_ITEMS junctions
		let parents = (observer.junctions.len() - common) as u8;
		let interior: Junctions = self.junctions.items()[common..].iter().cloned().collect();
		Multilocation::new(parents, interior)
	}

	/// The location as seen from the network root.
	pub fn to_multilocation(&self) -> Multilocation {
		Multilocation::new(0, self.junctions.clone())
	}

	pub fn to_asset_id(&self) -> AssetId {
		self.to_multilocation().to_asset_id()
	}

	pub fn with_version(self, version: Version) -> VersionedAbsoluteLocation {
		VersionedAbsoluteLocation::versioned(self, version)
	}

	/// Builds an asset location from its reserve path descriptor, read as an absolute path.
	pub fn from_reserve_path(path: &ReservePath) -> Result<Self, Error> {
		Self::from_junctions(path.absolute_junctions()?)
	}

	pub fn is_relay_chain(&self) -> bool {
		self.junctions.is_empty()
	}

	/// The parachain id when `self` is exactly a parachain.
	pub fn para_id(&self) -> Option<ParaId> {
		match self.junctions.items() {
			[Junction::Parachain(para_id)] => Some(*para_id),
			_ => None,
		}
	}

	/// Chain locations only: the relay chain or a system parachain directly under it.
	pub fn is_relay_or_system_parachain(&self) -> bool {
		self.is_relay_chain() ||
			self.para_id().map_or(false, |para_id| is_relay_or_system_parachain(Some(para_id)))
	}
}

/// How a [`ReservePath`] is anchored.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ReserveLocationType {
	/// Rooted at the relay chain, climbed to from the origin.
	#[default]
	Absolute,
	/// Relative to the reserve chain, collapsed when the origin is the reserve.
	Relative,
	/// Carries its own `parents`.
	Concrete,
}

/// Asset reserve path as found in chain registries.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReservePath {
	pub parents: Option<u8>,
	pub parachain_id: Option<ParaId>,
	pub pallet_instance: Option<u8>,
	/// Hex, with or without `0x`.
	pub general_key: Option<String>,
	/// Decimal string or number.
	pub general_index: Option<Quantity>,
}

impl ReservePath {
	/// Asset location as addressed from `origin` for an asset held on `reserve`.
	///
	/// Junction order is chain index, pallet instance, then general key or general index, the
	/// key taking precedence when both are present. The chain index is dropped for relative
	/// paths read on the reserve itself.
	pub fn to_multilocation(
		&self,
		location_type: ReserveLocationType,
		origin: &AbsoluteLocation,
		reserve: &AbsoluteLocation,
	) -> Result<Multilocation, Error> {
		let on_reserve = origin == reserve;
		let (parents, junctions) = match location_type {
			ReserveLocationType::Absolute =>
				(u8::from(!origin.is_relay_chain()), self.absolute_junctions()?),
			ReserveLocationType::Relative if on_reserve => (0, self.relative_junctions()?),
			ReserveLocationType::Relative =>
				(u8::from(!origin.is_relay_chain()), self.absolute_junctions()?),
			ReserveLocationType::Concrete =>
				(self.parents.unwrap_or_default(), self.absolute_junctions()?),
		};
		if junctions.len() > Junctions::MAX_ITEMS {
			return Err(Error::TooManyJunctions(junctions.len()))
		}
		Ok(Multilocation::new(parents, junctions))
	}

	fn relative_junctions(&self) -> Result<Vec<Junction>, Error> {
		let mut junctions = Vec::new();
		if let Some(pallet) = self.pallet_instance {
			junctions.push(Junction::PalletInstance(pallet));
		}
		if let Some(key) = &self.general_key {
			let digits = key.strip_prefix("0x").unwrap_or(key);
			let key = hex::decode(digits)
				.map_err(|e| Error::InvalidReservePath(format!("general key `{key}`: {e}")))?;
			junctions.push(Junction::GeneralKey(key));
		} else if let Some(index) = self.general_index {
			junctions.push(Junction::GeneralIndex(index.0));
		}
		Ok(junctions)
	}

	fn absolute_junctions(&self) -> Result<Vec<Junction>, Error> {
		let mut junctions = self.relative_junctions()?;
		if let Some(para_id) = self.parachain_id {
			junctions.insert(0, Junction::Parachain(para_id));
		}
		Ok(junctions)
	}
}

impl VersionedCodec for AbsoluteLocation {
	fn encode_versioned<S: Serializer>(
		&self,
		version: Version,
		serializer: S,
	) -> Result<S::Ok, S::Error> {
		self.to_multilocation().encode_versioned(version, serializer)
	}

	fn decode_versioned<'de, D: Deserializer<'de>>(
		version: Version,
		deserializer: D,
	) -> Result<Self, D::Error> {
		let location = Multilocation::decode_versioned(version, deserializer)?;
		if location.parents != 0 {
			return Err(de::Error::invalid_value(
				de::Unexpected::Unsigned(location.parents.into()),
				&"an absolute location without parents",
			))
		}
		Self::from_junctions(location.interior).map_err(de::Error::custom)
	}
}

versioned_envelope! {
	/// An absolute location pinned to a protocol generation.
	pub enum VersionedAbsoluteLocation(AbsoluteLocation) { V0, V1, V2, V3, V4, V5 }
}

impl VersionedAbsoluteLocation {
	pub fn versioned(location: AbsoluteLocation, version: Version) -> Self {
		match version {
			Version::V0 => Self::V0(location),
			Version::V1 => Self::V1(location),
			Version::V2 => Self::V2(location),
			Version::V3 => Self::V3(location),
			Version::V4 => Self::V4(location),
			Version::V5 => Self::V5(location),
		}
	}

	/// Relative address of `self` seen from `observer`, both written for the same version.
	pub fn from_point_of_view(
		&self,
		observer: &VersionedAbsoluteLocation,
	) -> Result<crate::VersionedMultilocation, Error> {
		let (expected, actual) = (self.version(), observer.version());
		if expected != actual {
			return Err(Error::VersionMismatch { expected, actual })
		}
		let relative = self.inner().from_point_of_view(observer.inner());
		Ok(crate::VersionedMultilocation::versioned(relative, expected))
	}
}
