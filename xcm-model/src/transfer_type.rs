// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use serde::{
	de::{DeserializeOwned, SeqAccess},
	Deserialize, Deserializer, Serialize, Serializer,
};

use crate::{
	absolute::AbsoluteLocation,
	location::Multilocation,
	variant::{deserialize_tagged, serialize_tagged, serialize_unit_tagged, Payload, VariantTable},
	versioned::VersionedMultilocation,
	Version, LOG_TARGET,
};

/// Route an asset takes between two chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TransferType<L> {
	/// Burned on origin, minted on destination.
	Teleport,
	/// The origin holds the reserve.
	LocalReserve,
	/// The destination holds the reserve.
	DestinationReserve,
	/// A third chain holds the reserve.
	RemoteReserve(L),
}

const TRANSFER_TYPE_TAGS: &[&str] = &["Teleport", "LocalReserve", "DestinationReserve", "RemoteReserve"];

impl<L> TransferType<L> {
	pub fn map<M, F: FnOnce(L) -> M>(self, f: F) -> TransferType<M> {
		match self {
			TransferType::Teleport => TransferType::Teleport,
			TransferType::LocalReserve => TransferType::LocalReserve,
			TransferType::DestinationReserve => TransferType::DestinationReserve,
			TransferType::RemoteReserve(location) => TransferType::RemoteReserve(f(location)),
		}
	}

	pub fn try_map<M, E, F: FnOnce(L) -> Result<M, E>>(self, f: F) -> Result<TransferType<M>, E> {
		Ok(match self {
			TransferType::Teleport => TransferType::Teleport,
			TransferType::LocalReserve => TransferType::LocalReserve,
			TransferType::DestinationReserve => TransferType::DestinationReserve,
			TransferType::RemoteReserve(location) => TransferType::RemoteReserve(f(location)?),
		})
	}

	pub fn remote_reserve(&self) -> Option<&L> {
		match self {
			TransferType::RemoteReserve(location) => Some(location),
			_ => None,
		}
	}

	fn tag(&self) -> &'static str {
		match self {
			TransferType::Teleport => "Teleport",
			TransferType::LocalReserve => "LocalReserve",
			TransferType::DestinationReserve => "DestinationReserve",
			TransferType::RemoteReserve(_) => "RemoteReserve",
		}
	}
}

impl TransferType<Multilocation> {
	/// Picks the route for moving an asset reserved on `reserve` from `origin` to `destination`.
	///
	/// A remote reserve is addressed as seen from the origin.
	pub fn classify(
		origin: &AbsoluteLocation,
		destination: &AbsoluteLocation,
		reserve: &AbsoluteLocation,
		teleportable: bool,
	) -> Self {
		let transfer_type = if teleportable {
			TransferType::Teleport
		} else if reserve == origin {
			TransferType::LocalReserve
		} else if reserve == destination {
			TransferType::DestinationReserve
		} else {
			TransferType::RemoteReserve(reserve.from_point_of_view(origin))
		};

		log::debug!(
			target: LOG_TARGET,
			"classified transfer {:?} -> {:?} with reserve {:?} as {}",
			origin.junctions(),
			destination.junctions(),
			reserve.junctions(),
			transfer_type.tag(),
		);
		transfer_type
	}
}

/// Only the utility asset teleports, and only between the relay chain and its system parachains.
pub fn is_teleport(
	origin: &AbsoluteLocation,
	destination: &AbsoluteLocation,
	is_utility_asset: bool,
) -> bool {
	is_utility_asset &&
		origin.is_relay_or_system_parachain() &&
		destination.is_relay_or_system_parachain()
}

/// Wraps the reserve location of a relative transfer type for `version`.
pub fn versioned_transfer_type(
	relative: TransferType<Multilocation>,
	version: Version,
) -> TransferType<VersionedMultilocation> {
	relative.map(|location| VersionedMultilocation::versioned(location, version))
}

impl<L: Serialize> Serialize for TransferType<L> {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		match self {
			TransferType::RemoteReserve(location) =>
				serialize_tagged(serializer, self.tag(), location),
			_ => serialize_unit_tagged(serializer, self.tag()),
		}
	}
}

impl<L: DeserializeOwned> VariantTable for TransferType<L> {
	const EXPECTING: &'static str = "a transfer type";

	fn tags(_: Version) -> &'static [&'static str] {
		TRANSFER_TYPE_TAGS
	}

	fn decode_variant<'de, A: SeqAccess<'de>>(
		version: Version,
		tag: &str,
		payload: Payload<'_, A>,
	) -> Result<Self, A::Error> {
		match tag {
			"Teleport" => payload.unit().map(|_| TransferType::Teleport),
			"LocalReserve" => payload.unit().map(|_| TransferType::LocalReserve),
			"DestinationReserve" => payload.unit().map(|_| TransferType::DestinationReserve),
			"RemoteReserve" => payload.value().map(TransferType::RemoteReserve),
			other => Err(Self::unknown(version, other)),
		}
	}
}

impl<'de, L: DeserializeOwned> Deserialize<'de> for TransferType<L> {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		// the location carries its own version tag
		deserialize_tagged(Version::V0, deserializer)
	}
}
