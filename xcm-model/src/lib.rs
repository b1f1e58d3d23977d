// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

//! Version aware model of cross-chain locations, assets and transfer programs.
//!
//! Values are version independent; the protocol generation is chosen when a value is written
//! to, or read from, its JSON token form (see [`variant`]).

pub mod absolute;
pub mod asset;
pub mod error;
pub mod event;
pub mod instruction;
pub mod junction;
pub mod location;
pub mod transfer_type;
pub mod variant;
pub mod version;
pub mod versioned;

#[cfg(test)]
mod mock;

pub use absolute::{
	is_relay_or_system_parachain, AbsoluteLocation, ReserveLocationType, ReservePath,
	VersionedAbsoluteLocation, FIRST_PUBLIC_PARA_ID,
};
pub use asset::{
	AssetId, AssetInstance, Fungibility, LocatableAsset, Multiasset, MultiassetFilter,
	WildFungibility, WildMultiasset,
};
pub use error::Error;
pub use event::{FeesPaidEvent, SentEvent};
pub use instruction::{Instruction, VersionedMessage, Weight, WeightLimit};
pub use junction::{Junction, Junctions, NetworkId};
pub use location::Multilocation;
pub use transfer_type::{is_teleport, versioned_transfer_type, TransferType};
pub use variant::{from_value, to_value, VersionedCodec};
pub use version::{UnknownVersion, Version};
pub use versioned::{VersionedLocatableAsset, VersionedMultiassets, VersionedMultilocation};

pub const LOG_TARGET: &str = "xtransfer::xcm";
