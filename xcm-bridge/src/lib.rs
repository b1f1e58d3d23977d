// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

pub mod call;
pub mod program;

#[cfg(test)]
mod mock;

use xtransfer_traits::{CoderError, RuntimeCoder};
use xtransfer_xcm::{
	AbsoluteLocation, Multilocation, TransferType, Version, VersionedMessage,
};

pub use call::{PalletTransferCall, PalletTransferKind};
pub use program::transfer_program;

pub const LOG_TARGET: &str = "xtransfer::xcm-bridge";

/// Runtime type the execute call takes its message as.
pub const VERSIONED_XCM_TYPE: &str = "xcm.VersionedXcm";

#[derive(Debug, thiserror::Error)]
pub enum Error {
	#[error(transparent)]
	Xcm(#[from] xtransfer_xcm::Error),
	#[error(transparent)]
	Coder(#[from] CoderError),
	#[error(transparent)]
	Metadata(#[from] xtransfer_metadata::Error),
	#[error("destination {0:?} names no beneficiary")]
	MissingBeneficiary(Multilocation),
}

/// A single asset transfer between two chains.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct XcmTransfer {
	pub origin: AbsoluteLocation,
	pub destination: AbsoluteLocation,
	/// Chain holding the reserve of `asset`.
	pub reserve: AbsoluteLocation,
	pub asset: AbsoluteLocation,
	pub amount: u128,
	/// Raw account id of the recipient on `destination`.
	pub recipient: Vec<u8>,
	pub recipient_is_ethereum: bool,
	/// Whether origin and destination trust each other for teleporting `asset`.
	pub teleportable: bool,
}

pub trait XcmHandler {
	fn transfer_type(&self) -> TransferType<Multilocation>;

	/// Builds the origin execute program for `version`.
	fn create_message(&self, version: Version) -> Result<VersionedMessage, Error>;

	/// Encodes `message` with the origin chain's runtime types.
	fn encode_message(
		&self,
		message: &VersionedMessage,
		coder: &dyn RuntimeCoder,
	) -> Result<Vec<u8>, Error>;
}

impl XcmHandler for XcmTransfer {
	fn transfer_type(&self) -> TransferType<Multilocation> {
		TransferType::classify(&self.origin, &self.destination, &self.reserve, self.teleportable)
	}

	fn create_message(&self, version: Version) -> Result<VersionedMessage, Error> {
		let program = transfer_program(self, self.transfer_type())?;
		log::debug!(
			target: LOG_TARGET,
			"created {} instruction program for xcm {version}",
			program.len()
		);
		let message = VersionedMessage::new(program, version)?;
		// instructions that only exist in later versions fail here rather than at encoding
		serde_json::to_value(&message).map_err(xtransfer_xcm::Error::from)?;
		Ok(message)
	}

	fn encode_message(
		&self,
		message: &VersionedMessage,
		coder: &dyn RuntimeCoder,
	) -> Result<Vec<u8>, Error> {
		let value = serde_json::to_value(message).map_err(xtransfer_xcm::Error::from)?;
		let encoded = coder.encode(VERSIONED_XCM_TYPE, &value).map_err(|e| {
			log::warn!(target: LOG_TARGET, "failed to encode xcm {}: {e}", message.version());
			e
		})?;
		Ok(encoded)
	}
}
