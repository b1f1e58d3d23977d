// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

use core::{fmt, str::FromStr};

use serde::{de, Deserialize, Deserializer, Serialize, Serializer};

/// XCM protocol generation. Ordered by ordinal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Version {
	V0 = 0,
	V1 = 1,
	V2 = 2,
	V3 = 3,
	V4 = 4,
	V5 = 5,
}

impl Version {
	pub const ALL: [Version; 6] =
		[Version::V0, Version::V1, Version::V2, Version::V3, Version::V4, Version::V5];

	pub const fn ordinal(self) -> u8 {
		self as u8
	}

	/// Wire and metadata name, `"V0"` to `"V5"`.
	pub const fn raw_name(self) -> &'static str {
		match self {
			Version::V0 => "V0",
			Version::V1 => "V1",
			Version::V2 => "V2",
			Version::V3 => "V3",
			Version::V4 => "V4",
			Version::V5 => "V5",
		}
	}

	pub fn from_raw_name(name: &str) -> Option<Self> {
		Self::ALL.into_iter().find(|v| v.raw_name() == name)
	}

	pub fn from_ordinal(ordinal: u8) -> Option<Self> {
		Self::ALL.get(ordinal as usize).copied()
	}
}

impl fmt::Display for Version {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.raw_name())
	}
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown xcm version `{0}`")]
pub struct UnknownVersion(pub String);

impl FromStr for Version {
	type Err = UnknownVersion;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		Self::from_raw_name(s).ok_or_else(|| UnknownVersion(s.to_string()))
	}
}

impl Serialize for Version {
	fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
		serializer.serialize_str(self.raw_name())
	}
}

impl<'de> Deserialize<'de> for Version {
	fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
		let name = String::deserialize(deserializer)?;
		Version::from_raw_name(&name)
			.ok_or_else(|| de::Error::unknown_variant(&name, &["V0", "V1", "V2", "V3", "V4", "V5"]))
	}
}
