// The Licensed Work is (c) 2022 Sygma
// SPDX-License-Identifier: LGPL-3.0-only

//! Writes SCALE bytes for a JSON token value, guided by a portable type registry.

use codec::{Compact, Encode};
use scale_info::{
	form::PortableForm, Field, PortableRegistry, Type, TypeDef, TypeDefPrimitive, Variant,
};
use serde_json::{Map, Value};
use xtransfer_traits::CoderError;

fn error(path: &str, reason: impl Into<String>) -> CoderError {
	CoderError::Encoding { path: path.to_string(), reason: reason.into() }
}

fn is_option(ty: &Type<PortableForm>) -> bool {
	ty.path.segments.len() == 1 && ty.path.segments[0] == "Option"
}

fn child(path: &str, segment: impl core::fmt::Display) -> String {
	format!("{path}.{segment}")
}

pub(crate) struct ScaleEncoder<'a> {
	registry: &'a PortableRegistry,
}

impl<'a> ScaleEncoder<'a> {
	pub fn new(registry: &'a PortableRegistry) -> Self {
		Self { registry }
	}

	pub fn encode(&self, type_id: u32, value: &Value, path: &str) -> Result<Vec<u8>, CoderError> {
		let mut out = Vec::new();
		self.encode_to(type_id, value, path, &mut out)?;
		Ok(out)
	}

	fn resolve(&self, type_id: u32, path: &str) -> Result<&'a Type<PortableForm>, CoderError> {
		self.registry
			.resolve(type_id)
			.ok_or_else(|| error(path, format!("type id {type_id} is not in the registry")))
	}

	fn encode_to(
		&self,
		type_id: u32,
		value: &Value,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		let ty = self.resolve(type_id, path)?;
		match &ty.type_def {
			TypeDef::Composite(composite) => self.encode_fields(&composite.fields, value, path, out),
			TypeDef::Variant(variant) if is_option(ty) =>
				self.encode_option(&variant.variants, value, path, out),
			TypeDef::Variant(variant) => self.encode_variant(&variant.variants, value, path, out),
			TypeDef::Sequence(sequence) =>
				self.encode_sequence(sequence.type_param.id, value, path, out),
			TypeDef::Array(array) =>
				self.encode_array(array.len as usize, array.type_param.id, value, path, out),
			TypeDef::Tuple(tuple) => {
				let ids: Vec<u32> = tuple.fields.iter().map(|field| field.id).collect();
				self.encode_positional(&ids, value, path, out)
			},
			TypeDef::Primitive(primitive) => encode_primitive(primitive, value, path, out),
			TypeDef::Compact(compact) => self.encode_compact(compact.type_param.id, value, path, out),
			TypeDef::BitSequence(_) => Err(error(path, "bit sequences are not supported")),
		}
	}

	fn encode_fields(
		&self,
		fields: &[Field<PortableForm>],
		value: &Value,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		let named = fields.iter().all(|field| field.name.is_some());
		match (fields, value) {
			([], Value::Null) => Ok(()),
			([], Value::Array(items)) if items.is_empty() => Ok(()),
			([], Value::Object(map)) if map.is_empty() => Ok(()),
			([], other) => Err(error(path, format!("expected no payload, got {other}"))),
			// newtypes take the wrapped value directly
			([single], _) if single.name.is_none() => self.encode_to(single.ty.id, value, path, out),
			(_, Value::Object(map)) if named => self.encode_named(fields, map, path, out),
			_ => {
				let ids: Vec<u32> = fields.iter().map(|field| field.ty.id).collect();
				self.encode_positional(&ids, value, path, out)
			},
		}
	}

	fn encode_named(
		&self,
		fields: &[Field<PortableForm>],
		map: &Map<String, Value>,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		if let Some(unknown) = map
			.keys()
			.find(|key| !fields.iter().any(|field| field.name.as_deref() == Some(key.as_str())))
		{
			return Err(error(path, format!("unknown field `{unknown}`")))
		}
		for field in fields {
			let name = field.name.as_deref().unwrap_or_default();
			let value = map.get(name).ok_or_else(|| error(path, format!("missing field `{name}`")))?;
			self.encode_to(field.ty.id, value, &child(path, name), out)?;
		}
		Ok(())
	}

	/// Accepts a list or an index keyed map with exactly `ids.len()` items.
	fn encode_positional(
		&self,
		ids: &[u32],
		value: &Value,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		match value {
			Value::Null if ids.is_empty() => Ok(()),
			Value::Array(items) if items.len() == ids.len() => {
				for (position, (id, item)) in ids.iter().zip(items).enumerate() {
					self.encode_to(*id, item, &child(path, position), out)?;
				}
				Ok(())
			},
			Value::Object(map) if map.len() == ids.len() => {
				for (position, id) in ids.iter().enumerate() {
					let key = position.to_string();
					let item =
						map.get(&key).ok_or_else(|| error(path, format!("missing position {key}")))?;
					self.encode_to(*id, item, &child(path, position), out)?;
				}
				Ok(())
			},
			other => Err(error(path, format!("expected {} positional items, got {other}", ids.len()))),
		}
	}

	fn encode_option(
		&self,
		variants: &[Variant<PortableForm>],
		value: &Value,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		if value.is_null() {
			out.push(0);
			return Ok(())
		}
		let some = variants
			.iter()
			.find(|variant| variant.name == "Some")
			.and_then(|variant| variant.fields.first())
			.ok_or_else(|| error(path, "malformed option type"))?;
		out.push(1);
		self.encode_to(some.ty.id, value, path, out)
	}

	fn encode_variant(
		&self,
		variants: &[Variant<PortableForm>],
		value: &Value,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		let by_name = |name: &str| {
			variants
				.iter()
				.find(|variant| variant.name == name)
				.ok_or_else(|| error(path, format!("unknown variant `{name}`")))
		};

		let (variant, payload) = match value {
			Value::Array(items) => match items.as_slice() {
				[Value::String(tag), payload] => (by_name(tag)?, payload),
				_ => return Err(error(path, "expected a [tag, payload] pair")),
			},
			Value::String(tag) => (by_name(tag)?, &Value::Null),
			Value::Object(map) if map.len() == 1 => match map.iter().next() {
				Some((tag, payload)) => (by_name(tag)?, payload),
				None => return Err(error(path, "empty variant object")),
			},
			// bare ordinal of a field-less variant
			Value::Number(number) => {
				let index = number
					.as_u64()
					.and_then(|index| u8::try_from(index).ok())
					.ok_or_else(|| error(path, format!("invalid variant index {number}")))?;
				let variant = variants
					.iter()
					.find(|variant| variant.index == index)
					.ok_or_else(|| error(path, format!("unknown variant index {index}")))?;
				(variant, &Value::Null)
			},
			other => return Err(error(path, format!("expected a variant, got {other}"))),
		};

		out.push(variant.index);
		self.encode_fields(&variant.fields, payload, &child(path, &variant.name), out)
	}

	fn encode_sequence(
		&self,
		item_id: u32,
		value: &Value,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		match value {
			Value::String(hex) if self.is_byte(item_id) => {
				let bytes = decode_hex(hex, path)?;
				bytes.encode_to(out);
				Ok(())
			},
			Value::Array(items) => {
				Compact(items.len() as u32).encode_to(out);
				for (position, item) in items.iter().enumerate() {
					self.encode_to(item_id, item, &child(path, position), out)?;
				}
				Ok(())
			},
			other => Err(error(path, format!("expected a list, got {other}"))),
		}
	}

	fn encode_array(
		&self,
		len: usize,
		item_id: u32,
		value: &Value,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		match value {
			Value::String(hex) if self.is_byte(item_id) => {
				let bytes = decode_hex(hex, path)?;
				if bytes.len() != len {
					return Err(error(path, format!("expected {len} bytes, got {}", bytes.len())))
				}
				out.extend_from_slice(&bytes);
				Ok(())
			},
			Value::Array(items) if items.len() == len => {
				for (position, item) in items.iter().enumerate() {
					self.encode_to(item_id, item, &child(path, position), out)?;
				}
				Ok(())
			},
			// a single element array may be written unwrapped
			_ if len == 1 => self.encode_to(item_id, value, &child(path, 0), out),
			other => Err(error(path, format!("expected {len} items, got {other}"))),
		}
	}

	fn encode_compact(
		&self,
		inner_id: u32,
		value: &Value,
		path: &str,
		out: &mut Vec<u8>,
	) -> Result<(), CoderError> {
		let inner = self.resolve(inner_id, path)?;
		match &inner.type_def {
			TypeDef::Primitive(primitive) => {
				let bound: u128 = match primitive {
					TypeDefPrimitive::U8 => u8::MAX.into(),
					TypeDefPrimitive::U16 => u16::MAX.into(),
					TypeDefPrimitive::U32 => u32::MAX.into(),
					TypeDefPrimitive::U64 => u64::MAX.into(),
					TypeDefPrimitive::U128 => u128::MAX,
					_ => return Err(error(path, "compact encoding needs an unsigned integer")),
				};
				let number = parse_unsigned(value, path)?;
				if number > bound {
					return Err(error(path, format!("{number} overflows compact {primitive:?}")))
				}
				Compact(number).encode_to(out);
				Ok(())
			},
			TypeDef::Composite(composite) if composite.fields.len() == 1 => {
				let field = &composite.fields[0];
				let value = match (&field.name, value) {
					(Some(name), Value::Object(map)) => map.get(name).unwrap_or(value),
					_ => value,
				};
				self.encode_compact(field.ty.id, value, path, out)
			},
			_ => Err(error(path, "compact encoding needs an unsigned integer")),
		}
	}

	fn is_byte(&self, type_id: u32) -> bool {
		matches!(
			self.registry.resolve(type_id).map(|ty| &ty.type_def),
			Some(TypeDef::Primitive(TypeDefPrimitive::U8))
		)
	}
}

fn decode_hex(hex: &str, path: &str) -> Result<Vec<u8>, CoderError> {
	let digits = hex.strip_prefix("0x").unwrap_or(hex);
	hex::decode(digits).map_err(|e| error(path, format!("invalid hex `{hex}`: {e}")))
}

fn parse_unsigned(value: &Value, path: &str) -> Result<u128, CoderError> {
	match value {
		Value::Number(number) => number.as_u64().map(u128::from),
		Value::String(digits) => digits.parse().ok(),
		_ => None,
	}
	.ok_or_else(|| error(path, format!("expected an unsigned integer, got {value}")))
}

fn parse_signed(value: &Value, path: &str) -> Result<i128, CoderError> {
	match value {
		Value::Number(number) => number.as_i64().map(i128::from),
		Value::String(digits) => digits.parse().ok(),
		_ => None,
	}
	.ok_or_else(|| error(path, format!("expected a signed integer, got {value}")))
}

macro_rules! encode_int {
	($parse:ident, $ty:ty, $value:expr, $path:expr, $out:expr) => {{
		let wide = $parse($value, $path)?;
		let narrow = <$ty>::try_from(wide)
			.map_err(|_| error($path, format!("{wide} overflows {}", stringify!($ty))))?;
		narrow.encode_to($out);
		Ok(())
	}};
}

fn encode_primitive(
	primitive: &TypeDefPrimitive,
	value: &Value,
	path: &str,
	out: &mut Vec<u8>,
) -> Result<(), CoderError> {
	match primitive {
		TypeDefPrimitive::Bool => {
			let flag = value.as_bool().ok_or_else(|| error(path, format!("expected a bool, got {value}")))?;
			flag.encode_to(out);
			Ok(())
		},
		TypeDefPrimitive::Str => {
			let text = value.as_str().ok_or_else(|| error(path, format!("expected a string, got {value}")))?;
			text.encode_to(out);
			Ok(())
		},
		TypeDefPrimitive::U8 => encode_int!(parse_unsigned, u8, value, path, out),
		TypeDefPrimitive::U16 => encode_int!(parse_unsigned, u16, value, path, out),
		TypeDefPrimitive::U32 => encode_int!(parse_unsigned, u32, value, path, out),
		TypeDefPrimitive::U64 => encode_int!(parse_unsigned, u64, value, path, out),
		TypeDefPrimitive::U128 => encode_int!(parse_unsigned, u128, value, path, out),
		TypeDefPrimitive::I8 => encode_int!(parse_signed, i8, value, path, out),
		TypeDefPrimitive::I16 => encode_int!(parse_signed, i16, value, path, out),
		TypeDefPrimitive::I32 => encode_int!(parse_signed, i32, value, path, out),
		TypeDefPrimitive::I64 => encode_int!(parse_signed, i64, value, path, out),
		TypeDefPrimitive::I128 => encode_int!(parse_signed, i128, value, path, out),
		TypeDefPrimitive::Char | TypeDefPrimitive::U256 | TypeDefPrimitive::I256 =>
			Err(error(path, format!("primitive {primitive:?} is not supported"))),
	}
}
