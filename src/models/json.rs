//! JSON mapping shared by every model: parsing, validation, and null stripping.

// crates.io
use serde::de::DeserializeOwned;
use serde_json::Value;
// self
use crate::_prelude::*;

/// Errors raised while mapping models to and from JSON.
#[derive(Debug, ThisError)]
pub enum ModelError {
	/// Text could not be parsed into the model.
	#[error("Unable to parse {model} from JSON.")]
	Parse {
		/// Model being parsed.
		model: &'static str,
		/// Structured parsing failure including the JSON path.
		#[source]
		source: serde_path_to_error::Error<serde_json::Error>,
	},
	/// Model could not be serialized.
	#[error("Unable to serialize {model} to JSON.")]
	Serialize {
		/// Model being serialized.
		model: &'static str,
		/// Underlying serializer failure.
		#[source]
		source: serde_json::Error,
	},
	/// A parsed field holds a value outside its allowed range.
	#[error("Field `{field}` of {model} is invalid: {reason}.")]
	Invalid {
		/// Model being validated.
		model: &'static str,
		/// Offending field (wire name).
		field: &'static str,
		/// Human-readable constraint description.
		reason: String,
	},
	/// A string did not name a known enumeration variant.
	#[error("Unknown {kind} value `{value}`.")]
	UnknownVariant {
		/// Enumeration being parsed.
		kind: &'static str,
		/// Rejected value.
		value: String,
	},
}

/// JSON mapping contract implemented by every data model.
pub trait JsonModel
where
	Self: Sized + Serialize + DeserializeOwned,
{
	/// Model name used in error messages.
	const NAME: &'static str;

	/// Checks field-level constraints after parsing; the default accepts everything.
	fn validate(&self) -> Result<(), ModelError> {
		Ok(())
	}

	/// Parses `text`, building nested records, then validates the result.
	fn from_json(text: &str) -> Result<Self, ModelError> {
		let de = &mut serde_json::Deserializer::from_str(text);
		let model: Self = serde_path_to_error::deserialize(de)
			.map_err(|source| ModelError::Parse { model: Self::NAME, source })?;

		model.validate()?;

		Ok(model)
	}

	/// Builds the model from an already decoded JSON value.
	fn from_value(value: Value) -> Result<Self, ModelError> {
		let model: Self = serde_path_to_error::deserialize(value)
			.map_err(|source| ModelError::Parse { model: Self::NAME, source })?;

		model.validate()?;

		Ok(model)
	}

	/// Converts the model into a JSON value with every null entry removed.
	fn to_json_value(&self) -> Result<Value, ModelError> {
		let mut value = serde_json::to_value(self)
			.map_err(|source| ModelError::Serialize { model: Self::NAME, source })?;

		remove_nulls(&mut value);

		Ok(value)
	}

	/// Serializes the model into JSON text with every null entry removed.
	fn to_json(&self) -> Result<String, ModelError> {
		let value = self.to_json_value()?;

		serde_json::to_string(&value)
			.map_err(|source| ModelError::Serialize { model: Self::NAME, source })
	}
}

/// Strips null-valued object entries in place, descending into nested objects and arrays.
///
/// Array elements that are themselves `null` are kept so positional data is not shifted.
pub fn remove_nulls(value: &mut Value) {
	match value {
		Value::Object(map) => {
			map.retain(|_, entry| !entry.is_null());

			for entry in map.values_mut() {
				remove_nulls(entry);
			}
		},
		Value::Array(items) =>
			for item in items.iter_mut() {
				remove_nulls(item);
			},
		_ => {},
	}
}

/// Wraps a validation failure.
pub(crate) fn invalid(
	model: &'static str,
	field: &'static str,
	reason: impl Into<String>,
) -> ModelError {
	ModelError::Invalid { model, field, reason: reason.into() }
}

#[cfg(test)]
mod tests {
	// crates.io
	use serde_json::json;
	// self
	use super::*;

	#[test]
	fn remove_nulls_descends_into_nested_values() {
		let mut value = json!({
			"id": "a",
			"name": null,
			"nested": { "keep": 1, "drop": null },
			"items": [{ "drop": null, "keep": false }, null],
		});

		remove_nulls(&mut value);

		assert_eq!(
			value,
			json!({
				"id": "a",
				"nested": { "keep": 1 },
				"items": [{ "keep": false }, null],
			})
		);
	}

	#[test]
	fn remove_nulls_leaves_scalars_untouched() {
		let mut value = json!("text");

		remove_nulls(&mut value);

		assert_eq!(value, json!("text"));
	}
}
