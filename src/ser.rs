use serde::{ser, Serialize};
use serde_json::{Number, Value};

use crate::error::Result;

/// Largest float magnitude below which every integral value is exactly representable.
const MAX_EXACT_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Writes a float the way `GeoJSON` producers usually do: integral values as bare
/// integer tokens (`-170`, not `-170.0`), everything else as a float. Negative
/// zero stays a float so its sign survives.
pub(crate) struct NumberSerializer(pub f64);

impl ser::Serialize for NumberSerializer {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        let value = self.0;
        let negative_zero = value == 0.0 && value.is_sign_negative();
        if value.fract() == 0.0 && value.abs() < MAX_EXACT_INTEGER && !negative_zero {
            #[allow(clippy::cast_possible_truncation)]
            return serializer.serialize_i64(value as i64);
        }
        serializer.serialize_f64(value)
    }
}

/// Writes a JSON number, collapsing integral floats to integers and keeping
/// integer kinds untouched.
pub(crate) struct JsonNumberSerializer<'a>(pub &'a Number);

impl ser::Serialize for JsonNumberSerializer<'_> {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: ser::Serializer,
    {
        match (self.0.is_f64(), self.0.as_f64()) {
            (true, Some(value)) => NumberSerializer(value).serialize(serializer),
            _ => self.0.serialize(serializer),
        }
    }
}

/// Encodes a value as compact `GeoJSON` text.
///
/// # Errors
///
/// Returns an error if the value is rejected while encoding, e.g. a feature
/// whose `id` is neither a string nor a number.
pub fn to_string<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    Ok(serde_json::to_string(value)?)
}

/// Encodes a value as compact `GeoJSON` bytes.
///
/// # Errors
///
/// See [`to_string`].
pub fn to_vec<T: Serialize + ?Sized>(value: &T) -> Result<Vec<u8>> {
    Ok(serde_json::to_vec(value)?)
}

/// Encodes a value into a generic JSON tree.
///
/// # Errors
///
/// See [`to_string`].
pub fn to_value<T: Serialize + ?Sized>(value: &T) -> Result<Value> {
    Ok(serde_json::to_value(value)?)
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn test_integral_floats() -> Result<()> {
        let numbers = [-170.0, 40.0, 0.5, -0.25, 1e300];
        let encoded: Vec<String> = numbers
            .iter()
            .map(|n| to_string(&NumberSerializer(*n)))
            .collect::<Result<_>>()?;
        assert_eq!(encoded, ["-170", "40", "0.5", "-0.25", "1e+300"]);
        Ok(())
    }

    #[test]
    fn test_negative_zero_keeps_its_sign() -> Result<()> {
        let encoded = to_string(&NumberSerializer(-0.0))?;
        assert!(encoded.starts_with("-0"));
        assert_eq!(to_string(&NumberSerializer(0.0))?, "0");

        let point: crate::Point = crate::from_str(&to_string(&crate::Point::from([-0.0, 1.0]))?)?;
        assert!(point.position().lon().is_sign_negative());
        Ok(())
    }

    #[test]
    fn test_json_numbers() -> Result<()> {
        let float = Number::from_f64(1.0).ok_or(crate::Error::Message("nan".into()))?;
        assert_eq!(to_string(&JsonNumberSerializer(&float))?, "1");
        assert_eq!(to_string(&JsonNumberSerializer(&Number::from(u64::MAX)))?, u64::MAX.to_string());
        assert_eq!(to_string(&JsonNumberSerializer(&Number::from(-3_i8)))?, "-3");
        Ok(())
    }
}
