use serde::de::DeserializeOwned;

use crate::error::{Error, Result};

/// Deserialize with JSON-path context in error messages.
pub fn from_slice_with_path<T: DeserializeOwned>(bytes: &[u8]) -> Result<T> {
    let de = &mut serde_json::Deserializer::from_slice(bytes);
    let value = match serde_path_to_error::deserialize::<_, T>(&mut *de) {
        Ok(v) => v,
        Err(err) => {
            let path = err.path().to_string();
            return Err(Error::Decode { path, source: err.into_inner() });
        }
    };
    // reject trailing garbage the way serde_json::from_slice does
    de.end().map_err(|source| Error::Decode { path: ".".to_string(), source })?;
    Ok(value)
}
