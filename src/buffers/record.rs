//! Serialized `{ "type": "Buffer", "data": [...] }` record

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::{BufferError, Result};

use super::buffer::Buffer;

/// Serialized form of a buffer
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferRecord {
    /// Always [`BufferRecord::TYPE_TAG`] for records produced by this crate
    #[serde(rename = "type")]
    pub kind: String,
    /// The bytes, one number each
    pub data: Vec<u8>,
}

impl BufferRecord {
    /// Value of the `type` field
    pub const TYPE_TAG: &'static str = "Buffer";

    /// Record holding a copy of `data`
    pub fn new(data: Vec<u8>) -> Self {
        Self {
            kind: Self::TYPE_TAG.to_string(),
            data,
        }
    }
}

impl Buffer {
    /// Serialize the view into a record
    pub fn to_record(&self) -> BufferRecord {
        BufferRecord::new(self.to_vec())
    }

    /// Dedicated buffer holding the bytes of `record`
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::InvalidType`] if the record's type is not `"Buffer"`.
    pub fn from_record(record: &BufferRecord) -> Result<Self> {
        if record.kind != BufferRecord::TYPE_TAG {
            return Err(BufferError::invalid_type(format!(
                "expected a record of type \"{}\", got \"{}\"",
                BufferRecord::TYPE_TAG,
                record.kind
            )));
        }
        Ok(Self::from_bytes(&record.data))
    }

    /// JSON text of the record
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string(&self.to_record())?)
    }

    /// Parse a JSON record
    ///
    /// # Errors
    ///
    /// Returns [`BufferError::Serialization`] for malformed JSON and
    /// [`BufferError::InvalidType`] for a foreign `type`.
    pub fn from_json(json: &str) -> Result<Self> {
        let record: BufferRecord = serde_json::from_str(json)?;
        Self::from_record(&record)
    }
}

impl Serialize for Buffer {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        self.to_record().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for Buffer {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let record = BufferRecord::deserialize(deserializer)?;
        Buffer::from_record(&record).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_shape() {
        let buf = Buffer::from(vec![1, 2, 255]);
        assert_eq!(buf.to_json().unwrap(), r#"{"type":"Buffer","data":[1,2,255]}"#);
    }

    #[test]
    fn test_foreign_type_rejected() {
        let err = Buffer::from_json(r#"{"type":"Uint8Array","data":[1]}"#).unwrap_err();
        assert_eq!(err.kind(), crate::error::ErrorKind::Type);
        let err = Buffer::from_json("{").unwrap_err();
        assert!(matches!(err, BufferError::Serialization { .. }));
    }
}
