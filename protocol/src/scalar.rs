//! The reference server writes every field of its tile messages as a JSON string, so integer and boolean fields
//! accept both their typed form and a string spelling of it.

use serde::de::{self, Deserializer};
use serde::{Deserialize, Serializer};

#[derive(Deserialize)]
#[serde(untagged)]
enum Integer {
    Number(u64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Flag {
    Bool(bool),
    Number(u64),
    Text(String),
}

impl Integer {
    fn value<E: de::Error>(self) -> Result<u64, E> {
        match self {
            Integer::Number(value) => Ok(value),
            Integer::Text(text) => text
                .trim()
                .parse()
                .map_err(|_| E::custom(format!("expected an integer, got {:?}", text))),
        }
    }
}

pub(crate) fn index<'de, D: Deserializer<'de>>(deserializer: D) -> Result<usize, D::Error> {
    let value = Integer::deserialize(deserializer)?.value()?;
    usize::try_from(value).map_err(de::Error::custom)
}

pub(crate) fn flag<'de, D: Deserializer<'de>>(deserializer: D) -> Result<bool, D::Error> {
    match Flag::deserialize(deserializer)? {
        Flag::Bool(value) => Ok(value),
        Flag::Number(value) => Ok(value != 0),
        Flag::Text(text) => match text.trim() {
            "true" | "1" => Ok(true),
            "false" | "0" => Ok(false),
            _ => Err(de::Error::custom(format!("expected a boolean, got {:?}", text))),
        },
    }
}

/// Absent, `null` and zero all mean "not provided".
pub(crate) fn optional_size<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<u32>, D::Error> {
    let Some(value) = Option::<Integer>::deserialize(deserializer)? else {
        return Ok(None);
    };
    match u32::try_from(value.value()?).map_err(de::Error::custom)? {
        0 => Ok(None),
        size => Ok(Some(size)),
    }
}

/// The server reads the bot flag as an integer.
pub(crate) fn serialize_flag<S: Serializer>(value: &bool, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_u8(u8::from(*value))
}
