use crate::package::{Package, StatusCode};
use crate::{Error, Result};
use bytes::Bytes;
use prost::Message;

pub struct ProtobufSerializer;

impl ProtobufSerializer {
    pub fn serialize(package: &Package) -> Result<Bytes> {
        let mut buf = Vec::with_capacity(package.encoded_len());
        package.encode(&mut buf)?;
        Ok(Bytes::from(buf))
    }

    pub fn deserialize(payload: &[u8]) -> Result<Package> {
        let package = Package::decode(payload)?;

        if package.created_at.is_none() {
            return Err(Error::InvalidMessage {
                message: "package is missing created_at".to_string(),
            });
        }

        match &package.status {
            None => Err(Error::InvalidMessage {
                message: "package is missing status".to_string(),
            }),
            Some(status) if StatusCode::from_i32(status.code).is_none() => {
                Err(Error::InvalidMessage {
                    message: format!("unknown status code {}", status.code),
                })
            }
            Some(_) => Ok(package),
        }
    }
}
