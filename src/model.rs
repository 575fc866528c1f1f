//! User records as exchanged with the remote users resource.
//!
//! A [`User`] is a server-assigned id plus a [`UserData`] body. The body is
//! also what create/update requests send, so the two share one type and the
//! id is flattened next to it on the wire.

use serde::{Deserialize, Deserializer, Serialize};

/// A persisted user record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    /// Opaque id assigned by the remote store.
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    #[serde(flatten)]
    pub data: UserData,
}

impl User {
    pub fn new(id: impl Into<String>, data: UserData) -> Self {
        Self {
            id: id.into(),
            data,
        }
    }
}

/// User body without identity; the create/update payload.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UserData {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: Address,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub street: String,
    pub city: String,
    pub zipcode: String,
    pub geo: Geo,
}

/// Coordinates are kept as text; some servers send them as JSON numbers.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Geo {
    #[serde(deserialize_with = "text_or_number")]
    pub lat: String,
    #[serde(deserialize_with = "text_or_number")]
    pub lng: String,
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coord {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Coord::deserialize(deserializer)? {
        Coord::Text(s) => s,
        Coord::Number(n) => n.to_string(),
    })
}

/// Editable copy of a user held by the form. Every field may be empty or
/// invalid while the user is typing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct UserDraft {
    pub name: String,
    pub email: String,
    pub phone: String,
    pub company: String,
    pub address: AddressDraft,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AddressDraft {
    pub street: String,
    pub city: String,
    pub zipcode: String,
    pub geo: GeoDraft,
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GeoDraft {
    pub lat: String,
    pub lng: String,
}

impl From<&UserData> for UserDraft {
    fn from(data: &UserData) -> Self {
        Self {
            name: data.name.clone(),
            email: data.email.clone(),
            phone: data.phone.clone(),
            company: data.company.clone(),
            address: AddressDraft {
                street: data.address.street.clone(),
                city: data.address.city.clone(),
                zipcode: data.address.zipcode.clone(),
                geo: GeoDraft {
                    lat: data.address.geo.lat.clone(),
                    lng: data.address.geo.lng.clone(),
                },
            },
        }
    }
}

impl From<&User> for UserDraft {
    fn from(user: &User) -> Self {
        Self::from(&user.data)
    }
}

impl From<&UserDraft> for UserData {
    fn from(draft: &UserDraft) -> Self {
        Self {
            name: draft.name.clone(),
            email: draft.email.clone(),
            phone: draft.phone.clone(),
            company: draft.company.clone(),
            address: Address {
                street: draft.address.street.clone(),
                city: draft.address.city.clone(),
                zipcode: draft.address.zipcode.clone(),
                geo: Geo {
                    lat: draft.address.geo.lat.clone(),
                    lng: draft.address.geo.lng.clone(),
                },
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_mongo_style_id_and_numeric_coordinates() {
        let raw = r#"{
            "_id": "65f1",
            "name": "Ann",
            "email": "ann@x.com",
            "phone": "1234567890",
            "company": "Acme",
            "address": {
                "street": "Main St",
                "city": "Springfield",
                "zipcode": "12345",
                "geo": { "lat": 12.5, "lng": "-7" }
            }
        }"#;
        let user: User = serde_json::from_str(raw).expect("decode");
        assert_eq!(user.id, "65f1");
        assert_eq!(user.data.address.geo.lat, "12.5");
        assert_eq!(user.data.address.geo.lng, "-7");
    }

    #[test]
    fn accepts_plain_id_alias() {
        let raw = r#"{"id":"7","name":"a","email":"b","phone":"c","company":"d",
            "address":{"street":"e","city":"f","zipcode":"g","geo":{"lat":"1","lng":"2"}}}"#;
        let user: User = serde_json::from_str(raw).expect("decode");
        assert_eq!(user.id, "7");
    }

    #[test]
    fn missing_address_is_a_decode_error() {
        let raw = r#"{"_id":"1","name":"a","email":"b","phone":"c","company":"d"}"#;
        assert!(serde_json::from_str::<User>(raw).is_err());
    }

    #[test]
    fn payload_serializes_without_id() {
        let json = serde_json::to_value(UserData::default()).expect("encode");
        assert!(json.get("_id").is_none());
        assert!(json["address"]["geo"].get("lat").is_some());
    }
}
