//! Field rules for the user form.

use std::fmt;
use std::sync::LazyLock;

use regex::Regex;

use super::FieldKey;
use crate::model::{UserData, UserDraft};

static EMAIL: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\S+@\S+\.\S+$").expect("email pattern"));
static PHONE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{10}$").expect("phone pattern"));
static ZIPCODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[0-9]{5,6}$").expect("zipcode pattern"));

/// One failing rule, bound to the field it belongs to.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FieldError {
    pub field: FieldKey,
    pub message: &'static str,
}

/// Every failing rule of a draft, in form order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    pub fn get(&self, field: FieldKey) -> Option<&'static str> {
        self.0.iter().find(|e| e.field == field).map(|e| e.message)
    }

    pub fn messages(&self) -> Vec<&'static str> {
        self.0.iter().map(|e| e.message).collect()
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

pub fn is_valid_email(s: &str) -> bool {
    EMAIL.is_match(s)
}

pub fn is_valid_phone(s: &str) -> bool {
    PHONE.is_match(s)
}

pub fn is_valid_zipcode(s: &str) -> bool {
    ZIPCODE.is_match(s)
}

/// Surrounding whitespace is tolerated; NaN and infinities are not coordinates.
pub fn is_numeric(s: &str) -> bool {
    s.trim().parse::<f64>().is_ok_and(f64::is_finite)
}

fn blank(s: &str) -> bool {
    s.trim().is_empty()
}

fn check(field: FieldKey, value: &str) -> Option<&'static str> {
    use super::{AddressField as A, GeoField as G};
    match field {
        FieldKey::Name => blank(value).then_some("Name is required"),
        FieldKey::Email if blank(value) => Some("Email is required"),
        FieldKey::Email => (!is_valid_email(value)).then_some("Email is invalid"),
        FieldKey::Phone if blank(value) => Some("Phone is required"),
        FieldKey::Phone => (!is_valid_phone(value)).then_some("Phone must be 10 digits"),
        FieldKey::Company => blank(value).then_some("Company is required"),
        FieldKey::Address(A::Street) => blank(value).then_some("Street is required"),
        FieldKey::Address(A::City) => blank(value).then_some("City is required"),
        FieldKey::Address(A::Zipcode) if blank(value) => Some("Zipcode is required"),
        FieldKey::Address(A::Zipcode) => (!is_valid_zipcode(value)).then_some("Zipcode is invalid"),
        FieldKey::Address(A::Geo(G::Lat)) if blank(value) => Some("Latitude is required"),
        FieldKey::Address(A::Geo(G::Lat)) => {
            (!is_numeric(value)).then_some("Latitude must be a number")
        }
        FieldKey::Address(A::Geo(G::Lng)) if blank(value) => Some("Longitude is required"),
        FieldKey::Address(A::Geo(G::Lng)) => {
            (!is_numeric(value)).then_some("Longitude must be a number")
        }
    }
}

/// Run every rule; the draft becomes a payload only if none fail.
pub fn validate(draft: &UserDraft) -> Result<UserData, ValidationErrors> {
    let errors: Vec<FieldError> = FieldKey::ALL
        .iter()
        .filter_map(|&field| {
            check(field, field.get(draft)).map(|message| FieldError { field, message })
        })
        .collect();
    if errors.is_empty() {
        Ok(UserData::from(draft))
    } else {
        Err(ValidationErrors(errors))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::{AddressField, GeoField};

    fn valid_draft() -> UserDraft {
        let mut d = UserDraft::default();
        d.name = "Ann".into();
        d.email = "a@b.co".into();
        d.phone = "1234567890".into();
        d.company = "Acme".into();
        d.address.street = "Main St".into();
        d.address.city = "Springfield".into();
        d.address.zipcode = "12345".into();
        d.address.geo.lat = "12.34".into();
        d.address.geo.lng = "-5".into();
        d
    }

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("a@b.co"));
        assert!(!is_valid_email("abc"));
        assert!(!is_valid_email("a@b"));
        assert!(!is_valid_email("a b@c.d"));
    }

    #[test]
    fn phone_needs_exactly_ten_digits() {
        assert!(is_valid_phone("1234567890"));
        assert!(!is_valid_phone("123456789"));
        assert!(!is_valid_phone("12345678901"));
        assert!(!is_valid_phone("12345-7890"));
        assert!(!is_valid_phone("١٢٣٤٥٦٧٨٩٠"));
    }

    #[test]
    fn zipcode_is_five_or_six_digits() {
        assert!(is_valid_zipcode("12345"));
        assert!(is_valid_zipcode("123456"));
        assert!(!is_valid_zipcode("1234"));
        assert!(!is_valid_zipcode("1234567"));
    }

    #[test]
    fn coordinates_must_be_numbers() {
        assert!(is_numeric("12.34"));
        assert!(is_numeric("-5"));
        assert!(is_numeric(" 7 "));
        assert!(!is_numeric("abc"));
        assert!(!is_numeric("NaN"));
        assert!(!is_numeric("inf"));
        assert!(!is_numeric("infinity"));
        assert!(!is_numeric("-INF"));
        assert!(!is_numeric("Infinity"));
    }

    #[test]
    fn valid_draft_becomes_payload() {
        let data = validate(&valid_draft()).expect("valid");
        assert_eq!(data.name, "Ann");
        assert_eq!(data.address.geo.lng, "-5");
    }

    #[test]
    fn each_missing_field_is_reported_by_name() {
        for field in FieldKey::ALL {
            let mut d = valid_draft();
            field.set(&mut d, "   ");
            let errs = validate(&d).expect_err("blank field must fail");
            assert_eq!(errs.len(), 1, "{}", field.path());
            assert!(errs.get(field).is_some_and(|m| m.ends_with("is required")));
        }
    }

    #[test]
    fn empty_draft_reports_every_field_in_order() {
        let errs = validate(&UserDraft::default()).expect_err("empty");
        assert_eq!(errs.len(), FieldKey::ALL.len());
        assert_eq!(errs.messages()[0], "Name is required");
        assert_eq!(
            errs.get(FieldKey::Address(AddressField::Geo(GeoField::Lng))),
            Some("Longitude is required")
        );
    }

    #[test]
    fn format_errors_name_their_field() {
        let mut d = valid_draft();
        d.email = "nope".into();
        d.address.zipcode = "1234".into();
        d.address.geo.lat = "north".into();
        let errs = validate(&d).expect_err("invalid");
        assert_eq!(errs.get(FieldKey::Email), Some("Email is invalid"));
        assert_eq!(
            errs.get(FieldKey::Address(AddressField::Zipcode)),
            Some("Zipcode is invalid")
        );
        assert_eq!(
            errs.get(FieldKey::Address(AddressField::Geo(GeoField::Lat))),
            Some("Latitude must be a number")
        );
    }
}
