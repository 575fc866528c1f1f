//! The user form: a typed draft, its field addressing, validation, and the
//! submit gate shared by the create and edit modals.
//!
//! Fields are addressed by [`FieldKey`], a nested enum mirroring the
//! `User → Address → Geo` structure, so every edit goes through a setter of
//! the sub-structure that owns the field.

pub mod validate;

use std::future::Future;

use crate::model::{AddressDraft, GeoDraft, User, UserData, UserDraft};

pub use validate::{FieldError, ValidationErrors, validate};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum GeoField {
    Lat,
    Lng,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum AddressField {
    Street,
    City,
    Zipcode,
    Geo(GeoField),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum FieldKey {
    Name,
    Email,
    Phone,
    Company,
    Address(AddressField),
}

impl FieldKey {
    /// Form order.
    pub const ALL: [FieldKey; 9] = [
        FieldKey::Name,
        FieldKey::Email,
        FieldKey::Phone,
        FieldKey::Company,
        FieldKey::Address(AddressField::Street),
        FieldKey::Address(AddressField::City),
        FieldKey::Address(AddressField::Zipcode),
        FieldKey::Address(AddressField::Geo(GeoField::Lat)),
        FieldKey::Address(AddressField::Geo(GeoField::Lng)),
    ];

    /// Dotted path as used in the wire record, e.g. `address.geo.lat`.
    pub fn path(self) -> &'static str {
        match self {
            FieldKey::Name => "name",
            FieldKey::Email => "email",
            FieldKey::Phone => "phone",
            FieldKey::Company => "company",
            FieldKey::Address(AddressField::Street) => "address.street",
            FieldKey::Address(AddressField::City) => "address.city",
            FieldKey::Address(AddressField::Zipcode) => "address.zipcode",
            FieldKey::Address(AddressField::Geo(GeoField::Lat)) => "address.geo.lat",
            FieldKey::Address(AddressField::Geo(GeoField::Lng)) => "address.geo.lng",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            FieldKey::Name => "Name",
            FieldKey::Email => "Email",
            FieldKey::Phone => "Phone",
            FieldKey::Company => "Company",
            FieldKey::Address(AddressField::Street) => "Street",
            FieldKey::Address(AddressField::City) => "City",
            FieldKey::Address(AddressField::Zipcode) => "Zipcode",
            FieldKey::Address(AddressField::Geo(GeoField::Lat)) => "Latitude",
            FieldKey::Address(AddressField::Geo(GeoField::Lng)) => "Longitude",
        }
    }

    /// Hint shown while the field is empty.
    pub fn placeholder(self) -> &'static str {
        match self {
            FieldKey::Name => "Full name",
            FieldKey::Email => "name@example.com",
            FieldKey::Phone => "10 digits",
            FieldKey::Company => "Company name",
            FieldKey::Address(AddressField::Street) => "Street and number",
            FieldKey::Address(AddressField::City) => "City",
            FieldKey::Address(AddressField::Zipcode) => "5 or 6 digits",
            FieldKey::Address(AddressField::Geo(GeoField::Lat)) => "e.g. -37.3159",
            FieldKey::Address(AddressField::Geo(GeoField::Lng)) => "e.g. 81.1496",
        }
    }

    pub fn get(self, draft: &UserDraft) -> &str {
        match self {
            FieldKey::Name => &draft.name,
            FieldKey::Email => &draft.email,
            FieldKey::Phone => &draft.phone,
            FieldKey::Company => &draft.company,
            FieldKey::Address(f) => draft.address.get(f),
        }
    }

    pub fn set(self, draft: &mut UserDraft, value: impl Into<String>) {
        draft.set(self, value);
    }
}

impl UserDraft {
    pub fn set(&mut self, field: FieldKey, value: impl Into<String>) {
        let value = value.into();
        match field {
            FieldKey::Name => self.name = value,
            FieldKey::Email => self.email = value,
            FieldKey::Phone => self.phone = value,
            FieldKey::Company => self.company = value,
            FieldKey::Address(f) => self.address.set(f, value),
        }
    }

    fn field_mut(&mut self, field: FieldKey) -> &mut String {
        match field {
            FieldKey::Name => &mut self.name,
            FieldKey::Email => &mut self.email,
            FieldKey::Phone => &mut self.phone,
            FieldKey::Company => &mut self.company,
            FieldKey::Address(f) => self.address.field_mut(f),
        }
    }
}

impl AddressDraft {
    pub fn get(&self, field: AddressField) -> &str {
        match field {
            AddressField::Street => &self.street,
            AddressField::City => &self.city,
            AddressField::Zipcode => &self.zipcode,
            AddressField::Geo(f) => self.geo.get(f),
        }
    }

    pub fn set(&mut self, field: AddressField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    fn field_mut(&mut self, field: AddressField) -> &mut String {
        match field {
            AddressField::Street => &mut self.street,
            AddressField::City => &mut self.city,
            AddressField::Zipcode => &mut self.zipcode,
            AddressField::Geo(f) => self.geo.field_mut(f),
        }
    }
}

impl GeoDraft {
    pub fn get(&self, field: GeoField) -> &str {
        match field {
            GeoField::Lat => &self.lat,
            GeoField::Lng => &self.lng,
        }
    }

    pub fn set(&mut self, field: GeoField, value: impl Into<String>) {
        *self.field_mut(field) = value.into();
    }

    fn field_mut(&mut self, field: GeoField) -> &mut String {
        match field {
            GeoField::Lat => &mut self.lat,
            GeoField::Lng => &mut self.lng,
        }
    }
}

/// What the form is submitting for.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit { id: String },
}

/// Result of pressing submit.
#[derive(Debug, PartialEq, Eq)]
pub enum SubmitOutcome<T> {
    /// A previous submission has not settled yet.
    Busy,
    /// Rules failed; nothing was sent.
    Invalid(ValidationErrors),
    Ready(T),
}

#[derive(Clone, Debug)]
pub struct UserForm {
    mode: FormMode,
    draft: UserDraft,
    errors: ValidationErrors,
    submitting: bool,
    /// `0..FieldKey::ALL.len()` are fields; the last row is the submit button.
    focus: usize,
}

impl UserForm {
    pub fn create() -> Self {
        Self::with_draft(FormMode::Create, UserDraft::default())
    }

    /// Form pre-populated with an existing record.
    pub fn edit(user: &User) -> Self {
        Self::with_draft(
            FormMode::Edit {
                id: user.id.clone(),
            },
            UserDraft::from(user),
        )
    }

    fn with_draft(mode: FormMode, draft: UserDraft) -> Self {
        Self {
            mode,
            draft,
            errors: ValidationErrors::default(),
            submitting: false,
            focus: 0,
        }
    }

    pub fn mode(&self) -> &FormMode {
        &self.mode
    }

    pub fn draft(&self) -> &UserDraft {
        &self.draft
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    pub fn error_for(&self, field: FieldKey) -> Option<&'static str> {
        self.errors.get(field)
    }

    pub fn submitting(&self) -> bool {
        self.submitting
    }

    pub fn set(&mut self, field: FieldKey, value: impl Into<String>) {
        self.draft.set(field, value);
    }

    pub fn row_count() -> usize {
        FieldKey::ALL.len() + 1
    }

    pub fn focus(&self) -> usize {
        self.focus
    }

    pub fn focused_field(&self) -> Option<FieldKey> {
        FieldKey::ALL.get(self.focus).copied()
    }

    pub fn on_submit_row(&self) -> bool {
        self.focus == FieldKey::ALL.len()
    }

    pub fn focus_next(&mut self) {
        self.focus = (self.focus + 1) % Self::row_count();
    }

    pub fn focus_prev(&mut self) {
        self.focus = (self.focus + Self::row_count() - 1) % Self::row_count();
    }

    pub fn insert_char(&mut self, c: char) {
        if let Some(field) = self.focused_field() {
            self.draft.field_mut(field).push(c);
        }
    }

    pub fn backspace(&mut self) {
        if let Some(field) = self.focused_field() {
            self.draft.field_mut(field).pop();
        }
    }

    /// Validate and, when clean, lock the form until [`UserForm::settle`].
    pub fn begin_submit(&mut self) -> SubmitOutcome<UserData> {
        if self.submitting {
            return SubmitOutcome::Busy;
        }
        match validate(&self.draft) {
            Ok(data) => {
                self.errors = ValidationErrors::default();
                self.submitting = true;
                SubmitOutcome::Ready(data)
            }
            Err(errors) => {
                self.errors = errors.clone();
                SubmitOutcome::Invalid(errors)
            }
        }
    }

    /// The submit handler finished, whatever its outcome.
    pub fn settle(&mut self) {
        self.submitting = false;
    }

    /// Validate, run `handler` with the payload, then re-enable submission.
    pub async fn submit_with<F, Fut, R>(&mut self, handler: F) -> SubmitOutcome<R>
    where
        F: FnOnce(UserData) -> Fut,
        Fut: Future<Output = R>,
    {
        match self.begin_submit() {
            SubmitOutcome::Ready(data) => {
                let out = handler(data).await;
                self.settle();
                SubmitOutcome::Ready(out)
            }
            SubmitOutcome::Busy => SubmitOutcome::Busy,
            SubmitOutcome::Invalid(e) => SubmitOutcome::Invalid(e),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Address, Geo};

    fn stored_user() -> User {
        User::new(
            "u1",
            UserData {
                name: "Ann".into(),
                email: "ann@x.com".into(),
                phone: "1234567890".into(),
                company: "Acme".into(),
                address: Address {
                    street: "Main".into(),
                    city: "Town".into(),
                    zipcode: "12345".into(),
                    geo: Geo {
                        lat: "1.5".into(),
                        lng: "2".into(),
                    },
                },
            },
        )
    }

    #[test]
    fn nested_setters_reach_the_right_field() {
        let mut d = UserDraft::default();
        d.set(FieldKey::Address(AddressField::Geo(GeoField::Lng)), "9.9");
        d.address.set(AddressField::City, "Oslo");
        assert_eq!(d.address.geo.lng, "9.9");
        assert_eq!(FieldKey::Address(AddressField::City).get(&d), "Oslo");
        assert_eq!(FieldKey::Address(AddressField::Geo(GeoField::Lng)).path(), "address.geo.lng");
    }

    #[test]
    fn edit_form_starts_from_the_record() {
        let form = UserForm::edit(&stored_user());
        assert_eq!(form.mode(), &FormMode::Edit { id: "u1".into() });
        assert_eq!(form.draft().address.zipcode, "12345");
    }

    #[test]
    fn typing_edits_the_focused_field_only() {
        let mut form = UserForm::create();
        form.focus_next();
        for c in "a@b.co".chars() {
            form.insert_char(c);
        }
        form.backspace();
        assert_eq!(form.draft().email, "a@b.c");
        assert!(form.draft().name.is_empty());
    }

    #[test]
    fn focus_wraps_through_submit_row() {
        let mut form = UserForm::create();
        form.focus_prev();
        assert!(form.on_submit_row());
        assert_eq!(form.focused_field(), None);
        form.insert_char('x');
        form.focus_next();
        assert_eq!(form.focused_field(), Some(FieldKey::Name));
        assert!(form.draft().name.is_empty());
    }

    #[test]
    fn invalid_submit_records_errors_and_stays_enabled() {
        let mut form = UserForm::create();
        form.set(FieldKey::Name, "Ann");
        let SubmitOutcome::Invalid(errs) = form.begin_submit() else {
            panic!("expected validation failure");
        };
        assert!(errs.get(FieldKey::Name).is_none());
        assert_eq!(form.error_for(FieldKey::Email), Some("Email is required"));
        assert!(!form.submitting());
    }

    #[test]
    fn valid_submit_locks_until_settled() {
        let mut form = UserForm::edit(&stored_user());
        assert!(matches!(form.begin_submit(), SubmitOutcome::Ready(_)));
        assert!(form.submitting());
        assert_eq!(form.begin_submit(), SubmitOutcome::Busy);
        form.settle();
        assert!(matches!(form.begin_submit(), SubmitOutcome::Ready(_)));
    }

    #[tokio::test]
    async fn submit_with_runs_handler_and_reenables() {
        let mut form = UserForm::edit(&stored_user());
        let out = form
            .submit_with(|data| async move { data.name.clone() })
            .await;
        assert_eq!(out, SubmitOutcome::Ready("Ann".to_string()));
        assert!(!form.submitting());
    }

    #[tokio::test]
    async fn submit_with_skips_handler_on_invalid_draft() {
        let mut form = UserForm::create();
        let mut called = false;
        let out = form
            .submit_with(|_| {
                called = true;
                async {}
            })
            .await;
        assert!(matches!(out, SubmitOutcome::Invalid(_)));
        assert!(!called);
    }
}
