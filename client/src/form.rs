//! Form state holder: values, touched flags, and current validation errors.
//!
//! DESIGN
//! ======
//! Errors are recomputed on every change and blur, but only surfaced for
//! fields the user has touched. A field becomes touched on its first change
//! or blur and never earlier, so a fresh form shows nothing even though it
//! already knows it is invalid.
//!
//! Raw input is kept for display; validation and submission both see the
//! normalized record, so what was checked is what gets sent.

#[cfg(test)]
#[path = "form_test.rs"]
mod form_test;

use std::collections::BTreeSet;
use std::fmt::Debug;

use crate::net::types::{Credentials, Registration};
use crate::validate::{
    FieldErrors, LoginField, SignupField, ValidationPolicy, validate_credentials, validate_registration,
};

/// A record a [`FormState`] can edit and validate.
pub trait FormRecord: Clone {
    type Field: Copy + Ord + Debug + 'static;

    /// Overwrite one field's value.
    fn set(&mut self, field: Self::Field, value: String);

    /// Current value of one field.
    fn value(&self, field: Self::Field) -> &str;

    /// The record as it is submitted: free-text fields trimmed.
    fn normalized(&self) -> Self;

    /// Run the validator for this record type.
    fn validate(&self, policy: &ValidationPolicy) -> FieldErrors<Self::Field>;
}

impl FormRecord for Credentials {
    type Field = LoginField;

    fn set(&mut self, field: LoginField, value: String) {
        match field {
            LoginField::Email => self.email = value,
            LoginField::Password => self.password = value,
        }
    }

    fn value(&self, field: LoginField) -> &str {
        match field {
            LoginField::Email => &self.email,
            LoginField::Password => &self.password,
        }
    }

    fn normalized(&self) -> Self {
        Credentials::normalized(self)
    }

    fn validate(&self, policy: &ValidationPolicy) -> FieldErrors<LoginField> {
        validate_credentials(self, policy)
    }
}

impl FormRecord for Registration {
    type Field = SignupField;

    fn set(&mut self, field: SignupField, value: String) {
        match field {
            SignupField::Name => self.name = value,
            SignupField::Email => self.email = value,
            SignupField::PhoneNumber => self.phone_number = value,
            SignupField::Password => self.password = value,
        }
    }

    fn value(&self, field: SignupField) -> &str {
        match field {
            SignupField::Name => &self.name,
            SignupField::Email => &self.email,
            SignupField::PhoneNumber => &self.phone_number,
            SignupField::Password => &self.password,
        }
    }

    fn normalized(&self) -> Self {
        Registration::normalized(self)
    }

    fn validate(&self, policy: &ValidationPolicy) -> FieldErrors<SignupField> {
        validate_registration(self, policy)
    }
}

/// Editable form over a [`FormRecord`].
#[derive(Clone, Debug)]
pub struct FormState<R: FormRecord> {
    initial: R,
    values: R,
    touched: BTreeSet<R::Field>,
    errors: FieldErrors<R::Field>,
    policy: ValidationPolicy,
}

/// Login form state.
pub type LoginForm = FormState<Credentials>;
/// Signup form state.
pub type SignupForm = FormState<Registration>;

impl<R: FormRecord> FormState<R> {
    /// Start a form from `initial` values. Errors are computed immediately;
    /// nothing is touched.
    #[must_use]
    pub fn new(initial: R, policy: ValidationPolicy) -> Self {
        let errors = initial.normalized().validate(&policy);
        Self { values: initial.clone(), initial, touched: BTreeSet::new(), errors, policy }
    }

    /// Update a value and mark the field touched.
    pub fn set_field(&mut self, field: R::Field, value: impl Into<String>) {
        self.values.set(field, value.into());
        self.touched.insert(field);
        self.revalidate();
    }

    /// Mark a field touched without changing its value.
    pub fn blur(&mut self, field: R::Field) {
        self.touched.insert(field);
        self.revalidate();
    }

    /// The field's error, only once the field has been touched.
    #[must_use]
    pub fn display_error(&self, field: R::Field) -> Option<&str> {
        if !self.touched.contains(&field) {
            return None;
        }
        self.errors.get(&field).map(String::as_str)
    }

    #[must_use]
    pub fn is_touched(&self, field: R::Field) -> bool {
        self.touched.contains(&field)
    }

    #[must_use]
    pub fn value(&self, field: R::Field) -> &str {
        self.values.value(field)
    }

    #[must_use]
    pub fn values(&self) -> &R {
        &self.values
    }

    /// All current errors, touched or not.
    #[must_use]
    pub fn errors(&self) -> &FieldErrors<R::Field> {
        &self.errors
    }

    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }

    /// The normalized record to submit, or the errors blocking submission.
    ///
    /// # Errors
    ///
    /// Returns the current error map when any field is invalid.
    pub fn try_submit(&self) -> Result<R, FieldErrors<R::Field>> {
        if self.errors.is_empty() { Ok(self.values.normalized()) } else { Err(self.errors.clone()) }
    }

    /// Back to the initial values with nothing touched.
    pub fn reset(&mut self) {
        self.values = self.initial.clone();
        self.touched.clear();
        self.revalidate();
    }

    fn revalidate(&mut self) {
        self.errors = self.values.normalized().validate(&self.policy);
    }
}

impl LoginForm {
    #[must_use]
    pub fn login(policy: ValidationPolicy) -> Self {
        Self::new(Credentials::default(), policy)
    }
}

impl SignupForm {
    /// Empty signup form with the phone prefilled from the policy's country code.
    #[must_use]
    pub fn signup(policy: ValidationPolicy) -> Self {
        let initial = Registration::with_country_code(&policy.default_country_code);
        Self::new(initial, policy)
    }
}
