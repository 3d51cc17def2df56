//! Form bodies and query parameters of the web front-end.

use serde::Deserialize;
use serde_with::{NoneAsEmptyString, serde_as};
use validator::{Validate, ValidationErrors};

use crate::domain::entities::{Credentials, LeadStatus};
use crate::domain::query::{ListQuery, SortKey};

/// `POST /login` body.
#[derive(Debug, Deserialize, Validate)]
pub struct LoginForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,
}

impl LoginForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), &self.password)
    }
}

/// `POST /register` body.
///
/// The confirmation is compared by the auth service, not here, so a
/// mismatch is reported the same way from every front-end.
#[derive(Debug, Deserialize, Validate)]
pub struct RegisterForm {
    #[validate(email(message = "Please enter a valid email address"))]
    pub email: String,

    #[validate(length(min = 1, message = "Password is required"))]
    pub password: String,

    #[serde(default)]
    pub confirm_password: String,
}

impl RegisterForm {
    pub fn credentials(&self) -> Credentials {
        Credentials::new(self.email.trim(), &self.password)
    }
}

/// First validation message, looked up in field order.
pub fn first_message(errors: &ValidationErrors, fields: &[&str]) -> String {
    let by_field = errors.field_errors();
    fields
        .iter()
        .filter_map(|field| by_field.get(*field))
        .flat_map(|errs| errs.iter())
        .find_map(|err| err.message.as_ref().map(|m| m.to_string()))
        .unwrap_or_else(|| "Please check the form".to_string())
}

/// `GET /` query parameters.
///
/// Empty values (as submitted by the filter form) count as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct DashboardParams {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub page: Option<u32>,

    #[serde(default)]
    pub search: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub status: Option<String>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub sort: Option<String>,
}

impl DashboardParams {
    /// Builds the list query; the page is applied last so it survives the
    /// filter setters' reset to page 1.
    pub fn into_query(self) -> ListQuery {
        let query = ListQuery::new()
            .with_search(self.search.unwrap_or_default().trim())
            .with_status(self.status.as_deref().map(LeadStatus::from))
            .with_sort(self.sort.as_deref().map(SortKey::parse).unwrap_or_default());

        match self.page {
            Some(page) => query.with_page(page),
            None => query,
        }
    }
}
