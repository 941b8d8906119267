//! Client and account-executive forms, checked before anything is sent.

use common::{CreateClientRequest, CreateExecutiveRequest};
use serde::{Deserialize, Serialize};
use tracing::debug;
use validator::Validate;

use crate::error::ValidationError;

/// Runs the derived validator and collects the offending field names, sorted.
fn check<T: Validate>(form: &T) -> Result<(), ValidationError> {
    form.validate().map_err(|errors| {
        let mut fields: Vec<String> = errors.errors().keys().map(|k| k.to_string()).collect();
        fields.sort();
        debug!(?fields, "Form rejected");
        ValidationError::InvalidFields { fields }
    })
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ClientForm {
    #[validate(length(min = 1))]
    pub client_name: String,
    #[validate(length(min = 1))]
    pub industry: String,
    #[validate(length(min = 1))]
    pub location: String,
    #[validate(email)]
    pub email: String,
}

impl ClientForm {
    pub fn check(&self) -> Result<(), ValidationError> {
        check(&self.trimmed())
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Validated, trimmed payload for `POST /clients/clients`.
    pub fn into_request(self) -> Result<CreateClientRequest, ValidationError> {
        let form = self.trimmed();
        check(&form)?;
        Ok(CreateClientRequest {
            client_name: form.client_name,
            industry: form.industry,
            location: form.location,
            email: form.email,
        })
    }

    fn trimmed(&self) -> Self {
        Self {
            client_name: self.client_name.trim().to_string(),
            industry: self.industry.trim().to_string(),
            location: self.location.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct ExecutiveForm {
    #[validate(length(min = 1))]
    pub first_name: String,
    #[validate(length(min = 1))]
    pub last_name: String,
    #[validate(email)]
    pub email: String,
}

impl ExecutiveForm {
    pub fn check(&self) -> Result<(), ValidationError> {
        check(&self.trimmed())
    }

    pub fn is_valid(&self) -> bool {
        self.check().is_ok()
    }

    /// Validated, trimmed payload for `POST /executives/account-executives`.
    pub fn into_request(self) -> Result<CreateExecutiveRequest, ValidationError> {
        let form = self.trimmed();
        check(&form)?;
        Ok(CreateExecutiveRequest {
            first_name: form.first_name,
            last_name: form.last_name,
            email: form.email,
        })
    }

    fn trimmed(&self) -> Self {
        Self {
            first_name: self.first_name.trim().to_string(),
            last_name: self.last_name.trim().to_string(),
            email: self.email.trim().to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_executive_form_lists_every_field() {
        let err = ExecutiveForm::default().check().unwrap_err();
        assert_eq!(err.fields(), ["email", "first_name", "last_name"]);
    }

    #[test]
    fn test_executive_email_format() {
        let form = ExecutiveForm {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            email: "not-an-email".to_string(),
        };
        assert_eq!(form.check().unwrap_err().fields(), ["email"]);

        let form = ExecutiveForm {
            email: " ada@example.com ".to_string(),
            ..form
        };
        let request = form.into_request().unwrap();
        assert_eq!(request.email, "ada@example.com");
    }

    #[test]
    fn test_blank_client_fields_are_rejected() {
        let form = ClientForm {
            client_name: "   ".to_string(),
            industry: "Retail".to_string(),
            location: "Ontario".to_string(),
            email: "ops@acme.test".to_string(),
        };
        assert!(!form.is_valid());
        assert_eq!(form.clone().into_request().unwrap_err().fields(), ["client_name"]);

        let form = ClientForm {
            client_name: "Acme Corp".to_string(),
            ..form
        };
        let request = form.into_request().unwrap();
        assert_eq!(request.client_name, "Acme Corp");
        assert_eq!(request.location, "Ontario");
    }
}
