//! Sales leads

use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use spraycoat_types::Error;

/// How the lead first got in touch
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum InquiryMethod {
    #[default]
    Phone,
    Email,
    Referral,
    WebForm,
    Sms,
}

impl InquiryMethod {
    pub fn label(&self) -> &'static str {
        match self {
            InquiryMethod::Phone => "Phone",
            InquiryMethod::Email => "Email",
            InquiryMethod::Referral => "Referral",
            InquiryMethod::WebForm => "Web Form",
            InquiryMethod::Sms => "SMS",
        }
    }
}

impl FromStr for InquiryMethod {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| !matches!(c, ' ' | '-' | '_'))
            .collect::<String>()
            .to_lowercase();
        match normalized.as_str() {
            "phone" => Ok(InquiryMethod::Phone),
            "email" => Ok(InquiryMethod::Email),
            "referral" => Ok(InquiryMethod::Referral),
            "webform" | "web" => Ok(InquiryMethod::WebForm),
            "sms" | "text" => Ok(InquiryMethod::Sms),
            _ => Err(Error::validation(
                "inquiryMethod",
                format!("unknown inquiry method '{}'", s),
            )),
        }
    }
}

impl std::fmt::Display for InquiryMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Lead {
    pub id: String,
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub inquiry_method: InquiryMethod,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

impl Lead {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }

    /// Case-insensitive containment on "first last"
    pub fn matches(&self, term: &str) -> bool {
        self.full_name()
            .to_lowercase()
            .contains(&term.to_lowercase())
    }
}

/// Fields required to create a lead
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewLead {
    pub first_name: String,
    pub last_name: String,
    pub phone: String,
    pub email: String,
    #[serde(default)]
    pub inquiry_method: InquiryMethod,
}

impl NewLead {
    pub fn validate(&self) -> Result<(), Error> {
        require_non_empty("firstName", &self.first_name)?;
        require_non_empty("lastName", &self.last_name)?;
        validate_phone(&self.phone)?;
        validate_email(&self.email)?;
        Ok(())
    }
}

/// Partial lead update; `None` fields are left untouched
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeadUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub inquiry_method: Option<InquiryMethod>,
}

impl LeadUpdate {
    pub fn is_empty(&self) -> bool {
        self == &LeadUpdate::default()
    }

    pub fn validate(&self) -> Result<(), Error> {
        if let Some(ref first) = self.first_name {
            require_non_empty("firstName", first)?;
        }
        if let Some(ref last) = self.last_name {
            require_non_empty("lastName", last)?;
        }
        if let Some(ref phone) = self.phone {
            validate_phone(phone)?;
        }
        if let Some(ref email) = self.email {
            validate_email(email)?;
        }
        Ok(())
    }
}

fn require_non_empty(field: &str, value: &str) -> Result<(), Error> {
    if value.trim().is_empty() {
        return Err(Error::validation(field, "required"));
    }
    Ok(())
}

fn validate_phone(phone: &str) -> Result<(), Error> {
    if phone.trim().chars().count() < 6 {
        return Err(Error::validation("phone", "enter a valid number"));
    }
    Ok(())
}

fn validate_email(email: &str) -> Result<(), Error> {
    let valid = match email.trim().split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && domain.contains('.')
                && !domain.starts_with('.')
                && !domain.ends_with('.')
                && !domain.contains('@')
        }
        None => false,
    };
    if !valid {
        return Err(Error::validation("email", "enter a valid email"));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_lead() -> NewLead {
        NewLead {
            first_name: "Dana".to_string(),
            last_name: "Whitlock".to_string(),
            phone: "0400 123 456".to_string(),
            email: "dana@example.com".to_string(),
            inquiry_method: InquiryMethod::Referral,
        }
    }

    #[test]
    fn test_valid_lead() {
        assert!(new_lead().validate().is_ok());
    }

    #[test]
    fn test_invalid_fields() {
        let mut lead = new_lead();
        lead.first_name = "  ".to_string();
        assert!(lead.validate().is_err());

        let mut lead = new_lead();
        lead.phone = "123".to_string();
        assert!(lead.validate().is_err());

        let mut lead = new_lead();
        lead.email = "dana.example.com".to_string();
        assert!(lead.validate().is_err());

        let mut lead = new_lead();
        lead.email = "dana@localhost".to_string();
        assert!(lead.validate().is_err());
    }

    #[test]
    fn test_inquiry_method_parse() {
        assert_eq!("Phone".parse::<InquiryMethod>().unwrap(), InquiryMethod::Phone);
        assert_eq!("web form".parse::<InquiryMethod>().unwrap(), InquiryMethod::WebForm);
        assert_eq!("SMS".parse::<InquiryMethod>().unwrap(), InquiryMethod::Sms);
        assert!("carrier pigeon".parse::<InquiryMethod>().is_err());
    }

    #[test]
    fn test_lead_matches_full_name() {
        let lead = Lead {
            id: "l1".to_string(),
            first_name: "Dana".to_string(),
            last_name: "Whitlock".to_string(),
            phone: String::new(),
            email: String::new(),
            inquiry_method: InquiryMethod::Phone,
            created_at: None,
        };
        assert!(lead.matches("dana w"));
        assert!(lead.matches("LOCK"));
        assert!(!lead.matches("smith"));
    }

    #[test]
    fn test_update_serializes_only_set_fields() {
        let update = LeadUpdate {
            phone: Some("0400 999 999".to_string()),
            ..Default::default()
        };
        let value = serde_json::to_value(&update).unwrap();
        assert_eq!(value.as_object().unwrap().len(), 1);
        assert_eq!(value["phone"], "0400 999 999");
        assert!(!update.is_empty());
        assert!(LeadUpdate::default().is_empty());
    }
}
