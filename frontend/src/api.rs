use gloo_net::http::Request;
use serde::Serialize;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("could not encode request: {0}")]
    Encode(String),
    #[error("could not reach the server: {0}")]
    Network(String),
    #[error("server responded with status {0}")]
    Status(u16),
}

impl ApiError {
    /// Text shown inline under the form. The user retries by resubmitting.
    pub fn user_message(&self) -> &'static str {
        match self {
            ApiError::Encode(_) => "Something went wrong preparing your request.",
            ApiError::Network(_) => "We couldn't reach our server. Check your connection and try again.",
            ApiError::Status(status) if *status >= 500 => {
                "Our server had a problem. Please try again in a moment."
            }
            ApiError::Status(_) => "We couldn't accept that submission. Please check the form and try again.",
        }
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct SubscribeRequest {
    pub email: String,
    pub source: String,
}

#[derive(Serialize, Debug, Clone, PartialEq, Default)]
pub struct QuoteRequest {
    pub name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub company: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<String>,
    pub message: String,
}

impl QuoteRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.name.trim().is_empty() {
            return Err("Please tell us your name");
        }
        if !is_valid_email(&self.email) {
            return Err("Please enter a valid email address");
        }
        if self.message.trim().is_empty() {
            return Err("Please describe your project");
        }
        Ok(())
    }
}

#[derive(Serialize, Debug, Clone, PartialEq)]
pub struct LoginLinkRequest {
    pub email: String,
}

impl LoginLinkRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if is_valid_email(&self.email) {
            Ok(())
        } else {
            Err("Please enter a valid email address")
        }
    }
}

/// Shape check only; the mail provider does the real verification.
pub fn is_valid_email(email: &str) -> bool {
    let email = email.trim();
    let Some((local, domain)) = email.split_once('@') else {
        return false;
    };
    !local.is_empty()
        && !domain.contains('@')
        && !email.contains(char::is_whitespace)
        && domain
            .split_once('.')
            .map_or(false, |(host, tld)| !host.is_empty() && !tld.is_empty() && !tld.ends_with('.'))
}

/// Turns blank optional form fields into None.
pub fn non_empty(value: &str) -> Option<String> {
    let value = value.trim();
    (!value.is_empty()).then(|| value.to_string())
}

async fn post_json<T: Serialize>(path: &str, body: &T) -> Result<(), ApiError> {
    let response = Request::post(&format!("{}{}", config::get_backend_url(), path))
        .json(body)
        .map_err(|e| ApiError::Encode(e.to_string()))?
        .send()
        .await
        .map_err(|e| ApiError::Network(e.to_string()))?;

    if response.ok() {
        Ok(())
    } else {
        Err(ApiError::Status(response.status()))
    }
}

pub async fn subscribe(request: &SubscribeRequest) -> Result<(), ApiError> {
    post_json("/api/subscribe", request).await
}

pub async fn request_quote(request: &QuoteRequest) -> Result<(), ApiError> {
    post_json("/api/quote", request).await
}

pub async fn request_login_link(request: &LoginLinkRequest) -> Result<(), ApiError> {
    post_json("/api/auth/login-link", request).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn email_shapes() {
        assert!(is_valid_email("ada@example.com"));
        assert!(is_valid_email("  ada.l@mail.example.co.uk "));
        assert!(!is_valid_email("ada"));
        assert!(!is_valid_email("@example.com"));
        assert!(!is_valid_email("ada@example"));
        assert!(!is_valid_email("ada@.com"));
        assert!(!is_valid_email("ada@@example.com"));
        assert!(!is_valid_email("a da@example.com"));
    }

    #[test]
    fn quote_validation_reports_first_problem() {
        let mut quote = QuoteRequest {
            name: " ".to_string(),
            email: "nope".to_string(),
            message: String::new(),
            ..Default::default()
        };
        assert_eq!(quote.validate(), Err("Please tell us your name"));
        quote.name = "Ada".to_string();
        assert_eq!(quote.validate(), Err("Please enter a valid email address"));
        quote.email = "ada@example.com".to_string();
        assert_eq!(quote.validate(), Err("Please describe your project"));
        quote.message = "A booking site".to_string();
        assert_eq!(quote.validate(), Ok(()));
    }

    #[test]
    fn login_link_needs_an_email() {
        let request = LoginLinkRequest { email: "client".to_string() };
        assert_eq!(request.validate(), Err("Please enter a valid email address"));
        let request = LoginLinkRequest { email: "client@example.com".to_string() };
        assert_eq!(request.validate(), Ok(()));
        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json, serde_json::json!({ "email": "client@example.com" }));
    }

    #[test]
    fn optional_fields_are_omitted_when_blank() {
        let quote = QuoteRequest {
            name: "Ada".to_string(),
            email: "ada@example.com".to_string(),
            company: non_empty("   "),
            plan: non_empty(" Growth "),
            message: "Hi".to_string(),
            ..Default::default()
        };
        let json = serde_json::to_value(&quote).unwrap();
        assert_eq!(json["plan"], "Growth");
        assert!(json.get("company").is_none());
        assert!(json.get("budget").is_none());
    }

    #[test]
    fn server_errors_get_retry_message() {
        assert_eq!(
            ApiError::Status(502).user_message(),
            "Our server had a problem. Please try again in a moment."
        );
        assert_ne!(ApiError::Status(422).user_message(), ApiError::Status(502).user_message());
    }
}
