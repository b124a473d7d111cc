use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ApiError;
use crate::extract::Validate;

pub const MAX_LIBRARIAN_MESSAGE_CHARS: usize = 2000;

// local@domain, both parts non-empty, no whitespace
fn is_email(value: &str) -> bool {
    let value = value.trim();
    match value.split_once('@') {
        Some((local, domain)) => {
            !local.is_empty()
                && !domain.is_empty()
                && !domain.contains('@')
                && !value.contains(char::is_whitespace)
        }
        None => false,
    }
}

fn require_email(value: &str) -> Result<(), ApiError> {
    if is_email(value) {
        Ok(())
    } else {
        Err(ApiError::Validation("A valid email address is required".to_string()))
    }
}

// Newsletter signup
#[derive(Deserialize, Debug, Clone)]
pub struct NewsletterSubscribeRequest {
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub signup_source: Option<String>,
    #[serde(default)]
    pub utm_source: Option<String>,
    #[serde(default)]
    pub utm_medium: Option<String>,
    #[serde(default)]
    pub utm_campaign: Option<String>,
}

impl Validate for NewsletterSubscribeRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_email(&self.email)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct NewsletterSubscribeResponse {
    pub success: bool,
    pub message: String,
}

// Affiliate link click
#[derive(Deserialize, Debug, Clone)]
pub struct ClickTrackRequest {
    pub book_id: i64,
    pub source_name: String,
    #[serde(default)]
    pub link_id: Option<i64>,
    #[serde(default)]
    pub referrer: Option<String>,
}

impl Validate for ClickTrackRequest {
    fn validate(&self) -> Result<(), ApiError> {
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ClickTrackResponse {
    pub success: bool,
}

#[derive(Deserialize, Debug, Clone)]
pub struct MagicLinkRequest {
    pub email: String,
}

impl Validate for MagicLinkRequest {
    fn validate(&self) -> Result<(), ApiError> {
        require_email(&self.email)
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct MagicLinkResponse {
    pub message: String,
}

// Librarian chat
#[derive(Deserialize, Debug, Clone)]
pub struct LibrarianRequest {
    pub message: String,
    #[serde(default)]
    pub context: Option<Value>, // free-form family context, e.g. ages and interests
}

impl Validate for LibrarianRequest {
    fn validate(&self) -> Result<(), ApiError> {
        if self.message.trim().is_empty() {
            return Err(ApiError::Validation("Message must not be empty".to_string()));
        }
        if self.message.chars().count() > MAX_LIBRARIAN_MESSAGE_CHARS {
            return Err(ApiError::Validation(format!(
                "Message must be at most {MAX_LIBRARIAN_MESSAGE_CHARS} characters"
            )));
        }
        Ok(())
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct LibrarianResponse {
    pub reply: String,
    pub remaining_today: Option<u32>, // None for premium callers
}
