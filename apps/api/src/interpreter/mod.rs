//! Prompt Interpreter — derives platform, content date and layout hint from free text.
//!
//! Pure and deterministic: the caller supplies `today`, no I/O happens here.
//! The three detections are independent of each other.

pub mod date;
pub mod layout;
pub mod platform;

use chrono::NaiveDate;
use serde::Serialize;

use crate::models::prompt::{LayoutType, NewPrompt, Platform};

pub use platform::TokenMatching;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Interpretation {
    pub platform: Option<Platform>,
    pub content_date: Option<NaiveDate>,
    pub layout_type: Option<LayoutType>,
}

pub fn interpret(text: &str, today: NaiveDate, matching: TokenMatching) -> Interpretation {
    Interpretation {
        platform: platform::detect_platform(text, matching),
        content_date: date::detect_content_date(text, today),
        layout_type: layout::detect_layout(text),
    }
}

impl Interpretation {
    pub fn into_new_prompt(self, text: String) -> NewPrompt {
        NewPrompt {
            text,
            platform: self.platform,
            content_date: self.content_date,
            layout_type: self.layout_type,
        }
    }
}
