use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use uuid::Uuid;

/// Social platform a prompt refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Platform {
    TikTok,
    Instagram,
    YouTube,
    Reddit,
    Pinterest,
    Facebook,
    X,
}

impl Platform {
    pub fn as_str(&self) -> &'static str {
        match self {
            Platform::TikTok => "TikTok",
            Platform::Instagram => "Instagram",
            Platform::YouTube => "YouTube",
            Platform::Reddit => "Reddit",
            Platform::Pinterest => "Pinterest",
            Platform::Facebook => "Facebook",
            Platform::X => "X",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Platform {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "tiktok" => Ok(Platform::TikTok),
            "instagram" => Ok(Platform::Instagram),
            "youtube" => Ok(Platform::YouTube),
            "reddit" => Ok(Platform::Reddit),
            "pinterest" => Ok(Platform::Pinterest),
            "facebook" => Ok(Platform::Facebook),
            "x" | "twitter" => Ok(Platform::X),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

/// Coarse display-mode tag. Carries no structural meaning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LayoutType {
    Carousel,
    Grid,
    Timeline,
    Moodboard,
    Storyboard,
    Gallery,
    Stacked,
}

impl LayoutType {
    pub fn as_str(&self) -> &'static str {
        match self {
            LayoutType::Carousel => "carousel",
            LayoutType::Grid => "grid",
            LayoutType::Timeline => "timeline",
            LayoutType::Moodboard => "moodboard",
            LayoutType::Storyboard => "storyboard",
            LayoutType::Gallery => "gallery",
            LayoutType::Stacked => "stacked",
        }
    }
}

impl fmt::Display for LayoutType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LayoutType {
    type Err = UnknownVariant;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "carousel" => Ok(LayoutType::Carousel),
            "grid" => Ok(LayoutType::Grid),
            "timeline" => Ok(LayoutType::Timeline),
            "moodboard" => Ok(LayoutType::Moodboard),
            "storyboard" => Ok(LayoutType::Storyboard),
            "gallery" => Ok(LayoutType::Gallery),
            "stacked" => Ok(LayoutType::Stacked),
            _ => Err(UnknownVariant(s.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown variant '{0}'")]
pub struct UnknownVariant(pub String);

/// A stored prompt. `id` and `created_at` are assigned by the store on insert
/// and never change afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    pub id: Uuid,
    pub text: String,
    #[serde(default, deserialize_with = "lenient_platform")]
    pub platform: Option<Platform>,
    pub content_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "lenient_layout")]
    pub layout_type: Option<LayoutType>,
    pub created_at: DateTime<Utc>,
}

/// Insert payload: everything the store does not assign itself.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NewPrompt {
    pub text: String,
    pub platform: Option<Platform>,
    pub content_date: Option<NaiveDate>,
    pub layout_type: Option<LayoutType>,
}

// Rows written by older clients may carry values outside the current enums.
fn lenient_platform<'de, D>(deserializer: D) -> Result<Option<Platform>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}

fn lenient_layout<'de, D>(deserializer: D) -> Result<Option<LayoutType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    Ok(raw.and_then(|s| s.parse().ok()))
}
