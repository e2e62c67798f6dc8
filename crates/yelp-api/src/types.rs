//! Yelp Fusion API response types.
//!
//! Records are decoded straight from JSON and never mutated afterwards.
//! Every optional field is defaulted so partially populated payloads
//! still decode; unknown fields are ignored.

use serde::{Deserialize, Deserializer, Serialize};

// ---------------------------------------------------------------------------
// Shared records
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Category {
    pub alias: String,
    pub title: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct Coordinates {
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, Serialize)]
pub struct Location {
    #[serde(default)]
    pub address1: Option<String>,
    #[serde(default)]
    pub address2: Option<String>,
    #[serde(default)]
    pub address3: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub display_address: Vec<String>,
    #[serde(default)]
    pub cross_streets: Option<String>,
}

// ---------------------------------------------------------------------------
// businesses/search
// ---------------------------------------------------------------------------

/// A business as returned by `GET /businesses/search`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Business {
    /// Empty when the API omits the id or sends `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_closed: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub transactions: Vec<String>,
    /// Price tier as dollar signs, e.g. `"$$"`.
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub display_phone: Option<String>,
    /// Meters from the search location.
    #[serde(default)]
    pub distance: Option<f64>,
}

/// Envelope for `GET /businesses/search`.
#[derive(Debug, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub businesses: Option<Vec<Business>>,
}

// ---------------------------------------------------------------------------
// businesses/{id}
// ---------------------------------------------------------------------------

/// Full record from `GET /businesses/{id}`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct BusinessDetails {
    /// Empty when the API omits the id or sends `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub is_claimed: Option<bool>,
    #[serde(default)]
    pub is_closed: Option<bool>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub display_phone: Option<String>,
    #[serde(default)]
    pub review_count: Option<u32>,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub location: Option<Location>,
    #[serde(default)]
    pub coordinates: Option<Coordinates>,
    #[serde(default)]
    pub photos: Vec<String>,
    #[serde(default)]
    pub price: Option<String>,
    #[serde(default)]
    pub hours: Vec<Hours>,
    #[serde(default)]
    pub transactions: Vec<String>,
}

/// Opening schedule block. `hours_type` is usually `"REGULAR"`.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Hours {
    #[serde(default)]
    pub hours_type: Option<String>,
    #[serde(default)]
    pub is_open_now: Option<bool>,
    #[serde(default)]
    pub open: Vec<OpenPeriod>,
}

/// One opening window. `day` is 0 (Monday) through 6 (Sunday); `start` and
/// `end` are 24-hour `"HHMM"` strings.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct OpenPeriod {
    pub day: u8,
    pub start: String,
    pub end: String,
    #[serde(default)]
    pub is_overnight: bool,
}

// ---------------------------------------------------------------------------
// businesses/{id}/reviews
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Review {
    /// Empty when the API omits the id or sends `null`.
    #[serde(default, deserialize_with = "null_as_empty")]
    pub id: String,
    #[serde(default)]
    pub rating: Option<f64>,
    #[serde(default)]
    pub user: Option<User>,
    #[serde(default)]
    pub text: Option<String>,
    /// `"YYYY-MM-DD HH:MM:SS"` in the business's local time.
    #[serde(default)]
    pub time_created: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct User {
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub profile_url: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Envelope for `GET /businesses/{id}/reviews`.
#[derive(Debug, Deserialize)]
pub struct ReviewsResponse {
    #[serde(default)]
    pub total: u64,
    #[serde(default)]
    pub reviews: Option<Vec<Review>>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}
