//! Business search request parameters.
//!
//! Every field is an `Option` so "not set" is distinct from "set to a falsy
//! value": `open_now(false)` is sent as `open_now=false`, while an unset
//! `open_now` is omitted entirely.

use serde::Serialize;

use crate::error::YelpError;

/// Upper bound the API accepts for `limit`.
pub const MAX_LIMIT: u32 = 50;
/// Upper bound the API accepts for `radius`, in meters.
pub const MAX_RADIUS_METERS: u32 = 40_000;

/// Result ordering for a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SortBy {
    BestMatch,
    Rating,
    ReviewCount,
    Distance,
}

impl SortBy {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            SortBy::BestMatch => "best_match",
            SortBy::Rating => "rating",
            SortBy::ReviewCount => "review_count",
            SortBy::Distance => "distance",
        }
    }
}

impl std::fmt::Display for SortBy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for SortBy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "best_match" => Ok(SortBy::BestMatch),
            "rating" => Ok(SortBy::Rating),
            "review_count" => Ok(SortBy::ReviewCount),
            "distance" => Ok(SortBy::Distance),
            other => Err(format!(
                "unknown sort key \"{other}\" (expected best_match, rating, review_count, distance)"
            )),
        }
    }
}

/// Parameters for `GET /businesses/search`.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct SearchRequest {
    pub term: Option<String>,
    pub location: Option<String>,
    pub latitude: Option<f64>,
    pub longitude: Option<f64>,
    pub radius: Option<u32>,
    /// Comma-separated category aliases, e.g. `"bars,french"`.
    pub categories: Option<String>,
    pub locale: Option<String>,
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub sort_by: Option<SortBy>,
    /// Price tiers 1 (`$`) through 4 (`$$$$`).
    pub price: Option<Vec<u8>>,
    pub open_now: Option<bool>,
    /// Unix timestamp; mutually exclusive with `open_now`.
    pub open_at: Option<i64>,
    /// Comma-separated attribute filters, e.g. `"hot_and_new,deals"`.
    pub attributes: Option<String>,
}

impl SearchRequest {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn term(mut self, term: impl Into<String>) -> Self {
        self.term = Some(term.into());
        self
    }

    #[must_use]
    pub fn location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    #[must_use]
    pub fn coordinates(mut self, latitude: f64, longitude: f64) -> Self {
        self.latitude = Some(latitude);
        self.longitude = Some(longitude);
        self
    }

    #[must_use]
    pub fn radius(mut self, meters: u32) -> Self {
        self.radius = Some(meters);
        self
    }

    #[must_use]
    pub fn categories(mut self, categories: impl Into<String>) -> Self {
        self.categories = Some(categories.into());
        self
    }

    #[must_use]
    pub fn locale(mut self, locale: impl Into<String>) -> Self {
        self.locale = Some(locale.into());
        self
    }

    #[must_use]
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    #[must_use]
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    #[must_use]
    pub fn sort_by(mut self, sort_by: SortBy) -> Self {
        self.sort_by = Some(sort_by);
        self
    }

    #[must_use]
    pub fn price(mut self, tiers: impl IntoIterator<Item = u8>) -> Self {
        self.price = Some(tiers.into_iter().collect());
        self
    }

    #[must_use]
    pub fn open_now(mut self, open_now: bool) -> Self {
        self.open_now = Some(open_now);
        self
    }

    #[must_use]
    pub fn open_at(mut self, unix_secs: i64) -> Self {
        self.open_at = Some(unix_secs);
        self
    }

    #[must_use]
    pub fn attributes(mut self, attributes: impl Into<String>) -> Self {
        self.attributes = Some(attributes.into());
        self
    }

    /// Checks combinations the API would reject.
    ///
    /// # Errors
    ///
    /// Returns [`YelpError::BadArgument`] when only one of latitude/longitude
    /// is set, when `open_now` and `open_at` are both set, when `limit` or
    /// `radius` exceed the API bounds, or when `price` is empty or holds a
    /// tier outside 1..=4.
    pub fn validate(&self) -> Result<(), YelpError> {
        if self.latitude.is_some() != self.longitude.is_some() {
            return Err(YelpError::bad_argument(
                "latitude and longitude must be set together",
            ));
        }
        if let (Some(lat), Some(lon)) = (self.latitude, self.longitude) {
            if !(-90.0..=90.0).contains(&lat) || !(-180.0..=180.0).contains(&lon) {
                return Err(YelpError::bad_argument(format!(
                    "coordinates ({lat}, {lon}) are out of range"
                )));
            }
        }
        if self.open_now.is_some() && self.open_at.is_some() {
            return Err(YelpError::bad_argument(
                "open_now and open_at cannot be combined",
            ));
        }
        if let Some(limit) = self.limit.filter(|l| *l > MAX_LIMIT) {
            return Err(YelpError::bad_argument(format!(
                "limit {limit} exceeds maximum of {MAX_LIMIT}"
            )));
        }
        if let Some(radius) = self.radius.filter(|r| *r > MAX_RADIUS_METERS) {
            return Err(YelpError::bad_argument(format!(
                "radius {radius}m exceeds maximum of {MAX_RADIUS_METERS}m"
            )));
        }
        if let Some(tiers) = &self.price {
            if tiers.is_empty() {
                return Err(YelpError::bad_argument("price must list at least one tier"));
            }
            if let Some(bad) = tiers.iter().find(|t| !(1..=4).contains(*t)) {
                return Err(YelpError::bad_argument(format!(
                    "price tier {bad} is outside 1..=4"
                )));
            }
        }
        Ok(())
    }

    /// Query parameters for the set fields only, in a stable order.
    #[must_use]
    pub fn to_query_pairs(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        let mut push = |key: &'static str, value: Option<String>| {
            if let Some(value) = value {
                pairs.push((key, value));
            }
        };

        push("term", self.term.clone());
        push("location", self.location.clone());
        push("latitude", self.latitude.map(|v| v.to_string()));
        push("longitude", self.longitude.map(|v| v.to_string()));
        push("radius", self.radius.map(|v| v.to_string()));
        push("categories", self.categories.clone());
        push("locale", self.locale.clone());
        push("limit", self.limit.map(|v| v.to_string()));
        push("offset", self.offset.map(|v| v.to_string()));
        push("sort_by", self.sort_by.map(|v| v.as_str().to_string()));
        push(
            "price",
            self.price.as_ref().map(|tiers| {
                tiers
                    .iter()
                    .map(u8::to_string)
                    .collect::<Vec<_>>()
                    .join(",")
            }),
        );
        push("open_now", self.open_now.map(|v| v.to_string()));
        push("open_at", self.open_at.map(|v| v.to_string()));
        push("attributes", self.attributes.clone());

        pairs
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;

    #[test]
    fn empty_request_has_no_pairs() {
        assert!(SearchRequest::new().to_query_pairs().is_empty());
        assert!(SearchRequest::new().validate().is_ok());
    }

    #[test]
    fn falsy_values_are_still_sent() {
        let pairs = SearchRequest::new().open_now(false).offset(0).to_query_pairs();
        assert_eq!(
            pairs,
            vec![("offset", "0".to_string()), ("open_now", "false".to_string())]
        );
    }

    #[test]
    fn all_fields_use_wire_names_in_stable_order() {
        let request = SearchRequest::new()
            .attributes("hot_and_new")
            .open_at(1_700_000_000)
            .price([1, 2])
            .sort_by(SortBy::ReviewCount)
            .offset(10)
            .limit(20)
            .locale("en_US")
            .categories("bars,french")
            .radius(1_000)
            .coordinates(37.78, -122.41)
            .location("San Francisco")
            .term("wine");
        let keys: Vec<&str> = request.to_query_pairs().iter().map(|(k, _)| *k).collect();
        assert_eq!(
            keys,
            vec![
                "term",
                "location",
                "latitude",
                "longitude",
                "radius",
                "categories",
                "locale",
                "limit",
                "offset",
                "sort_by",
                "price",
                "open_at",
                "attributes",
            ]
        );
    }

    #[test]
    fn price_tiers_are_comma_joined() {
        let pairs = SearchRequest::new().price([1, 3, 4]).to_query_pairs();
        assert_eq!(pairs, vec![("price", "1,3,4".to_string())]);
    }

    #[test]
    fn sort_by_round_trips_through_str() {
        for sort in [
            SortBy::BestMatch,
            SortBy::Rating,
            SortBy::ReviewCount,
            SortBy::Distance,
        ] {
            assert_eq!(sort.as_str().parse::<SortBy>().unwrap(), sort);
        }
        assert!("cheapest".parse::<SortBy>().is_err());
    }

    #[test]
    fn lone_latitude_is_rejected() {
        let mut request = SearchRequest::new();
        request.latitude = Some(37.0);
        assert_eq!(request.validate().unwrap_err().kind(), ErrorKind::BadArgument);
    }

    #[test]
    fn out_of_range_coordinates_are_rejected() {
        let request = SearchRequest::new().coordinates(91.0, 0.0);
        assert_eq!(request.validate().unwrap_err().kind(), ErrorKind::BadArgument);
    }

    #[test]
    fn open_now_and_open_at_conflict() {
        let request = SearchRequest::new().open_now(true).open_at(1_700_000_000);
        assert_eq!(request.validate().unwrap_err().kind(), ErrorKind::BadArgument);
    }

    #[test]
    fn limit_and_radius_bounds() {
        assert!(SearchRequest::new().limit(MAX_LIMIT).validate().is_ok());
        assert!(SearchRequest::new().limit(MAX_LIMIT + 1).validate().is_err());
        assert!(SearchRequest::new().radius(MAX_RADIUS_METERS).validate().is_ok());
        assert!(SearchRequest::new()
            .radius(MAX_RADIUS_METERS + 1)
            .validate()
            .is_err());
    }

    #[test]
    fn price_tiers_are_validated() {
        assert!(SearchRequest::new().price([]).validate().is_err());
        assert!(SearchRequest::new().price([0]).validate().is_err());
        assert!(SearchRequest::new().price([2, 5]).validate().is_err());
        assert!(SearchRequest::new().price([1, 2, 3, 4]).validate().is_ok());
    }
}
