//! Flags for the `search` subcommand.

use clap::Args;
use yelp_api::{SearchRequest, SortBy};

#[derive(Debug, Args)]
pub struct SearchArgs {
    /// Search term (e.g., "food", "restaurants")
    #[arg(long)]
    term: Option<String>,
    /// Free-form location (e.g., "San Francisco, CA")
    #[arg(long)]
    location: Option<String>,
    /// Latitude; must be combined with --longitude
    #[arg(long, allow_negative_numbers = true)]
    latitude: Option<f64>,
    /// Longitude; must be combined with --latitude
    #[arg(long, allow_negative_numbers = true)]
    longitude: Option<f64>,
    /// Search radius in meters (max 40000)
    #[arg(long)]
    radius: Option<u32>,
    /// Comma-separated category aliases (e.g., bars,french)
    #[arg(long)]
    categories: Option<String>,
    /// Locale such as en_US
    #[arg(long)]
    locale: Option<String>,
    /// Number of results to return (max 50)
    #[arg(long)]
    limit: Option<u32>,
    /// Offset into the result list
    #[arg(long)]
    offset: Option<u32>,
    /// best_match, rating, review_count or distance
    #[arg(long)]
    sort_by: Option<SortBy>,
    /// Price tiers, comma-separated (e.g., 1,2)
    #[arg(long, value_delimiter = ',')]
    price: Option<Vec<u8>>,
    /// Only businesses open right now
    #[arg(long, conflicts_with = "open_at")]
    open_now: bool,
    /// Only businesses open at this Unix time
    #[arg(long)]
    open_at: Option<i64>,
    /// Comma-separated attribute filters (e.g., hot_and_new,deals)
    #[arg(long)]
    attributes: Option<String>,
}

impl SearchArgs {
    #[must_use]
    pub fn into_request(self) -> SearchRequest {
        SearchRequest {
            term: self.term,
            location: self.location,
            latitude: self.latitude,
            longitude: self.longitude,
            radius: self.radius,
            categories: self.categories,
            locale: self.locale,
            limit: self.limit,
            offset: self.offset,
            sort_by: self.sort_by,
            price: self.price,
            open_now: self.open_now.then_some(true),
            open_at: self.open_at,
            attributes: self.attributes,
        }
    }
}
