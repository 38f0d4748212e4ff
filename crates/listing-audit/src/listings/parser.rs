use super::domain::Listing;
use super::normalizer::normalize_text;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use std::io::Read;

pub(crate) fn parse_csv<R: Read>(reader: R) -> Result<Vec<Listing>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut listings = Vec::new();

    for record in csv_reader.deserialize::<Listing>() {
        listings.push(record?);
    }

    Ok(listings)
}

pub(crate) fn parse_json<R: Read>(reader: R) -> Result<Vec<Listing>, serde_json::Error> {
    serde_json::from_reader(reader)
}

/// Raw shape shared by the CSV exports and the JSON snapshots. Older exports
/// call the minimum stay `minimum_nights`.
#[derive(Debug, Deserialize)]
pub(crate) struct ListingRow {
    property_type: String,
    room_type: String,
    #[serde(alias = "minimum_nights")]
    min_stay: u32,
    calculated_host_listings_count: u32,
    #[serde(default, deserialize_with = "empty_string_as_none")]
    host_location: Option<String>,
    #[serde(default, deserialize_with = "price_amount")]
    price: f64,
    latitude: f64,
    longitude: f64,
    #[serde(default, deserialize_with = "optional_flag")]
    illegal: Option<bool>,
}

impl From<ListingRow> for Listing {
    fn from(row: ListingRow) -> Self {
        Self {
            property_type: normalize_text(&row.property_type),
            room_type: normalize_text(&row.room_type),
            min_stay: row.min_stay,
            calculated_host_listings_count: row.calculated_host_listings_count,
            // Kept verbatim: the away-host test matches raw substrings.
            host_location: row.host_location,
            price: row.price,
            latitude: row.latitude,
            longitude: row.longitude,
            illegal: row.illegal,
        }
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawNumber {
    Number(f64),
    Text(String),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawFlag {
    Bool(bool),
    Number(f64),
    Text(String),
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.is_empty()))
}

fn price_amount<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawNumber>::deserialize(deserializer)? {
        None => Ok(0.0),
        Some(RawNumber::Number(value)) => Ok(value),
        Some(RawNumber::Text(text)) => {
            parse_price(&text).ok_or_else(|| D::Error::custom(format!("invalid price '{text}'")))
        }
    }
}

fn optional_flag<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<RawFlag>::deserialize(deserializer)? {
        None => Ok(None),
        Some(RawFlag::Bool(value)) => Ok(Some(value)),
        Some(RawFlag::Number(value)) => Ok(Some(value != 0.0)),
        Some(RawFlag::Text(text)) => match text.trim().to_ascii_lowercase().as_str() {
            "" => Ok(None),
            "1" | "true" | "yes" => Ok(Some(true)),
            "0" | "false" | "no" => Ok(Some(false)),
            other => Err(D::Error::custom(format!("invalid illegal flag '{other}'"))),
        },
    }
}

/// Accepts `"$1,250.00"` style amounts as well as bare numbers.
fn parse_price(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Some(0.0);
    }

    let digits: String = trimmed
        .chars()
        .filter(|c| !matches!(c, '$' | ',' | ' '))
        .collect();
    digits.parse::<f64>().ok().filter(|price| price.is_finite())
}
