//! Reduction of raw collection weeks into one record per bin type.

use cardiffwaste_core::{BinCollection, CollectionSnapshot, CollectionType};
use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::types::{RawBin, RawCollections, RawWeek};

/// Format of [`RawWeek::date`].
pub const WEEK_DATE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Parses a week date, discarding the time of day.
///
/// Returns `None` if the string does not match [`WEEK_DATE_FORMAT`].
#[must_use]
pub fn parse_week_date(s: &str) -> Option<NaiveDate> {
    NaiveDateTime::parse_from_str(s, WEEK_DATE_FORMAT)
        .ok()
        .map(|dt| dt.date())
}

/// Normalizes `weeks`, stamping every record with the current time.
#[must_use]
pub fn normalize(weeks: &[RawWeek]) -> CollectionSnapshot {
    normalize_at(weeks, Utc::now())
}

/// Normalizes a fetch result. Anything other than a 200 yields an empty
/// snapshot.
#[must_use]
pub fn normalize_response(raw: &RawCollections) -> CollectionSnapshot {
    if !raw.is_ok() {
        return CollectionSnapshot::new();
    }
    normalize(&raw.weeks)
}

/// Keeps the first record seen for each lowercased bin type.
///
/// The upstream lists weeks chronologically, so the first record per type is
/// the next upcoming collection. Weeks with an unparseable date are skipped
/// and do not claim their bin types.
#[must_use]
pub fn normalize_at(weeks: &[RawWeek], observed_at: DateTime<Utc>) -> CollectionSnapshot {
    let mut snapshot = CollectionSnapshot::new();

    for week in weeks {
        let Some(collection_date) = parse_week_date(&week.date) else {
            tracing::warn!(date = %week.date, "skipping collection week with malformed date");
            continue;
        };

        for bin in &week.bins {
            snapshot.insert_with(bin.bin_type.to_lowercase(), || {
                tidy_bin(bin, collection_date, observed_at)
            });
        }
    }

    snapshot
}

fn tidy_bin(bin: &RawBin, collection_date: NaiveDate, observed_at: DateTime<Utc>) -> BinCollection {
    BinCollection {
        collection_date,
        collection_type: CollectionType::from_upstream(&bin.collection_type),
        image_url: bin.image_url.clone(),
        observed_at,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn bin(bin_type: &str, collection_type: &str, image_url: &str) -> RawBin {
        RawBin {
            bin_type: bin_type.to_string(),
            collection_type: collection_type.to_string(),
            image_url: image_url.to_string(),
        }
    }

    fn week(date: &str, bins: Vec<RawBin>) -> RawWeek {
        RawWeek {
            date: date.to_string(),
            bins,
        }
    }

    fn ymd(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn parse_week_date_discards_time() {
        assert_eq!(parse_week_date("2024-03-04T07:30:00"), Some(ymd(2024, 3, 4)));
    }

    #[test]
    fn parse_week_date_rejects_other_formats() {
        assert_eq!(parse_week_date("2024-03-04"), None);
        assert_eq!(parse_week_date("04/03/2024 00:00:00"), None);
        assert_eq!(parse_week_date(""), None);
    }

    #[test]
    fn first_seen_record_wins() {
        let weeks = vec![
            week("2024-03-04T00:00:00", vec![bin("General", "Standard", "g.png")]),
            week("2024-03-11T00:00:00", vec![bin("General", "Moved", "g2.png")]),
        ];

        let snapshot = normalize(&weeks);

        assert_eq!(snapshot.len(), 1);
        let general = snapshot.get("general").unwrap();
        assert_eq!(general.collection_date, ymd(2024, 3, 4));
        assert_eq!(general.collection_type, CollectionType::Scheduled);
        assert_eq!(general.image_url, "g.png");
    }

    #[test]
    fn bin_type_key_is_lowercased_before_dedup() {
        let weeks = vec![week(
            "2024-03-04T00:00:00",
            vec![bin("Recycling", "Standard", "a.png"), bin("RECYCLING", "Moved", "b.png")],
        )];

        let snapshot = normalize(&weeks);

        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot.get("recycling").unwrap().image_url, "a.png");
    }

    #[test]
    fn collection_types_are_remapped() {
        let weeks = vec![week(
            "2024-03-04T00:00:00",
            vec![
                bin("General", "Standard", "g.png"),
                bin("Food", "Moved", "f.png"),
                bin("Garden", "Bank Holiday", "gw.png"),
            ],
        )];

        let snapshot = normalize(&weeks);

        assert_eq!(snapshot.get("general").unwrap().collection_type.as_str(), "scheduled");
        assert_eq!(snapshot.get("food").unwrap().collection_type.as_str(), "rescheduled");
        assert_eq!(snapshot.get("garden").unwrap().collection_type.as_str(), "bank holiday");
    }

    #[test]
    fn output_follows_first_seen_order_not_date_order() {
        let weeks = vec![
            week(
                "2024-03-04T00:00:00",
                vec![bin("Recycling", "Standard", "r.png"), bin("Food", "Standard", "f.png")],
            ),
            week("2024-03-11T00:00:00", vec![bin("General", "Standard", "g.png")]),
        ];

        let snapshot = normalize(&weeks);

        let order: Vec<&str> = snapshot.bin_types().collect();
        assert_eq!(order, ["recycling", "food", "general"]);
    }

    #[test]
    fn null_image_url_does_not_drop_other_bins() {
        let body = r#"{"collectionWeeks":[{"date":"2024-03-04T00:00:00","bins":[
            {"type":"General","collectionType":"Standard","imageUrl":null},
            {"type":"Recycling","collectionType":"Moved","imageUrl":"r.png"}
        ]}]}"#;
        let parsed: crate::types::CollectionsResponse = serde_json::from_str(body).unwrap();

        let snapshot = normalize(&parsed.collection_weeks);

        assert_eq!(snapshot.len(), 2);
        assert_eq!(snapshot.get("general").unwrap().image_url, "");
        assert_eq!(snapshot.get("recycling").unwrap().image_url, "r.png");
    }

    #[test]
    fn unknown_bin_types_are_kept() {
        let weeks = vec![week(
            "2024-03-04T00:00:00",
            vec![bin("Hygiene", "Standard", "h.png")],
        )];
        assert!(normalize(&weeks).contains("hygiene"));
    }

    #[test]
    fn empty_input_yields_empty_snapshot() {
        assert!(normalize(&[]).is_empty());
    }

    #[test]
    fn non_200_response_yields_empty_snapshot() {
        let raw = RawCollections {
            weeks: vec![week("2024-03-04T00:00:00", vec![bin("General", "Standard", "g.png")])],
            status: 500,
        };
        assert!(normalize_response(&raw).is_empty());
    }

    #[test]
    fn malformed_week_does_not_claim_its_bin_types() {
        let weeks = vec![
            week("next tuesday", vec![bin("General", "Standard", "bad.png")]),
            week("2024-03-11T00:00:00", vec![bin("General", "Standard", "g.png")]),
        ];

        let snapshot = normalize(&weeks);

        let general = snapshot.get("general").unwrap();
        assert_eq!(general.collection_date, ymd(2024, 3, 11));
        assert_eq!(general.image_url, "g.png");
    }

    #[test]
    fn observed_at_is_stamped_on_every_record() {
        let observed_at = DateTime::<Utc>::from_timestamp(1_709_510_400, 0).unwrap();
        let weeks = vec![week(
            "2024-03-04T00:00:00",
            vec![bin("General", "Standard", "g.png"), bin("Food", "Standard", "f.png")],
        )];

        let snapshot = normalize_at(&weeks, observed_at);

        assert!(snapshot.iter().all(|(_, record)| record.observed_at == observed_at));
    }

    #[test]
    fn normalizing_twice_differs_only_in_observed_at() {
        let weeks = vec![
            week(
                "2024-03-04T00:00:00",
                vec![bin("General", "Standard", "g.png"), bin("Food", "Moved", "f.png")],
            ),
            week("2024-03-11T00:00:00", vec![bin("Garden", "Standard", "gw.png")]),
        ];

        let first = normalize_at(&weeks, DateTime::<Utc>::from_timestamp(0, 0).unwrap());
        let second = normalize_at(&weeks, DateTime::<Utc>::from_timestamp(60, 0).unwrap());

        assert_ne!(first, second);
        assert!(first.same_collections(&second));
    }
}
