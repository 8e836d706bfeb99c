//! Create-payload validation.
//!
//! Rules run in a fixed order and the first failure wins:
//! title present, url present, url well-formed, rating present,
//! rating numeric, rating within `[MIN_RATING, MAX_RATING]`.

use serde_json::Value as JsonValue;
use url::{Host, Url};

use crate::error::ValidationError;
use crate::model::{BookmarkPayload, NewBookmark};

pub const MIN_RATING: f64 = 1.0;
pub const MAX_RATING: f64 = 5.0;

const ALLOWED_SCHEMES: [&str; 3] = ["http", "https", "ftp"];

pub fn validate(payload: BookmarkPayload) -> Result<NewBookmark, ValidationError> {
    let title = required_text(payload.title, "title")?;
    let url = required_text(payload.url, "url")?;
    if !is_well_formed_url(&url) {
        return Err(ValidationError::InvalidField {
            field: "url",
            reason: "not a valid URL",
        });
    }
    let rating = parse_rating(payload.rating)?;

    Ok(NewBookmark {
        title,
        url,
        description: payload.description.unwrap_or_default(),
        rating,
    })
}

/// Present and not blank. Surrounding whitespace is dropped from the stored value.
fn required_text(value: Option<String>, field: &'static str) -> Result<String, ValidationError> {
    match value.as_deref().map(str::trim) {
        Some(v) if !v.is_empty() => Ok(v.to_string()),
        _ => Err(ValidationError::MissingField(field)),
    }
}

/// Absolute URL with a known scheme and a host that looks routable:
/// an IP literal, or a dotted domain ending in an alphabetic label.
pub fn is_well_formed_url(candidate: &str) -> bool {
    let Ok(parsed) = Url::parse(candidate) else {
        return false;
    };
    if !ALLOWED_SCHEMES.contains(&parsed.scheme()) {
        return false;
    }

    match parsed.host() {
        Some(Host::Ipv4(_)) | Some(Host::Ipv6(_)) => true,
        Some(Host::Domain(domain)) => {
            let domain = domain.trim_end_matches('.');
            let labels: Vec<&str> = domain.split('.').collect();
            if labels.len() < 2 || labels.iter().any(|l| l.is_empty()) {
                return false;
            }
            labels
                .last()
                .is_some_and(|tld| tld.len() >= 2 && tld.chars().all(|c| c.is_ascii_alphabetic()))
        }
        None => false,
    }
}

fn parse_rating(value: Option<JsonValue>) -> Result<f64, ValidationError> {
    let rating = match value {
        None | Some(JsonValue::Null) => return Err(ValidationError::MissingField("rating")),
        Some(JsonValue::String(s)) if s.trim().is_empty() => {
            return Err(ValidationError::MissingField("rating"));
        }
        Some(JsonValue::Number(n)) => n.as_f64(),
        Some(JsonValue::String(s)) => s.trim().parse::<f64>().ok().filter(|n| n.is_finite()),
        Some(_) => None,
    };

    let Some(rating) = rating else {
        return Err(ValidationError::InvalidField {
            field: "rating",
            reason: "not numeric",
        });
    };

    if !(MIN_RATING..=MAX_RATING).contains(&rating) {
        return Err(ValidationError::InvalidField {
            field: "rating",
            reason: "out of range",
        });
    }

    Ok(rating)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn payload(title: &str, url: &str, rating: JsonValue) -> BookmarkPayload {
        BookmarkPayload {
            title: Some(title.to_string()),
            url: Some(url.to_string()),
            description: None,
            rating: Some(rating),
        }
    }

    fn invalid(field: &'static str, reason: &'static str) -> ValidationError {
        ValidationError::InvalidField { field, reason }
    }

    #[test]
    fn accepts_complete_payload() {
        let mut p = payload("Thinkful", "https://www.thinkful.com", json!(5));
        p.description = Some("Think outside the classroom".into());

        let candidate = validate(p).unwrap();
        assert_eq!(candidate.title, "Thinkful");
        assert_eq!(candidate.url, "https://www.thinkful.com");
        assert_eq!(candidate.description, "Think outside the classroom");
        assert_eq!(candidate.rating, 5.0);
    }

    #[test]
    fn missing_description_becomes_empty() {
        let candidate = validate(payload("t", "https://test.com", json!(1))).unwrap();
        assert_eq!(candidate.description, "");
    }

    #[test]
    fn title_checked_first() {
        let p = BookmarkPayload::default();
        assert_eq!(validate(p).unwrap_err(), ValidationError::MissingField("title"));

        let p = payload("", "", json!(null));
        assert_eq!(validate(p).unwrap_err(), ValidationError::MissingField("title"));
    }

    #[test]
    fn blank_title_is_missing() {
        let p = payload("   ", "https://a.com", json!(3));
        assert_eq!(validate(p).unwrap_err(), ValidationError::MissingField("title"));

        let p = payload("t", " \t ", json!(3));
        assert_eq!(validate(p).unwrap_err(), ValidationError::MissingField("url"));
    }

    #[test]
    fn stored_text_is_trimmed() {
        let candidate = validate(payload("  Thinkful ", "  https://a.com  ", json!(" 3 "))).unwrap();
        assert_eq!(candidate.title, "Thinkful");
        assert_eq!(candidate.url, "https://a.com");
        assert_eq!(candidate.rating, 3.0);
    }

    #[test]
    fn url_presence_before_url_shape() {
        let p = payload("t", "", json!(1));
        assert_eq!(validate(p).unwrap_err(), ValidationError::MissingField("url"));

        let p = BookmarkPayload {
            title: Some("t".into()),
            ..Default::default()
        };
        assert_eq!(validate(p).unwrap_err(), ValidationError::MissingField("url"));
    }

    #[test]
    fn malformed_urls_rejected_before_rating() {
        for url in ["htp://bad", "htp://invalid-url", "test.com", "http://localhost", "https://", "not a url"] {
            let p = payload("t", url, json!(null));
            assert_eq!(validate(p).unwrap_err(), invalid("url", "not a valid URL"), "{url}");
        }
    }

    #[test]
    fn well_formed_urls() {
        for url in [
            "https://www.thinkful.com",
            "http://some.thing.com",
            "https://repl.it/@HaliPower/youtube-example-1",
            "ftp://files.example.org/pub",
            "http://127.0.0.1:8000/bookmarks",
            "http://[::1]/",
        ] {
            assert!(is_well_formed_url(url), "{url}");
        }
    }

    #[test]
    fn missing_rating() {
        for rating in [json!(null), json!(""), json!("   ")] {
            let p = payload("t", "https://test.com", rating);
            assert_eq!(validate(p).unwrap_err(), ValidationError::MissingField("rating"));
        }

        let mut p = payload("t", "https://test.com", json!(1));
        p.rating = None;
        assert_eq!(validate(p).unwrap_err(), ValidationError::MissingField("rating"));
    }

    #[test]
    fn non_numeric_rating() {
        for rating in [json!("four"), json!("3abc"), json!(true), json!([3]), json!({"n": 3})] {
            let p = payload("t", "https://test.com", rating.clone());
            assert_eq!(validate(p).unwrap_err(), invalid("rating", "not numeric"), "{rating}");
        }
    }

    #[test]
    fn rating_range_is_inclusive() {
        for rating in [json!(0), json!(-1), json!(5.5), json!(6), json!("0")] {
            let p = payload("t", "https://test.com", rating.clone());
            assert_eq!(validate(p).unwrap_err(), invalid("rating", "out of range"), "{rating}");
        }

        for (rating, expected) in [(json!(1), 1.0), (json!(5), 5.0), (json!("3"), 3.0), (json!(4.5), 4.5)] {
            let p = payload("t", "https://test.com", rating);
            assert_eq!(validate(p).unwrap().rating, expected);
        }
    }
}
