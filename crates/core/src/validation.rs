//! Field rules for create, update and path parameters.
//!
//! Every function collects all failures before returning; nothing here
//! short-circuits on the first bad field. The create-time uniqueness rule
//! needs the store and lives in the service layer.

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::{
    AnimalDraft, AnimalPatch, AnimalPatchDraft, COMMON_NAME_MAX_LEN, COMMON_NAME_MIN_LEN,
    DEFAULT_PHOTO_URL, FieldError, HABITAT_MAX_LEN, HABITAT_MIN_LEN, NewAnimal,
    PHOTO_URL_MAX_LEN, SCIENTIFIC_NAME_MAX_LEN, SCIENTIFIC_NAME_MIN_LEN, ValidationErrors,
    format_common_name,
};

/// Absolute http(s) URL with a host, or a root-relative path.
#[expect(clippy::unwrap_used, reason = "static regex pattern is compile-time validated")]
static PHOTO_URL_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?i:https?://[^\s/?#]+[^\s]*|/[^\s]*)$").unwrap());

struct Bounds {
    min: usize,
    max: usize,
}

const COMMON_NAME: Bounds = Bounds { min: COMMON_NAME_MIN_LEN, max: COMMON_NAME_MAX_LEN };
const SCIENTIFIC_NAME: Bounds =
    Bounds { min: SCIENTIFIC_NAME_MIN_LEN, max: SCIENTIFIC_NAME_MAX_LEN };
const HABITAT: Bounds = Bounds { min: HABITAT_MIN_LEN, max: HABITAT_MAX_LEN };

/// JSON `null` is treated the same as an absent key.
fn present(value: Option<&Value>) -> Option<&Value> {
    value.filter(|v| !v.is_null())
}

/// Returns the trimmed string when `value` is a string, recording a type error otherwise.
fn string_value(errors: &mut ValidationErrors, field: &str, value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.trim().to_owned()),
        _ => {
            errors.add(field, "must be a string");
            None
        },
    }
}

fn check_length(errors: &mut ValidationErrors, field: &str, value: &str, bounds: &Bounds) -> bool {
    let len = value.chars().count();
    if len < bounds.min {
        if bounds.min == 1 {
            errors.add(field, "must not be empty");
        } else {
            errors.add(field, format!("must be at least {} characters", bounds.min));
        }
        false
    } else if len > bounds.max {
        errors.add(field, format!("must be at most {} characters", bounds.max));
        false
    } else {
        true
    }
}

fn bounded_string(
    errors: &mut ValidationErrors,
    field: &str,
    value: &Value,
    bounds: &Bounds,
) -> Option<String> {
    let s = string_value(errors, field, value)?;
    check_length(errors, field, &s, bounds).then_some(s)
}

fn required_string(
    errors: &mut ValidationErrors,
    field: &str,
    value: Option<&Value>,
    bounds: &Bounds,
) -> Option<String> {
    match present(value) {
        Some(v) => bounded_string(errors, field, v, bounds),
        None => {
            errors.add(field, "is required");
            None
        },
    }
}

fn photo_url(errors: &mut ValidationErrors, value: &str) -> bool {
    if value.chars().count() > PHOTO_URL_MAX_LEN {
        errors.add("photoUrl", format!("must be at most {PHOTO_URL_MAX_LEN} characters"));
        false
    } else if !PHOTO_URL_REGEX.is_match(value) {
        errors.add("photoUrl", "must be an http(s) URL or an absolute path");
        false
    } else {
        true
    }
}

/// Validates a create payload and computes its slug.
///
/// A missing or blank `photoUrl` falls back to [`DEFAULT_PHOTO_URL`].
pub fn validate_new_animal(draft: &AnimalDraft) -> Result<NewAnimal, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let photo = match present(draft.photo_url.as_ref()) {
        Some(v) => match string_value(&mut errors, "photoUrl", v) {
            Some(s) if s.is_empty() => Some(DEFAULT_PHOTO_URL.to_owned()),
            Some(s) => photo_url(&mut errors, &s).then_some(s),
            None => None,
        },
        None => Some(DEFAULT_PHOTO_URL.to_owned()),
    };

    let common_name =
        required_string(&mut errors, "commonName", draft.common_name.as_ref(), &COMMON_NAME);
    let slug = common_name.as_deref().map(format_common_name);
    if slug.as_deref().is_some_and(str::is_empty) {
        errors.add("commonName", "must contain at least one letter or digit");
    }

    let scientific_name = required_string(
        &mut errors,
        "scientificName",
        draft.scientific_name.as_ref(),
        &SCIENTIFIC_NAME,
    );
    let habitat = required_string(&mut errors, "habitat", draft.habitat.as_ref(), &HABITAT);

    match (photo, common_name, slug, scientific_name, habitat) {
        (Some(photo_url), Some(common_name), Some(slug), Some(scientific_name), Some(habitat))
            if errors.is_empty() =>
        {
            Ok(NewAnimal {
                photo_url,
                common_name,
                formatted_common_name: slug,
                scientific_name,
                habitat,
            })
        },
        _ => Err(errors),
    }
}

/// Slug of the draft's `commonName` when that field on its own is valid.
///
/// Lets the uniqueness check run even when other fields fail, so that every
/// error is reported in one response.
pub fn common_name_slug(draft: &AnimalDraft) -> Option<String> {
    let mut scratch = ValidationErrors::new();
    let name = present(draft.common_name.as_ref())
        .and_then(|v| bounded_string(&mut scratch, "commonName", v, &COMMON_NAME))?;
    Some(format_common_name(&name)).filter(|slug| !slug.is_empty())
}

/// Validates a partial update. `id` is required and at least one patchable
/// field must be supplied.
pub fn validate_patch(draft: &AnimalPatchDraft) -> Result<AnimalPatch, ValidationErrors> {
    let mut errors = ValidationErrors::new();

    let id = match present(draft.id.as_ref()) {
        Some(v) => coerce_id(v).or_else(|| {
            errors.add("id", "must be a non-negative integer");
            None
        }),
        None => {
            errors.add("id", "is required");
            None
        },
    };

    let photo_value = present(draft.photo_url.as_ref());
    let scientific_value = present(draft.scientific_name.as_ref());
    let habitat_value = present(draft.habitat.as_ref());

    let photo = photo_value.and_then(|v| {
        let s = string_value(&mut errors, "photoUrl", v)?;
        if s.is_empty() {
            errors.add("photoUrl", "must not be empty");
            return None;
        }
        photo_url(&mut errors, &s).then_some(s)
    });
    let scientific_name = scientific_value
        .and_then(|v| bounded_string(&mut errors, "scientificName", v, &SCIENTIFIC_NAME));
    let habitat = habitat_value.and_then(|v| bounded_string(&mut errors, "habitat", v, &HABITAT));

    if photo_value.is_none() && scientific_value.is_none() && habitat_value.is_none() {
        errors.push(FieldError::general(
            "at least one of photoUrl, scientificName or habitat must be provided",
        ));
    }

    match id {
        Some(id) if errors.is_empty() => {
            Ok(AnimalPatch { id, photo_url: photo, scientific_name, habitat })
        },
        _ => Err(errors),
    }
}

/// Accepts a JSON integer or a string of decimal digits.
fn coerce_id(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().filter(|id| *id >= 0),
        Value::String(s) => parse_digits(s.trim()),
        _ => None,
    }
}

/// Digits only: rejects signs, whitespace and the empty string.
fn parse_digits<T: std::str::FromStr>(raw: &str) -> Option<T> {
    if raw.is_empty() || !raw.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    raw.parse().ok()
}

/// Parses a listing page number. Pages are 1-based.
pub fn parse_page(raw: &str) -> Result<u64, ValidationErrors> {
    match parse_digits::<u64>(raw) {
        Some(page) if page >= 1 => Ok(page),
        _ => Err(ValidationErrors::single("page", "must be a positive integer")),
    }
}

/// Parses a record id path parameter.
pub fn parse_id(raw: &str) -> Result<i64, ValidationErrors> {
    parse_digits::<i64>(raw)
        .ok_or_else(|| ValidationErrors::single("id", "must be a non-negative integer"))
}

/// Row offset of `page` (1-based) for pages of `size` rows.
pub fn page_offset(page: u64, size: u64) -> u64 {
    page.saturating_sub(1).saturating_mul(size)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn draft(value: Value) -> AnimalDraft {
        serde_json::from_value(value).unwrap()
    }

    fn patch(value: Value) -> AnimalPatchDraft {
        serde_json::from_value(value).unwrap()
    }

    fn red_fox() -> Value {
        json!({
            "photoUrl": "https://example.com/fox.jpg",
            "commonName": "Red Fox",
            "scientificName": "Vulpes vulpes",
            "habitat": "Temperate forests and grasslands, 16+ chars"
        })
    }

    fn fields(errors: &ValidationErrors) -> Vec<Option<&str>> {
        errors.errors().iter().map(|e| e.field.as_deref()).collect()
    }

    #[test]
    fn valid_create_computes_slug() {
        let animal = validate_new_animal(&draft(red_fox())).unwrap();
        assert_eq!(animal.formatted_common_name, "red-fox");
        assert_eq!(animal.common_name, "Red Fox");
        assert_eq!(animal.photo_url, "https://example.com/fox.jpg");
    }

    #[test]
    fn missing_photo_uses_default() {
        let mut body = red_fox();
        body.as_object_mut().unwrap().remove("photoUrl");
        let animal = validate_new_animal(&draft(body)).unwrap();
        assert_eq!(animal.photo_url, DEFAULT_PHOTO_URL);
    }

    #[test]
    fn blank_photo_uses_default() {
        let mut body = red_fox();
        body["photoUrl"] = json!("   ");
        let animal = validate_new_animal(&draft(body)).unwrap();
        assert_eq!(animal.photo_url, DEFAULT_PHOTO_URL);
    }

    #[test]
    fn root_relative_photo_is_accepted() {
        let mut body = red_fox();
        body["photoUrl"] = json!("/public/images/fox.png");
        assert!(validate_new_animal(&draft(body)).is_ok());
    }

    #[test]
    fn non_url_photo_is_rejected() {
        let mut body = red_fox();
        body["photoUrl"] = json!("fox.jpg");
        let errors = validate_new_animal(&draft(body)).unwrap_err();
        assert_eq!(fields(&errors), vec![Some("photoUrl")]);
    }

    #[test]
    fn reports_every_failing_field_in_order() {
        let errors = validate_new_animal(&draft(json!({
            "photoUrl": 12,
            "commonName": "",
            "scientificName": "x".repeat(33),
            "habitat": "too short"
        })))
        .unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![Some("photoUrl"), Some("commonName"), Some("scientificName"), Some("habitat")]
        );
        assert_eq!(errors.errors()[3].message, "must be at least 16 characters");
    }

    #[test]
    fn empty_body_reports_required_fields() {
        let errors = validate_new_animal(&AnimalDraft::default()).unwrap_err();
        assert_eq!(
            fields(&errors),
            vec![Some("commonName"), Some("scientificName"), Some("habitat")]
        );
        assert!(errors.errors().iter().all(|e| e.message == "is required"));
    }

    #[test]
    fn common_name_bounds_are_inclusive() {
        let mut body = red_fox();
        body["commonName"] = json!("a".repeat(32));
        assert!(validate_new_animal(&draft(body.clone())).is_ok());
        body["commonName"] = json!("a".repeat(33));
        assert!(validate_new_animal(&draft(body)).is_err());
    }

    #[test]
    fn length_counts_characters_not_bytes() {
        let mut body = red_fox();
        body["commonName"] = json!("é".repeat(32));
        assert!(validate_new_animal(&draft(body)).is_ok());
    }

    #[test]
    fn habitat_upper_bound() {
        let mut body = red_fox();
        body["habitat"] = json!("h".repeat(1000));
        assert!(validate_new_animal(&draft(body.clone())).is_ok());
        body["habitat"] = json!("h".repeat(1001));
        let errors = validate_new_animal(&draft(body)).unwrap_err();
        assert_eq!(errors.errors()[0].message, "must be at most 1000 characters");
    }

    #[test]
    fn punctuation_only_name_is_rejected() {
        let mut body = red_fox();
        body["commonName"] = json!("???");
        let errors = validate_new_animal(&draft(body)).unwrap_err();
        assert!(errors.has_field("commonName"));
    }

    #[test]
    fn names_are_trimmed() {
        let mut body = red_fox();
        body["commonName"] = json!("  Red Fox  ");
        let animal = validate_new_animal(&draft(body)).unwrap();
        assert_eq!(animal.common_name, "Red Fox");
    }

    #[test]
    fn common_name_slug_ignores_other_fields() {
        let body = json!({ "commonName": "Red Fox", "habitat": "short" });
        assert_eq!(common_name_slug(&draft(body)).as_deref(), Some("red-fox"));
        assert_eq!(common_name_slug(&draft(json!({ "commonName": 5 }))), None);
        assert_eq!(common_name_slug(&draft(json!({ "commonName": "--" }))), None);
        assert_eq!(common_name_slug(&AnimalDraft::default()), None);
    }

    #[test]
    fn patch_with_habitat_only() {
        let patch = validate_patch(&patch(json!({
            "id": 4,
            "habitat": "Arctic tundra and coastal ice"
        })))
        .unwrap();
        assert_eq!(patch.id, 4);
        assert_eq!(patch.habitat.as_deref(), Some("Arctic tundra and coastal ice"));
        assert!(patch.photo_url.is_none());
        assert!(patch.scientific_name.is_none());
    }

    #[test]
    fn patch_id_accepts_numeric_string() {
        let patch = validate_patch(&patch(json!({ "id": "17", "scientificName": "Canis lupus" })))
            .unwrap();
        assert_eq!(patch.id, 17);
    }

    #[test]
    fn patch_rejects_negative_and_fractional_ids() {
        for id in [json!(-1), json!(1.5), json!("abc"), json!(true)] {
            let errors =
                validate_patch(&patch(json!({ "id": id, "scientificName": "Canis lupus" })))
                    .unwrap_err();
            assert_eq!(fields(&errors), vec![Some("id")]);
        }
    }

    #[test]
    fn patch_requires_id_and_a_field() {
        let errors = validate_patch(&AnimalPatchDraft::default()).unwrap_err();
        assert_eq!(fields(&errors), vec![Some("id"), None]);
    }

    #[test]
    fn patch_validates_supplied_fields() {
        let errors = validate_patch(&patch(json!({
            "id": 1,
            "photoUrl": "",
            "habitat": "short"
        })))
        .unwrap_err();
        assert_eq!(fields(&errors), vec![Some("photoUrl"), Some("habitat")]);
    }

    #[test]
    fn page_must_be_positive_integer() {
        assert_eq!(parse_page("1"), Ok(1));
        assert_eq!(parse_page("42"), Ok(42));
        for raw in ["0", "-1", "+2", "abc", "", "1.5", "99999999999999999999999"] {
            assert!(parse_page(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn id_must_be_non_negative_integer() {
        assert_eq!(parse_id("0"), Ok(0));
        assert_eq!(parse_id("123"), Ok(123));
        for raw in ["-3", "x1", "", " 4"] {
            assert!(parse_id(raw).is_err(), "{raw} should be rejected");
        }
    }

    #[test]
    fn offsets_start_at_zero() {
        assert_eq!(page_offset(1, 5), 0);
        assert_eq!(page_offset(2, 5), 5);
        assert_eq!(page_offset(0, 5), 0);
        assert_eq!(page_offset(u64::MAX, 5), u64::MAX);
    }
}
