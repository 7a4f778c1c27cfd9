//! Request validation logic.
//!
//! Validation is advisory: the composition engine renders any request, and
//! over-long text only degrades the layout. The shell uses the result to warn
//! users before rendering.

use std::sync::OnceLock;

use regex::Regex;

use crate::error::{ErrorCode, ValidationError, ValidationResult, ValidationWarning, WarningCode};
use crate::request::{GraphicRequest, MAX_DESCRIPTION_CHARS, MAX_HASHTAGS, MAX_HEADLINE_CHARS};

/// Digits, spaces, and common phone punctuation, with at least seven characters.
const PHONE_PATTERN: &str = r"^\+?[0-9()\-. ]{7,}$";

static PHONE_REGEX: OnceLock<Regex> = OnceLock::new();

fn phone_regex() -> &'static Regex {
    PHONE_REGEX.get_or_init(|| Regex::new(PHONE_PATTERN).expect("invalid regex pattern"))
}

/// Validates a request and returns a validation result.
///
/// # Example
/// ```
/// use postcraft_spec::{GraphicRequest, TemplateStyle};
/// use postcraft_spec::validation::validate_request;
///
/// let request = GraphicRequest::new("Gardening", TemplateStyle::Modern, "Hi", "There", "555-0100");
/// let result = validate_request(&request);
/// assert!(result.is_ok());
/// assert_eq!(result.warnings.len(), 1);
/// ```
pub fn validate_request(request: &GraphicRequest) -> ValidationResult {
    let mut result = ValidationResult::default();

    validate_headline(request, &mut result);
    validate_description(request, &mut result);
    validate_phone_number(request, &mut result);
    validate_hashtags(request, &mut result);

    if request.known_category().is_none() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::UnknownCategory,
            format!(
                "unknown category '{}', the Plumbing color scheme will be used",
                request.category
            ),
            "category",
        ));
    }

    result
}

fn validate_headline(request: &GraphicRequest, result: &mut ValidationResult) {
    if request.headline.trim().is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyHeadline,
            "headline must not be empty",
            "headline",
        ));
        return;
    }

    let len = request.headline.chars().count();
    if len > MAX_HEADLINE_CHARS {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::HeadlineTooLong,
            format!(
                "headline has {} characters (max {}); it may overflow the layout",
                len, MAX_HEADLINE_CHARS
            ),
            "headline",
        ));
    }
}

fn validate_description(request: &GraphicRequest, result: &mut ValidationResult) {
    if request.description.trim().is_empty() {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::EmptyDescription,
            "description is empty",
            "description",
        ));
        return;
    }

    let len = request.description.chars().count();
    if len > MAX_DESCRIPTION_CHARS {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::DescriptionTooLong,
            format!(
                "description has {} characters (max {}); it may overflow its plate",
                len, MAX_DESCRIPTION_CHARS
            ),
            "description",
        ));
    }
}

fn validate_phone_number(request: &GraphicRequest, result: &mut ValidationResult) {
    let phone = request.phone_number.trim();
    if phone.is_empty() {
        result.add_error(ValidationError::with_path(
            ErrorCode::EmptyPhoneNumber,
            "phone number must not be empty",
            "phone_number",
        ));
    } else if !phone_regex().is_match(phone) {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::UnusualPhoneNumber,
            format!("phone number '{}' does not look like a phone number", phone),
            "phone_number",
        ));
    }
}

fn validate_hashtags(request: &GraphicRequest, result: &mut ValidationResult) {
    if request.hashtags.len() > MAX_HASHTAGS {
        result.add_warning(ValidationWarning::with_path(
            WarningCode::TooManyHashtags,
            format!(
                "{} hashtags given (max {}); the hashtag line may overflow",
                request.hashtags.len(),
                MAX_HASHTAGS
            ),
            "hashtags",
        ));
    }

    for (i, tag) in request.hashtags.iter().enumerate() {
        let body = tag.trim_start_matches('#');
        if body.is_empty() || body.chars().any(char::is_whitespace) {
            result.add_error(ValidationError::with_path(
                ErrorCode::InvalidHashtag,
                format!("hashtag '{}' must be a single non-empty word", tag),
                format!("hashtags[{}]", i),
            ));
        }
    }
}
