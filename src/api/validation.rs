use super::ApiError;
use crate::models::{DownloadStatus, Platform};

/// Parses an optional history filter. Absent, empty and `all` match everything.
fn parse_filter<T>(
    raw: Option<&str>,
    parse: impl Fn(&str) -> Result<T, String>,
) -> Result<Option<T>, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) if value.eq_ignore_ascii_case("all") => Ok(None),
        Some(value) => parse(value).map(Some).map_err(ApiError::validation),
    }
}

pub fn parse_platform_filter(raw: Option<&str>) -> Result<Option<Platform>, ApiError> {
    parse_filter(raw, str::parse::<Platform>)
}

pub fn parse_status_filter(raw: Option<&str>) -> Result<Option<DownloadStatus>, ApiError> {
    parse_filter(raw, str::parse::<DownloadStatus>)
}

pub fn validate_required<'a>(value: &'a str, field: &str) -> Result<&'a str, ApiError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(ApiError::validation(format!("{field} is required")));
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_platform_filter() {
        assert_eq!(parse_platform_filter(None).unwrap(), None);
        assert_eq!(parse_platform_filter(Some("all")).unwrap(), None);
        assert_eq!(parse_platform_filter(Some("")).unwrap(), None);
        assert_eq!(
            parse_platform_filter(Some("TikTok")).unwrap(),
            Some(Platform::TikTok)
        );
        assert!(parse_platform_filter(Some("myspace")).is_err());
    }

    #[test]
    fn test_status_filter() {
        assert_eq!(parse_status_filter(Some("All")).unwrap(), None);
        assert_eq!(
            parse_status_filter(Some("completed")).unwrap(),
            Some(DownloadStatus::Completed)
        );
        assert!(parse_status_filter(Some("pending")).is_err());
    }

    #[test]
    fn test_validate_required() {
        assert_eq!(validate_required("  x ", "Email").unwrap(), "x");
        assert!(validate_required("   ", "Email").is_err());
    }
}
