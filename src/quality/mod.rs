pub mod definition;

pub use definition::{QUALITIES, VideoQuality};

/// Extracts the quality from a format label such as `"1080p - mp4"` or
/// `"720p"`. Audio-only labels carry no quality and yield `None`.
#[must_use]
pub fn parse_quality_from_label(label: &str) -> Option<VideoQuality> {
    label
        .split(|c: char| c.is_whitespace() || c == '-' || c == '/')
        .filter(|part| !part.is_empty())
        .find_map(|part| part.parse().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_quality_from_label() {
        assert_eq!(parse_quality_from_label("720p"), Some(VideoQuality::P720));
        assert_eq!(
            parse_quality_from_label("1080p - mp4"),
            Some(VideoQuality::P1080)
        );
        assert_eq!(parse_quality_from_label("MP4 / 4K"), Some(VideoQuality::K4));
        assert_eq!(parse_quality_from_label("2160p"), Some(VideoQuality::K4));
    }

    #[test]
    fn test_audio_label_has_no_quality() {
        assert_eq!(parse_quality_from_label("MP3 Audio"), None);
        assert_eq!(parse_quality_from_label(""), None);
    }
}
