//! YouTube video ID extraction.

use regex::Regex;

/// Ordered extraction rules. The first rule that matches wins.
const PATTERNS: &[&str] = &[
    // Bare video ID (11 characters)
    r"^([0-9A-Za-z_-]{11})$",
    // `watch?v=ID`, `youtu.be/ID`, `/v/ID`, `/shorts/ID`
    r"(?:v=|/)([0-9A-Za-z_-]{11})",
    r"embed/([0-9A-Za-z_-]{11})",
    r"watch\?v=([0-9A-Za-z_-]{11})",
];

/// Extracts canonical 11-character video IDs from YouTube URLs or bare IDs.
#[derive(Debug, Clone)]
pub struct VideoIdExtractor {
    rules: Vec<Regex>,
}

impl VideoIdExtractor {
    pub fn new() -> Self {
        let rules = PATTERNS
            .iter()
            .map(|p| Regex::new(p).expect("Invalid regex"))
            .collect();

        Self { rules }
    }

    /// Extract the video ID from a URL or bare ID.
    ///
    /// Returns `None` when no rule matches; callers decide whether that is fatal.
    pub fn extract(&self, input: &str) -> Option<String> {
        let input = input.trim();
        self.rules
            .iter()
            .find_map(|rule| rule.captures(input))
            .and_then(|caps| caps.get(1))
            .map(|m| m.as_str().to_string())
    }
}

impl Default for VideoIdExtractor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_video_id() {
        let extractor = VideoIdExtractor::new();

        assert_eq!(
            extractor.extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extractor.extract("https://youtu.be/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extractor.extract("https://youtube.com/embed/dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extractor.extract("dQw4w9WgXcQ"),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_ignores_trailing_parameters() {
        let extractor = VideoIdExtractor::new();

        assert_eq!(
            extractor.extract("https://www.youtube.com/watch?v=dQw4w9WgXcQ&t=42s&list=PL123"),
            Some("dQw4w9WgXcQ".to_string())
        );
        assert_eq!(
            extractor.extract("  https://youtu.be/dQw4w9WgXcQ?feature=shared  "),
            Some("dQw4w9WgXcQ".to_string())
        );
    }

    #[test]
    fn test_extract_invalid_inputs() {
        let extractor = VideoIdExtractor::new();

        assert_eq!(extractor.extract("not a url"), None);
        assert_eq!(extractor.extract("not-a-video-id"), None);
        assert_eq!(extractor.extract("https://youtu.be/short"), None);
        assert_eq!(extractor.extract(""), None);
    }
}
