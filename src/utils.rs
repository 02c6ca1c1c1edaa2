// ABOUTME: Small display helpers - clock formatting and video embed URLs
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Stretchease

/// Format seconds as `MM:SS` with zero padding
#[must_use]
pub fn format_clock(seconds: u32) -> String {
    format!("{:02}:{:02}", seconds / 60, seconds % 60)
}

/// Embeddable player URL for a video id, `None` for an empty id
#[must_use]
pub fn youtube_embed_url(video_id: &str) -> Option<String> {
    if video_id.is_empty() {
        return None;
    }
    Some(format!(
        "https://www.youtube.com/embed/{video_id}?rel=0&showinfo=0&modestbranding=1"
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_clock_pads_both_fields() {
        assert_eq!(format_clock(0), "00:00");
        assert_eq!(format_clock(65), "01:05");
        assert_eq!(format_clock(600), "10:00");
        assert_eq!(format_clock(3599), "59:59");
    }

    #[test]
    fn test_embed_url() {
        assert_eq!(
            youtube_embed_url("abc123").as_deref(),
            Some("https://www.youtube.com/embed/abc123?rel=0&showinfo=0&modestbranding=1")
        );
        assert_eq!(youtube_embed_url(""), None);
    }
}
