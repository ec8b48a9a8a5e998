//! Progress bar utilities for image processing.

use indicatif::{ProgressBar, ProgressStyle};

/// Create a progress bar for processing multiple images.
pub fn create_image_progress(total_images: usize, enabled: bool) -> Option<ProgressBar> {
    if !enabled || total_images < 2 {
        return None;
    }

    let pb = ProgressBar::new(total_images as u64);
    pb.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} images ({eta})")
            .unwrap_or_else(|_| ProgressStyle::default_bar())
            .progress_chars("█▓▒░ "),
    );
    Some(pb)
}

/// Finish a progress bar with a message.
pub fn finish_progress(pb: Option<ProgressBar>, message: &str) {
    if let Some(pb) = pb {
        pb.finish_with_message(message.to_string());
    }
}

/// Increment a progress bar.
pub fn inc_progress(pb: Option<&ProgressBar>) {
    if let Some(pb) = pb {
        pb.inc(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_progress_for_single_image() {
        assert!(create_image_progress(1, true).is_none());
    }

    #[test]
    fn test_no_progress_when_disabled() {
        assert!(create_image_progress(10, false).is_none());
    }

    #[test]
    fn test_progress_length() {
        let pb = create_image_progress(4, true);
        assert_eq!(pb.and_then(|pb| pb.length()), Some(4));
    }
}
