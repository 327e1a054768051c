//! Tests for pipeline configuration constants

#[cfg(test)]
mod tests {
    use image::imageops::FilterType;
    use photomosaic::io::configuration::{
        CHANNELS, DEFAULT_SOURCE_DIR, MAX_CHANNEL_VALUE, PROGRESS_BAR_WIDTH, RESIZE_FILTER,
        SOURCE_EXTENSIONS, TEMP_FILE_PREFIX,
    };

    // Tests source folder is a relative path
    // Verified by making the path absolute
    #[test]
    fn test_default_source_dir() {
        assert_eq!(DEFAULT_SOURCE_DIR, "small_photoset");
        assert!(!DEFAULT_SOURCE_DIR.starts_with('/'));
    }

    // Tests extensions are lowercase without a leading dot
    // Verified by adding a dotted extension
    #[test]
    fn test_source_extensions_format() {
        assert!(SOURCE_EXTENSIONS.contains(&"jpg"));
        for ext in SOURCE_EXTENSIONS {
            assert!(!ext.starts_with('.'));
            assert_eq!(ext, ext.to_ascii_lowercase());
        }
    }

    // Tests pixel layout is 8-bit RGB
    // Verified by switching to RGBA
    #[test]
    fn test_pixel_layout() {
        assert_eq!(CHANNELS, 3);
        assert!((MAX_CHANNEL_VALUE - f64::from(u8::MAX)).abs() < f64::EPSILON);
    }

    // Tests resize filter anti-aliases when shrinking
    // Verified by switching to nearest-neighbour sampling
    #[test]
    fn test_resize_filter() {
        assert!(!matches!(RESIZE_FILTER, FilterType::Nearest));
        assert!(matches!(RESIZE_FILTER, FilterType::Triangle));
    }

    // Tests temporary files are hidden and filesystem safe
    // Verified by adding a path separator
    #[test]
    fn test_temp_file_prefix() {
        assert!(TEMP_FILE_PREFIX.starts_with('.'));
        assert!(!TEMP_FILE_PREFIX.contains('/'));
    }

    // Tests progress bar width
    // Verified by changing width value
    #[test]
    fn test_progress_bar_width() {
        assert_eq!(PROGRESS_BAR_WIDTH, 30);
    }
}
