//! Thumbnail sizing for CDN-hosted product images.

/// Constrain a product image URL to a maximum width.
///
/// The CDN resizes on the fly via query parameters; the source asset is
/// untouched. URLs that already carry a query string are left alone.
#[must_use]
pub fn thumbnail_url(source: &str, width: u32) -> String {
    if source.contains('?') {
        return source.to_string();
    }
    format!("{source}?w={width}&fit=max&auto=format")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_appends_resize_params() {
        assert_eq!(
            thumbnail_url("https://cdn.sanity.io/images/p/d/abc-800x600.jpg", 200),
            "https://cdn.sanity.io/images/p/d/abc-800x600.jpg?w=200&fit=max&auto=format"
        );
    }

    #[test]
    fn test_existing_query_string_untouched() {
        let url = "https://cdn.sanity.io/images/p/d/abc.jpg?rect=0,0,100,100";
        assert_eq!(thumbnail_url(url, 200), url);
    }
}
