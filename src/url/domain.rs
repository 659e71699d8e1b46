use url::Url;

/// Derives the logical site name used for the output directory layout
///
/// The site name is the lowercase host plus the port when one is given
/// explicitly, so two crawls against different local servers never share an
/// output directory.
///
/// # Examples
///
/// ```
/// use url::Url;
/// use skraper::url::site_name;
///
/// let url = Url::parse("https://Example.com/path").unwrap();
/// assert_eq!(site_name(&url), Some("example.com".to_string()));
///
/// let url = Url::parse("http://127.0.0.1:8080/").unwrap();
/// assert_eq!(site_name(&url), Some("127.0.0.1:8080".to_string()));
/// ```
pub fn site_name(url: &Url) -> Option<String> {
    let host = url.host_str()?.to_lowercase();
    match url.port() {
        Some(port) => Some(format!("{}:{}", host, port)),
        None => Some(host),
    }
}
