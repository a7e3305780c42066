use std::sync::Arc;

/// Transport options for a single call.
///
/// Headers given here override the client defaults and the defaults of the
/// operation itself (such as `Content-Type` for `post`), compared
/// case-insensitively. The method and body are always decided by the
/// operation.
///
/// # Examples
///
/// ```
/// use baselib_request::RequestConfig;
///
/// let config = RequestConfig::default()
///     .header("X-Request-Id", "42")
///     .header("Accept-Language", "zh-CN");
/// assert_eq!(config.headers.len(), 2);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RequestConfig {
    /// Extra HTTP headers, in the order they were added.
    ///
    /// Default: empty
    pub headers: Arc<[(String, String)]>,
}

impl RequestConfig {
    /// Add a single header.
    #[must_use]
    pub fn header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        let mut headers: Vec<_> = self.headers.iter().cloned().collect();
        headers.push((key.into(), value.into()));
        self.headers = Arc::from(headers);
        self
    }

    /// Set multiple headers at once.
    ///
    /// This replaces any existing headers.
    ///
    /// # Examples
    ///
    /// ```
    /// use baselib_request::RequestConfig;
    ///
    /// let config = RequestConfig::default()
    ///     .header("X-Old", "1")
    ///     .headers(vec![("X-New".to_string(), "2".to_string())]);
    /// assert_eq!(config.headers.len(), 1);
    /// ```
    #[must_use]
    pub fn headers(mut self, headers: Vec<(String, String)>) -> Self {
        self.headers = Arc::from(headers);
        self
    }
}
