/// Merge header layers, later layers overriding earlier ones.
///
/// Names compare case-insensitively. An overridden header takes the position
/// of its latest definition.
///
/// # Examples
///
/// ```
/// use baselib_request::merge_headers;
///
/// let defaults = vec![("Content-Type".to_string(), "application/json".to_string())];
/// let caller = vec![("content-type".to_string(), "text/plain".to_string())];
///
/// let merged = merge_headers(&[&defaults[..], &caller[..]]);
/// assert_eq!(merged, vec![("content-type".to_string(), "text/plain".to_string())]);
/// ```
pub fn merge_headers(layers: &[&[(String, String)]]) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = Vec::new();
    for layer in layers {
        for (name, value) in layer.iter() {
            merged.retain(|(existing, _)| !existing.eq_ignore_ascii_case(name));
            merged.push((name.clone(), value.clone()));
        }
    }
    merged
}
