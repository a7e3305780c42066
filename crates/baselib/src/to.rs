use std::future::IntoFuture;

/// Settle a fallible future into an `(error, value)` pair.
///
/// Exactly one side is `Some`: `(None, Some(value))` on success and
/// `(Some(error), None)` on failure. The pair lets callers branch on the
/// error without `?` or `match` at the call site.
///
/// # Examples
///
/// ```
/// # async fn demo() {
/// let (err, value) = baselib::to(async { Ok::<_, String>(5) }).await;
/// assert_eq!(err, None);
/// assert_eq!(value, Some(5));
///
/// let (err, value) = baselib::to(async { Err::<u8, _>("boom") }).await;
/// assert_eq!(err, Some("boom"));
/// assert_eq!(value, None);
/// # }
/// ```
pub async fn to<F, T, E>(future: F) -> Settled<T, E>
where
    F: IntoFuture<Output = Result<T, E>>,
{
    match future.await {
        Ok(value) => (None, Some(value)),
        Err(error) => (Some(error), None),
    }
}

/// The `(error, value)` pair returned by [`to`].
pub type Settled<T, E> = (Option<E>, Option<T>);
