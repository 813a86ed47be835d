use std::future::Future;

use futures::future::try_join_all;

use crate::error::FetchError;

/// Run every request concurrently; all-or-nothing.
///
/// Resolves to the first failure observed and drops the requests still in
/// flight. Callers get no partial results from a failed aggregate.
///
/// # Errors
///
/// Returns the first `FetchError` produced by any request.
pub async fn fetch_all<I, F, T>(requests: I) -> Result<Vec<T>, FetchError>
where
    I: IntoIterator<Item = F>,
    F: Future<Output = Result<T, FetchError>>,
{
    try_join_all(requests).await
}

/// Two independent requests of different types, with the same fail-fast rule.
///
/// # Errors
///
/// Returns the first `FetchError` produced by either request.
pub async fn fetch_pair<A, B, FA, FB>(first: FA, second: FB) -> Result<(A, B), FetchError>
where
    FA: Future<Output = Result<A, FetchError>>,
    FB: Future<Output = Result<B, FetchError>>,
{
    futures::try_join!(first, second)
}
