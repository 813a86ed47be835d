use std::sync::Arc;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};

use crate::error::FetchError;

#[derive(Clone, Debug, PartialEq)]
pub enum ViewState<T> {
    Idle,
    Loading,
    Ready(T),
    Error(FetchError),
}

impl<T> ViewState<T> {
    #[must_use]
    pub fn ready(&self) -> Option<&T> {
        match self {
            ViewState::Ready(data) => Some(data),
            _ => None,
        }
    }

    #[must_use]
    pub fn error(&self) -> Option<&FetchError> {
        match self {
            ViewState::Error(err) => Some(err),
            _ => None,
        }
    }

    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, ViewState::Loading)
    }
}

impl<T> From<Result<T, FetchError>> for ViewState<T> {
    fn from(result: Result<T, FetchError>) -> Self {
        match result {
            Ok(data) => ViewState::Ready(data),
            Err(err) => ViewState::Error(err),
        }
    }
}

//
// ─── VIEW SCOPE ────────────────────────────────────────────────────────────────
//

/// Lifetime guard for a mounted view.
///
/// Each load takes a [`LoadTicket`]. A result is only applied if its ticket is
/// still current when it arrives: the view has not been torn down and no newer
/// load has started since. Clones share the same scope, so the presentation
/// layer can keep one to call [`ViewScope::unmount`] while a load is pending.
#[derive(Clone, Debug)]
pub struct ViewScope {
    inner: Arc<ScopeInner>,
}

#[derive(Debug)]
struct ScopeInner {
    mounted: AtomicBool,
    generation: AtomicU64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadTicket {
    generation: u64,
}

impl Default for ViewScope {
    fn default() -> Self {
        Self::new()
    }
}

impl ViewScope {
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: Arc::new(ScopeInner {
                mounted: AtomicBool::new(true),
                generation: AtomicU64::new(0),
            }),
        }
    }

    /// Start a load, superseding any load already in flight.
    pub fn begin(&self) -> LoadTicket {
        let generation = self.inner.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket { generation }
    }

    #[must_use]
    pub fn is_current(&self, ticket: LoadTicket) -> bool {
        self.is_mounted() && self.inner.generation.load(Ordering::SeqCst) == ticket.generation
    }

    #[must_use]
    pub fn is_mounted(&self) -> bool {
        self.inner.mounted.load(Ordering::SeqCst)
    }

    /// Tear the view down. Pending results are discarded from now on.
    pub fn unmount(&self) {
        self.inner.mounted.store(false, Ordering::SeqCst);
    }

    /// Mount again after an `unmount`, invalidating earlier tickets.
    pub fn remount(&self) {
        self.inner.generation.fetch_add(1, Ordering::SeqCst);
        self.inner.mounted.store(true, Ordering::SeqCst);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_load_supersedes_older() {
        let scope = ViewScope::new();
        let first = scope.begin();
        let second = scope.begin();
        assert!(!scope.is_current(first));
        assert!(scope.is_current(second));
    }

    #[test]
    fn unmount_discards_pending_results() {
        let scope = ViewScope::new();
        let ticket = scope.begin();
        scope.clone().unmount();
        assert!(!scope.is_current(ticket));

        scope.remount();
        assert!(!scope.is_current(ticket));
        assert!(scope.is_current(scope.begin()));
    }

    #[test]
    fn view_state_from_result() {
        let ok: ViewState<u8> = Ok(3).into();
        assert_eq!(ok.ready(), Some(&3));
        let err: ViewState<u8> = Err(FetchError::Network).into();
        assert_eq!(err.error(), Some(&FetchError::Network));
        assert!(!err.is_loading());
    }
}
