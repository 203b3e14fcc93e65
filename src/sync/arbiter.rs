use std::sync::atomic::{AtomicU64, Ordering};

/// The two fetch paths that can race against each other
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FetchKind {
    /// Paged full-catalog fetch
    Page,
    /// Free-text search fetch
    Search,
}

/// Marker for one issued fetch
///
/// Carries the kind and the per-kind sequence number it was issued under.
/// Tokens are only minted by [`RequestArbiter::issue`]; issuing a new token
/// of a kind invalidates every earlier token of that kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestToken {
    kind: FetchKind,
    seq: u64,
}

impl RequestToken {
    pub fn kind(&self) -> FetchKind {
        self.kind
    }

    pub fn seq(&self) -> u64 {
        self.seq
    }
}

/// Orders concurrent fetches of the same kind
///
/// Network replies can complete out of initiation order; the arbiter makes
/// sure the view only ever reflects the most recently *issued* request.
/// A response whose token is no longer current is discarded silently;
/// being superseded is not an error.
#[derive(Debug, Default)]
pub struct RequestArbiter {
    page_seq: AtomicU64,
    search_seq: AtomicU64,
}

impl RequestArbiter {
    pub fn new() -> Self {
        Self::default()
    }

    fn slot(&self, kind: FetchKind) -> &AtomicU64 {
        match kind {
            FetchKind::Page => &self.page_seq,
            FetchKind::Search => &self.search_seq,
        }
    }

    /// Issues a token with the next sequence number for its kind
    pub fn issue(&self, kind: FetchKind) -> RequestToken {
        let seq = self.slot(kind).fetch_add(1, Ordering::SeqCst) + 1;
        RequestToken { kind, seq }
    }

    /// True only for the most recently issued token of its kind
    pub fn is_current(&self, token: RequestToken) -> bool {
        token.seq == self.slot(token.kind).load(Ordering::SeqCst)
    }
}
