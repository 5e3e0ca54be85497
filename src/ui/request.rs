//! Request tokens for async actions.
//!
//! Each view keeps at most one request in flight and remembers its token.
//! A response is applied only if its token is still the one in flight; after
//! a reset, a close, or a newer request the old response is stale and ignored.

use crate::api::ApiRequest;

/// View that issued a request. Responses are routed back by origin.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Origin {
    Scan,
    Items,
    Dashboard,
}

/// Unique tag of one issued request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RequestToken {
    origin: Origin,
    seq: u64,
}

impl RequestToken {
    pub fn origin(self) -> Origin {
        self.origin
    }

    pub fn seq(self) -> u64 {
        self.seq
    }
}

/// Request that has been described by a reducer and not yet answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InFlight {
    pub token: RequestToken,
    pub request: ApiRequest,
}

/// Monotonic token source owned by one view's state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RequestTokens {
    origin: Origin,
    last: u64,
}

impl RequestTokens {
    pub fn new(origin: Origin) -> Self {
        Self { origin, last: 0 }
    }

    /// Tag `request` with a fresh token.
    pub fn issue(&mut self, request: ApiRequest) -> InFlight {
        self.last += 1;
        InFlight {
            token: RequestToken {
                origin: self.origin,
                seq: self.last,
            },
            request,
        }
    }
}

/// True when `token` answers the request currently in flight.
pub fn is_current(in_flight: &Option<InFlight>, token: RequestToken) -> bool {
    in_flight.as_ref().is_some_and(|f| f.token == token)
}
