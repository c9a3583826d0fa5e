pub mod claims;
pub mod guard;
pub mod session;
pub mod storage;

pub use guard::{GuardDecision, RouteGuard, LOGIN_PATH};
pub use session::{LoginOutcome, SessionState, SessionStore, SessionUser};
pub use storage::{FileTokenStore, MemoryTokenStore, TokenStore};
