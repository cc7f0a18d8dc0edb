//! Client session: who is signed in, and what survives a restart

pub mod authenticator;
pub mod state;
pub mod storage;
pub mod store;

pub use authenticator::{Authenticator, HttpAuthenticator, LocalAuthenticator};
pub use state::{Authenticated, PersistedSession, Session, SessionFingerprint};
pub use storage::{FileStorage, MemoryStorage, SessionStorage};
pub use store::{LoginOutcome, SessionStore};
