// Domain Layer - Queue session, token ledger, status projection

pub mod error;
pub mod session;
pub mod status;
pub mod token;

pub use error::DomainError;
pub use session::{QueueSession, ServeOutcome};
pub use status::QueueStatus;
pub use token::{TokenNumber, TokenRecord, TokenStatus};
