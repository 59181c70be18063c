//! The conversation pipeline of A.R.I.S.E.
//!
//! Every inbound message flows through the same stages:
//!
//! 1. **Classify** the message by keyword patterns ([`Classifier`])
//! 2. **Short-circuit** greetings and out-of-scope topics with canned replies
//! 3. **Assemble** the prompt from the system instruction, the capped
//!    document context ([`ContextCache`]) and the question
//! 4. **Call** the backend, running at most one tool round-trip
//! 5. **Sanitize** the reply into plain text ([`sanitize`])
//! 6. **Record** the exchange in the transcript ([`Session`])

pub mod backend;
pub mod bootstrap;
pub mod classifier;
pub mod context_cache;
pub mod orchestrator;
pub mod prompts;
pub mod sanitizer;
pub mod session;

#[cfg(test)]
mod test_helpers;

pub use backend::{Backend, ChatHandle};
pub use bootstrap::{backend_for, build_session, open_transcript};
pub use classifier::{Classification, Classifier, Polarity};
pub use context_cache::{ContextCache, ContextOptions};
pub use orchestrator::{Answer, Orchestrator, SourceTag};
pub use sanitizer::sanitize;
pub use session::Session;
