//! Document sources for A.R.I.S.E.
//!
//! A document source enumerates a collection and yields the plain text of
//! each member. The directory source reads text files directly and
//! extracts PDFs page by page.

pub mod directory;
pub mod pdf;

pub use directory::DirectorySource;
