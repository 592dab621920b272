//! In-progress reservation drafts.

mod draft;

pub use draft::BookingDraft;
