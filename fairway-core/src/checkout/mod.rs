//! Checkout handoff and its transient state.

mod handoff;
mod snapshot;

pub use handoff::{CheckoutApi, CheckoutHandoff, HandoffError, HandoffTicket};
pub use snapshot::{
    CheckoutSnapshot, DRAFT_KEY, MemoryStore, SNAPSHOT_KEY, STEP_KEY, SnapshotStore,
    TransientStore,
};
