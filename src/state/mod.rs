//! Per-page lifecycle state tracking

mod page_state;

pub use page_state::PageState;
