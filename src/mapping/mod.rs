//! Record mapping between entries and Notion pages.
//!
//! The two directions are deliberately not inverses:
//!
//! | Field | Import writes | Export reads back |
//! |-------|---------------|-------------------|
//! | `Category` | commas rewritten as ` /` | rewritten value |
//! | `Date` range | start and end (ongoing end → today) | start only |
//! | Unknown types | - | raw property JSON |
//!
//! Name, Description and URL survive a round trip unchanged.

pub mod from_remote;
pub mod normalize;
pub mod to_remote;

pub use from_remote::{export_page, export_value};
pub use normalize::{ONGOING_TOKENS, is_ongoing, resolve_end_date, sanitize_category};
pub use to_remote::{EntryMapper, blocks};
