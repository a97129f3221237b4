//! Data models for notion-sync.
//!
//! - [`entry`]: the flat JSON records read by the importer
//! - [`page`]: the Notion request/response shapes
//! - [`snapshot`]: the document written by the exporter

pub mod entry;
pub mod page;
pub mod snapshot;

pub use entry::{ContentBlock, DateRange, Entry, EntryBatch, EntryDate};
pub use page::{
    BlockKind, BlockPayload, CreatePageRequest, CreatedPage, DatePayload, DateValue, FileRef,
    Page, Parent, PropertyPayload, PropertyValue, QueryRequest, QueryResponse, RelationRef,
    RichText, RichTextPayload, SelectOption, SelectPayload, TextContent,
};
pub use snapshot::{CATEGORY_PROPERTY, ExportedPage, FieldValue, Snapshot};
