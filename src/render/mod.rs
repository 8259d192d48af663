//! Page rendering: HTML primitives, the order-preserving page renderer and the
//! document shell that places sections in document order.
pub mod document;
pub mod html;
pub mod page;

pub use document::{DocumentOptions, PageRender, compose_document, report_degraded};
pub use page::{PageSummary, render_page, render_page_parallel};
