//! Report definitions: XML mapping, canonical model and normalization

pub mod model;
pub mod normalize;
pub mod xml;

pub use model::{Report, ReportCell, ReportMain};
pub use normalize::{MAINTAIN_AS_ARRAY, normalize, parse_report};
pub use xml::{RawNode, parse_document};
