//! Result shaping for tool output
//!
//! - [`raw`]: serde model of the info JSON the tool prints
//! - [`shape`]: normalization into [`crate::types::VideoMetadata`]
//! - [`resolver`]: locating the file a download produced

pub mod raw;
pub mod resolver;
pub mod shape;

pub use raw::{RawFormat, RawVideoInfo, parse_info_output};
pub use resolver::resolve_artifact;
pub use shape::{classify_media, shape_format, shape_metadata};
