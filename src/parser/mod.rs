// file: src/parser/mod.rs
// description: text normalization and publication segmentation exports
// reference: internal module structure

pub mod normalizer;
pub mod patterns;
pub mod segmenter;

pub use normalizer::{normalize, normalize_optional};
pub use patterns::{HeadingPattern, HeadingPatterns};
pub use segmenter::{Segmenter, Segments};
