//! Intermediate Representation (IR) for decoded documents.
//!
//! The docx decoder produces this representation and the HTML serializer
//! consumes it, so the conversion engine never sees raw WordprocessingML.

pub mod nodes;
