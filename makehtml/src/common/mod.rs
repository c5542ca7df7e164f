//! The structural synthesis engine shared by the HTML serializer.

pub mod escape;
pub mod hyperlinks;
pub mod lists;
pub mod postprocess;
pub mod runs;
pub mod tables;
