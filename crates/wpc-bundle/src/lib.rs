//! # wpc-bundle — Pass Assembly and Bundling
//!
//! - [`assembler`]: validated pass data to the `pass.json` record plus
//!   decoded images.
//! - [`producer`]: the [`BundleProducer`] seam and the signing
//!   [`PkPassProducer`].
//! - [`certificates`]: locating and parsing PEM signing material.

pub mod assembler;
pub mod certificates;
pub mod error;
pub mod producer;

#[cfg(test)]
mod test_support;

pub use assembler::{assemble, PassImage, PassJson, PassRecord};
pub use certificates::{CertificatePaths, SigningCertificates};
pub use error::{AssemblyError, BundleError};
pub use producer::{BundleProducer, PkPassProducer, PKPASS_CONTENT_TYPE};
