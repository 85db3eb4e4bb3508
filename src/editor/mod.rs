//! Edit sessions over descriptors
//!
//! A session bundles one [`DescriptorStore`](crate::store::DescriptorStore)
//! with the state its editor surface needs: managed sub-collections for
//! packages, import/export and preview state for detectors. Sessions are
//! explicit handles passed to whoever needs them; there is no ambient
//! global session.

pub mod detector;
pub mod package;

pub use detector::DetectorEditor;
pub use package::PackageEditor;
