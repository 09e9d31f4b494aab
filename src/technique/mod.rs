pub mod derive;
pub mod migrate;
pub mod model;
pub mod registry;
pub mod variant_key;

pub use model::{Technique, Variant, VariantKey, Version, VersionMeta};
