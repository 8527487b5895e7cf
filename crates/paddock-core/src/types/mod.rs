pub mod address;
pub mod family;
pub mod release;

pub use address::{CanonicalAddress, Session};
pub use family::Family;
pub use release::{ParsedRelease, ReleaseName, RoundKey};
