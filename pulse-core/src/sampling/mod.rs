//! Sample-domain components: sliding window and preprocessing

pub mod preprocess;
pub mod window;

pub use preprocess::{apply_hamming, remove_dc};
pub use window::SampleWindow;
