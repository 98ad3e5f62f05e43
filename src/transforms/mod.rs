pub mod delta;
pub mod dictionary;
pub mod entropy;
pub mod hybrid;
pub mod rle;

pub use entropy::{estimate, estimate_with, shannon_entropy, EntropyBackend, ParallelBackend, ScalarBackend};
pub use hybrid::HybridOrder;

// Re-export specific functions to avoid naming conflicts
pub use delta::{encode as delta_encode, decode as delta_decode};
pub use rle::{encode as rle_encode, decode as rle_decode};
pub use dictionary::{encode as dict_encode, decode as dict_decode, Dictionary, DictionaryState};
