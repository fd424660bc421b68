pub mod swap_detector;
pub mod transfer_extractor;

// Re-export main components
pub use swap_detector::{detect_swap, SwapCandidate, TransferLedger, TransferRecord};
