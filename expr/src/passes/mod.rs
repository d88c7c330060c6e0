mod analyze;

pub use self::analyze::CircuitToTransfer;
