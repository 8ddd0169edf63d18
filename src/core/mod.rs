//=========================================================================
// Engine Core
//
// Engine-side state the platform bridge writes into.
//
// The platform layer owns no engine logic; it forwards host callbacks
// into these subsystems:
// - `graphics`: handle bundle, surface record, renderer binding
// - `touch`: order-preserving queue of normalized pointer events
// - `window`: size queries backed by the surface record
//
//=========================================================================

pub mod graphics;
pub mod touch;
pub mod window;
