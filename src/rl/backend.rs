//! Backend type alias and device management
//!
//! Observations are tiny vectors, so the CPU NdArray backend is all the
//! environment needs. Learning code is free to build its own backend and
//! pass the matching device to `PongEnvironment::new`.

use burn::backend::ndarray::{NdArray, NdArrayDevice};

/// Backend used by the bundled modes and the environment registry defaults
pub type EnvBackend = NdArray<f32>;

/// Get the default device for computation
pub fn default_device() -> NdArrayDevice {
    NdArrayDevice::default()
}
