use candle_core::Device;
use tracing::warn;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::info;

#[cfg(not(any(feature = "metal", feature = "cuda")))]
use tracing::debug;

/// Selects the compute device based on enabled features (falls back to CPU).
pub fn select_device() -> Device {
    #[cfg(feature = "metal")]
    {
        match Device::new_metal(0) {
            Ok(device) => {
                info!("Using Metal GPU acceleration");
                return device;
            }
            Err(e) => {
                warn!(error = %e, "Metal device unavailable");
            }
        }
    }

    #[cfg(feature = "cuda")]
    {
        match Device::new_cuda(0) {
            Ok(device) => {
                info!("Using CUDA GPU acceleration");
                return device;
            }
            Err(e) => {
                warn!(error = %e, "CUDA device unavailable");
            }
        }
    }

    #[cfg(not(any(feature = "metal", feature = "cuda")))]
    debug!("No GPU features enabled");

    if cfg!(any(feature = "metal", feature = "cuda")) {
        warn!("Falling back to CPU device");
    }

    Device::Cpu
}
