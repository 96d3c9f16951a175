use candle_core::Device;
use tracing::warn;

use super::error::ClassifierError;

/// Selects the compute device for inference (falls back to CPU).
///
/// GPU backends are only attempted when the corresponding cargo feature is
/// enabled. A failed GPU probe is logged and never fatal.
pub fn select_device() -> Result<Device, ClassifierError> {
    let mut failures: Vec<String> = Vec::new();

    if let Some(device) = try_gpu(&mut failures) {
        return Ok(device);
    }

    let reason = if !cfg!(any(feature = "metal", feature = "cuda")) {
        "no GPU backend compiled".to_string()
    } else {
        failures.join("; ")
    };

    warn!(reason = %reason, "Falling back to CPU device");
    Ok(Device::Cpu)
}

#[cfg(any(feature = "metal", feature = "cuda"))]
fn try_gpu(failures: &mut Vec<String>) -> Option<Device> {
    use tracing::info;

    #[cfg(feature = "metal")]
    match Device::new_metal(0) {
        Ok(device) => {
            info!("Using Metal GPU acceleration");
            return Some(device);
        }
        Err(e) => failures.push(format!("metal failed: {e}")),
    }

    #[cfg(feature = "cuda")]
    match Device::new_cuda(0) {
        Ok(device) => {
            info!("Using CUDA GPU acceleration");
            return Some(device);
        }
        Err(e) => failures.push(format!("cuda failed: {e}")),
    }

    None
}

#[cfg(not(any(feature = "metal", feature = "cuda")))]
fn try_gpu(_failures: &mut Vec<String>) -> Option<Device> {
    tracing::debug!("No GPU features enabled");
    None
}
