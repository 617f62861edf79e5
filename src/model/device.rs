use candle_core::Device;
use tracing::info;

#[cfg(any(feature = "metal", feature = "cuda"))]
use tracing::warn;

type DeviceOpener = fn() -> candle_core::Result<Device>;

#[cfg(feature = "metal")]
fn open_metal() -> candle_core::Result<Device> {
    Device::new_metal(0)
}

#[cfg(feature = "cuda")]
fn open_cuda() -> candle_core::Result<Device> {
    Device::new_cuda(0)
}

/// GPU backends compiled into this build, in preference order.
fn gpu_backends() -> Vec<(&'static str, DeviceOpener)> {
    #[allow(unused_mut)]
    let mut backends: Vec<(&'static str, DeviceOpener)> = Vec::new();

    #[cfg(feature = "metal")]
    backends.push(("metal", open_metal));

    #[cfg(feature = "cuda")]
    backends.push(("cuda", open_cuda));

    backends
}

/// Picks the first GPU backend that opens device 0, else the CPU.
pub fn select_device() -> Device {
    for (backend, open) in gpu_backends() {
        match open() {
            Ok(device) => {
                info!(backend, "Running inference on GPU");
                return device;
            }
            #[cfg(any(feature = "metal", feature = "cuda"))]
            Err(e) => warn!(backend, error = %e, "GPU backend unavailable"),
            #[cfg(not(any(feature = "metal", feature = "cuda")))]
            Err(_) => {}
        }
    }

    info!("Running inference on CPU");
    Device::Cpu
}
