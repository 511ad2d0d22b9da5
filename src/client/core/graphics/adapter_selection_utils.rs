//! Utilities for selecting the best adapter for the current system
//!
//! This module contains functions that help in selecting the best adapter for the current system based on the following criteria:
//! - Whether it can present to the window at all
//! - Type of adapter (CPU, Integrated GPU, Discrete GPU, etc.)
//! - Backend (Vulkan, DX12, Metal, etc.)

use tracing::info;
use wgpu::{Adapter, AdapterInfo, Backend, DeviceType, Surface};

/// Used to weight the importance of the type of adapter
///
/// The type of adapter is the most important since it determines the performance of the adapter.
///
/// # Examples
/// You can use these weights to determine the type score of an adapter like so:
/// ```rust,ignore
/// get_type_score(info) * TYPE_SCORE_WEIGHT
/// ```
const TYPE_SCORE_WEIGHT: i8 = 2;

/// Used to weight the importance of the backend
///
/// The backend is the least important since it only determines the API used.
///
/// # Examples
/// You can use these weights to determine the backend score of an adapter like so:
/// ```rust,ignore
/// get_backend_score(info) * BACKEND_SCORE_WEIGHT
/// ```
const BACKEND_SCORE_WEIGHT: i8 = 1;

/// Type alias for the score of an adapter
pub type Score = i8;

/// Type alias for the index of an adapter in a vector
pub type Index = usize;

/// Picks the adapter with the highest score that can present to `surface`
///
/// # Arguments
/// * `adapters` - The list of adapters to choose from
/// * `surface` - The surface the adapter has to be able to present to
///
/// # Returns
/// The best adapter based on the scores, or [`None`] if none of them can be used
///
/// # Examples
/// This gets the best adapter from the adapters wgpu found:
/// ```rust,ignore
/// let adapters = instance.enumerate_adapters(Backends::all());
/// let adapter = get_best_adapter(adapters, &surface);
/// ```
pub fn get_best_adapter(adapters: Vec<Adapter>, surface: &Surface) -> Option<Adapter> {
    let mut adapters: Vec<Adapter> = adapters
        .into_iter()
        .filter(|adapter| is_wanted_adapter(&adapter.get_info()) && adapter.is_surface_supported(surface))
        .collect();

    let infos: Vec<AdapterInfo> = adapters.iter().map(Adapter::get_info).collect();
    let best = rank_adapters(&infos).first().map(|(i, _)| *i)?;

    Some(adapters.swap_remove(best))
}

/// Sorts adapters from best to worst
///
/// # Returns
/// The index of each adapter in `infos` paired with its score, highest score first.
/// Adapters with equal scores keep their original order.
pub fn rank_adapters(infos: &[AdapterInfo]) -> Vec<(Index, Score)> {
    let mut adapter_scores: Vec<(Index, Score)> = infos
        .iter()
        .enumerate()
        .map(|(i, info)| (i, get_adapter_score(info)))
        .collect();

    // Sort adapters based on score
    adapter_scores.sort_by(|a, b| b.1.cmp(&a.1));

    // Log scores
    for (i, score) in adapter_scores.iter() {
        info!(
            "Adapter: {} with {:?}; Score: {}",
            infos[*i].name, infos[*i].backend, score
        );
    }

    adapter_scores
}

/// Gets the score of an individual adapter based on the criteria
pub fn get_adapter_score(info: &AdapterInfo) -> Score {
    get_type_score(info) * TYPE_SCORE_WEIGHT + get_backend_score(info) * BACKEND_SCORE_WEIGHT
}

/// Whether an adapter should be considered at all
///
/// In this case, all CPU adapters are removed.
fn is_wanted_adapter(info: &AdapterInfo) -> bool {
    info.device_type != DeviceType::Cpu
}

/// Gets the unweighted score of an adapter based on the backend
///
/// # Returns
/// The unweighted backend score of the adapter
/// or 0 when the backend is not supported on the current platform
fn get_backend_score(info: &AdapterInfo) -> Score {
    let backend = info.backend;

    #[cfg(target_os = "windows")]
    return match backend {
        Backend::Empty => 0,
        Backend::BrowserWebGpu => 0,
        Backend::Metal => 0,
        Backend::Gl => 1,
        Backend::Vulkan => 2,
        Backend::Dx12 => 3,
    };

    #[cfg(target_os = "macos")]
    return match backend {
        Backend::Empty => 0,
        Backend::BrowserWebGpu => 0,
        Backend::Dx12 => 0,
        Backend::Gl => 1,
        Backend::Vulkan => 2,
        Backend::Metal => 3,
    };

    #[cfg(not(any(target_os = "windows", target_os = "macos")))]
    return match backend {
        Backend::Empty => 0,
        Backend::BrowserWebGpu => 0,
        Backend::Dx12 => 0,
        Backend::Metal => 0,
        Backend::Gl => 1,
        Backend::Vulkan => 2,
    };
}

/// Gets the unweighted score of an adapter based on the type of adapter
///
/// # Notes
/// The value for CPU adapters is arbitrary since they wouldn't go through anyway.
fn get_type_score(info: &AdapterInfo) -> Score {
    match info.device_type {
        DeviceType::Other => 1,
        DeviceType::Cpu => -16,
        // Integrated GPUs are ranked the same as Virtual GPUs
        DeviceType::IntegratedGpu => 2,
        DeviceType::VirtualGpu => 2,
        DeviceType::DiscreteGpu => 3,
    }
}

#[cfg(test)]
mod tests {
    use assert2::assert;
    use wgpu::{AdapterInfo, Backend, DeviceType};

    use super::{get_adapter_score, is_wanted_adapter, rank_adapters};

    /// Builds an adapter description with only the fields scoring looks at
    fn info(name: &str, device_type: DeviceType, backend: Backend) -> AdapterInfo {
        AdapterInfo {
            name: name.to_string(),
            vendor: 0,
            device: 0,
            device_type,
            driver: String::new(),
            driver_info: String::new(),
            backend,
        }
    }

    #[test]
    fn discrete_beats_integrated_on_the_same_backend() {
        let infos = [
            info("integrated", DeviceType::IntegratedGpu, Backend::Vulkan),
            info("discrete", DeviceType::DiscreteGpu, Backend::Vulkan),
        ];

        let ranked = rank_adapters(&infos);

        assert!(ranked[0].0 == 1);
        assert!(ranked[1].0 == 0);
    }

    #[test]
    fn device_type_outweighs_backend() {
        let discrete_gl = info("discrete", DeviceType::DiscreteGpu, Backend::Gl);
        let integrated_vulkan = info("integrated", DeviceType::IntegratedGpu, Backend::Vulkan);

        assert!(get_adapter_score(&discrete_gl) > get_adapter_score(&integrated_vulkan));
    }

    #[test]
    fn cpu_adapters_are_filtered_out() {
        assert!(!is_wanted_adapter(&info("llvmpipe", DeviceType::Cpu, Backend::Vulkan)));
        assert!(is_wanted_adapter(&info("gpu", DeviceType::Other, Backend::Gl)));
    }

    #[test]
    fn ties_keep_enumeration_order() {
        let infos = [
            info("first", DeviceType::DiscreteGpu, Backend::Vulkan),
            info("second", DeviceType::DiscreteGpu, Backend::Vulkan),
        ];

        let ranked = rank_adapters(&infos);

        assert!(ranked.iter().map(|(i, _)| *i).collect::<Vec<_>>() == vec![0, 1]);
    }

    #[test]
    fn no_adapters_ranks_nothing() {
        assert!(rank_adapters(&[]).is_empty());
    }
}
