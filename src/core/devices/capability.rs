/// Device class, ordered from least to most preferred.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum DeviceTier {
    Software,
    Other,
    Virtual,
    Integrated,
    Discrete,
}

/// What a probed device offers. Candidates compare by tier first, then by
/// how many compute invocations fit in one workgroup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct DeviceCapability {
    pub tier: DeviceTier,
    pub max_invocations: u32,
}

#[derive(Debug)]
pub struct DeviceCandidate<T> {
    pub name: String,
    pub capability: DeviceCapability,
    pub supports_f64: bool,
    pub handle: T,
}

/// Picks the most capable candidate that can run double-precision shaders.
/// On equal capability the earliest candidate wins.
pub fn select_best<T>(
    candidates: impl IntoIterator<Item = DeviceCandidate<T>>,
) -> Option<DeviceCandidate<T>> {
    candidates
        .into_iter()
        .filter(|candidate| candidate.supports_f64)
        .fold(None, |best: Option<DeviceCandidate<T>>, candidate| match best {
            Some(current) if current.capability >= candidate.capability => Some(current),
            _ => Some(candidate),
        })
}
