//! Collaborator traits consumed by the mapping core.

use crate::coord::Displacement;
use crate::error::LocalizationError;

/// Supplies the robot's planar displacement since the previous tick.
///
/// Called exactly once per tick by the tick engine. Implementations own
/// any interrupt or thread hand-off needed to collect the estimate; the
/// mapping core never touches raw sensor buffers.
///
/// # Contract
///
/// The magnitude of each returned displacement must stay within the map's
/// per-tick bound (robot top speed times tick period). A displacement that
/// would shift the map by more than that is rejected as a fatal fault for
/// the tick, not clamped.
///
/// # Examples
///
/// ```
/// use egomap_core::{Displacement, LocalizationError, LocalizationSource};
///
/// struct Stationary;
///
/// impl LocalizationSource for Stationary {
///     fn name(&self) -> &str { "stationary" }
///
///     fn displacement(&mut self) -> Result<Displacement, LocalizationError> {
///         Ok(Displacement::ZERO)
///     }
/// }
///
/// let mut src = Stationary;
/// assert_eq!(src.displacement().unwrap(), Displacement::ZERO);
/// ```
pub trait LocalizationSource: Send + 'static {
    /// Human-readable name for logs and error reports.
    fn name(&self) -> &str;

    /// Displacement in millimetres accumulated since the previous call.
    fn displacement(&mut self) -> Result<Displacement, LocalizationError>;
}

impl<S: LocalizationSource + ?Sized> LocalizationSource for Box<S> {
    fn name(&self) -> &str {
        (**self).name()
    }

    fn displacement(&mut self) -> Result<Displacement, LocalizationError> {
        (**self).displacement()
    }
}
