//! Host environment traits.
//!
//! The embedding host owns the things the engine cannot know: measured
//! element geometry and the platform fullscreen machinery. Both arrive
//! through small traits so sessions run identically under a real UI, a
//! test, or the headless CLI.

use parking_lot::Mutex;
use soundstage_common::error::StageResult;
use soundstage_overlay_model::{OrientationLock, Size};

/// Measured geometry supplied by the host.
pub trait GeometryHost: Send + Sync {
    /// Size of the element containing the overlay canvas.
    fn container_size(&self) -> Size;

    /// Size of the full display area (consulted in fullscreen).
    fn viewport_size(&self) -> Size;
}

/// Platform fullscreen and orientation machinery.
///
/// Requests are fire-and-forget: the session treats the platform's
/// fullscreen-change notification (forwarded as a command) as the truth,
/// because fullscreen can be exited outside the engine's control.
pub trait FullscreenPlatform: Send + Sync {
    fn request_enter(&self) -> StageResult<()>;

    fn request_exit(&self) -> StageResult<()>;

    /// Best effort; rejection must not surface to the user.
    fn lock_orientation(&self, target: OrientationLock) -> StageResult<()>;

    fn unlock_orientation(&self);
}

/// Fixed measurements for tests and headless playback.
#[derive(Debug)]
pub struct FixedGeometry {
    container: Mutex<Size>,
    viewport: Mutex<Size>,
}

impl FixedGeometry {
    pub fn new(container: Size, viewport: Size) -> Self {
        Self {
            container: Mutex::new(container),
            viewport: Mutex::new(viewport),
        }
    }

    /// Update the measured container (e.g., simulating a resize).
    pub fn set_container(&self, size: Size) {
        *self.container.lock() = size;
    }

    pub fn set_viewport(&self, size: Size) {
        *self.viewport.lock() = size;
    }
}

impl GeometryHost for FixedGeometry {
    fn container_size(&self) -> Size {
        *self.container.lock()
    }

    fn viewport_size(&self) -> Size {
        *self.viewport.lock()
    }
}

/// A platform with no real fullscreen: requests succeed and are logged,
/// and the host is expected to forward confirmation itself.
#[derive(Debug, Default)]
pub struct HeadlessPlatform;

impl FullscreenPlatform for HeadlessPlatform {
    fn request_enter(&self) -> StageResult<()> {
        tracing::debug!("Headless platform: fullscreen enter requested");
        Ok(())
    }

    fn request_exit(&self) -> StageResult<()> {
        tracing::debug!("Headless platform: fullscreen exit requested");
        Ok(())
    }

    fn lock_orientation(&self, target: OrientationLock) -> StageResult<()> {
        tracing::debug!(?target, "Headless platform: orientation lock requested");
        Ok(())
    }

    fn unlock_orientation(&self) {
        tracing::debug!("Headless platform: orientation unlocked");
    }
}
