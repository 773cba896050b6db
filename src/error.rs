//! Watch face errors

use crate::ui::assets::BitmapId;

/// Failures surfaced to the host callback that produced them.
///
/// The core never retries: there is no I/O worth retrying.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Error {
    /// A background frame is unavailable. Startup fails as a whole.
    #[error("background frame {0:?} could not be loaded")]
    AssetLoad(BitmapId),
    /// The host reported a zero-sized or negative surface.
    #[error("surface {width}x{height} cannot be drawn on")]
    SurfaceInvalid { width: i32, height: i32 },
    /// The drawing backend rejected a primitive.
    #[error("drawing primitive failed")]
    DrawPrimitive,
}

pub type Result<T, E = Error> = core::result::Result<T, E>;
