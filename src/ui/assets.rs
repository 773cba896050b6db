//! Background frames
//!
//! Five smiley frames: frame 0 is the resting face, frames 1 to 4 are the
//! eye positions of the tap animation. Ambient mode uses a desaturated copy
//! of frame 0.

use heapless::Vec;

use super::canvas::Bitmap;
use super::mode::AmbientProperties;
use super::renderer::Surface;
use crate::system::host::Resources;
use crate::{debug, Result};

pub const FRAME_COUNT: usize = 5;

/// Identity of a bundled background frame.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BitmapId {
    Smiley1,
    Smiley2,
    Smiley3,
    Smiley4,
    Smiley5,
}

impl BitmapId {
    pub const ALL: [BitmapId; FRAME_COUNT] = [
        BitmapId::Smiley1,
        BitmapId::Smiley2,
        BitmapId::Smiley3,
        BitmapId::Smiley4,
        BitmapId::Smiley5,
    ];

    /// Position in the frame sequence, `0` being the resting face.
    pub fn frame(self) -> usize {
        self as usize
    }
}

/// Source frames plus their copies scaled to the current surface.
pub struct AssetSet<B> {
    sources: [B; FRAME_COUNT],
    frames: Vec<B, FRAME_COUNT>,
    gray: Option<B>,
    scaled_width: Option<u32>,
}

impl<B: Bitmap> AssetSet<B> {
    /// Load every frame. Any missing frame fails the whole set.
    pub fn load<R>(resources: &mut R) -> Result<Self>
    where
        R: Resources<Bitmap = B>,
    {
        let [s1, s2, s3, s4, s5] = BitmapId::ALL;
        let sources = [
            resources.load_bitmap(s1)?,
            resources.load_bitmap(s2)?,
            resources.load_bitmap(s3)?,
            resources.load_bitmap(s4)?,
            resources.load_bitmap(s5)?,
        ];
        debug!(
            "Loaded {} frames of {}x{}",
            FRAME_COUNT,
            sources[0].width(),
            sources[0].height()
        );

        Ok(Self {
            sources,
            frames: Vec::new(),
            gray: None,
            scaled_width: None,
        })
    }

    /// Scale every frame to the surface width, keeping the aspect ratio of
    /// frame 0, and rebuild the gray frame when the panel allows it.
    ///
    /// Frames are always scaled from the sources, so repeating a resize for
    /// the same surface width changes nothing. Returns whether frames were
    /// rebuilt.
    pub fn resize<R>(
        &mut self,
        resources: &mut R,
        surface: &Surface,
        properties: AmbientProperties,
    ) -> Result<bool>
    where
        R: Resources<Bitmap = B>,
    {
        if self.scaled_width == Some(surface.width) {
            return Ok(false);
        }

        let base = &self.sources[0];
        let width = surface.width;
        let height = (base.height() as u64 * width as u64 / base.width().max(1) as u64) as u32;
        debug!(
            "Scaling frames from {}x{} to {}x{}",
            base.width(),
            base.height(),
            width,
            height
        );

        let mut frames = Vec::new();
        for source in self.sources.iter() {
            let frame = resources.scale_bitmap(source, width, height, true)?;
            // Capacity matches the source array
            let _ = frames.push(frame);
        }
        self.frames = frames;
        self.scaled_width = Some(width);
        self.gray = None;
        self.refresh_gray(resources, properties)?;

        Ok(true)
    }

    /// Keep the gray frame in line with the panel capabilities: present iff
    /// neither low-bit nor burn-in protection is active.
    pub fn refresh_gray<R>(&mut self, resources: &mut R, properties: AmbientProperties) -> Result<()>
    where
        R: Resources<Bitmap = B>,
    {
        if !properties.allows_gray_background() {
            self.gray = None;
        } else if self.gray.is_none() {
            if let Some(background) = self.frames.first() {
                self.gray = Some(resources.desaturate(background)?);
            }
        }
        Ok(())
    }

    /// Scaled frame `index`, `None` before the first resize.
    pub fn frame(&self, index: usize) -> Option<&B> {
        self.frames.get(index)
    }

    /// Desaturated frame 0.
    pub fn gray(&self) -> Option<&B> {
        self.gray.as_ref()
    }

    pub fn source(&self, id: BitmapId) -> &B {
        &self.sources[id.frame()]
    }

    pub fn is_scaled(&self) -> bool {
        !self.frames.is_empty()
    }
}
