use std::collections::HashMap;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::rect::Rect;
use crate::surface::Surface;
use crate::texture_keys::{validate_texture_handle, TextureKeyError};

#[derive(Debug, Error)]
pub enum TextureError {
    #[error("no texture registered for handle '{handle}'")]
    NotFound { handle: String },
    #[error("a texture is already registered for handle '{handle}'")]
    AlreadyRegistered { handle: String },
    #[error(transparent)]
    InvalidHandle(#[from] TextureKeyError),
    #[error("failed to load texture image '{path}': {reason}")]
    Load { path: PathBuf, reason: String },
    #[error("rgba buffer holds {actual} bytes, expected {expected} for {width}x{height}")]
    SizeMismatch {
        width: u32,
        height: u32,
        expected: usize,
        actual: usize,
    },
    #[error("animated texture needs at least one frame")]
    NoFrames,
    #[error("animated texture frame duration must be non-zero")]
    ZeroFrameDuration,
}

/// Decoded RGBA pixels of one texture frame.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TextureImage {
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl TextureImage {
    pub fn from_rgba(width: u32, height: u32, rgba: Vec<u8>) -> Result<Self, TextureError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self {
            width,
            height,
            rgba,
        })
    }

    pub fn load_png(path: &Path) -> Result<Self, TextureError> {
        let loaded = image::ImageReader::open(path)
            .map_err(|error| TextureError::Load {
                path: path.to_path_buf(),
                reason: format!("open_failed: {error}"),
            })?
            .decode()
            .map_err(|error| TextureError::Load {
                path: path.to_path_buf(),
                reason: format!("decode_failed: {error}"),
            })?;
        let rgba = loaded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(width, height, rgba.into_raw())
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

/// A registered texture. Animated textures can only be built through
/// [`Texture::animated`], which enforces a non-empty frame list and a
/// non-zero frame duration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Texture {
    kind: TextureKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum TextureKind {
    Static(TextureImage),
    Animated {
        frames: Vec<TextureImage>,
        /// Ticks each frame stays on screen.
        frame_duration: u64,
        /// Looping animations wrap; one-shot ones hold the last frame.
        loops: bool,
    },
}

impl Texture {
    pub fn stationary(image: TextureImage) -> Self {
        Self {
            kind: TextureKind::Static(image),
        }
    }

    pub fn animated(
        frames: Vec<TextureImage>,
        frame_duration: u64,
        loops: bool,
    ) -> Result<Self, TextureError> {
        if frames.is_empty() {
            return Err(TextureError::NoFrames);
        }
        if frame_duration == 0 {
            return Err(TextureError::ZeroFrameDuration);
        }
        Ok(Self {
            kind: TextureKind::Animated {
                frames,
                frame_duration,
                loops,
            },
        })
    }

    pub fn is_animated(&self) -> bool {
        matches!(self.kind, TextureKind::Animated { .. })
    }

    fn image_for_tick(&self, tick: u64) -> &TextureImage {
        match &self.kind {
            TextureKind::Static(image) => image,
            TextureKind::Animated {
                frames,
                frame_duration,
                loops,
            } => {
                let step = tick / frame_duration;
                let index = if *loops {
                    (step % frames.len() as u64) as usize
                } else {
                    (step as usize).min(frames.len() - 1)
                };
                &frames[index]
            }
        }
    }

    /// Blits the frame for `tick` into the destination rect.
    pub fn draw(&self, tick: u64, surface: &mut Surface<'_>, x: i32, y: i32, size: i32) {
        let image = self.image_for_tick(tick);
        surface.blit_scaled(
            image.width(),
            image.height(),
            image.rgba(),
            Rect::new(x, y, size, size),
        );
    }
}

/// Handle-addressed catalog of textures.
#[derive(Debug, Default)]
pub struct TextureRegistry {
    textures: HashMap<String, Texture>,
}

impl TextureRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn register_static(
        &mut self,
        handle: &str,
        image: TextureImage,
    ) -> Result<(), TextureError> {
        self.register(handle, Texture::stationary(image))
    }

    pub fn register_static_from_file(
        &mut self,
        handle: &str,
        path: &Path,
    ) -> Result<(), TextureError> {
        let image = TextureImage::load_png(path)?;
        self.register_static(handle, image)
    }

    pub fn register_animated(
        &mut self,
        handle: &str,
        frames: Vec<TextureImage>,
        frame_duration: u64,
        loops: bool,
    ) -> Result<(), TextureError> {
        let texture = Texture::animated(frames, frame_duration, loops)?;
        self.register(handle, texture)
    }

    fn register(&mut self, handle: &str, texture: Texture) -> Result<(), TextureError> {
        validate_texture_handle(handle)?;
        if self.textures.contains_key(handle) {
            return Err(TextureError::AlreadyRegistered {
                handle: handle.to_string(),
            });
        }
        self.textures.insert(handle.to_string(), texture);
        Ok(())
    }

    pub fn resolve(&self, handle: &str) -> Result<&Texture, TextureError> {
        self.textures
            .get(handle)
            .ok_or_else(|| TextureError::NotFound {
                handle: handle.to_string(),
            })
    }

    /// Unregistered handles count as not animated.
    pub fn is_animated(&self, handle: &str) -> bool {
        self.textures
            .get(handle)
            .map(Texture::is_animated)
            .unwrap_or(false)
    }
}
