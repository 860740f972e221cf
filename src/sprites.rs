//! Sprite content boxes
//!
//! The asset layer decodes images; the simulation only ever sees the tight
//! box around each sprite's opaque pixels. Collision uses that box so cars
//! don't crash into each other's transparent padding.

use std::collections::HashMap;

use glam::Vec2;
use serde::{Deserialize, Serialize};

use crate::consts::ENEMY_VARIANTS;
use crate::tuning::Tuning;

/// Alpha values above this count as solid
pub const ALPHA_THRESHOLD: u8 = 127;

/// Tight box around a sprite's opaque pixels, relative to its top-left corner
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ContentBox {
    pub offset: Vec2,
    pub size: Vec2,
}

impl ContentBox {
    /// The whole nominal box (solid sprite, or one that failed to load)
    pub fn full(width: f32, height: f32) -> Self {
        Self {
            offset: Vec2::ZERO,
            size: Vec2::new(width, height),
        }
    }

    /// Bounding box of every pixel whose alpha exceeds [`ALPHA_THRESHOLD`]
    pub fn from_mask(mask: &AlphaMask) -> Self {
        let mut min = (u32::MAX, u32::MAX);
        let mut max = (0u32, 0u32);
        let mut any = false;

        for y in 0..mask.height {
            for x in 0..mask.width {
                if mask.alpha(x, y) > ALPHA_THRESHOLD {
                    any = true;
                    min = (min.0.min(x), min.1.min(y));
                    max = (max.0.max(x), max.1.max(y));
                }
            }
        }

        if !any {
            return Self::full(mask.width as f32, mask.height as f32);
        }

        Self {
            offset: Vec2::new(min.0 as f32, min.1 as f32),
            size: Vec2::new((max.0 - min.0 + 1) as f32, (max.1 - min.1 + 1) as f32),
        }
    }

    /// Clamp into a `width` x `height` nominal box. Degenerate input becomes the full box.
    pub fn fit_within(self, width: f32, height: f32) -> Self {
        let bounds = Vec2::new(width, height);
        let offset = self.offset.clamp(Vec2::ZERO, bounds);
        let size = self.size.clamp(Vec2::ZERO, bounds - offset);
        if !offset.is_finite() || !size.is_finite() || size.x <= 0.0 || size.y <= 0.0 {
            return Self::full(width, height);
        }
        Self { offset, size }
    }
}

/// Per-pixel alpha channel of a sprite already scaled to its nominal size
#[derive(Debug, Clone)]
pub struct AlphaMask {
    width: u32,
    height: u32,
    alpha: Vec<u8>,
}

impl AlphaMask {
    /// Row-major alpha values. Returns `None` if the buffer doesn't match the dimensions.
    pub fn new(width: u32, height: u32, alpha: Vec<u8>) -> Option<Self> {
        if alpha.len() != (width as usize) * (height as usize) {
            return None;
        }
        Some(Self {
            width,
            height,
            alpha,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    fn alpha(&self, x: u32, y: u32) -> u8 {
        self.alpha[(y * self.width + x) as usize]
    }
}

/// Which sprite a vehicle uses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SpriteKind {
    Player,
    /// Traffic car, variant 1..=ENEMY_VARIANTS
    Enemy(u8),
}

/// Asset-side source of content boxes.
///
/// Must always answer: a sprite that failed to load reports its full nominal box.
pub trait SpriteCatalog {
    fn content_box(&self, kind: SpriteKind, width: f32, height: f32) -> ContentBox;
}

/// Treats every sprite as fully opaque
#[derive(Debug, Clone, Copy, Default)]
pub struct SolidCatalog;

impl SpriteCatalog for SolidCatalog {
    fn content_box(&self, _kind: SpriteKind, width: f32, height: f32) -> ContentBox {
        ContentBox::full(width, height)
    }
}

/// Content boxes computed from decoded alpha masks
#[derive(Debug, Clone, Default)]
pub struct MaskCatalog {
    masks: HashMap<SpriteKind, AlphaMask>,
}

impl MaskCatalog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, kind: SpriteKind, mask: AlphaMask) {
        self.masks.insert(kind, mask);
    }
}

impl SpriteCatalog for MaskCatalog {
    fn content_box(&self, kind: SpriteKind, width: f32, height: f32) -> ContentBox {
        match self.masks.get(&kind) {
            Some(mask) if mask.width as f32 == width && mask.height as f32 == height => {
                ContentBox::from_mask(mask)
            }
            Some(mask) => {
                log::warn!(
                    "{:?} mask is {}x{}, expected {}x{} - using full box",
                    kind,
                    mask.width,
                    mask.height,
                    width,
                    height
                );
                ContentBox::full(width, height)
            }
            None => {
                log::warn!("No mask for {:?} - using full box", kind);
                ContentBox::full(width, height)
            }
        }
    }
}

/// Content boxes resolved once per session
#[derive(Debug, Clone)]
pub struct SpriteTable {
    pub player: ContentBox,
    /// Indexed by variant - 1
    pub enemies: Vec<ContentBox>,
}

impl SpriteTable {
    pub fn resolve(catalog: &dyn SpriteCatalog, tuning: &Tuning) -> Self {
        let (pw, ph) = (tuning.player_width, tuning.player_height);
        let (ew, eh) = (tuning.enemy_width, tuning.enemy_height);
        Self {
            player: catalog.content_box(SpriteKind::Player, pw, ph).fit_within(pw, ph),
            enemies: (1..=ENEMY_VARIANTS)
                .map(|v| {
                    catalog
                        .content_box(SpriteKind::Enemy(v), ew, eh)
                        .fit_within(ew, eh)
                })
                .collect(),
        }
    }

    /// Content box for an enemy variant (1-based)
    pub fn enemy(&self, variant: u8) -> ContentBox {
        let index = usize::from(variant.max(1)) - 1;
        self.enemies[index.min(self.enemies.len() - 1)]
    }
}
