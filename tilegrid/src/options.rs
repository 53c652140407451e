/// Configuration for [`crate::GridLayout`].
///
/// All sizes are in logical pixels. Fields are public; the `with_*` builders exist so callers
/// can tweak a couple of values off [`GridOptions::default`] in one expression.
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridOptions {
    pub tile_width: f32,
    pub tile_height: f32,
    /// Minimum horizontal space between tiles. The actual gap is solved per width.
    pub min_gap: f32,
    /// Vertical space between rows.
    pub row_gap: f32,
    /// Container widths below this are treated as "mid-resize" and skipped.
    pub min_container_width: f32,
    /// Fade-in duration applied when a tile's payload is attached.
    pub fade_in_ms: u64,
}

impl GridOptions {
    /// Creates options for a fixed tile size. `row_gap` starts out equal to `min_gap`.
    pub fn new(tile_width: f32, tile_height: f32, min_gap: f32) -> Self {
        Self {
            tile_width,
            tile_height,
            min_gap,
            row_gap: min_gap,
            min_container_width: 10.0,
            fade_in_ms: 200,
        }
    }

    pub fn with_tile_size(mut self, tile_width: f32, tile_height: f32) -> Self {
        self.tile_width = tile_width;
        self.tile_height = tile_height;
        self
    }

    pub fn with_min_gap(mut self, min_gap: f32) -> Self {
        self.min_gap = min_gap;
        self
    }

    pub fn with_row_gap(mut self, row_gap: f32) -> Self {
        self.row_gap = row_gap;
        self
    }

    pub fn with_min_container_width(mut self, min_container_width: f32) -> Self {
        self.min_container_width = min_container_width;
        self
    }

    pub fn with_fade_in_ms(mut self, fade_in_ms: u64) -> Self {
        self.fade_in_ms = fade_in_ms;
        self
    }

    /// Distance between the tops of two consecutive rows.
    pub fn row_pitch(&self) -> f32 {
        self.tile_height + self.row_gap
    }
}

impl Default for GridOptions {
    fn default() -> Self {
        Self::new(180.0, 260.0, 12.0)
    }
}

/// Configuration for [`crate::SmoothScroll`].
#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct SmoothScrollOptions {
    /// Pixels moved per wheel notch, before `unit_modifier`.
    pub base_change: f32,
    /// Multiplier for the input device (e.g. lines vs. pixels).
    pub unit_modifier: f32,
    pub duration_ms: u64,
    pub easing: Easing,
}

impl SmoothScrollOptions {
    pub fn with_base_change(mut self, base_change: f32) -> Self {
        self.base_change = base_change;
        self
    }

    pub fn with_unit_modifier(mut self, unit_modifier: f32) -> Self {
        self.unit_modifier = unit_modifier;
        self
    }

    pub fn with_duration_ms(mut self, duration_ms: u64) -> Self {
        self.duration_ms = duration_ms;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }
}

impl Default for SmoothScrollOptions {
    fn default() -> Self {
        Self {
            base_change: 150.0,
            unit_modifier: 1.0,
            duration_ms: 100,
            easing: Easing::Linear,
        }
    }
}

/// Shape of a smooth-scroll transition over its fixed duration.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Easing {
    /// Constant speed. A fused gesture keeps moving at the new speed without a visible seam.
    #[default]
    Linear,
    SmoothStep,
    /// Fast start, slow landing (cubic).
    EaseOut,
}

impl Easing {
    /// Maps elapsed progress to travelled distance, both in `0.0..=1.0`.
    pub fn apply(self, progress: f32) -> f32 {
        let t = if progress.is_nan() {
            1.0
        } else {
            progress.clamp(0.0, 1.0)
        };
        match self {
            Self::Linear => t,
            Self::SmoothStep => t * t * (3.0 - 2.0 * t),
            Self::EaseOut => {
                let rest = 1.0 - t;
                1.0 - rest * rest * rest
            }
        }
    }
}
