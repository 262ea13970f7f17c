//! The wave recurrence: seven scrolling horizontal controls plus two
//! alternating vertical levels.
//!
//! The wave is three chained quadratic Bézier segments spanning
//! `surface_width * 1.5`: the visible surface plus half a tile off-screen on
//! each side. Every frame all seven x-coordinates advance by `speed`; once the
//! leftmost anchor crosses the origin the pattern has scrolled exactly one
//! tile (`surface_width / 2`) and the coordinates reseed to the canonical
//! layout while the two control levels trade places. The swap is what keeps
//! consecutive tiles from reading as perfectly periodic at the seam.

/// Mutable per-instance state of one animating wave.
///
/// Anchors always satisfy `start0 > end0 > end1 > end2` with a constant gap
/// of half the surface width between neighbors, so the three segments tile
/// without gaps or overlaps.
#[derive(Debug, Clone, PartialEq)]
pub struct WaveState {
    /// Drawing-surface width in pixels.
    pub width: f64,
    /// Drawing-surface height in pixels.
    pub height: f64,
    /// Vertical center line the anchors sit on.
    pub baseline: f64,
    /// Rightmost anchor; segment 0 runs start0 -> end0.
    pub start0: f64,
    /// Shared anchor between segments 0 and 1.
    pub end0: f64,
    /// Shared anchor between segments 1 and 2.
    pub end1: f64,
    /// Leftmost anchor; crossing the origin triggers a reseed.
    pub end2: f64,
    /// Control x for segment 0.
    pub ctrl0: f64,
    /// Control x for segment 1.
    pub ctrl1: f64,
    /// Control x for segment 2.
    pub ctrl2: f64,
    /// Control height used by segments 0 and 2.
    pub level_a: f64,
    /// Control height used by segment 1.
    pub level_b: f64,
    /// Pixels advanced per frame. Must stay below `width / 2` per frame or a
    /// tile boundary can scroll past without reseeding (visual artifact only,
    /// not enforced).
    pub speed: f64,
}

impl WaveState {
    /// Create a wave over a `width` x `height` surface.
    ///
    /// `baseline`, `level_a` and `level_b` position the undulation vertically;
    /// the widgets choose them (full-height swing for the field, amplitude
    /// swing for the gauge). Horizontal coordinates start at the canonical
    /// tile layout.
    pub fn new(
        width: f64,
        height: f64,
        speed: f64,
        baseline: f64,
        level_a: f64,
        level_b: f64,
    ) -> Self {
        let mut state = Self {
            width,
            height,
            baseline,
            start0: 0.0,
            end0: 0.0,
            end1: 0.0,
            end2: 0.0,
            ctrl0: 0.0,
            ctrl1: 0.0,
            ctrl2: 0.0,
            level_a,
            level_b,
            speed,
        };
        state.reseed_horizontal();
        state
    }

    /// One tile: the horizontal span of a single segment.
    #[inline]
    pub fn tile_span(&self) -> f64 {
        self.width / 2.0
    }

    /// Whether the surface has been laid out with a drawable size.
    #[inline]
    pub fn has_surface(&self) -> bool {
        self.width > 0.0 && self.height > 0.0
    }

    /// Reset all horizontal coordinates to the canonical tile layout.
    ///
    /// With `W = width`:
    /// ```text
    /// start0 = W      end0 = W/2    ctrl0 = 3W/4
    /// end1   = 0                    ctrl1 = W/4
    /// end2   = -W/2                 ctrl2 = -W/4
    /// ```
    fn reseed_horizontal(&mut self) {
        let w = self.width;
        self.start0 = w;
        self.end0 = w / 2.0;
        self.ctrl0 = w * 3.0 / 4.0;
        self.end1 = 0.0;
        self.ctrl1 = w / 4.0;
        self.end2 = -w / 2.0;
        self.ctrl2 = -w / 4.0;
    }

    /// Advance one frame.
    ///
    /// Scrolls every horizontal coordinate by `speed`. Once `end2` reaches
    /// the origin the pattern reseeds and the vertical levels swap; returns
    /// `true` for exactly those frames so callers can align per-cycle work
    /// (the gauge applies its progress step there). A zero-sized surface is
    /// a no-op.
    pub fn advance(&mut self) -> bool {
        if !self.has_surface() {
            return false;
        }

        self.start0 += self.speed;
        self.end0 += self.speed;
        self.end1 += self.speed;
        self.end2 += self.speed;
        self.ctrl0 += self.speed;
        self.ctrl1 += self.speed;
        self.ctrl2 += self.speed;

        if self.end2 >= 0.0 {
            self.reseed_horizontal();
            std::mem::swap(&mut self.level_a, &mut self.level_b);
            return true;
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn field_state(width: f64, height: f64, speed: f64) -> WaveState {
        WaveState::new(width, height, speed, height / 2.0, 0.0, height)
    }

    #[test]
    fn reseed_layout_is_canonical() {
        let state = field_state(200.0, 100.0, 5.0);
        assert_eq!(
            [
                state.start0, state.end0, state.ctrl0, state.end1, state.ctrl1, state.end2,
                state.ctrl2
            ],
            [200.0, 100.0, 150.0, 0.0, 50.0, -100.0, -50.0]
        );
    }

    #[test]
    fn anchors_tile_without_gaps() {
        let mut state = field_state(200.0, 100.0, 5.0);
        let span = state.tile_span();
        for _ in 0..500 {
            assert_eq!(state.start0 - state.end0, span);
            assert_eq!(state.end0 - state.end1, span);
            assert_eq!(state.end1 - state.end2, span);
            state.advance();
        }
    }

    #[test]
    fn scroll_is_deterministic() {
        let mut state = field_state(200.0, 100.0, 5.0);
        // end2 starts at -100 and climbs by 5; the frame that lands on 0
        // reseeds, so every frame before that is a plain scroll.
        let frames_to_reseed = (state.tile_span() / state.speed) as usize;
        let mut expected = state.end2;
        for _ in 0..frames_to_reseed - 1 {
            let reseeded = state.advance();
            expected += 5.0;
            assert!(!reseeded);
            assert_eq!(state.end2, expected);
        }
        assert!(state.advance(), "crossing the origin must reseed");
    }

    #[test]
    fn reseed_swaps_levels() {
        let mut state = field_state(200.0, 100.0, 5.0);
        let initial = (state.level_a, state.level_b);

        // Run through one full cycle.
        while !state.advance() {}
        assert_eq!((state.level_a, state.level_b), (initial.1, initial.0));

        // A second cycle restores the original pairing.
        while !state.advance() {}
        assert_eq!((state.level_a, state.level_b), initial);
    }

    #[test]
    fn reseed_happens_every_tile_span() {
        let mut state = field_state(400.0, 100.0, 5.0);
        let mut frames = 0usize;
        while !state.advance() {
            frames += 1;
        }
        // 200px tile at 5px per frame = 40 advances, reseeding on the 40th.
        assert_eq!(frames + 1, 40);
    }

    #[test]
    fn zero_sized_surface_never_advances() {
        let mut state = field_state(0.0, 0.0, 5.0);
        let before = state.clone();
        assert!(!state.advance());
        assert_eq!(state, before);
    }
}
