//! Stroke geometry normalization.
//!
//! Raw generator output arrives as relative offsets in a model-native,
//! y-up coordinate convention. Normalization is a fixed sequence of pure
//! transforms: decode → denoise → align → orient → place. Each step owns
//! the stroke and hands it forward; nothing here touches document state.

/// One relative pen sample from the stroke generator.
///
/// `lift` marks the sample that ends a continuous pen-down segment.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct GlyphSample {
    pub dx: f32,
    pub dy: f32,
    pub lift: bool,
}

/// One absolute pen position with the pen-lift flag carried through.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct StrokePoint {
    pub x: f32,
    pub y: f32,
    pub lift: bool,
}

/// Consecutive points closer than this are merged during denoise.
pub const MIN_MOVEMENT: f32 = 0.05;

/// Decoded absolute coordinate sequence for one line of handwriting.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Stroke {
    points: Vec<StrokePoint>,
}

impl Stroke {
    /// Cumulative-sum relative offsets into absolute coordinates.
    pub fn decode(samples: &[GlyphSample]) -> Self {
        let mut points = Vec::with_capacity(samples.len());
        let (mut x, mut y) = (0.0f32, 0.0f32);
        for sample in samples {
            x += sample.dx;
            y += sample.dy;
            points.push(StrokePoint {
                x,
                y,
                lift: sample.lift,
            });
        }
        Self { points }
    }

    pub fn points(&self) -> &[StrokePoint] {
        &self.points
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Merge near-duplicate consecutive points below [`MIN_MOVEMENT`].
    ///
    /// Lift flags are OR-merged into the kept point so a pen lift is never
    /// lost. Idempotent: a denoised stroke passes through unchanged.
    pub fn denoise(self) -> Self {
        let mut kept: Vec<StrokePoint> = Vec::with_capacity(self.points.len());
        for point in self.points {
            match kept.last_mut() {
                Some(last) if (point.x - last.x).hypot(point.y - last.y) < MIN_MOVEMENT => {
                    last.lift |= point.lift;
                }
                _ => kept.push(point),
            }
        }
        Self { points: kept }
    }

    /// Correct systematic baseline skew.
    ///
    /// Estimates the writing slope by least squares over the sampled pen
    /// positions and rotates every point about the local origin by the
    /// negative of the skew angle. Degenerate x-variance leaves the stroke
    /// untouched.
    pub fn align(mut self) -> Self {
        let n = self.points.len();
        if n < 2 {
            return self;
        }
        let inv = 1.0 / n as f32;
        let mean_x: f32 = self.points.iter().map(|p| p.x).sum::<f32>() * inv;
        let mean_y: f32 = self.points.iter().map(|p| p.y).sum::<f32>() * inv;
        let mut sxx = 0.0f32;
        let mut sxy = 0.0f32;
        for point in &self.points {
            let dx = point.x - mean_x;
            sxx += dx * dx;
            sxy += dx * (point.y - mean_y);
        }
        if sxx <= f32::EPSILON {
            return self;
        }
        let theta = (sxy / sxx).atan();
        let (sin, cos) = theta.sin_cos();
        for point in &mut self.points {
            let (x, y) = (point.x, point.y);
            point.x = x * cos + y * sin;
            point.y = y * cos - x * sin;
        }
        self
    }

    /// Flip model-native y-up coordinates into document y-down space.
    pub fn orient(mut self) -> Self {
        for point in &mut self.points {
            point.y = -point.y;
        }
        self
    }

    /// Translate so the minimum bounding coordinate lands on the anchor.
    pub fn place(mut self, anchor_x: f32, anchor_y: f32) -> Self {
        let Some((min_x, min_y)) = self.min_point() else {
            return self;
        };
        let (dx, dy) = (anchor_x - min_x, anchor_y - min_y);
        for point in &mut self.points {
            point.x += dx;
            point.y += dy;
        }
        self
    }

    /// Minimum x and y over all points, independently per axis.
    pub fn min_point(&self) -> Option<(f32, f32)> {
        let first = self.points.first()?;
        let mut min = (first.x, first.y);
        for point in &self.points[1..] {
            min.0 = min.0.min(point.x);
            min.1 = min.1.min(point.y);
        }
        Some(min)
    }
}

/// Full normalization for one display line.
///
/// Returns `None` for an empty sample sequence ("nothing to draw"); the
/// caller still advances its write cursor.
pub fn normalize(samples: &[GlyphSample], anchor_x: f32, anchor_y: f32) -> Option<Stroke> {
    if samples.is_empty() {
        return None;
    }
    Some(
        Stroke::decode(samples)
            .denoise()
            .align()
            .orient()
            .place(anchor_x, anchor_y),
    )
}

#[cfg(test)]
mod tests {
    use super::{normalize, GlyphSample, Stroke, StrokePoint, MIN_MOVEMENT};

    fn sample(dx: f32, dy: f32, lift: bool) -> GlyphSample {
        GlyphSample { dx, dy, lift }
    }

    fn points(stroke: &Stroke) -> Vec<(f32, f32)> {
        stroke.points().iter().map(|p| (p.x, p.y)).collect()
    }

    #[test]
    fn decode_accumulates_offsets_and_carries_lift() {
        let stroke = Stroke::decode(&[
            sample(1.0, 2.0, false),
            sample(1.0, -1.0, true),
            sample(0.5, 0.5, false),
        ]);
        assert_eq!(
            stroke.points(),
            &[
                StrokePoint {
                    x: 1.0,
                    y: 2.0,
                    lift: false,
                },
                StrokePoint {
                    x: 2.0,
                    y: 1.0,
                    lift: true,
                },
                StrokePoint {
                    x: 2.5,
                    y: 1.5,
                    lift: false,
                },
            ]
        );
    }

    #[test]
    fn denoise_is_idempotent() {
        let jitter = MIN_MOVEMENT / 4.0;
        let stroke = Stroke::decode(&[
            sample(0.0, 0.0, false),
            sample(jitter, 0.0, false),
            sample(1.0, 0.0, false),
            sample(0.0, jitter, true),
            sample(1.0, 1.0, false),
        ]);
        let once = stroke.denoise();
        let twice = once.clone().denoise();
        assert_eq!(once, twice);
    }

    #[test]
    fn denoise_never_drops_a_pen_lift() {
        let jitter = MIN_MOVEMENT / 4.0;
        let stroke = Stroke::decode(&[
            sample(1.0, 0.0, false),
            // degenerate movement carrying the segment-ending flag
            sample(jitter, 0.0, true),
            sample(1.0, 0.0, false),
        ]);
        let denoised = stroke.denoise();
        assert_eq!(denoised.len(), 2);
        assert!(denoised.points()[0].lift);
    }

    #[test]
    fn align_leaves_aligned_stroke_nearly_unchanged() {
        // symmetric bump: least-squares slope is exactly zero
        let stroke = Stroke::decode(&[
            sample(1.0, 0.0, false),
            sample(1.0, 0.5, false),
            sample(1.0, 0.0, false),
            sample(1.0, -0.5, true),
        ]);
        let aligned = stroke.clone().align();
        let again = aligned.clone().align();
        for (a, b) in points(&aligned).iter().zip(points(&again)) {
            assert!((a.0 - b.0).abs() < 1e-4);
            assert!((a.1 - b.1).abs() < 1e-4);
        }
    }

    #[test]
    fn align_flattens_a_skewed_baseline() {
        // points exactly on y = 0.5 x
        let stroke = Stroke::decode(&[
            sample(1.0, 0.5, false),
            sample(1.0, 0.5, false),
            sample(1.0, 0.5, false),
            sample(1.0, 0.5, true),
        ]);
        let aligned = stroke.align();
        let ys: Vec<f32> = aligned.points().iter().map(|p| p.y).collect();
        let spread = ys.iter().cloned().fold(f32::MIN, f32::max)
            - ys.iter().cloned().fold(f32::MAX, f32::min);
        assert!(spread < 1e-4, "baseline still skewed: spread {}", spread);
    }

    #[test]
    fn orient_is_its_own_inverse() {
        let stroke = Stroke::decode(&[sample(1.0, 2.0, false), sample(-0.5, 1.0, true)]);
        let restored = stroke.clone().orient().orient();
        assert_eq!(stroke, restored);
    }

    #[test]
    fn place_moves_min_corner_onto_anchor() {
        let stroke = Stroke::decode(&[
            sample(3.0, -2.0, false),
            sample(-5.0, 4.0, false),
            sample(1.0, 1.0, true),
        ]);
        let placed = stroke.place(64.0, 112.0);
        let (min_x, min_y) = placed.min_point().unwrap();
        assert!((min_x - 64.0).abs() < 1e-5);
        assert!((min_y - 112.0).abs() < 1e-5);
    }

    #[test]
    fn normalize_of_empty_samples_is_nothing_to_draw() {
        assert_eq!(normalize(&[], 0.0, 0.0), None);
    }

    #[test]
    fn normalize_places_at_anchor() {
        let samples = [
            sample(1.0, 1.0, false),
            sample(1.0, -1.0, false),
            sample(1.0, 1.0, true),
        ];
        let stroke = normalize(&samples, 10.0, 20.0).unwrap();
        let (min_x, min_y) = stroke.min_point().unwrap();
        assert!((min_x - 10.0).abs() < 1e-4);
        assert!((min_y - 20.0).abs() < 1e-4);
    }
}
