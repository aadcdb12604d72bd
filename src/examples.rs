use crate::region::Region;
use crate::tracker::Tracker;
use crate::utils::bbox::BoundingBox;
use crate::video::{Dataset, Frame, InMemoryVideo, Video};
use anyhow::Result;
use rand::distributions::Uniform;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Random walk of a box: the position and the size drift every frame
///
pub struct BoxGen {
    x: f64,
    y: f64,
    width: f64,
    height: f64,
    gen: StdRng,
    dist_pos: Uniform<f64>,
    dist_box: Uniform<f64>,
}

impl BoxGen {
    pub fn new(
        x: f64,
        y: f64,
        width: f64,
        height: f64,
        pos_drift: f64,
        box_drift: f64,
        seed: u64,
    ) -> Self {
        Self {
            x,
            y,
            width,
            height,
            gen: StdRng::seed_from_u64(seed),
            dist_pos: Uniform::new_inclusive(-pos_drift, pos_drift),
            dist_box: Uniform::new_inclusive(-box_drift, box_drift),
        }
    }
}

impl Iterator for BoxGen {
    type Item = BoundingBox;

    fn next(&mut self) -> Option<Self::Item> {
        let current = BoundingBox::from_xywh(self.x, self.y, self.width, self.height);

        self.x += self.gen.sample(self.dist_pos);
        self.y += self.gen.sample(self.dist_pos);

        self.width += self.gen.sample(self.dist_box);
        self.height += self.gen.sample(self.dist_box);

        if self.width < 1.0 {
            self.width = 1.0;
        }
        if self.height < 1.0 {
            self.height = 1.0;
        }

        Some(current)
    }
}

/// Video whose images are the target boxes themselves
///
/// A frame image is the true location of the object, which lets the reference trackers below
/// "see" the target without any image processing.
///
pub fn synthetic_video(
    dataset_name: &str,
    name: &str,
    len: usize,
    seed: u64,
) -> InMemoryVideo<BoundingBox> {
    let frames = BoxGen::new(100.0, 100.0, 40.0, 30.0, 2.0, 0.5, seed)
        .take(len)
        .map(|bb| Frame::new(bb, bb))
        .collect();
    InMemoryVideo::new(dataset_name, name, frames)
}

/// Dataset of synthetic videos named `video_000`, `video_001`, ... with the given lengths
///
pub fn synthetic_dataset(name: &str, lengths: &[usize], seed: u64) -> Dataset<BoundingBox> {
    let videos = lengths
        .iter()
        .enumerate()
        .map(|(i, len)| {
            Box::new(synthetic_video(
                name,
                &format!("video_{:03}", i),
                *len,
                seed.wrapping_add(i as u64),
            )) as Box<dyn Video<BoundingBox>>
        })
        .collect();
    Dataset::new(name, videos)
}

/// Reports the true location of the target
///
#[derive(Debug, Default, Clone)]
pub struct GroundTruthTracker;

impl Tracker<BoundingBox> for GroundTruthTracker {
    fn init_frame(&mut self, _image: &BoundingBox, _ground_truth: &BoundingBox) -> Result<()> {
        Ok(())
    }

    fn estimate(&mut self, image: &BoundingBox) -> Result<Region> {
        Ok((*image).into())
    }
}

/// Reports the true location shifted by uniform noise
///
pub struct NoisyTracker {
    gen: StdRng,
    dist: Uniform<f64>,
}

impl NoisyTracker {
    pub fn new(max_shift: f64, seed: u64) -> Self {
        Self {
            gen: StdRng::seed_from_u64(seed),
            dist: Uniform::new_inclusive(-max_shift, max_shift),
        }
    }
}

impl Tracker<BoundingBox> for NoisyTracker {
    fn init_frame(&mut self, _image: &BoundingBox, _ground_truth: &BoundingBox) -> Result<()> {
        Ok(())
    }

    fn estimate(&mut self, image: &BoundingBox) -> Result<Region> {
        let dx = self.gen.sample(self.dist);
        let dy = self.gen.sample(self.dist);
        Ok(image.shift(dx, dy).into())
    }
}

/// Ignores the images and moves its box by a constant offset every frame,
/// so it loses the target after a while
///
#[derive(Debug, Clone)]
pub struct DriftingTracker {
    drift: f64,
    current: Option<BoundingBox>,
}

impl DriftingTracker {
    pub fn new(drift: f64) -> Self {
        Self {
            drift,
            current: None,
        }
    }
}

impl Tracker<BoundingBox> for DriftingTracker {
    fn name(&self) -> String {
        format!("DriftingTracker({})", self.drift)
    }

    fn init_frame(&mut self, _image: &BoundingBox, ground_truth: &BoundingBox) -> Result<()> {
        self.current = Some(*ground_truth);
        Ok(())
    }

    fn estimate(&mut self, _image: &BoundingBox) -> Result<Region> {
        Ok(match self.current.as_mut() {
            Some(bb) => {
                *bb = bb.shift(self.drift, 0.0);
                Region::from(*bb)
            }
            None => Region::undefined(),
        })
    }
}
