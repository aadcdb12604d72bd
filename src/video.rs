use crate::utils::bbox::BoundingBox;
use crate::Errors;
use anyhow::Result;

/// A single annotated frame
///
/// The image handle is opaque to the evaluator, it is only passed through to the tracker and
/// the visualizer.
///
#[derive(Debug, Clone)]
pub struct Frame<I> {
    image: I,
    ground_truth: BoundingBox,
}

impl<I> Frame<I> {
    pub fn new(image: I, ground_truth: BoundingBox) -> Self {
        Self {
            image,
            ground_truth,
        }
    }

    pub fn image(&self) -> &I {
        &self.image
    }

    pub fn ground_truth(&self) -> &BoundingBox {
        &self.ground_truth
    }
}

/// Annotated video source
///
/// Frames are produced fresh on every call; the evaluator never caches them between trackers.
///
pub trait Video<I> {
    fn dataset_name(&self) -> &str;

    fn name(&self) -> &str;

    fn load_frames(&self) -> Result<Vec<Frame<I>>>;
}

/// Video that keeps its frames in memory and clones them on load
///
#[derive(Debug, Clone)]
pub struct InMemoryVideo<I> {
    dataset_name: String,
    name: String,
    frames: Vec<Frame<I>>,
}

impl<I: Clone> InMemoryVideo<I> {
    pub fn new(dataset_name: &str, name: &str, frames: Vec<Frame<I>>) -> Self {
        Self {
            dataset_name: dataset_name.to_string(),
            name: name.to_string(),
            frames,
        }
    }

    pub fn len(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }
}

impl<I: Clone> Video<I> for InMemoryVideo<I> {
    fn dataset_name(&self) -> &str {
        &self.dataset_name
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn load_frames(&self) -> Result<Vec<Frame<I>>> {
        Ok(self.frames.clone())
    }
}

/// Named collection of videos
///
pub struct Dataset<I> {
    name: String,
    videos: Vec<Box<dyn Video<I>>>,
}

impl<I> Dataset<I> {
    pub fn new(name: &str, videos: Vec<Box<dyn Video<I>>>) -> Self {
        Self {
            name: name.to_string(),
            videos,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn videos(&self) -> &[Box<dyn Video<I>>] {
        &self.videos
    }

    /// Finds a video by its name
    ///
    pub fn get_video(&self, video_name: &str) -> Result<&dyn Video<I>> {
        self.videos
            .iter()
            .find(|v| v.name() == video_name)
            .map(|v| v.as_ref())
            .ok_or_else(|| {
                Errors::MissingVideo {
                    video: video_name.to_string(),
                    dataset: self.name.clone(),
                }
                .into()
            })
    }
}

#[cfg(test)]
mod tests {
    use crate::utils::bbox::BoundingBox;
    use crate::video::{Dataset, Frame, InMemoryVideo, Video};
    use crate::Errors;

    fn video(name: &str, len: usize) -> InMemoryVideo<usize> {
        let frames = (0..len)
            .map(|i| Frame::new(i, BoundingBox::from_xywh(i as f64, 0.0, 10.0, 10.0)))
            .collect();
        InMemoryVideo::new("synthetic", name, frames)
    }

    #[test]
    fn load_frames() {
        let v = video("a", 3);
        assert_eq!(v.len(), 3);
        assert_eq!(v.dataset_name(), "synthetic");
        let frames = v.load_frames().unwrap();
        assert_eq!(frames.len(), 3);
        assert_eq!(*frames[2].image(), 2);
        assert_eq!(
            *frames[1].ground_truth(),
            BoundingBox::new(1.0, 0.0, 11.0, 10.0)
        );
    }

    #[test]
    fn dataset_lookup() {
        let videos: Vec<Box<dyn Video<usize>>> =
            vec![Box::new(video("a", 3)), Box::new(video("b", 4))];
        let dataset = Dataset::new("synthetic", videos);
        assert_eq!(dataset.videos().len(), 2);
        assert_eq!(dataset.get_video("b").unwrap().name(), "b");
        let err = dataset.get_video("c").err().unwrap();
        assert_eq!(
            err.downcast_ref::<Errors>(),
            Some(&Errors::MissingVideo {
                video: "c".to_string(),
                dataset: "synthetic".to_string()
            })
        );
    }
}
