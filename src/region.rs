use crate::utils::bbox::BoundingBox;

/// Codes of the non-geometric trajectory events
///
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpecialCode {
    /// No estimate exists for the frame (cooldown after a failure)
    Undefined,
    /// The tracker was (re)initialized with the ground truth on the frame
    Init,
    /// The estimate lost the target on the frame
    Failure,
}

/// A region reported for a frame: either a real box or a trajectory marker
///
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Region {
    BoundingBox(BoundingBox),
    Special(SpecialCode),
}

impl Region {
    pub fn init() -> Self {
        Region::Special(SpecialCode::Init)
    }

    pub fn failure() -> Self {
        Region::Special(SpecialCode::Failure)
    }

    pub fn undefined() -> Self {
        Region::Special(SpecialCode::Undefined)
    }

    /// Area of the region, special regions are always empty
    ///
    pub fn area(&self) -> f64 {
        match self {
            Region::BoundingBox(bb) => bb.area(),
            Region::Special(_) => 0.0,
        }
    }

    /// Area shared with another region, 0 when either side is special
    ///
    pub fn intersection(&self, other: &Region) -> f64 {
        match (self, other) {
            (Region::BoundingBox(l), Region::BoundingBox(r)) => l.intersection(r),
            _ => 0.0,
        }
    }

    pub fn union(&self, other: &Region) -> f64 {
        self.area() + other.area() - self.intersection(other)
    }

    pub fn overlap_ratio(&self, other: &Region) -> f64 {
        let union = self.union(other);
        if union <= 0.0 {
            0.0
        } else {
            self.intersection(other) / union
        }
    }

    /// Distance between the region center and the ground truth center,
    /// `None` when the region carries no geometry
    ///
    pub fn center_distance(&self, ground_truth: &BoundingBox) -> Option<f64> {
        match self {
            Region::BoundingBox(bb) => Some(bb.center_distance(ground_truth)),
            Region::Special(_) => None,
        }
    }

    pub fn as_bbox(&self) -> Option<&BoundingBox> {
        match self {
            Region::BoundingBox(bb) => Some(bb),
            Region::Special(_) => None,
        }
    }

    pub fn is_special(&self) -> bool {
        matches!(self, Region::Special(_))
    }

    pub fn is_code(&self, code: SpecialCode) -> bool {
        matches!(self, Region::Special(c) if *c == code)
    }
}

impl From<BoundingBox> for Region {
    fn from(bb: BoundingBox) -> Self {
        Region::BoundingBox(bb)
    }
}

impl From<SpecialCode> for Region {
    fn from(code: SpecialCode) -> Self {
        Region::Special(code)
    }
}

#[cfg(test)]
mod tests {
    use crate::region::{Region, SpecialCode};
    use crate::utils::bbox::BoundingBox;
    use crate::EPS;

    #[test]
    fn special_regions_are_empty() {
        let bb: Region = BoundingBox::new(0.0, 0.0, 10.0, 10.0).into();
        for code in [SpecialCode::Undefined, SpecialCode::Init, SpecialCode::Failure] {
            let special = Region::from(code);
            assert_eq!(special.area(), 0.0);
            assert_eq!(special.intersection(&bb), 0.0);
            assert_eq!(bb.intersection(&special), 0.0);
            assert_eq!(special.overlap_ratio(&bb), 0.0);
            assert_eq!(special.overlap_ratio(&special), 0.0);
            assert!(special.is_special());
            assert!(special.is_code(code));
            assert!(special
                .center_distance(&BoundingBox::new(0.0, 0.0, 1.0, 1.0))
                .is_none());
        }
    }

    #[test]
    fn boxes_delegate() {
        let l: Region = BoundingBox::new(0.0, 0.0, 10.0, 10.0).into();
        let r: Region = BoundingBox::new(5.0, 0.0, 15.0, 10.0).into();
        assert!((l.overlap_ratio(&r) - 50.0 / 150.0).abs() < EPS);
        assert!(!l.is_special());
        assert!(!l.is_code(SpecialCode::Init));
        assert!(l.as_bbox().is_some());
        let gt = BoundingBox::new(5.0, 0.0, 15.0, 10.0);
        assert!((l.center_distance(&gt).unwrap() - 5.0).abs() < EPS);
    }
}
