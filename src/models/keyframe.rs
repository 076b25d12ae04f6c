use std::collections::BTreeSet;
use std::ops::Bound;

use crate::limits;

/// An ordered set of keyframe positions on one layer's track.
///
/// Frames are 1-based. The track stores positions only; what a keyframe
/// holds (a drawing, a sound clip start, a camera move) is the owning
/// layer's business.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct KeyframeTrack {
    frames: BTreeSet<i32>,
}

impl KeyframeTrack {
    pub fn new() -> Self {
        Self {
            frames: BTreeSet::new(),
        }
    }

    /// Adds a keyframe. Returns false if the position is out of range or
    /// already occupied.
    pub fn add_keyframe(&mut self, frame: i32) -> bool {
        if !Self::in_range(frame) {
            return false;
        }
        self.frames.insert(frame)
    }

    /// Removes the keyframe at `frame`, if any.
    pub fn remove_keyframe(&mut self, frame: i32) -> bool {
        self.frames.remove(&frame)
    }

    pub fn has_keyframe(&self, frame: i32) -> bool {
        self.frames.contains(&frame)
    }

    /// Moves a keyframe to a new position. The move is refused, leaving the
    /// track unchanged, if there is no keyframe at `from` or the target is
    /// occupied or out of range.
    pub fn move_keyframe(&mut self, from: i32, to: i32) -> bool {
        if !Self::in_range(to) || !self.frames.contains(&from) || self.frames.contains(&to) {
            return false;
        }
        self.frames.remove(&from);
        self.frames.insert(to);
        true
    }

    /// Position of the closest keyframe strictly after `frame`.
    pub fn next_keyframe_position(&self, frame: i32) -> Option<i32> {
        self.frames
            .range((Bound::Excluded(frame), Bound::Unbounded))
            .next()
            .copied()
    }

    /// Position of the closest keyframe strictly before `frame`.
    pub fn previous_keyframe_position(&self, frame: i32) -> Option<i32> {
        self.frames
            .range((Bound::Unbounded, Bound::Excluded(frame)))
            .next_back()
            .copied()
    }

    /// Latest keyframe at or before `frame` — the one whose content is
    /// exposed at that frame.
    pub fn keyframe_at_or_before(&self, frame: i32) -> Option<i32> {
        self.frames.range(..=frame).next_back().copied()
    }

    pub fn keyframe_count(&self) -> usize {
        self.frames.len()
    }

    pub fn is_empty(&self) -> bool {
        self.frames.is_empty()
    }

    pub fn positions(&self) -> impl Iterator<Item = i32> + '_ {
        self.frames.iter().copied()
    }

    fn in_range(frame: i32) -> bool {
        (1..=limits::MAX_FRAMES as i32).contains(&frame)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn track(frames: &[i32]) -> KeyframeTrack {
        let mut t = KeyframeTrack::new();
        for &f in frames {
            assert!(t.add_keyframe(f));
        }
        t
    }

    #[test]
    fn test_add_remove() {
        let mut t = KeyframeTrack::new();
        assert!(t.add_keyframe(1));
        assert!(t.add_keyframe(12));
        assert!(!t.add_keyframe(12), "duplicate position");
        assert_eq!(t.keyframe_count(), 2);

        assert!(t.remove_keyframe(12));
        assert!(!t.remove_keyframe(12));
        assert!(t.has_keyframe(1));
        assert!(!t.has_keyframe(12));
    }

    #[test]
    fn test_positions_out_of_range() {
        let mut t = KeyframeTrack::new();
        assert!(!t.add_keyframe(0));
        assert!(!t.add_keyframe(-7));
        assert!(!t.add_keyframe(limits::MAX_FRAMES as i32 + 1));
        assert!(t.is_empty());
    }

    #[test]
    fn test_next_previous_are_strict() {
        let t = track(&[3, 8, 21]);
        assert_eq!(t.next_keyframe_position(2), Some(3));
        assert_eq!(t.next_keyframe_position(3), Some(8));
        assert_eq!(t.next_keyframe_position(21), None);
        assert_eq!(t.previous_keyframe_position(8), Some(3));
        assert_eq!(t.previous_keyframe_position(3), None);
        assert_eq!(t.previous_keyframe_position(i32::MAX), Some(21));
    }

    #[test]
    fn test_move_keyframe() {
        let mut t = track(&[3, 8]);
        assert!(t.move_keyframe(8, 10));
        assert!(t.has_keyframe(10));
        assert!(!t.has_keyframe(8));

        // Refused moves leave the track unchanged.
        let before = t.clone();
        assert!(!t.move_keyframe(10, 3), "target occupied");
        assert!(!t.move_keyframe(99, 5), "no source keyframe");
        assert!(!t.move_keyframe(10, 0), "target out of range");
        assert!(!t.move_keyframe(10, 10), "target is the source");
        assert_eq!(t, before);
    }

    #[test]
    fn test_exposure_lookup() {
        let t = track(&[5, 9]);
        assert_eq!(t.keyframe_at_or_before(4), None);
        assert_eq!(t.keyframe_at_or_before(5), Some(5));
        assert_eq!(t.keyframe_at_or_before(8), Some(5));
        assert_eq!(t.keyframe_at_or_before(40), Some(9));
    }
}
