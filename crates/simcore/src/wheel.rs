//! Wheel identifiers and fixed per-wheel storage.

use std::ops::{Index, IndexMut};

use serde::{Deserialize, Serialize};

/// One of the four swerve modules.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WheelId {
    FrontRight,
    BackRight,
    FrontLeft,
    BackLeft,
}

impl WheelId {
    pub const ALL: [WheelId; 4] = [
        WheelId::FrontRight,
        WheelId::BackRight,
        WheelId::FrontLeft,
        WheelId::BackLeft,
    ];

    pub fn index(self) -> usize {
        match self {
            WheelId::FrontRight => 0,
            WheelId::BackRight => 1,
            WheelId::FrontLeft => 2,
            WheelId::BackLeft => 3,
        }
    }

    /// Whether the module sits on the right-hand side of the frame.
    pub fn is_right(self) -> bool {
        matches!(self, WheelId::FrontRight | WheelId::BackRight)
    }

    pub fn is_front(self) -> bool {
        matches!(self, WheelId::FrontRight | WheelId::FrontLeft)
    }

    pub fn label(self) -> &'static str {
        match self {
            WheelId::FrontRight => "front right",
            WheelId::BackRight => "back right",
            WheelId::FrontLeft => "front left",
            WheelId::BackLeft => "back left",
        }
    }
}

/// Exactly one `T` per wheel, indexed by [`WheelId`].
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct PerWheel<T>([T; 4]);

impl<T> PerWheel<T> {
    pub fn new(values: [T; 4]) -> Self {
        PerWheel(values)
    }

    /// Build by evaluating `f` for every wheel in [`WheelId::ALL`] order.
    pub fn from_fn(f: impl FnMut(WheelId) -> T) -> Self {
        PerWheel(WheelId::ALL.map(f))
    }

    pub fn iter(&self) -> impl Iterator<Item = (WheelId, &T)> {
        WheelId::ALL.into_iter().zip(self.0.iter())
    }

    pub fn iter_mut(&mut self) -> impl Iterator<Item = (WheelId, &mut T)> {
        WheelId::ALL.into_iter().zip(self.0.iter_mut())
    }

    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.0.iter()
    }

    pub fn map<U>(&self, mut f: impl FnMut(WheelId, &T) -> U) -> PerWheel<U> {
        PerWheel::from_fn(|id| f(id, &self[id]))
    }
}

impl<T: Clone> PerWheel<T> {
    pub fn splat(value: T) -> Self {
        PerWheel::from_fn(|_| value.clone())
    }
}

impl<T> Index<WheelId> for PerWheel<T> {
    type Output = T;

    fn index(&self, id: WheelId) -> &T {
        &self.0[id.index()]
    }
}

impl<T> IndexMut<WheelId> for PerWheel<T> {
    fn index_mut(&mut self, id: WheelId) -> &mut T {
        &mut self.0[id.index()]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_wheel_has_its_own_slot() {
        let mut per_wheel = PerWheel::splat(0.0);
        for (n, id) in WheelId::ALL.into_iter().enumerate() {
            per_wheel[id] = n as f64;
        }
        assert_eq!(per_wheel[WheelId::FrontRight], 0.0);
        assert_eq!(per_wheel[WheelId::BackRight], 1.0);
        assert_eq!(per_wheel[WheelId::FrontLeft], 2.0);
        assert_eq!(per_wheel[WheelId::BackLeft], 3.0);
    }

    #[test]
    fn test_sides() {
        let right: Vec<_> = WheelId::ALL.into_iter().filter(|w| w.is_right()).collect();
        assert_eq!(right, vec![WheelId::FrontRight, WheelId::BackRight]);
        assert!(WheelId::FrontLeft.is_front());
        assert!(!WheelId::BackLeft.is_front());
    }

    #[test]
    fn test_map_preserves_wheel_order() {
        let ids = PerWheel::from_fn(|id| id);
        let indices = ids.map(|_, id| id.index());
        let collected: Vec<_> = indices.values().copied().collect();
        assert_eq!(collected, vec![0, 1, 2, 3]);
    }
}
