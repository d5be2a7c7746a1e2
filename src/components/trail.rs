use crate::error::SimulationError;
use crate::physics::math::Vector;

/// Default number of positions kept per body
pub const DEFAULT_TRAIL_CAPACITY: usize = 2000;

/// Bounded, chronological history of a body's recent positions.
///
/// Storage for exactly `capacity` points is reserved on the first record. Once
/// the trace is full the buffer wraps: each new point overwrites the oldest
/// one. Iteration is always oldest first.
#[derive(Debug, Clone, PartialEq)]
pub struct PathTrace {
    points: Vec<Vector>,
    head: usize,
    capacity: usize,
}

impl PathTrace {
    pub fn new(capacity: usize) -> Self {
        Self {
            points: Vec::new(),
            head: 0,
            capacity,
        }
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Appends `position`, evicting the oldest point once the trace is full.
    ///
    /// A zero-capacity trace records nothing.
    pub fn record(&mut self, position: Vector) -> Result<(), SimulationError> {
        if self.capacity == 0 {
            return Ok(());
        }

        if self.points.len() < self.capacity {
            self.points.try_reserve_exact(self.capacity - self.points.len())?;
            self.points.push(position);
            return Ok(());
        }

        // Full: the head slot holds the oldest point
        self.points[self.head] = position;
        self.head = (self.head + 1) % self.capacity;
        Ok(())
    }

    /// Drops every recorded point and releases the storage.
    pub fn clear(&mut self) {
        self.points = Vec::new();
        self.head = 0;
    }

    /// Most recently recorded point
    pub fn latest(&self) -> Option<Vector> {
        if self.points.is_empty() {
            None
        } else if self.points.len() < self.capacity {
            self.points.last().copied()
        } else {
            let index = (self.head + self.capacity - 1) % self.capacity;
            Some(self.points[index])
        }
    }

    /// Points in chronological order, oldest first
    pub fn iter(&self) -> impl Iterator<Item = Vector> + '_ {
        let (newer, older) = self.points.split_at(self.head);
        older.iter().chain(newer.iter()).copied()
    }

    /// Line-strip vertices for rendering, oldest first
    pub fn line_strip(&self) -> Vec<bevy::math::Vec3> {
        self.iter().map(|point| point.as_vec3()).collect()
    }
}

impl Default for PathTrace {
    fn default() -> Self {
        Self::new(DEFAULT_TRAIL_CAPACITY)
    }
}
