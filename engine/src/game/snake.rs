use std::collections::{HashSet, VecDeque};

use super::settings::INITIAL_SNAKE_LENGTH;
use super::types::{Direction, Point};

/// Snake body, head first. The occupancy set mirrors the deque so collision
/// and food checks are O(1).
#[derive(Clone, Debug)]
pub struct Snake {
    body: VecDeque<Point>,
    body_set: HashSet<Point>,
}

impl Snake {
    /// Three segments with the head at `head` and the tail trailing away from
    /// `direction`, i.e. facing Right spawns [(x,y), (x-1,y), (x-2,y)].
    pub fn spawn(head: Point, direction: Direction) -> Self {
        let (dx, dy) = direction.offset();
        let mut body = VecDeque::new();
        let mut body_set = HashSet::new();

        for i in 0..INITIAL_SNAKE_LENGTH as i32 {
            let segment = Point::new(head.x - dx * i, head.y - dy * i);
            body.push_back(segment);
            body_set.insert(segment);
        }

        Self { body, body_set }
    }

    pub fn head(&self) -> Point {
        *self.body.front().expect("Snake body should never be empty")
    }

    pub fn len(&self) -> usize {
        self.body.len()
    }

    pub fn is_empty(&self) -> bool {
        self.body.is_empty()
    }

    pub fn occupies(&self, point: Point) -> bool {
        self.body_set.contains(&point)
    }

    pub fn segments(&self) -> impl Iterator<Item = &Point> {
        self.body.iter()
    }

    /// Prepend the new head; drop the tail unless the snake grows this step.
    pub fn advance(&mut self, new_head: Point, grow: bool) {
        self.body.push_front(new_head);
        self.body_set.insert(new_head);

        if !grow {
            let tail = self
                .body
                .pop_back()
                .expect("Snake body should never be empty");
            self.body_set.remove(&tail);
        }
    }

    #[cfg(test)]
    pub fn from_segments(segments: Vec<Point>) -> Self {
        let body_set = segments.iter().copied().collect();
        Self {
            body: segments.into(),
            body_set,
        }
    }
}
