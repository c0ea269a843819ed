//! Structural invariant checks for `OrderedIndex`

use super::errors::{IndexError, IndexErrorCode, IndexResult};
use super::rbtree::{Color, NodeHandle, OrderedIndex};
use crate::BookId;

impl<V> OrderedIndex<V> {
    /// Walk the whole tree and verify every red-black and BST invariant.
    ///
    /// Returns the first violation found.
    pub fn validate(&self) -> IndexResult<()> {
        if self.color(NodeHandle::NIL) != Color::Black {
            return Err(IndexError::new(
                IndexErrorCode::SentinelNotBlack,
                "sentinel is red",
            ));
        }

        let root = self.root();
        if !root.is_nil() {
            if self.color(root) != Color::Black {
                return Err(IndexError::at_key(
                    IndexErrorCode::RootNotBlack,
                    self.key(root),
                    "root is red",
                ));
            }
            if !self.parent(root).is_nil() {
                return Err(IndexError::at_key(
                    IndexErrorCode::BrokenLink,
                    self.key(root),
                    "root has a parent",
                ));
            }
        }

        let mut previous = None;
        let mut reachable = 0;
        self.check_subtree(root, &mut previous, &mut reachable)?;

        if reachable != self.len() {
            return Err(IndexError::new(
                IndexErrorCode::CountMismatch,
                format!("{} reachable, {} tracked", reachable, self.len()),
            ));
        }
        Ok(())
    }

    /// Returns the black-height of the subtree, counting the sentinel.
    fn check_subtree(
        &self,
        handle: NodeHandle,
        previous: &mut Option<BookId>,
        reachable: &mut usize,
    ) -> IndexResult<usize> {
        if handle.is_nil() {
            return Ok(1);
        }

        let key = self.key(handle);
        let left = self.left(handle);
        let right = self.right(handle);

        for child in [left, right] {
            if !child.is_nil() && self.parent(child) != handle {
                return Err(IndexError::at_key(
                    IndexErrorCode::BrokenLink,
                    key,
                    "child does not point back to parent",
                ));
            }
        }

        if self.color(handle) == Color::Red
            && (self.color(left) == Color::Red || self.color(right) == Color::Red)
        {
            return Err(IndexError::at_key(
                IndexErrorCode::RedRed,
                key,
                "red node has a red child",
            ));
        }

        let left_height = self.check_subtree(left, previous, reachable)?;

        if let Some(prev) = *previous {
            if prev >= key {
                return Err(IndexError::at_key(
                    IndexErrorCode::OrderViolation,
                    key,
                    format!("follows {} in order", prev),
                ));
            }
        }
        *previous = Some(key);
        *reachable += 1;

        let right_height = self.check_subtree(right, previous, reachable)?;

        if left_height != right_height {
            return Err(IndexError::at_key(
                IndexErrorCode::BlackHeightMismatch,
                key,
                format!("left {} vs right {}", left_height, right_height),
            ));
        }

        Ok(left_height + usize::from(self.color(handle) == Color::Black))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_index_is_valid() {
        let index: OrderedIndex<()> = OrderedIndex::new();
        assert!(index.validate().is_ok());
    }

    #[test]
    fn test_valid_after_mixed_operations() {
        let mut index = OrderedIndex::new();
        for key in [41i64, 38, 31, 12, 19, 8, 45, 50, 1, 27] {
            index.insert(key, ()).unwrap();
            index.validate().unwrap();
        }
        for key in [8i64, 12, 41, 50, 19] {
            index.remove(key).unwrap();
            index.validate().unwrap();
        }
    }
}
