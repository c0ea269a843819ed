//! Arena-backed red-black tree keyed by book id
//!
//! Nodes live in a `Vec` and refer to each other through `NodeHandle`
//! indices, so parent back-links never form ownership cycles. Handle 0 is
//! the shared black NIL sentinel: every leaf link and the root's parent
//! point at it. Freed slots are recycled through a free list, which keeps
//! handles of live nodes stable across deletes.
//!
//! The rotation counter is bumped only inside `rotate_left`, `rotate_right`
//! and `recolor`, and those are only reached from the insert/delete fixups.

use std::cmp::Ordering;

use crate::BookId;

/// Node color
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Color {
    Red,
    Black,
}

/// Stable index of a node in the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeHandle(u32);

impl NodeHandle {
    /// The black sentinel used for all leaves and as the root's parent
    pub const NIL: NodeHandle = NodeHandle(0);

    pub fn is_nil(self) -> bool {
        self.0 == 0
    }

    #[inline]
    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Result of a nearest-key lookup.
///
/// Equidistant neighbours are reported together as a `Tie`, lower key first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Nearest<T> {
    None,
    One(T),
    Tie(T, T),
}

impl<T> Nearest<T> {
    /// Apply `f` to every contained item
    pub fn map<U>(self, mut f: impl FnMut(T) -> U) -> Nearest<U> {
        match self {
            Nearest::None => Nearest::None,
            Nearest::One(a) => Nearest::One(f(a)),
            Nearest::Tie(a, b) => Nearest::Tie(f(a), f(b)),
        }
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Nearest::None)
    }

    /// Items in ascending key order
    pub fn into_vec(self) -> Vec<T> {
        match self {
            Nearest::None => Vec::new(),
            Nearest::One(a) => vec![a],
            Nearest::Tie(a, b) => vec![a, b],
        }
    }
}

#[derive(Debug, Clone)]
struct Node {
    key: BookId,
    color: Color,
    parent: NodeHandle,
    left: NodeHandle,
    right: NodeHandle,
}

impl Node {
    fn sentinel() -> Self {
        Node {
            key: 0,
            color: Color::Black,
            parent: NodeHandle::NIL,
            left: NodeHandle::NIL,
            right: NodeHandle::NIL,
        }
    }
}

/// Ordered index over `BookId` keys with an owned payload per node.
#[derive(Debug, Clone)]
pub struct OrderedIndex<V> {
    /// Tree links; slot 0 is the sentinel
    nodes: Vec<Node>,
    /// Payloads, parallel to `nodes`; `None` for the sentinel and free slots
    values: Vec<Option<V>>,
    /// Recyclable slots
    free_list: Vec<u32>,
    root: NodeHandle,
    len: usize,
    /// Rotations plus fixup recoloring steps since creation
    rotation_count: u64,
}

impl<V> Default for OrderedIndex<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V> OrderedIndex<V> {
    /// Creates an empty index
    pub fn new() -> Self {
        Self {
            nodes: vec![Node::sentinel()],
            values: vec![None],
            free_list: Vec::new(),
            root: NodeHandle::NIL,
            len: 0,
            rotation_count: 0,
        }
    }

    /// Number of keys in the index
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Rotations and recoloring steps performed by fixups so far
    pub fn rotation_count(&self) -> u64 {
        self.rotation_count
    }

    pub fn root(&self) -> NodeHandle {
        self.root
    }

    // =========================================================================
    // Lookup
    // =========================================================================

    /// BST descent; returns `NodeHandle::NIL` when the key is absent.
    pub fn search(&self, key: BookId) -> NodeHandle {
        let mut current = self.root;
        while !current.is_nil() {
            current = match key.cmp(&self.key(current)) {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => return current,
            };
        }
        NodeHandle::NIL
    }

    /// Payload stored at `handle`, if it refers to a live node
    pub fn value(&self, handle: NodeHandle) -> Option<&V> {
        self.values.get(handle.index()).and_then(Option::as_ref)
    }

    pub fn get(&self, key: BookId) -> Option<&V> {
        self.value(self.search(key))
    }

    pub fn get_mut(&mut self, key: BookId) -> Option<&mut V> {
        let handle = self.search(key);
        self.values.get_mut(handle.index()).and_then(Option::as_mut)
    }

    pub fn contains_key(&self, key: BookId) -> bool {
        !self.search(key).is_nil()
    }

    /// Payloads with keys in `[low, high]`, ascending.
    ///
    /// Subtrees that lie entirely outside the bounds are never visited.
    pub fn range(&self, low: BookId, high: BookId) -> Vec<&V> {
        let mut out = Vec::new();
        if low <= high {
            self.collect_range(self.root, low, high, &mut out);
        }
        out
    }

    fn collect_range<'a>(&'a self, handle: NodeHandle, low: BookId, high: BookId, out: &mut Vec<&'a V>) {
        if handle.is_nil() {
            return;
        }
        let key = self.key(handle);
        if low < key {
            self.collect_range(self.left(handle), low, high, out);
        }
        if low <= key && key <= high {
            if let Some(value) = self.value(handle) {
                out.push(value);
            }
        }
        if key < high {
            self.collect_range(self.right(handle), low, high, out);
        }
    }

    /// Closest key to `target`.
    ///
    /// An exact match wins outright. Otherwise the closest key below and the
    /// closest key above are compared by distance; equal distances yield a
    /// `Tie` of both.
    pub fn nearest(&self, target: BookId) -> Nearest<&V> {
        match self.nearest_handle(target) {
            Nearest::None => Nearest::None,
            Nearest::One(h) => self.value(h).map_or(Nearest::None, Nearest::One),
            Nearest::Tie(a, b) => match (self.value(a), self.value(b)) {
                (Some(a), Some(b)) => Nearest::Tie(a, b),
                _ => Nearest::None,
            },
        }
    }

    fn nearest_handle(&self, target: BookId) -> Nearest<NodeHandle> {
        let mut below: Option<NodeHandle> = None;
        let mut above: Option<NodeHandle> = None;
        let mut current = self.root;

        while !current.is_nil() {
            match target.cmp(&self.key(current)) {
                Ordering::Equal => return Nearest::One(current),
                Ordering::Less => {
                    above = Some(current);
                    current = self.left(current);
                }
                Ordering::Greater => {
                    below = Some(current);
                    current = self.right(current);
                }
            }
        }

        match (below, above) {
            (Some(lo), Some(hi)) => {
                let down = target.abs_diff(self.key(lo));
                let up = self.key(hi).abs_diff(target);
                match down.cmp(&up) {
                    Ordering::Less => Nearest::One(lo),
                    Ordering::Greater => Nearest::One(hi),
                    Ordering::Equal => Nearest::Tie(lo, hi),
                }
            }
            (Some(only), None) | (None, Some(only)) => Nearest::One(only),
            (None, None) => Nearest::None,
        }
    }

    /// In-order iterator over payloads
    pub fn iter(&self) -> Iter<'_, V> {
        let mut iter = Iter {
            index: self,
            stack: Vec::new(),
        };
        iter.push_left_spine(self.root);
        iter
    }

    /// Number of nodes on the longest root-to-leaf path
    pub fn height(&self) -> usize {
        self.subtree_height(self.root)
    }

    fn subtree_height(&self, handle: NodeHandle) -> usize {
        if handle.is_nil() {
            return 0;
        }
        1 + self
            .subtree_height(self.left(handle))
            .max(self.subtree_height(self.right(handle)))
    }

    // =========================================================================
    // Insert
    // =========================================================================

    /// Insert `value` under `key`.
    ///
    /// A key that is already present is left untouched and the value is
    /// handed back as `Err`.
    pub fn insert(&mut self, key: BookId, value: V) -> Result<NodeHandle, V> {
        let mut parent = NodeHandle::NIL;
        let mut current = self.root;

        while !current.is_nil() {
            parent = current;
            current = match key.cmp(&self.key(current)) {
                Ordering::Less => self.left(current),
                Ordering::Greater => self.right(current),
                Ordering::Equal => return Err(value),
            };
        }

        let node = self.allocate(key, value);
        self.node_mut(node).parent = parent;
        if parent.is_nil() {
            self.root = node;
        } else if key < self.key(parent) {
            self.node_mut(parent).left = node;
        } else {
            self.node_mut(parent).right = node;
        }

        self.len += 1;
        self.insert_fixup(node);
        Ok(node)
    }

    fn insert_fixup(&mut self, mut node: NodeHandle) {
        while self.color(self.parent(node)) == Color::Red {
            let parent = self.parent(node);
            let grandparent = self.parent(parent);

            if parent == self.left(grandparent) {
                let uncle = self.right(grandparent);
                if self.color(uncle) == Color::Red {
                    self.recolor(&[(parent, Color::Black), (uncle, Color::Black), (grandparent, Color::Red)]);
                    node = grandparent;
                } else {
                    if node == self.right(parent) {
                        node = parent;
                        self.rotate_left(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.recolor(&[(parent, Color::Black), (grandparent, Color::Red)]);
                    self.rotate_right(grandparent);
                }
            } else {
                let uncle = self.left(grandparent);
                if self.color(uncle) == Color::Red {
                    self.recolor(&[(parent, Color::Black), (uncle, Color::Black), (grandparent, Color::Red)]);
                    node = grandparent;
                } else {
                    if node == self.left(parent) {
                        node = parent;
                        self.rotate_right(node);
                    }
                    let parent = self.parent(node);
                    let grandparent = self.parent(parent);
                    self.recolor(&[(parent, Color::Black), (grandparent, Color::Red)]);
                    self.rotate_left(grandparent);
                }
            }
        }

        let root = self.root;
        self.node_mut(root).color = Color::Black;
    }

    // =========================================================================
    // Delete
    // =========================================================================

    /// Remove `key`, returning its payload.
    ///
    /// A node with two children is replaced by its in-order successor, which
    /// takes over the removed node's color; the successor's old position is
    /// the one actually spliced out.
    pub fn remove(&mut self, key: BookId) -> Option<V> {
        let target = self.search(key);
        if target.is_nil() {
            return None;
        }

        let mut spliced_color = self.color(target);
        let replacement;

        if self.left(target).is_nil() {
            replacement = self.right(target);
            self.transplant(target, replacement);
        } else if self.right(target).is_nil() {
            replacement = self.left(target);
            self.transplant(target, replacement);
        } else {
            let successor = self.minimum(self.right(target));
            spliced_color = self.color(successor);
            replacement = self.right(successor);

            if self.parent(successor) == target {
                self.node_mut(replacement).parent = successor;
            } else {
                self.transplant(successor, replacement);
                let right = self.right(target);
                self.node_mut(successor).right = right;
                self.node_mut(right).parent = successor;
            }

            self.transplant(target, successor);
            let left = self.left(target);
            self.node_mut(successor).left = left;
            self.node_mut(left).parent = successor;
            let color = self.color(target);
            self.node_mut(successor).color = color;
        }

        if spliced_color == Color::Black {
            self.delete_fixup(replacement);
        }

        // The sentinel may have been used as a temporary parent anchor
        self.nodes[0] = Node::sentinel();
        self.len -= 1;
        self.release(target)
    }

    fn delete_fixup(&mut self, mut node: NodeHandle) {
        while node != self.root && self.color(node) == Color::Black {
            let parent = self.parent(node);

            if node == self.left(parent) {
                let mut sibling = self.right(parent);
                if self.color(sibling) == Color::Red {
                    self.recolor(&[(sibling, Color::Black), (parent, Color::Red)]);
                    self.rotate_left(parent);
                    sibling = self.right(self.parent(node));
                }

                if self.color(self.left(sibling)) == Color::Black
                    && self.color(self.right(sibling)) == Color::Black
                {
                    self.recolor(&[(sibling, Color::Red)]);
                    node = self.parent(node);
                } else {
                    if self.color(self.right(sibling)) == Color::Black {
                        let near = self.left(sibling);
                        self.recolor(&[(near, Color::Black), (sibling, Color::Red)]);
                        self.rotate_right(sibling);
                        sibling = self.right(self.parent(node));
                    }
                    let parent = self.parent(node);
                    let far = self.right(sibling);
                    let parent_color = self.color(parent);
                    self.recolor(&[(sibling, parent_color), (parent, Color::Black), (far, Color::Black)]);
                    self.rotate_left(parent);
                    node = self.root;
                }
            } else {
                let mut sibling = self.left(parent);
                if self.color(sibling) == Color::Red {
                    self.recolor(&[(sibling, Color::Black), (parent, Color::Red)]);
                    self.rotate_right(parent);
                    sibling = self.left(self.parent(node));
                }

                if self.color(self.right(sibling)) == Color::Black
                    && self.color(self.left(sibling)) == Color::Black
                {
                    self.recolor(&[(sibling, Color::Red)]);
                    node = self.parent(node);
                } else {
                    if self.color(self.left(sibling)) == Color::Black {
                        let near = self.right(sibling);
                        self.recolor(&[(near, Color::Black), (sibling, Color::Red)]);
                        self.rotate_left(sibling);
                        sibling = self.left(self.parent(node));
                    }
                    let parent = self.parent(node);
                    let far = self.left(sibling);
                    let parent_color = self.color(parent);
                    self.recolor(&[(sibling, parent_color), (parent, Color::Black), (far, Color::Black)]);
                    self.rotate_right(parent);
                    node = self.root;
                }
            }
        }

        self.node_mut(node).color = Color::Black;
    }

    /// Replace the subtree rooted at `old` with the one rooted at `new`.
    fn transplant(&mut self, old: NodeHandle, new: NodeHandle) {
        let parent = self.parent(old);
        if parent.is_nil() {
            self.root = new;
        } else if old == self.left(parent) {
            self.node_mut(parent).left = new;
        } else {
            self.node_mut(parent).right = new;
        }
        self.node_mut(new).parent = parent;
    }

    fn minimum(&self, mut handle: NodeHandle) -> NodeHandle {
        while !self.left(handle).is_nil() {
            handle = self.left(handle);
        }
        handle
    }

    // =========================================================================
    // Rotation and recoloring primitives
    // =========================================================================

    fn rotate_left(&mut self, node: NodeHandle) {
        let right = self.right(node);
        debug_assert!(!right.is_nil(), "rotate_left needs a right child");

        let right_left = self.left(right);
        self.node_mut(node).right = right_left;
        if !right_left.is_nil() {
            self.node_mut(right_left).parent = node;
        }

        let parent = self.parent(node);
        self.node_mut(right).parent = parent;
        if parent.is_nil() {
            self.root = right;
        } else if node == self.left(parent) {
            self.node_mut(parent).left = right;
        } else {
            self.node_mut(parent).right = right;
        }

        self.node_mut(right).left = node;
        self.node_mut(node).parent = right;
        self.rotation_count += 1;
    }

    fn rotate_right(&mut self, node: NodeHandle) {
        let left = self.left(node);
        debug_assert!(!left.is_nil(), "rotate_right needs a left child");

        let left_right = self.right(left);
        self.node_mut(node).left = left_right;
        if !left_right.is_nil() {
            self.node_mut(left_right).parent = node;
        }

        let parent = self.parent(node);
        self.node_mut(left).parent = parent;
        if parent.is_nil() {
            self.root = left;
        } else if node == self.right(parent) {
            self.node_mut(parent).right = left;
        } else {
            self.node_mut(parent).left = left;
        }

        self.node_mut(left).right = node;
        self.node_mut(node).parent = left;
        self.rotation_count += 1;
    }

    /// One recoloring step of a fixup case; counts once regardless of how
    /// many nodes it touches.
    fn recolor(&mut self, changes: &[(NodeHandle, Color)]) {
        for &(handle, color) in changes {
            debug_assert!(!(handle.is_nil() && color == Color::Red), "sentinel must stay black");
            self.node_mut(handle).color = color;
        }
        self.rotation_count += 1;
    }

    // =========================================================================
    // Arena
    // =========================================================================

    fn allocate(&mut self, key: BookId, value: V) -> NodeHandle {
        let node = Node {
            key,
            color: Color::Red,
            parent: NodeHandle::NIL,
            left: NodeHandle::NIL,
            right: NodeHandle::NIL,
        };

        match self.free_list.pop() {
            Some(slot) => {
                let handle = NodeHandle(slot);
                self.nodes[handle.index()] = node;
                self.values[handle.index()] = Some(value);
                handle
            }
            None => {
                let handle = NodeHandle(self.nodes.len() as u32);
                self.nodes.push(node);
                self.values.push(Some(value));
                handle
            }
        }
    }

    fn release(&mut self, handle: NodeHandle) -> Option<V> {
        self.nodes[handle.index()] = Node::sentinel();
        self.free_list.push(handle.0);
        self.values[handle.index()].take()
    }

    #[inline]
    fn node_mut(&mut self, handle: NodeHandle) -> &mut Node {
        &mut self.nodes[handle.index()]
    }

    #[inline]
    pub(super) fn key(&self, handle: NodeHandle) -> BookId {
        self.nodes[handle.index()].key
    }

    #[inline]
    pub(super) fn color(&self, handle: NodeHandle) -> Color {
        self.nodes[handle.index()].color
    }

    #[inline]
    pub(super) fn parent(&self, handle: NodeHandle) -> NodeHandle {
        self.nodes[handle.index()].parent
    }

    #[inline]
    pub(super) fn left(&self, handle: NodeHandle) -> NodeHandle {
        self.nodes[handle.index()].left
    }

    #[inline]
    pub(super) fn right(&self, handle: NodeHandle) -> NodeHandle {
        self.nodes[handle.index()].right
    }
}

/// In-order iterator over an `OrderedIndex`.
pub struct Iter<'a, V> {
    index: &'a OrderedIndex<V>,
    stack: Vec<NodeHandle>,
}

impl<'a, V> Iter<'a, V> {
    fn push_left_spine(&mut self, mut handle: NodeHandle) {
        while !handle.is_nil() {
            self.stack.push(handle);
            handle = self.index.left(handle);
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        self.push_left_spine(self.index.right(handle));
        self.index.value(handle)
    }
}
