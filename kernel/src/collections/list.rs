// Licensed under the Apache License, Version 2.0 or the MIT License.
// SPDX-License-Identifier: Apache-2.0 OR MIT
// Copyright Tock Contributors 2026.

//! Linked list implementation.
//!
//! The list is intrusive: every node embeds its own [`ListLink`] and the list
//! only ever holds shared `&'a` references. Nodes are allocated and owned by
//! the caller, and the list never frees anything. Removing a node only
//! unlinks it.

use core::cell::Cell;
use core::ptr;

pub struct ListLink<'a, T: 'a>(Cell<Option<&'a T>>);

impl<'a, T> ListLink<'a, T> {
    pub const fn empty() -> ListLink<'a, T> {
        ListLink(Cell::new(None))
    }

    /// The node this link points to, if any.
    pub fn get(&self) -> Option<&'a T> {
        self.0.get()
    }
}

pub trait ListNode<'a, T> {
    fn next(&'a self) -> &'a ListLink<'a, T>;
}

pub struct List<'a, T: 'a + ListNode<'a, T>> {
    head: ListLink<'a, T>,
}

pub struct ListIterator<'a, T: 'a + ListNode<'a, T>> {
    cur: Option<&'a T>,
}

impl<'a, T: ListNode<'a, T>> Iterator for ListIterator<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<&'a T> {
        match self.cur {
            Some(res) => {
                self.cur = res.next().0.get();
                Some(res)
            }
            None => None,
        }
    }
}

impl<'a, T: ListNode<'a, T>> List<'a, T> {
    pub const fn new() -> List<'a, T> {
        List {
            head: ListLink(Cell::new(None)),
        }
    }

    pub fn head(&self) -> Option<&'a T> {
        self.head.0.get()
    }

    pub fn is_empty(&self) -> bool {
        self.head.0.get().is_none()
    }

    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn contains(&self, node: &'a T) -> bool {
        self.iter().any(|cur| ptr::eq(cur, node))
    }

    /// Link `node` in front of the current head.
    ///
    /// The caller must make sure `node` is not already in a list, otherwise
    /// the list would no longer be acyclic.
    pub fn push_head(&self, node: &'a T) {
        node.next().0.set(self.head.0.get());
        self.head.0.set(Some(node));
    }

    pub fn pop_head(&self) -> Option<&'a T> {
        let remove = self.head.0.get();
        if let Some(node) = remove {
            self.head.0.set(node.next().0.get());
            node.next().0.set(None);
        }
        remove
    }

    /// Unlink `node` from the list.
    ///
    /// Returns `false` and leaves the list untouched if `node` is not a
    /// member. On success the removed node's own link is cleared.
    pub fn remove(&self, node: &'a T) -> bool {
        let mut prev = &self.head;
        loop {
            match prev.0.get() {
                None => return false,
                Some(cur) if ptr::eq(cur, node) => {
                    prev.0.set(cur.next().0.get());
                    cur.next().0.set(None);
                    return true;
                }
                Some(cur) => prev = cur.next(),
            }
        }
    }

    /// Unlink every node, leaving the list empty.
    pub fn clear(&self) {
        while self.pop_head().is_some() {}
    }

    pub fn iter(&self) -> ListIterator<'a, T> {
        ListIterator {
            cur: self.head.0.get(),
        }
    }
}

#[cfg(test)]
mod test {
    use super::{List, ListLink, ListNode};

    struct Node<'a> {
        value: usize,
        next: ListLink<'a, Node<'a>>,
    }

    impl<'a> Node<'a> {
        fn new(value: usize) -> Node<'a> {
            Node {
                value,
                next: ListLink::empty(),
            }
        }
    }

    impl<'a> ListNode<'a, Node<'a>> for Node<'a> {
        fn next(&'a self) -> &'a ListLink<'a, Node<'a>> {
            &self.next
        }
    }

    fn values<'a>(list: &List<'a, Node<'a>>, out: &mut [usize]) -> usize {
        let mut n = 0;
        for node in list.iter() {
            out[n] = node.value;
            n += 1;
        }
        n
    }

    #[test]
    fn push_head_prepends() {
        let a = Node::new(1);
        let b = Node::new(2);
        let c = Node::new(3);
        let list = List::new();
        assert!(list.is_empty());

        list.push_head(&a);
        list.push_head(&b);
        list.push_head(&c);

        let mut out = [0; 3];
        assert_eq!(values(&list, &mut out), 3);
        assert_eq!(out, [3, 2, 1]);
        assert_eq!(list.head().map(|n| n.value), Some(3));
    }

    #[test]
    fn remove_from_empty_list() {
        let a = Node::new(1);
        let list = List::new();
        assert!(!list.remove(&a));
        assert!(list.is_empty());
    }

    #[test]
    fn remove_sole_node_empties_list() {
        let a = Node::new(1);
        let list = List::new();
        list.push_head(&a);
        assert!(list.remove(&a));
        assert!(list.is_empty());
        assert!(a.next.get().is_none());
        assert!(!list.remove(&a));
    }

    #[test]
    fn remove_head_middle_tail() {
        let a = Node::new(1);
        let b = Node::new(2);
        let c = Node::new(3);
        let d = Node::new(4);
        let e = Node::new(5);
        let list = List::new();
        for node in [&e, &d, &c, &b, &a] {
            list.push_head(node);
        }

        // Head.
        assert!(list.remove(&a));
        let mut out = [0; 5];
        assert_eq!(values(&list, &mut out), 4);
        assert_eq!(out[..4], [2, 3, 4, 5]);

        // Middle.
        assert!(list.remove(&c));
        assert_eq!(values(&list, &mut out), 3);
        assert_eq!(out[..3], [2, 4, 5]);

        // Tail.
        assert!(list.remove(&e));
        assert_eq!(values(&list, &mut out), 2);
        assert_eq!(out[..2], [2, 4]);
        assert!(d.next.get().is_none());
    }

    #[test]
    fn remove_absent_node_leaves_list_intact() {
        let a = Node::new(1);
        let b = Node::new(2);
        let stranger = Node::new(9);
        let list = List::new();
        list.push_head(&a);
        list.push_head(&b);

        assert!(!list.remove(&stranger));
        assert_eq!(list.len(), 2);
        assert!(list.contains(&a));
        assert!(list.contains(&b));
        assert!(!list.contains(&stranger));
    }

    #[test]
    fn removed_node_can_be_reinserted() {
        let a = Node::new(1);
        let b = Node::new(2);
        let list = List::new();
        list.push_head(&a);
        list.push_head(&b);

        assert!(list.remove(&a));
        list.push_head(&a);

        let mut out = [0; 2];
        assert_eq!(values(&list, &mut out), 2);
        assert_eq!(out, [1, 2]);
    }

    #[test]
    fn clear_unlinks_everything() {
        let a = Node::new(1);
        let b = Node::new(2);
        let list = List::new();
        list.push_head(&a);
        list.push_head(&b);

        list.clear();
        assert!(list.is_empty());
        assert!(a.next.get().is_none());
        assert!(b.next.get().is_none());
        assert_eq!(list.pop_head().map(|n| n.value), None);
    }
}
