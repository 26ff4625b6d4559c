use alloc::vec::Vec;
use core::ops::{
    Index,
    IndexMut,
};

use crate::Ptr;

#[cold]
#[inline(never)]
fn assert_free() -> ! {
    panic!("Attempted to access data of free slot");
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct NodeData<K, I> {
    pub(crate) key: K,
    pub(crate) info: I,
}

#[derive(Debug)]
enum DataOrFree<K, I> {
    Free,
    Data(NodeData<K, I>),
}

/// A single cell of the chain. For occupied slots `next` is the successor in
/// the sequence, for free slots it is the next entry of the free list.
#[derive(Debug)]
pub(crate) struct Slot<K, I> {
    next: Option<Ptr>,
    data: DataOrFree<K, I>,
}

impl<K, I> Slot<K, I> {
    pub(crate) fn next(&self) -> Option<Ptr> {
        self.next
    }

    pub(crate) fn next_mut(&mut self) -> &mut Option<Ptr> {
        &mut self.next
    }

    pub(crate) fn into_data(self) -> NodeData<K, I> {
        match self.data {
            DataOrFree::Data(data) => data,
            DataOrFree::Free => assert_free(),
        }
    }

    pub(crate) fn data(&self) -> &NodeData<K, I> {
        match &self.data {
            DataOrFree::Data(data) => data,
            DataOrFree::Free => assert_free(),
        }
    }

    pub(crate) fn data_mut(&mut self) -> &mut NodeData<K, I> {
        match &mut self.data {
            DataOrFree::Data(data) => data,
            DataOrFree::Free => assert_free(),
        }
    }
}

#[derive(Debug)]
pub(crate) struct Arena<K, I> {
    nodes: Vec<Slot<K, I>>,
    free_head: Option<Ptr>,
}

impl<K, I> Arena<K, I> {
    pub(crate) fn new() -> Self {
        Arena {
            nodes: Vec::new(),
            free_head: None,
        }
    }

    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Arena {
            nodes: Vec::with_capacity(capacity),
            free_head: None,
        }
    }

    pub(crate) fn links(&self, ptr: Ptr) -> &Slot<K, I> {
        &self.nodes[ptr.unchecked_get()]
    }

    pub(crate) fn links_mut(&mut self, ptr: Ptr) -> &mut Slot<K, I> {
        &mut self.nodes[ptr.unchecked_get()]
    }

    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.free_head = None;
    }

    pub(crate) fn alloc(&mut self, key: K, info: I, next: Option<Ptr>) -> Ptr {
        let slot = Slot {
            next,
            data: DataOrFree::Data(NodeData { key, info }),
        };

        match self.free_head {
            Some(ptr) => {
                let old = core::mem::replace(&mut self.nodes[ptr.unchecked_get()], slot);
                self.free_head = old.next;
                ptr
            }
            None => {
                let ptr = Ptr::unchecked_from(self.nodes.len());
                self.nodes.push(slot);
                ptr
            }
        }
    }

    pub(crate) fn is_occupied(&self, ptr: Ptr) -> bool {
        self.nodes
            .get(ptr.unchecked_get())
            .is_some_and(|slot| matches!(slot.data, DataOrFree::Data(_)))
    }

    /// Releases `ptr` to the free list and returns the slot that occupied it.
    /// The caller is responsible for unlinking it from the chain first.
    pub(crate) fn free(&mut self, ptr: Ptr) -> Slot<K, I> {
        assert!(self.is_occupied(ptr), "Pointer to free must be occupied");
        let result = core::mem::replace(
            &mut self.nodes[ptr.unchecked_get()],
            Slot {
                next: self.free_head,
                data: DataOrFree::Free,
            },
        );
        self.free_head = Some(ptr);

        result
    }
}

impl<K, I> Index<Ptr> for Arena<K, I> {
    type Output = NodeData<K, I>;

    fn index(&self, index: Ptr) -> &Self::Output {
        self.nodes[index.unchecked_get()].data()
    }
}

impl<K, I> IndexMut<Ptr> for Arena<K, I> {
    fn index_mut(&mut self, index: Ptr) -> &mut Self::Output {
        self.nodes[index.unchecked_get()].data_mut()
    }
}
