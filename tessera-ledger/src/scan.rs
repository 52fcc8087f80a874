//! Discovery of [`StatePointer`]s embedded within domain states.
//!
//! Domain types expose their direct children through [`Traverse`]; the
//! scanner walks that structure breadth-first and collects every pointer it
//! reaches. Elements of the provided container impls (`Option`, `Vec`,
//! `Box`, `Arc`, `BTreeMap`) are enumerated, so a pointer stored inside a
//! container is discovered.
use std::collections::{BTreeMap, HashSet, VecDeque};
use std::sync::Arc;

use crate::pointer::StatePointer;

/// Default bound on the number of nodes a single scan may visit.
pub const DEFAULT_VISIT_LIMIT: usize = 65_536;

/// Classification of a single value reached during traversal.
pub enum Node<'a> {
    /// An embedded state pointer. Terminal, collected.
    Pointer(StatePointer),
    /// A platform leaf (primitive, string). Terminal, skipped.
    Opaque,
    /// A domain-authored composite with enumerable children.
    Object(Vec<&'a dyn Traverse>),
}

/// Capability to expose direct children for pointer discovery.
pub trait Traverse {
    fn classify(&self) -> Node<'_>;
}

#[derive(Eq, PartialEq, Copy, Clone, Debug, thiserror::Error)]
pub enum ScanError {
    #[error("pointer scan visited more than {limit} nodes")]
    ResourceLimitExceeded { limit: usize },
}

/// Breadth-first worklist search for pointers reachable from a root state.
///
/// Traversal state lives entirely within one scan; nothing is retained
/// across invocations.
pub struct PointerScan<'a> {
    queue: VecDeque<&'a dyn Traverse>,
    // Keyed on the full fat pointer: the data address alone would conflate
    // a struct with its first field.
    seen: HashSet<*const (dyn Traverse + 'a)>,
    found: Vec<StatePointer>,
    found_set: HashSet<StatePointer>,
    visited: usize,
    limit: usize,
}

impl<'a> PointerScan<'a> {
    pub fn new(root: &'a dyn Traverse) -> PointerScan<'a> {
        Self::with_limit(root, DEFAULT_VISIT_LIMIT)
    }

    pub fn with_limit(root: &'a dyn Traverse, limit: usize) -> PointerScan<'a> {
        let mut queue = VecDeque::new();
        queue.push_back(root);
        PointerScan {
            queue,
            seen: HashSet::new(),
            found: Vec::new(),
            found_set: HashSet::new(),
            visited: 0,
            limit,
        }
    }

    /// Run the search to completion. The result preserves first-discovery
    /// order and contains no structural duplicates.
    pub fn run(mut self) -> Result<Vec<StatePointer>, ScanError> {
        while let Some(obj) = self.queue.pop_front() {
            let key = obj as *const (dyn Traverse + 'a);
            if !self.seen.insert(key) {
                continue;
            }
            self.visited += 1;
            if self.visited > self.limit {
                return Err(ScanError::ResourceLimitExceeded { limit: self.limit });
            }
            match obj.classify() {
                Node::Pointer(ptr) => {
                    if self.found_set.insert(ptr) {
                        self.found.push(ptr);
                    }
                }
                Node::Opaque => {}
                Node::Object(children) => self.queue.extend(children),
            }
        }
        Ok(self.found)
    }
}

impl Traverse for StatePointer {
    fn classify(&self) -> Node<'_> {
        Node::Pointer(*self)
    }
}

macro_rules! opaque_leaves {
    ($($t:ty),* $(,)?) => {
        $(impl Traverse for $t {
            fn classify(&self) -> Node<'_> {
                Node::Opaque
            }
        })*
    };
}

opaque_leaves!(
    bool, char, u8, u16, u32, u64, u128, usize, i8, i16, i32, i64, i128, isize, f32, f64, String,
);

impl<T: Traverse> Traverse for Option<T> {
    fn classify(&self) -> Node<'_> {
        Node::Object(self.iter().map(|x| x as &dyn Traverse).collect())
    }
}

impl<T: Traverse> Traverse for Vec<T> {
    fn classify(&self) -> Node<'_> {
        Node::Object(self.iter().map(|x| x as &dyn Traverse).collect())
    }
}

impl<K, V: Traverse> Traverse for BTreeMap<K, V> {
    fn classify(&self) -> Node<'_> {
        Node::Object(self.values().map(|x| x as &dyn Traverse).collect())
    }
}

impl<T: Traverse> Traverse for Box<T> {
    fn classify(&self) -> Node<'_> {
        Node::Object(vec![&**self])
    }
}

// Hands out the heap target so shared subgraphs deduplicate across clones.
impl<T: Traverse> Traverse for Arc<T> {
    fn classify(&self) -> Node<'_> {
        Node::Object(vec![&**self])
    }
}

#[cfg(test)]
mod tests {
    use std::cell::OnceCell;
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use super::*;
    use crate::state::{LinearId, StateTag};

    fn ptr(n: u8) -> StatePointer {
        StatePointer::linear(LinearId::from(n as u128), StateTag::of("Bar"))
    }

    struct Holder {
        ptr: StatePointer,
    }

    impl Traverse for Holder {
        fn classify(&self) -> Node<'_> {
            Node::Object(vec![&self.ptr])
        }
    }

    struct Composite {
        memo: String,
        amount: u64,
        first: Holder,
        second: Holder,
    }

    impl Traverse for Composite {
        fn classify(&self) -> Node<'_> {
            Node::Object(vec![&self.memo, &self.amount, &self.first, &self.second])
        }
    }

    #[test]
    fn collects_distinct_pointers_in_discovery_order() {
        let root = Composite {
            memo: "two pointers".to_string(),
            amount: 42,
            first: Holder { ptr: ptr(1) },
            second: Holder { ptr: ptr(2) },
        };
        let found = PointerScan::new(&root).run().unwrap();
        assert_eq!(found, vec![ptr(1), ptr(2)]);
    }

    #[test]
    fn deduplicates_structurally_equal_pointers() {
        let root = Composite {
            memo: "same pointer twice".to_string(),
            amount: 0,
            first: Holder { ptr: ptr(7) },
            second: Holder { ptr: ptr(7) },
        };
        let found = PointerScan::new(&root).run().unwrap();
        assert_eq!(found, vec![ptr(7)]);
    }

    #[test]
    fn scan_is_idempotent() {
        let root = Composite {
            memo: String::new(),
            amount: 1,
            first: Holder { ptr: ptr(3) },
            second: Holder { ptr: ptr(4) },
        };
        let a = PointerScan::new(&root).run().unwrap();
        let b = PointerScan::new(&root).run().unwrap();
        assert_eq!(a, b);
    }

    struct Bag {
        items: Vec<Holder>,
        extra: Option<Holder>,
        indexed: BTreeMap<u32, Holder>,
    }

    impl Traverse for Bag {
        fn classify(&self) -> Node<'_> {
            Node::Object(vec![&self.items, &self.extra, &self.indexed])
        }
    }

    #[test]
    fn finds_pointers_inside_containers() {
        let mut indexed = BTreeMap::new();
        indexed.insert(9, Holder { ptr: ptr(3) });
        let root = Bag {
            items: vec![Holder { ptr: ptr(1) }, Holder { ptr: ptr(2) }],
            extra: Some(Holder { ptr: ptr(4) }),
            indexed,
        };
        let found = PointerScan::new(&root).run().unwrap();
        assert_eq!(found, vec![ptr(1), ptr(2), ptr(4), ptr(3)]);
    }

    #[test]
    fn absent_option_yields_nothing() {
        let root = Bag {
            items: vec![],
            extra: None,
            indexed: BTreeMap::new(),
        };
        let found = PointerScan::new(&root).run().unwrap();
        assert!(found.is_empty());
    }

    #[test]
    fn opaque_leaves_are_not_descended() {
        let root = Composite {
            memo: "no pointers below this string".to_string(),
            amount: u64::MAX,
            first: Holder { ptr: ptr(1) },
            second: Holder { ptr: ptr(1) },
        };
        let found = PointerScan::new(&root).run().unwrap();
        assert_eq!(found.len(), 1);
    }

    struct Ring {
        ptr: StatePointer,
        next: OnceCell<Arc<Ring>>,
    }

    impl Ring {
        fn new(ptr: StatePointer) -> Ring {
            Ring {
                ptr,
                next: OnceCell::new(),
            }
        }
    }

    impl Traverse for Ring {
        fn classify(&self) -> Node<'_> {
            let mut children: Vec<&dyn Traverse> = vec![&self.ptr];
            if let Some(next) = self.next.get() {
                children.push(next);
            }
            Node::Object(children)
        }
    }

    #[test]
    fn cyclic_graph_terminates() {
        let a = Arc::new(Ring::new(ptr(1)));
        let b = Arc::new(Ring::new(ptr(2)));
        let _ = a.next.set(b.clone());
        let _ = b.next.set(a.clone());
        let found = PointerScan::new(a.as_ref()).run().unwrap();
        assert_eq!(found, vec![ptr(1), ptr(2)]);
    }

    struct Pair {
        left: Arc<Holder>,
        right: Arc<Holder>,
    }

    impl Traverse for Pair {
        fn classify(&self) -> Node<'_> {
            Node::Object(vec![&self.left, &self.right])
        }
    }

    #[test]
    fn shared_subgraph_visited_once() {
        let shared = Arc::new(Holder { ptr: ptr(5) });
        let root = Pair {
            left: shared.clone(),
            right: shared,
        };
        let found = PointerScan::new(&root).run().unwrap();
        assert_eq!(found, vec![ptr(5)]);
    }

    struct Chain {
        next: Option<Box<Chain>>,
    }

    impl Traverse for Chain {
        fn classify(&self) -> Node<'_> {
            Node::Object(vec![&self.next])
        }
    }

    #[test]
    fn visit_limit_is_enforced() {
        let mut chain = Chain { next: None };
        for _ in 0..100 {
            chain = Chain {
                next: Some(Box::new(chain)),
            };
        }
        let res = PointerScan::with_limit(&chain, 16).run();
        assert_eq!(res, Err(ScanError::ResourceLimitExceeded { limit: 16 }));
    }

    #[test]
    fn deep_chain_within_limit_succeeds() {
        let mut chain = Chain { next: None };
        for _ in 0..100 {
            chain = Chain {
                next: Some(Box::new(chain)),
            };
        }
        assert!(PointerScan::new(&chain).run().unwrap().is_empty());
    }
}
