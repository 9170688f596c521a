//! Reference counter module for the Neo Virtual Machine.
//!
//! This module provides reference counting functionality for objects in the
//! Neo VM. Every evaluation-stack slot, static/local/argument slot, and
//! compound-item child edge holds one reference; when an item's reference
//! count reaches zero it becomes a candidate for collection. Acyclic garbage
//! is freed immediately by cascading the decrement to its children. Cyclic
//! garbage (e.g. an array pushed into itself) cannot be detected this way,
//! since every member of the cycle still holds a reference from another
//! member — collecting it requires a periodic full trace over the
//! container graph, which `check_zero_referred` runs using
//! [`crate::strongly_connected_components`].

use crate::stack_item::StackItem;
use crate::strongly_connected_components::strongly_connected_components;
use std::collections::{HashMap, HashSet};
use std::rc::Rc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

/// Identifies the compound item that owns an edge to a child, for
/// [`ReferenceCounter::add_compound_reference`]/`remove_compound_reference`.
/// The wrapped id is the compound's own identity (its backing `Rc`'s
/// address, see [`compound_vertex_id`]), not a reference-counter-assigned
/// id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CompoundParent {
    /// An `Array` container, identified by its vertex id.
    Array(usize),
    /// A `Struct` container, identified by its vertex id.
    Struct(usize),
    /// A `Map` container, identified by its vertex id.
    Map(usize),
}

impl CompoundParent {
    fn vertex_id(self) -> usize {
        match self {
            CompoundParent::Array(id) | CompoundParent::Struct(id) | CompoundParent::Map(id) => {
                id
            }
        }
    }
}

/// Run a full cyclic-garbage trace after this many items have passed
/// through the zero-referred queue, bounding the cost of the periodic pass
/// per the spec's "bounded periodic full tracing pass" requirement.
const FULL_TRACE_INTERVAL: usize = 64;

/// Provides reference counting functionality for objects in the Neo VM.
#[derive(Clone, Debug)]
pub struct ReferenceCounter {
    /// A map of object IDs to their reference counts (stack/slot references
    /// plus compound-parent edges, combined).
    references: Arc<Mutex<HashMap<usize, u32>>>,

    /// The next available object ID for non-compound items tracked only by
    /// this counter (compound items bring their own vertex id).
    next_id: Arc<AtomicUsize>,

    /// The total count of references.
    reference_count: Arc<AtomicUsize>,

    /// Tracked items (compound types and buffers).
    tracked_items: Arc<Mutex<HashSet<usize>>>,

    /// Items with zero references, pending cleanup.
    zero_referred: Arc<Mutex<HashSet<usize>>>,

    /// Outgoing container -> child edges, used only by the periodic full
    /// trace to find cyclic garbage; the incremental path relies solely on
    /// `references`.
    edges: Arc<Mutex<HashMap<usize, Vec<usize>>>>,

    /// Number of items processed since the last full trace.
    since_full_trace: Arc<AtomicUsize>,
}

impl ReferenceCounter {
    /// Creates a new reference counter.
    pub fn new() -> Self {
        Self {
            references: Arc::new(Mutex::new(HashMap::new())),
            next_id: Arc::new(AtomicUsize::new(1)), // Start from 1, reserve 0 for null
            reference_count: Arc::new(AtomicUsize::new(0)),
            tracked_items: Arc::new(Mutex::new(HashSet::new())),
            zero_referred: Arc::new(Mutex::new(HashSet::new())),
            edges: Arc::new(Mutex::new(HashMap::new())),
            since_full_trace: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Returns true if `self` and `other` share the same underlying counter
    /// state (used to reject moving a compound item between engines without
    /// going through a deep copy).
    pub fn ptr_eq(&self, other: &ReferenceCounter) -> bool {
        Arc::ptr_eq(&self.references, &other.references)
    }

    /// Registers a new object and returns its ID.
    pub fn register(&self) -> usize {
        let id = self.next_id.fetch_add(1, Ordering::SeqCst);

        // Initialize reference count to 0
        let mut references = self.references.lock().expect("Lock poisoned");
        references.insert(id, 0);

        id
    }

    /// Adds a reference and returns its ID (matches test expectations).
    /// This method creates a new reference and returns the ID.
    pub fn add_reference(&self) -> usize {
        let id = self.register();
        self.add_reference_to(id);
        id
    }

    /// Increments the reference count for an object by ID.
    pub fn add_reference_to(&self, id: usize) {
        // Increment total reference count
        self.reference_count.fetch_add(1, Ordering::SeqCst);

        // Increment object's reference count
        let mut references = self.references.lock().expect("Lock poisoned");
        *references.entry(id).or_insert(0) += 1;

        let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
        zero_referred.remove(&id);
    }

    /// Decrements the reference count for an object.
    /// Returns true if the reference count reached zero.
    pub fn remove_reference(&self, id: usize) -> bool {
        // Decrement total reference count
        self.reference_count.fetch_sub(1, Ordering::SeqCst);

        // Decrement object's reference count
        let mut references = self.references.lock().expect("Lock poisoned");
        let ref_count = references.entry(id).or_insert(0);
        if *ref_count > 0 {
            *ref_count -= 1;
        }

        let zero_refs = *ref_count == 0;

        if zero_refs {
            let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
            zero_referred.insert(id);
        }

        zero_refs
    }

    /// Returns the reference count for an object.
    pub fn get_reference_count(&self, id: usize) -> u32 {
        let references = self.references.lock().expect("Lock poisoned");
        *references.get(&id).unwrap_or(&0)
    }

    /// Returns the total reference count.
    pub fn count(&self) -> usize {
        self.reference_count.load(Ordering::SeqCst)
    }

    /// Adds an item to the tracked items set.
    /// This is used for compound types and buffers that need special tracking.
    pub fn add_tracked_item(&self, id: usize) {
        let mut tracked_items = self.tracked_items.lock().expect("Lock poisoned");
        tracked_items.insert(id);
    }

    /// Adds an item to the zero referred set.
    /// This is used when an item has no references but needs to be tracked
    /// for potential cleanup (e.g., circular references).
    pub fn add_zero_referred(&self, id: usize) {
        let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
        zero_referred.insert(id);
    }

    /// Records that `parent` now holds a reference to `item`: increments
    /// `item`'s reference count and, if `item` is itself a compound, records
    /// the container edge for the periodic cyclic-garbage trace.
    pub fn add_compound_reference(&self, item: &StackItem, parent: CompoundParent) {
        let child_id = self.item_id(item);
        self.add_reference_to(child_id);

        if let Some(child_compound) = compound_vertex_id(item) {
            let mut tracked = self.tracked_items.lock().expect("Lock poisoned");
            tracked.insert(child_compound);
        }
        self.tracked_items
            .lock()
            .expect("Lock poisoned")
            .insert(parent.vertex_id());

        let mut edges = self.edges.lock().expect("Lock poisoned");
        edges.entry(parent.vertex_id()).or_default().push(child_id);
    }

    /// Records that `parent` no longer holds a reference to `item`:
    /// decrements `item`'s reference count and removes the recorded edge.
    pub fn remove_compound_reference(&self, item: &StackItem, parent: CompoundParent) {
        let child_id = self.item_id(item);
        self.remove_reference(child_id);

        let mut edges = self.edges.lock().expect("Lock poisoned");
        if let Some(children) = edges.get_mut(&parent.vertex_id()) {
            if let Some(position) = children.iter().position(|&id| id == child_id) {
                children.remove(position);
            }
        }
    }

    /// Checks for and cleans up zero referred items, freeing acyclic
    /// garbage immediately and running a bounded periodic full trace for
    /// cyclic garbage. Returns the current total reference count.
    pub fn check_zero_referred(&self) -> usize {
        self.collect_acyclic_garbage();

        let since = self.since_full_trace.load(Ordering::SeqCst);
        if since >= FULL_TRACE_INTERVAL {
            self.since_full_trace.store(0, Ordering::SeqCst);
            self.collect_cyclic_garbage();
        }

        self.reference_count.load(Ordering::SeqCst)
    }

    /// Cascades zero-reference items to their children, freeing whole
    /// acyclic subgraphs in one pass. This is the fast path; it cannot free
    /// a cycle, since every member still holds an incoming edge from
    /// another member.
    fn collect_acyclic_garbage(&self) {
        let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
        if zero_referred.is_empty() {
            return;
        }

        let mut worklist: Vec<usize> = zero_referred.drain().collect();
        drop(zero_referred);

        let mut tracked_items = self.tracked_items.lock().expect("Lock poisoned");
        let mut references = self.references.lock().expect("Lock poisoned");
        let mut edges = self.edges.lock().expect("Lock poisoned");
        let mut freed = 0usize;

        while let Some(id) = worklist.pop() {
            if references.get(&id).copied().unwrap_or(0) != 0 {
                continue; // re-referenced since being queued
            }
            if !tracked_items.remove(&id) {
                continue; // already freed or never tracked (primitive)
            }

            freed += 1;
            references.remove(&id);

            if let Some(children) = edges.remove(&id) {
                for child in children {
                    if let Some(count) = references.get_mut(&child) {
                        if *count > 0 {
                            *count -= 1;
                            self.reference_count.fetch_sub(1, Ordering::SeqCst);
                        }
                        if *count == 0 {
                            worklist.push(child);
                        }
                    }
                }
            }
        }

        self.since_full_trace.fetch_add(freed, Ordering::SeqCst);
        if freed > 0 {
            log::debug!("VM GC: collected {freed} acyclic items");
        }
    }

    /// Finds strongly connected components of the container graph and
    /// frees any component that has no incoming edge from outside itself.
    /// Such a component is, by construction, unreachable from any
    /// evaluation stack or slot — its members only reference each other.
    fn collect_cyclic_garbage(&self) {
        let mut tracked_items = self.tracked_items.lock().expect("Lock poisoned");
        let mut references = self.references.lock().expect("Lock poisoned");
        let mut edges = self.edges.lock().expect("Lock poisoned");

        if tracked_items.is_empty() {
            return;
        }

        let components = strongly_connected_components(&edges);
        let component_of: HashMap<usize, usize> = components
            .iter()
            .enumerate()
            .flat_map(|(idx, members)| members.iter().map(move |&m| (m, idx)))
            .collect();

        let mut freed = 0usize;

        for (idx, members) in components.iter().enumerate() {
            // Only components entirely made of tracked compound items are
            // eligible; a component touching an untracked node may still
            // be reachable through machinery this graph doesn't model.
            if !members.iter().all(|m| tracked_items.contains(m)) {
                continue;
            }

            let member_set: HashSet<usize> = members.iter().copied().collect();

            let has_external_incoming = edges.iter().any(|(&from, children)| {
                !member_set.contains(&from)
                    && children.iter().any(|child| member_set.contains(child))
            });

            if has_external_incoming {
                continue;
            }

            // A lone node with no self-loop and zero references is already
            // handled by the acyclic path; only collect here when the
            // component is a genuine cycle (size > 1, or a true self-loop).
            let is_cycle = members.len() > 1
                || edges
                    .get(&members[0])
                    .map(|c| c.contains(&members[0]))
                    .unwrap_or(false);
            if !is_cycle {
                continue;
            }

            for &member in members {
                tracked_items.remove(&member);
                if let Some(count) = references.remove(&member) {
                    self.reference_count
                        .fetch_sub(count as usize, Ordering::SeqCst);
                }
                edges.remove(&member);
                freed += 1;
            }
            let _ = component_of.get(&idx);
        }

        if freed > 0 {
            log::debug!("VM GC: collected {freed} items across cyclic components");
        }
    }

    /// Gets or assigns an ID for a StackItem.
    ///
    /// Compound items (`Array`/`Struct`/`Map`) carry their own stable vertex
    /// id; every other variant is identified by a content hash, matching
    /// the reference VM's by-value identity for primitives.
    fn item_id(&self, item: &StackItem) -> usize {
        if let Some(vertex_id) = compound_vertex_id(item) {
            return vertex_id;
        }
        self.get_or_assign_item_id(item)
    }

    /// Gets or assigns an ID for a StackItem based on content hash.
    fn get_or_assign_item_id(&self, item: &StackItem) -> usize {
        use std::collections::hash_map::DefaultHasher;
        use std::hash::{Hash, Hasher};

        let mut hasher = DefaultHasher::new();

        match item {
            StackItem::Null => {
                0u8.hash(&mut hasher);
            }
            StackItem::Boolean(b) => {
                1u8.hash(&mut hasher);
                b.hash(&mut hasher);
            }
            StackItem::Integer(i) => {
                2u8.hash(&mut hasher);
                i.hash(&mut hasher);
            }
            StackItem::ByteString(bytes) => {
                3u8.hash(&mut hasher);
                bytes.hash(&mut hasher);
            }
            StackItem::Buffer(buffer) => {
                4u8.hash(&mut hasher);
                (buffer.as_ptr() as usize).hash(&mut hasher);
            }
            StackItem::Array(arr) => {
                5u8.hash(&mut hasher);
                (Rc::as_ptr(arr) as usize).hash(&mut hasher);
            }
            StackItem::Struct(s) => {
                6u8.hash(&mut hasher);
                (s.as_ptr() as usize).hash(&mut hasher);
            }
            StackItem::Map(map) => {
                7u8.hash(&mut hasher);
                (Rc::as_ptr(map) as usize).hash(&mut hasher);
            }
            StackItem::InteropInterface(iface) => {
                8u8.hash(&mut hasher);
                (Arc::as_ptr(iface) as *const () as usize).hash(&mut hasher);
            }
            StackItem::Pointer(ptr) => {
                9u8.hash(&mut hasher);
                ptr.hash(&mut hasher);
            }
        }

        hasher.finish() as usize
    }

    /// Adds a stack reference for a StackItem (matches C# AddStackReference exactly).
    pub fn add_stack_reference(&self, item: &StackItem) {
        let item_id = self.item_id(item);
        self.add_reference_to(item_id);
    }

    /// Removes a stack reference for a StackItem (matches C# RemoveStackReference exactly).
    pub fn remove_stack_reference(&self, item: &StackItem) {
        let item_id = self.item_id(item);
        self.remove_reference(item_id);
    }

    /// Clears all references.
    pub fn clear(&self) {
        let mut references = self.references.lock().expect("Lock poisoned");
        references.clear();

        let mut tracked_items = self.tracked_items.lock().expect("Lock poisoned");
        tracked_items.clear();

        let mut zero_referred = self.zero_referred.lock().expect("Lock poisoned");
        zero_referred.clear();

        let mut edges = self.edges.lock().expect("Lock poisoned");
        edges.clear();

        self.reference_count.store(0, Ordering::SeqCst);
    }
}

/// Returns the compound's own vertex id if `item` is an `Array` or `Map`.
/// Both hold their backing collection behind an `Rc<RefCell<_>>`, so the
/// `Rc`'s address is a stable identity distinct from content: two arrays
/// with equal elements are still distinct vertices, matching the VM's
/// reference-identity semantics for these types. `Struct` is excluded: it
/// is a plain by-value `Vec` with no `Rc` to anchor an identity on, so its
/// instances are tracked only through `item_id`'s content hash.
fn compound_vertex_id(item: &StackItem) -> Option<usize> {
    match item {
        StackItem::Array(rc) => Some(Rc::as_ptr(rc) as usize),
        StackItem::Map(rc) => Some(Rc::as_ptr(rc) as usize),
        _ => None,
    }
}

impl Default for ReferenceCounter {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_register_and_reference_count() {
        let counter = ReferenceCounter::new();

        // Register two objects
        let obj1_id = counter.register();
        let obj2_id = counter.register();

        // Check that they have different IDs
        assert_ne!(obj1_id, obj2_id);

        // Check initial reference counts
        assert_eq!(counter.get_reference_count(obj1_id), 0);
        assert_eq!(counter.get_reference_count(obj2_id), 0);

        // Add references
        counter.add_reference_to(obj1_id);
        counter.add_reference_to(obj2_id);

        // Check updated reference counts
        assert_eq!(counter.get_reference_count(obj1_id), 2);
        assert_eq!(counter.get_reference_count(obj2_id), 1);
        assert_eq!(counter.count(), 3);

        // Remove references
        let zero_ref1 = counter.remove_reference(obj1_id);
        assert_eq!(zero_ref1, false);
        assert_eq!(counter.get_reference_count(obj1_id), 1);

        let zero_ref1 = counter.remove_reference(obj1_id);
        assert_eq!(zero_ref1, true);
        assert_eq!(counter.get_reference_count(obj1_id), 0);

        let zero_ref2 = counter.remove_reference(obj2_id);
        assert_eq!(zero_ref2, true);
        assert_eq!(counter.get_reference_count(obj2_id), 0);

        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_tracked_items() {
        let counter = ReferenceCounter::new();

        let obj_id = counter.register();
        counter.add_tracked_item(obj_id);

        assert_eq!(counter.get_reference_count(obj_id), 0);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_zero_referred() {
        let counter = ReferenceCounter::new();

        let obj_id = counter.register();
        counter.add_zero_referred(obj_id);

        assert_eq!(counter.get_reference_count(obj_id), 0);
        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn test_clear() {
        let counter = ReferenceCounter::new();

        let obj1_id = counter.register();
        let obj2_id = counter.register();
        counter.add_reference_to(obj1_id);
        counter.add_reference_to(obj2_id);
        counter.add_tracked_item(obj1_id);
        counter.add_zero_referred(obj2_id);

        assert_eq!(counter.count(), 2);

        counter.clear();

        assert_eq!(counter.count(), 0);
        assert_eq!(counter.get_reference_count(obj1_id), 0);
        assert_eq!(counter.get_reference_count(obj2_id), 0);
    }

    #[test]
    fn test_add_reference_returns_id() {
        let counter = ReferenceCounter::new();

        let id1 = counter.add_reference();
        let id2 = counter.add_reference();
        let id3 = counter.add_reference();

        assert_ne!(id1, id2);
        assert_ne!(id2, id3);
        assert_ne!(id1, id3);

        assert_eq!(counter.get_reference_count(id1), 1);
        assert_eq!(counter.get_reference_count(id2), 1);
        assert_eq!(counter.get_reference_count(id3), 1);

        assert_eq!(counter.count(), 3);

        let _zero_ref1 = counter.remove_reference(id1);
        let _zero_ref2 = counter.remove_reference(id2);
        let _zero_ref3 = counter.remove_reference(id3);

        assert_eq!(counter.count(), 0);
    }

    #[test]
    fn ptr_eq_distinguishes_independent_counters() {
        let a = ReferenceCounter::new();
        let b = ReferenceCounter::new();
        let a_clone = a.clone();

        assert!(a.ptr_eq(&a_clone));
        assert!(!a.ptr_eq(&b));
    }

    #[test]
    fn acyclic_compound_chain_is_collected() {
        let counter = ReferenceCounter::new();

        // parent -> child1 -> child2, parent held by a stack reference.
        let parent = CompoundParent::Array(1);
        counter.add_reference_to(1); // stack root
        counter.add_tracked_item(1);

        let child1 = StackItem::Integer(2.into());
        counter.add_compound_reference(&child1, parent);

        // Dropping the stack root should cascade-free the whole chain.
        assert!(counter.remove_reference(1));
        counter.check_zero_referred();
    }

    #[test]
    fn self_referencing_array_is_collected_by_full_trace() {
        let counter = ReferenceCounter::new();
        let id = 42usize;
        let parent = CompoundParent::Array(id);

        // The array references itself, so its own count never reaches 0
        // through ordinary decrement - only the periodic trace can free it.
        counter.add_tracked_item(id);
        counter.references.lock().unwrap().insert(id, 1);
        counter.reference_count.fetch_add(1, Ordering::SeqCst);
        counter
            .edges
            .lock()
            .unwrap()
            .entry(id)
            .or_default()
            .push(id);

        // Force the bounded periodic pass to run on this call.
        counter
            .since_full_trace
            .store(FULL_TRACE_INTERVAL, Ordering::SeqCst);
        counter.check_zero_referred();

        assert_eq!(counter.get_reference_count(id), 0);
        assert!(!counter.tracked_items.lock().unwrap().contains(&id));
    }

    #[test]
    fn compound_vertex_id_is_stable_and_distinct() {
        let array = StackItem::from_array(vec![StackItem::from_int(1)]);
        let alias = array.clone();
        let other = StackItem::from_array(vec![StackItem::from_int(1)]);

        assert_eq!(compound_vertex_id(&array), compound_vertex_id(&alias));
        assert_ne!(compound_vertex_id(&array), compound_vertex_id(&other));
        assert_eq!(compound_vertex_id(&StackItem::from_int(1)), None);
    }

    #[test]
    fn add_compound_reference_tracks_array_child_and_edge() {
        let counter = ReferenceCounter::new();
        let array = StackItem::from_array(Vec::new());
        let parent_id = compound_vertex_id(&array).expect("array has a vertex id");
        let parent = CompoundParent::Array(parent_id);

        let child = StackItem::from_int(7);
        counter.add_compound_reference(&child, parent);

        assert_eq!(counter.get_reference_count(counter.item_id(&child)), 1);
        assert!(counter
            .edges
            .lock()
            .unwrap()
            .get(&parent_id)
            .unwrap()
            .contains(&counter.item_id(&child)));

        counter.remove_compound_reference(&child, parent);
        assert_eq!(counter.get_reference_count(counter.item_id(&child)), 0);
        assert!(counter.edges.lock().unwrap().get(&parent_id).unwrap().is_empty());
    }
}
