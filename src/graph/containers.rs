//! Pluggable container policies
//!
//! The graph keeps two kinds of derived collections next to its arenas:
//! ordered lists (the authoritative iteration order of nodes, edges, groups,
//! root nodes and control nodes) and membership indices (expected O(1)
//! presence tests). A [`ContainerPolicy`] picks the concrete collection for
//! both, so the engine never names a backing container directly.

use indexmap::IndexSet;
use rustc_hash::{FxBuildHasher, FxHashSet};
use std::collections::{BTreeSet, HashSet};
use std::fmt::Debug;
use std::hash::{BuildHasher, Hash};

/// Bound shared by every element stored in a policy container
pub trait Element: Copy + Eq + Hash + Ord + Debug + 'static {}

impl<T: Copy + Eq + Hash + Ord + Debug + 'static> Element for T {}

/// Insertion-ordered list of handles
pub trait OrderedList<T>: Default + Debug {
    type Iter<'a>: Iterator<Item = &'a T>
    where
        Self: 'a,
        T: 'a;

    /// Append an item. Returns false when the list rejected a duplicate.
    fn push(&mut self, item: T) -> bool;

    /// Remove `item`, keeping the order of the rest. Lists never hold
    /// duplicates, so which occurrence goes is not observable.
    fn remove_item(&mut self, item: &T) -> bool;

    fn contains_item(&self, item: &T) -> bool;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn iter(&self) -> Self::Iter<'_>;
}

/// Fast membership test over handles
pub trait MembershipIndex<T>: Default + Debug {
    fn insert(&mut self, item: T) -> bool;

    fn remove(&mut self, item: &T) -> bool;

    fn contains(&self, item: &T) -> bool;

    fn len(&self) -> usize;
}

impl<T: PartialEq + Debug> OrderedList<T> for Vec<T> {
    type Iter<'a> = std::slice::Iter<'a, T> where T: 'a;

    fn push(&mut self, item: T) -> bool {
        Vec::push(self, item);
        true
    }

    fn remove_item(&mut self, item: &T) -> bool {
        // Recent items sit at the back
        match self.as_slice().iter().rposition(|candidate| candidate == item) {
            Some(position) => {
                Vec::remove(self, position);
                true
            }
            None => false,
        }
    }

    fn contains_item(&self, item: &T) -> bool {
        self.as_slice().contains(item)
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        self.as_slice().iter()
    }
}

impl<T, S> OrderedList<T> for IndexSet<T, S>
where
    T: Hash + Eq + Debug,
    S: BuildHasher + Default,
{
    type Iter<'a> = indexmap::set::Iter<'a, T> where T: 'a, S: 'a;

    fn push(&mut self, item: T) -> bool {
        IndexSet::insert(self, item)
    }

    fn remove_item(&mut self, item: &T) -> bool {
        IndexSet::shift_remove(self, item)
    }

    fn contains_item(&self, item: &T) -> bool {
        IndexSet::contains(self, item)
    }

    fn len(&self) -> usize {
        IndexSet::len(self)
    }

    fn iter(&self) -> Self::Iter<'_> {
        IndexSet::iter(self)
    }
}

impl<T, S> MembershipIndex<T> for HashSet<T, S>
where
    T: Hash + Eq + Debug,
    S: BuildHasher + Default,
{
    fn insert(&mut self, item: T) -> bool {
        HashSet::insert(self, item)
    }

    fn remove(&mut self, item: &T) -> bool {
        HashSet::remove(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        HashSet::contains(self, item)
    }

    fn len(&self) -> usize {
        HashSet::len(self)
    }
}

impl<T: Ord + Debug> MembershipIndex<T> for BTreeSet<T> {
    fn insert(&mut self, item: T) -> bool {
        BTreeSet::insert(self, item)
    }

    fn remove(&mut self, item: &T) -> bool {
        BTreeSet::remove(self, item)
    }

    fn contains(&self, item: &T) -> bool {
        BTreeSet::contains(self, item)
    }

    fn len(&self) -> usize {
        BTreeSet::len(self)
    }
}

/// Selects the concrete collections used by a graph
pub trait ContainerPolicy: 'static {
    type List<T: Element>: OrderedList<T>;
    type Search<T: Element>: MembershipIndex<T>;
}

/// `Vec` lists with std `HashSet` indices
#[derive(Debug, Clone, Copy, Default)]
pub struct StdContainers;

impl ContainerPolicy for StdContainers {
    type List<T: Element> = Vec<T>;
    type Search<T: Element> = HashSet<T>;
}

/// `Vec` lists with Fx-hashed indices
#[derive(Debug, Clone, Copy, Default)]
pub struct FxContainers;

impl ContainerPolicy for FxContainers {
    type List<T: Element> = Vec<T>;
    type Search<T: Element> = FxHashSet<T>;
}

/// Insertion-ordered hash sets for lists, so list removal is O(1) on
/// average. Lists reject duplicates under this policy.
#[derive(Debug, Clone, Copy, Default)]
pub struct IndexedContainers;

impl ContainerPolicy for IndexedContainers {
    type List<T: Element> = IndexSet<T, FxBuildHasher>;
    type Search<T: Element> = FxHashSet<T>;
}

/// `Vec` lists with ordered `BTreeSet` indices
#[derive(Debug, Clone, Copy, Default)]
pub struct OrderedContainers;

impl ContainerPolicy for OrderedContainers {
    type List<T: Element> = Vec<T>;
    type Search<T: Element> = BTreeSet<T>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise_list<L: OrderedList<u32>>() {
        let mut list = L::default();
        assert!(list.is_empty());

        list.push(3);
        list.push(1);
        list.push(2);
        assert_eq!(list.len(), 3);
        assert!(list.contains_item(&1));

        assert!(list.remove_item(&1));
        assert!(!list.remove_item(&1));
        assert_eq!(list.iter().copied().collect::<Vec<_>>(), vec![3, 2]);

        assert!(list.remove_item(&3));
        assert!(list.remove_item(&2));
        assert!(list.is_empty());
    }

    fn exercise_index<S: MembershipIndex<u32>>() {
        let mut index = S::default();
        assert!(index.insert(7));
        assert!(!index.insert(7));
        assert!(index.contains(&7));
        assert_eq!(index.len(), 1);
        assert!(index.remove(&7));
        assert!(!index.contains(&7));
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_vec_list() {
        exercise_list::<Vec<u32>>();
    }

    #[test]
    fn test_index_set_list() {
        exercise_list::<IndexSet<u32, FxBuildHasher>>();
    }

    #[test]
    fn test_vec_list_keeps_duplicates() {
        let mut list: Vec<u32> = Vec::new();
        assert!(OrderedList::push(&mut list, 5));
        assert!(OrderedList::push(&mut list, 5));
        assert_eq!(OrderedList::len(&list), 2);

        // Only the first occurrence goes
        assert!(list.remove_item(&5));
        assert_eq!(OrderedList::len(&list), 1);
    }

    #[test]
    fn test_index_set_list_rejects_duplicates() {
        let mut list: IndexSet<u32, FxBuildHasher> = IndexSet::default();
        assert!(OrderedList::push(&mut list, 5));
        assert!(!OrderedList::push(&mut list, 5));
        assert_eq!(OrderedList::len(&list), 1);
    }

    #[test]
    fn test_membership_indices() {
        exercise_index::<HashSet<u32>>();
        exercise_index::<FxHashSet<u32>>();
        exercise_index::<BTreeSet<u32>>();
    }
}
