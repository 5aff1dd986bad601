use parent_bst::{Comparator, Tree, TreeError};

use std::collections::HashSet;

use crate::Op;

/// Applies a set of operations to a tree and a hashset.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same set of values in both.
fn do_ops<T>(ops: &[Op<T>], bst: &mut Tree<T>, set: &mut HashSet<T>)
where
    T: std::hash::Hash + Eq + Clone + std::fmt::Debug,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                bst.insert(x.clone());
                set.insert(x.clone());
            }
            Op::Remove(x) => {
                let expected = if set.remove(x) {
                    Ok(x.clone())
                } else {
                    Err(TreeError::NotFound)
                };
                assert_eq!(bst.remove(x), expected);
            }
        }
    }
}

quickcheck::quickcheck! {
    fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
        let mut tree = Tree::new();
        let mut set = HashSet::new();

        do_ops(&ops, &mut tree, &mut set);
        tree.len() == set.len() && set.iter().all(|x| tree.contains(x))
    }

    fn contains(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }

        xs.iter().all(|x| tree.contains(x))
    }

    fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }
        let added: HashSet<_> = xs.into_iter().collect();
        let nots: HashSet<_> = nots.into_iter().collect();
        let mut nots = nots.difference(&added);

        nots.all(|x| !tree.contains(x))
    }

    fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        let mut present = HashSet::new();
        for x in &xs {
            tree.insert(*x);
            present.insert(*x);
        }

        for remove in &removes {
            let expected = if present.remove(remove) {
                Ok(*remove)
            } else {
                Err(TreeError::NotFound)
            };
            if tree.remove(remove) != expected {
                return false;
            }
        }

        removes.iter().all(|x| !tree.contains(x))
            && present.iter().all(|x| tree.contains(x))
            && tree.len() == present.len()
    }

    fn in_order_is_sorted(xs: Vec<i16>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(*x);
        }

        let mut expected = xs;
        expected.sort_unstable();
        expected.dedup();

        tree.traverse_in_order().into_iter().eq(expected.iter())
    }

    fn reversed_comparator_reverses_in_order(xs: Vec<i16>) -> bool {
        let mut forward = Tree::new();
        let mut comparator = Comparator::<i16>::default();
        comparator.reverse();
        let mut backward = Tree::with_comparator(comparator);
        for x in &xs {
            forward.insert(*x);
            backward.insert(*x);
        }

        forward.traverse_in_order().into_iter().rev().eq(backward.traverse_in_order())
    }

    fn missing_remove_changes_nothing(xs: Vec<i8>) -> bool {
        let mut tree = Tree::new();
        for x in &xs {
            tree.insert(i16::from(*x));
        }
        let before = tree.to_string();

        tree.remove(&1000) == Err(TreeError::NotFound) && tree.to_string() == before
    }
}
