use avl::{Error, Tree};

use std::collections::{BTreeSet, HashSet};

use crate::Op;

/// Applies a set of operations to a tree and a set.
/// This way we can ensure that after a random smattering of inserts
/// and removes we have the same elements in both.
fn do_ops<T>(ops: &[Op<T>], tree: &mut Tree<T>, set: &mut BTreeSet<T>)
where
    T: Ord + Clone,
{
    for op in ops {
        match op {
            Op::Insert(x) => {
                tree.insert(x.clone());
                set.insert(x.clone());
            }
            Op::Remove(x) => {
                let _ = tree.remove(x);
                set.remove(x);
            }
        }
    }
}

/// An AVL tree with `n` elements is never taller than about `1.44 * lg(n + 2)`.
fn height_is_logarithmic<T>(tree: &Tree<T>) -> bool {
    (tree.height() as f64) < 1.45 * ((tree.len() + 2) as f64).log2()
}

#[quickcheck]
fn fuzz_multiple_operations_i8(ops: Vec<Op<i8>>) -> bool {
    let mut tree = Tree::new();
    let mut set = BTreeSet::new();

    do_ops(&ops, &mut tree, &mut set);
    tree.len() == set.len() && tree.iter().eq(set.iter()) && height_is_logarithmic(&tree)
}

#[quickcheck]
fn contains(xs: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();

    xs.iter().all(|x| tree.contains(x) && tree.get(x) == Ok(x))
}

#[quickcheck]
fn contains_not(xs: Vec<i8>, nots: Vec<i8>) -> bool {
    let tree: Tree<_> = xs.iter().copied().collect();
    let added: HashSet<_> = xs.into_iter().collect();
    let nots: HashSet<_> = nots.into_iter().collect();
    let mut nots = nots.difference(&added);

    nots.all(|x| !tree.contains(x) && tree.get(x) == Err(Error::NotFound))
}

#[quickcheck]
fn with_removals(xs: Vec<i8>, removes: Vec<i8>) -> bool {
    let mut tree: Tree<_> = xs.iter().copied().collect();
    for remove in &removes {
        let before = tree.len();
        match tree.remove(remove) {
            Ok(removed) => assert!(removed == *remove && tree.len() == before - 1),
            Err(e) => assert!(e == Error::NotFound && tree.len() == before),
        }
    }

    let mut still_present = xs;
    for remove in &removes {
        // We may have inserted the same element multiple times - drop each one.
        while let Some(pos) = still_present.iter().position(|x| x == remove) {
            still_present.swap_remove(pos);
        }
    }

    removes.iter().all(|x| !tree.contains(x))
        && still_present.iter().all(|x| tree.contains(x))
        && height_is_logarithmic(&tree)
}

#[quickcheck]
fn size_ignores_duplicates(xs: Vec<i8>) -> bool {
    let mut tree = Tree::new();
    for x in &xs {
        let before = tree.len();
        let inserted = tree.insert(*x);
        if tree.len() != before + usize::from(inserted) {
            return false;
        }
    }
    tree.len() == xs.iter().collect::<HashSet<_>>().len() && tree.len() == tree.iter().count()
}

#[quickcheck]
fn predecessor_matches_sorted_order(xs: Vec<i16>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let sorted = tree.inorder();

    sorted.iter().enumerate().all(|(i, x)| {
        let expected = i.checked_sub(1).map(|j| sorted[j]);
        tree.predecessor(*x) == Ok(expected)
    })
}

#[quickcheck]
fn traversals_visit_everything(xs: Vec<i16>) -> bool {
    let tree: Tree<_> = xs.into_iter().collect();
    let mut pre = tree.preorder();
    let mut post = tree.postorder();
    let mut level = tree.levelorder();
    pre.sort();
    post.sort();
    level.sort();

    let inorder = tree.inorder();
    pre == inorder && post == inorder && level == inorder
}
