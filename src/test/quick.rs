use quickcheck::{Arbitrary, Gen};

/// An enum for the various kinds of "things" to do to
/// a set in a quicktest.
#[derive(Copy, Clone, Debug)]
pub(crate) enum Op<T> {
    /// Insert the T into the set
    Insert(T),
    /// Remove the T from the set
    Remove(T),
    /// Compare iterators
    Iter,
}

impl<T> Arbitrary for Op<T>
where
    T: Arbitrary,
{
    /// Tells quickcheck how to randomly choose an operation. Inserts are weighted
    /// double so that trees grow deep enough to exercise every deletion case.
    fn arbitrary(g: &mut Gen) -> Self {
        match g.choose(&[0, 0, 1, 2]).unwrap() {
            0 => Op::Insert(T::arbitrary(g)),
            1 => Op::Remove(T::arbitrary(g)),
            2 => Op::Iter,
            _ => unreachable!(),
        }
    }
}
