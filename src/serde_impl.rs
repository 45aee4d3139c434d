//! `serde` support, enabled with the `serde` feature. A tree serializes as the sequence of its
//! elements in ascending order and deserializes by inserting a sequence one element at a time, so
//! duplicates collapse exactly as they would with [`Tree::insert`].

use serde::de::{Deserialize, Deserializer};
use serde::ser::{Serialize, Serializer};

use crate::tree::Tree;

impl<T> Serialize for Tree<T>
where
    T: Serialize,
{
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.collect_seq(self.iter())
    }
}

impl<'de, T> Deserialize<'de> for Tree<T>
where
    T: Deserialize<'de> + Ord,
{
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let elements = Vec::<T>::deserialize(deserializer)?;
        Ok(elements.into_iter().collect())
    }
}
