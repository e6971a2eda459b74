//! Pure slice helpers used by command handlers.
//!
//! Every function borrows its input and returns a new collection.

use std::{cmp::Ordering, fmt::Display, hash::Hash, sync::OnceLock};

use icu_collator::{Collator, CollatorBorrowed, options::CollatorOptions};
use icu_locale_core::locale;
use indexmap::{IndexMap, IndexSet};
use rand::seq::{IndexedRandom, SliceRandom};

use utilize_core::{UtilizeError, UtilizeResult};

/// Maximum length used by [`trim_default`].
pub const DEFAULT_TRIM_LEN: usize = 10;

/// Conjunction used by [`list_join_default`].
pub const DEFAULT_CONJUNCTION: &str = "and";

/// Return a uniformly shuffled copy of `items`.
pub fn shuffle<T: Clone>(items: &[T]) -> Vec<T> {
    let mut shuffled = items.to_vec();
    shuffled.shuffle(&mut rand::rng());
    shuffled
}

/// Split `items` into consecutive chunks of `size`; the last one may be shorter.
pub fn chunk<T: Clone>(items: &[T], size: usize) -> UtilizeResult<Vec<Vec<T>>> {
    if size == 0 {
        return Err(UtilizeError::invalid("chunk size must be at least 1"));
    }

    Ok(items.chunks(size).map(<[T]>::to_vec).collect())
}

/// Remove duplicates, keeping the first occurrence of each value.
pub fn dedupe<T: Clone + Eq + Hash>(items: &[T]) -> Vec<T> {
    items
        .iter()
        .cloned()
        .collect::<IndexSet<T>>()
        .into_iter()
        .collect()
}

/// An arbitrarily nested list.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Nested<T> {
    Item(T),
    List(Vec<Nested<T>>),
}

impl<T> From<T> for Nested<T> {
    fn from(value: T) -> Self {
        Self::Item(value)
    }
}

/// Flatten every level of nesting, depth-first, in order.
pub fn flatten<T: Clone>(items: &[Nested<T>]) -> Vec<T> {
    fn collect<T: Clone>(items: &[Nested<T>], out: &mut Vec<T>) {
        for item in items {
            match item {
                Nested::Item(value) => out.push(value.clone()),
                Nested::List(inner) => collect(inner, out),
            }
        }
    }

    let mut flat = Vec::with_capacity(items.len());
    collect(items, &mut flat);
    flat
}

/// Values that have an "empty" state, such as `0`, `""` or `None`.
pub trait Truthy {
    fn is_truthy(&self) -> bool;
}

impl Truthy for bool {
    fn is_truthy(&self) -> bool {
        *self
    }
}

impl Truthy for str {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for String {
    fn is_truthy(&self) -> bool {
        !self.is_empty()
    }
}

impl Truthy for f32 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

impl Truthy for f64 {
    fn is_truthy(&self) -> bool {
        *self != 0.0 && !self.is_nan()
    }
}

macro_rules! impl_truthy_int {
    ($($ty:ty),*) => {
        $(impl Truthy for $ty {
            fn is_truthy(&self) -> bool {
                *self != 0
            }
        })*
    };
}

impl_truthy_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);

impl<T: Truthy + ?Sized> Truthy for &T {
    fn is_truthy(&self) -> bool {
        (**self).is_truthy()
    }
}

impl<T: Truthy> Truthy for Option<T> {
    fn is_truthy(&self) -> bool {
        self.as_ref().is_some_and(|value| value.is_truthy())
    }
}

/// Drop every falsy value.
pub fn filter_falsy<T: Clone + Truthy>(items: &[T]) -> Vec<T> {
    items.iter().filter(|item| item.is_truthy()).cloned().collect()
}

/// Keep at most `max_len` items and append a `...N more` marker when cut.
pub fn trim<T: Display>(items: &[T], max_len: usize) -> Vec<String> {
    let mut trimmed: Vec<String> = items.iter().take(max_len).map(ToString::to_string).collect();

    if items.len() > max_len {
        trimmed.push(format!("...{} more", items.len() - max_len));
    }

    trimmed
}

/// [`trim`] with [`DEFAULT_TRIM_LEN`].
pub fn trim_default<T: Display>(items: &[T]) -> Vec<String> {
    trim(items, DEFAULT_TRIM_LEN)
}

/// Pairwise equality: same length, same values in the same order.
pub fn equal<T: PartialEq>(left: &[T], right: &[T]) -> bool {
    left.len() == right.len() && left.iter().zip(right).all(|(a, b)| a == b)
}

/// Join items into a readable list, e.g. `a, b, and c`.
pub fn list_join<T: Display>(items: &[T], conjunction: &str) -> String {
    match items {
        [] => String::new(),
        [only] => only.to_string(),
        [first, second] => format!("{first} {conjunction} {second}"),
        [head @ .., last] => {
            let head = head
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(", ");
            format!("{head}, {conjunction} {last}")
        }
    }
}

/// [`list_join`] with [`DEFAULT_CONJUNCTION`].
pub fn list_join_default<T: Display>(items: &[T]) -> String {
    list_join(items, DEFAULT_CONJUNCTION)
}

/// Pick one item uniformly at random.
pub fn random_element<T>(items: &[T]) -> Option<&T> {
    items.choose(&mut rand::rng())
}

fn frequencies<T: Eq + Hash>(items: &[T]) -> IndexMap<&T, usize> {
    let mut counts = IndexMap::new();
    for item in items {
        *counts.entry(item).or_insert(0_usize) += 1;
    }
    counts
}

/// The most frequent value. Which value wins a tie is unspecified.
pub fn most_common<T: Clone + Eq + Hash>(items: &[T]) -> Option<T> {
    frequencies(items)
        .into_iter()
        .max_by_key(|(_, count)| *count)
        .map(|(item, _)| item.clone())
}

/// The least frequent value. Which value wins a tie is unspecified.
pub fn least_common<T: Clone + Eq + Hash>(items: &[T]) -> Option<T> {
    frequencies(items)
        .into_iter()
        .min_by_key(|(_, count)| *count)
        .map(|(item, _)| item.clone())
}

fn name_collator() -> Option<&'static CollatorBorrowed<'static>> {
    static COLLATOR: OnceLock<Option<CollatorBorrowed<'static>>> = OnceLock::new();
    COLLATOR
        .get_or_init(|| Collator::try_new(locale!("und").into(), CollatorOptions::default()).ok())
        .as_ref()
}

/// Human ordering by the Unicode collation algorithm (CLDR root order).
///
/// Accents and case only break ties between otherwise equal letters, so
/// `Çay` sorts next to `cay` and lowercase comes before uppercase.
pub fn compare_names(a: &str, b: &str) -> Ordering {
    let collated = match name_collator() {
        Some(collator) => collator.compare(a, b),
        None => fold_case(a).cmp(fold_case(b)).then_with(|| b.cmp(a)),
    };
    collated.then_with(|| a.cmp(b))
}

fn fold_case(name: &str) -> impl Iterator<Item = char> + '_ {
    name.chars().flat_map(char::to_lowercase)
}

/// Sort names alphabetically using [`compare_names`].
pub fn sort_by_name<S: AsRef<str> + Clone>(items: &[S]) -> Vec<S> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| compare_names(a.as_ref(), b.as_ref()));
    sorted
}

/// Sort numbers ascending. Values not comparable to themselves (NaN) go last.
pub fn sort_by_number<T: PartialOrd + Clone>(items: &[T]) -> Vec<T> {
    let mut sorted = items.to_vec();
    sorted.sort_by(|a, b| {
        let comparable = |value: &T| value.partial_cmp(value).is_some();
        match (comparable(a), comparable(b)) {
            (true, true) => a.partial_cmp(b).unwrap_or(Ordering::Equal),
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            (false, false) => Ordering::Equal,
        }
    });
    sorted
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shuffle_is_a_permutation() {
        let items: Vec<u32> = (0..50).collect();
        let mut shuffled = shuffle(&items);

        assert_eq!(shuffled.len(), items.len());
        shuffled.sort_unstable();
        assert_eq!(shuffled, items);
    }

    #[test]
    fn chunks_concatenate_back_to_the_input() {
        let items: Vec<u32> = (1..=11).collect();

        for size in 1..=12 {
            let chunks = chunk(&items, size).unwrap();
            let (last, rest) = chunks.split_last().unwrap();

            assert!(rest.iter().all(|c| c.len() == size));
            assert!(!last.is_empty() && last.len() <= size);
            assert_eq!(chunks.concat(), items);
        }
    }

    #[test]
    fn chunk_rejects_zero_size() {
        assert!(matches!(
            chunk(&[1, 2, 3], 0),
            Err(UtilizeError::InvalidArgument(_))
        ));
    }

    #[test]
    fn chunk_of_empty_input_is_empty() {
        assert!(chunk::<u8>(&[], 3).unwrap().is_empty());
    }

    #[test]
    fn dedupe_keeps_first_seen_order() {
        assert_eq!(dedupe(&[1, 2, 2, 3, 1]), vec![1, 2, 3]);
        assert_eq!(dedupe(&["b", "a", "b"]), vec!["b", "a"]);
    }

    #[test]
    fn flatten_walks_every_level() {
        let nested = vec![
            Nested::Item(1),
            Nested::List(vec![
                Nested::Item(2),
                Nested::List(vec![Nested::Item(3), Nested::List(vec![])]),
            ]),
            Nested::Item(4),
        ];

        assert_eq!(flatten(&nested), vec![1, 2, 3, 4]);
    }

    #[test]
    fn filter_falsy_drops_empty_values() {
        assert_eq!(filter_falsy(&[0, 1, 0, 7]), vec![1, 7]);
        assert_eq!(filter_falsy(&["", "a", ""]), vec!["a"]);
        assert_eq!(
            filter_falsy(&[Some(0), None, Some(3)]),
            vec![Some(3)]
        );
        assert_eq!(filter_falsy(&[f64::NAN, 0.0, 1.5]), vec![1.5]);
    }

    #[test]
    fn trim_appends_remaining_count() {
        let items: Vec<u32> = (1..=14).collect();
        let trimmed = trim(&items, 10);

        assert_eq!(trimmed.len(), 11);
        assert_eq!(trimmed[9], "10");
        assert_eq!(trimmed.last().map(String::as_str), Some("...4 more"));
    }

    #[test]
    fn trim_leaves_short_input_alone() {
        assert_eq!(trim(&["a", "b"], 2), vec!["a", "b"]);
        assert_eq!(trim_default(&[1, 2, 3]), vec!["1", "2", "3"]);
    }

    #[test]
    fn equal_compares_order_and_length() {
        assert!(equal(&[1, 2, 3], &[1, 2, 3]));
        assert!(!equal(&[1, 2, 3], &[3, 2, 1]));
        assert!(!equal(&[1, 2], &[1, 2, 3]));
        assert!(equal::<u8>(&[], &[]));
    }

    #[test]
    fn list_join_handles_every_length() {
        assert_eq!(list_join::<&str>(&[], "and"), "");
        assert_eq!(list_join(&["a"], "and"), "a");
        assert_eq!(list_join(&["a", "b"], "and"), "a and b");
        assert_eq!(list_join(&["a", "b", "c"], "and"), "a, b, and c");
        assert_eq!(list_join(&[1, 2, 3, 4], "or"), "1, 2, 3, or 4");
        assert_eq!(list_join_default(&["x", "y"]), "x and y");
    }

    #[test]
    fn random_element_comes_from_the_input() {
        let items = ["red", "green", "blue"];
        let picked = random_element(&items).unwrap();

        assert!(items.contains(picked));
        assert!(random_element::<u8>(&[]).is_none());
    }

    #[test]
    fn most_and_least_common_pick_by_frequency() {
        let items = ["a", "b", "b", "c", "b", "a"];

        assert_eq!(most_common(&items), Some("b"));
        assert_eq!(least_common(&items), Some("c"));
        assert_eq!(most_common::<u8>(&[]), None);
    }

    #[test]
    fn sort_by_name_ignores_case_first() {
        let sorted = sort_by_name(&["banana", "Apple", "cherry", "apple"]);
        assert_eq!(sorted, vec!["apple", "Apple", "banana", "cherry"]);
    }

    #[test]
    fn sort_by_name_places_accented_letters_with_their_base() {
        let sorted = sort_by_name(&["Zeytin", "Çay", "zil", "Ölçü", "armut"]);
        assert_eq!(sorted, vec!["armut", "Çay", "Ölçü", "Zeytin", "zil"]);

        let sorted = sort_by_name(&["zebra", "éclair", "eagle"]);
        assert_eq!(sorted, vec!["eagle", "éclair", "zebra"]);
    }

    #[test]
    fn sort_by_number_is_numeric() {
        assert_eq!(sort_by_number(&[10, 9, 100, 1]), vec![1, 9, 10, 100]);
        assert_eq!(sort_by_number(&[2.5, -1.0, 0.5]), vec![-1.0, 0.5, 2.5]);

        let with_nan = sort_by_number(&[3.0, f64::NAN, 1.0]);
        assert_eq!(&with_nan[..2], &[1.0, 3.0]);
        assert!(with_nan[2].is_nan());
    }
}
