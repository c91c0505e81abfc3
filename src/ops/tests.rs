use super::*;

use rand::Rng;

//-----------------------------------------------------------------------------

// A naive vector for testing the default implementations in traits.
struct NaiveVector(Vec<u64>);

impl Element for NaiveVector {
    type Item = u64;

    fn len(&self) -> usize {
        self.0.len()
    }

    fn width(&self) -> usize {
        64
    }
}

impl Sortable for NaiveVector {
    fn less(&self, i: usize, j: usize) -> bool {
        self.0[i] < self.0[j]
    }

    fn swap(&mut self, i: usize, j: usize) {
        self.0.swap(i, j);
    }
}

fn check_sort(values: Vec<u64>, name: &str) {
    let mut truth = values.clone();
    truth.sort();
    let mut v = NaiveVector(values);
    v.sort();
    assert!(v.is_sorted(), "The vector is not sorted for {}", name);
    assert_eq!(v.0, truth, "Invalid sorted vector for {}", name);
}

//-----------------------------------------------------------------------------

#[test]
fn empty_and_single() {
    let empty = NaiveVector(Vec::new());
    assert!(empty.is_empty(), "Empty vector is not empty");
    assert!(empty.is_sorted(), "Empty vector is not sorted");
    check_sort(Vec::new(), "empty");
    check_sort(vec![42], "single");
}

#[test]
fn sort_random() {
    let mut rng = rand::thread_rng();
    for len in [2, 3, 16, 17, 100, 1000].iter().cloned() {
        let values: Vec<u64> = (0..len).map(|_| rng.gen::<u64>() % 64).collect();
        check_sort(values, &format!("{} random values", len));
    }
}

#[test]
fn sort_ordered() {
    check_sort((0..100).collect(), "increasing");
    check_sort((0..100).rev().collect(), "decreasing");
    check_sort(vec![7; 50], "constant");
}

//-----------------------------------------------------------------------------
