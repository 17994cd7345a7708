use ndarray::Array2;
use proptest::prelude::*;
use status_classifiers::data_handling::{split, Dataset};
use status_classifiers::SelectionError;

fn indexed_dataset(n: usize) -> Dataset {
    // row i carries the value i so segments can be traced back to source rows
    let features = Array2::from_shape_fn((n, 1), |(r, _)| r as f64);
    let labels: Vec<usize> = (0..n).map(|i| i % 2).collect();
    Dataset::new(features, labels, vec!["row".into()], vec!["a".into(), "b".into()]).unwrap()
}

proptest! {
    #[test]
    fn split_is_an_ordered_partition(n in 2usize..400, fraction in 0.01f64..0.99) {
        let ds = indexed_dataset(n);
        match split(&ds, fraction) {
            Ok(seg) => {
                prop_assert_eq!(seg.n_train() + seg.n_validation(), n);
                prop_assert_eq!(seg.n_train(), (fraction * n as f64).floor() as usize);
                let train: Vec<f64> = seg.train_features.column(0).to_vec();
                let val: Vec<f64> = seg.val_features.column(0).to_vec();
                let expected_train: Vec<f64> = (0..seg.n_train()).map(|i| i as f64).collect();
                let expected_val: Vec<f64> = (seg.n_train()..n).map(|i| i as f64).collect();
                prop_assert_eq!(train, expected_train);
                prop_assert_eq!(val, expected_val);
                prop_assert_eq!(seg.train_labels, &ds.labels[..seg.n_train()]);
            }
            Err(e) => {
                // only a rounding that leaves the training segment empty may fail
                prop_assert!(matches!(e, SelectionError::Data(_)));
                prop_assert_eq!((fraction * n as f64).floor() as usize, 0);
            }
        }
    }
}

#[test]
fn full_training_fraction_leaves_no_validation_rows() {
    let ds = indexed_dataset(10);
    assert!(matches!(split(&ds, 1.0), Err(SelectionError::Data(_))));
}

#[test]
fn eighty_twenty_on_one_hundred_rows() {
    let ds = indexed_dataset(100);
    let seg = split(&ds, 0.8).unwrap();
    assert_eq!((seg.n_train(), seg.n_validation()), (80, 20));
}
