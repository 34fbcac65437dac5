//! Stratified k-fold cross-validation splits

use std::collections::BTreeMap;

use crate::model::ModelError;

/// A single train/validation split
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CvSplit {
    pub train_indices: Vec<usize>,
    pub test_indices: Vec<usize>,
    pub fold_idx: usize,
}

/// Stratified k-fold over `labels`, without shuffling.
///
/// Fold sizes per class follow a round-robin deal of the sorted labels, and
/// within each class the rows keep their original order, so consecutive rows
/// of a class land in the same fold.
pub fn stratified_k_fold(labels: &[i32], n_splits: usize) -> Result<Vec<CvSplit>, ModelError> {
    if n_splits < 2 {
        return Err(ModelError::InvalidFolds {
            folds: n_splits,
            reason: "at least 2 folds are required".to_string(),
        });
    }
    if labels.len() < n_splits {
        return Err(ModelError::InvalidFolds {
            folds: n_splits,
            reason: format!("only {} sample(s) available", labels.len()),
        });
    }

    let mut by_class: BTreeMap<i32, Vec<usize>> = BTreeMap::new();
    for (i, &label) in labels.iter().enumerate() {
        by_class.entry(label).or_default().push(i);
    }

    if let Some((class, rows)) = by_class.iter().min_by_key(|(_, rows)| rows.len()) {
        if rows.len() < n_splits {
            tracing::warn!(
                class,
                members = rows.len(),
                n_splits,
                "least populated class has fewer members than folds"
            );
        }
    }

    // Deal the sorted labels round-robin to get each fold's per-class quota
    let mut sorted = labels.to_vec();
    sorted.sort_unstable();
    let mut quota: BTreeMap<i32, Vec<usize>> = by_class
        .keys()
        .map(|&class| (class, vec![0; n_splits]))
        .collect();
    for (j, label) in sorted.iter().enumerate() {
        if let Some(counts) = quota.get_mut(label) {
            counts[j % n_splits] += 1;
        }
    }

    let mut fold_of = vec![0usize; labels.len()];
    for (class, rows) in &by_class {
        let mut cursor = rows.iter();
        for (fold, &count) in quota[class].iter().enumerate() {
            for &row in cursor.by_ref().take(count) {
                fold_of[row] = fold;
            }
        }
    }

    Ok((0..n_splits)
        .map(|fold_idx| {
            let (test_indices, train_indices): (Vec<usize>, Vec<usize>) =
                (0..labels.len()).partition(|&i| fold_of[i] == fold_idx);
            CvSplit {
                train_indices,
                test_indices,
                fold_idx,
            }
        })
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_folds_cover_every_row_once() {
        let labels = vec![0, 1, 0, 1, 1, 0, 0, 1, 0, 0, 1];
        let splits = stratified_k_fold(&labels, 3).unwrap();
        let mut seen = vec![0; labels.len()];
        for split in &splits {
            for &i in &split.test_indices {
                seen[i] += 1;
            }
            assert_eq!(split.train_indices.len() + split.test_indices.len(), labels.len());
        }
        assert!(seen.iter().all(|&n| n == 1));
    }

    #[test]
    fn test_folds_preserve_class_balance() {
        let labels: Vec<i32> = (0..30).map(|i| if i % 3 == 0 { 1 } else { 0 }).collect();
        let splits = stratified_k_fold(&labels, 3).unwrap();
        let positives: Vec<usize> = splits
            .iter()
            .map(|s| s.test_indices.iter().filter(|&&i| labels[i] == 1).count())
            .collect();
        assert_eq!(positives, vec![3, 3, 4]);
        assert!(splits.iter().all(|s| s.test_indices.len() == 10));
    }

    #[test]
    fn test_class_rows_are_contiguous_per_fold() {
        let labels = vec![0, 0, 0, 0, 1, 1, 1, 1];
        let splits = stratified_k_fold(&labels, 2).unwrap();
        assert_eq!(splits[0].test_indices, vec![0, 1, 4, 5]);
        assert_eq!(splits[1].test_indices, vec![2, 3, 6, 7]);
    }

    #[test]
    fn test_rejects_single_fold() {
        assert!(matches!(
            stratified_k_fold(&[0, 1, 0], 1),
            Err(ModelError::InvalidFolds { .. })
        ));
    }
}
