// Pearson correlation matrix with pairwise-complete observations

use crate::descriptive::pearson;

/// Symmetric correlation matrix; `None` where a pair has fewer than two
/// complete observations or one side has no variance
#[derive(Debug, Clone, PartialEq)]
pub struct CorrelationMatrix {
    pub names: Vec<String>,
    pub values: Vec<Vec<Option<f64>>>,
}

impl CorrelationMatrix {
    pub fn get(&self, row: &str, col: &str) -> Option<f64> {
        let i = self.names.iter().position(|n| n == row)?;
        let j = self.names.iter().position(|n| n == col)?;
        self.values[i][j]
    }
}

/// Correlate every pair of columns, dropping a row only from the pairs in
/// which one of its two values is missing
pub fn pairwise_correlation(columns: &[(String, Vec<Option<f64>>)]) -> CorrelationMatrix {
    let k = columns.len();
    let mut values = vec![vec![None; k]; k];

    for i in 0..k {
        for j in i..k {
            let (x, y): (Vec<f64>, Vec<f64>) = columns[i]
                .1
                .iter()
                .zip(&columns[j].1)
                .filter_map(|(a, b)| Some(((*a)?, (*b)?)))
                .unzip();
            let r = if i == j {
                // a column with any spread correlates perfectly with itself
                pearson(&x, &y).map(|_| 1.0)
            } else {
                pearson(&x, &y)
            };
            values[i][j] = r;
            values[j][i] = r;
        }
    }

    CorrelationMatrix {
        names: columns.iter().map(|(name, _)| name.clone()).collect(),
        values,
    }
}
