//! Aerodynamic coefficients indexed by angle of attack.
//!
//! Tables arrive in tidy CSV form: one `alpha` column (degrees) and one column per
//! coefficient, e.g. `CLtot`, `CDtot`, `L_D`. Rows are sorted by angle of attack on load.

use std::collections::BTreeMap;
use std::io::Read;
use std::path::Path;

use csv::{ReaderBuilder, Trim};
use serde::Serialize;

use crate::AeroError;

const ALPHA_HEADERS: [&str; 3] = ["alpha", "aoa", "angle_of_attack"];
pub const LIFT_COLUMN: &str = "CLtot";
pub const DRAG_COLUMN: &str = "CDtot";
pub const LIFT_TO_DRAG_COLUMN: &str = "L_D";

/// Quick-look drag polar figures read off a table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PolarEstimate {
    /// CD at the smallest |CL|.
    pub zero_lift_drag: f64,
    pub max_lift_to_drag: f64,
    /// Angle of attack of the best L/D (degrees).
    pub alpha_at_max_lift_to_drag: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CoefficientTable {
    alphas: Vec<f64>,
    columns: BTreeMap<String, Vec<f64>>,
}

impl CoefficientTable {
    /// Build a table from already-parsed columns. Every column must match the alpha count.
    pub fn from_columns(
        alphas: Vec<f64>,
        columns: BTreeMap<String, Vec<f64>>,
    ) -> Result<Self, AeroError> {
        if alphas.is_empty() {
            return Err(AeroError::EmptyTable);
        }
        if let Some((name, _)) = columns.iter().find(|(_, v)| v.len() != alphas.len()) {
            return Err(AeroError::RaggedColumn(name.clone()));
        }

        let mut order: Vec<usize> = (0..alphas.len()).collect();
        order.sort_by(|&a, &b| alphas[a].total_cmp(&alphas[b]));
        let reorder = |values: &[f64]| order.iter().map(|&i| values[i]).collect::<Vec<_>>();

        Ok(Self {
            alphas: reorder(&alphas),
            columns: columns
                .iter()
                .map(|(name, values)| (name.clone(), reorder(values)))
                .collect(),
        })
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, AeroError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_path(path)?;
        Self::from_csv(reader)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Self, AeroError> {
        let reader = ReaderBuilder::new()
            .has_headers(true)
            .trim(Trim::All)
            .from_reader(reader);
        Self::from_csv(reader)
    }

    fn from_csv<R: Read>(mut rdr: csv::Reader<R>) -> Result<Self, AeroError> {
        let headers = rdr.headers()?.clone();
        let alpha_idx = headers
            .iter()
            .position(|h| ALPHA_HEADERS.iter().any(|a| h.eq_ignore_ascii_case(a)))
            .ok_or_else(|| AeroError::MissingColumn("alpha".to_string()))?;

        let mut alphas = Vec::new();
        let mut columns: BTreeMap<String, Vec<f64>> = headers
            .iter()
            .enumerate()
            .filter(|(idx, _)| *idx != alpha_idx)
            .map(|(_, h)| (h.to_string(), Vec::new()))
            .collect();

        for record in rdr.records() {
            let record = record?;
            for (idx, header) in headers.iter().enumerate() {
                let raw = record.get(idx).unwrap_or("");
                let value: f64 = raw.parse().map_err(|_| AeroError::NonNumeric {
                    column: header.to_string(),
                    value: raw.to_string(),
                })?;
                if idx == alpha_idx {
                    alphas.push(value);
                } else if let Some(column) = columns.get_mut(header) {
                    column.push(value);
                }
            }
        }

        Self::from_columns(alphas, columns)
    }

    /// Angles of attack in ascending order (degrees).
    pub fn alphas(&self) -> &[f64] {
        &self.alphas
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.keys().map(String::as_str)
    }

    pub fn column(&self, name: &str) -> Result<&[f64], AeroError> {
        self.columns
            .get(name)
            .map(Vec::as_slice)
            .ok_or_else(|| AeroError::MissingColumn(name.to_string()))
    }

    /// Lift-to-drag ratio per row, preferring a tabulated `L_D` column.
    pub fn lift_to_drag(&self) -> Result<Vec<f64>, AeroError> {
        if let Ok(ld) = self.column(LIFT_TO_DRAG_COLUMN) {
            return Ok(ld.to_vec());
        }
        let cl = self.column(LIFT_COLUMN)?;
        let cd = self.column(DRAG_COLUMN)?;
        Ok(cl.iter().zip(cd).map(|(l, d)| l / d).collect())
    }

    /// Angle of attack of the largest lift-to-drag ratio, and that ratio.
    pub fn max_lift_to_drag(&self) -> Result<(f64, f64), AeroError> {
        let ld = self.lift_to_drag()?;
        ld.iter()
            .zip(&self.alphas)
            .filter(|(v, _)| v.is_finite())
            .max_by(|a, b| a.0.total_cmp(b.0))
            .map(|(v, alpha)| (*alpha, *v))
            .ok_or(AeroError::EmptyTable)
    }

    /// Drag coefficient of the row with the smallest |CL|, a quick CD0 estimate.
    pub fn zero_lift_drag_estimate(&self) -> Result<f64, AeroError> {
        let cl = self.column(LIFT_COLUMN)?;
        let cd = self.column(DRAG_COLUMN)?;
        cl.iter()
            .zip(cd)
            .min_by(|a, b| a.0.abs().total_cmp(&b.0.abs()))
            .map(|(_, d)| *d)
            .ok_or(AeroError::EmptyTable)
    }

    pub fn polar_estimate(&self) -> Result<PolarEstimate, AeroError> {
        let (alpha_at_max_lift_to_drag, max_lift_to_drag) = self.max_lift_to_drag()?;
        Ok(PolarEstimate {
            zero_lift_drag: self.zero_lift_drag_estimate()?,
            max_lift_to_drag,
            alpha_at_max_lift_to_drag,
        })
    }
}
