//! Run configuration: the immutable simulation record and the
//! `schrodinger.inp` input format.
//!
//! The input format is a whitespace-separated text file; `#` starts a
//! trailing comment and blank lines are skipped:
//! ```text
//! 1.0             # mass
//! -2.0 2.0 1999   # xmin xmax npoints
//! 1 5             # first and last eigenvalue
//! linear          # interpolation method
//! 2               # number of control points
//! -2.0 0.0
//!  2.0 0.0
//! ```

use std::{ fs, path::Path };
use ndarray as nd;
use crate::{ error::ConfigError, interp::Method };

pub type ConfigResult<T> = Result<T, ConfigError>;

/// Immutable description of a single solver run.
///
/// Derived quantities (the coordinate grid and its canonical spacing) are
/// computed downstream by [`System::from_config`][crate::solve::System] and
/// threaded from there; nothing is ever written back onto this record.
#[derive(Clone, Debug)]
pub struct SimulationConfig {
    /// Particle mass, in units with ħ = 1.
    pub mass: f64,
    /// Lower grid bound.
    pub x_min: f64,
    /// Upper grid bound.
    pub x_max: f64,
    /// Number of grid points.
    pub n_points: usize,
    /// First selected eigenvalue index (1-based, inclusive).
    pub first_ev: usize,
    /// Last selected eigenvalue index (1-based, inclusive).
    pub last_ev: usize,
    /// Interpolation method for the potential.
    pub method: Method,
    /// Control point x-coordinates, strictly increasing.
    pub points_x: nd::Array1<f64>,
    /// Control point potential values.
    pub points_y: nd::Array1<f64>,
}

impl SimulationConfig {
    /// Check every field invariant, returning the first violation.
    pub fn validate(&self) -> ConfigResult<()> {
        ConfigError::check_mass(self.mass)?;
        ConfigError::check_bounds(self.x_min, self.x_max)?;
        ConfigError::check_grid_size(self.n_points)?;
        ConfigError::check_eig_range(
            self.first_ev, self.last_ev, self.n_points)?;
        ConfigError::check_points(&self.points_x, &self.points_y)?;
        Ok(())
    }

    /// Number of selected eigenstates.
    pub fn n_selected(&self) -> usize { self.last_ev - self.first_ev + 1 }

    /// Parse from the `schrodinger.inp` text format and
    /// [validate][Self::validate].
    pub fn parse(text: &str) -> ConfigResult<Self> {
        let mut lines
            = text.lines().enumerate()
            .map(|(k, line)| {
                (k + 1, line.split('#').next().unwrap_or(line).trim())
            })
            .filter(|(_, data)| !data.is_empty());

        let (k, data)
            = lines.next().ok_or(ConfigError::Truncated("mass"))?;
        let mass: f64
            = data.parse().map_err(|_| ConfigError::Malformed(k, "mass"))?;

        let (k, data)
            = lines.next().ok_or(ConfigError::Truncated("grid bounds"))?;
        let toks: Vec<&str> = data.split_whitespace().collect();
        let (x_min, x_max, n_points) = match toks.as_slice() {
            &[a, b, c] => (
                a.parse::<f64>()
                    .map_err(|_| ConfigError::Malformed(k, "xmin xmax npoints"))?,
                b.parse::<f64>()
                    .map_err(|_| ConfigError::Malformed(k, "xmin xmax npoints"))?,
                c.parse::<usize>()
                    .map_err(|_| ConfigError::Malformed(k, "xmin xmax npoints"))?,
            ),
            _ => return Err(ConfigError::Malformed(k, "xmin xmax npoints")),
        };

        let (k, data)
            = lines.next().ok_or(ConfigError::Truncated("eigenvalue range"))?;
        let toks: Vec<&str> = data.split_whitespace().collect();
        let (first_ev, last_ev) = match toks.as_slice() {
            &[a, b] => (
                a.parse::<usize>()
                    .map_err(|_| ConfigError::Malformed(k, "first last"))?,
                b.parse::<usize>()
                    .map_err(|_| ConfigError::Malformed(k, "first last"))?,
            ),
            _ => return Err(ConfigError::Malformed(k, "first last")),
        };

        let (_, data)
            = lines.next()
            .ok_or(ConfigError::Truncated("interpolation method"))?;
        let method: Method = data.parse()?;

        let (k, data)
            = lines.next()
            .ok_or(ConfigError::Truncated("control point count"))?;
        let n_ctrl: usize
            = data.parse()
            .map_err(|_| ConfigError::Malformed(k, "control point count"))?;

        let mut points_x: Vec<f64> = Vec::with_capacity(n_ctrl);
        let mut points_y: Vec<f64> = Vec::with_capacity(n_ctrl);
        for _ in 0..n_ctrl {
            let (k, data)
                = lines.next().ok_or(ConfigError::Truncated("control points"))?;
            let toks: Vec<&str> = data.split_whitespace().collect();
            match toks.as_slice() {
                &[a, b] => {
                    points_x.push(
                        a.parse().map_err(|_| ConfigError::Malformed(k, "x y"))?);
                    points_y.push(
                        b.parse().map_err(|_| ConfigError::Malformed(k, "x y"))?);
                },
                _ => return Err(ConfigError::Malformed(k, "x y")),
            }
        }

        let cfg = Self {
            mass,
            x_min,
            x_max,
            n_points,
            first_ev,
            last_ev,
            method,
            points_x: points_x.into(),
            points_y: points_y.into(),
        };
        cfg.validate()?;
        Ok(cfg)
    }

    /// Read and [parse][Self::parse] an input file.
    pub fn read<P: AsRef<Path>>(path: P) -> ConfigResult<Self> {
        Self::parse(&fs::read_to_string(path)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const INPUT: &str = "\
1.0             # mass
-2.0 2.0 1999   # xmin xmax npoints
1 5             # first and last eigenvalue
linear          # interpolation type
2               # number of control points
-2.0 0.0
 2.0 0.0
";

    #[test]
    fn parse_well_formed_input() {
        let cfg = SimulationConfig::parse(INPUT).unwrap();
        assert_eq!(cfg.mass, 1.0);
        assert_eq!(cfg.x_min, -2.0);
        assert_eq!(cfg.x_max, 2.0);
        assert_eq!(cfg.n_points, 1999);
        assert_eq!((cfg.first_ev, cfg.last_ev), (1, 5));
        assert_eq!(cfg.method, Method::Linear);
        assert_eq!(cfg.points_x.len(), 2);
        assert_eq!(cfg.points_y[0], 0.0);
        assert_eq!(cfg.n_selected(), 5);
    }

    #[test]
    fn parse_rejects_unknown_method() {
        let bad = INPUT.replace("linear", "quadratic");
        assert!(matches!(
            SimulationConfig::parse(&bad),
            Err(ConfigError::UnknownMethod(_)),
        ));
    }

    #[test]
    fn parse_rejects_truncated_input() {
        let bad: String
            = INPUT.lines().take(5).collect::<Vec<_>>().join("\n");
        assert!(matches!(
            SimulationConfig::parse(&bad),
            Err(ConfigError::Truncated(_)),
        ));
    }

    #[test]
    fn parse_rejects_malformed_line() {
        let bad = INPUT.replace("-2.0 2.0 1999", "-2.0 oops 1999");
        assert!(matches!(
            SimulationConfig::parse(&bad),
            Err(ConfigError::Malformed(2, _)),
        ));
    }

    #[test]
    fn validate_rejects_bad_fields() {
        let cfg = SimulationConfig::parse(INPUT).unwrap();

        let mut bad = cfg.clone();
        bad.mass = 0.0;
        assert!(matches!(bad.validate(), Err(ConfigError::BadMass(_))));

        let mut bad = cfg.clone();
        bad.x_max = bad.x_min;
        assert!(matches!(bad.validate(), Err(ConfigError::BadBounds(..))));

        let mut bad = cfg.clone();
        bad.first_ev = 0;
        assert!(matches!(bad.validate(), Err(ConfigError::BadEigRange { .. })));

        let mut bad = cfg.clone();
        bad.last_ev = bad.n_points + 1;
        assert!(matches!(bad.validate(), Err(ConfigError::BadEigRange { .. })));

        let mut bad = cfg;
        bad.points_x = ndarray::array![0.0, 0.0];
        assert!(matches!(bad.validate(), Err(ConfigError::UnorderedPoints)));
    }
}
