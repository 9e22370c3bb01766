//! Point abstraction and distance functions.
//!
//! The tree never owns the meaning of its points; it only needs each of them to
//! expose coordinates by index through the [`KdPoint`] trait. The number of
//! dimensions is supplied at tree construction, not inferred from the point type,
//! so a point with more stored coordinates can be indexed into a lower-dimensional
//! tree by truncation.
//!
//! The signature of a distance function is `Fn(&T, &T, usize) -> f64`: two points
//! and the number of dimensions to compare over. Branch-and-bound pruning is only
//! correct for metrics that decompose additively per axis, like the squared
//! euclidean distance provided here.

/// A value usable as a k-dimensional point.
pub trait KdPoint {
    /// The coordinate at a given axis, `0 <= axis < num_coords()`.
    fn coord(&self, axis: usize) -> f64;

    /// How many coordinates this value actually stores.
    ///
    /// A tree built with dimensionality `k` requires `k <= num_coords()` for
    /// every input point; coordinates past `k` are ignored.
    fn num_coords(&self) -> usize;
}

impl<const N: usize> KdPoint for [f64; N] {
    fn coord(&self, axis: usize) -> f64 { self[axis] }

    fn num_coords(&self) -> usize { N }
}

impl KdPoint for Vec<f64> {
    fn coord(&self, axis: usize) -> f64 { self[axis] }

    fn num_coords(&self) -> usize { self.len() }
}

/// Calculate the squared euclidean distance between two points.
///
/// Only the first `dimensionality` coordinates contribute.
///
/// # Arguments
/// * `a` - the first k-dimensional point
/// * `b` - the second k-dimensional point
/// * `dimensionality` - the number of dimensions compared
///
/// ```rust
/// use kd_tree::euclidean_distance_squared;
/// let d = euclidean_distance_squared(&[0.1, 0.1], &[0.2, 0.2], 2);
/// assert!((d - 0.02).abs() < 0.000001);
/// let d = euclidean_distance_squared(&vec![0.1, 0.1], &vec![0.2, 0.2], 2);
/// assert!((d - 0.02).abs() < 0.000001);
/// ```
pub fn euclidean_distance_squared<T: KdPoint>(a: &T, b: &T, dimensionality: usize) -> f64 {

    let mut sum = 0.0;
    for i in 0..dimensionality {
        let diff = a.coord(i) - b.coord(i);
        sum += diff * diff;
    }

    return sum;
}

#[cfg(test)]
mod test {

    use super::*;
    use assert_approx_eq::assert_approx_eq;

    #[test]
    fn distance_truncates_to_dimensionality() {

        let a = [1.0, 2.0, 100.0];
        let b = [2.0, 4.0, -100.0];

        // the third coordinate must not contribute in a 2-d view
        assert_approx_eq!(euclidean_distance_squared(&a, &b, 2), 5.0);
        assert_approx_eq!(euclidean_distance_squared(&a, &b, 1), 1.0);
    }

    #[test]
    fn vec_points_report_their_length() {

        let p = vec![0.5, 0.25, 0.125];
        assert_eq!(p.num_coords(), 3);
        assert_approx_eq!(p.coord(2), 0.125);

        let q = [0.0; 8];
        assert_eq!(q.num_coords(), 8);
    }
}
