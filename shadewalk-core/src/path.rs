//! Walking paths returned by a path finder.
//!
//! A [`WalkPath`] is computed for one departure time and consumed within a
//! single objective evaluation.

use std::time::Duration;

use geo::LineString;

/// One traversed edge of a walking path.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PathEdge {
    /// Edge length in metres.
    pub length_metres: f64,
    /// Time needed to walk the edge.
    pub duration: Duration,
}

impl PathEdge {
    /// Construct an edge.
    #[must_use]
    pub const fn new(length_metres: f64, duration: Duration) -> Self {
        Self {
            length_metres,
            duration,
        }
    }
}

/// An ordered sequence of edges between a start point and a place.
///
/// # Examples
/// ```
/// use std::time::Duration;
/// use geo::line_string;
/// use shadewalk_core::{PathEdge, WalkPath};
///
/// let path = WalkPath::new(
///     line_string![(x: 0.0, y: 0.0), (x: 0.001, y: 0.0), (x: 0.002, y: 0.0)],
///     vec![
///         PathEdge::new(111.0, Duration::from_secs(80)),
///         PathEdge::new(111.0, Duration::from_secs(85)),
///     ],
/// );
/// assert_eq!(path.duration(), Duration::from_secs(165));
/// assert_eq!(path.distance_metres(), 222.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WalkPath {
    geometry: LineString<f64>,
    edges: Vec<PathEdge>,
}

impl WalkPath {
    /// Construct a path from its geometry and traversed edges.
    #[must_use]
    pub const fn new(geometry: LineString<f64>, edges: Vec<PathEdge>) -> Self {
        Self { geometry, edges }
    }

    /// Geometry of the path in `lon, lat` order.
    #[must_use]
    pub const fn geometry(&self) -> &LineString<f64> {
        &self.geometry
    }

    /// Traversed edges in walking order.
    #[must_use]
    pub fn edges(&self) -> &[PathEdge] {
        &self.edges
    }

    /// Total walking time.
    #[must_use]
    pub fn duration(&self) -> Duration {
        self.edges.iter().map(|edge| edge.duration).sum()
    }

    /// Total length in metres.
    #[must_use]
    pub fn distance_metres(&self) -> f64 {
        self.edges.iter().map(|edge| edge.length_metres).sum()
    }

    /// Edges paired with the offset from departure at which each is entered.
    pub fn timed_edges(&self) -> impl Iterator<Item = (Duration, &PathEdge)> + '_ {
        self.edges.iter().scan(Duration::ZERO, |elapsed, edge| {
            let entered = *elapsed;
            *elapsed = elapsed.saturating_add(edge.duration);
            Some((entered, edge))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::line_string;
    use rstest::{fixture, rstest};

    #[fixture]
    fn three_edges() -> WalkPath {
        WalkPath::new(
            line_string![(x: 0.0, y: 0.0), (x: 0.001, y: 0.0)],
            vec![
                PathEdge::new(50.0, Duration::from_secs(40)),
                PathEdge::new(25.0, Duration::from_secs(20)),
                PathEdge::new(75.0, Duration::from_secs(60)),
            ],
        )
    }

    #[rstest]
    fn totals_sum_edges(three_edges: WalkPath) {
        assert_eq!(three_edges.duration(), Duration::from_secs(120));
        assert_eq!(three_edges.distance_metres(), 150.0);
    }

    #[rstest]
    fn timed_edges_report_entry_offsets(three_edges: WalkPath) {
        let offsets: Vec<Duration> = three_edges.timed_edges().map(|(at, _)| at).collect();
        assert_eq!(
            offsets,
            vec![
                Duration::ZERO,
                Duration::from_secs(40),
                Duration::from_secs(60)
            ]
        );
    }

    #[rstest]
    fn empty_path_has_no_duration() {
        let path = WalkPath::new(LineString::new(Vec::new()), Vec::new());
        assert_eq!(path.duration(), Duration::ZERO);
        assert_eq!(path.distance_metres(), 0.0);
    }
}
