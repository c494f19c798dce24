//! Incident location generators.

use geo::{Area, BoundingRect, Contains, Coord, LineString, Point, Rect};
use rand::distributions::WeightedIndex;

use ems_core::{GeoPoint, SimRng, SimTime};

use crate::{weighted_index, GeneratorError, GeneratorResult};

/// Kilometres per degree used to turn a radius into degrees.
const KM_PER_DEGREE: f64 = 110.54;

/// Rejection-sampling cap for [`Polygon::sample`].
const MAX_ATTEMPTS: usize = 10_000;

pub trait LocationGenerator {
    fn generate(&mut self, at: SimTime) -> GeneratorResult<GeoPoint>;
}

// ── CircleLocation ────────────────────────────────────────────────────────────

/// Uniform over a disc around `center`.
pub struct CircleLocation {
    center:     GeoPoint,
    radius_deg: f64,
    rng:        SimRng,
}

impl CircleLocation {
    pub fn new(center: GeoPoint, radius_km: f64, rng: SimRng) -> GeneratorResult<Self> {
        if !radius_km.is_finite() || radius_km < 0.0 {
            return Err(GeneratorError::InvalidParameter(format!(
                "radius must be non-negative, got {radius_km} km"
            )));
        }
        Ok(Self { center, radius_deg: radius_km / KM_PER_DEGREE, rng })
    }
}

impl LocationGenerator for CircleLocation {
    fn generate(&mut self, _at: SimTime) -> GeneratorResult<GeoPoint> {
        let direction = self.rng.gen_range(0.0..std::f64::consts::TAU);
        // sqrt keeps the density uniform over area, not over radius.
        let magnitude = self.radius_deg * self.rng.random::<f64>().sqrt();
        Ok(GeoPoint::new(
            self.center.lat + magnitude * direction.sin(),
            self.center.lon + magnitude * direction.cos(),
        ))
    }
}

// ── Polygon ───────────────────────────────────────────────────────────────────

/// A simple polygon in lat/lon space (implicitly closed).  Longitude is the
/// `x` axis of the underlying `geo` shape.
#[derive(Clone, Debug)]
pub struct Polygon {
    vertices: Vec<GeoPoint>,
    shape:    geo::Polygon<f64>,
    bounds:   Rect<f64>,
}

impl Polygon {
    /// Fails for fewer than three vertices, non-finite coordinates, or zero
    /// area.
    pub fn new(vertices: Vec<GeoPoint>) -> GeneratorResult<Self> {
        Self::indexed(vertices, 0)
    }

    fn indexed(vertices: Vec<GeoPoint>, index: usize) -> GeneratorResult<Self> {
        if vertices.len() < 3 || vertices.iter().any(|p| !p.lat.is_finite() || !p.lon.is_finite()) {
            return Err(GeneratorError::DegeneratePolygon(index));
        }
        let ring: LineString<f64> = vertices.iter().map(|p| Coord { x: p.lon, y: p.lat }).collect();
        let shape = geo::Polygon::new(ring, Vec::new());
        let bounds = shape.bounding_rect().ok_or(GeneratorError::DegeneratePolygon(index))?;
        if shape.unsigned_area() <= 0.0 {
            return Err(GeneratorError::DegeneratePolygon(index));
        }
        Ok(Self { vertices, shape, bounds })
    }

    /// Build from parallel latitude / longitude lists.
    pub fn from_coords(latitudes: &[f64], longitudes: &[f64]) -> GeneratorResult<Self> {
        if latitudes.len() != longitudes.len() {
            return Err(GeneratorError::LengthMismatch {
                expected: latitudes.len(),
                found:    longitudes.len(),
            });
        }
        Self::new(latitudes.iter().zip(longitudes).map(|(&lat, &lon)| GeoPoint::new(lat, lon)).collect())
    }

    pub fn vertices(&self) -> &[GeoPoint] {
        &self.vertices
    }

    /// Area in square degrees.
    pub fn area(&self) -> f64 {
        self.shape.unsigned_area()
    }

    /// Strict interior test; points on an edge are outside.
    pub fn contains(&self, p: GeoPoint) -> bool {
        self.shape.contains(&Point::new(p.lon, p.lat))
    }

    /// Uniform point inside the polygon by rejection from the bounding box.
    pub fn sample(&self, rng: &mut SimRng) -> GeneratorResult<GeoPoint> {
        let (min, max) = (self.bounds.min(), self.bounds.max());
        for _ in 0..MAX_ATTEMPTS {
            let p = GeoPoint::new(
                min.y + rng.random::<f64>() * (max.y - min.y),
                min.x + rng.random::<f64>() * (max.x - min.x),
            );
            if self.contains(p) {
                return Ok(p);
            }
        }
        Err(GeneratorError::SamplingExhausted(MAX_ATTEMPTS))
    }
}

// ── PolygonLocation ───────────────────────────────────────────────────────────

pub struct PolygonLocation {
    polygon: Polygon,
    rng:     SimRng,
}

impl PolygonLocation {
    pub fn new(polygon: Polygon, rng: SimRng) -> Self {
        Self { polygon, rng }
    }
}

impl LocationGenerator for PolygonLocation {
    fn generate(&mut self, _at: SimTime) -> GeneratorResult<GeoPoint> {
        self.polygon.sample(&mut self.rng)
    }
}

// ── MultiPolygonLocation ──────────────────────────────────────────────────────

/// A region split into polygons with their own case densities.  A polygon is
/// drawn by density, then a point is sampled inside it.
pub struct MultiPolygonLocation {
    polygons:  Vec<Polygon>,
    densities: WeightedIndex<f64>,
    rng:       SimRng,
}

impl MultiPolygonLocation {
    /// `densities` must have one entry per polygon and sum to one.
    pub fn new(polygons: Vec<Polygon>, densities: Vec<f64>, rng: SimRng) -> GeneratorResult<Self> {
        if polygons.is_empty() {
            return Err(GeneratorError::Empty);
        }
        let densities = weighted_index(&densities, polygons.len())?;
        Ok(Self { polygons, densities, rng })
    }

    /// Equal density for every polygon.
    pub fn uniform(polygons: Vec<Polygon>, rng: SimRng) -> GeneratorResult<Self> {
        let n = polygons.len();
        Self::new(polygons, vec![1.0 / n as f64; n], rng)
    }

    /// Build from per-polygon latitude / longitude lists.
    pub fn from_coords(
        latitudes: &[Vec<f64>],
        longitudes: &[Vec<f64>],
        densities: Option<Vec<f64>>,
        rng: SimRng,
    ) -> GeneratorResult<Self> {
        if latitudes.len() != longitudes.len() {
            return Err(GeneratorError::LengthMismatch {
                expected: latitudes.len(),
                found:    longitudes.len(),
            });
        }
        let polygons = latitudes
            .iter()
            .zip(longitudes)
            .enumerate()
            .map(|(i, (lats, lons))| {
                if lats.len() != lons.len() {
                    return Err(GeneratorError::DegeneratePolygon(i));
                }
                let vertices = lats.iter().zip(lons).map(|(&lat, &lon)| GeoPoint::new(lat, lon)).collect();
                Polygon::indexed(vertices, i)
            })
            .collect::<GeneratorResult<Vec<_>>>()?;

        match densities {
            Some(d) => Self::new(polygons, d, rng),
            None => Self::uniform(polygons, rng),
        }
    }
}

impl LocationGenerator for MultiPolygonLocation {
    fn generate(&mut self, _at: SimTime) -> GeneratorResult<GeoPoint> {
        let i = self.rng.sample(&self.densities);
        self.polygons[i].sample(&mut self.rng)
    }
}
