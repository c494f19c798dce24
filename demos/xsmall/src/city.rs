//! Synthetic service area inspired by the geography of Mobile, Alabama.
//!
//! Three ambulance bases, six demand points, and a base-to-demand
//! travel-time matrix, embedded as CSV in the same formats the file loaders
//! read.

use std::io::Cursor;

use ems_core::GeoPoint;
use ems_spatial::{SpatialResult, TravelTimes, load_locations_reader, load_matrix_reader};

const BASES_CSV: &str = "\
name,latitude,longitude\n\
north,30.710,-88.070\n\
downtown,30.695,-88.050\n\
south,30.670,-88.030\n\
";

const DEMANDS_CSV: &str = "\
name,latitude,longitude\n\
spring_hill,30.715,-88.075\n\
midtown,30.700,-88.060\n\
downtown,30.695,-88.045\n\
crichton,30.685,-88.055\n\
dog_river,30.675,-88.035\n\
theodore,30.665,-88.025\n\
";

// Seconds; one row per base, one column per demand point.
const MATRIX_CSV: &str = "\
150,420,610,700,980,1150\n\
560,260,120,300,540,720\n\
1100,760,520,430,170,160\n\
";

pub const DOWNTOWN: GeoPoint = GeoPoint { lat: 30.695, lon: -88.050 };
pub const STADIUM:  GeoPoint = GeoPoint { lat: 30.692, lon: -88.041 };

pub fn travel_times() -> SpatialResult<TravelTimes> {
    TravelTimes::new(
        load_locations_reader(Cursor::new(BASES_CSV))?,
        load_locations_reader(Cursor::new(DEMANDS_CSV))?,
        load_matrix_reader(Cursor::new(MATRIX_CSV))?,
    )
}

pub fn hospitals() -> Vec<GeoPoint> {
    vec![GeoPoint::new(30.690, -88.048), GeoPoint::new(30.705, -88.065)]
}
