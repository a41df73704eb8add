mod coordinate;
mod gps;
mod operation;

pub use coordinate::{Coordinate, Hemisphere};
pub use gps::{DmsTriple, GpsBlock, Rational};
pub use operation::{OperationResult, OperationStatus, OperationSummary, ProgressEvent};
