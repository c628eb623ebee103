pub(crate) mod ease;
pub(crate) mod ramp;
pub(crate) mod sequence;
