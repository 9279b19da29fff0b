// Domain layer - Plain data carried through the pipeline
pub mod dataset;
pub mod fingerprint;
pub mod model;
pub mod nan_as_null;
pub mod prediction;
pub mod sample;
pub mod trace;
