//! Scene timelines: the validated model, its JSON document form and a builder DSL.

pub(crate) mod doc;
pub(crate) mod dsl;
pub(crate) mod model;
