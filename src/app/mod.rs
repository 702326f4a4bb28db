pub mod form;
pub mod pipelines;
