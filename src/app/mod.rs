// Application layer: pipelines wiring the dimension parser to storage.

pub mod pipelines;
