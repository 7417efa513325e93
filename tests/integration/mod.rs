mod ladder_lifecycle;
mod persistence;
mod queue_lifecycle;
