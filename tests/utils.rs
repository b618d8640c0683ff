#[path = "utils/datetime.rs"]
mod datetime;

#[path = "utils/packed.rs"]
mod packed;
