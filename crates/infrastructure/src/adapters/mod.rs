//! Adapters implementing application ports

mod station_adapter;

pub use station_adapter::StationAdapter;
