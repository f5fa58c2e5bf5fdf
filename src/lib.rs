pub mod aggregate;
pub mod charts;
pub mod classify;
pub mod config;
pub mod context;
pub mod error;
pub mod event;
pub mod formation;
pub mod http_cache;
pub mod http_client;
pub mod matches;
pub mod open_data;
pub mod pitch;
pub mod position;
pub mod reference;
pub mod sequence;
pub mod session;
pub mod taxonomy;
pub mod worker;
