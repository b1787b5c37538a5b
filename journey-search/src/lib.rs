//! Journey search server.
//!
//! Station autocomplete with debounced matching, a search form that owns
//! the chosen stations, and a filtered, sorted journey results list.

pub mod autocomplete;
pub mod config;
pub mod domain;
pub mod form;
pub mod journeys;
pub mod stations;
pub mod web;
