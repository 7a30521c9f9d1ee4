//! Cityforge - procedural city layout generation
//!
//! A city is generated on an N×N grid in two passes. A recursive walker
//! carves a branching road network, then a row-major sweep places buildings
//! next to the roads, scatters trees on open ground, and emits a road or
//! crossing tile for every road cell. Everything placed goes through a
//! [`scene::SceneSink`] as a catalog variant plus a placement frame.

pub mod buildings;
pub mod catalog;
pub mod city;
pub mod core;
pub mod roads;
pub mod scene;
pub mod spatial;
