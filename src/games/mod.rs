//! Game implementations.

pub mod hoops;
