extern crate nalgebra as na;

mod grid;
mod merge;
mod voxelator;
