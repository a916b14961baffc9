pub mod anatomy;
pub mod experiment;
pub mod image;
pub mod image_set;
pub mod probe;
pub mod subregion;
pub mod trained_model;
