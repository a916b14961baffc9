pub mod experiment;
pub mod image;
pub mod image_set;
pub mod subregion;
pub mod vocab;
