pub mod anatomy_repo;
pub mod experiment_repo;
pub mod image_repo;
pub mod image_set_repo;
pub mod probe_repo;
pub mod subregion_repo;
pub mod trained_model_repo;

pub use anatomy_repo::AnatomyRepo;
pub use experiment_repo::ExperimentRepo;
pub use image_repo::ImageRepo;
pub use image_set_repo::ImageSetRepo;
pub use probe_repo::ProbeRepo;
pub use subregion_repo::SubregionRepo;
pub use trained_model_repo::TrainedModelRepo;
