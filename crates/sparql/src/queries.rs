//! SPARQL query templates.
//!
//! Per-experiment templates carry the placeholder token
//! `EXPERIMENT_PLACEHOLDER`, substituted with the external experiment
//! identifier before submission. The templates themselves are opaque
//! payloads as far as the rest of the system is concerned.

/// Placeholder token replaced with the experiment identifier.
pub const EXPERIMENT_PLACEHOLDER: &str = "EXPERIMENT_PLACEHOLDER";

/// All experiments that have at least one image attached.
pub const ALL_EXPERIMENTS_WITH_IMAGE: &str = "\
PREFIX rdf: <http://www.w3.org/1999/02/22-rdf-syntax-ns#>
PREFIX lm: <http://data.lungmap.net/lungmap.owl#>
SELECT DISTINCT ?experiment
WHERE {
    ?experiment rdf:type lm:Experiment .
    ?image lm:part_of_experiment ?experiment .
}";

/// Platform, release date, and experiment type for one experiment.
/// Expected to bind exactly one row.
pub const GET_EXPERIMENT_TYPE_BY_EXPERIMENT: &str = "\
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX lm: <http://data.lungmap.net/lungmap.owl#>
SELECT ?platform ?release_date ?experiment_type_label
WHERE {
    lm:EXPERIMENT_PLACEHOLDER lm:platform ?platform ;
        lm:release_date ?release_date ;
        lm:has_experiment_type ?experiment_type .
    ?experiment_type rdfs:label ?experiment_type_label .
}";

/// Sample (donor) attributes for one experiment.
/// Expected to bind one row; duplicates fall under the configured
/// multiple-results policy.
pub const GET_SAMPLE_BY_EXPERIMENT: &str = "\
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX lm: <http://data.lungmap.net/lungmap.owl#>
SELECT ?age_label ?sex ?organism_label ?local_id
WHERE {
    lm:EXPERIMENT_PLACEHOLDER lm:has_sample ?sample .
    ?sample lm:sex ?sex ;
        lm:local_id ?local_id ;
        lm:has_age ?age ;
        lm:has_organism ?organism .
    ?age rdfs:label ?age_label .
    ?organism rdfs:label ?organism_label .
}";

/// All image files attached to one experiment.
pub const GET_IMAGES_BY_EXPERIMENT: &str = "\
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX lm: <http://data.lungmap.net/lungmap.owl#>
SELECT ?experiment ?image ?img_file ?magnification ?x_scaling ?y_scaling
WHERE {
    BIND (lm:EXPERIMENT_PLACEHOLDER AS ?experiment)
    ?image lm:part_of_experiment ?experiment ;
        lm:file_name ?img_file ;
        lm:magnification ?magnification ;
        lm:x_scaling ?x_scaling ;
        lm:y_scaling ?y_scaling .
}";

/// Probes used by one experiment, with their stain colors.
pub const GET_PROBES_BY_EXPERIMENT: &str = "\
PREFIX rdfs: <http://www.w3.org/2000/01/rdf-schema#>
PREFIX lm: <http://data.lungmap.net/lungmap.owl#>
SELECT ?probe_label ?color
WHERE {
    lm:EXPERIMENT_PLACEHOLDER lm:uses_probe ?probe_use .
    ?probe_use lm:color ?color ;
        lm:has_probe ?probe .
    ?probe rdfs:label ?probe_label .
}";

/// Substitute the experiment identifier into a query template.
pub fn for_experiment(template: &str, experiment_id: &str) -> String {
    template.replace(EXPERIMENT_PLACEHOLDER, experiment_id)
}
