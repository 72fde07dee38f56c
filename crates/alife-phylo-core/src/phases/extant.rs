//! Phase 2: which taxa are still alive.

use log::warn;

use crate::config::{AnalysisConfig, AnalysisResult, ExtantOutput, QueryTime};
use crate::graph::phylogeny::Phylogeny;
use crate::query::extant::{get_extant_taxa_ids_at_time, get_extant_taxa_ids_by_destruction_time};

/// Run the extant phase: the destruction-marker set, plus the windowed set when
/// the config asks for a query time.
pub fn run_extant_phase(config: &AnalysisConfig, phylogeny: &Phylogeny, result: &mut AnalysisResult) {
    let by_destruction = match get_extant_taxa_ids_by_destruction_time(phylogeny, &config.extant) {
        Ok(ids) => Some(ids),
        Err(e) => {
            warn!("extant phase: skipping destruction-marker query: {e}");
            None
        }
    };

    let at_time = config.query_time.and_then(|t| {
        match get_extant_taxa_ids_at_time(phylogeny, QueryTime::At(t), &config.extant) {
            Ok(ids) => Some(ids),
            Err(e) => {
                warn!("extant phase: skipping query at time {t}: {e}");
                None
            }
        }
    });

    result.extant = ExtantOutput {
        by_destruction,
        query_time: config.query_time,
        at_time,
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::TaxonId;
    use crate::loader::phylogeny_from_csv_str;

    const TIMED: &str = "id,ancestor_list,origin_time,destruction_time\n\
        0,['none'],0,10\n1,[0],5,none\n2,[0],8,12\n";

    #[test]
    fn present_only_by_default() {
        let p = phylogeny_from_csv_str(TIMED).unwrap();
        let mut result = AnalysisResult::default();
        run_extant_phase(&AnalysisConfig::default(), &p, &mut result);
        assert_eq!(result.extant.by_destruction, Some(vec![TaxonId::Int(1)]));
        assert_eq!(result.extant.at_time, None);
    }

    #[test]
    fn windowed_when_time_given() {
        let p = phylogeny_from_csv_str(TIMED).unwrap();
        let config = AnalysisConfig {
            query_time: Some(9.0),
            ..Default::default()
        };
        let mut result = AnalysisResult::default();
        run_extant_phase(&config, &p, &mut result);
        assert_eq!(
            result.extant.at_time,
            Some(vec![TaxonId::Int(0), TaxonId::Int(1), TaxonId::Int(2)])
        );
        assert_eq!(result.extant.query_time, Some(9.0));
    }

    #[test]
    fn missing_marker_leaves_section_empty() {
        let p = phylogeny_from_csv_str("id,ancestor_list\n0,['none']\n").unwrap();
        let mut result = AnalysisResult::default();
        run_extant_phase(&AnalysisConfig::default(), &p, &mut result);
        assert_eq!(result.extant.by_destruction, None);
    }
}
