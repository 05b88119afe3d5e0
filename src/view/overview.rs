use super::Series;
use crate::raw::{RankedEntry, RawOverview};
use serde::Serialize;

pub const TOP_PROJECTS: usize = 10;
pub const TOP_SECTORS: usize = 3;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverviewKpi {
    pub totale_progetti: f64,
    pub valore_complessivo: f64,
}

/// View model of the "Visione d'insieme" dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OverviewView {
    pub kpi: OverviewKpi,
    pub stato_avanzamento: Series,
    pub ripartizione: Series,
    pub progetti_costosi: Series,
    pub settori: Series,
    pub grandi_progetti: Series,
}

/// Build the overview view model. `None` in, `None` out: an absent payload
/// is an empty state, not an error.
pub fn transform_overview(raw: Option<&RawOverview>) -> Option<OverviewView> {
    let raw = raw?;
    Some(OverviewView {
        kpi: OverviewKpi {
            totale_progetti: raw.number_of_projects,
            valore_complessivo: raw.total_financing,
        },
        stato_avanzamento: Series::fixed(
            &["Conclusi", "In Corso", "Non Avviati"],
            vec![
                raw.number_ended_projects,
                raw.number_projects_in_progress,
                raw.number_not_started_projects,
            ],
        ),
        ripartizione: Series::fixed(
            &["Mezzogiorno", "Centro-Nord"],
            vec![raw.midday_financing, raw.middle_north_financing],
        ),
        progetti_costosi: fixed_slots(TOP_PROJECTS, "Progetto", |n| raw.project(n)),
        settori: fixed_slots(TOP_SECTORS, "Settore", |n| raw.sector(n)),
        grandi_progetti: Series::fixed(&["Totale"], vec![raw.number_big_projects]),
    })
}

/// One entry per slot `1..=slots`; a missing or blank slot becomes
/// `"<entity> <n>"` with amount 0.
fn fixed_slots<'a, F>(slots: usize, entity: &str, lookup: F) -> Series
where
    F: Fn(usize) -> Option<&'a RankedEntry>,
{
    let mut series = Series::new();
    for n in 1..=slots {
        let entry = lookup(n);
        let label = entry
            .and_then(|e| e.label.clone())
            .unwrap_or_else(|| format!("{} {}", entity, n));
        let amount = entry.map(|e| e.amount).unwrap_or(0.0);
        series.push(label, amount);
    }
    series
}

#[cfg(test)]
mod test {
    use super::{transform_overview, TOP_PROJECTS, TOP_SECTORS};
    use crate::raw::RawOverview;
    use serde_json::json;

    fn raw(value: serde_json::Value) -> RawOverview {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn test_absent_payload_is_empty_state() {
        assert_eq!(transform_overview(None), None);
    }

    #[test]
    fn test_end_to_end_current_schema() {
        let raw = raw(json!({
            "number_of_projects": 1500,
            "total_financing": 2_500_000_000u64,
            "number_ended_projects": 700,
            "number_projects_in_progress": 500,
            "number_not_started_projects": 300,
            "midday_financing": 1_000_000_000u64,
            "middle_north_financing": 1_500_000_000u64,
            "number_big_projects": 4,
        }));
        let view = transform_overview(Some(&raw)).unwrap();
        assert_eq!(view.stato_avanzamento.data, vec![700.0, 500.0, 300.0]);
        assert_eq!(
            view.stato_avanzamento.labels,
            vec!["Conclusi", "In Corso", "Non Avviati"]
        );
        assert_eq!(view.kpi.totale_progetti, 1500.0);
        assert_eq!(view.kpi.valore_complessivo, 2_500_000_000.0);
        assert_eq!(view.ripartizione.data, vec![1e9, 1.5e9]);
        assert_eq!(view.grandi_progetti.data, vec![4.0]);

        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["statoAvanzamento"]["data"], json!([700.0, 500.0, 300.0]));
        assert_eq!(json["kpi"]["totale_progetti"], json!(1500.0));
    }

    #[test]
    fn test_missing_slots_get_placeholders() {
        let raw = raw(json!({
            "top_projects": {
                "project1": {"title": "Metro C", "total_financing": 150},
                "project3": {"title": "Ponte", "total_financing": 90},
            },
            "top_sectors": {},
        }));
        let view = transform_overview(Some(&raw)).unwrap();

        assert_eq!(view.progetti_costosi.labels.len(), TOP_PROJECTS);
        assert_eq!(view.progetti_costosi.labels[0], "Metro C");
        assert_eq!(view.progetti_costosi.labels[1], "Progetto 2");
        assert_eq!(view.progetti_costosi.data[1], 0.0);
        assert_eq!(view.progetti_costosi.labels[2], "Ponte");
        for n in 4..=TOP_PROJECTS {
            assert_eq!(view.progetti_costosi.labels[n - 1], format!("Progetto {}", n));
            assert_eq!(view.progetti_costosi.data[n - 1], 0.0);
        }

        assert_eq!(view.settori.labels.len(), TOP_SECTORS);
        assert_eq!(view.settori.labels, vec!["Settore 1", "Settore 2", "Settore 3"]);
        assert_eq!(view.settori.data, vec![0.0, 0.0, 0.0]);
    }

    #[test]
    fn test_legacy_schema_normalizes_to_same_view() {
        let legacy = raw(json!({
            "numProjects": 2,
            "totalFinancing": 500,
            "numberEndedProjects": 1,
            "numberProjectsInProgress": 1,
            "numberNotStartedProjects": 0,
            "TopProjects": {"Project1": ["Ponte", 300], "Project2": ["Scuola", 200]},
            "TopSectors": {"Sector1": ["Trasporti", 500]},
        }));
        let current = raw(json!({
            "number_of_projects": 2,
            "total_financing": 500,
            "number_ended_projects": 1,
            "number_projects_in_progress": 1,
            "number_not_started_projects": 0,
            "top_projects": {
                "project1": {"title": "Ponte", "total_financing": 300},
                "project2": {"title": "Scuola", "total_financing": 200},
            },
            "top_sectors": {"sector1": {"name": "Trasporti", "total_financing": 500}},
        }));
        assert_eq!(
            transform_overview(Some(&legacy)),
            transform_overview(Some(&current))
        );
    }
}
