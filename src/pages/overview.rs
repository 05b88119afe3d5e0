use super::{bar_chart, pie_chart, Board, Caption};
use crate::charts::{Chart, Color};
use crate::filters::{Control, FilterPair, MACROAREAS, REGIONS};
use crate::format::{format_number, format_percentage, CurrencyPolicy};
use crate::raw::RawOverview;
use crate::view::{share, transform_overview, OverviewView, Series};

pub const STATO: &str = "pieChartStato";
pub const RIPARTIZIONE: &str = "barChartRipartizione";
pub const PROGETTI_COSTOSI: &str = "horizontalBarProgettiCostosi";
pub const SETTORI: &str = "horizontalBarSettori";

/// "Visione d'insieme": project counts, territorial split and the most
/// financed projects and sectors.
pub struct Overview;

impl Board for Overview {
    type Raw = RawOverview;
    type View = OverviewView;

    const NAME: &'static str = "overview";
    const TITLE: &'static str = "Visione d'insieme";
    const DESCRIPTION: &'static str =
        "Stato di avanzamento, ripartizione territoriale, progetti e settori principali";
    const ROUTE: &'static str = "/api/overview/";
    const POLICY: CurrencyPolicy = CurrencyPolicy::Fixed;
    const KPI_CARDS: &'static [(&'static str, &'static str)] = &[
        ("totale-progetti", "Totale progetti"),
        ("valore-complessivo", "Valore complessivo"),
        ("territorio-label", "Territorio"),
        ("territorio-count", "Grandi progetti"),
    ];
    const MOUNTS: &'static [&'static str] = &[STATO, RIPARTIZIONE, PROGETTI_COSTOSI, SETTORI];

    fn filters() -> FilterPair {
        FilterPair::new(
            Control::new("regionFilter", "region", "Regione", REGIONS),
            Control::new("macroareaFilter", "macroarea", "Macroarea", MACROAREAS),
        )
    }

    fn fallback() -> Option<RawOverview> {
        None
    }

    fn transform(raw: &RawOverview) -> Option<OverviewView> {
        transform_overview(Some(raw))
    }

    fn kpis(view: &OverviewView) -> Vec<(&'static str, String)> {
        let grandi = &view.grandi_progetti;
        vec![
            ("totale-progetti", format_number(view.kpi.totale_progetti)),
            (
                "valore-complessivo",
                Self::POLICY.format_currency(view.kpi.valore_complessivo),
            ),
            (
                "territorio-label",
                grandi.labels.first().cloned().unwrap_or_default(),
            ),
            (
                "territorio-count",
                format!("{} Progetto", format_number(grandi.total())),
            ),
        ]
    }

    fn charts(view: &OverviewView) -> Vec<Chart> {
        vec![
            stato_avanzamento(&view.stato_avanzamento),
            ripartizione(&view.ripartizione),
            progetti_costosi(&view.progetti_costosi),
            settori(&view.settori),
        ]
    }
}

/// Pie of project counts by status, tooltip `<label>: <count> (<pct>%)`.
pub fn stato_avanzamento(series: &Series) -> Chart {
    let total = series.total();
    let tooltips = series
        .labels
        .iter()
        .zip(series.data.iter())
        .map(|(label, value)| {
            format!(
                "{}: {} ({}%)",
                label,
                format_number(*value),
                format_percentage(share(*value, total))
            )
        })
        .collect();
    pie_chart(
        STATO,
        "Stato di avanzamento dei progetti",
        &series.labels,
        &series.data,
        tooltips,
    )
}

pub fn ripartizione(series: &Series) -> Chart {
    bar_chart(
        RIPARTIZIONE,
        "Ripartizione territoriale dei finanziamenti",
        Caption {
            tooltip: Some("Finanziamento"),
            legend: "Finanziamenti (€)",
        },
        series.labels.clone(),
        &series.data,
        vec![Color::Indigo, Color::Periwinkle],
        Overview::POLICY,
        false,
    )
}

pub fn progetti_costosi(series: &Series) -> Chart {
    bar_chart(
        PROGETTI_COSTOSI,
        "Progetti più costosi",
        Caption {
            tooltip: Some("Costo"),
            legend: "Costo (€)",
        },
        series.labels.clone(),
        &series.data,
        vec![Color::Indigo],
        Overview::POLICY,
        true,
    )
}

pub fn settori(series: &Series) -> Chart {
    bar_chart(
        SETTORI,
        "Settori con più fondi",
        Caption {
            tooltip: Some("Fondi"),
            legend: "Fondi Totali (€)",
        },
        series.labels.clone(),
        &series.data,
        vec![Color::Slate],
        Overview::POLICY,
        true,
    )
}

#[cfg(test)]
mod test {
    use super::{progetti_costosi, ripartizione, settori, stato_avanzamento, Overview, STATO};
    use crate::pages::Board;
    use crate::raw::RawOverview;
    use crate::view::Series;
    use serde_json::json;

    #[test]
    fn test_stato_tooltips() {
        let series = Series::fixed(
            &["Conclusi", "In Corso", "Non Avviati"],
            vec![700.0, 500.0, 300.0],
        );
        let chart = stato_avanzamento(&series);
        assert_eq!(chart.id(), STATO);
        assert_eq!(
            chart.datasets()[0].tooltip_labels,
            vec![
                "Conclusi: 700 (46.7%)",
                "In Corso: 500 (33.3%)",
                "Non Avviati: 300 (20.0%)"
            ]
        );

        let empty = Series::fixed(&["Conclusi"], vec![0.0]);
        assert_eq!(
            stato_avanzamento(&empty).datasets()[0].tooltip_labels,
            vec!["Conclusi: 0 (0.0%)"]
        );
    }

    #[test]
    fn test_fixed_currency_tooltips() {
        let series = Series::fixed(&["Metro C"], vec![1500.0]);
        let chart = progetti_costosi(&series);
        assert_eq!(chart.datasets()[0].label, "Costo (€)");
        assert_eq!(
            chart.datasets()[0].tooltip_labels,
            vec!["Costo: 1.500\u{a0}€"]
        );
    }

    #[test]
    fn test_captions_per_chart() {
        let series = Series::fixed(&["Mezzogiorno"], vec![2_000.0]);
        let chart = ripartizione(&series);
        assert_eq!(chart.datasets()[0].label, "Finanziamenti (€)");
        assert_eq!(
            chart.datasets()[0].tooltip_labels,
            vec!["Finanziamento: 2.000\u{a0}€"]
        );
        let chart = settori(&series);
        assert_eq!(chart.datasets()[0].label, "Fondi Totali (€)");
        assert_eq!(
            chart.datasets()[0].tooltip_labels,
            vec!["Fondi: 2.000\u{a0}€"]
        );
    }

    #[test]
    fn test_kpis_and_charts() {
        let raw: RawOverview = serde_json::from_value(json!({
            "numProjects": 1500,
            "totalFinancing": 2_500_000_000u64,
            "numberBigProjects": 4,
        }))
        .unwrap();
        let view = Overview::transform(&raw).unwrap();
        assert_eq!(
            Overview::kpis(&view),
            vec![
                ("totale-progetti", "1.500".to_string()),
                ("valore-complessivo", "2.500.000.000\u{a0}€".to_string()),
                ("territorio-label", "Totale".to_string()),
                ("territorio-count", "4 Progetto".to_string()),
            ]
        );

        let charts = Overview::charts(&view);
        let mounts: Vec<_> = charts.iter().map(|c| c.id()).collect();
        assert_eq!(mounts, Overview::MOUNTS);
        assert!(charts.iter().all(|c| c.misaligned().is_none()));
        // ten fixed slots even without any ranked project
        assert_eq!(charts[2].labels().len(), 10);
    }

    #[test]
    fn test_filters_and_fallback() {
        assert!(Overview::fallback().is_none());
        let filters = Overview::filters();
        let [first, second] = filters.controls();
        assert_eq!((first.id, first.param), ("regionFilter", "region"));
        assert_eq!((second.id, second.param), ("macroareaFilter", "macroarea"));
    }
}
