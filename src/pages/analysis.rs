use super::{bar_chart, pie_chart, Board, Caption};
use crate::charts::{Chart, Color};
use crate::filters::{Control, FilterPair, FUNDING_SOURCES, MACROAREAS};
use crate::format::{format_number, format_percentage, CurrencyPolicy};
use crate::raw::RawAnalysis;
use crate::view::{transform_analysis, AnalysisView, Series, ShareSeries};

pub const FONTI: &str = "pieChartFonti";
pub const FONDI: &str = "barChartFondi";
pub const OBIETTIVI: &str = "horizontalBarObiettivi";
pub const TIPOLOGIE: &str = "barChartTipologie";
pub const SOTTOSETTORI: &str = "horizontalBarSottosettori";
pub const COSTO_PAGAMENTI: &str = "barChartCostoPagamenti";

const AMOUNT: Caption = Caption {
    tooltip: Some("Importo"),
    legend: "Importo (€)",
};

/// Longest typology caption shown on the axis.
const MAX_LABEL_CHARS: usize = 30;

/// "Analisi finanziaria": funding sources and funds, ranked objectives,
/// typologies and subsectors, realized cost against payments.
pub struct Analysis;

impl Board for Analysis {
    type Raw = RawAnalysis;
    type View = AnalysisView;

    const NAME: &'static str = "analysis";
    const TITLE: &'static str = "Analisi finanziaria";
    const DESCRIPTION: &'static str =
        "Fonti di finanziamento, fondi specifici, obiettivi tematici e pagamenti";
    const ROUTE: &'static str = "/api/analysis/";
    const POLICY: CurrencyPolicy = CurrencyPolicy::ScaledSuffix;
    const KPI_CARDS: &'static [(&'static str, &'static str)] = &[
        ("numero-progetti-gap", "Progetti con fondi da reperire"),
        ("importo-totale-mancante", "Importo totale mancante"),
    ];
    const MOUNTS: &'static [&'static str] = &[
        FONTI,
        FONDI,
        OBIETTIVI,
        TIPOLOGIE,
        SOTTOSETTORI,
        COSTO_PAGAMENTI,
    ];

    fn filters() -> FilterPair {
        FilterPair::new(
            Control::new("macroAreaFilter", "macro_area", "Macroarea", MACROAREAS),
            Control::new(
                "fundingSourceFilter",
                "funding_source",
                "Fonte di finanziamento",
                FUNDING_SOURCES,
            ),
        )
    }

    fn fallback() -> Option<RawAnalysis> {
        Some(RawAnalysis::demo())
    }

    fn transform(raw: &RawAnalysis) -> Option<AnalysisView> {
        transform_analysis(Some(raw))
    }

    fn kpis(view: &AnalysisView) -> Vec<(&'static str, String)> {
        vec![
            (
                "numero-progetti-gap",
                format_number(view.kpi.numero_progetti_con_gap),
            ),
            (
                "importo-totale-mancante",
                Self::POLICY.format_currency(view.kpi.importo_totale_mancante),
            ),
        ]
    }

    fn charts(view: &AnalysisView) -> Vec<Chart> {
        vec![
            fonti_finanziamento(&view.fonti_finanziamento),
            fondi_specifici(&view.fondi_specifici),
            obiettivi_tematici(&view.obiettivi_tematici),
            tipologie_progetto(&view.tipologie_progetto),
            sottosettori_infrastrutturali(&view.sottosettori_infrastrutturali),
            costo_vs_pagamenti(&view.costo_vs_pagamenti),
        ]
    }
}

/// Pie of percentage shares, tooltip `<label>: <pct>% (<amount>)`.
pub fn fonti_finanziamento(series: &ShareSeries) -> Chart {
    let tooltips = series
        .labels
        .iter()
        .zip(series.data.iter().zip(series.amounts.iter()))
        .map(|(label, (pct, amount))| {
            format!(
                "{}: {}% ({})",
                label,
                format_percentage(*pct),
                Analysis::POLICY.format_currency(*amount)
            )
        })
        .collect();
    pie_chart(
        FONTI,
        "Fonti di finanziamento",
        &series.labels,
        &series.data,
        tooltips,
    )
}

pub fn fondi_specifici(series: &Series) -> Chart {
    bar_chart(
        FONDI,
        "Contributo dei fondi specifici",
        AMOUNT,
        series.labels.clone(),
        &series.data,
        vec![Color::Indigo],
        Analysis::POLICY,
        true,
    )
}

pub fn obiettivi_tematici(series: &Series) -> Chart {
    bar_chart(
        OBIETTIVI,
        "Obiettivi tematici",
        Caption {
            tooltip: Some("Finanziamento"),
            legend: "Finanziamento (€)",
        },
        series.labels.clone(),
        &series.data,
        vec![Color::Slate],
        Analysis::POLICY,
        true,
    )
}

/// Long captions are cut on the axis; the tooltip title carries the whole
/// caption of the cut ones.
pub fn tipologie_progetto(series: &Series) -> Chart {
    let short = series.labels.iter().map(|l| shorten(l)).collect();
    let full = series
        .labels
        .iter()
        .map(|l| {
            if l.chars().count() > MAX_LABEL_CHARS {
                l.clone()
            } else {
                String::new()
            }
        })
        .collect();
    let mut chart = bar_chart(
        TIPOLOGIE,
        "Tipologie di progetto",
        AMOUNT,
        short,
        &series.data,
        vec![Color::Indigo],
        Analysis::POLICY,
        false,
    );
    chart.set_full_labels(full);
    chart
}

pub fn sottosettori_infrastrutturali(series: &Series) -> Chart {
    bar_chart(
        SOTTOSETTORI,
        "Sottosettori infrastrutturali",
        AMOUNT,
        series.labels.clone(),
        &series.data,
        vec![Color::Periwinkle],
        Analysis::POLICY,
        true,
    )
}

pub fn costo_vs_pagamenti(series: &Series) -> Chart {
    bar_chart(
        COSTO_PAGAMENTI,
        "Costo realizzato e pagamenti",
        Caption {
            tooltip: None,
            legend: "Importo (€)",
        },
        series.labels.clone(),
        &series.data,
        vec![Color::Indigo, Color::Slate, Color::Periwinkle],
        Analysis::POLICY,
        false,
    )
}

fn shorten(label: &str) -> String {
    if label.chars().count() > MAX_LABEL_CHARS {
        let head: String = label.chars().take(MAX_LABEL_CHARS).collect();
        format!("{}...", head)
    } else {
        label.to_string()
    }
}
