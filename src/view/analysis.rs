use super::{Series, ShareSeries};
use crate::raw::{RankedItem, RawAnalysis};
use serde::Serialize;

/// Caption of a ranked entry that lacks its text field.
const UNSPECIFIED: &str = "Non specificato";

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisKpi {
    pub numero_progetti_con_gap: f64,
    pub importo_totale_mancante: f64,
}

/// View model of the "Analisi finanziaria" dashboard.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisView {
    pub kpi: AnalysisKpi,
    pub fonti_finanziamento: ShareSeries,
    pub fondi_specifici: Series,
    pub obiettivi_tematici: Series,
    pub tipologie_progetto: Series,
    pub sottosettori_infrastrutturali: Series,
    pub costo_vs_pagamenti: Series,
}

/// Display name of a funding source code; unknown codes pass through.
pub fn source_label(code: &str) -> &str {
    match code {
        "UE" => "Unione Europea",
        "Altro_Pubblico" => "Altro Pubblico",
        other => other,
    }
}

/// Build the financial analysis view model. `None` in, `None` out.
pub fn transform_analysis(raw: Option<&RawAnalysis>) -> Option<AnalysisView> {
    let raw = raw?;

    let (codes, amounts): (Vec<&str>, Vec<f64>) = raw
        .funding_sources_analysis
        .iter()
        .map(|(code, amount)| (code.as_str(), *amount))
        .unzip();
    let labels = codes.into_iter().map(|c| source_label(c).to_string()).collect();

    let mut fondi_specifici = Series::new();
    for (fund, amount) in raw.specific_funds_contribution.iter() {
        fondi_specifici.push(fund.clone(), *amount);
    }

    let gap = &raw.payments_realization_gap;
    Some(AnalysisView {
        kpi: AnalysisKpi {
            numero_progetti_con_gap: raw.funds_to_be_found.number_of_projects_with_gap,
            importo_totale_mancante: raw.funds_to_be_found.total_missing_amount,
        },
        fonti_finanziamento: ShareSeries::from_amounts(labels, amounts),
        fondi_specifici,
        obiettivi_tematici: ranked(&raw.top10_thematic_objectives, |i| &i.description),
        tipologie_progetto: ranked(&raw.top10_project_typologies, |i| &i.nature),
        sottosettori_infrastrutturali: ranked(&raw.top5_infrastructural_subsectors, |i| {
            &i.subsector
        }),
        costo_vs_pagamenti: Series::fixed(
            &["Costo Realizzato", "Pagamenti Effettuati", "Differenza"],
            vec![
                gap.total_realized_cost,
                gap.total_payments_made,
                gap.overall_difference,
            ],
        ),
    })
}

/// Ranked list in upstream order; the list is already sorted by the API.
fn ranked<F>(items: &[RankedItem], text: F) -> Series
where
    F: Fn(&RankedItem) -> &Option<String>,
{
    let mut series = Series::new();
    for item in items {
        let label = text(item).as_deref().unwrap_or(UNSPECIFIED);
        series.push(label, item.amount);
    }
    series
}
