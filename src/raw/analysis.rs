use super::de;
use serde::Deserialize;

/// Payload of `GET /api/analysis/`.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RawAnalysis {
    /// Funding source code → amount, in document order.
    #[serde(deserialize_with = "de::amounts")]
    pub funding_sources_analysis: Vec<(String, f64)>,
    /// Specific fund → amount, in document order.
    #[serde(deserialize_with = "de::amounts")]
    pub specific_funds_contribution: Vec<(String, f64)>,
    #[serde(deserialize_with = "de::list")]
    pub top10_thematic_objectives: Vec<RankedItem>,
    #[serde(deserialize_with = "de::list")]
    pub top10_project_typologies: Vec<RankedItem>,
    #[serde(deserialize_with = "de::list")]
    pub top5_infrastructural_subsectors: Vec<RankedItem>,
    #[serde(deserialize_with = "de::lenient")]
    pub funds_to_be_found: FundsToBeFound,
    #[serde(deserialize_with = "de::lenient")]
    pub payments_realization_gap: PaymentsRealizationGap,
}

/// Entry of a ranked list. Each list fills exactly one of the text fields.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct RankedItem {
    #[serde(deserialize_with = "de::text")]
    pub description: Option<String>,
    #[serde(alias = "type", deserialize_with = "de::text")]
    pub nature: Option<String>,
    #[serde(deserialize_with = "de::text")]
    pub subsector: Option<String>,
    #[serde(deserialize_with = "de::number")]
    pub amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct FundsToBeFound {
    #[serde(deserialize_with = "de::number")]
    pub number_of_projects_with_gap: f64,
    #[serde(deserialize_with = "de::number")]
    pub total_missing_amount: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default)]
pub struct PaymentsRealizationGap {
    #[serde(deserialize_with = "de::number")]
    pub total_realized_cost: f64,
    #[serde(deserialize_with = "de::number")]
    pub total_payments_made: f64,
    #[serde(deserialize_with = "de::number")]
    pub overall_difference: f64,
}

const DEMO_FUNDING_SOURCES: [&str; 7] = [
    "UE",
    "Stato",
    "Regioni",
    "Privato",
    "Comune",
    "Altro_Pubblico",
    "Provincia",
];

const DEMO_SPECIFIC_FUNDS: [&str; 10] = [
    "FESR (UE)",
    "FSE (UE)",
    "FSC (Stato)",
    "Fondo_di_Rotazione (Stato)",
    "FEASR (UE)",
    "FEAMP (UE)",
    "IOG (UE)",
    "PAC (Stato)",
    "Completamenti (Stato)",
    "Altri_Stato",
];

const DEMO_OBJECTIVES: [&str; 10] = [
    "Un'Europa piu sociale e inclusiva",
    "Un'Europa piu verde",
    "Un'Europa piu intelligente",
    "Un'Europa piu connessa",
    "Un'Europa piu vicina ai cittadini",
    "Rafforzare la capacita istituzionale",
    "OT non specificato",
    "Ricerca e Innovazione",
    "Transizione digitale",
    "Occupazione giovanile",
];

const DEMO_TYPOLOGIES: [&str; 10] = [
    "ACQUISTO O REALIZZAZIONE DI SERVIZI",
    "LAVORI PUBBLICI",
    "CONCESSIONE DI INCENTIVI AD UNITA' PRODUTTIVE",
    "ACQUISTO O REALIZZAZIONE DI BENI E ATTREZZATURE",
    "CONCESSIONE DI INCENTIVI A ISTITUZIONI",
    "ALTRO (NON RICONDUCIBILE)",
    "STUDI E PROGETTAZIONI",
    "ATTIVITA' PROMOZIONALI E DI SENSIBILIZZAZIONE",
    "CONTRIBUTI ECONOMICI AD ENTI PUBBLICI",
    "PROGRAMMI DI FORMAZIONE",
];

const DEMO_SUBSECTORS: [&str; 5] = [
    "OPERE STRADALI",
    "INFRASTRUTTURE FERROVIARIE E METROPOLITANE",
    "INFRASTRUTTURE IDRICHE E GESTIONE ACQUE",
    "RIFIUTI E BONIFICHE",
    "EDILIZIA SANITARIA",
];

impl RawAnalysis {
    /// Offline/demo dataset shown when the analysis endpoint is unreachable.
    /// Every category is present with an amount of 1.
    pub fn demo() -> RawAnalysis {
        let ones = |keys: &[&str]| -> Vec<(String, f64)> {
            keys.iter().map(|k| (k.to_string(), 1.0)).collect()
        };
        RawAnalysis {
            funding_sources_analysis: ones(&DEMO_FUNDING_SOURCES),
            specific_funds_contribution: ones(&DEMO_SPECIFIC_FUNDS),
            top10_thematic_objectives: DEMO_OBJECTIVES
                .iter()
                .map(|d| RankedItem {
                    description: Some(d.to_string()),
                    amount: 1.0,
                    ..Default::default()
                })
                .collect(),
            top10_project_typologies: DEMO_TYPOLOGIES
                .iter()
                .map(|n| RankedItem {
                    nature: Some(n.to_string()),
                    amount: 1.0,
                    ..Default::default()
                })
                .collect(),
            top5_infrastructural_subsectors: DEMO_SUBSECTORS
                .iter()
                .map(|s| RankedItem {
                    subsector: Some(s.to_string()),
                    amount: 1.0,
                    ..Default::default()
                })
                .collect(),
            funds_to_be_found: FundsToBeFound {
                number_of_projects_with_gap: 1.0,
                total_missing_amount: 1.0,
            },
            payments_realization_gap: PaymentsRealizationGap {
                total_realized_cost: 1.0,
                total_payments_made: 1.0,
                overall_difference: 1.0,
            },
        }
    }
}
