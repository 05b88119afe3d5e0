//! Mutually exclusive filter controls.
//!
//! Each dashboard exposes two filter dimensions. At most one of them may hold
//! a value other than `NO_FILTER`: choosing a value on one control resets the
//! sibling to `NO_FILTER` and disables it, going back to `NO_FILTER`
//! re-enables the sibling.
use log::debug;
use thiserror::Error;

/// Sentinel meaning "no constraint"; never sent as a query parameter.
pub const NO_FILTER: &str = "nessun filtro";

/// (value, caption) of a select option.
pub type FilterOption = (&'static str, &'static str);

/// Region codes as stored by the backend.
pub const REGIONS: &[FilterOption] = &[
    ("001", "Piemonte"),
    ("002", "Valle d'Aosta"),
    ("003", "Lombardia"),
    ("004", "Trentino-Alto Adige"),
    ("005", "Veneto"),
    ("006", "Friuli-Venezia Giulia"),
    ("007", "Liguria"),
    ("008", "Emilia-Romagna"),
    ("009", "Toscana"),
    ("010", "Umbria"),
    ("011", "Marche"),
    ("012", "Lazio"),
    ("013", "Abruzzo"),
    ("014", "Molise"),
    ("015", "Campania"),
    ("016", "Puglia"),
    ("017", "Basilicata"),
    ("018", "Calabria"),
    ("019", "Sicilia"),
    ("020", "Sardegna"),
];

pub const MACROAREAS: &[FilterOption] = &[
    ("ALTRO", "Altro"),
    ("AMBITO NAZIONALE", "Ambito nazionale"),
    ("CENTRO-NORD", "Centro-Nord"),
    ("ESTERO", "Estero"),
    ("MEZZOGIORNO", "Mezzogiorno"),
    ("TRASVERSALE", "Trasversale"),
];

pub const FUNDING_SOURCES: &[FilterOption] = &[
    ("UE", "Unione Europea"),
    ("Stato", "Stato"),
    ("Regioni", "Regioni"),
    ("Privato", "Privato"),
    ("Comune", "Comune"),
    ("Altro_Pubblico", "Altro Pubblico"),
    ("Provincia", "Provincia"),
];

#[derive(Debug, Error, PartialEq, Eq)]
pub enum FilterError {
    #[error("filter `{0}` is disabled while the other filter is active")]
    Disabled(&'static str),
    #[error("`{value}` is not an option of filter `{control}`")]
    UnknownOption {
        control: &'static str,
        value: String,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Slot {
    First,
    Second,
}

impl Slot {
    fn other(self) -> Slot {
        match self {
            Slot::First => Slot::Second,
            Slot::Second => Slot::First,
        }
    }
}

/// Which dimension currently constrains the query. Both active at once is
/// not representable.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterState {
    BothDefault,
    FirstActive,
    SecondActive,
}

/// A select control bound to one query parameter.
#[derive(Debug, Clone)]
pub struct Control {
    pub id: &'static str,
    pub param: &'static str,
    pub label: &'static str,
    pub options: &'static [FilterOption],
    value: String,
    enabled: bool,
}

impl Control {
    pub fn new(
        id: &'static str,
        param: &'static str,
        label: &'static str,
        options: &'static [FilterOption],
    ) -> Control {
        Control {
            id,
            param,
            label,
            options,
            value: NO_FILTER.to_string(),
            enabled: true,
        }
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    pub fn is_default(&self) -> bool {
        self.value == NO_FILTER
    }

    fn accepts(&self, value: &str) -> bool {
        value == NO_FILTER || self.options.iter().any(|(v, _)| *v == value)
    }
}

#[derive(Debug, Clone)]
pub struct FilterPair {
    first: Control,
    second: Control,
}

impl FilterPair {
    pub fn new(first: Control, second: Control) -> FilterPair {
        FilterPair { first, second }
    }

    pub fn state(&self) -> FilterState {
        match (self.first.is_default(), self.second.is_default()) {
            (false, _) => FilterState::FirstActive,
            (true, false) => FilterState::SecondActive,
            (true, true) => FilterState::BothDefault,
        }
    }

    pub fn control(&self, slot: Slot) -> &Control {
        match slot {
            Slot::First => &self.first,
            Slot::Second => &self.second,
        }
    }

    fn control_mut(&mut self, slot: Slot) -> &mut Control {
        match slot {
            Slot::First => &mut self.first,
            Slot::Second => &mut self.second,
        }
    }

    pub fn controls(&self) -> [&Control; 2] {
        [&self.first, &self.second]
    }

    /// Apply a change event on `slot`. A disabled control cannot change.
    pub fn change(&mut self, slot: Slot, value: &str) -> Result<FilterState, FilterError> {
        let control = self.control(slot);
        if !control.enabled {
            return Err(FilterError::Disabled(control.id));
        }
        if !control.accepts(value) {
            return Err(FilterError::UnknownOption {
                control: control.id,
                value: value.to_string(),
            });
        }

        self.control_mut(slot).value = value.to_string();
        let active = value != NO_FILTER;
        let sibling = self.control_mut(slot.other());
        if active {
            sibling.value = NO_FILTER.to_string();
            sibling.enabled = false;
        } else {
            sibling.enabled = true;
        }

        let state = self.state();
        debug!("filter {} = {:?} -> {:?}", self.control(slot).id, value, state);
        Ok(state)
    }

    /// Query parameters for the active filters; the sentinel is omitted.
    pub fn query(&self) -> Vec<(&'static str, String)> {
        self.controls()
            .iter()
            .filter(|c| !c.is_default())
            .map(|c| (c.param, c.value.clone()))
            .collect()
    }
}

#[cfg(test)]
mod test {
    use super::{
        Control, FilterError, FilterPair, FilterState, Slot, FUNDING_SOURCES, MACROAREAS,
        NO_FILTER, REGIONS,
    };

    fn pair() -> FilterPair {
        FilterPair::new(
            Control::new("macroAreaFilter", "macro_area", "Macro area", MACROAREAS),
            Control::new(
                "fundingSourceFilter",
                "funding_source",
                "Fonte",
                FUNDING_SOURCES,
            ),
        )
    }

    #[test]
    fn test_initial_state() {
        let p = pair();
        assert_eq!(p.state(), FilterState::BothDefault);
        assert!(p.controls().iter().all(|c| c.is_enabled() && c.is_default()));
        assert!(p.query().is_empty());
    }

    #[test]
    fn test_activating_one_disables_the_other() {
        for (slot, value) in [(Slot::First, "MEZZOGIORNO"), (Slot::Second, "UE")] {
            let sibling_value = match slot {
                Slot::First => "Stato",
                Slot::Second => "ESTERO",
            };
            let mut p = pair();
            p.change(slot.other(), sibling_value).unwrap();
            // the sibling is now active, so `slot` is disabled
            assert!(p.change(slot, value).is_err());

            p.change(slot.other(), NO_FILTER).unwrap();
            assert_eq!(p.state(), FilterState::BothDefault);
            let state = p.change(slot, value).unwrap();

            let sibling = p.control(slot.other());
            assert_eq!(sibling.value(), NO_FILTER);
            assert!(!sibling.is_enabled());
            assert_eq!(
                state,
                match slot {
                    Slot::First => FilterState::FirstActive,
                    Slot::Second => FilterState::SecondActive,
                }
            );
        }
    }

    #[test]
    fn test_back_to_default_reenables() {
        let mut p = pair();
        p.change(Slot::First, "CENTRO-NORD").unwrap();
        assert!(!p.control(Slot::Second).is_enabled());
        let state = p.change(Slot::First, NO_FILTER).unwrap();
        assert_eq!(state, FilterState::BothDefault);
        assert!(p.control(Slot::Second).is_enabled());
    }

    #[test]
    fn test_switching_value_keeps_sibling_disabled() {
        let mut p = pair();
        p.change(Slot::Second, "UE").unwrap();
        p.change(Slot::Second, "Privato").unwrap();
        assert_eq!(p.state(), FilterState::SecondActive);
        assert_eq!(p.query(), vec![("funding_source", "Privato".to_string())]);
        assert_eq!(
            p.change(Slot::First, "ESTERO"),
            Err(FilterError::Disabled("macroAreaFilter"))
        );
    }

    #[test]
    fn test_unknown_option_rejected() {
        let mut p = pair();
        let err = p.change(Slot::First, "ATLANTIDE").unwrap_err();
        assert_eq!(
            err,
            FilterError::UnknownOption {
                control: "macroAreaFilter",
                value: "ATLANTIDE".to_string()
            }
        );
        assert_eq!(p.state(), FilterState::BothDefault);
        assert!(p.control(Slot::Second).is_enabled());
    }

    #[test]
    fn test_region_codes_have_three_digits() {
        assert_eq!(REGIONS.len(), 20);
        assert_eq!(REGIONS[0], ("001", "Piemonte"));
        assert_eq!(REGIONS[11], ("012", "Lazio"));
        assert!(REGIONS.iter().all(|(code, _)| code.len() == 3));

        let mut p = FilterPair::new(
            Control::new("regionFilter", "region", "Regione", REGIONS),
            Control::new("macroareaFilter", "macroarea", "Macroarea", MACROAREAS),
        );
        assert!(p.change(Slot::First, "12").is_err());
        p.change(Slot::First, "012").unwrap();
        assert_eq!(p.query(), vec![("region", "012".to_string())]);
    }

    #[test]
    fn test_query_omits_sentinel() {
        let mut p = pair();
        p.change(Slot::First, "AMBITO NAZIONALE").unwrap();
        assert_eq!(
            p.query(),
            vec![("macro_area", "AMBITO NAZIONALE".to_string())]
        );
        p.change(Slot::First, NO_FILTER).unwrap();
        assert_eq!(p.state(), FilterState::BothDefault);
        assert!(p.query().is_empty());
        assert!(p.controls().iter().all(|c| c.is_enabled()));
    }
}
