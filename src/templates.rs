use crate::fetch::DataMode;
use crate::filters::{Control, FilterPair, NO_FILTER};
use chrono::Utc;
use maud::{html, Markup, PreEscaped, DOCTYPE};

const SITE_TITLE: &str = "Progetti di coesione";

/// Keeps the two selects of a filter form mutually exclusive in the browser;
/// the apply button opens the page rendered for the selected option.
const FILTER_SCRIPT: &str = r#"
document.querySelectorAll('form.filters').forEach(function(form) {
    var selects = form.querySelectorAll('select');
    selects.forEach(function(select) {
        select.addEventListener('change', function() {
            selects.forEach(function(other) {
                if (other === select) { return; }
                if (select.value !== 'nessun filtro') {
                    other.value = 'nessun filtro';
                    other.disabled = true;
                } else {
                    other.disabled = false;
                }
            });
        });
    });
    form.querySelector('#applyFilters').addEventListener('click', function() {
        var page = form.dataset.page;
        selects.forEach(function(select) {
            if (!select.disabled && select.value !== 'nessun filtro') {
                page = select.selectedOptions[0].dataset.page;
            }
        });
        window.location.href = page;
    });
});
"#;

pub fn now() -> String {
    Utc::now().format("%Y-%m-%d %H:%M UTC").to_string()
}

/// Pages headers.
fn header(title: &str) -> Markup {
    html! {
        head {
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1.0";
            script src="https://cdn.jsdelivr.net/npm/chart.js" { }

            title { (title) " - " (SITE_TITLE) }
        }
    }
}

/// A static footer.
fn footer() -> Markup {
    html! {
        footer {
            p { a href="index.html" { "Home" } }
            p { "Page created " (now()) }
        }
    }
}

/// The final Markup, including `header` and `footer`.
pub fn page(title: &str, content: Markup) -> Markup {
    html! {
        (DOCTYPE)
        html lang = "it" {
            (header(title))
            body style="font-family: 'Arimo', Arial, sans-serif;" {
                h1 { a href="index.html" { (SITE_TITLE) } }
                h2 { (title) }
                (content)
                (footer())
            }
        }
    }
}

/// KPI cards; `values` holds the text of each element id, missing ids show
/// the pending placeholder.
pub fn kpi_cards(
    cards: &[(&'static str, &'static str)],
    values: &[(&'static str, String)],
) -> Markup {
    html! {
        div class="kpis" {
            @for (id, caption) in cards {
                div class="kpi" {
                    p class="kpi-caption" { (caption) }
                    span id=(id) { (kpi_text(values, id)) }
                }
            }
        }
    }
}

fn kpi_text<'a>(values: &'a [(&'static str, String)], id: &str) -> &'a str {
    values
        .iter()
        .find(|(v, _)| *v == id)
        .map(|(_, text)| text.as_str())
        .unwrap_or("...")
}

/// File stem of the page of dashboard `name` rendered with `query`, e.g.
/// `analysis-macro_area-ambito_nazionale`.
pub fn page_stem(name: &str, query: &[(&str, String)]) -> String {
    let mut stem = name.to_string();
    for (param, value) in query {
        stem.push('-');
        stem.push_str(param);
        stem.push('-');
        stem.extend(value.chars().map(|c| {
            if c.is_ascii_alphanumeric() {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        }));
    }
    stem
}

fn page_file(name: &str, query: &[(&str, String)]) -> String {
    format!("{}.html", page_stem(name, query))
}

fn select(name: &str, control: &Control) -> Markup {
    html! {
        label for=(control.id) { (control.label) }
        select id=(control.id) name=(control.param) disabled[!control.is_enabled()] {
            option
                value=(NO_FILTER)
                data-page=(page_file(name, &[]))
                selected[control.is_default()] { (NO_FILTER) }
            @for (value, caption) in control.options {
                option
                    value=(value)
                    data-page=(page_file(name, &[(control.param, value.to_string())]))
                    selected[control.value() == *value] { (caption) }
            }
        }
    }
}

/// The two filter selects of dashboard `name`, reflecting `filters`, and the
/// apply button leading to the page of the selection.
pub fn filter_form(name: &str, filters: &FilterPair) -> Markup {
    html! {
        form class="filters" data-page=(page_file(name, &[])) {
            @for control in filters.controls() {
                (select(name, control))
            }
            button id="applyFilters" type="button" { "Applica filtri" }
        }
        script { (PreEscaped(FILTER_SCRIPT)) }
    }
}

/// Notice shown when the charts come from the offline dataset.
pub fn mode_badge(mode: Option<DataMode>) -> Markup {
    html! {
        @match mode {
            Some(DataMode::Demo) => {
                p class="demo-badge" { "Dati dimostrativi: il servizio non è raggiungibile." }
            }
            None => {
                p class="demo-badge" { "Dati non disponibili." }
            }
            Some(DataMode::Live) => {}
        }
    }
}

/// Entry of the index page.
pub struct Link {
    pub title: &'static str,
    pub description: &'static str,
    pub permalink: String,
}

pub fn create_index(links: &[Link]) -> Markup {
    let content = html! {
        ul {
            @for link in links {
                li {
                    p {
                        a href=(link.permalink) { (link.title) }
                        " - "
                        (link.description)
                    }
                }
            }
        }
    };
    page("Dashboard", content)
}

#[cfg(test)]
mod test {
    use super::{create_index, filter_form, kpi_cards, mode_badge, page_stem, Link};
    use crate::fetch::DataMode;
    use crate::filters::{Control, FilterPair, Slot, MACROAREAS, REGIONS};

    #[test]
    fn test_escape() {
        let cards = [("totale-progetti", "<b>")];
        let html = kpi_cards(&cards, &[]).into_string();
        assert!(html.contains("&lt;b&gt;"));
        assert!(html.contains("<span id=\"totale-progetti\">...</span>"));
    }

    #[test]
    fn test_kpi_values() {
        let cards = [("a", "A"), ("b", "B")];
        let html = kpi_cards(&cards, &[("b", "1.500".to_string())]).into_string();
        assert!(html.contains("<span id=\"a\">...</span>"));
        assert!(html.contains("<span id=\"b\">1.500</span>"));
    }

    #[test]
    fn test_filter_form_reflects_state() {
        let mut filters = FilterPair::new(
            Control::new("regionFilter", "region", "Regione", REGIONS),
            Control::new("macroareaFilter", "macroarea", "Macroarea", MACROAREAS),
        );
        filters.change(Slot::First, "012").unwrap();
        let html = filter_form("overview", &filters).into_string();
        assert!(html.contains(
            "<option value=\"012\" data-page=\"overview-region-012.html\" selected>Lazio</option>"
        ));
        assert!(html.contains("<select id=\"macroareaFilter\" name=\"macroarea\" disabled>"));
        assert!(html.contains("<select id=\"regionFilter\" name=\"region\">"));
    }

    #[test]
    fn test_apply_leads_to_rendered_pages() {
        let filters = FilterPair::new(
            Control::new("regionFilter", "region", "Regione", REGIONS),
            Control::new("macroareaFilter", "macroarea", "Macroarea", MACROAREAS),
        );
        let html = filter_form("overview", &filters).into_string();
        assert!(html.contains("<form class=\"filters\" data-page=\"overview.html\">"));
        assert!(html.contains("<button id=\"applyFilters\" type=\"button\">"));
        assert!(!html.contains("type=\"submit\""));
        assert!(html.contains("data-page=\"overview-macroarea-centro_nord.html\""));
        assert!(html.contains("window.location.href = page;"));
    }

    #[test]
    fn test_page_stem() {
        assert_eq!(page_stem("overview", &[]), "overview");
        assert_eq!(
            page_stem("analysis", &[("macro_area", "AMBITO NAZIONALE".to_string())]),
            "analysis-macro_area-ambito_nazionale"
        );
        assert_eq!(
            page_stem("analysis", &[("funding_source", "Altro_Pubblico".to_string())]),
            "analysis-funding_source-altro_pubblico"
        );
    }

    #[test]
    fn test_mode_badge() {
        assert_eq!(mode_badge(Some(DataMode::Live)).into_string(), "");
        assert!(mode_badge(Some(DataMode::Demo))
            .into_string()
            .contains("Dati dimostrativi"));
        assert!(mode_badge(None).into_string().contains("non disponibili"));
    }

    #[test]
    fn test_index() {
        let links = vec![Link {
            title: "Analisi finanziaria",
            description: "Fonti",
            permalink: "analysis.html".to_string(),
        }];
        let html = create_index(&links).into_string();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<a href=\"analysis.html\">Analisi finanziaria</a>"));
    }
}
