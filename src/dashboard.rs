//! One dashboard page and its refresh passes.
//!
//! A pass is: KPI placeholders, fetch, transform, KPI texts, every chart.
//! Passes are numbered; only the latest issued pass may commit, so a slow
//! response overtaken by a newer request is dropped instead of overwriting
//! newer charts. A failed fetch without fallback aborts the pass and leaves
//! the charts of the previous pass in place.
use crate::fetch::{fetch, DataMode, FetchOutcome, Source};
use crate::filters::FilterPair;
use crate::pages::Board;
use crate::renderer::Renderer;
use crate::templates::{filter_form, kpi_cards, mode_badge, page, page_stem};
use log::{error, info, warn};
use maud::{html, Markup};

const KPI_PENDING: &str = "...";

/// Ticket of an issued pass.
#[derive(Debug, PartialEq, Eq)]
pub struct PassToken(u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PassResult {
    Committed(DataMode),
    /// A newer pass was issued meanwhile; nothing was touched.
    Stale,
    /// No data and no fallback; the previous render stays.
    Unavailable,
    /// This many charts failed validation; none was replaced.
    RenderFailed(usize),
}

pub struct Dashboard<B: Board> {
    filters: FilterPair,
    renderer: Renderer,
    kpis: Vec<(&'static str, String)>,
    issued: u64,
    mode: Option<DataMode>,
    view: Option<B::View>,
}

impl<B: Board> Dashboard<B> {
    pub fn new() -> Dashboard<B> {
        Dashboard {
            filters: B::filters(),
            renderer: Renderer::new(),
            kpis: vec![],
            issued: 0,
            mode: None,
            view: None,
        }
    }

    pub fn filters_mut(&mut self) -> &mut FilterPair {
        &mut self.filters
    }

    pub fn view(&self) -> Option<&B::View> {
        self.view.as_ref()
    }

    /// File stem of the page showing the current filters.
    pub fn page_stem(&self) -> String {
        page_stem(B::NAME, &self.filters.query())
    }

    /// Issue a new pass and show the KPI placeholders.
    pub fn begin_pass(&mut self) -> PassToken {
        self.issued += 1;
        self.kpis = B::KPI_CARDS
            .iter()
            .map(|(id, _)| (*id, KPI_PENDING.to_string()))
            .collect();
        info!(
            "{} pass {} with filters {:?}",
            B::NAME,
            self.issued,
            self.filters.query()
        );
        PassToken(self.issued)
    }

    pub fn complete_pass(
        &mut self,
        token: PassToken,
        outcome: FetchOutcome<B::Raw>,
    ) -> PassResult {
        if token.0 != self.issued {
            warn!(
                "{} pass {} is stale (latest is {}), discarding",
                B::NAME,
                token.0,
                self.issued
            );
            return PassResult::Stale;
        }

        let (mode, raw) = match (outcome.mode(), outcome.raw()) {
            (Some(mode), Some(raw)) => (mode, raw),
            _ => {
                error!("{} pass {} aborted: no data", B::NAME, token.0);
                return PassResult::Unavailable;
            }
        };
        let view = match B::transform(raw) {
            Some(view) => view,
            None => {
                error!("{} pass {} aborted: empty view", B::NAME, token.0);
                return PassResult::Unavailable;
            }
        };

        self.kpis = B::kpis(&view);
        if let Err(errors) = self.renderer.render_all(B::charts(&view)) {
            for e in errors.iter() {
                error!("{} pass {}: {}", B::NAME, token.0, e);
            }
            return PassResult::RenderFailed(errors.len());
        }

        self.view = Some(view);
        self.mode = Some(mode);
        info!(
            "{} pass {} committed ({:?}), {} charts bound, {} released so far",
            B::NAME,
            token.0,
            mode,
            self.renderer.len(),
            self.renderer.released()
        );
        PassResult::Committed(mode)
    }

    /// Initial load and "apply filters": one full pass with the current
    /// filters.
    pub fn run_pass(&mut self, source: &dyn Source) -> PassResult {
        let token = self.begin_pass();
        let query = self.filters.query();
        let outcome = fetch(source, B::ROUTE, &query, B::fallback());
        self.complete_pass(token, outcome)
    }

    pub fn to_html(&self) -> Markup {
        let content = html! {
            (mode_badge(self.mode))
            (filter_form(B::NAME, &self.filters))
            (kpi_cards(B::KPI_CARDS, &self.kpis))
            (self.renderer.to_html(B::MOUNTS))
        };
        page(B::TITLE, content)
    }
}

impl<B: Board> Default for Dashboard<B> {
    fn default() -> Self {
        Dashboard::new()
    }
}

#[cfg(test)]
impl<B: Board> Dashboard<B> {
    pub fn renderer(&self) -> &Renderer {
        &self.renderer
    }

    /// Origin of the committed charts, `None` before the first commit.
    pub fn mode(&self) -> Option<DataMode> {
        self.mode
    }

    pub fn kpi(&self, id: &str) -> Option<&str> {
        self.kpis
            .iter()
            .find(|(k, _)| *k == id)
            .map(|(_, text)| text.as_str())
    }
}
