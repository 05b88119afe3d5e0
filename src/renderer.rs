//! Owner of the mount point -> live chart mapping of one dashboard page.
//!
//! A chart is bound to its mount point, the chart id, only once its
//! configuration has been validated and serialized; binding a new chart to
//! an occupied mount point releases the previous one first, so a mount point
//! never holds more than one instance.
use crate::charts::{mount_html, Chart};
use log::debug;
use maud::{html, Markup};
use std::collections::HashMap;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("chart `{mount}` has {labels} labels but {values} values")]
    Misaligned {
        mount: String,
        labels: usize,
        values: usize,
    },
    #[error("chart `{mount}` cannot be serialized: {source}")]
    Serialize {
        mount: String,
        source: serde_json::Error,
    },
}

/// A chart bound to a mount point together with its Chart.js configuration.
#[derive(Debug, Clone)]
pub struct LiveChart {
    pub chart: Chart,
    pub config: String,
}

#[derive(Debug, Default)]
pub struct Renderer {
    live: HashMap<String, LiveChart>,
    released: usize,
}

impl Renderer {
    pub fn new() -> Renderer {
        Renderer::default()
    }

    /// Validate and serialize `chart` without binding it.
    pub fn prepare(chart: Chart) -> Result<LiveChart, RenderError> {
        if let Some((labels, values)) = chart.misaligned() {
            return Err(RenderError::Misaligned {
                mount: chart.id().to_string(),
                labels,
                values,
            });
        }
        let config = chart
            .to_json_dict()
            .map_err(|source| RenderError::Serialize {
                mount: chart.id().to_string(),
                source,
            })?;
        Ok(LiveChart { chart, config })
    }

    /// Bind every chart or none: all configurations are prepared before the
    /// first one replaces anything. Returns the errors of every failed chart.
    pub fn render_all(&mut self, charts: Vec<Chart>) -> Result<(), Vec<RenderError>> {
        let mut prepared = vec![];
        let mut errors = vec![];
        for chart in charts {
            match Renderer::prepare(chart) {
                Ok(live) => prepared.push(live),
                Err(e) => errors.push(e),
            }
        }
        if !errors.is_empty() {
            return Err(errors);
        }
        for live in prepared {
            self.bind(live);
        }
        Ok(())
    }

    fn bind(&mut self, live: LiveChart) {
        let mount = live.chart.id().to_string();
        if self.live.insert(mount.clone(), live).is_some() {
            self.released += 1;
            debug!("released prior chart bound to {}", mount);
        }
    }

    pub fn get(&self, mount: &str) -> Option<&LiveChart> {
        self.live.get(mount)
    }

    /// Number of bound mount points.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// How many instances have been replaced since creation.
    pub fn released(&self) -> usize {
        self.released
    }

    /// Canvas and script of each mount point in `order`; unbound mount points
    /// get an empty canvas.
    pub fn to_html(&self, order: &[&str]) -> Markup {
        html! {
            @for mount in order {
                @match self.get(mount) {
                    Some(live) => {
                        (mount_html(mount, &live.config))
                    }
                    None => {
                        div class="chart" { canvas id=(mount) {} }
                    }
                }
            }
        }
    }
}

#[cfg(test)]
impl Renderer {
    /// Number of live instances bound to `mount`: 0 or 1.
    pub fn live_count(&self, mount: &str) -> usize {
        self.live.contains_key(mount) as usize
    }
}
